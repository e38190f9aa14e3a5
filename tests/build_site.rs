use std::fs;
use std::path::{Path, PathBuf};

use pyq_lib::config::{SiteConfig, CONFIG_FILE_NAME};
use pyq_lib::content::{Catalog, ContentKey, ContentStore};
use pyq_lib::publish::{publish_site, PageOutcome, PublishOptions, Route, SiteRenderer};
use tempfile::TempDir;

fn fixture_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn open_fixture() -> (ContentStore, SiteConfig, Catalog) {
    let root = fixture_root();
    let config = SiteConfig::load(&root.join(CONFIG_FILE_NAME)).unwrap();
    let store = ContentStore::new(root);
    let catalog = Catalog::load(&store, &config.subject_names).unwrap();
    (store, config, catalog)
}

fn read(root: &Path, rel: &str) -> String {
    fs::read_to_string(root.join(rel)).unwrap_or_else(|e| panic!("{}: {}", rel, e))
}

#[test]
fn builds_every_enumerated_page() {
    let (store, config, catalog) = open_fixture();
    let out = TempDir::new().unwrap();

    let result = publish_site(
        &store,
        &catalog,
        out.path(),
        &PublishOptions::from(config),
        None,
    )
    .unwrap();

    assert_eq!(result.subject_count, 2);
    assert_eq!(result.question_page_count, 3);
    assert_eq!(result.formula_page_count, 1);
    assert!(result.skipped_formula_pages.is_empty());

    let home = read(out.path(), "index.html");
    assert!(home.contains("href=\"/fluid-mechanics\""));
    assert!(home.contains("Power Engineering"));

    let subject = read(out.path(), "fluid-mechanics/index.html");
    assert!(subject.contains("href=\"/fluid-mechanics/2023/formulas\""));

    let paper = read(out.path(), "fluid-mechanics/2023/index.html");
    assert!(paper.contains("Answer: N·s/m²"));
    assert!(paper.contains("2022 (4), 2021 (6)"));
    assert!(paper.contains("href=\"/fluid-mechanics/2023/formulas#bernoulli\""));
    assert!(paper.contains("Diagram required in exam"));

    // Malformed document still gets a page.
    let broken = read(out.path(), "power-engineering/2024-dec/index.html");
    assert!(broken.contains("No questions found for Power Engineering - 2024-dec."));

    let sheet = read(out.path(), "fluid-mechanics/2023/formulas/index.html");
    assert!(sheet.contains("id=\"bernoulli\""));
    assert!(sheet.contains("Used in: Q2"));
    assert_eq!(sheet.matches("Used in:").count(), 1);

    assert!(!out.path().join("fluid-mechanics/2022/formulas").exists());
    assert!(!out.path().join("power-engineering/2024-dec/formulas").exists());
}

#[test]
fn formula_sheet_without_document_is_not_found() {
    let (store, config, catalog) = open_fixture();
    let options = PublishOptions::from(config);
    let renderer = SiteRenderer::new(&store, &catalog, &options);

    let route = Route::Formulas(ContentKey::new("fluid-mechanics", "2022"));
    assert_eq!(renderer.render(&route), PageOutcome::NotFound);

    let route = Route::parse("/fluid-mechanics/2022").unwrap();
    let html = renderer.render(&route).into_html().unwrap();
    assert!(html.contains("id=\"q-4\""));
    // `formula` without `formulaId` names the formula but links nowhere.
    assert!(html.contains("<strong>Formula:</strong> Bernoulli"));
    assert!(!html.contains("formulas#"));
}
