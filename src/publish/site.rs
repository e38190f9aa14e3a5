use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::SiteConfig;
use crate::content::{Catalog, ContentStore};

use super::disclosure::DisclosureState;
use super::pages::{
    render_formulas, render_home, render_questions, render_subject, PageContext, PageOutcome,
};
use super::routes::Route;
use super::themes::{available_themes, get_theme, Theme};

#[derive(Error, Debug)]
pub enum PublishError {
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishOptions {
    pub site_title: String,
    pub theme: String,
    #[serde(default)]
    pub expand_questions: bool,
}

impl Default for PublishOptions {
    fn default() -> Self {
        SiteConfig::default().into()
    }
}

impl From<SiteConfig> for PublishOptions {
    fn from(config: SiteConfig) -> Self {
        Self {
            site_title: config.site_title,
            theme: config.theme,
            expand_questions: config.expand_questions,
        }
    }
}

impl PublishOptions {
    fn initial_state(&self) -> DisclosureState {
        if self.expand_questions {
            DisclosureState::Expanded
        } else {
            DisclosureState::Collapsed
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishResult {
    pub output_dir: String,
    pub subject_count: usize,
    pub question_page_count: usize,
    pub formula_page_count: usize,
    /// Formula sheets that were enumerated but failed to load.
    pub skipped_formula_pages: Vec<String>,
}

/// Progress callback type used during publishing.
pub type ProgressFn = Box<dyn Fn(usize, usize, &str) + Send>;

/// Renders routes against a store. Each render reads its document afresh.
pub struct SiteRenderer<'a> {
    store: &'a ContentStore,
    catalog: &'a Catalog,
    options: &'a PublishOptions,
    theme: Theme,
    date: String,
}

impl<'a> SiteRenderer<'a> {
    pub fn new(store: &'a ContentStore, catalog: &'a Catalog, options: &'a PublishOptions) -> Self {
        if !available_themes().contains(&options.theme.as_str()) {
            log::warn!(
                "Unknown theme {:?}, using minimal (available: {})",
                options.theme,
                available_themes().join(", ")
            );
        }
        Self {
            store,
            catalog,
            options,
            theme: get_theme(&options.theme),
            date: chrono::Local::now().format("%B %d, %Y").to_string(),
        }
    }

    pub fn css(&self) -> &'static str {
        self.theme.css
    }

    pub fn render(&self, route: &Route) -> PageOutcome {
        let ctx = PageContext {
            site_title: &self.options.site_title,
            theme: &self.theme,
            catalog: self.catalog,
            initial_state: self.options.initial_state(),
            date: &self.date,
        };

        match route {
            Route::Home => PageOutcome::Rendered(render_home(&ctx)),
            Route::Subject(subject) => render_subject(&ctx, subject),
            Route::Questions(key) => {
                let questions = self.store.load_questions(key);
                PageOutcome::Rendered(render_questions(&ctx, key, &questions))
            }
            Route::Formulas(key) => match self.store.load_formulas(key) {
                Ok(formulas) => render_formulas(&ctx, key, Some(formulas.as_slice())),
                Err(e) => {
                    log::info!("Formula sheet {} unavailable: {}", key, e);
                    render_formulas(&ctx, key, None)
                }
            },
        }
    }
}

/// Build the whole site into `output_dir`.
///
/// Enumeration failures abort the build. A question document that fails to
/// load still produces its page (with the empty notice); a formula sheet that
/// fails to load produces no page.
pub fn publish_site(
    store: &ContentStore,
    catalog: &Catalog,
    output_dir: &Path,
    options: &PublishOptions,
    progress: Option<&ProgressFn>,
) -> Result<PublishResult, PublishError> {
    let renderer = SiteRenderer::new(store, catalog, options);

    fs::create_dir_all(output_dir).map_err(|e| PublishError::Write {
        path: output_dir.to_path_buf(),
        source: e,
    })?;

    let mut routes = vec![Route::Home];
    routes.extend(
        catalog
            .subjects
            .iter()
            .map(|s| Route::Subject(s.slug.clone())),
    );
    routes.extend(catalog.question_keys().map(Route::Questions));
    routes.extend(catalog.formula_keys().map(Route::Formulas));

    let total = routes.len() + 1; // +1 for style.css
    let mut current = 0;

    if let Some(cb) = progress {
        cb(current, total, "Writing style.css");
    }
    write_file(&output_dir.join("style.css"), renderer.css())?;
    current += 1;

    let mut result = PublishResult {
        output_dir: output_dir.to_string_lossy().to_string(),
        subject_count: catalog.subjects.len(),
        question_page_count: 0,
        formula_page_count: 0,
        skipped_formula_pages: Vec::new(),
    };

    for route in &routes {
        if let Some(cb) = progress {
            cb(current, total, &format!("Rendering {}", route.href()));
        }
        current += 1;

        match renderer.render(route) {
            PageOutcome::Rendered(html) => {
                write_file(&output_dir.join(route.output_path()), &html)?;
                match route {
                    Route::Questions(_) => result.question_page_count += 1,
                    Route::Formulas(_) => result.formula_page_count += 1,
                    Route::Home | Route::Subject(_) => {}
                }
            }
            PageOutcome::NotFound => {
                log::warn!("Skipping {}: not found", route.href());
                if let Route::Formulas(key) = route {
                    result.skipped_formula_pages.push(key.to_string());
                }
            }
        }
    }

    log::info!(
        "Published {} question pages and {} formula pages to {:?}",
        result.question_page_count,
        result.formula_page_count,
        output_dir
    );

    Ok(result)
}

fn write_file(path: &Path, contents: &str) -> Result<(), PublishError> {
    let to_err = |e: std::io::Error| PublishError::Write {
        path: path.to_path_buf(),
        source: e,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(to_err)?;
    }
    fs::write(path, contents).map_err(to_err)
}
