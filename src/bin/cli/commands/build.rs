use std::path::Path;

use anyhow::{Context, Result};

use pyq_lib::publish::{publish_site, ProgressFn, PublishOptions};

use crate::app::App;
use crate::OutputFormat;

pub fn run(
    app: App,
    out: &Path,
    title: Option<String>,
    theme: Option<String>,
    expand: bool,
    format: &OutputFormat,
) -> Result<()> {
    let catalog = app.catalog()?;

    let mut options = PublishOptions::from(app.config);
    if let Some(title) = title {
        options.site_title = title;
    }
    if let Some(theme) = theme {
        options.theme = theme;
    }
    options.expand_questions |= expand;

    let progress: ProgressFn = Box::new(|current, total, label| {
        log::debug!("[{}/{}] {}", current + 1, total, label);
    });

    let result = publish_site(&app.store, &catalog, out, &options, Some(&progress))
        .with_context(|| format!("Failed to build site in {}", out.display()))?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        OutputFormat::Plain => {
            println!(
                "Built {} ({} subjects, {} question pages, {} formula sheets)",
                result.output_dir,
                result.subject_count,
                result.question_page_count,
                result.formula_page_count
            );
            for key in &result.skipped_formula_pages {
                println!("  skipped formula sheet {} (unreadable)", key);
            }
        }
    }

    Ok(())
}
