use anyhow::Result;

use crate::app::App;
use crate::render::terminal::Color;
use crate::OutputFormat;

pub fn run(app: &App, format: &OutputFormat, use_color: bool) -> Result<()> {
    let catalog = app.catalog()?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&catalog)?);
        }
        OutputFormat::Plain => {
            if catalog.subjects.is_empty() {
                println!("No subjects found.");
                return Ok(());
            }

            for subject in &catalog.subjects {
                if use_color {
                    println!("{}{}{} ({})", Color::BOLD, subject.name, Color::RESET, subject.slug);
                } else {
                    println!("{} ({})", subject.name, subject.slug);
                }

                for year in &subject.years {
                    let mut marks = Vec::new();
                    if !year.has_questions {
                        marks.push("no questions");
                    }
                    if year.has_formulas {
                        marks.push("formulas");
                    }
                    let suffix = if marks.is_empty() {
                        String::new()
                    } else if use_color {
                        format!(" {}[{}]{}", Color::GRAY, marks.join(", "), Color::RESET)
                    } else {
                        format!(" [{}]", marks.join(", "))
                    };
                    println!("    {}{}", year.slug, suffix);
                }
            }
        }
    }

    Ok(())
}
