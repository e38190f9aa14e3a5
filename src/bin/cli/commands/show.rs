use anyhow::{Context, Result};

use pyq_lib::content::{humanize_slug, ContentKey};
use pyq_lib::publish::{DisclosureState, QuestionCard};

use crate::app::App;
use crate::render::terminal;
use crate::OutputFormat;

pub fn run(
    app: &App,
    subject: &str,
    year: &str,
    formulas: bool,
    format: &OutputFormat,
    use_color: bool,
) -> Result<()> {
    let key = ContentKey::new(subject, year);
    if formulas {
        show_formulas(app, &key, format, use_color)
    } else {
        show_questions(app, &key, format, use_color)
    }
}

fn show_questions(app: &App, key: &ContentKey, format: &OutputFormat, use_color: bool) -> Result<()> {
    let questions = app.store.load_questions(key);

    if let OutputFormat::Json = format {
        println!("{}", serde_json::to_string_pretty(&questions)?);
        return Ok(());
    }

    let name = app
        .catalog()
        .map(|c| c.subject_name(&key.subject))
        .unwrap_or_else(|_| humanize_slug(&key.subject));
    println!("{}", terminal::heading(&name, use_color));
    println!("{}", terminal::dim(&format!("Year: {}", key.year), use_color));
    println!();

    if questions.is_empty() {
        println!("No questions found for {} - {}.", name, key.year);
        return Ok(());
    }

    for question in &questions {
        let card = QuestionCard::new(question, key).with_state(DisclosureState::Expanded);
        let mut lines = card.render_text().into_iter();
        if let Some(summary) = lines.next() {
            println!("{}", terminal::bold(&summary, use_color));
        }
        for line in lines {
            println!("{}", line);
        }
        println!();
    }

    Ok(())
}

fn show_formulas(app: &App, key: &ContentKey, format: &OutputFormat, use_color: bool) -> Result<()> {
    let formulas = app
        .store
        .load_formulas(key)
        .with_context(|| format!("No formula sheet for {}", key))?;

    if let OutputFormat::Json = format {
        println!("{}", serde_json::to_string_pretty(&formulas)?);
        return Ok(());
    }

    println!(
        "{}",
        terminal::heading(&format!("{} {} - Formula Sheet", key.subject, key.year), use_color)
    );
    println!();

    for formula in &formulas {
        println!("{}", terminal::bold(&formula.name, use_color));
        println!("    {}", formula.latex);
        if let Some(used_in) = formula.used_in_text() {
            println!("    {}", terminal::dim(&used_in, use_color));
        }
        println!();
    }

    Ok(())
}
