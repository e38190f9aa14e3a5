//! Page renderers. Each returns the full HTML document for one route.

use crate::content::{Catalog, ContentKey, Formula, Question};

use super::disclosure::{DisclosureState, QuestionCard};
use super::html::{escape_attr, escape_text, link, shout_subject, shout_year};
use super::routes::Route;
use super::themes::Theme;

/// Result of rendering one route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOutcome {
    Rendered(String),
    /// The resource does not exist; no page is produced.
    NotFound,
}

impl PageOutcome {
    pub fn into_html(self) -> Option<String> {
        match self {
            Self::Rendered(html) => Some(html),
            Self::NotFound => None,
        }
    }
}

/// Everything a renderer needs besides the page's own data.
pub struct PageContext<'a> {
    pub site_title: &'a str,
    pub theme: &'a Theme,
    pub catalog: &'a Catalog,
    pub initial_state: DisclosureState,
    /// Shown in the page footer.
    pub date: &'a str,
}

impl PageContext<'_> {
    fn wrap(&self, page_title: &str, content: &str) -> String {
        self.theme.render_page(
            &escape_text(page_title),
            &escape_text(self.site_title),
            content,
            &escape_text(self.date),
        )
    }
}

/// `/`: one card per subject in the catalog.
pub fn render_home(ctx: &PageContext) -> String {
    let mut content = format!(
        "    <h1>{}</h1>\n    <p class=\"lead\">Select a subject to view the previous year questions and solutions.</p>\n",
        escape_text(ctx.site_title)
    );

    if ctx.catalog.subjects.is_empty() {
        content.push_str("    <p class=\"empty\">No subjects found.</p>\n");
    } else {
        content.push_str("    <ul class=\"card-grid\">\n");
        for subject in &ctx.catalog.subjects {
            let years = subject.years.iter().filter(|y| y.has_questions).count();
            content.push_str(&format!(
                "      <li>{}<span class=\"meta\">{} {}</span></li>\n",
                link(
                    &Route::Subject(subject.slug.clone()).href(),
                    &subject.name,
                    Some("title")
                ),
                years,
                if years == 1 { "year" } else { "years" }
            ));
        }
        content.push_str("    </ul>\n");
    }

    ctx.wrap(ctx.site_title, &content)
}

/// `/{subject}`: one card per year. Subjects outside the catalog do not
/// exist.
pub fn render_subject(ctx: &PageContext, subject: &str) -> PageOutcome {
    let Some(entry) = ctx.catalog.subject(subject) else {
        return PageOutcome::NotFound;
    };

    let mut content = format!(
        "    {}\n    <h1>{}</h1>\n    <p class=\"lead\">Select a year to view the questions and solutions.</p>\n    <ul class=\"card-grid\">\n",
        link(&Route::Home.href(), "\u{2190} Back to Subjects", Some("back")),
        escape_text(&entry.name)
    );

    for year in &entry.years {
        let key = ContentKey::new(entry.slug.clone(), year.slug.clone());
        let title = format!("Year: {}", year.slug);
        content.push_str("      <li>");
        if year.has_questions {
            content.push_str(&link(&Route::Questions(key.clone()).href(), &title, Some("title")));
            content.push_str("<span class=\"meta\">View Full Paper</span>");
        } else {
            content.push_str(&format!("<span class=\"title\">{}</span>", escape_text(&title)));
        }
        if year.has_formulas {
            content.push_str(&format!(
                " {}",
                link(&Route::Formulas(key).href(), "Formula Sheet", Some("meta"))
            ));
        }
        content.push_str("</li>\n");
    }
    content.push_str("    </ul>\n");

    PageOutcome::Rendered(ctx.wrap(&entry.name, &content))
}

/// `/{subject}/{year}`: the question list. An empty list renders a notice,
/// never a missing page.
pub fn render_questions(ctx: &PageContext, key: &ContentKey, questions: &[Question]) -> String {
    let subject_name = ctx.catalog.subject_name(&key.subject);

    let mut content = format!(
        "    {}\n    <h1>{}</h1>\n    <h2>Year: {}</h2>\n",
        link(
            &Route::Subject(key.subject.clone()).href(),
            &format!("\u{2190} Back to {} Years", subject_name),
            Some("back")
        ),
        escape_text(&subject_name),
        escape_text(&key.year)
    );

    if questions.is_empty() {
        content.push_str(&format!(
            "    <p class=\"empty\">No questions found for {} - {}.</p>\n",
            escape_text(&subject_name),
            escape_text(&key.year)
        ));
    } else {
        content.push_str("    <div class=\"questions\">\n");
        for question in questions {
            let card = QuestionCard::new(question, key).with_state(ctx.initial_state);
            content.push_str(&card.render_html());
            content.push('\n');
        }
        content.push_str("    </div>\n");
    }

    ctx.wrap(&format!("{} {}", subject_name, key.year), &content)
}

/// `/{subject}/{year}/formulas`: `None` means the sheet could not be loaded,
/// which makes the page not exist.
pub fn render_formulas(
    ctx: &PageContext,
    key: &ContentKey,
    formulas: Option<&[Formula]>,
) -> PageOutcome {
    let Some(formulas) = formulas else {
        return PageOutcome::NotFound;
    };

    let mut content = format!(
        "    <h1>{}</h1>\n    <h2>{} \u{2014} Formula Sheet</h2>\n    <div class=\"formula-grid\">\n",
        escape_text(&shout_subject(&key.subject)),
        escape_text(&shout_year(&key.year))
    );

    for formula in formulas {
        content.push_str(&render_formula_card(formula));
        content.push('\n');
    }

    content.push_str(&format!(
        "    </div>\n    <p class=\"bottom-link\">{}</p>\n",
        link(
            &Route::Questions(key.clone()).href(),
            "\u{2190} Back to Questions",
            None
        )
    ));

    let title = format!(
        "{} {} - Formulas",
        shout_subject(&key.subject),
        shout_year(&key.year)
    );
    PageOutcome::Rendered(ctx.wrap(&title, &content))
}

fn render_formula_card(formula: &Formula) -> String {
    let mut html = format!(
        "      <div class=\"formula-card\" id=\"{}\">\n        <h3>{}</h3>\n        <div class=\"latex\">{}</div>\n",
        escape_attr(&formula.id),
        escape_text(&formula.name),
        escape_text(&formula.latex)
    );
    if let Some(used_in) = formula.used_in_text() {
        html.push_str(&format!(
            "        <p class=\"used-in\">{}</p>\n",
            escape_text(&used_in)
        ));
    }
    html.push_str("      </div>");
    html
}
