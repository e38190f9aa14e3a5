//! Expandable question card.
//!
//! A card is either collapsed (id, shortened prompt, marks) or expanded (the
//! summary plus answer, chapter, formula link, diagram notice and repeats).
//! In the generated HTML the card is a `<details>` element, so the reader's
//! browser owns the toggle; [`DisclosureState`] decides the initial state and
//! [`QuestionCard::visible`] describes what each state shows.

use crate::content::{ContentKey, Question, ResolvedAnswer};

use super::html::{escape_attr, escape_text, link, truncate_chars};
use super::routes::formula_anchor_href;

/// Longest prompt shown in a card summary.
pub const SUMMARY_PROMPT_CHARS: usize = 200;

pub const DIAGRAM_NOTICE: &str = "Diagram required in exam";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisclosureState {
    #[default]
    Collapsed,
    Expanded,
}

impl DisclosureState {
    pub fn toggle(self) -> Self {
        match self {
            Self::Collapsed => Self::Expanded,
            Self::Expanded => Self::Collapsed,
        }
    }

    pub fn is_expanded(self) -> bool {
        self == Self::Expanded
    }
}

/// One piece of a card that is visible in a given state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardField<'a> {
    Id(&'a str),
    Prompt(String),
    Marks(u32),
    /// The whole prompt, present only when the summary had to shorten it.
    FullPrompt(&'a str),
    Answer(ResolvedAnswer<'a>),
    Chapter(&'a str),
    FormulaLink { label: &'a str, href: String },
    FormulaName(&'a str),
    DiagramNotice,
    RepeatedIn(String),
}

#[derive(Debug, Clone)]
pub struct QuestionCard<'a> {
    question: &'a Question,
    key: &'a ContentKey,
    state: DisclosureState,
}

impl<'a> QuestionCard<'a> {
    pub fn new(question: &'a Question, key: &'a ContentKey) -> Self {
        Self {
            question,
            key,
            state: DisclosureState::default(),
        }
    }

    pub fn with_state(mut self, state: DisclosureState) -> Self {
        self.state = state;
        self
    }

    pub fn state(&self) -> DisclosureState {
        self.state
    }

    pub fn toggled(self) -> Self {
        let state = self.state.toggle();
        self.with_state(state)
    }

    /// Fields shown in the current state, in display order.
    pub fn visible(&self) -> Vec<CardField<'a>> {
        let mut fields = self.summary_fields();
        if self.state.is_expanded() {
            fields.extend(self.detail_fields());
        }
        fields
    }

    fn summary_fields(&self) -> Vec<CardField<'a>> {
        let q = self.question;
        let (prompt, _) = truncate_chars(&q.text, SUMMARY_PROMPT_CHARS);
        let mut fields = vec![CardField::Id(&q.id), CardField::Prompt(prompt)];
        if q.marks > 0 {
            fields.push(CardField::Marks(q.marks));
        }
        fields
    }

    fn detail_fields(&self) -> Vec<CardField<'a>> {
        let q = self.question;
        let mut fields = Vec::new();

        let (_, truncated) = truncate_chars(&q.text, SUMMARY_PROMPT_CHARS);
        if truncated {
            fields.push(CardField::FullPrompt(&q.text));
        }
        if let Some(answer) = q.resolved_answer() {
            fields.push(CardField::Answer(answer));
        }
        fields.push(CardField::Chapter(&q.chapter));

        match (&q.formula_id, &q.formula) {
            (Some(id), name) => fields.push(CardField::FormulaLink {
                label: name.as_deref().unwrap_or("View"),
                href: formula_anchor_href(self.key, id),
            }),
            (None, Some(name)) => fields.push(CardField::FormulaName(name)),
            (None, None) => {}
        }

        if q.needs_diagram() {
            fields.push(CardField::DiagramNotice);
        }
        if let Some(repeats) = q.repeated_in_text() {
            fields.push(CardField::RepeatedIn(repeats));
        }
        fields
    }

    /// Render as a `<details>` element. The detail body is always emitted;
    /// the state only controls the `open` attribute.
    pub fn render_html(&self) -> String {
        let q = self.question;
        let open = if self.state.is_expanded() { " open" } else { "" };
        let mut html = format!(
            "<details class=\"question\" id=\"q-{}\"{}>\n  <summary>",
            escape_attr(&q.id),
            open
        );

        for field in self.summary_fields() {
            match field {
                CardField::Id(id) => html.push_str(&format!(
                    "<span class=\"qid\">Q{}:</span> ",
                    escape_text(id)
                )),
                CardField::Prompt(p) => {
                    html.push_str(&format!("<span class=\"prompt\">{}</span>", escape_text(&p)))
                }
                CardField::Marks(m) => html.push_str(&format!(
                    " <span class=\"marks\">({} marks)</span>",
                    m
                )),
                _ => {}
            }
        }
        html.push_str("</summary>\n  <div class=\"question-body\">\n");

        for field in self.detail_fields() {
            html.push_str("    ");
            html.push_str(&render_detail(&field));
            html.push('\n');
        }

        html.push_str("  </div>\n</details>");
        html
    }

    /// Plain-text lines for terminal output.
    pub fn render_text(&self) -> Vec<String> {
        let mut summary = String::new();
        let mut lines = Vec::new();
        for field in self.visible() {
            match field {
                CardField::Id(id) => summary.push_str(&format!("Q{}: ", id)),
                CardField::Prompt(p) => summary.push_str(&p),
                CardField::Marks(m) => summary.push_str(&format!(" ({} marks)", m)),
                CardField::FullPrompt(p) => lines.push(p.to_string()),
                CardField::Answer(ResolvedAnswer::Choice(c)) => {
                    lines.push(format!("Answer: {}", c))
                }
                CardField::Answer(ResolvedAnswer::Text(t)) => {
                    lines.push("Answer:".to_string());
                    lines.extend(t.lines().map(|l| format!("  {}", l)));
                }
                CardField::Chapter(c) => lines.push(format!("Chapter: {}", c)),
                CardField::FormulaLink { label, href } => {
                    lines.push(format!("Formula: {} ({})", label, href))
                }
                CardField::FormulaName(name) => lines.push(format!("Formula: {}", name)),
                CardField::DiagramNotice => lines.push(DIAGRAM_NOTICE.to_string()),
                CardField::RepeatedIn(r) => lines.push(format!("Repeated in: {}", r)),
            }
        }
        let mut out = vec![summary];
        out.extend(lines.into_iter().map(|l| format!("    {}", l)));
        out
    }
}

fn render_detail(field: &CardField<'_>) -> String {
    match field {
        CardField::FullPrompt(p) => format!("<p class=\"full-prompt\">{}</p>", escape_text(p)),
        CardField::Answer(ResolvedAnswer::Choice(c)) => {
            format!("<p class=\"answer\">Answer: {}</p>", escape_text(c))
        }
        CardField::Answer(ResolvedAnswer::Text(t)) => format!(
            "<div class=\"answer\"><p>Answer:</p><pre class=\"answer-text\">{}</pre></div>",
            escape_text(t)
        ),
        CardField::Chapter(c) => format!(
            "<p class=\"chapter\"><strong>Chapter:</strong> {}</p>",
            escape_text(c)
        ),
        CardField::FormulaLink { label, href } => format!(
            "<p class=\"formula\"><strong>Formula:</strong> {}</p>",
            link(href, label, None)
        ),
        CardField::FormulaName(name) => format!(
            "<p class=\"formula\"><strong>Formula:</strong> {}</p>",
            escape_text(name)
        ),
        CardField::DiagramNotice => format!("<p class=\"diagram\">{}</p>", DIAGRAM_NOTICE),
        CardField::RepeatedIn(r) => format!(
            "<p class=\"repeats\"><strong>Repeated in:</strong> {}</p>",
            escape_text(r)
        ),
        CardField::Id(_) | CardField::Prompt(_) | CardField::Marks(_) => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(json: &str) -> Question {
        serde_json::from_str(json).unwrap()
    }

    fn key() -> ContentKey {
        ContentKey::new("fluid-mechanics", "2023")
    }

    #[test]
    fn test_toggle() {
        assert_eq!(DisclosureState::default(), DisclosureState::Collapsed);
        assert_eq!(DisclosureState::Collapsed.toggle(), DisclosureState::Expanded);
        assert_eq!(
            DisclosureState::Collapsed.toggle().toggle(),
            DisclosureState::Collapsed
        );
    }

    #[test]
    fn test_collapsed_shows_summary_only() {
        let q = question(
            r#"{"id":"1","text":"Pick","type":"mcq","options":["A","B","C"],"answer":1,"chapter":"Basics","marks":2}"#,
        );
        let key = key();
        let card = QuestionCard::new(&q, &key);
        assert_eq!(card.state(), DisclosureState::Collapsed);
        assert_eq!(
            card.visible(),
            vec![
                CardField::Id("1"),
                CardField::Prompt("Pick".to_string()),
                CardField::Marks(2),
            ]
        );
    }

    #[test]
    fn test_expanded_mcq_shows_option() {
        let q = question(
            r#"{"id":"1","text":"Pick","type":"mcq","options":["A","B","C"],"answer":1,"chapter":"Basics","marks":2}"#,
        );
        let key = key();
        let card = QuestionCard::new(&q, &key).toggled();
        let visible = card.visible();
        assert!(visible.contains(&CardField::Answer(ResolvedAnswer::Choice("B"))));
        assert!(visible.contains(&CardField::Chapter("Basics")));
        assert!(card.render_html().contains("Answer: B"));
    }

    #[test]
    fn test_toggle_twice_restores_visible_content() {
        let q = question(
            r#"{"id":"7","text":"Explain","type":"long","answer":"Because.","chapter":"C","marks":5,"diagram":true}"#,
        );
        let key = key();
        let card = QuestionCard::new(&q, &key);
        let before = card.visible();
        let html_before = card.render_html();

        let card = card.toggled();
        assert_ne!(card.visible(), before);

        let card = card.toggled();
        assert_eq!(card.state(), DisclosureState::Collapsed);
        assert_eq!(card.visible(), before);
        assert_eq!(card.render_html(), html_before);
    }

    #[test]
    fn test_long_answer_is_preformatted() {
        let q = question(
            r#"{"id":"3","text":"Derive","type":"long","answer":"Step 1\n  Step 2 <x>","chapter":"C","marks":5}"#,
        );
        let key = key();
        let html = QuestionCard::new(&q, &key).render_html();
        assert!(html.contains("<pre class=\"answer-text\">Step 1\n  Step 2 &lt;x&gt;</pre>"));
        assert!(!html.contains(" open"));
    }

    #[test]
    fn test_formula_diagram_and_repeats() {
        let q = question(
            r#"{"id":"4","text":"Flow","type":"short","answer":"Q = AV","chapter":"Flow","marks":3,
                "diagram":true,"formula":"Continuity","formulaId":"f2",
                "repeatedIn":[{"year":"2023","qno":"5"},{"year":"2022","qno":"3"}]}"#,
        );
        let key = key();
        let card = QuestionCard::new(&q, &key).with_state(DisclosureState::Expanded);
        let visible = card.visible();
        assert!(visible.contains(&CardField::FormulaLink {
            label: "Continuity",
            href: "/fluid-mechanics/2023/formulas#f2".to_string(),
        }));
        assert!(visible.contains(&CardField::DiagramNotice));
        assert!(visible.contains(&CardField::RepeatedIn("2023 (5), 2022 (3)".to_string())));

        let html = card.render_html();
        assert!(html.contains(" open>"));
        assert!(html.contains("href=\"/fluid-mechanics/2023/formulas#f2\""));
        assert!(html.contains("2023 (5), 2022 (3)"));
        assert!(html.contains(DIAGRAM_NOTICE));
    }

    #[test]
    fn test_plain_question_has_no_optional_details() {
        let q = question(
            r#"{"id":"5","text":"Define","type":"short","answer":"A thing.","chapter":"Intro","marks":1}"#,
        );
        let key = key();
        let html = QuestionCard::new(&q, &key).render_html();
        assert!(!html.contains("Formula:"));
        assert!(!html.contains("Repeated in:"));
        assert!(!html.contains(DIAGRAM_NOTICE));
    }

    #[test]
    fn test_long_prompt_is_truncated_in_summary() {
        let text = "x".repeat(SUMMARY_PROMPT_CHARS + 50);
        let q = Question {
            text: text.clone(),
            ..question(r#"{"id":"6","text":"t","type":"short","answer":"a","chapter":"C","marks":1}"#)
        };
        let key = key();
        let card = QuestionCard::new(&q, &key);
        match &card.visible()[1] {
            CardField::Prompt(p) => assert_eq!(p.chars().count(), SUMMARY_PROMPT_CHARS),
            other => panic!("unexpected field {:?}", other),
        }
        assert!(card
            .toggled()
            .visible()
            .contains(&CardField::FullPrompt(&text)));
    }

    #[test]
    fn test_render_text() {
        let q = question(
            r#"{"id":"1","text":"Pick","type":"mcq","options":["A","B","C"],"answer":1,"chapter":"Basics","marks":2}"#,
        );
        let key = key();
        let lines = QuestionCard::new(&q, &key).toggled().render_text();
        assert_eq!(lines[0], "Q1: Pick (2 marks)");
        assert!(lines.contains(&"    Answer: B".to_string()));
        assert!(lines.contains(&"    Chapter: Basics".to_string()));
    }
}
