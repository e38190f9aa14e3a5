use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Identifies one question document and at most one formula sheet.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ContentKey {
    pub subject: String,
    pub year: String,
}

impl ContentKey {
    pub fn new(subject: impl Into<String>, year: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            year: year.into(),
        }
    }
}

impl fmt::Display for ContentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.subject, self.year)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum QuestionType {
    #[serde(rename = "mcq")]
    MultipleChoice,
    #[serde(rename = "short")]
    ShortAnswer,
    #[serde(rename = "long")]
    LongAnswer,
    /// Any other tag. Rendering never depends on the type.
    #[serde(other)]
    Unknown,
}

/// An answer is either an index into `options` or free text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum Answer {
    Index(usize),
    Text(String),
}

/// What the expanded card shows as the answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedAnswer<'a> {
    /// The selected option of a multiple-choice question.
    Choice(&'a str),
    /// Free text, displayed preformatted.
    Text(String),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RepeatRef {
    #[serde(default, deserialize_with = "lenient_string")]
    pub year: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub qno: String,
}

/// One question as it appears in a document.
///
/// Fields are read leniently: an odd value in one question must not cost the
/// rest of the paper its page. Ids may be numbers, `type` may be missing or
/// unknown, and a missing answer simply shows no answer line.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub text: String,
    #[serde(
        rename = "type",
        default,
        deserialize_with = "lenient_type",
        skip_serializing_if = "Option::is_none"
    )]
    pub question_type: Option<QuestionType>,
    #[serde(default, deserialize_with = "lenient_options", skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient_answer", skip_serializing_if = "Option::is_none")]
    pub answer: Option<Answer>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub chapter: String,
    #[serde(default, deserialize_with = "lenient_marks")]
    pub marks: u32,
    #[serde(default, deserialize_with = "lenient_flag", skip_serializing_if = "Option::is_none")]
    pub diagram: Option<bool>,
    #[serde(default, deserialize_with = "lenient_opt_string", skip_serializing_if = "Option::is_none")]
    pub formula: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string", skip_serializing_if = "Option::is_none")]
    pub formula_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_repeats", skip_serializing_if = "Vec::is_empty")]
    pub repeated_in: Vec<RepeatRef>,
}

impl Question {
    /// Resolve the answer for display.
    ///
    /// When `options` is present the answer selects one of them; an index out
    /// of range resolves to nothing. Without options the answer is shown as
    /// text, and an empty text answer resolves to nothing.
    pub fn resolved_answer(&self) -> Option<ResolvedAnswer<'_>> {
        let answer = self.answer.as_ref()?;
        match (&self.options, answer) {
            (Some(options), Answer::Index(i)) => {
                options.get(*i).map(|o| ResolvedAnswer::Choice(o.as_str()))
            }
            (Some(options), Answer::Text(t)) => match t.trim().parse::<usize>() {
                Ok(i) => options.get(i).map(|o| ResolvedAnswer::Choice(o.as_str())),
                Err(_) if t.is_empty() => None,
                Err(_) => Some(ResolvedAnswer::Text(t.clone())),
            },
            (None, Answer::Index(i)) => Some(ResolvedAnswer::Text(i.to_string())),
            (None, Answer::Text(t)) if t.is_empty() => None,
            (None, Answer::Text(t)) => Some(ResolvedAnswer::Text(t.clone())),
        }
    }

    pub fn needs_diagram(&self) -> bool {
        self.diagram.unwrap_or(false)
    }

    /// Render `repeatedIn` as `2023 (5), 2022 (3)`; `None` when empty.
    pub fn repeated_in_text(&self) -> Option<String> {
        if self.repeated_in.is_empty() {
            return None;
        }
        Some(
            self.repeated_in
                .iter()
                .map(|r| format!("{} ({})", r.year, r.qno))
                .collect::<Vec<_>>()
                .join(", "),
        )
    }
}

fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

/// Strings and numbers both read as text; `null` reads as empty.
fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(scalar_text(Value::deserialize(deserializer)?).unwrap_or_default())
}

fn lenient_opt_string<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Ok(scalar_text(Value::deserialize(deserializer)?))
}

fn lenient_type<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<QuestionType>, D::Error> {
    Ok(serde_json::from_value(Value::deserialize(deserializer)?).ok())
}

fn lenient_options<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Vec<String>>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => Some(items.into_iter().filter_map(scalar_text).collect()),
        _ => None,
    })
}

fn lenient_flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<bool>, D::Error> {
    Ok(Value::deserialize(deserializer)?.as_bool())
}

/// Entries that are not `{year, qno}` objects are dropped.
fn lenient_repeats<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<RepeatRef>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}

/// Non-negative integers are option indices; anything else is text.
fn lenient_answer<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Answer>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    if let Some(index) = value.as_u64().and_then(|i| usize::try_from(i).ok()) {
        return Ok(Some(Answer::Index(index)));
    }
    Ok(scalar_text(value).map(Answer::Text))
}

/// Marks that are not a usable number read as 0, which hides them.
fn lenient_marks<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let marks = match Value::deserialize(deserializer)? {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64)),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    };
    Ok(marks.and_then(|m| u32::try_from(m).ok()).unwrap_or(0))
}

/// Top-level shape of a question document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionDocument {
    pub questions: Vec<Question>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Formula {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub latex: String,
    #[serde(default, deserialize_with = "lenient_string_list")]
    pub used_in: Vec<String>,
}

fn lenient_string_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items.into_iter().filter_map(scalar_text).collect(),
        _ => Vec::new(),
    })
}

impl Formula {
    /// Render `usedIn` as `Used in: Q3, Q7`; `None` when empty.
    pub fn used_in_text(&self) -> Option<String> {
        if self.used_in.is_empty() {
            return None;
        }
        Some(format!("Used in: Q{}", self.used_in.join(", Q")))
    }
}
