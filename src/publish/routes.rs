use std::path::PathBuf;

use crate::content::{is_valid_slug, ContentKey};

const FORMULAS_SEGMENT: &str = "formulas";
const INDEX_FILE: &str = "index.html";

/// Logical pages of the site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `/`
    Home,
    /// `/{subject}`
    Subject(String),
    /// `/{subject}/{year}`
    Questions(ContentKey),
    /// `/{subject}/{year}/formulas`
    Formulas(ContentKey),
}

impl Route {
    /// Parse a request path. Trailing slashes and a trailing `index.html` are
    /// ignored. Returns `None` for anything that is not a page route.
    pub fn parse(path: &str) -> Option<Self> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let mut segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        if segments.last() == Some(&INDEX_FILE) {
            segments.pop();
        }
        if !segments.iter().all(|s| is_valid_slug(s)) {
            return None;
        }

        match segments.as_slice() {
            [] => Some(Self::Home),
            [subject] => Some(Self::Subject(subject.to_string())),
            [subject, year] => Some(Self::Questions(ContentKey::new(*subject, *year))),
            [subject, year, FORMULAS_SEGMENT] => {
                Some(Self::Formulas(ContentKey::new(*subject, *year)))
            }
            _ => None,
        }
    }

    pub fn href(&self) -> String {
        match self {
            Self::Home => "/".to_string(),
            Self::Subject(subject) => format!("/{}", subject),
            Self::Questions(key) => format!("/{}/{}", key.subject, key.year),
            Self::Formulas(key) => {
                format!("/{}/{}/{}", key.subject, key.year, FORMULAS_SEGMENT)
            }
        }
    }

    /// Location of this page inside a built site, relative to its root.
    pub fn output_path(&self) -> PathBuf {
        let dir = match self {
            Self::Home => PathBuf::new(),
            Self::Subject(subject) => PathBuf::from(subject),
            Self::Questions(key) => PathBuf::from(&key.subject).join(&key.year),
            Self::Formulas(key) => PathBuf::from(&key.subject)
                .join(&key.year)
                .join(FORMULAS_SEGMENT),
        };
        dir.join(INDEX_FILE)
    }
}

/// Link to one formula card on a formula sheet.
pub fn formula_anchor_href(key: &ContentKey, formula_id: &str) -> String {
    format!("{}#{}", Route::Formulas(key.clone()).href(), formula_id)
}
