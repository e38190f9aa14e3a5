use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::models::{ContentKey, Formula, Question, QuestionDocument};

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Subjects directory not found: {}", .0.display())]
    SubjectsDirNotFound(PathBuf),

    #[error("Document not found: {0}")]
    NotFound(String),
}

pub type Result<T> = std::result::Result<T, ContentError>;

const SUBJECTS_DIR: &str = "subjects";
const FORMULAS_DIR: &str = "formulas";
const DOCUMENT_EXT: &str = "json";

/// Read-only access to the on-disk content tree.
///
/// ```text
/// <root>/subjects/<subject>/<year>.json          { "questions": [...] }
/// <root>/subjects/<subject>/formulas/<year>.json [...]
/// ```
///
/// Nothing is cached: every load reads the document again.
#[derive(Debug, Clone)]
pub struct ContentStore {
    base_path: PathBuf,
}

impl ContentStore {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    pub fn subjects_dir(&self) -> PathBuf {
        self.base_path.join(SUBJECTS_DIR)
    }

    fn subject_dir(&self, subject: &str) -> PathBuf {
        self.subjects_dir().join(subject)
    }

    fn formulas_dir(&self, subject: &str) -> PathBuf {
        self.subject_dir(subject).join(FORMULAS_DIR)
    }

    pub fn question_path(&self, key: &ContentKey) -> PathBuf {
        self.subject_dir(&key.subject)
            .join(format!("{}.{}", key.year, DOCUMENT_EXT))
    }

    pub fn formula_path(&self, key: &ContentKey) -> PathBuf {
        self.formulas_dir(&key.subject)
            .join(format!("{}.{}", key.year, DOCUMENT_EXT))
    }

    // ===== Enumeration =====

    /// Every (subject, year) pair that has a question document.
    ///
    /// Order is whatever the filesystem returns.
    pub fn question_keys(&self) -> Result<Vec<ContentKey>> {
        let mut keys = Vec::new();
        for subject in self.subject_slugs()? {
            let dir = self.subject_dir(&subject);
            for year in document_slugs(&dir)? {
                keys.push(ContentKey::new(subject.clone(), year));
            }
        }
        Ok(keys)
    }

    /// Every (subject, year) pair that has a formula sheet.
    ///
    /// Subjects without a `formulas/` directory contribute nothing, and
    /// neither does a `formulas` entry that is not a directory.
    pub fn formula_keys(&self) -> Result<Vec<ContentKey>> {
        let mut keys = Vec::new();
        for subject in self.subject_slugs()? {
            let dir = self.formulas_dir(&subject);
            if !dir.is_dir() {
                log::debug!("No formula sheets for subject {}", subject);
                continue;
            }
            for year in document_slugs(&dir)? {
                keys.push(ContentKey::new(subject.clone(), year));
            }
        }
        Ok(keys)
    }

    fn subject_slugs(&self) -> Result<Vec<String>> {
        let root = self.subjects_dir();
        if !root.is_dir() {
            return Err(ContentError::SubjectsDirNotFound(root));
        }

        let mut subjects = Vec::new();
        for entry in fs::read_dir(&root)? {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().to_string();
            if name.starts_with('.') {
                continue;
            }
            if !is_valid_slug(&name) {
                log::warn!("Skipping subject directory {:?}: not a usable slug", name);
                continue;
            }
            subjects.push(name);
        }
        Ok(subjects)
    }

    // ===== Resolution =====

    /// Load the questions for a key, degrading to an empty list.
    ///
    /// Missing and malformed documents are logged and indistinguishable from
    /// an empty document to the caller.
    pub fn load_questions(&self, key: &ContentKey) -> Vec<Question> {
        match self.read_questions(key) {
            Ok(questions) => questions,
            Err(e) => {
                log::warn!("Could not load questions for {}: {}", key, e);
                Vec::new()
            }
        }
    }

    /// Strict variant of [`load_questions`](Self::load_questions).
    pub fn read_questions(&self, key: &ContentKey) -> Result<Vec<Question>> {
        let path = self.document_path(key, Self::question_path)?;
        let doc: QuestionDocument = read_json(&path, key)?;
        Ok(doc.questions)
    }

    /// Load the formula sheet for a key.
    ///
    /// Any failure here means the sheet does not exist as far as pages are
    /// concerned.
    pub fn load_formulas(&self, key: &ContentKey) -> Result<Vec<Formula>> {
        let path = self.document_path(key, Self::formula_path)?;
        read_json(&path, key)
    }

    fn document_path(
        &self,
        key: &ContentKey,
        path_fn: fn(&Self, &ContentKey) -> PathBuf,
    ) -> Result<PathBuf> {
        if !is_valid_slug(&key.subject) || !is_valid_slug(&key.year) {
            return Err(ContentError::NotFound(key.to_string()));
        }
        Ok(path_fn(self, key))
    }
}

/// A slug is a single non-hidden path segment made of URL-safe characters
/// (ASCII letters, digits, `-`, `_` and `.`), so it needs no encoding in an
/// href and reads back unchanged from a request path.
pub fn is_valid_slug(s: &str) -> bool {
    !s.is_empty()
        && !s.starts_with('.')
        && s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

/// File stems of the `*.json` files directly inside `dir`.
fn document_slugs(dir: &Path) -> Result<Vec<String>> {
    let mut slugs = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let is_document = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext == DOCUMENT_EXT)
            .unwrap_or(false);
        if !is_document {
            continue;
        }
        match path.file_stem().and_then(|s| s.to_str()) {
            Some(stem) if is_valid_slug(stem) => slugs.push(stem.to_string()),
            _ => log::warn!("Skipping document {}: not a usable slug", path.display()),
        }
    }
    Ok(slugs)
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path, key: &ContentKey) -> Result<T> {
    let data = match fs::read_to_string(path) {
        Ok(data) => data,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(ContentError::NotFound(key.to_string()))
        }
        Err(e) => return Err(e.into()),
    };
    Ok(serde_json::from_str(&data)?)
}
