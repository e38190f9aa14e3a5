use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use super::models::ContentKey;
use super::store::{ContentStore, Result};

/// Subject and year index derived from the content tree.
///
/// Both index pages and the static build read from here, so a document that
/// exists on disk is always reachable from `/`.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    pub subjects: Vec<SubjectEntry>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectEntry {
    pub slug: String,
    pub name: String,
    pub years: Vec<YearEntry>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearEntry {
    pub slug: String,
    pub has_questions: bool,
    pub has_formulas: bool,
}

impl Catalog {
    /// Enumerate the store. Fails only when enumeration itself fails.
    pub fn load(store: &ContentStore, names: &HashMap<String, String>) -> Result<Self> {
        let question_keys = store.question_keys()?;
        let formula_keys = store.formula_keys()?;
        Ok(Self::from_keys(&question_keys, &formula_keys, names))
    }

    /// Subjects sort by slug. Years sort newest first by calendar year and
    /// then month suffix (`2024-dec` before `2024-jan`); slugs that do not
    /// start with a year come last.
    pub fn from_keys(
        question_keys: &[ContentKey],
        formula_keys: &[ContentKey],
        names: &HashMap<String, String>,
    ) -> Self {
        let mut grouped: BTreeMap<&str, BTreeMap<&str, (bool, bool)>> = BTreeMap::new();
        for key in question_keys {
            grouped
                .entry(&key.subject)
                .or_default()
                .entry(&key.year)
                .or_default()
                .0 = true;
        }
        for key in formula_keys {
            grouped
                .entry(&key.subject)
                .or_default()
                .entry(&key.year)
                .or_default()
                .1 = true;
        }

        let subjects = grouped
            .into_iter()
            .map(|(slug, years)| SubjectEntry {
                slug: slug.to_string(),
                name: names
                    .get(slug)
                    .cloned()
                    .unwrap_or_else(|| humanize_slug(slug)),
                years: sorted_years(years),
            })
            .collect();

        Self { subjects }
    }

    pub fn subject(&self, slug: &str) -> Option<&SubjectEntry> {
        self.subjects.iter().find(|s| s.slug == slug)
    }

    /// Display name for a subject, falling back to the humanized slug for
    /// subjects the catalog does not know.
    pub fn subject_name(&self, slug: &str) -> String {
        self.subject(slug)
            .map(|s| s.name.clone())
            .unwrap_or_else(|| humanize_slug(slug))
    }

    pub fn question_keys(&self) -> impl Iterator<Item = ContentKey> + '_ {
        self.keys_where(|y| y.has_questions)
    }

    pub fn formula_keys(&self) -> impl Iterator<Item = ContentKey> + '_ {
        self.keys_where(|y| y.has_formulas)
    }

    fn keys_where<'a>(
        &'a self,
        pred: impl Fn(&YearEntry) -> bool + 'a,
    ) -> impl Iterator<Item = ContentKey> + 'a {
        self.subjects.iter().flat_map(move |s| {
            s.years
                .iter()
                .filter(|y| pred(y))
                .map(move |y| ContentKey::new(s.slug.clone(), y.slug.clone()))
                .collect::<Vec<_>>()
        })
    }
}

const MONTHS: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

fn sorted_years(years: BTreeMap<&str, (bool, bool)>) -> Vec<YearEntry> {
    let mut entries: Vec<YearEntry> = years
        .into_iter()
        .map(|(year, (has_questions, has_formulas))| YearEntry {
            slug: year.to_string(),
            has_questions,
            has_formulas,
        })
        .collect();
    entries.sort_by(|a, b| {
        year_rank(&b.slug)
            .cmp(&year_rank(&a.slug))
            .then_with(|| b.slug.cmp(&a.slug))
    });
    entries
}

/// `(year, month)` for slugs like `2023` or `2024-dec`. A bare year has
/// month 0.
fn year_rank(slug: &str) -> Option<(u32, u32)> {
    let (year, rest) = slug.split_once('-').unwrap_or((slug, ""));
    let year = year.parse::<u32>().ok()?;
    let month = rest
        .get(..3)
        .and_then(|m| MONTHS.iter().position(|name| name.eq_ignore_ascii_case(m)))
        .map(|i| i as u32 + 1)
        .unwrap_or(0);
    Some((year, month))
}

/// `fluid-mechanics` -> `Fluid Mechanics`.
pub fn humanize_slug(slug: &str) -> String {
    if slug.is_empty() {
        return "Subject".to_string();
    }
    slug.split('-')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(pairs: &[(&str, &str)]) -> Vec<ContentKey> {
        pairs.iter().map(|(s, y)| ContentKey::new(*s, *y)).collect()
    }

    #[test]
    fn test_humanize_slug() {
        assert_eq!(humanize_slug("fluid-mechanics"), "Fluid Mechanics");
        assert_eq!(humanize_slug("power"), "Power");
        assert_eq!(humanize_slug(""), "Subject");
    }

    #[test]
    fn test_from_keys_groups_and_sorts() {
        let questions = keys(&[
            ("power-engineering", "2022"),
            ("fluid-mechanics", "2023"),
            ("fluid-mechanics", "2024-dec"),
            ("fluid-mechanics", "2022"),
        ]);
        let formulas = keys(&[("fluid-mechanics", "2023"), ("fluid-mechanics", "2019")]);
        let catalog = Catalog::from_keys(&questions, &formulas, &HashMap::new());

        let slugs: Vec<&str> = catalog.subjects.iter().map(|s| s.slug.as_str()).collect();
        assert_eq!(slugs, vec!["fluid-mechanics", "power-engineering"]);

        let fluid = catalog.subject("fluid-mechanics").unwrap();
        assert_eq!(fluid.name, "Fluid Mechanics");
        let years: Vec<&str> = fluid.years.iter().map(|y| y.slug.as_str()).collect();
        assert_eq!(years, vec!["2024-dec", "2023", "2022", "2019"]);

        let y2019 = &fluid.years[3];
        assert!(!y2019.has_questions);
        assert!(y2019.has_formulas);
    }

    #[test]
    fn test_month_suffixes_sort_by_calendar() {
        let questions = keys(&[
            ("a", "2022"),
            ("a", "2024-jan"),
            ("a", "2023"),
            ("a", "2024-dec"),
            ("a", "2023-june"),
            ("a", "sample"),
        ]);
        let catalog = Catalog::from_keys(&questions, &[], &HashMap::new());
        let years: Vec<&str> = catalog.subjects[0]
            .years
            .iter()
            .map(|y| y.slug.as_str())
            .collect();
        assert_eq!(
            years,
            vec!["2024-dec", "2024-jan", "2023-june", "2023", "2022", "sample"]
        );
    }

    #[test]
    fn test_name_overrides() {
        let mut names = HashMap::new();
        names.insert("power-engineering".to_string(), "Power Engg.".to_string());
        let catalog =
            Catalog::from_keys(&keys(&[("power-engineering", "2022")]), &[], &names);
        assert_eq!(catalog.subject_name("power-engineering"), "Power Engg.");
        assert_eq!(catalog.subject_name("material-handling"), "Material Handling");
    }

    #[test]
    fn test_key_iterators() {
        let questions = keys(&[("a", "2022"), ("a", "2023")]);
        let formulas = keys(&[("a", "2023")]);
        let catalog = Catalog::from_keys(&questions, &formulas, &HashMap::new());
        assert_eq!(catalog.question_keys().count(), 2);
        assert_eq!(
            catalog.formula_keys().collect::<Vec<_>>(),
            vec![ContentKey::new("a", "2023")]
        );
    }
}
