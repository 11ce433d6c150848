//! In-memory building-code database backed by a static JSON corpus.

use std::collections::BTreeMap;
use std::path::Path;

use diy_store::models::{CodeSection, Scored};
use diy_store::schema::{CATEGORY_SAMPLE_LIMIT, DEFAULT_JURISDICTION, FALLBACK_CATEGORY};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::LoadError;
use crate::search::{self, RecordFilter, attr_matches};

pub const DEFAULT_CODE_LIMIT: usize = 3;

/// Query against the code corpus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeQuery {
    pub query: String,
    pub jurisdiction: String,
    pub code_type: Option<String>,
    pub limit: usize,
}

impl CodeQuery {
    #[must_use]
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            jurisdiction: DEFAULT_JURISDICTION.to_string(),
            code_type: None,
            limit: DEFAULT_CODE_LIMIT,
        }
    }

    #[must_use]
    pub fn with_jurisdiction(mut self, jurisdiction: impl Into<String>) -> Self {
        self.jurisdiction = jurisdiction.into();
        self
    }

    #[must_use]
    pub fn with_code_type(mut self, code_type: Option<String>) -> Self {
        self.code_type = code_type;
        self
    }

    #[must_use]
    pub const fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }
}

impl RecordFilter<CodeSection> for CodeQuery {
    fn matches(&self, record: &CodeSection) -> bool {
        if !attr_matches(record.jurisdiction.as_deref(), &self.jurisdiction) {
            return false;
        }
        match self.code_type.as_deref() {
            Some(code_type) => attr_matches(record.category.as_deref(), code_type),
            None => true,
        }
    }
}

struct JurisdictionFilter<'a>(&'a str);

impl RecordFilter<CodeSection> for JurisdictionFilter<'_> {
    fn matches(&self, record: &CodeSection) -> bool {
        attr_matches(record.jurisdiction.as_deref(), self.0)
    }
}

/// Membership summary for one code category.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategorySummary {
    pub count: usize,
    pub sample_questions: Vec<String>,
}

/// Read-only code corpus. Built once at start-up and shared.
#[derive(Debug, Clone, Default)]
pub struct CodeDatabase {
    sections: Vec<CodeSection>,
}

impl CodeDatabase {
    #[must_use]
    pub const fn from_sections(sections: Vec<CodeSection>) -> Self {
        Self { sections }
    }

    /// Loads the corpus from a JSON array file.
    ///
    /// A missing file yields an empty database so the server can still start.
    ///
    /// # Errors
    /// Returns `LoadError` when the file exists but cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        if !path.exists() {
            warn!(
                path = %path.display(),
                "code database not found; starting with an empty database"
            );
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path).map_err(|err| LoadError::Io {
            path: path.display().to_string(),
            source: err,
        })?;
        let database = Self::from_json(&raw).map_err(|err| match err {
            LoadError::Parse { source, .. } => LoadError::Parse {
                path: path.display().to_string(),
                source,
            },
            other => other,
        })?;
        info!(
            path = %path.display(),
            sections = database.len(),
            "loaded code database"
        );
        Ok(database)
    }

    /// Parses the corpus from JSON text.
    ///
    /// # Errors
    /// Returns `LoadError::Parse` when the text is not an array of code sections.
    pub fn from_json(raw: &str) -> Result<Self, LoadError> {
        let sections: Vec<CodeSection> =
            serde_json::from_str(raw).map_err(|err| LoadError::Parse {
                path: "<inline>".to_string(),
                source: err,
            })?;
        Ok(Self::from_sections(sections))
    }

    #[must_use]
    pub fn sections(&self) -> &[CodeSection] {
        &self.sections
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Ranks code sections in the query's jurisdiction (and code type, when set).
    #[must_use]
    pub fn search(&self, query: &CodeQuery) -> Vec<Scored<CodeSection>> {
        let results = search::search(&self.sections, query, &query.query, query.limit);
        debug!(
            query = %query.query,
            jurisdiction = %query.jurisdiction,
            code_type = ?query.code_type,
            hits = results.len(),
            "code search"
        );
        results
    }

    /// Fetches a section by its exact reference in a jurisdiction.
    #[must_use]
    pub fn get_section(&self, code_ref: &str, jurisdiction: &str) -> Option<&CodeSection> {
        search::find_exact(&self.sections, &JurisdictionFilter(jurisdiction), code_ref)
    }

    /// Groups sections by category with counts and up to three sample questions.
    #[must_use]
    pub fn categories(&self) -> BTreeMap<String, CategorySummary> {
        let mut categories: BTreeMap<String, CategorySummary> = BTreeMap::new();

        for section in &self.sections {
            let category = section
                .category
                .clone()
                .unwrap_or_else(|| FALLBACK_CATEGORY.to_string());
            let summary = categories.entry(category).or_default();
            summary.count += 1;

            for question in &section.common_questions {
                if summary.sample_questions.len() >= CATEGORY_SAMPLE_LIMIT {
                    break;
                }
                if !summary.sample_questions.contains(question) {
                    summary.sample_questions.push(question.clone());
                }
            }
        }

        categories
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(
        code_ref: &str,
        title: &str,
        category: Option<&str>,
        jurisdiction: &str,
        questions: &[&str],
    ) -> CodeSection {
        CodeSection {
            code_ref: code_ref.to_string(),
            title: title.to_string(),
            category: category.map(str::to_string),
            jurisdiction: Some(jurisdiction.to_string()),
            summary: String::new(),
            full_text: None,
            common_questions: questions.iter().map(|q| (*q).to_string()).collect(),
            related_codes: Vec::new(),
            source: None,
            notes: None,
        }
    }

    fn database() -> CodeDatabase {
        CodeDatabase::from_sections(vec![
            section(
                "NEC 210.52(A)(1)",
                "Outlet spacing in living areas",
                Some("electrical"),
                "National",
                &["How far apart should outlets be?", "Outlet spacing rule?"],
            ),
            section(
                "NEC 210.52(C)(1)",
                "Kitchen countertop outlet spacing",
                Some("electrical"),
                "National",
                &["How many outlets on a kitchen counter?", "Outlet spacing rule?"],
            ),
            section(
                "CEC 210.52(C)(1)",
                "Kitchen countertop outlet spacing",
                Some("electrical"),
                "California",
                &[],
            ),
            section(
                "IPC 1002.1",
                "Kitchen sink trap",
                Some("plumbing"),
                "National",
                &["Does a kitchen sink need a trap?"],
            ),
            section("IRC R101", "Scope of code", None, "National", &["What does the code cover?"]),
        ])
    }

    #[test]
    fn search_applies_jurisdiction_by_default() {
        let results = database().search(&CodeQuery::new("kitchen outlet"));
        let refs: Vec<_> = results.iter().map(|r| r.record.code_ref.as_str()).collect();

        assert_eq!(refs, vec!["NEC 210.52(C)(1)", "NEC 210.52(A)(1)", "IPC 1002.1"]);
    }

    #[test]
    fn search_filters_by_code_type() {
        let query = CodeQuery::new("kitchen").with_code_type(Some("plumbing".to_string()));
        let results = database().search(&query);

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].record.code_ref, "IPC 1002.1");
    }

    #[test]
    fn code_type_filter_excludes_uncategorised_sections() {
        let query = CodeQuery::new("scope").with_code_type(Some("general".to_string()));
        assert!(database().search(&query).is_empty());
    }

    #[test]
    fn search_other_jurisdiction() {
        let query = CodeQuery::new("kitchen").with_jurisdiction("California");
        let results = database().search(&query);

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].record.code_ref, "CEC 210.52(C)(1)");
    }

    #[test]
    fn get_section_requires_matching_jurisdiction() {
        let db = database();

        assert!(db.get_section("NEC 210.52(C)(1)", "National").is_some());
        assert!(db.get_section("NEC 210.52(C)(1)", "California").is_none());
        assert!(db.get_section("nec 210.52(c)(1)", "National").is_none());
    }

    #[test]
    fn categories_count_and_sample_distinct_questions() {
        let categories = database().categories();

        let electrical = &categories["electrical"];
        assert_eq!(electrical.count, 3);
        assert_eq!(
            electrical.sample_questions,
            vec![
                "How far apart should outlets be?".to_string(),
                "Outlet spacing rule?".to_string(),
                "How many outlets on a kitchen counter?".to_string(),
            ]
        );
        assert_eq!(categories["plumbing"].count, 1);
        assert_eq!(categories["general"].count, 1);
    }

    #[test]
    fn missing_file_yields_empty_database() {
        let db = CodeDatabase::load("/nonexistent/diy/codes.json").expect("missing file is not an error");
        assert!(db.is_empty());
        assert!(db.search(&CodeQuery::new("outlet")).is_empty());
    }

    #[test]
    fn malformed_json_is_a_typed_error() {
        let err = CodeDatabase::from_json("{\"not\": \"an array\"}").expect_err("should fail");
        assert!(matches!(err, LoadError::Parse { .. }));
    }
}
