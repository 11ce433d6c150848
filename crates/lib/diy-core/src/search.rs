//! Keyword relevance search shared by the code corpus and product sources.
//!
//! A record's score is the number of query tokens that occur as substrings of
//! its lowercased searchable text. Repeated query tokens count once per
//! occurrence and matching is substring containment, so `cat` matches
//! `category`. Results are stably sorted by score, highest first.

use diy_store::models::{CodeSection, Product, Scored};

/// A record that exposes free text for keyword scoring.
pub trait Searchable {
    /// Text fields contributing to relevance, in concatenation order.
    fn search_fields(&self) -> Vec<&str>;

    /// Lowercased concatenation of the searchable fields.
    fn search_text(&self) -> String {
        self.search_fields().join(" ").to_lowercase()
    }
}

/// A record addressable by a unique reference within its collection.
pub trait Identified {
    fn identifier(&self) -> &str;
}

/// Hard filter applied before scoring. Every condition must hold.
pub trait RecordFilter<T> {
    fn matches(&self, record: &T) -> bool;
}

/// Filter that accepts every record.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFilter;

impl<T> RecordFilter<T> for NoFilter {
    fn matches(&self, _record: &T) -> bool {
        true
    }
}

impl Searchable for CodeSection {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = Vec::with_capacity(2 + self.common_questions.len());
        fields.push(self.title.as_str());
        fields.push(self.summary.as_str());
        fields.extend(self.common_questions.iter().map(String::as_str));
        fields
    }
}

impl Identified for CodeSection {
    fn identifier(&self) -> &str {
        &self.code_ref
    }
}

impl Searchable for Product {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.name.as_str(),
            self.category.as_str(),
            self.subcategory.as_str(),
        ]
    }
}

impl Identified for Product {
    fn identifier(&self) -> &str {
        &self.id
    }
}

/// Splits a query into lowercase whitespace-separated tokens, keeping duplicates.
#[must_use]
pub fn tokenize(query: &str) -> Vec<String> {
    query
        .to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Counts the tokens that occur anywhere in `text`.
#[must_use]
pub fn relevance_score(tokens: &[String], text: &str) -> u32 {
    let hits = tokens
        .iter()
        .filter(|token| text.contains(token.as_str()))
        .count();
    u32::try_from(hits).unwrap_or(u32::MAX)
}

/// Filters, scores, and ranks `records` against `query`, returning at most `limit` results.
///
/// An empty query yields no results regardless of the filter.
#[must_use]
pub fn search<T, F>(records: &[T], filter: &F, query: &str, limit: usize) -> Vec<Scored<T>>
where
    T: Searchable + Clone,
    F: RecordFilter<T> + ?Sized,
{
    let tokens = tokenize(query);
    if tokens.is_empty() {
        return Vec::new();
    }

    let mut results: Vec<Scored<T>> = records
        .iter()
        .filter(|record| filter.matches(record))
        .filter_map(|record| {
            let score = relevance_score(&tokens, &record.search_text());
            (score > 0).then(|| Scored::new(record.clone(), score))
        })
        .collect();

    // `sort_by` is stable: equal scores keep collection order.
    results.sort_by(|left, right| right.relevance_score.cmp(&left.relevance_score));
    results.truncate(limit);
    results
}

/// Returns the first record whose identifier equals `reference` exactly and
/// which passes `filter`.
#[must_use]
pub fn find_exact<'a, T, F>(records: &'a [T], filter: &F, reference: &str) -> Option<&'a T>
where
    T: Identified,
    F: RecordFilter<T> + ?Sized,
{
    records
        .iter()
        .find(|record| record.identifier() == reference && filter.matches(record))
}

/// Exact-match test for an optional attribute. An absent attribute never matches.
#[must_use]
pub fn attr_matches(attr: Option<&str>, wanted: &str) -> bool {
    attr == Some(wanted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Doc {
        id: &'static str,
        text: &'static str,
        kind: Option<&'static str>,
    }

    impl Searchable for Doc {
        fn search_fields(&self) -> Vec<&str> {
            vec![self.text]
        }
    }

    impl Identified for Doc {
        fn identifier(&self) -> &str {
            self.id
        }
    }

    struct KindFilter(&'static str);

    impl RecordFilter<Doc> for KindFilter {
        fn matches(&self, record: &Doc) -> bool {
            attr_matches(record.kind, self.0)
        }
    }

    fn docs() -> Vec<Doc> {
        vec![
            Doc { id: "a", text: "Kitchen outlet spacing", kind: Some("electrical") },
            Doc { id: "b", text: "Bathroom GFCI outlet", kind: Some("electrical") },
            Doc { id: "c", text: "Kitchen sink drain", kind: Some("plumbing") },
            Doc { id: "d", text: "Outlet category overview", kind: None },
        ]
    }

    fn ids(results: &[Scored<Doc>]) -> Vec<&'static str> {
        results.iter().map(|result| result.record.id).collect()
    }

    #[test]
    fn empty_query_returns_nothing() {
        assert!(search(&docs(), &NoFilter, "", 10).is_empty());
        assert!(search(&docs(), &NoFilter, "   \t ", 10).is_empty());
    }

    #[test]
    fn no_matching_tokens_returns_nothing() {
        assert!(search(&docs(), &NoFilter, "roof shingles", 10).is_empty());
    }

    #[test]
    fn ranks_by_score_descending() {
        let results = search(&docs(), &NoFilter, "kitchen outlet", 10);

        assert_eq!(ids(&results), vec!["a", "b", "c", "d"]);
        assert_eq!(results[0].relevance_score, 2);
        assert!(results[1..].iter().all(|result| result.relevance_score == 1));
    }

    #[test]
    fn equal_scores_keep_collection_order() {
        let results = search(&docs(), &NoFilter, "outlet", 10);
        assert_eq!(ids(&results), vec!["a", "b", "d"]);
    }

    #[test]
    fn matching_is_case_insensitive_substring() {
        // Known quirk: "cat" is found inside "category".
        let results = search(&docs(), &NoFilter, "CAT", 10);
        assert_eq!(ids(&results), vec!["d"]);
    }

    #[test]
    fn repeated_tokens_inflate_score() {
        // Known quirk: duplicates are not collapsed.
        let results = search(&docs(), &NoFilter, "sink sink sink", 10);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].relevance_score, 3);
    }

    #[test]
    fn filter_excludes_records_missing_the_attribute() {
        let results = search(&docs(), &KindFilter("electrical"), "outlet", 10);
        assert_eq!(ids(&results), vec!["a", "b"]);
    }

    #[test]
    fn limit_truncates_after_sorting() {
        let results = search(&docs(), &NoFilter, "kitchen outlet", 1);
        assert_eq!(ids(&results), vec!["a"]);
    }

    #[test]
    fn find_exact_is_case_sensitive_and_filtered() {
        let records = docs();

        assert_eq!(find_exact(&records, &NoFilter, "c").map(|doc| doc.id), Some("c"));
        assert!(find_exact(&records, &NoFilter, "C").is_none());
        assert!(find_exact(&records, &KindFilter("electrical"), "c").is_none());
        assert_eq!(
            find_exact(&records, &NoFilter, "missing"),
            find_exact(&records, &NoFilter, "missing")
        );
    }

    #[test]
    fn code_section_text_includes_questions() {
        let section = CodeSection {
            code_ref: "NEC 210.8(A)(1)".to_string(),
            title: "GFCI Protection".to_string(),
            category: None,
            jurisdiction: None,
            summary: "Bathroom receptacles".to_string(),
            full_text: None,
            common_questions: vec!["Do I need a GFCI?".to_string()],
            related_codes: Vec::new(),
            source: None,
            notes: None,
        };

        assert_eq!(
            section.search_text(),
            "gfci protection bathroom receptacles do i need a gfci?"
        );
    }
}
