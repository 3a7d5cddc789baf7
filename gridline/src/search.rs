//! Fuzzy row search using nucleo-matcher.
//!
//! The grid itself only reports the search text; callers that filter
//! locally can use [`filter_rows`].

use nucleo_matcher::pattern::{AtomKind, CaseMatching, Normalization, Pattern};
use nucleo_matcher::{Config, Matcher, Utf32Str};

use crate::accessor::{Record, stringify};
use crate::column::Column;

/// A row that matched a search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchMatch {
    /// Index of the matched row in the original data.
    pub index: usize,
    /// Match score (higher is better).
    pub score: u32,
}

/// Text searched for `row`: the values of every visible, searchable column,
/// space separated.
pub fn haystack<T: Record>(columns: &[Column<T>], row: &T) -> String {
    columns
        .iter()
        .filter(|column| column.searchable && !column.hidden)
        .filter_map(|column| row.resolve(column.path()))
        .filter(|value| !value.is_null())
        .map(|value| stringify(&value))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Fuzzy-match `query` against each row's searchable columns.
///
/// Returns matches sorted by score (highest first, ties in data order).
/// An empty query returns every row with score 0.
pub fn filter_rows<T: Record>(query: &str, columns: &[Column<T>], rows: &[T]) -> Vec<SearchMatch> {
    let query = query.trim();
    if query.is_empty() {
        return (0..rows.len())
            .map(|index| SearchMatch { index, score: 0 })
            .collect();
    }

    let mut matcher = Matcher::new(Config::DEFAULT);
    let pattern = Pattern::new(
        query,
        CaseMatching::Ignore,
        Normalization::Smart,
        AtomKind::Fuzzy,
    );

    let mut buf = Vec::new();
    let mut matches: Vec<SearchMatch> = rows
        .iter()
        .enumerate()
        .filter_map(|(index, row)| {
            let text = haystack(columns, row);
            let haystack = Utf32Str::new(&text, &mut buf);
            pattern
                .score(haystack, &mut matcher)
                .map(|score| SearchMatch { index, score })
        })
        .collect();

    matches.sort_by(|a, b| b.score.cmp(&a.score));
    log::debug!("Search '{query}' matched {} of {} rows", matches.len(), rows.len());
    matches
}
