//! Search index over variable names
//!
//! Every variable is indexed under its normalized name (lower case, `--` stripped) and
//! under each `-` separated segment of that name. A substring query only has to scan
//! the distinct tokens instead of every variable of every theme:
//!
//! - a term without `-` can only occur inside one segment
//! - a term with `-` can only occur inside a full name
//!
//! so the union of entries of all tokens containing the term is exactly the set a
//! linear scan would find. Tokens containing the term are found through a sorted
//! table of token suffixes: every such token has a suffix starting with the term, and
//! those suffixes form one contiguous range.

use std::collections::BTreeMap;
use std::ops::Bound;

use crate::config::{strip_prefix, with_prefix, ABSENT_PLACEHOLDER};
use crate::resolve::{Chain, Resolver};
use crate::theme::value::RawValue;
use crate::theme::{CollectionStamp, ThemeCollection};

/// A variable of a theme, with positions used to keep collection order
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct IndexEntry {
    pub theme_position: usize,
    pub variable_position: usize,
    pub theme: String,
    pub variable: String,
}

/// One row of a search result
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRow {
    /// Theme label shown to the user, `"Name (2)"` for alternatives of a multi-valued entry
    pub label: String,
    pub theme: String,
    /// Matched variable, `None` when the theme has no match
    pub variable: Option<String>,
    /// Raw value of the row, or the absent placeholder
    pub value: String,
    pub chain: Option<Chain>,
    /// Row is one of several alternatives of the same entry
    pub is_duplicate: bool,
    /// 1-based position among the alternatives
    pub position: Option<usize>,
}

impl SearchRow {
    fn absent(theme: &str, variable: Option<String>) -> Self {
        Self {
            label: theme.to_string(),
            theme: theme.to_string(),
            variable,
            value: ABSENT_PLACEHOLDER.to_string(),
            chain: None,
            is_duplicate: false,
            position: None,
        }
    }

    pub fn is_absent(&self) -> bool {
        self.chain.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchResults {
    /// Normalized term: with `--` for exact queries, stripped and lower case for partial ones
    pub term: String,
    pub partial: bool,
    pub rows: Vec<SearchRow>,
}

impl SearchResults {
    /// Rows belonging to one theme, in order
    pub fn rows_for<'a>(&'a self, theme: &'a str) -> impl Iterator<Item = &'a SearchRow> + 'a {
        self.rows.iter().filter(move |row| row.theme == theme)
    }
}

/// Lower case, `--` stripped form used for matching
pub fn normalize_name(name: &str) -> String {
    strip_prefix(name.trim()).to_lowercase()
}

#[derive(Debug, Clone)]
pub struct SearchIndex {
    stamp: CollectionStamp,
    tokens: BTreeMap<String, Vec<IndexEntry>>,
    /// Every suffix of every token, mapped to the tokens ending with it
    suffixes: BTreeMap<String, Vec<String>>,
    entry_count: usize,
}

impl SearchIndex {
    pub fn build(themes: &ThemeCollection) -> Self {
        let mut tokens: BTreeMap<String, Vec<IndexEntry>> = BTreeMap::new();
        let mut entry_count = 0;

        for (theme_position, theme) in themes.themes().iter().enumerate() {
            for (variable_position, variable) in theme.variables.keys().enumerate() {
                let entry = IndexEntry {
                    theme_position,
                    variable_position,
                    theme: theme.name.clone(),
                    variable: variable.clone(),
                };
                let normalized = normalize_name(variable);
                for segment in normalized.split('-').filter(|s| !s.is_empty() && *s != normalized) {
                    tokens.entry(segment.to_string()).or_default().push(entry.clone());
                }
                tokens.entry(normalized).or_default().push(entry);
                entry_count += 1;
            }
        }

        let mut suffixes: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for token in tokens.keys() {
            for (start, _) in token.char_indices() {
                suffixes
                    .entry(token[start..].to_string())
                    .or_default()
                    .push(token.clone());
            }
        }

        log::debug!(
            "Built search index: {} variables, {} tokens, {} suffixes",
            entry_count,
            tokens.len(),
            suffixes.len()
        );
        Self {
            stamp: themes.stamp(),
            tokens,
            suffixes,
            entry_count,
        }
    }

    pub fn is_current(&self, themes: &ThemeCollection) -> bool {
        self.stamp == themes.stamp()
    }

    pub fn entry_count(&self) -> usize {
        self.entry_count
    }

    /// Entries indexed under exactly this token
    pub fn lookup_token(&self, token: &str) -> &[IndexEntry] {
        self.tokens.get(token).map(Vec::as_slice).unwrap_or_default()
    }

    /// Entries whose normalized name contains `term`, sorted by theme then variable order
    pub fn partial_matches(&self, term: &str) -> Vec<&IndexEntry> {
        let mut matches: Vec<&IndexEntry> = self
            .suffixes
            .range::<str, _>((Bound::Included(term), Bound::Unbounded))
            .take_while(|(suffix, _)| suffix.starts_with(term))
            .flat_map(|(_, tokens)| tokens.iter())
            .flat_map(|token| self.lookup_token(token).iter())
            .collect();
        matches.sort();
        matches.dedup();
        matches
    }

    /// Run a query against the collection this index was built from.
    ///
    /// Every theme shows up in the result: once per matched variable (or alternative),
    /// or once as an absent row. A blank term gives no rows. If `themes` is not the
    /// snapshot the index was built from, a fresh index is used for this query.
    pub fn query(
        &self,
        themes: &ThemeCollection,
        resolver: &mut Resolver<'_>,
        term: &str,
        partial: bool,
    ) -> SearchResults {
        if !self.is_current(themes) {
            log::debug!("Search index is stale, rebuilding for this query");
            return Self::build(themes).query(themes, resolver, term, partial);
        }

        let term = term.trim();
        let normalized = if partial { normalize_name(term) } else { with_prefix(term) };
        let mut results = SearchResults {
            term: normalized.clone(),
            partial,
            rows: Vec::new(),
        };
        if strip_prefix(&normalized).is_empty() {
            return results;
        }

        let partial_hits = if partial { self.partial_matches(&normalized) } else { Vec::new() };

        for (position, theme) in themes.themes().iter().enumerate() {
            let variables: Vec<&str> = if partial {
                partial_hits
                    .iter()
                    .filter(|entry| entry.theme_position == position)
                    .map(|entry| entry.variable.as_str())
                    .collect()
            } else {
                vec![normalized.as_str()]
            };

            if variables.is_empty() {
                results.rows.push(SearchRow::absent(&theme.name, None));
                continue;
            }

            for variable in variables {
                let Some(raw) = theme.variable(variable) else {
                    results.rows.push(SearchRow::absent(&theme.name, Some(variable.to_string())));
                    continue;
                };
                let chains = resolver
                    .resolve_variable(&theme.name, variable)
                    .unwrap_or_default();
                push_rows(&mut results.rows, &theme.name, variable, raw, chains);
            }
        }
        results
    }
}

fn push_rows(rows: &mut Vec<SearchRow>, theme: &str, variable: &str, raw: &str, chains: Vec<Chain>) {
    let (duplicate, parts) = match RawValue::parse(raw) {
        RawValue::Multi(parts) => (true, parts),
        _ => (false, vec![raw]),
    };

    for (index, (part, chain)) in parts.into_iter().zip(chains).enumerate() {
        let (label, position) = if duplicate {
            (format!("{} ({})", theme, index + 1), Some(index + 1))
        } else {
            (theme.to_string(), None)
        };
        rows.push(SearchRow {
            label,
            theme: theme.to_string(),
            variable: Some(variable.to_string()),
            value: part.to_string(),
            chain: Some(chain),
            is_duplicate: duplicate,
            position,
        });
    }
}
