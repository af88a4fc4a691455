//! Building a theme from edited key/value rows
//!
//! Rows sharing a key become one multi-valued entry, joined with `" | "` in row order.

use indexmap::IndexMap;

use crate::error::{ThemeError, ThemeResult};
use crate::theme::theme::Theme;
use crate::theme::value::{join_values, split_values};

/// A theme as it is being edited: a name and free-form rows
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ThemeDraft {
    pub name: String,
    pub rows: Vec<(String, String)>,
}

impl ThemeDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rows: Vec::new(),
        }
    }

    /// Start editing an existing theme; multi-valued entries are split back into rows
    pub fn from_theme(theme: &Theme) -> Self {
        let rows = theme
            .variables
            .iter()
            .flat_map(|(key, value)| {
                split_values(value)
                    .into_iter()
                    .map(move |part| (key.clone(), part.to_string()))
            })
            .collect();
        Self {
            name: theme.name.clone(),
            rows,
        }
    }

    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.rows.push((key.into(), value.into()));
    }

    /// Keys that occur in more than one non-empty row, in first-seen order
    pub fn find_duplicates(&self) -> Vec<String> {
        let mut counts: IndexMap<&str, usize> = IndexMap::new();
        for (key, _) in &self.rows {
            let key = key.trim();
            if !key.is_empty() {
                *counts.entry(key).or_insert(0) += 1;
            }
        }
        counts
            .into_iter()
            .filter(|(_, count)| *count > 1)
            .map(|(key, _)| key.to_string())
            .collect()
    }

    /// Validate and build the theme.
    ///
    /// `existing_names` are the names already taken by other themes.
    pub fn build(&self, existing_names: &[&str]) -> ThemeResult<Theme> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ThemeError::ThemeNameRequired);
        }
        if existing_names.contains(&name) {
            return Err(ThemeError::ThemeExists {
                name: name.to_string(),
            });
        }

        let mut grouped: IndexMap<String, Vec<String>> = IndexMap::new();
        for (key, value) in &self.rows {
            let (key, value) = (key.trim(), value.trim());
            if key.is_empty() || value.is_empty() {
                continue;
            }
            grouped.entry(key.to_string()).or_default().push(value.to_string());
        }

        if grouped.is_empty() {
            return Err(ThemeError::AtLeastOneVariable);
        }

        let variables = grouped
            .into_iter()
            .map(|(key, values)| (key, join_values(&values)))
            .collect();

        Ok(Theme {
            name: name.to_string(),
            variables,
        })
    }
}
