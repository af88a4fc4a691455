//! Themes and theme collections

use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::config::{strip_prefix, with_prefix};
use crate::error::{IoContext, JsonContext, ThemeError, ThemeResult};

/// A named set of variables. Variable order is the insertion order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    pub variables: IndexMap<String, String>,
}

impl Theme {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            variables: IndexMap::new(),
        }
    }

    /// Builder style insertion, keeps declaration order
    pub fn with_variable(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(name.into(), value.into());
        self
    }

    /// Look up a variable by name, with or without the `--` prefix.
    ///
    /// Empty values count as not defined.
    pub fn variable(&self, name: &str) -> Option<&str> {
        self.variables
            .get(&with_prefix(name))
            .or_else(|| self.variables.get(strip_prefix(name)))
            .map(|v| v.as_str())
            .filter(|v| !v.is_empty())
    }

    /// Class name used for this theme's export block, e.g. `theme-dark-blue`
    pub fn css_class(&self) -> String {
        let slug = self
            .name
            .to_lowercase()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("-");
        format!("theme-{}", slug)
    }
}

static NEXT_COLLECTION_ID: AtomicU64 = AtomicU64::new(1);

fn next_collection_id() -> u64 {
    NEXT_COLLECTION_ID.fetch_add(1, Ordering::Relaxed)
}

/// Identity of a collection snapshot: which collection, at which revision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CollectionStamp {
    pub id: u64,
    pub revision: u64,
}

/// Ordered collection of themes.
///
/// Every mutation bumps the revision, and every collection (clones included) gets its
/// own id. Caches built on top of a collection compare [`ThemeCollection::stamp`] to
/// know when they are stale.
#[derive(Debug)]
pub struct ThemeCollection {
    themes: Vec<Theme>,
    id: u64,
    revision: u64,
}

impl Default for ThemeCollection {
    fn default() -> Self {
        Self::from_themes(Vec::new())
    }
}

impl Clone for ThemeCollection {
    fn clone(&self) -> Self {
        Self::from_themes(self.themes.clone())
    }
}

impl ThemeCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_themes(themes: Vec<Theme>) -> Self {
        Self {
            themes,
            id: next_collection_id(),
            revision: 0,
        }
    }

    /// The two starter themes shown on first use
    pub fn sample() -> Self {
        Self::from_themes(vec![
            Theme::new("Light")
                .with_variable("--bg", "#ffffff")
                .with_variable("--text", "#000000")
                .with_variable("--color-primary", "#3b82f6"),
            Theme::new("Dark")
                .with_variable("--bg", "#000000")
                .with_variable("--text", "#ffffff")
                .with_variable("--color-primary", "#60a5fa"),
        ])
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn stamp(&self) -> CollectionStamp {
        CollectionStamp {
            id: self.id,
            revision: self.revision,
        }
    }

    pub fn themes(&self) -> &[Theme] {
        &self.themes
    }

    pub fn len(&self) -> usize {
        self.themes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Theme> {
        self.themes.iter().find(|t| t.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn names(&self) -> Vec<&str> {
        self.themes.iter().map(|t| t.name.as_str()).collect()
    }

    /// Append a new theme; names must be unique
    pub fn add(&mut self, theme: Theme) -> ThemeResult<()> {
        if self.contains(&theme.name) {
            return Err(ThemeError::ThemeExists { name: theme.name });
        }
        self.themes.push(theme);
        self.revision += 1;
        Ok(())
    }

    /// Replace the theme called `old_name` in place, possibly renaming it
    pub fn replace(&mut self, old_name: &str, theme: Theme) -> ThemeResult<()> {
        if theme.name != old_name && self.contains(&theme.name) {
            return Err(ThemeError::ThemeExists { name: theme.name });
        }
        let slot = self
            .themes
            .iter_mut()
            .find(|t| t.name == old_name)
            .ok_or_else(|| ThemeError::ThemeNotFound {
                name: old_name.to_string(),
            })?;
        *slot = theme;
        self.revision += 1;
        Ok(())
    }

    /// Remove a theme, returning it
    pub fn remove(&mut self, name: &str) -> ThemeResult<Theme> {
        let index = self
            .themes
            .iter()
            .position(|t| t.name == name)
            .ok_or_else(|| ThemeError::ThemeNotFound {
                name: name.to_string(),
            })?;
        self.revision += 1;
        Ok(self.themes.remove(index))
    }

    /// Parse the persisted shape: a JSON list of `{ name, variables }`
    pub fn from_json(content: &str) -> ThemeResult<Self> {
        let themes: Vec<Theme> =
            serde_json::from_str(content).with_json_context("Failed to parse theme collection")?;
        Ok(Self::from_themes(themes))
    }

    pub fn to_json(&self) -> ThemeResult<String> {
        serde_json::to_string_pretty(&self.themes).with_json_context("Failed to serialize theme collection")
    }

    pub fn load(path: &Path) -> ThemeResult<Self> {
        let content = fs::read_to_string(path).with_io_context("Failed to read theme collection")?;
        Self::from_json(&content)
    }

    pub fn save(&self, path: &Path) -> ThemeResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_io_context("Failed to create theme directory")?;
        }
        fs::write(path, self.to_json()?).with_io_context("Failed to write theme collection")
    }
}
