//! Reference resolution
//!
//! Walks `var(--name)` references through a theme until a literal is reached, keeping
//! every visited value in a [`Chain`]. Problems end the branch with a marker step
//! instead of failing:
//!
//! - a name already on the current path ends with [`ChainStep::Circular`]
//! - an unknown theme ends with [`ChainStep::MissingTheme`]
//! - an unknown variable ends with [`ChainStep::MissingVariable`]
//!
//! The visited set is shared along a linear chain and copied at each multi-value
//! branch, so siblings never see each other's names. Every step adds one distinct
//! name to the path, which bounds recursion by the number of variables in the theme.

use std::collections::BTreeSet;

use crate::resolve::cache::{ResolutionCache, ResolveMode};
use crate::resolve::chain::{Chain, ChainStep};
use crate::theme::value::RawValue;
use crate::theme::ThemeCollection;

/// Resolve `value` in the context of `theme_name`, expanding multi-valued targets.
///
/// `visited` holds the names already on the path; pass an empty set for a fresh
/// resolution.
pub fn resolve(
    value: &str,
    theme_name: &str,
    themes: &ThemeCollection,
    visited: &BTreeSet<String>,
) -> Chain {
    Resolver::new(themes).resolve_with(value, theme_name, visited)
}

/// Resolver over one collection snapshot, optionally memoized
pub struct Resolver<'a> {
    themes: &'a ThemeCollection,
    mode: ResolveMode,
    cache: Option<&'a mut ResolutionCache>,
}

impl<'a> Resolver<'a> {
    pub fn new(themes: &'a ThemeCollection) -> Self {
        Self {
            themes,
            mode: ResolveMode::Expand,
            cache: None,
        }
    }

    pub fn with_mode(mut self, mode: ResolveMode) -> Self {
        self.mode = mode;
        self
    }

    /// Memoize results in `cache`; the cache is cleared first if it belongs to another snapshot
    pub fn with_cache(mut self, cache: &'a mut ResolutionCache) -> Self {
        cache.sync(self.themes.stamp());
        self.cache = Some(cache);
        self
    }

    /// Resolve a value starting with an empty path
    pub fn resolve(&mut self, value: &str, theme_name: &str) -> Chain {
        self.resolve_with(value, theme_name, &BTreeSet::new())
    }

    /// Resolve a value given the names already on the path
    pub fn resolve_with(&mut self, value: &str, theme_name: &str, visited: &BTreeSet<String>) -> Chain {
        let mut path = visited.clone();
        self.resolve_step(value, theme_name, &mut path)
    }

    /// Resolve a variable's raw value, one chain per alternative.
    ///
    /// The variable's own name starts on the path, so `--x: var(--x)` is reported as
    /// circular on the first step. Returns `None` if the theme or variable is missing.
    pub fn resolve_variable(&mut self, theme_name: &str, name: &str) -> Option<Vec<Chain>> {
        let themes = self.themes;
        let raw = themes.get(theme_name)?.variable(name)?;
        let visited: BTreeSet<String> = [crate::config::with_prefix(name)].into_iter().collect();

        let chains = match RawValue::parse(raw) {
            RawValue::Multi(parts) => parts
                .into_iter()
                .map(|part| self.resolve_with(part, theme_name, &visited))
                .collect(),
            _ => vec![self.resolve_with(raw, theme_name, &visited)],
        };
        Some(chains)
    }

    fn resolve_step(&mut self, value: &str, theme_name: &str, visited: &mut BTreeSet<String>) -> Chain {
        let RawValue::Reference(name) = RawValue::parse(value) else {
            return Chain::start(value);
        };

        let mode = self.mode;
        if let Some(cache) = self.cache.as_deref_mut() {
            if let Some(chain) = cache.get(theme_name, value, visited, mode) {
                return chain;
            }
        }

        let entry_visited = self.cache.as_ref().map(|_| visited.clone());
        let chain = self.follow(value, name, theme_name, visited);

        if let (Some(cache), Some(entry_visited)) = (self.cache.as_deref_mut(), entry_visited) {
            cache.insert(theme_name, value, &entry_visited, mode, chain.clone());
        }
        chain
    }

    fn follow(
        &mut self,
        value: &str,
        name: &str,
        theme_name: &str,
        visited: &mut BTreeSet<String>,
    ) -> Chain {
        let mut chain = Chain::start(value);

        if visited.contains(name) {
            chain.push(ChainStep::Circular(name.to_string()));
            return chain;
        }
        visited.insert(name.to_string());

        let themes = self.themes;
        let Some(theme) = themes.get(theme_name) else {
            chain.push(ChainStep::MissingTheme(theme_name.to_string()));
            return chain;
        };
        let Some(raw) = theme.variable(name) else {
            chain.push(ChainStep::MissingVariable(name.to_string()));
            return chain;
        };

        match (self.mode, RawValue::parse(raw)) {
            (ResolveMode::Expand, RawValue::Multi(parts)) => {
                for (index, part) in parts.into_iter().enumerate() {
                    if index > 0 {
                        chain.push(ChainStep::Separator);
                    }
                    let mut branch = visited.clone();
                    chain.append(self.resolve_step(part, theme_name, &mut branch));
                }
            }
            _ => chain.append(self.resolve_step(raw, theme_name, visited)),
        }
        chain
    }
}
