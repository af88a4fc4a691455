//! The resolution engine: one owner for the memo cache and the search index
//!
//! Callers keep handing the engine the current [`ThemeCollection`]. Whenever the
//! collection's stamp changes (any add, edit or delete, or a different collection
//! altogether) the cache is dropped and the index rebuilt before the call proceeds.
//!
//! The engine is single threaded. Hosts with several threads give each thread its own
//! engine or put it behind a mutex.

use crate::convert::{describe_value, ValueKind};
use crate::export::{generate_with, ExportPlan};
use crate::resolve::{CacheStats, Chain, ResolutionCache, ResolveMode, Resolver};
use crate::search::{SearchIndex, SearchResults};
use crate::theme::ThemeCollection;

#[derive(Debug, Default)]
pub struct ResolutionEngine {
    cache: ResolutionCache,
    index: Option<SearchIndex>,
}

impl ResolutionEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve a value in one theme, flattening multi-valued targets
    pub fn resolve(&mut self, themes: &ThemeCollection, theme: &str, value: &str) -> Chain {
        Resolver::new(themes)
            .with_cache(&mut self.cache)
            .resolve(value, theme)
    }

    /// Resolve a variable, one chain per alternative
    pub fn resolve_variable(
        &mut self,
        themes: &ThemeCollection,
        theme: &str,
        name: &str,
    ) -> Option<Vec<Chain>> {
        Resolver::new(themes)
            .with_cache(&mut self.cache)
            .resolve_variable(theme, name)
    }

    /// Exact or partial search across every theme
    pub fn search(&mut self, themes: &ThemeCollection, term: &str, partial: bool) -> SearchResults {
        let Self { cache, index } = self;
        if index.as_ref().is_some_and(|index| !index.is_current(themes)) {
            *index = None;
        }
        let index = index.get_or_insert_with(|| SearchIndex::build(themes));
        let mut resolver = Resolver::new(themes).with_cache(cache);
        index.query(themes, &mut resolver, term, partial)
    }

    /// Export text for a plan built over `themes`
    pub fn export(&mut self, themes: &ThemeCollection, plan: &ExportPlan<'_>) -> String {
        let mut resolver = Resolver::new(themes)
            .with_mode(ResolveMode::Single)
            .with_cache(&mut self.cache);
        generate_with(plan, &mut resolver)
    }

    /// Conversions of a chain's terminal value; markers are plain values
    pub fn describe_terminal(&self, chain: &Chain) -> ValueKind {
        match chain.final_value() {
            Some(value) => describe_value(value),
            None => ValueKind::Plain,
        }
    }

    /// Drop cached chains and the index regardless of the collection stamp
    pub fn invalidate(&mut self) {
        self.cache.invalidate();
        self.index = None;
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::VariableMapping;
    use crate::test_utils::{chain_strings, collection, theme};

    fn themes() -> ThemeCollection {
        collection(vec![
            theme("Light", &[("--bg", "var(--brand)"), ("--brand", "#3b82f6")]),
            theme("Dark", &[("--bg", "#000")]),
        ])
    }

    #[test]
    fn test_resolve_uses_cache() {
        let themes = themes();
        let mut engine = ResolutionEngine::new();

        let first = engine.resolve(&themes, "Light", "var(--bg)");
        let second = engine.resolve(&themes, "Light", "var(--bg)");

        assert_eq!(first, second);
        assert_eq!(chain_strings(&first), vec!["var(--bg)", "var(--brand)", "#3b82f6"]);
        assert!(engine.cache_stats().hits >= 1);
    }

    #[test]
    fn test_edit_invalidates_cache_and_index() {
        let mut themes = themes();
        let mut engine = ResolutionEngine::new();

        let before = engine.search(&themes, "brand", false);
        assert_eq!(before.rows[0].value, "#3b82f6");

        let edited = theme("Light", &[("--bg", "var(--brand)"), ("--brand", "#ef4444")]);
        themes.replace("Light", edited).unwrap();

        let chain = engine.resolve(&themes, "Light", "var(--bg)");
        assert_eq!(chain.final_value(), Some("#ef4444"));

        let after = engine.search(&themes, "brand", false);
        assert_eq!(after.rows[0].value, "#ef4444");
    }

    #[test]
    fn test_index_is_kept_until_collection_changes() {
        let mut themes = themes();
        let mut engine = ResolutionEngine::new();
        assert!(engine.index.is_none());

        engine.search(&themes, "bg", false);
        let built = engine.index.as_ref().unwrap().entry_count();
        assert_eq!(built, 3);

        engine.search(&themes, "brand", true);
        assert!(engine.index.as_ref().unwrap().is_current(&themes));

        themes.add(theme("Brand", &[("--accent", "#f00")])).unwrap();
        let results = engine.search(&themes, "accent", false);
        assert_eq!(results.rows.len(), 3);
        let index = engine.index.as_ref().unwrap();
        assert!(index.is_current(&themes));
        assert_eq!(index.entry_count(), 4);

        engine.invalidate();
        assert!(engine.index.is_none());
    }

    #[test]
    fn test_search_rows_for_every_theme() {
        let themes = themes();
        let mut engine = ResolutionEngine::new();
        let results = engine.search(&themes, "bg", true);
        assert_eq!(results.rows.len(), 2);
        assert_eq!(results.rows[1].chain.as_ref().unwrap().final_value(), Some("#000"));
    }

    #[test]
    fn test_describe_terminal() {
        let themes = themes();
        let mut engine = ResolutionEngine::new();

        let chain = engine.resolve(&themes, "Light", "var(--bg)");
        assert!(matches!(engine.describe_terminal(&chain), ValueKind::Color(_)));

        let chain = engine.resolve(&themes, "Light", "var(--missing)");
        assert_eq!(engine.describe_terminal(&chain), ValueKind::Plain);
    }

    #[test]
    fn test_export_through_engine() {
        let themes = themes();
        let mut engine = ResolutionEngine::new();
        let mapping = VariableMapping::parse(r#"{ "--background": "--bg" }"#).unwrap();
        let plan = ExportPlan::new(&mapping, &themes, &["Light"], "Light").unwrap();

        let output = engine.export(&themes, &plan);
        assert!(output.contains(".theme-light {\n  --background: #3b82f6;\n}\n"));
        assert_eq!(output, crate::export::generate(&plan, &themes));
    }
}
