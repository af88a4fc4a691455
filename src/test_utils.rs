//! Test utilities shared across the codebase

use crate::theme::{Theme, ThemeCollection};

/// Build a theme from `(name, value)` pairs, keeping their order
pub fn theme(name: &str, variables: &[(&str, &str)]) -> Theme {
    variables
        .iter()
        .fold(Theme::new(name), |theme, (key, value)| theme.with_variable(*key, *value))
}

/// Build a collection from themes, keeping their order
pub fn collection(themes: Vec<Theme>) -> ThemeCollection {
    ThemeCollection::from_themes(themes)
}

/// Text form of a chain, markers included
pub fn chain_strings(chain: &crate::resolve::Chain) -> Vec<String> {
    chain.to_strings()
}
