//! Resolution chains
//!
//! A chain lists every value visited while resolving, starting with the input value.
//! The last step is the terminal value: a literal, one of the error markers, or (for
//! flattened multi-value results) the end of the last sibling sub-chain.

use std::fmt;

use crate::config::SEPARATOR_MARKER;

/// One step of a resolution chain
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ChainStep {
    /// A real value, either a reference or a literal
    Value(String),
    /// The named variable was already visited on this path
    Circular(String),
    /// The named variable is not defined in the theme
    MissingVariable(String),
    /// The named theme is not in the collection
    MissingTheme(String),
    /// Boundary between flattened sibling sub-chains
    Separator,
}

impl ChainStep {
    pub fn value(&self) -> Option<&str> {
        match self {
            ChainStep::Value(v) => Some(v),
            _ => None,
        }
    }

    /// Circular, missing variable or missing theme
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            ChainStep::Circular(_) | ChainStep::MissingVariable(_) | ChainStep::MissingTheme(_)
        )
    }

    pub fn is_separator(&self) -> bool {
        matches!(self, ChainStep::Separator)
    }
}

impl fmt::Display for ChainStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChainStep::Value(v) => write!(f, "{}", v),
            ChainStep::Circular(name) => write!(f, "[circular: {}]", name),
            ChainStep::MissingVariable(name) => write!(f, "[variable not found: {}]", name),
            ChainStep::MissingTheme(name) => write!(f, "[theme not found: {}]", name),
            ChainStep::Separator => write!(f, "{}", SEPARATOR_MARKER),
        }
    }
}

/// Ordered list of resolution steps, never empty
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Chain {
    steps: Vec<ChainStep>,
}

impl Chain {
    /// A chain holding only its starting value
    pub fn start(value: impl Into<String>) -> Self {
        Self {
            steps: vec![ChainStep::Value(value.into())],
        }
    }

    pub fn push(&mut self, step: ChainStep) {
        self.steps.push(step);
    }

    pub fn append(&mut self, other: Chain) {
        self.steps.extend(other.steps);
    }

    pub fn steps(&self) -> &[ChainStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Always false, a chain holds at least its starting value
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// The value resolution started from
    pub fn origin(&self) -> &str {
        self.steps[0].value().unwrap_or_default()
    }

    pub fn terminal(&self) -> &ChainStep {
        &self.steps[self.steps.len() - 1]
    }

    /// The terminal value when it is a real value
    pub fn final_value(&self) -> Option<&str> {
        self.terminal().value()
    }

    /// The last real value visited; for a chain ending in a marker this is the
    /// reference that could not be followed
    pub fn last_value(&self) -> &str {
        self.steps
            .iter()
            .rev()
            .find_map(ChainStep::value)
            .unwrap_or_default()
    }

    /// Whether at least one indirection was followed or attempted
    pub fn is_reference(&self) -> bool {
        self.steps.len() > 1
    }

    pub fn has_error(&self) -> bool {
        self.steps.iter().any(ChainStep::is_error)
    }

    pub fn separator_count(&self) -> usize {
        self.steps.iter().filter(|s| s.is_separator()).count()
    }

    /// The steps between separators
    pub fn segments(&self) -> Vec<&[ChainStep]> {
        self.steps.split(ChainStep::is_separator).collect()
    }

    /// Text form of every step, markers included
    pub fn to_strings(&self) -> Vec<String> {
        self.steps.iter().map(ToString::to_string).collect()
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts = self.to_strings();
        write!(f, "{}", parts.join(" → "))
    }
}
