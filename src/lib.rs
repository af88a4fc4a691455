//! Theme Lens Library
//!
//! This library resolves CSS custom property style variables across named themes:
//! following `var(--name)` references to their final values, detecting cycles,
//! expanding multi-valued entries, searching variable names across themes,
//! converting colors and sizes between notations, and exporting themes as CSS blocks.

pub mod config;
pub mod convert;
pub mod engine;
pub mod error;
pub mod export;
pub mod logging;
pub mod resolve;
pub mod search;
pub mod theme;
#[cfg(test)]
pub mod test_utils;

pub use engine::ResolutionEngine;
pub use error::{ThemeError, ThemeResult};
pub use resolve::{Chain, ChainStep};
pub use theme::{Theme, ThemeCollection};
