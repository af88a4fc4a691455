//! Variable resolution
//!
//! Resolution turns a raw value into a [`Chain`] of every value visited on the way to
//! a terminal value. Cycles, unknown variables and unknown themes are in-band chain
//! steps rather than errors, so one broken branch never hides the others.

pub mod cache;
pub mod chain;
pub mod resolver;

pub use cache::{CacheStats, ResolutionCache, ResolveMode};
pub use chain::{Chain, ChainStep};
pub use resolver::{resolve, Resolver};
