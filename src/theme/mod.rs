//! Theme data model
//!
//! Themes, the ordered collection the engine reads from, the raw value grammar,
//! and the editing/import helpers used by callers to produce themes.

pub mod editor;
pub mod import;
pub mod theme;
pub mod value;

pub use editor::ThemeDraft;
pub use import::{import_text, parse_css_variables};
pub use theme::{CollectionStamp, Theme, ThemeCollection};
pub use value::RawValue;
