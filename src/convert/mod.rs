//! Terminal value conversions for display and export
//!
//! - [`color`]: hex, rgb(a) and hsl(a) colors
//! - [`size`]: px, rem, em and pt sizes, with vh, vw and % passed through

pub mod color;
pub mod size;

pub use color::{Color, ColorFormat, ColorValue};
pub use size::{SizeUnit, SizeValue};

/// What a terminal value looks like, with its equivalent notations
#[derive(Debug, Clone, PartialEq)]
pub enum ValueKind {
    Color(Vec<ColorValue>),
    Size(Vec<SizeValue>),
    Plain,
}

/// Classify a value, trying colors before sizes
pub fn describe_value(text: &str) -> ValueKind {
    if let Some(colors) = color::detect_and_convert(text) {
        ValueKind::Color(colors)
    } else if let Some(sizes) = size::detect_and_convert(text) {
        ValueKind::Size(sizes)
    } else {
        ValueKind::Plain
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_value() {
        assert!(matches!(describe_value("#000"), ValueKind::Color(list) if list.len() == 5));
        assert!(matches!(describe_value("2rem"), ValueKind::Size(list) if list.len() == 4));
        assert!(matches!(describe_value("50%"), ValueKind::Size(list) if list.len() == 1));
        assert_eq!(describe_value("bold"), ValueKind::Plain);
        assert_eq!(describe_value("[circular: --x]"), ValueKind::Plain);
    }
}
