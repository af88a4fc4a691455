//! Size detection and conversion
//!
//! Absolute units (px, rem, em, pt) are converted through a common pixel value using a
//! fixed 16px root font size and 1pt = 1.333333px. Relative units (vh, vw, %) need a
//! viewport or parent to convert and are passed through unchanged.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

use crate::config::{BASE_FONT_SIZE_PX, PX_PER_PT};

fn size_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(\d+\.?\d*|\.\d+)(px|rem|em|pt|vh|vw|%)?$").expect("valid size pattern")
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SizeUnit {
    Px,
    Rem,
    Em,
    Pt,
    Vh,
    Vw,
    Percent,
}

impl SizeUnit {
    pub fn parse(unit: &str) -> Option<Self> {
        match unit {
            "px" => Some(SizeUnit::Px),
            "rem" => Some(SizeUnit::Rem),
            "em" => Some(SizeUnit::Em),
            "pt" => Some(SizeUnit::Pt),
            "vh" => Some(SizeUnit::Vh),
            "vw" => Some(SizeUnit::Vw),
            "%" => Some(SizeUnit::Percent),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SizeUnit::Px => "px",
            SizeUnit::Rem => "rem",
            SizeUnit::Em => "em",
            SizeUnit::Pt => "pt",
            SizeUnit::Vh => "vh",
            SizeUnit::Vw => "vw",
            SizeUnit::Percent => "%",
        }
    }

    /// Units that can be converted without layout context
    pub fn is_absolute(&self) -> bool {
        matches!(self, SizeUnit::Px | SizeUnit::Rem | SizeUnit::Em | SizeUnit::Pt)
    }

    /// Decimal places kept when writing a value in this unit
    fn precision(&self) -> i32 {
        match self {
            SizeUnit::Rem | SizeUnit::Em => 3,
            _ => 2,
        }
    }

    fn to_px(&self, value: f64) -> f64 {
        match self {
            SizeUnit::Rem | SizeUnit::Em => value * BASE_FONT_SIZE_PX,
            SizeUnit::Pt => value * PX_PER_PT,
            _ => value,
        }
    }

    fn from_px(&self, px: f64) -> f64 {
        match self {
            SizeUnit::Rem | SizeUnit::Em => px / BASE_FONT_SIZE_PX,
            SizeUnit::Pt => px / PX_PER_PT,
            _ => px,
        }
    }
}

impl fmt::Display for SizeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A size written in one unit
#[derive(Debug, Clone, PartialEq)]
pub struct SizeValue {
    pub unit: SizeUnit,
    pub value: String,
}

const ABSOLUTE_UNITS: [SizeUnit; 4] = [SizeUnit::Px, SizeUnit::Rem, SizeUnit::Em, SizeUnit::Pt];

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Detect a size and list its equivalents, or `None` if it is not a size.
///
/// A bare number is taken as pixels.
pub fn detect_and_convert(text: &str) -> Option<Vec<SizeValue>> {
    let trimmed = text.trim();
    let caps = size_regex().captures(trimmed)?;
    let number: f64 = caps[1].parse().ok()?;
    let unit = match caps.get(2) {
        Some(m) => SizeUnit::parse(m.as_str())?,
        None => SizeUnit::Px,
    };

    if !unit.is_absolute() {
        return Some(vec![SizeValue {
            unit,
            value: trimmed.to_string(),
        }]);
    }

    let px = unit.to_px(number);
    Some(
        ABSOLUTE_UNITS
            .iter()
            .map(|target| SizeValue {
                unit: *target,
                value: format!(
                    "{}{}",
                    round_to(target.from_px(px), target.precision()),
                    target.as_str()
                ),
            })
            .collect(),
    )
}
