//! Color detection and conversion
//!
//! Recognizes `#rgb`/`#rrggbb`, `rgb()`/`rgba()` and `hsl()`/`hsla()` values and
//! produces the five equivalent notations in a fixed order: hex, rgb, rgba, hsl, hsla.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

fn hex_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)^#([0-9a-f]{3}|[0-9a-f]{6})$").expect("valid hex pattern"))
}

fn rgb_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)^rgba?\(\s*(\d+)\s*,\s*(\d+)\s*,\s*(\d+)\s*(?:,\s*(\d*\.?\d+)\s*)?\)$")
            .expect("valid rgb pattern")
    })
}

fn hsl_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)^hsla?\(\s*(\d+)\s*,\s*(\d+)%?\s*,\s*(\d+)%?\s*(?:,\s*(\d*\.?\d+)\s*)?\)$")
            .expect("valid hsl pattern")
    })
}

/// Notation of a color value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorFormat {
    Hex,
    Rgb,
    Rgba,
    Hsl,
    Hsla,
}

impl ColorFormat {
    pub const ALL: [ColorFormat; 5] = [
        ColorFormat::Hex,
        ColorFormat::Rgb,
        ColorFormat::Rgba,
        ColorFormat::Hsl,
        ColorFormat::Hsla,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ColorFormat::Hex => "hex",
            ColorFormat::Rgb => "rgb",
            ColorFormat::Rgba => "rgba",
            ColorFormat::Hsl => "hsl",
            ColorFormat::Hsla => "hsla",
        }
    }
}

impl fmt::Display for ColorFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A color written in one notation
#[derive(Debug, Clone, PartialEq)]
pub struct ColorValue {
    pub format: ColorFormat,
    pub value: String,
}

/// Represents a color with RGBA components
#[derive(Debug, Clone, PartialEq)]
pub struct Color {
    /// Red component (0-255)
    pub r: u8,
    /// Green component (0-255)
    pub g: u8,
    /// Blue component (0-255)
    pub b: u8,
    /// Alpha component (0.0-1.0)
    pub a: f64,
}

/// Hue in degrees, saturation and lightness in percent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hsl {
    pub h: u16,
    pub s: u8,
    pub l: u8,
}

impl Color {
    /// Create a new color with RGB components and full opacity
    pub fn new_rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Create a new color with RGBA components
    pub fn new_rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Parse `#rgb` or `#rrggbb`; the `#` is required
    pub fn from_hex(hex_value: &str) -> Option<Self> {
        let caps = hex_regex().captures(hex_value)?;
        let digits = caps.get(1)?.as_str();

        let full = if digits.len() == 3 {
            digits.chars().flat_map(|c| [c, c]).collect::<String>()
        } else {
            digits.to_string()
        };

        let r = u8::from_str_radix(&full[0..2], 16).ok()?;
        let g = u8::from_str_radix(&full[2..4], 16).ok()?;
        let b = u8::from_str_radix(&full[4..6], 16).ok()?;
        Some(Self::new_rgb(r, g, b))
    }

    /// Parse `rgb(r, g, b)` or `rgba(r, g, b, a)` with channels 0-255 and alpha 0-1
    pub fn from_rgb_function(text: &str) -> Option<Self> {
        let caps = rgb_regex().captures(text)?;
        let r = parse_bounded(&caps[1], 255)? as u8;
        let g = parse_bounded(&caps[2], 255)? as u8;
        let b = parse_bounded(&caps[3], 255)? as u8;
        let a = parse_alpha(caps.get(4).map(|m| m.as_str()))?;
        Some(Self::new_rgba(r, g, b, a))
    }

    pub fn from_hsl(hsl: Hsl, a: f64) -> Self {
        let (r, g, b) = hsl_to_rgb(hsl);
        Self::new_rgba(r, g, b, a)
    }

    /// Get RGB components as a tuple
    pub fn rgb(&self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }

    /// Convert to upper-case hex string format (#RRGGBB)
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    pub fn to_hsl(&self) -> Hsl {
        rgb_to_hsl(self.r, self.g, self.b)
    }
}

/// Parse `hsl(h, s%, l%)` or `hsla(h, s%, l%, a)`, returning the components and alpha
pub fn parse_hsl_function(text: &str) -> Option<(Hsl, f64)> {
    let caps = hsl_regex().captures(text)?;
    let h = parse_bounded(&caps[1], 360)? as u16;
    let s = parse_bounded(&caps[2], 100)? as u8;
    let l = parse_bounded(&caps[3], 100)? as u8;
    let a = parse_alpha(caps.get(4).map(|m| m.as_str()))?;
    Some((Hsl { h, s, l }, a))
}

fn parse_bounded(digits: &str, max: u32) -> Option<u32> {
    digits.parse::<u32>().ok().filter(|v| *v <= max)
}

fn parse_alpha(text: Option<&str>) -> Option<f64> {
    match text {
        None => Some(1.0),
        Some(text) => text.parse::<f64>().ok().filter(|a| (0.0..=1.0).contains(a)),
    }
}

/// Standard RGB to HSL transform, rounded to whole degrees and percents
pub fn rgb_to_hsl(r: u8, g: u8, b: u8) -> Hsl {
    let r = r as f64 / 255.0;
    let g = g as f64 / 255.0;
    let b = b as f64 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;
    let mut h = 0.0;
    let mut s = 0.0;

    if max != min {
        let d = max - min;
        s = if l > 0.5 { d / (2.0 - max - min) } else { d / (max + min) };
        h = if max == r {
            ((g - b) / d + if g < b { 6.0 } else { 0.0 }) / 6.0
        } else if max == g {
            ((b - r) / d + 2.0) / 6.0
        } else {
            ((r - g) / d + 4.0) / 6.0
        };
    }

    Hsl {
        h: (h * 360.0).round() as u16,
        s: (s * 100.0).round() as u8,
        l: (l * 100.0).round() as u8,
    }
}

fn hue_to_rgb(p: f64, q: f64, t: f64) -> f64 {
    let mut t = t;
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        return p + (q - p) * 6.0 * t;
    }
    if t < 1.0 / 2.0 {
        return q;
    }
    if t < 2.0 / 3.0 {
        return p + (q - p) * (2.0 / 3.0 - t) * 6.0;
    }
    p
}

/// Inverse of [`rgb_to_hsl`], rounded to whole channels
pub fn hsl_to_rgb(hsl: Hsl) -> (u8, u8, u8) {
    let h = hsl.h as f64 / 360.0;
    let s = hsl.s as f64 / 100.0;
    let l = hsl.l as f64 / 100.0;

    let (r, g, b) = if s == 0.0 {
        (l, l, l)
    } else {
        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;
        (
            hue_to_rgb(p, q, h + 1.0 / 3.0),
            hue_to_rgb(p, q, h),
            hue_to_rgb(p, q, h - 1.0 / 3.0),
        )
    };

    let channel = |v: f64| (v * 255.0).round() as u8;
    (channel(r), channel(g), channel(b))
}

/// Detect a color and list it in all five notations, or `None` if it is not a color
pub fn detect_and_convert(text: &str) -> Option<Vec<ColorValue>> {
    let trimmed = text.trim();

    if let Some(color) = Color::from_hex(trimmed) {
        return Some(conversions(&color, color.to_hsl()));
    }
    if let Some(color) = Color::from_rgb_function(trimmed) {
        return Some(conversions(&color, color.to_hsl()));
    }
    if let Some((hsl, alpha)) = parse_hsl_function(trimmed) {
        // Keep the caller's hsl numbers rather than a lossy round trip through rgb
        return Some(conversions(&Color::from_hsl(hsl, alpha), hsl));
    }
    None
}

fn conversions(color: &Color, hsl: Hsl) -> Vec<ColorValue> {
    let (r, g, b) = color.rgb();
    let a = color.a;
    ColorFormat::ALL
        .iter()
        .map(|format| {
            let value = match format {
                ColorFormat::Hex => color.to_hex(),
                ColorFormat::Rgb => format!("rgb({}, {}, {})", r, g, b),
                ColorFormat::Rgba => format!("rgba({}, {}, {}, {})", r, g, b, a),
                ColorFormat::Hsl => format!("hsl({}, {}%, {}%)", hsl.h, hsl.s, hsl.l),
                ColorFormat::Hsla => format!("hsla({}, {}%, {}%, {})", hsl.h, hsl.s, hsl.l, a),
            };
            ColorValue {
                format: *format,
                value,
            }
        })
        .collect()
}
