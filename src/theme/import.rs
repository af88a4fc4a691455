//! Importing pasted text into a theme draft
//!
//! Two inputs are accepted:
//! - a theme JSON object `{ "name": "...", "variables": { "--x": "..." } }`
//! - any text containing `--name: value;` declarations, e.g. a CSS block
//!
//! The import is all-or-nothing: on error no draft is produced.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;

use crate::error::{ThemeError, ThemeResult};
use crate::theme::editor::ThemeDraft;

fn declaration_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(--[\w-]+)\s*:\s*([^;]+);").expect("valid declaration pattern"))
}

/// Import pasted text, trying theme JSON first and CSS declarations second
pub fn import_text(text: &str) -> ThemeResult<ThemeDraft> {
    match serde_json::from_str::<Value>(text) {
        Ok(value) => draft_from_json(&value),
        Err(_) => {
            let rows = parse_css_variables(text);
            if rows.is_empty() {
                log::warn!("Import rejected: no variable declarations found");
                return Err(ThemeError::NoValidVariables);
            }
            log::debug!("Imported {} CSS declarations", rows.len());
            Ok(ThemeDraft {
                name: String::new(),
                rows,
            })
        }
    }
}

/// Extract `--name: value;` pairs in text order, trimmed
pub fn parse_css_variables(text: &str) -> Vec<(String, String)> {
    declaration_regex()
        .captures_iter(text)
        .map(|caps| (caps[1].trim().to_string(), caps[2].trim().to_string()))
        .collect()
}

fn draft_from_json(value: &Value) -> ThemeResult<ThemeDraft> {
    let name = value
        .get("name")
        .and_then(Value::as_str)
        .filter(|name| !name.is_empty())
        .ok_or(ThemeError::InvalidThemeJson)?;
    let variables = value
        .get("variables")
        .and_then(Value::as_object)
        .ok_or(ThemeError::InvalidThemeJson)?;

    let mut draft = ThemeDraft::new(name);
    for (key, value) in variables {
        let value = value.as_str().ok_or(ThemeError::InvalidThemeJson)?;
        draft.push(key.clone(), value);
    }
    Ok(draft)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_css_block() {
        let text = r#"
            :root {
                --bg : #ffffff;
                --text:#000;
                color: red;
                --shadow: 0 1px 2px var(--ink) ;
            }
        "#;
        let draft = import_text(text).unwrap();
        assert_eq!(draft.name, "");
        assert_eq!(
            draft.rows,
            vec![
                ("--bg".to_string(), "#ffffff".to_string()),
                ("--text".to_string(), "#000".to_string()),
                ("--shadow".to_string(), "0 1px 2px var(--ink)".to_string()),
            ]
        );
    }

    #[test]
    fn test_import_theme_json_keeps_order() {
        let text = r#"{ "name": "Ocean", "variables": { "--z": "1px", "--a": "var(--z)" } }"#;
        let draft = import_text(text).unwrap();
        assert_eq!(draft.name, "Ocean");
        assert_eq!(draft.rows[0], ("--z".to_string(), "1px".to_string()));
        assert_eq!(draft.rows[1], ("--a".to_string(), "var(--z)".to_string()));
    }

    #[test]
    fn test_import_rejects_wrong_json_shape() {
        assert!(matches!(import_text(r#"{ "title": "x" }"#), Err(ThemeError::InvalidThemeJson)));
        assert!(matches!(import_text("[1, 2]"), Err(ThemeError::InvalidThemeJson)));
        assert!(matches!(
            import_text(r#"{ "name": "A", "variables": { "--a": 1 } }"#),
            Err(ThemeError::InvalidThemeJson)
        ));
    }

    #[test]
    fn test_import_rejects_text_without_declarations() {
        assert!(matches!(import_text("hello world"), Err(ThemeError::NoValidVariables)));
        assert!(matches!(import_text("--missing-semicolon: 1px"), Err(ThemeError::NoValidVariables)));
    }
}
