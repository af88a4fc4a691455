//! Variable mappings used by the exporter
//!
//! A mapping is an ordered JSON object `{ "<target name>": "<source name>" }`. Key order
//! is kept, since it decides line order in the generated file.

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{IoContext, JsonContext, ThemeError, ThemeResult};

/// Ordered target name to source name pairs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariableMapping {
    pairs: IndexMap<String, String>,
}

impl VariableMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse mapping text. Nothing is returned unless the whole text is valid.
    pub fn parse(text: &str) -> ThemeResult<Self> {
        if text.trim().is_empty() {
            return Err(ThemeError::MappingRequired);
        }
        let value: Value = serde_json::from_str(text).map_err(|e| {
            log::warn!("Rejected mapping, invalid JSON: {}", e);
            ThemeError::InvalidJson
        })?;
        let object = value.as_object().ok_or(ThemeError::InvalidMappingFormat)?;

        let mut pairs = IndexMap::new();
        for (target, source) in object {
            let source = source.as_str().ok_or(ThemeError::InvalidMappingFormat)?;
            pairs.insert(target.clone(), source.to_string());
        }
        Ok(Self { pairs })
    }

    pub fn with_pair(mut self, target: impl Into<String>, source: impl Into<String>) -> Self {
        self.pairs.insert(target.into(), source.into());
        self
    }

    /// `(target, source)` pairs in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(t, s)| (t.as_str(), s.as_str()))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn to_json_pretty(&self) -> ThemeResult<String> {
        serde_json::to_string_pretty(self).with_json_context("Failed to serialize mapping")
    }
}

/// Tailwind-style names mapped to common theme variables
pub fn default_mapping() -> VariableMapping {
    VariableMapping::new()
        .with_pair("--color-primary", "--primary")
        .with_pair("--color-secondary", "--secondary")
        .with_pair("--color-success", "--success")
        .with_pair("--color-danger", "--danger")
        .with_pair("--color-warning", "--warning")
        .with_pair("--color-info", "--info")
        .with_pair("--background", "--bg")
        .with_pair("--foreground", "--text")
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedMapping {
    pub name: String,
    pub mapping: VariableMapping,
}

/// Named mappings kept between sessions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SavedMappings {
    mappings: Vec<SavedMapping>,
}

impl SavedMappings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from a JSON file; a missing file is an empty list
    pub fn load(path: &Path) -> ThemeResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).with_io_context("Failed to read saved mappings")?;
        serde_json::from_str(&content).with_json_context("Failed to parse saved mappings")
    }

    pub fn save(&self, path: &Path) -> ThemeResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_io_context("Failed to create mappings directory")?;
        }
        let content =
            serde_json::to_string_pretty(self).with_json_context("Failed to serialize saved mappings")?;
        fs::write(path, content).with_io_context("Failed to write saved mappings")
    }

    pub fn mappings(&self) -> &[SavedMapping] {
        &self.mappings
    }

    pub fn get(&self, name: &str) -> Option<&VariableMapping> {
        self.mappings.iter().find(|m| m.name == name).map(|m| &m.mapping)
    }

    /// Like [`SavedMappings::get`], but a missing name is an error naming it
    pub fn require(&self, name: &str) -> ThemeResult<&VariableMapping> {
        self.get(name).ok_or_else(|| ThemeError::MappingNotFound {
            name: name.to_string(),
        })
    }

    /// Save under `name`, replacing an entry with the same name; the entry moves to the end
    pub fn upsert(&mut self, name: &str, mapping: VariableMapping) -> ThemeResult<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ThemeError::MappingNameRequired);
        }
        self.mappings.retain(|m| m.name != name);
        self.mappings.push(SavedMapping {
            name: name.to_string(),
            mapping,
        });
        Ok(())
    }

    pub fn remove(&mut self, name: &str) -> Option<SavedMapping> {
        let index = self.mappings.iter().position(|m| m.name == name)?;
        Some(self.mappings.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_keeps_declaration_order() {
        let mapping = VariableMapping::parse(r#"{ "--z": "--a", "--b": "--y", "--m": "--m" }"#).unwrap();
        let targets: Vec<&str> = mapping.iter().map(|(t, _)| t).collect();
        assert_eq!(targets, vec!["--z", "--b", "--m"]);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(matches!(VariableMapping::parse("  "), Err(ThemeError::MappingRequired)));
        assert!(matches!(VariableMapping::parse("{ nope"), Err(ThemeError::InvalidJson)));
        assert!(matches!(VariableMapping::parse("[]"), Err(ThemeError::InvalidMappingFormat)));
        assert!(matches!(VariableMapping::parse("\"x\""), Err(ThemeError::InvalidMappingFormat)));
        assert!(matches!(
            VariableMapping::parse(r#"{ "--a": 3 }"#),
            Err(ThemeError::InvalidMappingFormat)
        ));
    }

    #[test]
    fn test_default_mapping_round_trips_through_json() {
        let mapping = default_mapping();
        assert_eq!(mapping.len(), 8);
        let parsed = VariableMapping::parse(&mapping.to_json_pretty().unwrap()).unwrap();
        assert_eq!(parsed, mapping);
    }

    #[test]
    fn test_saved_mappings_upsert_and_remove() {
        let mut saved = SavedMappings::new();
        saved.upsert("brand", default_mapping()).unwrap();
        saved.upsert("small", VariableMapping::new().with_pair("--a", "--b")).unwrap();
        saved.upsert(" brand ", VariableMapping::new()).unwrap();

        let names: Vec<&str> = saved.mappings().iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["small", "brand"]);
        assert!(saved.get("brand").unwrap().is_empty());

        assert!(matches!(
            saved.upsert("  ", VariableMapping::new()),
            Err(ThemeError::MappingNameRequired)
        ));
        assert!(saved.remove("small").is_some());
        assert!(saved.remove("small").is_none());

        let err = saved.require("small").unwrap_err();
        assert!(matches!(&err, ThemeError::MappingNotFound { name } if name == "small"));
        assert_eq!(err.to_string(), "No saved mapping named 'small'");
        assert!(saved.require("brand").is_ok());
    }

    #[test]
    fn test_saved_mappings_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state").join("mappings.json");
        assert!(SavedMappings::load(&path).unwrap().mappings().is_empty());

        let mut saved = SavedMappings::new();
        saved.upsert("default", default_mapping()).unwrap();
        saved.save(&path).unwrap();

        assert_eq!(SavedMappings::load(&path).unwrap(), saved);
    }
}
