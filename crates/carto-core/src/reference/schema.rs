//! JSON-backed reference schema

use super::{PropertySpec, Reference};
use crate::error::CartoError;
use crate::result::Result;
use indexmap::IndexMap;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct RawSchema {
    symbolizers: IndexMap<String, IndexMap<String, PropertySpec>>,
    #[serde(default)]
    filter: Option<RawFilter>,
}

#[derive(Debug, Deserialize)]
struct RawFilter {
    value: Vec<String>,
}

/// A property together with where it lives in the reference
#[derive(Debug, Clone)]
pub struct SchemaEntry {
    pub symbolizer: String,
    pub xml_name: String,
    pub spec: PropertySpec,
}

/// Reference loaded from the renderer's JSON property document
#[derive(Debug, Clone, Default)]
pub struct ReferenceSchema {
    entries: IndexMap<String, SchemaEntry>,
    filter_keywords: Option<Vec<String>>,
}

impl ReferenceSchema {
    pub fn from_json(source: &str) -> Result<Self> {
        let raw: RawSchema = serde_json::from_str(source)?;
        let mut entries = IndexMap::new();

        for (symbolizer, properties) in raw.symbolizers {
            for (xml_name, spec) in properties {
                if spec.css.is_empty() {
                    return Err(CartoError::schema_error(format!(
                        "property '{xml_name}' of symbolizer '{symbolizer}' has no css name"
                    )));
                }
                // First declaration wins when two symbolizers share a name
                if entries.contains_key(&spec.css) {
                    continue;
                }
                entries.insert(
                    spec.css.clone(),
                    SchemaEntry {
                        symbolizer: symbolizer.clone(),
                        xml_name,
                        spec,
                    },
                );
            }
        }

        debug!("Loaded reference schema with {} properties", entries.len());
        Ok(Self {
            entries,
            filter_keywords: raw.filter.map(|f| f.value),
        })
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path).map_err(|e| CartoError::io_error(path, e))?;
        Self::from_json(&source)
    }

    pub fn entry(&self, css: &str) -> Option<&SchemaEntry> {
        self.entries.get(css)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Reference for ReferenceSchema {
    fn property(&self, css: &str) -> Option<&PropertySpec> {
        self.entries.get(css).map(|entry| &entry.spec)
    }

    fn property_names(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    fn filter_keywords(&self) -> Option<&[String]> {
        self.filter_keywords.as_deref()
    }

    fn symbolizer(&self, css: &str) -> Option<&str> {
        self.entries.get(css).map(|entry| entry.symbolizer.as_str())
    }

    fn selector_name(&self, css: &str) -> Option<&str> {
        self.entries.get(css).map(|entry| entry.xml_name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::{PropertyType, Status};

    const SCHEMA: &str = r#"{
        "symbolizers": {
            "line": {
                "stroke-width": { "css": "line-width", "type": "float" },
                "stroke-linecap": { "css": "line-cap", "type": ["butt", "round", "square"] },
                "smooth": { "css": "line-smooth", "type": "float", "status": "experimental" }
            },
            "text": {
                "face-name": { "css": "text-face-name", "type": "string", "validate": "font" }
            }
        },
        "filter": { "value": ["true", "false", "null"] }
    }"#;

    #[test]
    fn test_load_schema() {
        let schema = ReferenceSchema::from_json(SCHEMA).unwrap();
        assert_eq!(schema.len(), 4);
        assert_eq!(schema.symbolizer("line-cap"), Some("line"));
        assert_eq!(schema.selector_name("line-width"), Some("stroke-width"));
        assert_eq!(schema.selector_status("line-smooth"), Status::Experimental);
        assert!(schema.is_font("text-face-name"));
        assert_eq!(schema.filter_keywords().unwrap().len(), 3);
        assert!(matches!(
            schema.property("line-cap").unwrap().kind,
            PropertyType::Keywords(_)
        ));
    }

    #[test]
    fn test_expected_type() {
        let schema = ReferenceSchema::from_json(SCHEMA).unwrap();
        assert_eq!(
            schema.expected_type("line-cap").unwrap(),
            "keyword (options: butt, round, square)"
        );
        assert_eq!(schema.expected_type("text-face-name").unwrap(), "font");
        assert_eq!(schema.expected_type("line-width").unwrap(), "float");
    }

    #[test]
    fn test_closest_selector() {
        let schema = ReferenceSchema::from_json(SCHEMA).unwrap();
        assert_eq!(schema.closest_selector("line-widht"), Some(("line-width", 2)));
    }

    #[test]
    fn test_malformed_schema() {
        let error = ReferenceSchema::from_json(r#"{ "symbolizers": 3 }"#).unwrap_err();
        assert!(matches!(error, CartoError::Json(_)));
    }
}
