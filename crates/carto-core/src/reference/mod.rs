//! Property reference: what the validator knows about each property
//!
//! The evaluator never reads schema data directly. It goes through the
//! [`Reference`] trait, which answers the handful of questions the validator
//! and filter translator ask: is this a property, what type does it take,
//! what is it called in the XML output, which symbolizer owns it.
//!
//! [`ReferenceSchema`] implements the trait over the JSON reference document.
//! Tests and embedders with their own schema source can implement the
//! required methods and inherit the rest.

mod schema;

pub use schema::{ReferenceSchema, SchemaEntry};

use crate::tree::{Node, NodeKind, Value};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Stability of a property
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Stable,
    Deprecated,
    Unstable,
    Experimental,
}

/// Declared type of a property
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyType {
    /// Enumeration of allowed keywords
    Keywords(Vec<String>),
    /// Named type: `float`, `color`, `numbers`, `unsigned`, `functions`, ...
    Named(String),
}

/// One property from the reference
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PropertySpec {
    /// Name used in stylesheets
    pub css: String,
    #[serde(rename = "type")]
    pub kind: PropertyType,
    #[serde(default)]
    pub status: Status,
    /// Name of an externally supplied validation table (e.g. `font`)
    #[serde(default)]
    pub validate: Option<String>,
    /// Accepts renderer expressions, so any value passes
    #[serde(default)]
    pub expression: bool,
    /// Allowed image filter functions with their argument count, `-1` for any
    #[serde(default)]
    pub functions: Vec<(String, i32)>,
    #[serde(default)]
    pub default_value: Option<serde_json::Value>,
    #[serde(default)]
    pub doc: Option<String>,
}

/// Externally supplied value tables, keyed by the `validate` name of a
/// property (currently only `font`)
#[derive(Debug, Clone, Default)]
pub struct ValidationData {
    tables: HashMap<String, HashSet<String>>,
}

impl ValidationData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Known font faces for properties validated as `font`
    pub fn with_fonts<I, S>(mut self, fonts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tables
            .insert("font".to_string(), fonts.into_iter().map(Into::into).collect());
        self
    }

    pub fn table(&self, name: &str) -> Option<&HashSet<String>> {
        self.tables.get(name)
    }
}

/// Read-only view of the property reference
pub trait Reference {
    /// Property by stylesheet name
    fn property(&self, css: &str) -> Option<&PropertySpec>;

    /// Every known stylesheet name, in declaration order
    fn property_names(&self) -> Vec<&str>;

    /// Keywords allowed as filter operands, when the reference restricts them
    fn filter_keywords(&self) -> Option<&[String]>;

    /// Symbolizer that owns a property
    fn symbolizer(&self, css: &str) -> Option<&str>;

    /// Canonical XML attribute name of a property
    fn selector_name(&self, css: &str) -> Option<&str>;

    fn is_valid_selector(&self, css: &str) -> bool {
        self.property(css).is_some()
    }

    fn selector_status(&self, css: &str) -> Status {
        self.property(css).map(|p| p.status).unwrap_or_default()
    }

    fn is_font(&self, css: &str) -> bool {
        self.property(css)
            .and_then(|p| p.validate.as_deref())
            .is_some_and(|v| v == "font")
    }

    fn edit_distance(&self, a: &str, b: &str) -> usize {
        edit_distance(a, b)
    }

    /// Nearest known name and its distance
    ///
    /// Ties go to the name declared first.
    fn closest_selector(&self, css: &str) -> Option<(&str, usize)> {
        let mut best: Option<(&str, usize)> = None;
        for name in self.property_names() {
            let distance = self.edit_distance(css, name);
            if best.is_none_or(|(_, d)| distance < d) {
                best = Some((name, distance));
            }
        }
        best
    }

    /// Type description used in invalid-value messages
    fn expected_type(&self, css: &str) -> Option<String> {
        let property = self.property(css)?;
        if let Some(validate) = &property.validate {
            return Some(validate.clone());
        }
        Some(match &property.kind {
            PropertyType::Keywords(options) => {
                format!("keyword (options: {})", options.join(", "))
            }
            PropertyType::Named(name) => name.clone(),
        })
    }

    /// Whether an evaluated value fits a property's declared type
    fn valid_value(&self, css: &str, value: &Value, validation: &ValidationData) -> bool {
        let Some(property) = self.property(css) else {
            return false;
        };
        let Some(first) = value.first() else {
            return false;
        };

        // Already reported when the variable failed to resolve
        if first.kind() == NodeKind::Undefined {
            return true;
        }

        if first.kind() == NodeKind::Keyword {
            return match &property.kind {
                PropertyType::Keywords(options) => options.iter().any(|o| *o == first.to_text()),
                PropertyType::Named(name) => name == "keyword",
            };
        }

        match &property.kind {
            PropertyType::Named(name) if name == "numbers" => {
                return value.components().iter().all(|c| c.kind() == NodeKind::Float);
            }
            PropertyType::Named(name) if name == "unsigned" => {
                return matches!(first, Node::Dimension(d) if d.value >= 0.0);
            }
            PropertyType::Named(name) if name == "functions" => {
                if first.kind() == NodeKind::String {
                    return true;
                }
                return value.components().iter().all(|c| match c {
                    Node::ImageFilter(image_filter) => {
                        property.functions.iter().any(|(name, arity)| {
                            *name == image_filter.name
                                && (*arity == -1 || *arity as usize == image_filter.arity())
                        })
                    }
                    _ => false,
                });
            }
            _ => {}
        }

        if property.expression {
            return true;
        }

        if let Some(validate) = &property.validate {
            let Some(table) = validation.table(validate) else {
                return true;
            };
            let expected = match &property.kind {
                PropertyType::Named(name) => name.as_str(),
                PropertyType::Keywords(_) => "keyword",
            };
            return value
                .components()
                .iter()
                .any(|c| c.kind().as_str() == expected && table.contains(&c.to_text()));
        }

        match &property.kind {
            PropertyType::Named(name) => name == first.kind().as_str(),
            PropertyType::Keywords(_) => false,
        }
    }
}

/// Levenshtein distance over characters
pub fn edit_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let mut previous: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        current[0] = i;
        for j in 1..=b.len() {
            let cost = usize::from(a[i - 1] != b[j - 1]);
            current[j] = (previous[j] + 1)
                .min(current[j - 1] + 1)
                .min(previous[j - 1] + cost);
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[b.len()]
}
