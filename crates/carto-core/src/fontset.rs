//! Font-set registrar
//!
//! A text property given a stack of faces (`text-face-name: "A", "B"`) cannot
//! be written as a single attribute; the faces are registered as a named
//! `<FontSet>` and the rule refers to it by name instead.

use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontSet {
    pub name: String,
    pub faces: Vec<String>,
}

impl FontSet {
    pub fn to_xml(&self) -> String {
        let fonts: Vec<String> = self
            .faces
            .iter()
            .map(|face| format!("  <Font face-name=\"{face}\"/>"))
            .collect();
        format!(
            "<FontSet name=\"{}\">\n{}\n</FontSet>",
            self.name,
            fonts.join("\n")
        )
    }
}

/// Deduplicating registry of font sets for one compilation pass
#[derive(Debug, Default)]
pub struct FontSetRegistry {
    sets: Vec<FontSet>,
    by_key: HashMap<String, usize>,
}

impl FontSetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the set for `faces`, creating `fontset-<n>` on first use
    pub fn register(&mut self, faces: Vec<String>) -> &FontSet {
        let key = faces.join("\u{1f}");
        let position = match self.by_key.get(&key) {
            Some(&position) => position,
            None => {
                let position = self.sets.len();
                let name = format!("fontset-{position}");
                tracing::debug!("Registering {} for {:?}", name, faces);
                self.sets.push(FontSet { name, faces });
                self.by_key.insert(key, position);
                position
            }
        };
        &self.sets[position]
    }

    pub fn fontsets(&self) -> &[FontSet] {
        &self.sets
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}
