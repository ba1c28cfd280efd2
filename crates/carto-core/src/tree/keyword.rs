//! Bare identifiers

use super::{Node, NodeKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keyword {
    pub text: String,
}

impl Keyword {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// `transparent` is a color, `true`/`false` are booleans
    pub fn kind(&self) -> NodeKind {
        match self.text.as_str() {
            "transparent" => NodeKind::Color,
            "true" | "false" => NodeKind::Boolean,
            _ => NodeKind::Keyword,
        }
    }
}

impl From<Keyword> for Node {
    fn from(keyword: Keyword) -> Self {
        Node::Keyword(keyword)
    }
}
