//! Column references and pre-rendered literals

use super::Node;
use std::fmt;

/// Reference to a data column, resolved by the renderer per feature
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
}

impl Field {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.name)
    }
}

/// Text already in renderer syntax, e.g. the result of `[name] + ' x'`
///
/// Kept apart from [`Field`] so it is neither bracketed nor re-quoted, while
/// still reporting as a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Literal {
    pub text: String,
}

impl Literal {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl From<Field> for Node {
    fn from(field: Field) -> Self {
        Node::Field(field)
    }
}

impl From<Literal> for Node {
    fn from(literal: Literal) -> Self {
        Node::Literal(literal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_is_bracketed() {
        assert_eq!(Node::from(Field::new("NAME")).to_text(), "[NAME]");
    }

    #[test]
    fn test_literal_is_verbatim() {
        assert_eq!(Node::from(Literal::new("[NAME] + 'x'")).to_text(), "[NAME] + 'x'");
    }
}
