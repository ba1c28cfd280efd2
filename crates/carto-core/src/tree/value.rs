//! Declaration values and terminal literals

use super::{Node, OwnerRef, Rendered};
use crate::env::Env;
use std::fmt;

/// Comma-separated list of components: the right-hand side of a declaration
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Value {
    pub components: Vec<Node>,
}

impl Value {
    pub fn new(components: Vec<Node>) -> Self {
        Self { components }
    }

    pub fn components(&self) -> &[Node] {
        &self.components
    }

    pub fn first(&self) -> Option<&Node> {
        self.components.first()
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn evaluate(&self, env: &mut Env<'_>) -> Value {
        Value::new(self.components.iter().map(|c| c.evaluate(env)).collect())
    }

    /// Use as a node, collapsing a single component to itself
    pub fn into_node(mut self) -> Node {
        if self.components.len() == 1 {
            self.components.remove(0)
        } else {
            Node::Value(self)
        }
    }

    pub fn stringify(&self) -> Rendered {
        match self.components.as_slice() {
            [] => Rendered::Scalar(String::new()),
            [single] => single.stringify(),
            components => Rendered::List(components.iter().map(Node::stringify).collect()),
        }
    }

    pub fn to_text(&self) -> String {
        self.stringify().to_string()
    }

    /// Components rendered and joined with `separator`
    pub fn join(&self, separator: &str) -> String {
        let parts: Vec<String> = self.components.iter().map(Node::to_text).collect();
        parts.join(separator)
    }

    pub fn set_owner_rule(&mut self, owner: OwnerRef) {
        for component in &mut self.components {
            component.set_owner_rule(owner);
        }
    }
}

impl From<Node> for Value {
    fn from(node: Node) -> Self {
        match node {
            Node::Value(value) => value,
            other => Value::new(vec![other]),
        }
    }
}

impl From<Value> for Node {
    fn from(value: Value) -> Self {
        Node::Value(value)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.stringify())
    }
}

/// String literal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quoted {
    pub text: String,
}

impl Quoted {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// XML-escaped text, suitable for an attribute value
    pub fn escaped(&self) -> String {
        self.text
            .replace('&', "&amp;")
            .replace('"', "&quot;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
    }

    /// Single-quoted form for renderer expressions
    pub fn quoted(&self) -> String {
        format!("'{}'", self.escaped().replace('\'', "\\'"))
    }
}

impl From<Quoted> for Node {
    fn from(quoted: Quoted) -> Self {
        Node::Quoted(quoted)
    }
}

/// Numeric literal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dimension {
    pub value: f64,
}

impl Dimension {
    pub fn new(value: f64) -> Self {
        Self { value }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl From<Dimension> for Node {
    fn from(dimension: Dimension) -> Self {
        Node::Dimension(dimension)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub rgb: [u8; 3],
    pub alpha: f64,
}

impl Color {
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self {
            rgb: [r, g, b],
            alpha: 1.0,
        }
    }

    pub fn rgba(r: u8, g: u8, b: u8, alpha: f64) -> Self {
        Self {
            rgb: [r, g, b],
            alpha: alpha.clamp(0.0, 1.0),
        }
    }

    /// Parse `#rgb` or `#rrggbb`
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        let channel = |s: &str| u8::from_str_radix(s, 16).ok();
        match digits.len() {
            3 => {
                let mut rgb = [0u8; 3];
                for (slot, c) in rgb.iter_mut().zip(digits.chars()) {
                    let value = channel(&c.to_string())?;
                    *slot = value * 17;
                }
                Some(Self { rgb, alpha: 1.0 })
            }
            6 => Some(Self::rgb(
                channel(digits.get(0..2)?)?,
                channel(digits.get(2..4)?)?,
                channel(digits.get(4..6)?)?,
            )),
            _ => None,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.rgb;
        if self.alpha < 1.0 {
            write!(f, "rgba({r}, {g}, {b}, {})", self.alpha)
        } else {
            write!(f, "#{r:02x}{g:02x}{b:02x}")
        }
    }
}

impl From<Color> for Node {
    fn from(color: Color) -> Self {
        Node::Color(color)
    }
}
