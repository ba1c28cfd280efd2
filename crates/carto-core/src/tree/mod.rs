//! Node model for style values
//!
//! Every value the parser produces is a [`Node`]. All variants share the same
//! three capabilities, dispatched by exhaustive matching:
//!
//! - [`Node::evaluate`] returns a new node with variables resolved. The input
//!   is left untouched, except that a [`Variable`] memoizes its first
//!   resolution.
//! - [`Node::stringify`] renders the node for the renderer, either as a single
//!   string or, for comma-separated lists, as a structured sequence.
//! - [`Node::set_owner_rule`] hands every descendant a non-owning
//!   [`OwnerRef`] to the rule or selector that contains it. Only variables
//!   read it, to find their consuming site during cascade resolution.
//!
//! Rules, rulesets and selectors live in the [`StyleTree`] arena and refer to
//! each other by handle.

mod expression;
mod field;
mod filter;
mod image_filter;
mod keyword;
mod rule;
mod style_tree;
mod url;
mod value;
mod variable;

pub use expression::Expression;
pub use field::{Field, Literal};
pub use filter::{Filter, FilterOp, OperandClass};
pub use image_filter::ImageFilter;
pub use keyword::Keyword;
pub use rule::{DEFAULT_INSTANCE, Rule, WILDCARD_SYMBOLIZER};
pub use style_tree::{Element, RuleId, Ruleset, RulesetId, Selector, SelectorRef, StyleTree};
pub use url::Url;
pub use value::{Color, Dimension, Quoted, Value};
pub use variable::Variable;

use crate::env::Env;
use std::fmt;

/// A style value or expression
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Expression(Expression),
    Field(Field),
    Filter(Box<Filter>),
    ImageFilter(ImageFilter),
    Keyword(Keyword),
    Literal(Literal),
    Url(Url),
    Variable(Variable),
    Value(Value),
    Quoted(Quoted),
    Dimension(Dimension),
    Color(Color),
    /// Stand-in for a variable that could not be resolved
    Undefined,
}

/// The type a node reports to schema checks and diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Expression,
    Field,
    Filter,
    ImageFilter,
    Keyword,
    Color,
    Boolean,
    Uri,
    Variable,
    String,
    Float,
    Value,
    Undefined,
}

/// Result of stringifying a node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered {
    Scalar(String),
    /// Multi-component value kept unjoined, e.g. a font stack
    List(Vec<Rendered>),
}

/// Non-owning back-reference from a node to the construct that contains it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OwnerRef {
    /// A declaration (`line-width: @w;`)
    Rule(RuleId),
    /// A selector, for variables used inside its filters
    Selector(SelectorRef),
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Expression(_) => NodeKind::Expression,
            // A literal is the product of combining a field with something
            // else and keeps reporting as a field.
            Node::Field(_) | Node::Literal(_) => NodeKind::Field,
            Node::Filter(_) => NodeKind::Filter,
            Node::ImageFilter(_) => NodeKind::ImageFilter,
            Node::Keyword(keyword) => keyword.kind(),
            Node::Url(_) => NodeKind::Uri,
            Node::Variable(_) => NodeKind::Variable,
            Node::Value(_) => NodeKind::Value,
            Node::Quoted(_) => NodeKind::String,
            Node::Dimension(_) => NodeKind::Float,
            Node::Color(_) => NodeKind::Color,
            Node::Undefined => NodeKind::Undefined,
        }
    }

    pub fn evaluate(&self, env: &mut Env<'_>) -> Node {
        match self {
            Node::Expression(expression) => expression.evaluate(env),
            Node::Filter(filter) => Node::Filter(Box::new(filter.evaluate(env))),
            Node::ImageFilter(image_filter) => Node::ImageFilter(image_filter.evaluate(env)),
            Node::Url(url) => Node::Url(url.evaluate(env)),
            Node::Variable(variable) => variable.evaluate(env),
            Node::Value(value) => value.evaluate(env).into_node(),
            Node::Field(_)
            | Node::Keyword(_)
            | Node::Literal(_)
            | Node::Quoted(_)
            | Node::Dimension(_)
            | Node::Color(_)
            | Node::Undefined => self.clone(),
        }
    }

    pub fn stringify(&self) -> Rendered {
        match self {
            Node::Expression(expression) => expression.stringify(),
            Node::Value(value) => value.stringify(),
            Node::Url(url) => url.value.stringify(),
            Node::Field(field) => Rendered::Scalar(field.to_string()),
            Node::Filter(filter) => Rendered::Scalar(filter.to_string()),
            Node::ImageFilter(image_filter) => Rendered::Scalar(image_filter.to_string()),
            Node::Keyword(keyword) => Rendered::Scalar(keyword.text.clone()),
            Node::Literal(literal) => Rendered::Scalar(literal.text.clone()),
            Node::Variable(variable) => Rendered::Scalar(variable.name.clone()),
            Node::Quoted(quoted) => Rendered::Scalar(quoted.escaped()),
            Node::Dimension(dimension) => Rendered::Scalar(dimension.to_string()),
            Node::Color(color) => Rendered::Scalar(color.to_string()),
            Node::Undefined => Rendered::Scalar("undefined".to_string()),
        }
    }

    /// Stringified form flattened to one string
    pub fn to_text(&self) -> String {
        self.stringify().to_string()
    }

    /// Text used on the right-hand side of a filter: strings are quoted
    pub fn filter_text(&self) -> String {
        match self {
            Node::Quoted(quoted) => quoted.quoted(),
            _ => self.to_text(),
        }
    }

    pub fn set_owner_rule(&mut self, owner: OwnerRef) {
        match self {
            Node::Expression(expression) => expression.set_owner_rule(owner),
            Node::Filter(filter) => filter.set_owner_rule(owner),
            Node::ImageFilter(image_filter) => image_filter.set_owner_rule(owner),
            Node::Url(url) => url.value.set_owner_rule(owner),
            Node::Variable(variable) => variable.set_owner_rule(owner),
            Node::Value(value) => value.set_owner_rule(owner),
            Node::Field(_)
            | Node::Keyword(_)
            | Node::Literal(_)
            | Node::Quoted(_)
            | Node::Dimension(_)
            | Node::Color(_)
            | Node::Undefined => {}
        }
    }
}

impl Rendered {
    pub fn is_scalar(&self) -> bool {
        matches!(self, Rendered::Scalar(_))
    }

    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            Rendered::Scalar(text) => Some(text),
            Rendered::List(_) => None,
        }
    }
}

impl fmt::Display for Rendered {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rendered::Scalar(text) => f.write_str(text),
            Rendered::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                Ok(())
            }
        }
    }
}

impl NodeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Expression => "expression",
            NodeKind::Field => "field",
            NodeKind::Filter => "filter",
            NodeKind::ImageFilter => "imagefilter",
            NodeKind::Keyword => "keyword",
            NodeKind::Color => "color",
            NodeKind::Boolean => "boolean",
            NodeKind::Uri => "uri",
            NodeKind::Variable => "variable",
            NodeKind::String => "string",
            NodeKind::Float => "float",
            NodeKind::Value => "value",
            NodeKind::Undefined => "undefined",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.stringify())
    }
}
