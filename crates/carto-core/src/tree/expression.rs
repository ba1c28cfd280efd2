//! Space-separated sequence of nodes

use super::{Node, OwnerRef, Rendered};
use crate::env::Env;

#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    pub elements: Vec<Node>,
}

impl Expression {
    pub fn new(elements: Vec<Node>) -> Self {
        Self { elements }
    }

    /// A single-element expression evaluates to that element; longer ones
    /// evaluate every element and rewrap.
    pub fn evaluate(&self, env: &mut Env<'_>) -> Node {
        match self.elements.as_slice() {
            [single] => single.evaluate(env),
            elements => Node::Expression(Expression::new(
                elements.iter().map(|e| e.evaluate(env)).collect(),
            )),
        }
    }

    /// Space-joined when every element renders to a single string, otherwise
    /// the per-element renderings are returned unjoined so multi-component
    /// values survive.
    pub fn stringify(&self) -> Rendered {
        let parts: Vec<Rendered> = self.elements.iter().map(Node::stringify).collect();
        if parts.iter().all(Rendered::is_scalar) {
            let joined: Vec<&str> = parts.iter().filter_map(Rendered::as_scalar).collect();
            Rendered::Scalar(joined.join(" "))
        } else {
            Rendered::List(parts)
        }
    }

    pub fn set_owner_rule(&mut self, owner: OwnerRef) {
        for element in &mut self.elements {
            element.set_owner_rule(owner);
        }
    }
}

impl From<Expression> for Node {
    fn from(expression: Expression) -> Self {
        Node::Expression(expression)
    }
}
