//! Named raster post-processing filters (`agg-stack-blur(2,2)`, `gray`)

use super::{Node, OwnerRef};
use crate::env::Env;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct ImageFilter {
    pub name: String,
    pub args: Option<Vec<Node>>,
}

impl ImageFilter {
    pub fn new(name: impl Into<String>, args: Option<Vec<Node>>) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }

    pub fn arity(&self) -> usize {
        self.args.as_ref().map_or(0, Vec::len)
    }

    pub fn evaluate(&self, env: &mut Env<'_>) -> ImageFilter {
        ImageFilter {
            name: self.name.clone(),
            args: self
                .args
                .as_ref()
                .map(|args| args.iter().map(|arg| arg.evaluate(env)).collect()),
        }
    }

    pub fn set_owner_rule(&mut self, owner: OwnerRef) {
        for arg in self.args.iter_mut().flatten() {
            arg.set_owner_rule(owner);
        }
    }
}

impl fmt::Display for ImageFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.args {
            Some(args) => {
                let args: Vec<String> = args.iter().map(Node::to_text).collect();
                write!(f, "{}({})", self.name, args.join(","))
            }
            None => f.write_str(&self.name),
        }
    }
}

impl From<ImageFilter> for Node {
    fn from(image_filter: ImageFilter) -> Self {
        Node::ImageFilter(image_filter)
    }
}
