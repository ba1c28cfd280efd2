//! `url(...)` values

use super::Node;
use crate::env::Env;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub struct Url {
    pub value: Box<Node>,
    /// Search paths the loader resolved for this reference
    pub paths: Vec<PathBuf>,
}

impl Url {
    pub fn new(value: impl Into<Node>, paths: Vec<PathBuf>) -> Self {
        Self {
            value: Box::new(value.into()),
            paths,
        }
    }

    pub fn evaluate(&self, env: &mut Env<'_>) -> Url {
        Url {
            value: Box::new(self.value.evaluate(env)),
            paths: self.paths.clone(),
        }
    }
}

impl From<Url> for Node {
    fn from(url: Url) -> Self {
        Node::Url(url)
    }
}
