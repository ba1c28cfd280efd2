//! `@name` references

use super::{Node, OwnerRef};
use crate::cascade;
use crate::diagnostics::Location;
use crate::env::Env;
use std::cell::OnceCell;

/// A variable reference, resolved through the cascade on first evaluation
///
/// The resolved value is cached on the node. The cache is only meaningful
/// within the environment that filled it: every syntactic occurrence gets its
/// own `Variable`, and a tree is evaluated once per pass.
#[derive(Debug, Clone)]
pub struct Variable {
    /// Name including the `@` sigil
    pub name: String,
    pub index: usize,
    pub filename: Option<String>,
    owner: Option<OwnerRef>,
    resolved: OnceCell<Box<Node>>,
}

impl Variable {
    pub fn new(name: impl Into<String>, index: usize, filename: Option<&str>) -> Self {
        Self {
            name: name.into(),
            index,
            filename: filename.map(str::to_string),
            owner: None,
            resolved: OnceCell::new(),
        }
    }

    /// The rule or selector this reference appears in
    pub fn owner(&self) -> Option<OwnerRef> {
        self.owner
    }

    pub fn set_owner_rule(&mut self, owner: OwnerRef) {
        self.owner = Some(owner);
    }

    pub fn location(&self) -> Location {
        Location::new(self.filename.as_deref(), self.index)
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved.get().is_some()
    }

    pub fn evaluate(&self, env: &mut Env<'_>) -> Node {
        if let Some(resolved) = self.resolved.get() {
            return (**resolved).clone();
        }
        let resolved = cascade::resolve_variable(self, env);
        // A reference that re-entered itself through a cycle may already have
        // stored the undefined sentinel; keep whichever landed first.
        let _ = self.resolved.set(Box::new(resolved.clone()));
        resolved
    }
}

/// Identity is the reference itself, not whether it has been resolved yet
impl PartialEq for Variable {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.index == other.index && self.filename == other.filename
    }
}

impl From<Variable> for Node {
    fn from(variable: Variable) -> Self {
        Node::Variable(variable)
    }
}
