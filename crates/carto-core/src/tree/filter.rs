//! Feature filters (`[population > 1000]`) and their translation into
//! renderer expression syntax

use super::{Node, NodeKind, OwnerRef};
use crate::diagnostics::{DiagnosticCode, Location};
use crate::env::Env;
use crate::error::CartoError;
use std::fmt;
use std::str::FromStr;

/// Comparison operators allowed in a filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterOp {
    Lt,
    Gt,
    Le,
    Ge,
    Eq,
    Ne,
    Match,
}

/// Which right-hand operands an operator accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperandClass {
    Numeric,
    String,
    Both,
}

impl FilterOp {
    pub fn as_str(self) -> &'static str {
        match self {
            FilterOp::Lt => "<",
            FilterOp::Gt => ">",
            FilterOp::Le => "<=",
            FilterOp::Ge => ">=",
            FilterOp::Eq => "=",
            FilterOp::Ne => "!=",
            FilterOp::Match => "=~",
        }
    }

    /// XML-safe infix placed between the operands
    pub fn xml_infix(self) -> &'static str {
        match self {
            FilterOp::Lt => " &lt; ",
            FilterOp::Gt => " &gt; ",
            FilterOp::Le => " &lt;= ",
            FilterOp::Ge => " &gt;= ",
            FilterOp::Eq => " = ",
            FilterOp::Ne => " != ",
            FilterOp::Match => ".match(",
        }
    }

    pub fn suffix(self) -> &'static str {
        match self {
            FilterOp::Match => ")",
            _ => "",
        }
    }

    pub fn operand_class(self) -> OperandClass {
        match self {
            FilterOp::Lt | FilterOp::Gt | FilterOp::Le | FilterOp::Ge => OperandClass::Numeric,
            FilterOp::Eq | FilterOp::Ne => OperandClass::Both,
            FilterOp::Match => OperandClass::String,
        }
    }
}

impl FromStr for FilterOp {
    type Err = CartoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "<" => Ok(FilterOp::Lt),
            ">" => Ok(FilterOp::Gt),
            "<=" => Ok(FilterOp::Le),
            ">=" => Ok(FilterOp::Ge),
            "=" => Ok(FilterOp::Eq),
            "!=" => Ok(FilterOp::Ne),
            "=~" => Ok(FilterOp::Match),
            other => Err(CartoError::invalid_operator(other)),
        }
    }
}

impl fmt::Display for FilterOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `key OP val` condition attached to a selector
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub key: Node,
    pub op: FilterOp,
    pub val: Node,
    pub index: usize,
    pub filename: Option<String>,
    id: String,
}

impl Filter {
    pub fn new(key: Node, op: FilterOp, val: Node, index: usize, filename: Option<&str>) -> Self {
        let id = format!("{}{}{}", key.to_text(), op, val.to_text());
        Self {
            key,
            op,
            val,
            index,
            filename: filename.map(str::to_string),
            id,
        }
    }

    /// Build a filter from the operator's source text
    pub fn parse(
        key: Node,
        op: &str,
        val: Node,
        index: usize,
        filename: Option<&str>,
    ) -> crate::Result<Self> {
        Ok(Self::new(key, op.parse()?, val, index, filename))
    }

    /// `key + op + val`, used by callers to deduplicate filters
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn location(&self) -> Location {
        Location::new(self.filename.as_deref(), self.index)
    }

    /// New filter with both operands evaluated
    pub fn evaluate(&self, env: &mut Env<'_>) -> Filter {
        let key = self.key.evaluate(env);
        let val = self.val.evaluate(env);
        Filter::new(key, self.op, val, self.index, self.filename.as_deref())
    }

    /// Renderer expression text for this condition
    ///
    /// Operand problems are reported to the environment and never stop the
    /// translation; the best-effort text is always returned.
    pub fn to_xml(&self, env: &mut Env<'_>) -> String {
        let key = self.key.evaluate(env);
        let val = self.val.evaluate(env);

        if let Some(keywords) = env.reference().filter_keywords() {
            for operand in [&key, &val] {
                if operand.kind() != NodeKind::Keyword {
                    continue;
                }
                let text = operand.to_text();
                if !keywords.iter().any(|keyword| *keyword == text) {
                    env.error(
                        DiagnosticCode::InvalidFilterKeyword,
                        format!("{text} is not a valid keyword in a filter expression"),
                        self.location(),
                    );
                }
            }
        }

        let key_text = key.to_text();
        let val_text = val.filter_text();

        let mismatched = match self.op.operand_class() {
            OperandClass::Numeric => !is_numeric(&val_text) && val.kind() != NodeKind::Field,
            OperandClass::String => !val_text.starts_with('\''),
            OperandClass::Both => false,
        };
        if mismatched {
            env.error(
                DiagnosticCode::InvalidFilterOperand,
                format!("Cannot use operator \"{}\" with value {}", self.op, val),
                self.location(),
            );
        }

        format!(
            "{}{}{}{}",
            key_text,
            self.op.xml_infix(),
            val_text,
            self.op.suffix()
        )
    }

    pub fn set_owner_rule(&mut self, owner: OwnerRef) {
        self.key.set_owner_rule(owner);
        self.val.set_owner_rule(owner);
    }
}

fn is_numeric(text: &str) -> bool {
    text.trim()
        .parse::<f64>()
        .map(|number| number.is_finite())
        .unwrap_or(false)
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.id)
    }
}

impl From<Filter> for Node {
    fn from(filter: Filter) -> Self {
        Node::Filter(Box::new(filter))
    }
}
