//! Declarations: `line-width: 2;`, `a/line-color: red;`, `@w: 2;`

use super::{OwnerRef, RulesetId, Selector, Value};
use crate::diagnostics::{Diagnostic, DiagnosticCode, Location, Suggestion};
use crate::env::Env;
use crate::reference::{Reference, Status};
use crate::zoom::Zoom;
use std::fmt;
use std::rc::Rc;
use tracing::trace;

/// Instance name used when a declaration has no `instance/` prefix
pub const DEFAULT_INSTANCE: &str = "__default__";

/// Symbolizer assigned to variable declarations
pub const WILDCARD_SYMBOLIZER: &str = "*";

/// A single property/value or variable/value declaration
#[derive(Debug)]
pub struct Rule {
    /// Property name, last `/` segment of the declared name
    pub name: String,
    /// First `/` segment when the declared name has several, else [`DEFAULT_INSTANCE`]
    pub instance: String,
    pub value: Rc<Value>,
    pub index: usize,
    pub filename: Option<String>,
    /// Declared with the `@` sigil
    pub variable: bool,
    pub symbolizer: Option<String>,
    pub zoom: Zoom,
    pub parent: Option<RulesetId>,
    pub selectors: Option<Rc<Vec<Selector>>>,
}

impl Rule {
    /// Build a declaration, looking up its symbolizer in `reference`
    pub fn new(
        name: &str,
        value: impl Into<Value>,
        index: usize,
        filename: Option<&str>,
        reference: &dyn Reference,
    ) -> Self {
        let mut rule = Self::bare(name, value.into(), index, filename);
        if !rule.variable {
            rule.symbolizer = reference.symbolizer(&rule.name).map(str::to_string);
        }
        rule
    }

    /// Build a variable declaration; no schema lookup is needed
    pub fn variable(
        name: &str,
        value: impl Into<Value>,
        index: usize,
        filename: Option<&str>,
    ) -> Self {
        Self::bare(name, value.into(), index, filename)
    }

    fn bare(declared: &str, value: Value, index: usize, filename: Option<&str>) -> Self {
        let mut parts: Vec<&str> = declared.split('/').collect();
        let name = parts.pop().unwrap_or_default().to_string();
        let instance = if parts.is_empty() {
            DEFAULT_INSTANCE.to_string()
        } else {
            parts[0].to_string()
        };
        let variable = declared.starts_with('@');

        Self {
            name,
            instance,
            value: Rc::new(value),
            index,
            filename: filename.map(str::to_string),
            variable,
            symbolizer: variable.then(|| WILDCARD_SYMBOLIZER.to_string()),
            zoom: Zoom::ALL,
            parent: None,
            selectors: None,
        }
    }

    pub fn location(&self) -> Location {
        Location::new(self.filename.as_deref(), self.index)
    }

    /// `<zoom bits>#<instance>#<name>`
    pub fn id(&self) -> String {
        format!("{}#{}#{}", self.zoom.bits(), self.instance, self.name)
    }

    /// Shallow copy for instancing: shares the value and selectors, drops the
    /// parent link and zoom restriction
    pub fn clone_shallow(&self) -> Rule {
        Rule {
            name: self.name.clone(),
            instance: self.instance.clone(),
            value: Rc::clone(&self.value),
            index: self.index,
            filename: self.filename.clone(),
            variable: self.variable,
            symbolizer: self.symbolizer.clone(),
            zoom: Zoom::ALL,
            parent: None,
            selectors: self.selectors.clone(),
        }
    }

    /// Point every variable in the value at `owner`
    pub fn set_owner(&mut self, owner: OwnerRef) {
        Rc::make_mut(&mut self.value).set_owner_rule(owner);
    }

    /// A copy of this rule with its value evaluated
    pub fn ev(&self, env: &mut Env<'_>) -> Rule {
        trace!("Evaluating {}", self.name);
        // A lone variable holding a list (`@fonts: "A", "B"`) evaluates to a
        // single nested value; splice its components into the rule's own
        let value = Value::from(self.value.evaluate(env).into_node());
        Rule {
            name: self.name.clone(),
            instance: self.instance.clone(),
            value: Rc::new(value),
            index: self.index,
            filename: self.filename.clone(),
            variable: self.variable,
            symbolizer: self.symbolizer.clone(),
            zoom: self.zoom,
            parent: self.parent,
            selectors: self.selectors.clone(),
        }
    }

    /// Check this declaration against the reference schema, reporting every
    /// problem found. Warnings do not affect the result.
    pub fn validate(&self, env: &mut Env<'_>) -> bool {
        let reference = env.reference();

        if !self.variable && !reference.is_valid_selector(&self.name) {
            self.report_unrecognized(env);
            return false;
        }

        if let Some(message) = status_warning(&self.name, reference.selector_status(&self.name)) {
            env.report(Diagnostic::warning(
                DiagnosticCode::UnstableProperty,
                message,
                self.location(),
            ));
        }

        if self.variable || reference.valid_value(&self.name, &self.value, env.validation()) {
            return true;
        }

        let expected = reference.expected_type(&self.name).unwrap_or_default();
        let first_kind = self
            .value
            .first()
            .map(|node| node.kind().as_str())
            .unwrap_or("undefined");
        let first_is_string = first_kind == "string";

        let diagnostic = if expected == "font" && first_is_string {
            Diagnostic::error(
                DiagnosticCode::UnknownFont,
                format!(
                    "The font '{}' (specified as text-face-name) is not a known font on your system, \
                     please provide an existing font face name.",
                    self.value
                ),
                self.location(),
            )
        } else {
            Diagnostic::error(
                DiagnosticCode::InvalidValue,
                format!(
                    "Invalid value for {}, the type {} is expected. {} (of type {}) was given.",
                    self.name, expected, self.value, first_kind
                ),
                self.location(),
            )
        };
        env.report(diagnostic);
        false
    }

    fn report_unrecognized(&self, env: &mut Env<'_>) {
        let reference = env.reference();
        let threshold = env.config().suggestion_distance;
        let closest = reference
            .closest_selector(&self.name)
            .filter(|(_, distance)| *distance < threshold)
            .map(|(name, _)| name.to_string());

        let mut message = format!("Unrecognized rule: {}", self.name);
        if let Some(name) = &closest {
            message.push_str(&format!(". Did you mean {name}?"));
        }

        let mut diagnostic =
            Diagnostic::error(DiagnosticCode::UnrecognizedRule, message, self.location());
        if let Some(name) = closest {
            diagnostic = diagnostic.with_suggestion(Suggestion::new(
                format!("Did you mean {name}?"),
                name,
                false,
            ));
        }
        env.report(diagnostic);
    }

    /// Attribute text for this declaration
    ///
    /// Variables and invalid rules produce nothing. In `content` mode only the
    /// value is written, its components joined by `separator` (default `, `).
    pub fn to_xml(&self, env: &mut Env<'_>, content: bool, separator: Option<&str>) -> String {
        if !self.validate(env) || self.variable {
            return String::new();
        }

        let reference = env.reference();
        if reference.is_font(&self.name) && self.value.len() > 1 {
            let faces = self.value.components().iter().map(|c| c.to_text()).collect();
            let fontset = env.fontsets_mut().register(faces);
            return format!("fontset-name=\"{}\"", fontset.name);
        }

        if content {
            return self.value.join(separator.unwrap_or(", "));
        }

        let attribute = reference.selector_name(&self.name).unwrap_or(self.name.as_str());
        format!("{}=\"{}\"", attribute, self.value)
    }
}

fn status_warning(name: &str, status: Status) -> Option<String> {
    match status {
        Status::Stable => None,
        Status::Deprecated => Some(format!(
            "{name} is deprecated. It may be removed in the future."
        )),
        Status::Unstable => Some(format!("{name} is unstable. It may change in the future.")),
        Status::Experimental => Some(format!(
            "{name} is experimental. It may change, be renamed or removed in the future."
        )),
    }
}

/// `[<zoom>] <name>: <value>`
impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.zoom, self.name, self.value)
    }
}
