//! Arena holding rulesets, selectors and rules
//!
//! The parser fills a [`StyleTree`]; everything else refers into it with
//! copyable handles. Parent links (rule → ruleset → enclosing ruleset) and
//! variable owners are handles too, so the tree has no reference cycles.

use super::{Filter, OwnerRef, Rule};
use crate::cascade::Specificity;
use crate::error::CartoError;
use crate::result::Result;
use crate::zoom::{ALL_ZOOMS, Zoom};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RuleId(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RulesetId(usize);

/// A selector inside a ruleset, by position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SelectorRef {
    pub ruleset: RulesetId,
    pub position: usize,
}

/// One simple selector: `#layer`, `.class` or a plain name such as `Map`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub value: String,
}

impl Element {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    /// `(id weight, class weight)`
    pub fn weights(&self) -> (u32, u32) {
        match self.value.chars().next() {
            Some('#') => (1, 0),
            Some('.') => (0, 1),
            _ => (0, 0),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Selector {
    pub elements: Vec<Element>,
    pub filters: Vec<Filter>,
    /// Explicit zoom restriction, `None` when the selector applies at every zoom
    pub zoom: Option<Zoom>,
    /// Source order of the selector
    pub index: usize,
}

impl Selector {
    pub fn new(elements: Vec<Element>, index: usize) -> Self {
        Self {
            elements,
            filters: Vec::new(),
            zoom: None,
            index,
        }
    }

    pub fn with_filters(mut self, filters: Vec<Filter>) -> Self {
        self.filters = filters;
        self
    }

    /// Restrict to a zoom window; an unrestricted window clears the restriction
    pub fn with_zoom(mut self, zoom: Zoom) -> Self {
        self.zoom = (!zoom.is_all()).then_some(zoom);
        self
    }

    /// A selector with no elements (e.g. a bare `[zoom > 10]` block) does not
    /// contribute id/class weight of its own
    pub fn is_trivial(&self) -> bool {
        self.elements.is_empty()
    }

    /// Summed `(id weight, class weight)` of the elements
    pub fn weights(&self) -> (u32, u32) {
        self.elements
            .iter()
            .map(Element::weights)
            .fold((0, 0), |(ids, classes), (i, c)| (ids + i, classes + c))
    }

    pub fn specificity(&self) -> Specificity {
        let (id_weight, class_weight) = self.weights();
        let (zoom_min, zoom_max) = match self.zoom {
            Some(zoom) => (
                zoom.min_level().map_or(0, u32::from),
                zoom.max_level().map_or(0, u32::from),
            ),
            None => (0, ALL_ZOOMS),
        };
        Specificity {
            id_weight,
            class_weight,
            zoom_min,
            zoom_max,
            source_index: self.index,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Ruleset {
    pub selectors: Vec<Selector>,
    pub rules: Vec<RuleId>,
    pub parent: Option<RulesetId>,
}

#[derive(Debug, Default)]
pub struct StyleTree {
    rulesets: Vec<Ruleset>,
    rules: Vec<Rule>,
}

impl StyleTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a ruleset, nested in `parent` when given
    ///
    /// Variables inside the selectors' filters are pointed at their selector.
    pub fn add_ruleset(&mut self, mut selectors: Vec<Selector>, parent: Option<RulesetId>) -> RulesetId {
        let id = RulesetId(self.rulesets.len());
        for (position, selector) in selectors.iter_mut().enumerate() {
            let owner = OwnerRef::Selector(SelectorRef {
                ruleset: id,
                position,
            });
            for filter in &mut selector.filters {
                filter.set_owner_rule(owner);
            }
        }
        self.rulesets.push(Ruleset {
            selectors,
            rules: Vec::new(),
            parent,
        });
        id
    }

    /// Add a rule inside `parent` (or at the top level), wiring its parent
    /// link and the owner of every variable in its value
    pub fn add_rule(&mut self, mut rule: Rule, parent: Option<RulesetId>) -> RuleId {
        let id = RuleId(self.rules.len());
        rule.parent = parent;
        rule.set_owner(OwnerRef::Rule(id));
        if let Some(ruleset) = parent.and_then(|p| self.rulesets.get_mut(p.0)) {
            ruleset.rules.push(id);
        }
        self.rules.push(rule);
        id
    }

    /// Panics on a handle from another tree
    pub fn rule(&self, id: RuleId) -> &Rule {
        &self.rules[id.0]
    }

    /// Panics on a handle from another tree
    pub fn ruleset(&self, id: RulesetId) -> &Ruleset {
        &self.rulesets[id.0]
    }

    pub fn get_rule(&self, id: RuleId) -> Result<&Rule> {
        self.rules.get(id.0).ok_or(CartoError::StaleHandle {
            kind: "rule",
            index: id.0,
        })
    }

    pub fn get_ruleset(&self, id: RulesetId) -> Result<&Ruleset> {
        self.rulesets.get(id.0).ok_or(CartoError::StaleHandle {
            kind: "ruleset",
            index: id.0,
        })
    }

    pub fn selector(&self, selector: SelectorRef) -> &Selector {
        &self.ruleset(selector.ruleset).selectors[selector.position]
    }

    pub fn rules(&self) -> impl Iterator<Item = (RuleId, &Rule)> {
        self.rules.iter().enumerate().map(|(i, rule)| (RuleId(i), rule))
    }

    /// Variable declarations made directly inside `ruleset`
    pub fn variables_in(&self, ruleset: RulesetId) -> impl Iterator<Item = RuleId> + '_ {
        self.ruleset(ruleset)
            .rules
            .iter()
            .copied()
            .filter(|&id| self.rule(id).variable)
    }

    /// Top-level variable declarations
    pub fn global_variables(&self) -> impl Iterator<Item = RuleId> + '_ {
        self.rules()
            .filter(|(_, rule)| rule.variable && rule.parent.is_none())
            .map(|(id, _)| id)
    }

    /// First non-trivial leading selector found walking from `ruleset`
    /// outwards through its ancestors
    pub fn nearest_selector(&self, ruleset: RulesetId) -> Option<&Selector> {
        let mut current = Some(ruleset);
        while let Some(id) = current {
            let ruleset = self.ruleset(id);
            match ruleset.selectors.first() {
                Some(selector) if !selector.is_trivial() => return Some(selector),
                _ => current = ruleset.parent,
            }
        }
        None
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
