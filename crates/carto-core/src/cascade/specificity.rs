//! Priority key for competing variable declarations

use crate::zoom::ALL_ZOOMS;
use std::cmp::Ordering;
use std::fmt;

/// `(id weight, class weight, zoom min, zoom max, source index)`, compared
/// lexicographically in that order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Specificity {
    pub id_weight: u32,
    pub class_weight: u32,
    pub zoom_min: u32,
    pub zoom_max: u32,
    pub source_index: usize,
}

impl Specificity {
    pub fn new(
        id_weight: u32,
        class_weight: u32,
        zoom_min: u32,
        zoom_max: u32,
        source_index: usize,
    ) -> Self {
        Self {
            id_weight,
            class_weight,
            zoom_min,
            zoom_max,
            source_index,
        }
    }

    /// Key for a declaration or reference outside any selector
    pub fn unscoped(source_index: usize) -> Self {
        Self::new(0, 0, 0, ALL_ZOOMS, source_index)
    }

    /// Same zoom and order fields, different id/class weights
    pub fn with_weights(self, id_weight: u32, class_weight: u32) -> Self {
        Self {
            id_weight,
            class_weight,
            ..self
        }
    }
}

impl Ord for Specificity {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id_weight
            .cmp(&other.id_weight)
            .then(self.class_weight.cmp(&other.class_weight))
            .then(self.zoom_min.cmp(&other.zoom_min))
            .then(self.zoom_max.cmp(&other.zoom_max))
            .then(self.source_index.cmp(&other.source_index))
    }
}

impl PartialOrd for Specificity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Specificity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {}, {}, {}, {}]",
            self.id_weight, self.class_weight, self.zoom_min, self.zoom_max, self.source_index
        )
    }
}
