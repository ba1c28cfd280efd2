//! Zoom windows
//!
//! A zoom window is a bitmask over the renderer's zoom levels `0..=22`; bit
//! `n` set means the rule is active at level `n`. [`Zoom::ALL`] is the
//! unrestricted window and doubles as the "all zooms" sentinel in
//! [`Specificity`](crate::cascade::Specificity).

use crate::error::CartoError;
use crate::result::Result;
use std::fmt;

/// Highest zoom level the renderer knows about
pub const MAX_ZOOM: u8 = 22;

/// Numeric value of the unrestricted window
pub const ALL_ZOOMS: u32 = (1 << (MAX_ZOOM as u32 + 1)) - 1;

/// Scale denominator at each zoom level; index `MAX_ZOOM + 1` closes the last window.
const SCALE_DENOMINATORS: [u64; MAX_ZOOM as usize + 2] = [
    1_000_000_000,
    500_000_000,
    200_000_000,
    100_000_000,
    50_000_000,
    25_000_000,
    12_500_000,
    6_500_000,
    3_000_000,
    1_500_000,
    750_000,
    400_000,
    200_000,
    100_000,
    50_000,
    25_000,
    12_500,
    5_000,
    2_500,
    1_500,
    750,
    500,
    250,
    100,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Zoom(u32);

impl Zoom {
    pub const ALL: Zoom = Zoom(ALL_ZOOMS);
    pub const NONE: Zoom = Zoom(0);

    pub fn from_bits(bits: u32) -> Self {
        Zoom(bits & ALL_ZOOMS)
    }

    pub fn bits(self) -> u32 {
        self.0
    }

    /// Inclusive level range; levels above [`MAX_ZOOM`] are clamped
    pub fn range(min: u8, max: u8) -> Self {
        let max = max.min(MAX_ZOOM);
        if min > max {
            return Zoom::NONE;
        }
        let bits = (min..=max).fold(0u32, |acc, level| acc | (1 << level));
        Zoom(bits)
    }

    /// Window selected by a `[zoom <op> <level>]` condition
    pub fn from_condition(op: &str, level: u8) -> Result<Self> {
        let level = level.min(MAX_ZOOM);
        let zoom = match op {
            "=" => Zoom::range(level, level),
            ">" if level == MAX_ZOOM => Zoom::NONE,
            ">" => Zoom::range(level + 1, MAX_ZOOM),
            ">=" => Zoom::range(level, MAX_ZOOM),
            "<" if level == 0 => Zoom::NONE,
            "<" => Zoom::range(0, level - 1),
            "<=" => Zoom::range(0, level),
            other => return Err(CartoError::invalid_operator(other)),
        };
        Ok(zoom)
    }

    pub fn intersect(self, other: Zoom) -> Zoom {
        Zoom(self.0 & other.0)
    }

    pub fn is_all(self) -> bool {
        self.0 == ALL_ZOOMS
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn contains(self, level: u8) -> bool {
        level <= MAX_ZOOM && self.0 & (1 << level) != 0
    }

    pub fn min_level(self) -> Option<u8> {
        (0..=MAX_ZOOM).find(|&level| self.contains(level))
    }

    pub fn max_level(self) -> Option<u8> {
        (0..=MAX_ZOOM).rev().find(|&level| self.contains(level))
    }

    /// Renderer conditions for a restricted window, as
    /// `(element name, scale denominator)` pairs
    ///
    /// Only the outer bounds are emitted; an unrestricted window yields
    /// nothing.
    pub fn scale_denominators(self) -> Vec<(&'static str, u64)> {
        let mut conditions = Vec::new();
        if self.is_all() {
            return conditions;
        }
        let (Some(start), Some(end)) = (self.min_level(), self.max_level()) else {
            return conditions;
        };
        if start > 0 {
            conditions.push(("MaxScaleDenominator", SCALE_DENOMINATORS[start as usize]));
        }
        if end < MAX_ZOOM {
            conditions.push(("MinScaleDenominator", SCALE_DENOMINATORS[end as usize + 1]));
        }
        conditions
    }
}

impl Default for Zoom {
    fn default() -> Self {
        Zoom::ALL
    }
}

/// One character per level: `X` active, `.` inactive
impl fmt::Display for Zoom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for level in 0..=MAX_ZOOM {
            f.write_str(if self.contains(level) { "X" } else { "." })?;
        }
        Ok(())
    }
}
