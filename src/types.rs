//! The resolved figure size pair.
//!
//! `FigSize` is a plain (width, height) value in inches, backed by
//! [`glam::DVec2`]. It carries no unit information of its own; unit
//! handling lives in [`crate::units`] and [`crate::scale`].

use std::ops::Index;

use glam::DVec2;

use crate::errors::ScaleError;

/// The golden ratio, (sqrt(5) - 1) / 2.
///
/// Useful as an `aspect` value: a figure with `aspect = GOLDEN_RATIO` has
/// the classically pleasant height-to-width proportion.
pub const GOLDEN_RATIO: f64 = 0.618_033_988_749_894_9;

/// An ordered (width, height) pair in inches.
///
/// Immutable value type: every operation that changes the size returns a
/// new pair. Index 0 is the width, index 1 the height, matching the order
/// plotting backends expect for a figsize argument.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FigSize(DVec2);

impl FigSize {
    /// Create a pair from raw values. No validation is performed here;
    /// positivity is enforced when a specification is resolved.
    #[inline]
    pub const fn new(width: f64, height: f64) -> Self {
        Self(DVec2::new(width, height))
    }

    /// Derive a pair from exactly two of width, height and aspect.
    ///
    /// `aspect` is the height-to-width ratio: a missing width is
    /// `height / aspect`, a missing height is `width * aspect`. Anything
    /// other than exactly two provided values is rejected.
    pub fn from_aspect(
        width: Option<f64>,
        height: Option<f64>,
        aspect: Option<f64>,
    ) -> Result<Self, ScaleError> {
        match (width, height, aspect) {
            (Some(w), Some(h), None) => Ok(Self::new(w, h)),
            (Some(w), None, Some(a)) => Ok(Self::new(w, w * a)),
            (None, Some(h), Some(a)) => Ok(Self::new(h / a, h)),
            _ => {
                let given = [width, height, aspect]
                    .iter()
                    .filter(|v| v.is_some())
                    .count();
                Err(ScaleError::SpecCount { given })
            }
        }
    }

    #[inline]
    pub fn width(self) -> f64 {
        self.0.x
    }

    #[inline]
    pub fn height(self) -> f64 {
        self.0.y
    }

    /// Uniformly rescale both dimensions, returning a new pair.
    #[inline]
    pub fn rescale(self, factor: f64) -> Self {
        Self(self.0 * factor)
    }

    /// Always 2. Kept for parity with the sequence protocol of figsize
    /// consumers that treat the pair as a tiny collection.
    #[inline]
    pub const fn len(self) -> usize {
        2
    }

    /// Never empty; a pair always holds both values.
    #[inline]
    pub const fn is_empty(self) -> bool {
        false
    }

    /// Both values in (width, height) order.
    #[inline]
    pub fn as_array(self) -> [f64; 2] {
        self.0.to_array()
    }

    /// Iterate over width then height.
    pub fn iter(self) -> std::array::IntoIter<f64, 2> {
        self.as_array().into_iter()
    }
}

impl Index<usize> for FigSize {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.0[index]
    }
}

impl IntoIterator for FigSize {
    type Item = f64;
    type IntoIter = std::array::IntoIter<f64, 2>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl From<(f64, f64)> for FigSize {
    fn from((width, height): (f64, f64)) -> Self {
        Self::new(width, height)
    }
}

impl From<[f64; 2]> for FigSize {
    fn from([width, height]: [f64; 2]) -> Self {
        Self::new(width, height)
    }
}

impl From<DVec2> for FigSize {
    fn from(v: DVec2) -> Self {
        Self(v)
    }
}

impl From<FigSize> for (f64, f64) {
    fn from(size: FigSize) -> Self {
        (size.width(), size.height())
    }
}

impl From<FigSize> for [f64; 2] {
    fn from(size: FigSize) -> Self {
        size.as_array()
    }
}

impl From<FigSize> for DVec2 {
    fn from(size: FigSize) -> Self {
        size.0
    }
}
