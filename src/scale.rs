//! Size specification and resolution.
//!
//! A [`SizeSpec`] names any two of width, height and aspect plus a unit;
//! [`FigScale`] resolves it into an absolute [`FigSize`] in inches and
//! can apply that size to the rendering configuration for the duration
//! of a scope.

use std::fmt;
use std::ops::Index;

use crate::errors::ScaleError;
use crate::log::debug;
use crate::rc::{FIGURE_FIGSIZE, RcContext, RcValue, RenderConfig, render_config};
use crate::types::FigSize;
use crate::units::{UnitRegistry, conversion_table};

/// The canonical unit used when a specification names none.
pub const DEFAULT_UNIT: &str = "in";

/// A partial figure size specification.
///
/// Exactly two of `width`, `height` and `aspect` must be set for the spec
/// to resolve; `aspect` is the height-to-width ratio. `unit` defaults to
/// inches. The same type doubles as the override patch for
/// [`FigScale::replace`], where `None` fields keep the original value.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SizeSpec {
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub aspect: Option<f64>,
    pub unit: Option<String>,
}

impl SizeSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn width(mut self, width: f64) -> Self {
        self.width = Some(width);
        self
    }

    pub fn height(mut self, height: f64) -> Self {
        self.height = Some(height);
        self
    }

    pub fn aspect(mut self, aspect: f64) -> Self {
        self.aspect = Some(aspect);
        self
    }

    pub fn unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    /// Resolve against the process-wide conversion table.
    pub fn resolve(self) -> Result<FigScale, ScaleError> {
        FigScale::new(self)
    }

    /// Resolve against an explicit registry.
    pub fn resolve_in(self, registry: &UnitRegistry) -> Result<FigScale, ScaleError> {
        FigScale::new_in(self, registry)
    }

    fn unit_name(&self) -> &str {
        self.unit.as_deref().unwrap_or(DEFAULT_UNIT)
    }

    /// Substitute the `Some` fields of `patch` into this spec.
    fn merged(&self, patch: SizeSpec) -> SizeSpec {
        SizeSpec {
            width: patch.width.or(self.width),
            height: patch.height.or(self.height),
            aspect: patch.aspect.or(self.aspect),
            unit: patch.unit.or_else(|| self.unit.clone()),
        }
    }
}

/// A resolved figure scale: the original spec plus its absolute size.
///
/// Immutable; [`replace`](FigScale::replace) derives a new instance and
/// re-runs the full resolution, so every `FigScale` in existence satisfies
/// the positivity invariant.
#[derive(Debug, Clone, PartialEq)]
pub struct FigScale {
    spec: SizeSpec,
    figsize: FigSize,
}

impl FigScale {
    /// Resolve `spec` against the process-wide conversion table.
    pub fn new(spec: SizeSpec) -> Result<Self, ScaleError> {
        let factor = conversion_table().get(spec.unit_name())?;
        Self::resolve_with_factor(spec, factor)
    }

    /// Resolve `spec` against an explicit registry.
    pub fn new_in(spec: SizeSpec, registry: &UnitRegistry) -> Result<Self, ScaleError> {
        let factor = registry.get(spec.unit_name())?;
        Self::resolve_with_factor(spec, factor)
    }

    fn resolve_with_factor(spec: SizeSpec, factor: f64) -> Result<Self, ScaleError> {
        let raw = FigSize::from_aspect(spec.width, spec.height, spec.aspect)?;
        let figsize = raw.rescale(factor);

        let (width, height) = (figsize.width(), figsize.height());
        if !(width > 0.0 && height > 0.0 && width.is_finite() && height.is_finite()) {
            return Err(ScaleError::NonPositiveSize { width, height });
        }

        debug!(width, height, unit = %spec.unit_name(), "resolved figure size");
        Ok(Self { spec, figsize })
    }

    /// The resolved (width, height) pair in inches.
    #[inline]
    pub fn figsize(&self) -> FigSize {
        self.figsize
    }

    /// Resolved width in inches.
    #[inline]
    pub fn width(&self) -> f64 {
        self.figsize.width()
    }

    /// Resolved height in inches.
    #[inline]
    pub fn height(&self) -> f64 {
        self.figsize.height()
    }

    /// The specification this scale was resolved from.
    pub fn spec(&self) -> &SizeSpec {
        &self.spec
    }

    /// Always 2, like the pair itself.
    #[inline]
    pub const fn len(&self) -> usize {
        2
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Both resolved values in (width, height) order.
    #[inline]
    pub fn as_array(&self) -> [f64; 2] {
        self.figsize.as_array()
    }

    /// Derive a new scale with the `Some` fields of `patch` substituted,
    /// re-running the full resolution.
    ///
    /// Changing `unit` alone reinterprets the raw width/height/aspect
    /// values under the new unit; the physical size is *not* preserved.
    /// `FigScale::new(SizeSpec::new().width(1.0).height(1.0))` resolves to
    /// one square inch, and replacing the unit with `"cm"` resolves the
    /// same raw values to one square centimetre.
    pub fn replace(&self, patch: SizeSpec) -> Result<Self, ScaleError> {
        Self::new(self.spec.merged(patch))
    }

    /// [`replace`](FigScale::replace) against an explicit registry.
    pub fn replace_in(&self, patch: SizeSpec, registry: &UnitRegistry) -> Result<Self, ScaleError> {
        Self::new_in(self.spec.merged(patch), registry)
    }

    /// Override the process-wide default figure size for the duration of
    /// the returned guard.
    pub fn rc_context(&self) -> RcContext<'static> {
        self.rc_context_in(render_config())
    }

    /// Scoped figure-size override on an explicit configuration.
    pub fn rc_context_in<'a>(&self, config: &'a RenderConfig) -> RcContext<'a> {
        config.context([(FIGURE_FIGSIZE, RcValue::Size(self.figsize))])
    }

    /// Scoped override of the figure size plus additional named settings.
    ///
    /// The figure size always wins for the `figure.figsize` key, even if
    /// `overrides` also names it.
    pub fn rc_context_with<'a, I, K>(&self, config: &'a RenderConfig, overrides: I) -> RcContext<'a>
    where
        I: IntoIterator<Item = (K, RcValue)>,
        K: Into<String>,
    {
        let mut entries: Vec<(String, RcValue)> = overrides
            .into_iter()
            .map(|(key, value)| (key.into(), value))
            .collect();
        entries.push((FIGURE_FIGSIZE.to_string(), RcValue::Size(self.figsize)));
        config.context(entries)
    }

    /// Iterate over the resolved width then height.
    pub fn iter(&self) -> std::array::IntoIter<f64, 2> {
        self.figsize.iter()
    }
}

impl Index<usize> for FigScale {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.figsize[index]
    }
}

impl IntoIterator for &FigScale {
    type Item = f64;
    type IntoIter = std::array::IntoIter<f64, 2>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl From<&FigScale> for FigSize {
    fn from(scale: &FigScale) -> Self {
        scale.figsize()
    }
}

/// Diagnostic representation listing only the fields that differ from
/// their defaults. No parsing guarantee.
impl fmt::Display for FigScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if let Some(width) = self.spec.width {
            parts.push(format!("width={width:?}"));
        }
        if let Some(height) = self.spec.height {
            parts.push(format!("height={height:?}"));
        }
        if let Some(aspect) = self.spec.aspect {
            parts.push(format!("aspect={aspect:?}"));
        }
        if let Some(ref unit) = self.spec.unit {
            if unit != DEFAULT_UNIT {
                parts.push(format!("unit=\"{unit}\""));
            }
        }
        write!(f, "FigScale({})", parts.join(", "))
    }
}
