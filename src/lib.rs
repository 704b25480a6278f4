//! Figure size resolution for plotting backends.
//!
//! Compute an absolute (width, height) pair in inches from any two of
//! width, height and aspect ratio, in any registered physical unit, and
//! temporarily apply the result to a process-wide rendering configuration
//! with guaranteed restoration.
//!
//! ```
//! use figscale::{GOLDEN_RATIO, ScaleError, SizeSpec};
//!
//! let scale = SizeSpec::new().width(3.0).aspect(GOLDEN_RATIO).resolve()?;
//! assert_eq!(scale.width(), 3.0);
//!
//! // Everything inside the scope renders at 3.0 x 1.854 inches
//! {
//!     let _ctx = scale.rc_context();
//!     assert_eq!(figscale::render_config().figsize(), scale.figsize());
//! }
//! # Ok::<(), ScaleError>(())
//! ```
//!
//! Sizes can be specified in any unit of the conversion table (`in`, `ft`,
//! `yd`, `pt`, `m`, `dm`, `cm`, `mm` out of the box) and new units can be
//! registered at runtime with [`update_conversion_table`].

pub mod errors;
mod log;
pub mod rc;
pub mod scale;
pub mod types;
pub mod units;

pub use errors::{ScaleError, UnitError};
pub use rc::{RcContext, RcValue, RenderConfig, render_config};
pub use scale::{DEFAULT_UNIT, FigScale, SizeSpec};
pub use types::{FigSize, GOLDEN_RATIO};
pub use units::{UnitRegistry, conversion_table, update_conversion_table};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_in_feet() {
        let scale = SizeSpec::new()
            .width(1.0)
            .height(1.0)
            .unit("ft")
            .resolve()
            .unwrap();
        assert_eq!(scale.figsize(), FigSize::new(12.0, 12.0));
    }

    #[test]
    fn point_round_trip() {
        let scale = SizeSpec::new()
            .width(1.0)
            .height(1.0)
            .unit("pt")
            .resolve()
            .unwrap();
        let factor = conversion_table().get("pt").unwrap();
        assert_eq!(factor, 1.0 / 72.0);
        assert_eq!(scale.width() / factor, 1.0);
        assert_eq!(scale.height() / factor, 1.0);
    }

    #[test]
    fn golden_ratio_makes_landscape_figures() {
        let scale = SizeSpec::new()
            .width(4.0)
            .aspect(GOLDEN_RATIO)
            .resolve()
            .unwrap();
        assert!(scale.height() < scale.width());
        assert!((scale.height() - 4.0 * GOLDEN_RATIO).abs() < 1e-12);
    }
}
