//! Error types with rich diagnostics using miette
//!
//! All failures are surfaced synchronously to the caller; nothing is
//! retried or recovered internally.

use miette::Diagnostic;
use thiserror::Error;

// ============================================================================
// Unit Registry Errors
// ============================================================================

/// Errors from the unit conversion registry
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum UnitError {
    #[error("unknown unit: {unit}. The available options are: {known}")]
    #[diagnostic(
        code(figscale::units::unknown_unit),
        help("register additional units with update_conversion_table")
    )]
    Unknown { unit: String, known: String },

    #[error("unit names must be non-empty")]
    #[diagnostic(code(figscale::units::empty_name))]
    EmptyName,

    #[error("conversion factor for '{name}' is not finite: {factor}")]
    #[diagnostic(code(figscale::units::non_finite_factor))]
    NonFiniteFactor { name: String, factor: f64 },

    #[error("conversion factor for '{name}' must be positive, got {factor}")]
    #[diagnostic(code(figscale::units::non_positive_factor))]
    NonPositiveFactor { name: String, factor: f64 },

    #[error("unit '{name}' is already registered")]
    #[diagnostic(
        code(figscale::units::duplicate_unit),
        help("existing factors are never overwritten; pick an unused name")
    )]
    Duplicate { name: String },
}

// ============================================================================
// Resolution Errors
// ============================================================================

/// Errors from resolving a size specification into an absolute figure size
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum ScaleError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Unit(#[from] UnitError),

    #[error("exactly two of width, height and aspect must be provided, got {given}")]
    #[diagnostic(
        code(figscale::scale::spec_count),
        help("the missing value is derived from the other two")
    )]
    SpecCount { given: usize },

    #[error("the figure size must be positive, resolved to {width} x {height}")]
    #[diagnostic(
        code(figscale::scale::non_positive_size),
        help("check the signs of width, height and aspect")
    )]
    NonPositiveSize { width: f64, height: f64 },
}
