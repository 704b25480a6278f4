//! Unit conversion registry.
//!
//! Maps unit names to multiplicative conversion factors to inches, the
//! canonical unit of plotting backends. A process-wide table is seeded at
//! first use and can only grow through the guarded [`update_conversion_table`]
//! operation; existing factors are never overwritten. Code that needs
//! isolation (tests, embedders) can carry its own [`UnitRegistry`] and pass
//! it to the `*_in` resolution APIs.

use std::collections::HashMap;
use std::sync::{LazyLock, RwLock, RwLockReadGuard};

use crate::errors::UnitError;
use crate::log::debug;

/// Millimetres per inch, the exact international definition.
const MM_PER_INCH: f64 = 25.4;

/// Units the registry is seeded with, as (name, factor-to-inches) pairs.
const SEED_UNITS: [(&str, f64); 8] = [
    ("in", 1.0),
    ("ft", 12.0),
    ("yd", 36.0),
    ("pt", 1.0 / 72.0),
    ("m", 1000.0 / MM_PER_INCH),
    ("dm", 100.0 / MM_PER_INCH),
    ("cm", 10.0 / MM_PER_INCH),
    ("mm", 1.0 / MM_PER_INCH),
];

/// A mutable mapping from unit name to conversion factor (to inches).
///
/// Factors are always finite and strictly positive; updates that would
/// violate that, or overwrite an existing unit, are rejected wholesale.
#[derive(Debug, Clone)]
pub struct UnitRegistry {
    table: HashMap<String, f64>,
}

impl Default for UnitRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl UnitRegistry {
    /// A registry seeded with the standard units (in, ft, yd, pt, m, dm,
    /// cm, mm).
    pub fn new() -> Self {
        let table = SEED_UNITS
            .iter()
            .map(|&(name, factor)| (name.to_string(), factor))
            .collect();
        Self { table }
    }

    /// An empty registry, mainly useful for tests that want full control
    /// over the table contents.
    pub fn empty() -> Self {
        Self {
            table: HashMap::new(),
        }
    }

    /// Look up the conversion factor for `unit`.
    ///
    /// An unknown unit is an error whose message enumerates every
    /// registered unit.
    pub fn get(&self, unit: &str) -> Result<f64, UnitError> {
        self.table
            .get(unit)
            .copied()
            .ok_or_else(|| UnitError::Unknown {
                unit: unit.to_string(),
                known: self.units().join(", "),
            })
    }

    /// Whether `unit` is registered.
    pub fn contains(&self, unit: &str) -> bool {
        self.table.contains_key(unit)
    }

    /// All registered unit names, sorted.
    pub fn units(&self) -> Vec<String> {
        let mut names: Vec<String> = self.table.keys().cloned().collect();
        names.sort();
        names
    }

    /// Register new units, all-or-nothing.
    ///
    /// Every entry is validated before anything is inserted, so a failing
    /// call leaves the registry exactly as it was. Each entry must have a
    /// non-empty name not already registered (nor repeated within the same
    /// call) and a finite, strictly positive factor.
    pub fn update<I, S>(&mut self, entries: I) -> Result<(), UnitError>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let mut staged: Vec<(String, f64)> = Vec::new();
        for (name, factor) in entries {
            let name = name.into();
            if name.is_empty() {
                return Err(UnitError::EmptyName);
            }
            if !factor.is_finite() {
                return Err(UnitError::NonFiniteFactor { name, factor });
            }
            if factor <= 0.0 {
                return Err(UnitError::NonPositiveFactor { name, factor });
            }
            if self.table.contains_key(&name) || staged.iter().any(|(n, _)| n == &name) {
                return Err(UnitError::Duplicate { name });
            }
            staged.push((name, factor));
        }

        for (name, factor) in staged {
            debug!(unit = %name, factor, "registering unit");
            self.table.insert(name, factor);
        }
        Ok(())
    }
}

static CONVERSION_TABLE: LazyLock<RwLock<UnitRegistry>> =
    LazyLock::new(|| RwLock::new(UnitRegistry::new()));

/// Read access to the process-wide conversion table.
///
/// The returned guard holds a read lock; drop it before calling
/// [`update_conversion_table`] from the same thread.
pub fn conversion_table() -> RwLockReadGuard<'static, UnitRegistry> {
    CONVERSION_TABLE.read().unwrap_or_else(|e| e.into_inner())
}

/// Register new units in the process-wide conversion table.
///
/// Same all-or-nothing semantics as [`UnitRegistry::update`].
pub fn update_conversion_table<I, S>(entries: I) -> Result<(), UnitError>
where
    I: IntoIterator<Item = (S, f64)>,
    S: Into<String>,
{
    CONVERSION_TABLE
        .write()
        .unwrap_or_else(|e| e.into_inner())
        .update(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_factors() {
        let registry = UnitRegistry::new();
        assert_eq!(registry.get("in").unwrap(), 1.0);
        assert_eq!(registry.get("ft").unwrap(), 12.0);
        assert_eq!(registry.get("yd").unwrap(), 36.0);
        assert_eq!(registry.get("pt").unwrap(), 1.0 / 72.0);
        assert_eq!(registry.get("mm").unwrap(), 1.0 / 25.4);
        assert_eq!(registry.get("cm").unwrap(), 10.0 / 25.4);
        assert_eq!(registry.get("dm").unwrap(), 100.0 / 25.4);
        assert_eq!(registry.get("m").unwrap(), 1000.0 / 25.4);
    }

    #[test]
    fn metric_units_are_consistent() {
        let registry = UnitRegistry::new();
        let mm = registry.get("mm").unwrap();
        assert!((mm * 25.4 - 1.0).abs() < 1e-12);
        assert!((registry.get("cm").unwrap() - 10.0 * mm).abs() < 1e-12);
        assert!((registry.get("m").unwrap() - 1000.0 * mm).abs() < 1e-9);
    }

    #[test]
    fn unknown_unit_lists_options() {
        let registry = UnitRegistry::new();
        let err = registry.get("furlong").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("unknown unit: furlong"));
        // Sorted enumeration of every seeded unit
        assert!(message.contains("cm, dm, ft, in, m, mm, pt, yd"));
    }

    #[test]
    fn update_inserts_new_units() {
        let mut registry = UnitRegistry::empty();
        registry.update([("test", 1.0)]).unwrap();
        assert_eq!(registry.get("test").unwrap(), 1.0);
    }

    #[test]
    fn update_rejects_negative_factor() {
        let mut registry = UnitRegistry::empty();
        let err = registry.update([("test", -1.0)]).unwrap_err();
        assert_eq!(
            err,
            UnitError::NonPositiveFactor {
                name: "test".to_string(),
                factor: -1.0
            }
        );
        assert!(!registry.contains("test"));
    }

    #[test]
    fn update_rejects_zero_factor() {
        let mut registry = UnitRegistry::empty();
        assert!(registry.update([("test", 0.0)]).is_err());
        assert!(!registry.contains("test"));
    }

    #[test]
    fn update_rejects_non_finite_factor() {
        let mut registry = UnitRegistry::empty();
        assert!(registry.update([("test", f64::NAN)]).is_err());
        assert!(registry.update([("test", f64::INFINITY)]).is_err());
        assert!(!registry.contains("test"));
    }

    #[test]
    fn update_rejects_empty_name() {
        let mut registry = UnitRegistry::empty();
        let err = registry.update([("", 1.0)]).unwrap_err();
        assert_eq!(err, UnitError::EmptyName);
        assert!(registry.units().is_empty());
    }

    #[test]
    fn update_rejects_overwrite() {
        let mut registry = UnitRegistry::new();
        let err = registry.update([("ft", 1.0)]).unwrap_err();
        assert_eq!(
            err,
            UnitError::Duplicate {
                name: "ft".to_string()
            }
        );
        assert_eq!(registry.get("ft").unwrap(), 12.0);
    }

    #[test]
    fn update_rejects_duplicate_within_call() {
        let mut registry = UnitRegistry::empty();
        let err = registry.update([("test", 1.0), ("test", 2.0)]).unwrap_err();
        assert_eq!(
            err,
            UnitError::Duplicate {
                name: "test".to_string()
            }
        );
        assert!(!registry.contains("test"));
    }

    #[test]
    fn update_is_all_or_nothing() {
        // A bad entry late in the call must not leave earlier entries behind.
        let mut registry = UnitRegistry::empty();
        let err = registry
            .update([("good", 2.0), ("bad", -1.0)])
            .unwrap_err();
        assert!(matches!(err, UnitError::NonPositiveFactor { .. }));
        assert!(!registry.contains("good"));
        assert!(!registry.contains("bad"));
    }

    #[test]
    fn global_table_rejects_overwrite() {
        let err = update_conversion_table([("ft", 1.0)]).unwrap_err();
        assert_eq!(
            err,
            UnitError::Duplicate {
                name: "ft".to_string()
            }
        );
        assert_eq!(conversion_table().get("ft").unwrap(), 12.0);
    }

    #[test]
    fn global_table_accepts_new_unit() {
        update_conversion_table([("units_test_twip", 1.0 / 1440.0)]).unwrap();
        assert_eq!(
            conversion_table().get("units_test_twip").unwrap(),
            1.0 / 1440.0
        );
    }
}
