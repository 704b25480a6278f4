//! Global rendering configuration with scoped overrides.
//!
//! A minimal stand-in for a plotting backend's rc-params table: a
//! string-keyed map of settings with stacked, guaranteed-restore overrides.
//! [`RenderConfig::context`] applies a batch of overrides and returns a
//! guard; dropping the guard (on normal scope exit or during panic
//! unwinding) restores the displaced values in LIFO order, so contexts
//! nest correctly.

use std::collections::HashMap;
use std::sync::{LazyLock, Mutex, MutexGuard};

use crate::log::debug;
use crate::types::FigSize;

/// Setting key for the default figure size.
pub const FIGURE_FIGSIZE: &str = "figure.figsize";

/// Setting key for the figure resolution.
pub const FIGURE_DPI: &str = "figure.dpi";

/// Conventional default figure size (inches) when nothing is configured.
pub const DEFAULT_FIGSIZE: FigSize = FigSize::new(6.4, 4.8);

/// A configuration value.
#[derive(Debug, Clone, PartialEq)]
pub enum RcValue {
    Size(FigSize),
    Float(f64),
    Str(String),
    Bool(bool),
}

impl From<FigSize> for RcValue {
    fn from(size: FigSize) -> Self {
        RcValue::Size(size)
    }
}

impl From<f64> for RcValue {
    fn from(value: f64) -> Self {
        RcValue::Float(value)
    }
}

impl From<&str> for RcValue {
    fn from(value: &str) -> Self {
        RcValue::Str(value.to_string())
    }
}

impl From<String> for RcValue {
    fn from(value: String) -> Self {
        RcValue::Str(value)
    }
}

impl From<bool> for RcValue {
    fn from(value: bool) -> Self {
        RcValue::Bool(value)
    }
}

/// A table of named rendering settings.
///
/// The mutex exists to make the process-wide instance `Sync`; the crate
/// makes no further concurrency promises and callers running overlapping
/// contexts from multiple threads must serialize them.
#[derive(Debug)]
pub struct RenderConfig {
    values: Mutex<HashMap<String, RcValue>>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        let mut values = HashMap::new();
        values.insert(FIGURE_FIGSIZE.to_string(), RcValue::Size(DEFAULT_FIGSIZE));
        values.insert(FIGURE_DPI.to_string(), RcValue::Float(100.0));
        Self {
            values: Mutex::new(values),
        }
    }
}

impl RenderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// The current value of a setting, if present.
    pub fn get(&self, key: &str) -> Option<RcValue> {
        self.lock().get(key).cloned()
    }

    /// The figure size currently in effect.
    pub fn figsize(&self) -> FigSize {
        match self.get(FIGURE_FIGSIZE) {
            Some(RcValue::Size(size)) => size,
            _ => DEFAULT_FIGSIZE,
        }
    }

    /// Apply `overrides` and return a guard that restores the previous
    /// values when dropped.
    ///
    /// Later entries win when a key appears more than once in the same
    /// call; restoration walks the entries in reverse, so the original
    /// value comes back regardless.
    pub fn context<I, K>(&self, overrides: I) -> RcContext<'_>
    where
        I: IntoIterator<Item = (K, RcValue)>,
        K: Into<String>,
    {
        let mut values = self.lock();
        let mut saved = Vec::new();
        for (key, value) in overrides {
            let key = key.into();
            debug!(key = %key, "overriding rc setting");
            let prior = values.insert(key.clone(), value);
            saved.push((key, prior));
        }
        drop(values);
        RcContext {
            config: self,
            saved,
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, RcValue>> {
        // A panic inside a context scope poisons the mutex right before the
        // guard's Drop runs; restoration must still go through.
        self.values.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Guard for a batch of configuration overrides.
///
/// Restores the displaced settings on drop, including during panic
/// unwinding.
#[must_use = "the overrides are reverted as soon as the context is dropped"]
pub struct RcContext<'a> {
    config: &'a RenderConfig,
    saved: Vec<(String, Option<RcValue>)>,
}

impl Drop for RcContext<'_> {
    fn drop(&mut self) {
        let mut values = self.config.lock();
        for (key, prior) in self.saved.drain(..).rev() {
            match prior {
                Some(value) => values.insert(key, value),
                None => values.remove(&key),
            };
        }
    }
}

static RENDER_CONFIG: LazyLock<RenderConfig> = LazyLock::new(RenderConfig::default);

/// The process-wide rendering configuration.
pub fn render_config() -> &'static RenderConfig {
    &RENDER_CONFIG
}
