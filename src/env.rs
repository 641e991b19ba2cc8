//! Environment stores.
//!
//! Initialization reads and writes variables through [`EnvStore`] so the
//! loader can run against the real process environment or an in-memory map.

use std::collections::HashMap;

/// A mutable mapping of environment variable names to values.
pub trait EnvStore {
    /// Get the value of a variable, `None` if unset or not valid UTF-8.
    fn get(&self, key: &str) -> Option<String>;

    /// Set a variable, replacing any previous value.
    fn set(&mut self, key: &str, value: &str);

    /// Whether the variable is set to a non-empty value.
    fn is_set(&self, key: &str) -> bool {
        self.get(key).map(|v| !v.is_empty()).unwrap_or(false)
    }

    /// Whether the variable is present at all, even if empty.
    fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
}

/// The environment of the current process.
///
/// Writes are only safe while the process is still single-threaded, which
/// holds during startup.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnv;

impl EnvStore for ProcessEnv {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }

    fn set(&mut self, key: &str, value: &str) {
        std::env::set_var(key, value);
    }
}

/// An in-memory environment, mainly for tests.
#[derive(Debug, Default, Clone)]
pub struct MemoryEnv {
    vars: HashMap<String, String>,
}

impl MemoryEnv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(key, value)` pairs.
    pub fn with_vars<K, V>(vars: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: vars.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }

    pub fn all(&self) -> &HashMap<String, String> {
        &self.vars
    }
}

impl EnvStore for MemoryEnv {
    fn get(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.vars.insert(key.to_string(), value.to_string());
    }
}
