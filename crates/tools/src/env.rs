//! Environment lookup capability.
//!
//! The loader never reads `std::env` directly; it is handed an [`EnvSource`].
//! Production code uses [`ProcessEnv`], tests use a plain map.

use std::collections::{BTreeMap, HashMap};

/// Read-only view of environment variables.
pub trait EnvSource {
    /// Raw lookup. Implementations return `None` for unset variables.
    fn raw_var(&self, key: &str) -> Option<String>;

    /// Lookup that treats an empty value as unset.
    fn var(&self, key: &str) -> Option<String> {
        self.raw_var(key).filter(|v| !v.is_empty())
    }
}

/// The current process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl ProcessEnv {
    /// Load a `.env` file from the working directory (or a parent) into the
    /// process environment first. A missing file is not an error.
    pub fn with_dotenv() -> Self {
        match dotenvy::dotenv() {
            Ok(path) => log::debug!("Loaded environment from {}", path.display()),
            Err(err) if err.not_found() => log::debug!("No .env file found"),
            Err(err) => log::warn!("Ignoring unreadable .env file: {err}"),
        }
        ProcessEnv
    }
}

impl EnvSource for ProcessEnv {
    fn raw_var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl EnvSource for HashMap<String, String> {
    fn raw_var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl EnvSource for BTreeMap<String, String> {
    fn raw_var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl<E: EnvSource + ?Sized> EnvSource for &E {
    fn raw_var(&self, key: &str) -> Option<String> {
        (**self).raw_var(key)
    }
}
