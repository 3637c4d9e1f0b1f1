use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ConfigError;

/// Compiler release the toolchain should invoke, e.g. `0.8.9`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CompilerSpec {
    version: String,
}

impl CompilerSpec {
    /// Accepts `MAJOR.MINOR.PATCH` with numeric components only.
    pub fn parse(version: &str) -> Result<Self, ConfigError> {
        let parts: Vec<&str> = version.split('.').collect();
        let numeric = |p: &&str| !p.is_empty() && p.chars().all(|c| c.is_ascii_digit());

        if parts.len() != 3 || !parts.iter().all(numeric) {
            return Err(ConfigError::InvalidCompilerVersion(version.to_string()));
        }

        Ok(CompilerSpec {
            version: version.to_string(),
        })
    }

    pub fn version(&self) -> &str {
        &self.version
    }
}

impl TryFrom<String> for CompilerSpec {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        CompilerSpec::parse(&value)
    }
}

impl From<CompilerSpec> for String {
    fn from(spec: CompilerSpec) -> Self {
        spec.version
    }
}

impl fmt::Display for CompilerSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.version)
    }
}
