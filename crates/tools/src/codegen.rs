use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::ConfigError;

/// Binding generator backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CodegenTarget {
    /// ethers.js v5 contract factories
    EthersV5,
    /// ethers.js v6 contract factories
    EthersV6,
    /// web3.js v1 contract wrappers
    Web3V1,
    /// Truffle v5 contract wrappers
    TruffleV5,
}

impl CodegenTarget {
    pub const ALL: [CodegenTarget; 4] = [
        CodegenTarget::EthersV5,
        CodegenTarget::EthersV6,
        CodegenTarget::Web3V1,
        CodegenTarget::TruffleV5,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CodegenTarget::EthersV5 => "ethers-v5",
            CodegenTarget::EthersV6 => "ethers-v6",
            CodegenTarget::Web3V1 => "web3-v1",
            CodegenTarget::TruffleV5 => "truffle-v5",
        }
    }
}

impl FromStr for CodegenTarget {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        CodegenTarget::ALL
            .into_iter()
            .find(|t| t.as_str() == wanted)
            .ok_or_else(|| ConfigError::InvalidCodegenTarget(s.to_string()))
    }
}

impl TryFrom<String> for CodegenTarget {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CodegenTarget> for String {
    fn from(target: CodegenTarget) -> Self {
        target.as_str().to_string()
    }
}

impl fmt::Display for CodegenTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where and how typed contract bindings are generated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodegenSpec {
    #[serde(rename = "outDir", alias = "out_dir")]
    pub out_dir: PathBuf,
    pub target: CodegenTarget,
}

impl CodegenSpec {
    pub fn new(out_dir: impl Into<PathBuf>, target: CodegenTarget) -> Self {
        CodegenSpec {
            out_dir: out_dir.into(),
            target,
        }
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    pub fn target(&self) -> CodegenTarget {
        self.target
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.out_dir.as_os_str().is_empty() {
            return Err(ConfigError::MissingField("typechain.outDir".to_string()));
        }
        Ok(())
    }
}

impl Default for CodegenSpec {
    fn default() -> Self {
        CodegenSpec::new("types", CodegenTarget::EthersV5)
    }
}
