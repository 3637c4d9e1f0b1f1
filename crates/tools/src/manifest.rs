//! Declared configuration as written in `toolchain.toml`.
//!
//! A manifest carries no secrets: account entries are `${VAR}` references
//! resolved by [`crate::Config::resolve`].
//!
//! ```toml
//! solidity = "0.8.9"
//!
//! [networks.hyperspace]
//! url = "https://rpc.ankr.com/filecoin_testnet"
//! accounts = ["${PRIVATE_KEY}"]
//!
//! [typechain]
//! outDir = "types"
//! target = "ethers-v5"
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::codegen::{CodegenSpec, CodegenTarget};
use crate::credential::CredentialRef;
use crate::error::ConfigError;
use crate::networks::Networks;

/// Default manifest file name, looked up in the working directory.
pub const MANIFEST_FILE: &str = "toolchain.toml";

/// Environment variable the built-in networks sign with.
pub const PRIVATE_KEY_VAR: &str = "PRIVATE_KEY";

/// A network as declared, before credentials are resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkDecl {
    pub url: String,
    #[serde(default)]
    pub accounts: Vec<String>,
}

impl NetworkDecl {
    pub fn new(url: impl Into<String>, accounts: Vec<String>) -> Self {
        NetworkDecl {
            url: url.into(),
            accounts,
        }
    }

    /// Network signed by the key in `variable`.
    pub fn signed_by(url: impl Into<String>, variable: &str) -> Self {
        NetworkDecl::new(url, vec![CredentialRef::to_variable(variable)])
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub solidity: String,
    #[serde(default)]
    pub networks: Networks<NetworkDecl>,
    #[serde(default)]
    pub typechain: CodegenSpec,
}

impl Manifest {
    /// Filecoin Hyperspace and Avalanche Fuji testnets, both signed with
    /// `PRIVATE_KEY`, ethers v5 bindings in `types/`.
    pub fn builtin() -> Self {
        let networks = Networks::from_unique(vec![
            (
                "hyperspace".to_string(),
                NetworkDecl::signed_by("https://rpc.ankr.com/filecoin_testnet", PRIVATE_KEY_VAR),
            ),
            (
                "fuji".to_string(),
                NetworkDecl::signed_by("https://api.avax-test.network/ext/bc/C/rpc", PRIVATE_KEY_VAR),
            ),
        ]);

        Manifest {
            solidity: "0.8.9".to_string(),
            networks,
            typechain: CodegenSpec::new("types", CodegenTarget::EthersV5),
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::MissingConfigFile(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        log::debug!("Read manifest from {}", path.display());
        Self::from_toml_str(&content)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Write the manifest as TOML. Refuses to replace an existing file
    /// unless `overwrite` is set.
    pub fn write_to(&self, path: impl AsRef<Path>, overwrite: bool) -> Result<(), ConfigError> {
        let path = path.as_ref();
        if path.exists() && !overwrite {
            return Err(ConfigError::Io(std::io::Error::new(
                std::io::ErrorKind::AlreadyExists,
                format!("{} already exists", path.display()),
            )));
        }
        std::fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }
}
