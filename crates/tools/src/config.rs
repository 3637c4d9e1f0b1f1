//! Resolved toolchain configuration
//!
//! A [`Manifest`] declares what the toolchain should use; resolving it
//! against an [`EnvSource`] produces a validated, immutable [`Config`].
//! The manifest is chosen in priority order:
//!
//! 1. The file named by `TOOLCHAIN_CONFIG` (must exist)
//! 2. `toolchain.toml` in the working directory
//! 3. The built-in declaration ([`Manifest::builtin`])
//!
//! # Examples
//!
//! ```rust,no_run
//! use toolchain_config::Config;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::load()?;
//! println!("Compiler: {}", config.solidity());
//! for (name, network) in config.networks().iter() {
//!     println!("{name}: {}", network.url());
//! }
//! # Ok(())
//! # }
//! ```

use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::codegen::CodegenSpec;
use crate::compiler::CompilerSpec;
use crate::credential::{CredentialRef, PrivateKey};
use crate::env::{EnvSource, ProcessEnv};
use crate::error::ConfigError;
use crate::manifest::{Manifest, NetworkDecl, MANIFEST_FILE};
use crate::networks::Networks;

/// Environment variable naming an explicit manifest path.
pub const CONFIG_PATH_VAR: &str = "TOOLCHAIN_CONFIG";

/// What to do when a referenced credential variable is not set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CredentialPolicy {
    /// Fail the load with [`ConfigError::MissingCredential`].
    #[default]
    Required,
    /// Leave the credential out of the network's account list. Useful for
    /// read-only work such as compiling or generating bindings.
    Optional,
}

/// RPC endpoint plus the keys used to sign transactions on it.
#[derive(Debug, Clone, Serialize)]
pub struct NetworkProfile {
    url: String,
    accounts: Vec<PrivateKey>,
}

impl NetworkProfile {
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Signing keys in declaration order.
    pub fn accounts(&self) -> &[PrivateKey] {
        &self.accounts
    }

    /// Whether transactions can be signed for this network.
    pub fn can_sign(&self) -> bool {
        !self.accounts.is_empty()
    }
}

/// Source the manifest was read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestSource {
    File(PathBuf),
    Builtin,
}

/// Complete, validated toolchain configuration
#[derive(Debug, Clone, Serialize)]
pub struct Config {
    solidity: CompilerSpec,
    networks: Networks<NetworkProfile>,
    typechain: CodegenSpec,
}

impl Config {
    /// Load using the process environment (after reading `.env`) and
    /// requiring every referenced credential.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with(&ProcessEnv::with_dotenv(), CredentialPolicy::Required)
    }

    /// Pick a manifest (see module docs) and resolve it against `env`.
    pub fn load_with(env: &impl EnvSource, policy: CredentialPolicy) -> Result<Self, ConfigError> {
        let (manifest, source) = Self::find_manifest(env, Path::new(MANIFEST_FILE))?;
        match &source {
            ManifestSource::File(path) => log::info!("Using manifest {}", path.display()),
            ManifestSource::Builtin => log::info!("Using built-in manifest"),
        }
        Self::resolve(&manifest, env, policy)
    }

    /// Locate the manifest. `fallback` is only used when `TOOLCHAIN_CONFIG`
    /// is unset, and only if it exists.
    pub fn find_manifest(
        env: &impl EnvSource,
        fallback: &Path,
    ) -> Result<(Manifest, ManifestSource), ConfigError> {
        if let Some(path) = env.var(CONFIG_PATH_VAR) {
            let path = PathBuf::from(path);
            let manifest = Manifest::from_path(&path)?;
            return Ok((manifest, ManifestSource::File(path)));
        }

        if fallback.exists() {
            let manifest = Manifest::from_path(fallback)?;
            return Ok((manifest, ManifestSource::File(fallback.to_path_buf())));
        }

        Ok((Manifest::builtin(), ManifestSource::Builtin))
    }

    /// Validate `manifest` and substitute every credential reference with
    /// the value found in `env`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - The compiler version is not `MAJOR.MINOR.PATCH`
    /// - A network URL is empty or not http(s)
    /// - An account entry is a literal instead of a `${VAR}` reference
    /// - A referenced variable is unset under [`CredentialPolicy::Required`]
    /// - A referenced variable is set but not a 32-byte hex key
    /// - The binding output directory is empty
    pub fn resolve(
        manifest: &Manifest,
        env: &impl EnvSource,
        policy: CredentialPolicy,
    ) -> Result<Self, ConfigError> {
        let solidity = CompilerSpec::parse(&manifest.solidity)?;
        manifest.typechain.validate()?;

        let networks = manifest
            .networks
            .try_map(|name, decl| Self::resolve_network(name, decl, env, policy))?;

        log::debug!(
            "Resolved {} network(s), compiler {}, {} bindings",
            networks.len(),
            solidity,
            manifest.typechain.target()
        );

        Ok(Config {
            solidity,
            networks,
            typechain: manifest.typechain.clone(),
        })
    }

    fn resolve_network(
        name: &str,
        decl: &NetworkDecl,
        env: &impl EnvSource,
        policy: CredentialPolicy,
    ) -> Result<NetworkProfile, ConfigError> {
        Self::validate_url(name, &decl.url)?;

        let mut accounts = Vec::with_capacity(decl.accounts.len());
        for entry in &decl.accounts {
            let reference = CredentialRef::parse(name, entry)?;
            let variable = reference.variable();

            let Some(value) = env.var(variable) else {
                match policy {
                    CredentialPolicy::Required => {
                        return Err(ConfigError::MissingCredential {
                            network: name.to_string(),
                            variable: variable.to_string(),
                        });
                    }
                    CredentialPolicy::Optional => {
                        log::warn!("{variable} is not set; network '{name}' will not sign with it");
                        continue;
                    }
                }
            };

            let key = PrivateKey::parse(value).map_err(|reason| ConfigError::InvalidCredential {
                network: name.to_string(),
                variable: variable.to_string(),
                reason,
            })?;
            accounts.push(key);
        }

        Ok(NetworkProfile {
            url: decl.url.clone(),
            accounts,
        })
    }

    fn validate_url(network: &str, url: &str) -> Result<(), ConfigError> {
        if url.is_empty() {
            return Err(ConfigError::MissingField(format!("networks.{network}.url")));
        }

        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ConfigError::InvalidUrl {
                network: network.to_string(),
                url: url.to_string(),
            });
        }

        Ok(())
    }

    pub fn solidity(&self) -> &CompilerSpec {
        &self.solidity
    }

    pub fn networks(&self) -> &Networks<NetworkProfile> {
        &self.networks
    }

    pub fn typechain(&self) -> &CodegenSpec {
        &self.typechain
    }

    /// Look up a network profile by name.
    pub fn network(&self, name: &str) -> Result<&NetworkProfile, ConfigError> {
        self.networks
            .get(name)
            .ok_or_else(|| ConfigError::UnknownNetwork(name.to_string()))
    }

    /// Human-readable summary. Keys are counted, never shown.
    pub fn summary(&self) -> String {
        let mut lines = vec![
            "Toolchain configuration".to_string(),
            format!("  solc      {}", self.solidity),
        ];

        if self.networks.is_empty() {
            lines.push("  network   (none declared)".to_string());
        }
        for (name, network) in self.networks.iter() {
            let signing = match network.accounts.len() {
                0 => "read-only".to_string(),
                n => format!("{n} signing key(s)"),
            };
            lines.push(format!("  network   {name} -> {} [{signing}]", network.url));
        }

        lines.push(format!(
            "  bindings  {} -> {}",
            self.typechain.target(),
            self.typechain.out_dir().display()
        ));
        lines.join("\n")
    }

    pub fn print_summary(&self) {
        println!("{}", self.summary());
    }

    /// Get configuration as JSON, keys redacted
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
