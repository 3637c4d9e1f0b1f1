use std::path::PathBuf;
use thiserror::Error;

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Configuration file not found: {}", .0.display())]
    MissingConfigFile(PathBuf),

    #[error("Invalid compiler version: {0}. Expected MAJOR.MINOR.PATCH")]
    InvalidCompilerVersion(String),

    #[error("Invalid URL for network '{network}': {url}. Must start with http:// or https://")]
    InvalidUrl { network: String, url: String },

    #[error("Network '{0}' is declared more than once")]
    DuplicateNetwork(String),

    #[error("Unknown network: {0}")]
    UnknownNetwork(String),

    #[error("Invalid codegen target: {0}. Must be: ethers-v5, ethers-v6, web3-v1, or truffle-v5")]
    InvalidCodegenTarget(String),

    #[error("Network '{network}' declares a literal credential; use an environment reference like ${{PRIVATE_KEY}}")]
    LiteralCredential { network: String },

    #[error("Network '{network}' requires environment variable {variable}, which is not set")]
    MissingCredential { network: String, variable: String },

    #[error("Network '{network}': environment variable {variable} is not a valid private key ({reason})")]
    InvalidCredential {
        network: String,
        variable: String,
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_credential_message_names_variable() {
        let err = ConfigError::MissingCredential {
            network: "fuji".to_string(),
            variable: "PRIVATE_KEY".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("fuji"));
        assert!(msg.contains("PRIVATE_KEY"));
    }

    #[test]
    fn test_literal_credential_message_shows_reference_syntax() {
        let err = ConfigError::LiteralCredential {
            network: "hyperspace".to_string(),
        };
        assert!(err.to_string().contains("${PRIVATE_KEY}"));
    }
}
