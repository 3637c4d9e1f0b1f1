//! Toolchain configuration
//!
//! Typed, validated configuration for a smart-contract toolchain: compiler
//! version, network profiles with signing keys, and binding generation.

pub mod codegen;
pub mod compiler;
pub mod config;
pub mod credential;
pub mod env;
pub mod error;
pub mod manifest;
pub mod networks;

pub use codegen::{CodegenSpec, CodegenTarget};
pub use compiler::CompilerSpec;
pub use config::{Config, CredentialPolicy, ManifestSource, NetworkProfile};
pub use credential::PrivateKey;
pub use env::{EnvSource, ProcessEnv};
pub use error::ConfigError;
pub use manifest::{Manifest, NetworkDecl};
pub use networks::Networks;
pub use secrecy::ExposeSecret;
