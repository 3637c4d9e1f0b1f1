use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::LevelFilter;
use std::path::PathBuf;
use std::process;

use toolchain_config::manifest::MANIFEST_FILE;
use toolchain_config::{Config, CredentialPolicy, Manifest, ProcessEnv};

#[derive(Parser)]
#[command(name = "toolchain")]
#[command(about = "Inspect and validate smart-contract toolchain configuration")]
struct Cli {
    /// Manifest to load instead of TOOLCHAIN_CONFIG / toolchain.toml
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Load networks without signing keys when their variables are unset
    #[arg(long, global = true)]
    allow_missing_credentials: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the resolved configuration
    Show {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Check that the configuration resolves
    Validate,
    /// List declared networks
    Networks,
    /// Write the built-in manifest as TOML
    Init {
        /// Destination file
        #[arg(short, long, default_value = MANIFEST_FILE)]
        path: PathBuf,
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}

impl Cli {
    fn policy(&self) -> CredentialPolicy {
        if self.allow_missing_credentials {
            CredentialPolicy::Optional
        } else {
            CredentialPolicy::Required
        }
    }

    fn load(&self) -> Result<Config> {
        let env = ProcessEnv::with_dotenv();
        match &self.config {
            Some(path) => {
                let manifest = Manifest::from_path(path)
                    .with_context(|| format!("Failed to read {}", path.display()))?;
                Config::resolve(&manifest, &env, self.policy()).context("Invalid configuration")
            }
            None => Config::load_with(&env, self.policy()).context("Invalid configuration"),
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    env_logger::builder()
        .filter_level(level)
        .parse_default_env()
        .init();

    if let Err(e) = run(&cli) {
        log::error!("{e:#}");
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Show { json } => {
            let config = cli.load()?;
            if *json {
                println!("{}", config.to_json()?);
            } else {
                config.print_summary();
            }
        }
        Commands::Validate => {
            let config = cli.load()?;
            println!(
                "Configuration OK: solc {}, {} network(s), {} bindings",
                config.solidity(),
                config.networks().len(),
                config.typechain().target()
            );
        }
        Commands::Networks => {
            let config = cli.load()?;
            for (name, network) in config.networks().iter() {
                let signer = if network.can_sign() { "signing" } else { "read-only" };
                println!("{name:<16} {:<48} {signer}", network.url());
            }
        }
        Commands::Init { path, force } => {
            Manifest::builtin()
                .write_to(path, *force)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Wrote {}", path.display());
        }
    }
    Ok(())
}
