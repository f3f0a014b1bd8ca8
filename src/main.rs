use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use num_bigint::BigUint;
use shamir_combine::config::{Config, CONFIG_ENV};
use shamir_combine::field::PrimeField;
use shamir_combine::input::ShareDocument;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Reconstruct Shamir secrets from JSON share documents.
#[derive(Parser)]
#[command(name = "shamir-combine")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Args {
    /// Share documents to process, in order
    files: Vec<PathBuf>,
    /// Prime modulus in decimal (overrides SHAMIR_PRIME and the config file)
    #[arg(long)]
    prime: Option<String>,
    /// TOML config file
    #[arg(long, env = CONFIG_ENV)]
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(e) = init_logging() {
        eprintln!("failed to initialise logging: {e}");
    }

    match run(args) {
        Ok(0) => ExitCode::SUCCESS,
        Ok(failed) => {
            error!(failed, "some files could not be processed");
            ExitCode::FAILURE
        }
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

/// Returns the number of files that failed.
fn run(args: Args) -> Result<usize> {
    let config = match &args.config {
        Some(path) => Config::from_path(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => Config::default(),
    }
    .with_env(|key| std::env::var(key).ok())
    .with_overrides(args.prime, args.files);

    let field = config.field().context("configuring modulus")?;
    info!(
        files = config.inputs.len(),
        modulus_bits = field.modulus().bits(),
        "starting reconstruction"
    );

    let mut failed = 0;
    for path in &config.inputs {
        println!("\nProcessing file: {}", path.display());
        match process_file(path, &field) {
            Ok(secret) => println!("Reconstructed secret c = {secret}"),
            Err(e) => {
                failed += 1;
                eprintln!("Error processing {}: {e:#}", path.display());
            }
        }
    }
    Ok(failed)
}

fn process_file(path: &Path, field: &PrimeField) -> Result<BigUint> {
    let document = ShareDocument::from_path(path)?;
    let secret = document.reconstruct(field)?;
    info!(path = %path.display(), k = document.threshold(), "reconstructed");
    Ok(secret)
}
