use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use mcm_backtrack::generator::{generate_to, GeneratorConfig};
use mcm_backtrack::logging;
use tracing::debug;

/// Generate random matrix-chain instances.
#[derive(Parser, Debug)]
#[command(name = "mcm_generate", version)]
struct Args {
    /// Smallest chain length (number of matrices)
    min_n: usize,
    /// Largest chain length
    max_n: usize,
    /// Instances per chain length
    m: usize,
    /// Largest matrix dimension
    max_dim: u32,
    /// Corpus file to write
    output: PathBuf,
    /// Seed for a reproducible corpus
    #[arg(long)]
    seed: Option<u64>,
}

fn main() {
    logging::init("info");
    let args = Args::parse();
    if let Err(err) = run(args) {
        eprintln!("mcm_generate: {err:#}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let config = GeneratorConfig {
        min_n: args.min_n,
        max_n: args.max_n,
        per_n: args.m,
        max_dim: args.max_dim,
        seed: args.seed,
    };
    config.validate().context("invalid generator settings")?;

    let file = File::create(&args.output)
        .with_context(|| format!("cannot open {} for writing", args.output.display()))?;
    debug!(seed = ?config.seed, "writing corpus");
    let written = generate_to(&config, BufWriter::new(file))
        .with_context(|| format!("failed writing {}", args.output.display()))?;

    println!(
        "generated {} instances across n in [{}..{}], each repeated {} times",
        written, config.min_n, config.max_n, config.per_n
    );
    println!("saved to file: {}", args.output.display());
    Ok(())
}
