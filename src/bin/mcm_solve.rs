use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use mcm_backtrack::config::DEFAULT_MAX_N;
use mcm_backtrack::{logging, Runner, SolverBuilder};

/// Solve every instance of a corpus by exhaustive backtracking.
///
/// Writes `n timeSeconds bestCost bestParenthesization` per instance to the
/// output file and a progress line per instance to stdout; diagnostics go to
/// stderr.
#[derive(Parser, Debug)]
#[command(name = "mcm_solve", version)]
struct Args {
    /// Corpus file to read
    input: PathBuf,
    /// Result file to write
    output: PathBuf,
    /// Reject chains with more matrices than this
    #[arg(long, default_value_t = DEFAULT_MAX_N)]
    max_n: usize,
    /// Parse stack bound (defaults to 2n-1 per instance)
    #[arg(long)]
    stack_limit: Option<usize>,
    /// Solve instances in parallel (requires the `parallel` feature)
    #[arg(long)]
    parallel: bool,
}

fn main() {
    logging::init("info");
    let args = Args::parse();
    if let Err(err) = run(args) {
        eprintln!("mcm_solve: {err:#}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let mut builder = SolverBuilder::new()
        .with_max_n(args.max_n)
        .with_parallel(args.parallel);
    if let Some(limit) = args.stack_limit {
        builder = builder.with_stack_limit(limit);
    }
    let config = builder.build().context("invalid solver settings")?;

    let input = File::open(&args.input)
        .with_context(|| format!("cannot open input file {}", args.input.display()))?;
    let output = File::create(&args.output)
        .with_context(|| format!("cannot open output file {}", args.output.display()))?;

    let summary = Runner::new(config)
        .run_with_progress(
            BufReader::new(input),
            BufWriter::new(output),
            io::stdout().lock(),
        )
        .with_context(|| format!("run over {} aborted", args.input.display()))?;

    println!(
        "processed {} instances ({} solved, {} skipped), results saved to {}",
        summary.declared,
        summary.solved,
        summary.skipped,
        args.output.display()
    );
    Ok(())
}
