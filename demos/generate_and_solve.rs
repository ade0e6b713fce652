//! Example: generate a small corpus in memory and benchmark it.
//!
//! Run with:
//! `cargo run --example generate_and_solve`

use mcm_backtrack::corpus::write_corpus;
use mcm_backtrack::generator::{generate, GeneratorConfig};
use mcm_backtrack::summary::summarize;
use mcm_backtrack::{logging, Runner, SolverConfig};

fn main() -> anyhow::Result<()> {
    logging::init("info");

    let instances = generate(&GeneratorConfig {
        min_n: 2,
        max_n: 9,
        per_n: 3,
        max_dim: 50,
        seed: Some(7),
    })?;
    let mut corpus = Vec::new();
    write_corpus(&mut corpus, &instances)?;

    let mut results = Vec::new();
    let run = Runner::new(SolverConfig::default()).run(corpus.as_slice(), &mut results)?;
    println!("solved {} of {} instances", run.solved, run.declared);

    let timings = summarize("demo", results.as_slice())?;
    for row in &timings.rows {
        println!(
            "n={:>2}  samples={}  mean={:.6}s  max={:.6}s",
            row.n, row.samples, row.mean_s, row.max_s
        );
    }
    Ok(())
}
