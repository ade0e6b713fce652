use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use mcm_backtrack::logging;
use mcm_backtrack::summary::{summarize, TimingSummary};
use tracing::warn;

/// Average solve time per chain length across result files.
#[derive(Parser, Debug)]
#[command(name = "mcm_summary", version)]
struct Args {
    /// Result files (`n time cost parenthesization` per line)
    #[arg(required = true)]
    results: Vec<PathBuf>,
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Csv,
    Table,
    Json,
}

fn main() {
    logging::init("warn");
    let args = Args::parse();
    if let Err(err) = run(args) {
        eprintln!("mcm_summary: {err:#}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let mut summaries = Vec::with_capacity(args.results.len());
    for path in &args.results {
        let file =
            File::open(path).with_context(|| format!("cannot open {}", path.display()))?;
        let summary = summarize(label_for(path), BufReader::new(file))
            .with_context(|| format!("failed reading {}", path.display()))?;
        if summary.is_empty() {
            warn!("no valid data found in {}, skipping", path.display());
            continue;
        }
        summaries.push(summary);
    }

    match args.format {
        OutputFormat::Csv => write_csv(&summaries),
        OutputFormat::Table => write_table(&summaries),
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&summaries)?);
        }
    }
    Ok(())
}

/// `results_backtracking.txt` -> `results_backtracking`.
fn label_for(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn write_csv(summaries: &[TimingSummary]) {
    println!("label,n,samples,mean_s,min_s,max_s");
    for s in summaries {
        for row in &s.rows {
            println!(
                "{},{},{},{:.6},{:.6},{:.6}",
                s.label, row.n, row.samples, row.mean_s, row.min_s, row.max_s
            );
        }
    }
}

fn write_table(summaries: &[TimingSummary]) {
    let mut col1 = "label".len();
    for s in summaries {
        col1 = col1.max(s.label.len());
    }

    println!(
        "{:<col1$}  {:>6}  {:>8}  {:>12}  {:>12}  {:>12}",
        "label",
        "n",
        "samples",
        "mean_s",
        "min_s",
        "max_s",
        col1 = col1
    );
    println!(
        "{:-<col1$}  {:-<6}  {:-<8}  {:-<12}  {:-<12}  {:-<12}",
        "",
        "",
        "",
        "",
        "",
        "",
        col1 = col1
    );
    for s in summaries {
        for row in &s.rows {
            println!(
                "{:<col1$}  {:>6}  {:>8}  {:>12.6}  {:>12.6}  {:>12.6}",
                s.label,
                row.n,
                row.samples,
                row.mean_s,
                row.min_s,
                row.max_s,
                col1 = col1
            );
        }
    }
}
