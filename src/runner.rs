//! Corpus runner: load, solve, time and report each instance.
//!
//! Each instance gets a fresh [`SearchEngine`]; only the search itself is
//! inside the timing window. Result lines are written (and flushed) in input
//! order as `n timeSeconds bestCost bestParenthesization`.
//!
//! Three channels stay apart: result lines go to the output writer, one
//! progress line per solved instance goes to the progress writer, and
//! diagnostics (skipped instances, search statistics) go through `tracing`.

use std::fmt;
use std::io::{self, BufRead, Write};
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::config::SolverConfig;
use crate::corpus::CorpusReader;
use crate::engine::SearchEngine;
use crate::error::{Error, SearchError};
use crate::instance::ChainInstance;
use crate::utils::catalan;

/// Outcome of one timed search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultRecord {
    pub n: usize,
    pub elapsed: Duration,
    pub best_cost: i64,
    pub best_repr: String,
    pub accepted: u64,
}

impl fmt::Display for ResultRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {:.6} {} {}",
            self.n,
            self.elapsed.as_secs_f64(),
            self.best_cost,
            self.best_repr
        )
    }
}

/// Counters for a finished run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Instance count from the corpus header.
    pub declared: usize,
    pub solved: usize,
    /// Instances rejected at load time or whose search failed.
    pub skipped: usize,
}

pub struct Runner {
    config: SolverConfig,
}

impl Runner {
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Search one instance and time the search.
    pub fn solve(&self, instance: &ChainInstance) -> Result<ResultRecord, SearchError> {
        let mut engine = match self.config.stack_limit {
            Some(limit) => SearchEngine::with_stack_limit(instance, limit),
            None => SearchEngine::new(instance),
        };

        let start = Instant::now();
        let outcome = engine.run();
        let elapsed = start.elapsed();

        let outcome = outcome?;
        let n = instance.len();
        let expected = u32::try_from(n - 1).ok().and_then(catalan);
        debug!(
            n,
            accepted = outcome.accepted,
            ?expected,
            "search finished"
        );
        Ok(ResultRecord {
            n,
            elapsed,
            best_cost: outcome.best_cost,
            best_repr: outcome.best_repr,
            accepted: outcome.accepted,
        })
    }

    /// Solve every instance of the corpus read from `input`, writing one result
    /// line per solved instance to `output`.
    ///
    /// Instances that fail validation or whose search fails are logged and
    /// skipped. A fatal error stops the run after the results gathered so far
    /// have been written.
    pub fn run<R: BufRead, W: Write>(&self, input: R, output: W) -> Result<RunSummary, Error> {
        self.run_with_progress(input, output, io::sink())
    }

    /// Like [`Runner::run`], and also reports each solved instance to
    /// `progress` as `solved instance i / T: n=.., time=.., best_cost=..`.
    pub fn run_with_progress<R: BufRead, W: Write, P: Write>(
        &self,
        input: R,
        output: W,
        progress: P,
    ) -> Result<RunSummary, Error> {
        let reader = CorpusReader::new(input, self.config.max_n)?;
        let mut sinks = Sinks { output, progress };
        if self.config.parallel {
            self.run_parallel(reader, &mut sinks)
        } else {
            self.run_sequential(reader, &mut sinks)
        }
    }

    fn run_sequential<R: BufRead, W: Write, P: Write>(
        &self,
        reader: CorpusReader<R>,
        sinks: &mut Sinks<W, P>,
    ) -> Result<RunSummary, Error> {
        let mut summary = RunSummary {
            declared: reader.declared(),
            ..RunSummary::default()
        };
        for (idx, item) in reader.enumerate() {
            let index = idx + 1;
            let outcome = match item {
                Ok(instance) => self.solve(&instance).map_err(|source| Error::Search {
                    index,
                    n: instance.len(),
                    source,
                }),
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => Err(e),
            };
            sinks.record(index, outcome, &mut summary)?;
        }
        Ok(summary)
    }

    #[cfg(feature = "parallel")]
    fn run_parallel<R: BufRead, W: Write, P: Write>(
        &self,
        reader: CorpusReader<R>,
        sinks: &mut Sinks<W, P>,
    ) -> Result<RunSummary, Error> {
        use rayon::prelude::*;

        let mut summary = RunSummary {
            declared: reader.declared(),
            ..RunSummary::default()
        };
        let mut loaded = Vec::new();
        let mut fatal = None;
        for (idx, item) in reader.enumerate() {
            match item {
                Err(e) if e.is_fatal() => {
                    fatal = Some(e);
                    break;
                }
                item => loaded.push((idx + 1, item)),
            }
        }

        let outcomes: Vec<(usize, Result<ResultRecord, Error>)> = loaded
            .into_par_iter()
            .map(|(index, item)| {
                let outcome = item.and_then(|instance| {
                    self.solve(&instance).map_err(|source| Error::Search {
                        index,
                        n: instance.len(),
                        source,
                    })
                });
                (index, outcome)
            })
            .collect();

        for (index, outcome) in outcomes {
            sinks.record(index, outcome, &mut summary)?;
        }
        match fatal {
            Some(e) => Err(e),
            None => Ok(summary),
        }
    }

    #[cfg(not(feature = "parallel"))]
    fn run_parallel<R: BufRead, W: Write, P: Write>(
        &self,
        reader: CorpusReader<R>,
        sinks: &mut Sinks<W, P>,
    ) -> Result<RunSummary, Error> {
        warn!("built without the `parallel` feature; solving sequentially");
        self.run_sequential(reader, sinks)
    }
}

/// Result and progress writers of one run.
struct Sinks<W, P> {
    output: W,
    progress: P,
}

impl<W: Write, P: Write> Sinks<W, P> {
    /// Write a solved instance or log a skipped one.
    fn record(
        &mut self,
        index: usize,
        outcome: Result<ResultRecord, Error>,
        summary: &mut RunSummary,
    ) -> Result<(), Error> {
        match outcome {
            Ok(rec) => {
                writeln!(self.output, "{rec}")?;
                self.output.flush()?;
                summary.solved += 1;
                writeln!(
                    self.progress,
                    "solved instance {} / {}: n={}, time={:.6}, best_cost={}",
                    index,
                    summary.declared,
                    rec.n,
                    rec.elapsed.as_secs_f64(),
                    rec.best_cost
                )?;
                self.progress.flush()?;
                Ok(())
            }
            Err(e) if e.is_fatal() => Err(e),
            Err(e) => {
                summary.skipped += 1;
                warn!(error = %e, "skipping instance");
                Ok(())
            }
        }
    }
}
