//! Exhaustive matrix-chain parenthesization benchmark.
//!
//! This crate enumerates *every* way to fully parenthesize a chain of matrix
//! products with a shift-reduce backtracking search, and reports the cheapest
//! grouping together with the time spent finding it. It is a brute-force
//! reference: the work grows with the Catalan numbers, so it is meant for
//! benchmarking small chains, not for solving large ones.
//!
//! ## Core idea
//! 1. A chain of `n` matrices is described by `n + 1` dimensions
//!    ([`ChainInstance`]).
//! 2. The [`SearchEngine`] shifts factors onto a [`stack::ParseStack`] and
//!    reduces adjacent fragments with [`fragment::combine`], exploring every
//!    move sequence and undoing each move on the way back.
//! 3. Every sequence that ends with a single fragment is a full
//!    parenthesization; the cheapest one wins.
//!
//! ## Quick start
//! ```
//! use mcm_backtrack::{ChainInstance, SearchEngine};
//!
//! let instance = ChainInstance::new(vec![30, 35, 15, 5, 10, 20, 25]).unwrap();
//! let outcome = SearchEngine::new(&instance).run().unwrap();
//! assert_eq!(outcome.best_cost, 15125);
//! assert_eq!(outcome.best_repr, "((M1 (M2 M3)) ((M4 M5) M6))");
//! ```
//!
//! ## Benchmark pipeline
//! - [`generator`] writes random corpora ([`corpus::write_corpus`]).
//! - [`Runner`] streams a corpus, times each search and writes one result line
//!   per instance.
//! - [`summary`] averages solve times per chain length across result files.
//!
//! The `mcm_generate`, `mcm_solve` and `mcm_summary` binaries wrap these.

pub mod config;
pub mod corpus;
pub mod engine;
pub mod error;
pub mod fragment;
pub mod generator;
pub mod instance;
pub mod logging;
pub mod runner;
pub mod stack;
pub mod summary;
pub mod utils;

pub use crate::config::{SolverBuilder, SolverConfig};
pub use crate::engine::{SearchEngine, SearchOutcome};
pub use crate::error::Error;
pub use crate::instance::ChainInstance;
pub use crate::runner::{ResultRecord, RunSummary, Runner};
