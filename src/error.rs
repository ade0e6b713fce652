//! Error taxonomy for loading, searching and running corpora.
//!
//! Errors split into two classes:
//! - *local* errors concern a single instance (bad values, an oversize chain, a
//!   stack capacity violation or cost overflow during its search). The runner
//!   logs them and moves on to the next instance.
//! - *fatal* errors (I/O, a malformed token stream, invalid configuration) abort
//!   the whole run.
//!
//! [`Error::is_fatal`] makes the distinction explicit.

use std::io;

use thiserror::Error;

/// Parse stack capacity violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StackError {
    #[error("parse stack overflow (limit: {limit})")]
    Overflow { limit: usize },

    #[error("parse stack underflow")]
    Underflow,
}

/// A fragment whose multiplication count does not fit in an `i64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cost of factors {first}..={last} overflows a 64-bit accumulator")]
pub struct CostOverflow {
    pub first: usize,
    pub last: usize,
}

/// Failures of a single search.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error(transparent)]
    Stack(#[from] StackError),

    #[error(transparent)]
    CostOverflow(#[from] CostOverflow),

    #[error("search over {n} factors finished without a complete parse")]
    NoCompleteParse { n: usize },
}

/// Values that do not describe a valid matrix chain.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InstanceError {
    #[error("a chain needs at least one factor (got {dims} dimensions)")]
    EmptyChain { dims: usize },

    #[error("dimension d[{index}] is zero")]
    ZeroDimension { index: usize },

    #[error("chain of {n} factors exceeds the configured maximum of {max}")]
    ChainTooLong { n: usize, max: usize },
}

/// Problems with the corpus token stream itself.
#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("corpus read failed: {0}")]
    Io(#[from] io::Error),

    #[error("line {line}: unexpected end of corpus, expected {expected}")]
    UnexpectedEof { line: usize, expected: &'static str },

    #[error("line {line}: invalid token '{token}', expected {expected}")]
    InvalidToken {
        line: usize,
        token: String,
        expected: &'static str,
    },
}

/// Rejected generator or solver settings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("minimum chain length must be at least 1")]
    ZeroMinLength,

    #[error("minimum chain length {min_n} exceeds maximum {max_n}")]
    InvertedRange { min_n: usize, max_n: usize },

    #[error("maximum dimension must be at least 1")]
    ZeroMaxDimension,

    #[error("maximum chain length must be at least 1")]
    ZeroMaxLength,

    #[error("{per_n} instances for each of {lengths} chain lengths overflows the instance count")]
    TooManyInstances { per_n: usize, lengths: usize },
}

/// Top-level error returned by the runner.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Corpus(#[from] CorpusError),

    #[error("instance {index}: {source}")]
    Instance {
        index: usize,
        #[source]
        source: InstanceError,
    },

    #[error("instance {index} (n={n}): {source}")]
    Search {
        index: usize,
        n: usize,
        #[source]
        source: SearchError,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("write failed: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    /// Whether the error ends the run, as opposed to skipping one instance.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Error::Instance { .. } | Error::Search { .. })
    }
}
