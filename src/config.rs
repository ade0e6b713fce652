//! Solver configuration and its builder.

use crate::error::ConfigError;

/// Largest chain accepted by default.
pub const DEFAULT_MAX_N: usize = 100;

/// Settings for [`crate::runner::Runner`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SolverConfig {
    /// Instances with more factors are rejected at load time.
    pub max_n: usize,
    /// Parse stack bound; `None` uses `2n - 1` per instance.
    pub stack_limit: Option<usize>,
    /// Solve instances on rayon workers (needs the `parallel` feature).
    pub parallel: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_n: DEFAULT_MAX_N,
            stack_limit: None,
            parallel: false,
        }
    }
}

pub struct SolverBuilder {
    max_n: Option<usize>,
    stack_limit: Option<usize>,
    parallel: bool,
}

impl SolverBuilder {
    pub fn new() -> Self {
        Self {
            max_n: None,
            stack_limit: None,
            parallel: false,
        }
    }
    pub fn with_max_n(mut self, max_n: usize) -> Self {
        self.max_n = Some(max_n);
        self
    }
    pub fn with_stack_limit(mut self, limit: usize) -> Self {
        self.stack_limit = Some(limit);
        self
    }
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
    pub fn build(self) -> Result<SolverConfig, ConfigError> {
        let max_n = self.max_n.unwrap_or(DEFAULT_MAX_N);
        if max_n == 0 {
            return Err(ConfigError::ZeroMaxLength);
        }
        Ok(SolverConfig {
            max_n,
            stack_limit: self.stack_limit,
            parallel: self.parallel,
        })
    }
}

impl Default for SolverBuilder {
    fn default() -> Self {
        Self::new()
    }
}
