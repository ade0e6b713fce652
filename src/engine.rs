//! Exhaustive shift-reduce search over parenthesizations.
//!
//! The engine walks every sequence of SHIFT / REDUCE moves reachable from the
//! empty frontier. Each sequence that consumes all factors and leaves a single
//! fragment is one full parenthesization, so a chain of `n` factors produces
//! exactly `Catalan(n - 1)` complete parses.
//!
//! At every visited state `(i, stack)` the engine, in order:
//! 1. SHIFTs factor `i` if one is left, explores, and pops it again;
//! 2. REDUCEs the top two fragments if there are two, explores, and restores
//!    the popped pair;
//! 3. ACCEPTs when all factors are shifted and one fragment remains.
//!
//! SHIFT is always explored before REDUCE, and the best solution is replaced
//! only on a strictly lower cost, so among equal-cost parses the first one
//! discovered wins.

use tracing::trace_span;

use crate::error::SearchError;
use crate::fragment::{combine, Fragment};
use crate::instance::ChainInstance;
use crate::stack::ParseStack;
use crate::utils::default_stack_limit;

/// Minimum-cost complete parse seen so far. `None` means "+infinity".
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BestSolution {
    best: Option<(i64, String)>,
}

impl BestSolution {
    /// Keep `candidate` if it is strictly cheaper than the current best.
    /// Returns whether it was kept.
    pub fn offer(&mut self, candidate: &Fragment) -> bool {
        match &self.best {
            Some((cost, _)) if candidate.cost >= *cost => false,
            _ => {
                self.best = Some((candidate.cost, candidate.repr.clone()));
                true
            }
        }
    }

    pub fn cost(&self) -> Option<i64> {
        self.best.as_ref().map(|(c, _)| *c)
    }

    pub fn repr(&self) -> Option<&str> {
        self.best.as_ref().map(|(_, r)| r.as_str())
    }

    fn take(&mut self) -> Option<(i64, String)> {
        self.best.take()
    }
}

/// Result of one completed search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchOutcome {
    pub best_cost: i64,
    pub best_repr: String,
    /// Complete parses considered.
    pub accepted: u64,
}

/// Per-instance search context.
///
/// Owns the parse stack and the best-solution tracker; nothing is shared
/// between instances, so independent engines may run on separate threads.
///
/// ```
/// use mcm_backtrack::{ChainInstance, SearchEngine};
///
/// let instance = ChainInstance::new(vec![10, 20, 30, 5]).unwrap();
/// let outcome = SearchEngine::new(&instance).run().unwrap();
/// assert_eq!(outcome.best_cost, 4000);
/// assert_eq!(outcome.best_repr, "(M1 (M2 M3))");
/// assert_eq!(outcome.accepted, 2);
/// ```
pub struct SearchEngine<'a> {
    instance: &'a ChainInstance,
    stack: ParseStack,
    best: BestSolution,
    accepted: u64,
}

impl<'a> SearchEngine<'a> {
    /// Engine whose stack is bounded at `2n - 1` fragments.
    pub fn new(instance: &'a ChainInstance) -> Self {
        Self::with_stack_limit(instance, default_stack_limit(instance.len()))
    }

    /// Engine with an explicit stack bound.
    pub fn with_stack_limit(instance: &'a ChainInstance, limit: usize) -> Self {
        Self {
            instance,
            stack: ParseStack::with_limit(limit),
            best: BestSolution::default(),
            accepted: 0,
        }
    }

    pub fn instance(&self) -> &ChainInstance {
        self.instance
    }

    /// Current frontier; empty whenever no search is in progress.
    pub fn stack(&self) -> &ParseStack {
        &self.stack
    }

    /// Reset the context and enumerate every parenthesization.
    ///
    /// Safe to call repeatedly; each call starts from a clean state and yields
    /// the same outcome.
    pub fn run(&mut self) -> Result<SearchOutcome, SearchError> {
        let n = self.instance.len();
        let span = trace_span!("search", n);
        let _enter = span.enter();

        self.stack.clear();
        self.best = BestSolution::default();
        self.accepted = 0;

        if let Err(err) = self.backtrack(1) {
            // leave no half-explored frontier behind
            self.stack.clear();
            return Err(err);
        }
        debug_assert!(self.stack.is_empty(), "unbalanced push/pop");

        let (best_cost, best_repr) = self
            .best
            .take()
            .ok_or(SearchError::NoCompleteParse { n })?;
        Ok(SearchOutcome {
            best_cost,
            best_repr,
            accepted: self.accepted,
        })
    }

    /// Explore every move sequence from state `(i, self.stack)`; on return the
    /// stack is exactly as it was on entry.
    fn backtrack(&mut self, i: usize) -> Result<(), SearchError> {
        let n = self.instance.len();
        debug_assert!(self.stack.covers_prefix(i - 1));

        // SHIFT
        if i <= n {
            self.stack.push(self.instance.leaf(i))?;
            self.backtrack(i + 1)?;
            self.stack.pop()?;
        }

        // REDUCE
        if self.stack.len() >= 2 {
            let right = self.stack.pop()?;
            let left = self.stack.pop()?;
            self.stack.push(combine(&left, &right)?)?;
            self.backtrack(i)?;
            self.stack.pop()?;
            self.stack.push(left)?;
            self.stack.push(right)?;
        }

        // ACCEPT
        if i > n && self.stack.len() == 1 {
            if let Some(candidate) = self.stack.top() {
                self.accepted += 1;
                self.best.offer(candidate);
            }
        }

        Ok(())
    }
}
