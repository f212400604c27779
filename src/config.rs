//! Configuration options for the MCTS algorithm
//!
//! This module defines the configuration parameters that control the
//! behavior of the search.

use crate::{MCTSError, Result};

/// Exploration constant used by UCT unless configured otherwise.
pub const DEFAULT_EXPLORATION_CONSTANT: f64 = 1.141;

/// Criteria for selecting the best child after search is complete
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BestChildCriteria {
    /// Select the root child with the most visits
    ///
    /// Ties go to the child that comes first in legal-move order.
    MostVisits,

    /// Select the root child with the highest win ratio (Q/N)
    ///
    /// Favors high-value moves even if they were visited rarely, so it is
    /// noisier than [`BestChildCriteria::MostVisits`].
    HighestValue,
}

/// What selection does when the descent lands on a terminal node
///
/// A terminal node has no children, so no unvisited child can be picked
/// below it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalLeaves {
    /// Report "no leaf" and skip the iteration
    ///
    /// A proven win stops collecting visits once the tree policy prefers
    /// it, so the final most-visited choice can drift to another move.
    Skip,

    /// Use the terminal node itself as the leaf
    ///
    /// Its rollout is the immediate winner query, and the result is
    /// backpropagated as usual.
    Rescore,
}

/// Configuration for the MCTS algorithm
///
/// Use the builder methods to create a customized configuration.
///
/// # Example
///
/// ```
/// use uct_mcts::{MCTSConfig, config::BestChildCriteria};
///
/// let config = MCTSConfig::default()
///     .with_exploration_constant(1.5)
///     .with_max_iterations(10_000)
///     .with_seed(7)
///     .with_best_child_criteria(BestChildCriteria::MostVisits);
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct MCTSConfig {
    /// Exploration constant `c` in the UCT formula
    ///
    /// Higher values favor exploration of less-visited nodes.
    pub exploration_constant: f64,

    /// Number of select/expand/simulate/backpropagate iterations per search
    ///
    /// This is the only termination control of a search.
    pub max_iterations: usize,

    /// Seed for the searcher's random number generator
    ///
    /// `None` seeds from entropy, which makes searches non-reproducible.
    pub seed: Option<u64>,

    /// Criteria for selecting the best child after search
    pub best_child_criteria: BestChildCriteria,

    /// Handling of terminal nodes reached while descending the tree
    pub terminal_leaves: TerminalLeaves,
}

impl Default for MCTSConfig {
    fn default() -> Self {
        MCTSConfig {
            exploration_constant: DEFAULT_EXPLORATION_CONSTANT,
            max_iterations: 1_000,
            seed: None,
            best_child_criteria: BestChildCriteria::MostVisits,
            terminal_leaves: TerminalLeaves::Rescore,
        }
    }
}

impl MCTSConfig {
    /// Sets the exploration constant
    pub fn with_exploration_constant(mut self, constant: f64) -> Self {
        self.exploration_constant = constant;
        self
    }

    /// Sets the number of iterations per search
    pub fn with_max_iterations(mut self, iterations: usize) -> Self {
        self.max_iterations = iterations;
        self
    }

    /// Sets the seed of the searcher's random number generator
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the criteria for selecting the best child
    pub fn with_best_child_criteria(mut self, criteria: BestChildCriteria) -> Self {
        self.best_child_criteria = criteria;
        self
    }

    /// Sets how terminal nodes reached during descent are handled
    pub fn with_terminal_leaves(mut self, terminal_leaves: TerminalLeaves) -> Self {
        self.terminal_leaves = terminal_leaves;
        self
    }

    /// Checks the configuration for usage errors
    pub fn validate(&self) -> Result<()> {
        if self.max_iterations == 0 {
            return Err(MCTSError::InvalidIterations);
        }
        if !self.exploration_constant.is_finite() || self.exploration_constant < 0.0 {
            return Err(MCTSError::InvalidConfiguration(format!(
                "exploration constant must be finite and non-negative, got {}",
                self.exploration_constant
            )));
        }
        Ok(())
    }
}
