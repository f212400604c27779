//! Statistics collection for MCTS searches

use std::time::Duration;

/// Statistics collected during an MCTS search
#[derive(Debug, Clone)]
pub struct SearchStatistics {
    /// Number of iterations performed, skipped ones included
    pub iterations: usize,

    /// Iterations in which selection found no leaf
    pub skipped_iterations: usize,

    /// Rollouts that ended with a winner
    pub decisive_rollouts: usize,

    /// Rollouts that ended in a draw
    pub drawn_rollouts: usize,

    /// Total time spent searching
    pub total_time: Duration,

    /// Total number of nodes in the tree
    pub tree_size: usize,

    /// Maximum depth reached in the tree
    pub max_depth: usize,
}

impl SearchStatistics {
    /// Creates a new, empty statistics object
    pub fn new() -> Self {
        SearchStatistics {
            iterations: 0,
            skipped_iterations: 0,
            decisive_rollouts: 0,
            drawn_rollouts: 0,
            total_time: Duration::from_secs(0),
            tree_size: 1, // Start with root node
            max_depth: 0,
        }
    }

    /// Number of iterations that ran a rollout and backpropagated it
    pub fn completed_iterations(&self) -> usize {
        self.iterations - self.skipped_iterations
    }

    /// Visits added to the root under the standard backpropagation rule
    ///
    /// Draws count half.
    pub fn backpropagated_visits(&self) -> f64 {
        self.decisive_rollouts as f64 + 0.5 * self.drawn_rollouts as f64
    }

    /// Returns the average time per iteration in microseconds
    pub fn avg_time_per_iteration_us(&self) -> f64 {
        if self.iterations == 0 {
            return 0.0;
        }
        self.total_time.as_micros() as f64 / self.iterations as f64
    }

    /// Returns the number of iterations per second
    pub fn iterations_per_second(&self) -> f64 {
        if self.total_time.as_secs_f64() <= 0.0 {
            return 0.0;
        }
        self.iterations as f64 / self.total_time.as_secs_f64()
    }

    /// Returns a summary of the statistics as a string
    pub fn summary(&self) -> String {
        format!(
            "MCTS Search Statistics:\n\
             - Iterations: {} ({} skipped)\n\
             - Rollouts: {} decisive, {} drawn\n\
             - Total time: {:.3} seconds\n\
             - Tree size: {} nodes\n\
             - Max depth: {}\n\
             - Avg time per iteration: {:.3} µs\n\
             - Iterations per second: {:.1}",
            self.iterations,
            self.skipped_iterations,
            self.decisive_rollouts,
            self.drawn_rollouts,
            self.total_time.as_secs_f64(),
            self.tree_size,
            self.max_depth,
            self.avg_time_per_iteration_us(),
            self.iterations_per_second(),
        )
    }
}

impl Default for SearchStatistics {
    fn default() -> Self {
        Self::new()
    }
}
