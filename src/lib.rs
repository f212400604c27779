//! # uct-mcts
//!
//! Monte Carlo Tree Search with UCT selection and random rollouts for
//! two-player, perfect-information, zero-sum games.
//!
//! The search grows a partial game tree one leaf per iteration and
//! estimates move values from the outcomes of playouts. Every random choice
//! is drawn from an explicit, seedable generator, so a search with a fixed
//! seed is exactly reproducible.
//!
//! ## Basic Usage
//!
//! ```
//! use uct_mcts::{
//!     tictactoe::{Mark, TicTacToe},
//!     MCTSConfig, MCTS,
//! };
//!
//! fn main() -> Result<(), uct_mcts::MCTSError> {
//!     // X has two in a row and is to move
//!     let game = TicTacToe::from_cells("XX. OO. ...", Mark::X)?;
//!
//!     let config = MCTSConfig::default()
//!         .with_max_iterations(300)
//!         .with_seed(42);
//!
//!     let mut mcts = MCTS::new(game, config);
//!     let best = mcts.search()?;
//!
//!     println!("{}", mcts.get_statistics().summary());
//!     assert_eq!(best.index(), 2);
//!     Ok(())
//! }
//! ```
//!
//! ## How It Works
//!
//! Each iteration runs four phases:
//!
//! 1. **Selection**: from the root, descend through fully expanded nodes by
//!    picking the child with the best UCT score, until a node with an
//!    unvisited child is found. One unvisited child, chosen at random,
//!    becomes the leaf.
//!
//! 2. **Expansion**: nodes met on the way get all their children at once,
//!    one per legal move, the first time they are reached.
//!
//! 3. **Simulation**: a rollout plays the game to the end from the leaf.
//!
//! 4. **Backpropagation**: visit and win counts are updated on every node
//!    from the leaf up to the root. A node's wins are counted for the
//!    player who moved into it.
//!
//! After the last iteration the most visited child of the root is the
//! chosen move.
//!
//! ## Customizing Policies
//!
//! ```
//! use uct_mcts::{
//!     policy::{selection::UCTPolicy, simulation::WinningMovePolicy},
//!     tictactoe::{Mark, TicTacToe},
//!     MCTSConfig, MCTS,
//! };
//!
//! let config = MCTSConfig::default().with_max_iterations(50).with_seed(1);
//! let mut mcts = MCTS::new(TicTacToe::new(Mark::X), config)
//!     .with_selection_policy(UCTPolicy::new(0.7))
//!     .with_simulation_policy(WinningMovePolicy::new());
//!
//! assert!(mcts.search().is_ok());
//! ```

pub mod config;
pub mod game_state;
pub mod mcts;
pub mod policy;
pub mod stats;
pub mod tictactoe;
pub mod tree;
pub mod utils;

pub use config::MCTSConfig;
pub use game_state::{Action, GameState, Player};
pub use mcts::{search, MCTS};
pub use policy::{
    BackpropagationPolicy, DrawAsHalfWinPolicy, RandomPolicy, SelectionPolicy, SimulationPolicy,
    StandardPolicy, UCTPolicy, WinningMovePolicy,
};
pub use stats::SearchStatistics;
pub use tree::{MCTSNode, NodeId, SearchTree};

/// Error types for the MCTS algorithm
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum MCTSError {
    /// The root position is already decided, there is nothing to search
    #[error("Cannot search from a terminal state")]
    TerminalRoot,

    /// A search was asked to run zero iterations
    #[error("Iteration count must be at least 1")]
    InvalidIterations,

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A non-terminal state offered no legal actions
    #[error("No legal actions available from a non-terminal state")]
    NoLegalActions,

    /// The game refused to apply an action
    #[error("Illegal action: {0}")]
    IllegalAction(String),

    /// Malformed game input
    #[error("Invalid position: {0}")]
    InvalidPosition(String),
}

/// Result type for MCTS operations
pub type Result<T> = std::result::Result<T, MCTSError>;
