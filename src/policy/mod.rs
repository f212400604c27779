//! Policies for different phases of the MCTS algorithm
//!
//! - Selection policies: which child to descend into (UCT)
//! - Simulation policies: how rollouts pick their moves
//! - Backpropagation policies: how a rollout result changes node statistics
//!
//! Expansion has no policy: a node always gets one child per legal move,
//! see [`SearchTree::expand`](crate::tree::SearchTree::expand).

pub mod backpropagation;
pub mod selection;
pub mod simulation;

pub use backpropagation::{BackpropagationPolicy, DrawAsHalfWinPolicy, StandardPolicy};
pub use selection::{SelectionPolicy, UCTPolicy};
pub use simulation::{rollout, RandomPolicy, SimulationPolicy, WinningMovePolicy};
