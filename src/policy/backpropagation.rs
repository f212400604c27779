//! Backpropagation policies for the MCTS algorithm
//!
//! Backpropagation policies determine how one node's statistics change
//! after a rollout. [`SearchTree::backpropagate`](crate::tree::SearchTree::backpropagate)
//! applies the policy to every node from the leaf up to the root.

use crate::{game_state::GameState, tree::MCTSNode};

/// Trait for policies that backpropagate simulation results
pub trait BackpropagationPolicy<S: GameState>: Send + Sync {
    /// Updates statistics for a node given the rollout winner
    ///
    /// `winner` is `None` for a drawn rollout.
    fn update_stats(&self, node: &mut MCTSNode<S>, winner: Option<&S::Player>);

    /// Create a boxed clone of this policy
    fn clone_box(&self) -> Box<dyn BackpropagationPolicy<S>>;
}

/// Standard win/draw backpropagation policy
///
/// * A decisive result adds one visit, plus one win when the winner is the
///   player who moved into the node.
/// * A draw adds half a visit and half a win together.
///
/// `Q/N` always stays within `[0, 1]`. Draws raise `Q/N` the same way wins
/// do, only with half the weight; use [`DrawAsHalfWinPolicy`] to score a
/// draw as half a win instead. The root has no mover, so it only collects
/// wins from draws.
#[derive(Debug, Clone)]
pub struct StandardPolicy;

impl StandardPolicy {
    /// Creates a new standard policy
    pub fn new() -> Self {
        StandardPolicy
    }
}

impl Default for StandardPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: GameState> BackpropagationPolicy<S> for StandardPolicy {
    fn update_stats(&self, node: &mut MCTSNode<S>, winner: Option<&S::Player>) {
        match winner {
            None => node.record(0.5, 0.5),
            Some(winner) if node.mover.as_ref() == Some(winner) => node.record(1.0, 1.0),
            Some(_) => node.record(1.0, 0.0),
        }
    }

    fn clone_box(&self) -> Box<dyn BackpropagationPolicy<S>> {
        Box::new(self.clone())
    }
}

/// Backpropagation policy scoring a draw as half a win
///
/// Every rollout adds one full visit. A decisive result adds one win to the
/// nodes entered by the winner, and a draw adds half a win everywhere. With
/// this rule `Q/N` of a line that can only be drawn settles at exactly 0.5,
/// and the visits of the root's children always add up to the number of
/// completed iterations.
#[derive(Debug, Clone)]
pub struct DrawAsHalfWinPolicy;

impl DrawAsHalfWinPolicy {
    /// Creates a new half-win draw policy
    pub fn new() -> Self {
        DrawAsHalfWinPolicy
    }
}

impl Default for DrawAsHalfWinPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: GameState> BackpropagationPolicy<S> for DrawAsHalfWinPolicy {
    fn update_stats(&self, node: &mut MCTSNode<S>, winner: Option<&S::Player>) {
        match winner {
            None => node.record(1.0, 0.5),
            Some(winner) if node.mover.as_ref() == Some(winner) => node.record(1.0, 1.0),
            Some(_) => node.record(1.0, 0.0),
        }
    }

    fn clone_box(&self) -> Box<dyn BackpropagationPolicy<S>> {
        Box::new(self.clone())
    }
}

// Implement BackpropagationPolicy for Box<dyn BackpropagationPolicy>
impl<S: GameState> BackpropagationPolicy<S> for Box<dyn BackpropagationPolicy<S>> {
    fn update_stats(&self, node: &mut MCTSNode<S>, winner: Option<&S::Player>) {
        (**self).update_stats(node, winner)
    }

    fn clone_box(&self) -> Box<dyn BackpropagationPolicy<S>> {
        (**self).clone_box()
    }
}
