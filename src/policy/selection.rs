//! Selection policies for the MCTS algorithm
//!
//! Selection policies pick which child to descend into while walking down
//! through fully expanded nodes, balancing exploration and exploitation.

use crate::{
    game_state::GameState,
    tree::{NodeId, SearchTree},
    utils::{argmax_first, uct_value},
};

/// Trait for policies that select nodes to explore
pub trait SelectionPolicy<S: GameState>: Send + Sync {
    /// Selects the child of `node` to descend into
    ///
    /// Returns `None` only when the node has no children.
    fn select_child(&self, tree: &SearchTree<S>, node: NodeId) -> Option<NodeId>;

    /// Create a boxed clone of this policy
    fn clone_box(&self) -> Box<dyn SelectionPolicy<S>>;
}

/// Upper Confidence bound for Trees (UCT) selection policy
///
/// Scores every child with
///
/// ```text
/// UCT = Q/N + c * sqrt(ln(parent N) / N)
/// ```
///
/// and descends into the first child with the highest score. Unvisited
/// children, and children of an unvisited parent, get no exploration bonus.
#[derive(Debug, Clone)]
pub struct UCTPolicy {
    /// Exploration constant that controls the balance between exploration and exploitation.
    pub exploration_constant: f64,
}

impl UCTPolicy {
    /// Creates a new UCT policy with the given exploration constant
    pub fn new(exploration_constant: f64) -> Self {
        UCTPolicy {
            exploration_constant,
        }
    }

    /// Calculates the UCT score of `child` against `parent`
    pub fn score<S: GameState>(&self, tree: &SearchTree<S>, parent: NodeId, child: NodeId) -> f64 {
        let child = tree.get(child);
        uct_value(
            child.wins(),
            child.visits(),
            tree.get(parent).visits(),
            self.exploration_constant,
        )
    }
}

impl Default for UCTPolicy {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_EXPLORATION_CONSTANT)
    }
}

impl<S: GameState> SelectionPolicy<S> for UCTPolicy {
    fn select_child(&self, tree: &SearchTree<S>, node: NodeId) -> Option<NodeId> {
        let children = tree.get(node).children();
        let best = argmax_first(children.iter().map(|&child| self.score(tree, node, child)))?;
        Some(children[best])
    }

    fn clone_box(&self) -> Box<dyn SelectionPolicy<S>> {
        Box::new(self.clone())
    }
}

// Implement SelectionPolicy for Box<dyn SelectionPolicy>
impl<S: GameState> SelectionPolicy<S> for Box<dyn SelectionPolicy<S>> {
    fn select_child(&self, tree: &SearchTree<S>, node: NodeId) -> Option<NodeId> {
        (**self).select_child(tree, node)
    }

    fn clone_box(&self) -> Box<dyn SelectionPolicy<S>> {
        (**self).clone_box()
    }
}
