//! Tree data structures for Monte Carlo Tree Search
//!
//! Nodes live in an arena ([`SearchTree`]) and refer to each other through
//! [`NodeId`] handles. A child stores its parent's handle, a parent owns the
//! handles of its children, and nothing is ever removed while a search runs,
//! so handles stay valid for the lifetime of the tree.

use std::fmt;

use crate::{game_state::GameState, policy::BackpropagationPolicy, MCTSError, Result};

/// Stable handle to a node in a [`SearchTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// Position of the node in the arena
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Represents a node in the MCTS tree
///
/// Each node owns one game state, the action that led to it and the
/// visit/win statistics gathered by backpropagation.
#[derive(Debug, Clone)]
pub struct MCTSNode<S: GameState> {
    /// The game state at this node
    pub state: S,

    /// The action that led to this state (None for root)
    pub action: Option<S::Action>,

    /// Player who made the move into this state (None for root)
    ///
    /// `wins` counts rollouts won by this player.
    pub mover: Option<S::Player>,

    /// Depth of this node in the tree (root = 0)
    pub depth: usize,

    visits: f64,
    wins: f64,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    visited: bool,
    expanded: bool,
}

impl<S: GameState> MCTSNode<S> {
    fn new(
        state: S,
        action: Option<S::Action>,
        mover: Option<S::Player>,
        parent: Option<NodeId>,
        depth: usize,
    ) -> Self {
        MCTSNode {
            state,
            action,
            mover,
            depth,
            visits: 0.0,
            wins: 0.0,
            parent,
            children: Vec::new(),
            visited: false,
            expanded: false,
        }
    }

    /// Returns the visit count `N`
    pub fn visits(&self) -> f64 {
        self.visits
    }

    /// Returns the win count `Q` credited to [`MCTSNode::mover`]
    pub fn wins(&self) -> f64 {
        self.wins
    }

    /// Returns the win ratio `Q/N`, or 0 for an unvisited node
    pub fn value(&self) -> f64 {
        crate::utils::exploitation_term(self.wins, self.visits)
    }

    /// Adds to both statistics at once
    ///
    /// Meant for [`BackpropagationPolicy`] implementations. Negative amounts
    /// count as 0 and `wins` is capped at `visits`, so `Q <= N` holds for
    /// the lifetime of the node.
    pub fn record(&mut self, visits: f64, wins: f64) {
        let visits = visits.max(0.0);
        self.visits += visits;
        self.wins += wins.clamp(0.0, visits);
    }

    /// Handle of the parent node, absent for the root
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Handles of the children, in legal-move order
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// True once selection has returned this node as a leaf
    pub fn is_visited(&self) -> bool {
        self.visited
    }

    /// True once the node has children and every one of them is visited
    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// Returns true if this node has no children yet
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Returns true if the game is over at this node
    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }
}

/// Arena holding every node of one search
#[derive(Debug, Clone)]
pub struct SearchTree<S: GameState> {
    nodes: Vec<MCTSNode<S>>,
}

impl<S: GameState> SearchTree<S> {
    /// Creates a tree containing only the root
    pub fn new(root_state: S) -> Self {
        let mut root = MCTSNode::new(root_state, None, None, None, 0);
        // The searched position itself counts as discovered.
        root.visited = true;
        SearchTree { nodes: vec![root] }
    }

    /// Handle of the root node
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Returns the node behind a handle
    ///
    /// # Panics
    ///
    /// Panics if the handle belongs to another tree.
    pub fn get(&self, id: NodeId) -> &MCTSNode<S> {
        &self.nodes[id.0]
    }

    /// Returns the node behind a handle mutably
    ///
    /// Statistics change only through [`SearchTree::backpropagate`] outside
    /// the crate.
    pub(crate) fn get_mut(&mut self, id: NodeId) -> &mut MCTSNode<S> {
        &mut self.nodes[id.0]
    }

    /// Total number of nodes in the tree
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false, the root exists from construction
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterates over every node in creation order
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &MCTSNode<S>)> {
        self.nodes.iter().enumerate().map(|(i, node)| (NodeId(i), node))
    }

    /// Deepest node depth in the tree
    pub fn max_depth(&self) -> usize {
        self.nodes.iter().map(|node| node.depth).max().unwrap_or(0)
    }

    /// Populates the children of a node, once
    ///
    /// Tries every legal action in the game's order on a private copy of the
    /// state. Calling it again on a node that already has children is a
    /// no-op, and a terminal node keeps an empty child list for good.
    ///
    /// Returns the number of children.
    ///
    /// # Errors
    ///
    /// * [`MCTSError::IllegalAction`] if the game refuses an action it listed
    ///   as legal
    /// * [`MCTSError::NoLegalActions`] if a non-terminal state lists no action
    pub fn expand(&mut self, id: NodeId) -> Result<usize> {
        let node = &self.nodes[id.0];
        if !node.children.is_empty() {
            return Ok(node.children.len());
        }
        if node.state.is_terminal() {
            return Ok(0);
        }

        let mover = node.state.get_current_player();
        let depth = node.depth + 1;
        let mut created = Vec::new();
        for action in node.state.get_legal_actions() {
            let next = node
                .state
                .apply_action(&action)
                .ok_or_else(|| MCTSError::IllegalAction(format!("{:?}", action)))?;
            created.push(MCTSNode::new(
                next,
                Some(action),
                Some(mover.clone()),
                Some(id),
                depth,
            ));
        }
        if created.is_empty() {
            return Err(MCTSError::NoLegalActions);
        }

        let first = self.nodes.len();
        self.nodes.extend(created);
        let children: Vec<NodeId> = (first..self.nodes.len()).map(NodeId).collect();
        let count = children.len();
        self.nodes[id.0].children = children;
        Ok(count)
    }

    /// Marks a node as discovered by selection
    ///
    /// When this visits the last unvisited sibling, the parent becomes
    /// expanded. Marking an already visited node does nothing.
    pub fn mark_visited(&mut self, id: NodeId) {
        if self.nodes[id.0].visited {
            return;
        }
        self.nodes[id.0].visited = true;

        if let Some(parent) = self.nodes[id.0].parent {
            let all_visited = self.nodes[parent.0]
                .children
                .iter()
                .all(|child| self.nodes[child.0].visited);
            if all_visited {
                self.nodes[parent.0].expanded = true;
            }
        }
    }

    /// Handles of the unvisited children of a node, in legal-move order
    pub fn unvisited_children(&self, id: NodeId) -> Vec<NodeId> {
        self.nodes[id.0]
            .children
            .iter()
            .copied()
            .filter(|child| !self.nodes[child.0].visited)
            .collect()
    }

    /// Applies a rollout result to every node from `leaf` up to the root
    pub fn backpropagate<P>(&mut self, leaf: NodeId, winner: Option<&S::Player>, policy: &P)
    where
        P: BackpropagationPolicy<S> + ?Sized,
    {
        let mut current = Some(leaf);
        while let Some(id) = current {
            let node = &mut self.nodes[id.0];
            policy.update_stats(node, winner);
            current = node.parent;
        }
    }
}
