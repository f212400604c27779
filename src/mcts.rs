//! Main implementation of the Monte Carlo Tree Search algorithm
//!
//! This module orchestrates the four phases of every iteration: selection,
//! expansion, simulation and backpropagation.

use std::time::Instant;

use rand::{rngs::StdRng, seq::SliceRandom, RngCore, SeedableRng};

use crate::{
    config::{BestChildCriteria, MCTSConfig, TerminalLeaves},
    game_state::GameState,
    policy::{
        backpropagation::{BackpropagationPolicy, StandardPolicy},
        selection::{SelectionPolicy, UCTPolicy},
        simulation::{rollout, RandomPolicy, SimulationPolicy},
    },
    stats::SearchStatistics,
    tree::{MCTSNode, NodeId, SearchTree},
    utils::argmax_first,
    MCTSError, Result,
};

/// Runs one search from `root_state` and returns the chosen next state
///
/// Uses UCT with `exploration_constant` for selection, `rollout_policy` for
/// simulation and draws every random choice from `rng`. A game is played by
/// calling this again with the returned state until it is terminal.
///
/// # Errors
///
/// * [`MCTSError::TerminalRoot`] if `root_state` is already terminal
/// * [`MCTSError::InvalidIterations`] if `iterations` is 0
/// * [`MCTSError::InvalidConfiguration`] for a negative or non-finite
///   exploration constant
/// * Contract violations reported by the game, see [`MCTSError`]
///
/// # Example
///
/// ```
/// use rand::{rngs::StdRng, SeedableRng};
/// use uct_mcts::{search, tictactoe::{Mark, TicTacToe}, GameState, RandomPolicy};
///
/// let mut rng = StdRng::seed_from_u64(3);
/// let mut game = TicTacToe::new(Mark::X);
/// while !game.is_terminal() {
///     game = search(game, 200, 1.141, RandomPolicy::new(), &mut rng)?;
/// }
/// # Ok::<(), uct_mcts::MCTSError>(())
/// ```
pub fn search<S, P>(
    root_state: S,
    iterations: usize,
    exploration_constant: f64,
    rollout_policy: P,
    rng: &mut dyn RngCore,
) -> Result<S>
where
    S: GameState + 'static,
    P: SimulationPolicy<S> + 'static,
{
    let config = MCTSConfig::default()
        .with_max_iterations(iterations)
        .with_exploration_constant(exploration_constant);
    let mut mcts = MCTS::new(root_state, config).with_simulation_policy(rollout_policy);
    let chosen = mcts.search_with_rng(iterations, rng)?;
    Ok(mcts.tree().get(chosen).state.clone())
}

/// The main Monte Carlo Tree Search implementation
///
/// An `MCTS` owns the search tree, which is rebuilt from the root state at
/// the start of every search. Nothing is carried over between searches.
pub struct MCTS<S: GameState> {
    /// Arena holding the current search tree
    tree: SearchTree<S>,

    /// Configuration for the search
    config: MCTSConfig,

    /// Statistics gathered during the last search
    statistics: SearchStatistics,

    /// Random source used by [`MCTS::search`] and [`MCTS::search_for_iterations`]
    rng: StdRng,

    /// Policy for selecting nodes during the selection phase
    selection_policy: Box<dyn SelectionPolicy<S>>,

    /// Policy for simulating games during the simulation phase
    simulation_policy: Box<dyn SimulationPolicy<S>>,

    /// Policy for backpropagating results
    backpropagation_policy: Box<dyn BackpropagationPolicy<S>>,
}

impl<S: GameState + 'static> MCTS<S> {
    /// Creates a new MCTS instance with the given initial state and configuration
    pub fn new(initial_state: S, config: MCTSConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let selection_policy: Box<dyn SelectionPolicy<S>> =
            Box::new(UCTPolicy::new(config.exploration_constant));

        let simulation_policy: Box<dyn SimulationPolicy<S>> = Box::new(RandomPolicy::new());

        let backpropagation_policy: Box<dyn BackpropagationPolicy<S>> =
            Box::new(StandardPolicy::new());

        MCTS {
            tree: SearchTree::new(initial_state),
            config,
            statistics: SearchStatistics::new(),
            rng,
            selection_policy,
            simulation_policy,
            backpropagation_policy,
        }
    }

    /// Sets the selection policy to use
    pub fn with_selection_policy<P: SelectionPolicy<S> + 'static>(mut self, policy: P) -> Self {
        self.selection_policy = Box::new(policy);
        self
    }

    /// Sets the simulation policy to use
    pub fn with_simulation_policy<P: SimulationPolicy<S> + 'static>(mut self, policy: P) -> Self {
        self.simulation_policy = Box::new(policy);
        self
    }

    /// Sets the backpropagation policy to use
    pub fn with_backpropagation_policy<P: BackpropagationPolicy<S> + 'static>(
        mut self,
        policy: P,
    ) -> Self {
        self.backpropagation_policy = Box::new(policy);
        self
    }

    /// Runs the configured number of iterations and returns the best action
    pub fn search(&mut self) -> Result<S::Action> {
        self.search_for_iterations(self.config.max_iterations)
    }

    /// Runs the search for the specified number of iterations
    ///
    /// Random choices come from the searcher's own generator, seeded from
    /// [`MCTSConfig::seed`].
    pub fn search_for_iterations(&mut self, iterations: usize) -> Result<S::Action> {
        let mut rng = self.rng.clone();
        let result = self.search_with_rng(iterations, &mut rng);
        self.rng = rng;

        let chosen = result?;
        self.tree
            .get(chosen)
            .action
            .clone()
            .ok_or(MCTSError::NoLegalActions)
    }

    /// Runs the search with an external random source
    ///
    /// Returns the handle of the chosen root child. The tree stays
    /// available for inspection until the next search.
    pub fn search_with_rng(&mut self, iterations: usize, rng: &mut dyn RngCore) -> Result<NodeId> {
        MCTSConfig {
            max_iterations: iterations,
            ..self.config.clone()
        }
        .validate()?;

        if self.root().is_terminal() {
            return Err(MCTSError::TerminalRoot);
        }

        self.reset();
        let start_time = Instant::now();
        log::debug!(
            "starting search: {} iterations, c = {}",
            iterations,
            self.config.exploration_constant
        );

        let root = self.tree.root();
        self.tree.expand(root)?;

        for _ in 0..iterations {
            self.execute_iteration(rng)?;
            self.statistics.iterations += 1;
        }

        self.statistics.total_time = start_time.elapsed();
        self.statistics.tree_size = self.tree.len();
        self.statistics.max_depth = self.tree.max_depth();

        let best = self.select_best_child().ok_or(MCTSError::NoLegalActions)?;
        log::debug!(
            "search finished: {} iterations ({} skipped), {} nodes, chose {:?} (N = {}, Q = {})",
            self.statistics.iterations,
            self.statistics.skipped_iterations,
            self.statistics.tree_size,
            self.tree.get(best).action,
            self.tree.get(best).visits(),
            self.tree.get(best).wins(),
        );
        Ok(best)
    }

    /// Execute a single iteration of the MCTS algorithm
    fn execute_iteration(&mut self, rng: &mut dyn RngCore) -> Result<()> {
        // 1. Selection phase, expanding nodes on the way down
        let leaf = match self.selection(rng)? {
            Some(leaf) => leaf,
            None => {
                self.statistics.skipped_iterations += 1;
                log::trace!("no leaf available, skipping iteration");
                return Ok(());
            }
        };

        // 2. Simulation phase
        let winner = rollout(&self.tree.get(leaf).state, &self.simulation_policy, rng)?;
        match winner {
            Some(_) => self.statistics.decisive_rollouts += 1,
            None => self.statistics.drawn_rollouts += 1,
        }

        // 3. Backpropagation phase
        self.tree
            .backpropagate(leaf, winner.as_ref(), &self.backpropagation_policy);

        Ok(())
    }

    /// Selection phase: descend through expanded nodes to a new leaf
    ///
    /// Returns `None` when the descent ends on a terminal node that cannot
    /// serve as a leaf.
    fn selection(&mut self, rng: &mut dyn RngCore) -> Result<Option<NodeId>> {
        let mut current = self.tree.root();
        self.tree.expand(current)?;

        while self.tree.get(current).is_expanded() && !self.tree.get(current).is_terminal() {
            current = match self.selection_policy.select_child(&self.tree, current) {
                Some(child) => child,
                None => break,
            };
            self.tree.expand(current)?;
        }

        let unvisited = self.tree.unvisited_children(current);
        if let Some(&leaf) = unvisited.choose(rng) {
            self.tree.mark_visited(leaf);
            return Ok(Some(leaf));
        }

        let rescore = self.config.terminal_leaves == TerminalLeaves::Rescore
            && current != self.tree.root()
            && self.tree.get(current).is_terminal();
        Ok(rescore.then_some(current))
    }

    /// Selects the best root child based on configured criteria
    fn select_best_child(&self) -> Option<NodeId> {
        let children = self.root().children();
        let best = match self.config.best_child_criteria {
            BestChildCriteria::MostVisits => {
                argmax_first(children.iter().map(|&child| self.tree.get(child).visits()))
            }
            BestChildCriteria::HighestValue => {
                argmax_first(children.iter().map(|&child| self.tree.get(child).value()))
            }
        }?;
        Some(children[best])
    }

    /// Discards the tree, keeping only a fresh root with the same state
    fn reset(&mut self) {
        let state = self.root().state.clone();
        self.tree = SearchTree::new(state);
        self.statistics = SearchStatistics::new();
    }

    /// Returns the root node
    pub fn root(&self) -> &MCTSNode<S> {
        self.tree.get(self.tree.root())
    }

    /// Returns the tree built by the last search
    pub fn tree(&self) -> &SearchTree<S> {
        &self.tree
    }

    /// Returns the root child chosen by the last search, if any
    pub fn best_child(&self) -> Option<&MCTSNode<S>> {
        self.select_best_child().map(|id| self.tree.get(id))
    }

    /// Returns the search statistics
    pub fn get_statistics(&self) -> &SearchStatistics {
        &self.statistics
    }

    /// Returns the configuration
    pub fn config(&self) -> &MCTSConfig {
        &self.config
    }

    /// Returns a visualization of the search tree down to `max_depth`
    pub fn visualize_tree(&self, max_depth: usize) -> String {
        let mut result = String::new();
        self.visualize_node(self.tree.root(), max_depth, &mut result);
        result
    }

    /// Helper method to visualize a node and its children
    fn visualize_node(&self, id: NodeId, max_depth: usize, output: &mut String) {
        let node = self.tree.get(id);
        let indent = "  ".repeat(node.depth);
        let action_str = match &node.action {
            Some(action) => format!("{:?}", action),
            None => "Root".to_string(),
        };

        output.push_str(&format!(
            "{}{} (visits: {}, wins: {}, value: {:.3})\n",
            indent,
            action_str,
            node.visits(),
            node.wins(),
            node.value()
        ));

        if node.depth >= max_depth {
            return;
        }
        for &child in node.children() {
            if self.tree.get(child).is_visited() {
                self.visualize_node(child, max_depth, output);
            }
        }
    }
}
