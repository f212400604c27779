//! Simulation policies for the MCTS algorithm
//!
//! Simulation policies choose the moves of a rollout: a playout from a leaf
//! to the end of the game whose only product is the winner. Rollouts work
//! on copies of game states and never add nodes to the tree or touch its
//! statistics.

use rand::{seq::SliceRandom, RngCore};

use crate::{game_state::GameState, MCTSError, Result};

/// Trait for policies that pick rollout moves
pub trait SimulationPolicy<S: GameState>: Send + Sync {
    /// Picks the next action to play from a non-terminal state
    ///
    /// Returns `None` when the state offers no legal action. All
    /// randomness must come from `rng` so that seeded searches repeat.
    fn choose_action(&self, state: &S, rng: &mut dyn RngCore) -> Option<S::Action>;

    /// Create a boxed clone of this policy
    fn clone_box(&self) -> Box<dyn SimulationPolicy<S>>;
}

/// Plays a game to completion from `state` and returns the winner
///
/// The result is `None` for a draw. A terminal `state` returns its winner
/// straight away.
///
/// # Errors
///
/// * [`MCTSError::NoLegalActions`] if the policy finds no move in a
///   non-terminal state
/// * [`MCTSError::IllegalAction`] if the game refuses the chosen move
pub fn rollout<S, P>(state: &S, policy: &P, rng: &mut dyn RngCore) -> Result<Option<S::Player>>
where
    S: GameState,
    P: SimulationPolicy<S> + ?Sized,
{
    let mut current = state.clone();
    while !current.is_terminal() {
        let action = policy
            .choose_action(&current, rng)
            .ok_or(MCTSError::NoLegalActions)?;
        current = current
            .apply_action(&action)
            .ok_or_else(|| MCTSError::IllegalAction(format!("{:?}", action)))?;
    }
    Ok(current.get_winner())
}

/// Random simulation policy
///
/// This policy plays uniformly random legal moves until the game ends.
#[derive(Debug, Clone)]
pub struct RandomPolicy;

impl RandomPolicy {
    /// Creates a new random policy
    pub fn new() -> Self {
        RandomPolicy
    }
}

impl Default for RandomPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: GameState> SimulationPolicy<S> for RandomPolicy {
    fn choose_action(&self, state: &S, rng: &mut dyn RngCore) -> Option<S::Action> {
        state.get_legal_actions().choose(rng).cloned()
    }

    fn clone_box(&self) -> Box<dyn SimulationPolicy<S>> {
        Box::new(self.clone())
    }
}

/// Win-first simulation policy
///
/// Plays the first legal move that wins the game on the spot for the player
/// to move. Without one, it falls back to a uniformly random legal move.
/// Rollouts become less noisy at the price of one extra state copy per legal
/// move.
#[derive(Debug, Clone)]
pub struct WinningMovePolicy;

impl WinningMovePolicy {
    /// Creates a new win-first policy
    pub fn new() -> Self {
        WinningMovePolicy
    }
}

impl Default for WinningMovePolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: GameState> SimulationPolicy<S> for WinningMovePolicy {
    fn choose_action(&self, state: &S, rng: &mut dyn RngCore) -> Option<S::Action> {
        let actions = state.get_legal_actions();
        let mover = state.get_current_player();

        let winning = actions.iter().find(|action| {
            state
                .apply_action(action)
                .and_then(|next| next.get_winner())
                .map_or(false, |winner| winner == mover)
        });

        match winning {
            Some(action) => Some(action.clone()),
            None => actions.choose(rng).cloned(),
        }
    }

    fn clone_box(&self) -> Box<dyn SimulationPolicy<S>> {
        Box::new(self.clone())
    }
}

// Implement SimulationPolicy for Box<dyn SimulationPolicy>
impl<S: GameState> SimulationPolicy<S> for Box<dyn SimulationPolicy<S>> {
    fn choose_action(&self, state: &S, rng: &mut dyn RngCore) -> Option<S::Action> {
        (**self).choose_action(state, rng)
    }

    fn clone_box(&self) -> Box<dyn SimulationPolicy<S>> {
        (**self).clone_box()
    }
}
