//! Traits defining the game contract consumed by the search.
//!
//! The search never looks inside a game state. Everything it needs (legal
//! moves, applying a move, the terminal test, the winner query and whose
//! turn it is) goes through [`GameState`].

use std::fmt::Debug;

/// Trait for actions that can be taken in a game
///
/// Actions represent the moves that lead from one state to the next.
pub trait Action: Clone + Debug + Send + Sync {}

/// Trait for players in a game
///
/// Exactly two players take part in the games this crate searches. Players are
/// compared to decide whose win a rollout result is.
pub trait Player: Clone + Debug + PartialEq + Send + Sync {}

/// Trait defining the game state interface required for MCTS
///
/// Implementations must describe a two-player, perfect-information,
/// zero-sum game. States are duplicated on every child creation, so they
/// should be cheap to clone (a fixed-size board is ideal).
pub trait GameState: Clone + Send + Sync {
    /// The type of actions that can be taken in this game
    type Action: Action;

    /// The type of players in this game
    type Player: Player;

    /// Returns the legal actions from this state
    ///
    /// The order must be deterministic: the search enumerates children in
    /// this order and breaks every tie by it. Terminal states return an
    /// empty list.
    ///
    /// # Example
    ///
    /// ```
    /// # use uct_mcts::{Action, GameState, Player};
    /// # #[derive(Debug, Clone, PartialEq)]
    /// # struct MyAction(usize);
    /// # impl Action for MyAction {}
    /// # #[derive(Debug, Clone, PartialEq)]
    /// # struct MyPlayer;
    /// # impl Player for MyPlayer {}
    /// # #[derive(Clone)]
    /// # struct MyGame;
    /// # impl GameState for MyGame {
    /// # type Action = MyAction;
    /// # type Player = MyPlayer;
    /// fn get_legal_actions(&self) -> Vec<MyAction> {
    ///     // Return all valid moves in a fixed order
    ///     vec![MyAction(0), MyAction(1), MyAction(2)]
    /// }
    /// # fn apply_action(&self, _: &MyAction) -> Option<Self> { Some(self.clone()) }
    /// # fn is_terminal(&self) -> bool { false }
    /// # fn get_winner(&self) -> Option<MyPlayer> { None }
    /// # fn get_current_player(&self) -> MyPlayer { MyPlayer }
    /// # }
    /// ```
    fn get_legal_actions(&self) -> Vec<Self::Action>;

    /// Applies an action to a copy of this state
    ///
    /// Returns `None` when the action cannot be played here. The original
    /// state is never modified, since sibling branches must evolve
    /// independently.
    fn apply_action(&self, action: &Self::Action) -> Option<Self>;

    /// Returns true if this state is terminal (game over)
    fn is_terminal(&self) -> bool;

    /// Returns the winner of this state, or `None` for a draw or an
    /// unfinished game
    fn get_winner(&self) -> Option<Self::Player>;

    /// Returns the player whose turn it is in this state
    fn get_current_player(&self) -> Self::Player;
}

// Plain ids can act as players and actions without a wrapper type.
impl Action for usize {}
impl Action for u8 {}

impl Player for usize {}
impl Player for u8 {}
impl Player for char {}
