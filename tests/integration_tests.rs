use rand::{rngs::StdRng, RngCore, SeedableRng};
use uct_mcts::{
    config::{BestChildCriteria, TerminalLeaves},
    search,
    tictactoe::{Mark, TicTacToe},
    DrawAsHalfWinPolicy, GameState, MCTSConfig, MCTSError, RandomPolicy, MCTS,
};

/// Take-away game: remove one or two stones, whoever takes the last stone wins.
/// It can never end in a draw.
#[derive(Clone, Debug)]
struct Nim {
    stones: u8,
    to_move: u8,
}

impl GameState for Nim {
    type Action = u8;
    type Player = u8;

    fn get_legal_actions(&self) -> Vec<u8> {
        (1..=2).filter(|&take| take <= self.stones).collect()
    }

    fn apply_action(&self, take: &u8) -> Option<Self> {
        if *take == 0 || *take > 2 || *take > self.stones {
            return None;
        }
        Some(Nim {
            stones: self.stones - take,
            to_move: 1 - self.to_move,
        })
    }

    fn is_terminal(&self) -> bool {
        self.stones == 0
    }

    fn get_winner(&self) -> Option<u8> {
        if self.stones == 0 {
            Some(1 - self.to_move)
        } else {
            None
        }
    }

    fn get_current_player(&self) -> u8 {
        self.to_move
    }
}

fn root_child_visits<S: GameState + 'static>(mcts: &MCTS<S>) -> Vec<f64> {
    let tree = mcts.tree();
    tree.get(tree.root())
        .children()
        .iter()
        .map(|&child| tree.get(child).visits())
        .collect()
}

#[test]
fn test_empty_board_search_is_reproducible() {
    let config = MCTSConfig::default()
        .with_max_iterations(2000)
        .with_seed(7);

    let mut first = MCTS::new(TicTacToe::new(Mark::X), config.clone());
    let first_action = first.search().unwrap();

    let mut second = MCTS::new(TicTacToe::new(Mark::X), config);
    let second_action = second.search().unwrap();

    assert!(first_action.index() < 9, "Action should be one of the nine cells");
    assert_eq!(first_action, second_action);
    assert_eq!(root_child_visits(&first), root_child_visits(&second));
    assert_eq!(root_child_visits(&first).len(), 9);
    assert_eq!(first.tree().len(), second.tree().len());

    let stats = first.get_statistics();
    assert_eq!(stats.iterations, 2000);
    assert_eq!(stats.tree_size, first.tree().len());
    assert!(stats.tree_size > 10, "Tree should have grown below the root");
}

#[test]
fn test_free_search_is_reproducible() {
    for seed in [0, 13, 99] {
        let mut first_rng = StdRng::seed_from_u64(seed);
        let first = search(TicTacToe::new(Mark::X), 800, 1.141, RandomPolicy::new(), &mut first_rng)
            .unwrap();

        let mut second_rng = StdRng::seed_from_u64(seed);
        let second = search(TicTacToe::new(Mark::X), 800, 1.141, RandomPolicy::new(), &mut second_rng)
            .unwrap();

        assert_eq!(first, second, "seed {} diverged", seed);
        assert_eq!(first.move_count(), 1);

        // Both generators advanced by the same amount
        assert_eq!(first_rng.next_u64(), second_rng.next_u64());
    }
}

#[test]
fn test_finds_winning_move_for_any_seed() {
    for seed in 0..10 {
        let game = TicTacToe::from_cells("XX. OO. ...", Mark::X).unwrap();
        let config = MCTSConfig::default().with_max_iterations(300).with_seed(seed);
        let mut mcts = MCTS::new(game, config);

        let action = mcts.search().unwrap();
        assert_eq!(action.index(), 2, "seed {} missed the win", seed);
    }
}

#[test]
fn test_finds_winning_move_listed_last() {
    // X wins at the last empty cell while O threatens the top row
    for seed in 0..10 {
        let game = TicTacToe::from_cells("O.O ... XX.", Mark::X).unwrap();
        let config = MCTSConfig::default().with_max_iterations(500).with_seed(seed);
        let mut mcts = MCTS::new(game, config);

        let action = mcts.search().unwrap();
        assert_eq!(action.index(), 8, "seed {} missed the win", seed);
        let best = mcts.best_child().unwrap();
        assert_eq!(best.value(), 1.0);
        assert_eq!(best.state.get_winner(), Some(Mark::X));
    }
}

#[test]
fn test_drawn_position_values_half() {
    // Every completion of this position is a draw
    for seed in 0..5 {
        let game = TicTacToe::from_cells("XOX ... OXO", Mark::X).unwrap();
        let config = MCTSConfig::default().with_max_iterations(500).with_seed(seed);
        let mut mcts = MCTS::new(game, config).with_backpropagation_policy(DrawAsHalfWinPolicy::new());
        mcts.search().unwrap();

        let best = mcts.best_child().unwrap();
        assert!((best.value() - 0.5).abs() < 1e-9, "value {}", best.value());
        assert_eq!(mcts.get_statistics().decisive_rollouts, 0);
        assert_eq!(mcts.root().visits(), 500.0);
    }
}

#[test]
fn test_drawn_position_under_standard_rule() {
    let game = TicTacToe::from_cells("XOX ... OXO", Mark::X).unwrap();
    let config = MCTSConfig::default().with_max_iterations(500).with_seed(0);
    let mut mcts = MCTS::new(game, config);
    mcts.search().unwrap();

    // Draws add half a visit and half a win, so every ratio is 1
    let tree = mcts.tree();
    for &child in tree.get(tree.root()).children() {
        assert_eq!(tree.get(child).value(), 1.0);
    }
    assert_eq!(mcts.root().visits(), 250.0);
}

#[test]
fn test_search_on_terminal_root_is_a_usage_error() {
    let won = TicTacToe::from_cells("XXX OO. ...", Mark::O).unwrap();
    let mut mcts = MCTS::new(won.clone(), MCTSConfig::default());
    assert_eq!(mcts.search(), Err(MCTSError::TerminalRoot));

    let mut rng = StdRng::seed_from_u64(0);
    let result = search(won, 100, 1.141, RandomPolicy::new(), &mut rng);
    assert!(matches!(result, Err(MCTSError::TerminalRoot)));

    let mut full = TicTacToe::new(Mark::X);
    for (row, column) in [
        (0, 0),
        (1, 1),
        (1, 0),
        (2, 0),
        (0, 2),
        (0, 1),
        (2, 1),
        (1, 2),
        (2, 2),
    ] {
        full.play(row, column).unwrap();
    }
    let mut mcts = MCTS::new(full, MCTSConfig::default());
    let error = mcts.search().unwrap_err();
    assert!(format!("{}", error).contains("terminal"));
}

#[test]
fn test_zero_iterations_is_a_usage_error() {
    let config = MCTSConfig::default().with_max_iterations(0);
    let mut mcts = MCTS::new(TicTacToe::new(Mark::X), config);
    assert_eq!(mcts.search(), Err(MCTSError::InvalidIterations));

    let mut rng = StdRng::seed_from_u64(0);
    let result = search(TicTacToe::new(Mark::X), 0, 1.141, RandomPolicy::new(), &mut rng);
    assert!(matches!(result, Err(MCTSError::InvalidIterations)));
}

#[test]
fn test_root_children_visits_sum_to_completed_iterations() {
    for terminal_leaves in [TerminalLeaves::Skip, TerminalLeaves::Rescore] {
        let config = MCTSConfig::default()
            .with_max_iterations(300)
            .with_seed(11)
            .with_terminal_leaves(terminal_leaves);
        let mut mcts = MCTS::new(Nim { stones: 5, to_move: 0 }, config);
        mcts.search().unwrap();

        let stats = mcts.get_statistics();
        let sum: f64 = root_child_visits(&mcts).iter().sum();
        assert_eq!(sum, stats.completed_iterations() as f64);
        assert_eq!(mcts.root().visits(), sum);
        assert_eq!(stats.iterations, 300);
        assert_eq!(stats.drawn_rollouts, 0);

        match terminal_leaves {
            // The whole game tree is tiny, so most iterations find no leaf
            TerminalLeaves::Skip => assert!(stats.skipped_iterations > 0),
            TerminalLeaves::Rescore => assert_eq!(stats.skipped_iterations, 0),
        }
    }
}

#[test]
fn test_root_visits_count_draws_as_half() {
    let config = MCTSConfig::default().with_max_iterations(1000).with_seed(5);
    let mut mcts = MCTS::new(TicTacToe::new(Mark::O), config);
    mcts.search().unwrap();

    let stats = mcts.get_statistics();
    let sum: f64 = root_child_visits(&mcts).iter().sum();
    assert!(stats.drawn_rollouts > 0);
    assert_eq!(sum, stats.backpropagated_visits());
    assert_eq!(
        stats.decisive_rollouts + stats.drawn_rollouts,
        stats.completed_iterations()
    );
}

#[test]
fn test_half_win_draws_keep_one_visit_per_iteration() {
    let config = MCTSConfig::default().with_max_iterations(1000).with_seed(5);
    let mut mcts = MCTS::new(TicTacToe::new(Mark::O), config)
        .with_backpropagation_policy(DrawAsHalfWinPolicy::new());
    mcts.search().unwrap();

    let sum: f64 = root_child_visits(&mcts).iter().sum();
    assert_eq!(sum, 1000.0);
    assert_eq!(mcts.root().visits(), 1000.0);
}

#[test]
fn test_nim_finds_the_winning_take() {
    // From 4 stones, taking one leaves the opponent a lost position
    let config = MCTSConfig::default().with_max_iterations(500).with_seed(3);
    let mut mcts = MCTS::new(Nim { stones: 4, to_move: 0 }, config);
    assert_eq!(mcts.search().unwrap(), 1);
}

#[test]
fn test_statistics_stay_consistent_across_tree() {
    let config = MCTSConfig::default().with_max_iterations(1500).with_seed(21);
    let mut mcts = MCTS::new(TicTacToe::new(Mark::X), config);
    mcts.search().unwrap();

    let tree = mcts.tree();
    for (id, node) in tree.iter() {
        assert!(node.wins() >= 0.0);
        assert!(node.wins() <= node.visits(), "Q > N at {}", id);
        assert!(node.value() >= 0.0 && node.value() <= 1.0);

        let child_visits: f64 = node
            .children()
            .iter()
            .map(|&child| tree.get(child).visits())
            .sum();
        assert!(child_visits <= node.visits());

        if node.visits() > 0.0 && id != tree.root() {
            assert!(node.is_visited());
        }
        if node.is_expanded() {
            assert!(!node.children().is_empty());
            assert!(node
                .children()
                .iter()
                .all(|&child| tree.get(child).is_visited()));
        }

        match node.parent() {
            None => assert_eq!(id, tree.root()),
            Some(parent) => {
                let siblings = tree.get(parent).children();
                assert_eq!(siblings.iter().filter(|&&child| child == id).count(), 1);
                assert_eq!(node.depth, tree.get(parent).depth + 1);
            }
        }
    }
}

#[test]
fn test_highest_value_criteria() {
    let game = TicTacToe::from_cells("XX. OO. ...", Mark::X).unwrap();
    let config = MCTSConfig::default()
        .with_max_iterations(300)
        .with_seed(9)
        .with_best_child_criteria(BestChildCriteria::HighestValue);
    let mut mcts = MCTS::new(game, config);

    assert_eq!(mcts.search().unwrap().index(), 2);
}

#[test]
fn test_self_play_until_terminal() {
    let mut rng = StdRng::seed_from_u64(2024);
    let mut game = TicTacToe::new(Mark::X);
    let mut moves = 0;

    while !game.is_terminal() {
        let next = search(game.clone(), 400, 1.141, RandomPolicy::new(), &mut rng).unwrap();
        assert_eq!(next.move_count(), game.move_count() + 1);
        assert_ne!(next.get_current_player(), game.get_current_player());
        game = next;
        moves += 1;
    }

    assert!(moves >= 5 && moves <= 9);
}

#[test]
fn test_search_resets_tree_between_calls() {
    let config = MCTSConfig::default().with_max_iterations(200).with_seed(1);
    let mut mcts = MCTS::new(TicTacToe::new(Mark::X), config);

    mcts.search().unwrap();
    mcts.search().unwrap();

    assert_eq!(mcts.root().visits(), mcts.get_statistics().backpropagated_visits());
    assert_eq!(mcts.get_statistics().iterations, 200);
}
