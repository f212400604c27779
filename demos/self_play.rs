//! Tic-Tac-Toe self-play with the MCTS algorithm
//!
//! Both sides are played by the search. Usage:
//!
//! ```text
//! cargo run --example self_play -- [iterations] [seed]
//! ```
//!
//! Set `RUST_LOG=debug` to see a log line per search.

use std::env;

use uct_mcts::{
    tictactoe::{Mark, TicTacToe},
    GameState, MCTSConfig, MCTSError, MCTS,
};

fn main() -> Result<(), MCTSError> {
    // Initialize logging
    env_logger::init();

    let mut args = env::args().skip(1);
    let iterations = args
        .next()
        .and_then(|arg| arg.parse::<usize>().ok())
        .unwrap_or(2_000);
    let seed = args
        .next()
        .and_then(|arg| arg.parse::<u64>().ok())
        .unwrap_or(42);

    println!("MCTS Tic-Tac-Toe Self-Play");
    println!("==========================");
    println!("{} iterations per move, seed {}", iterations, seed);
    println!();

    let mut game = TicTacToe::new(Mark::X);
    let mut turn = 0;

    while !game.is_terminal() {
        println!("{}", game);

        // A different seed per move keeps each search reproducible on its own
        let config = MCTSConfig::default()
            .with_max_iterations(iterations)
            .with_seed(seed.wrapping_add(turn));
        let mut mcts = MCTS::new(game.clone(), config);
        let cell = mcts.search()?;

        if let Some(best) = mcts.best_child() {
            println!(
                "{:?} plays {:?} (visits: {}, value: {:.3})",
                game.get_current_player(),
                cell,
                best.visits(),
                best.value()
            );
        }
        println!("{}", mcts.get_statistics().summary());
        println!();

        if !game.play(cell.row, cell.column)? {
            return Err(MCTSError::IllegalAction(format!("{:?}", cell)));
        }
        turn += 1;
    }

    println!("{}", game);
    match game.get_winner() {
        Some(mark) => println!("{:?} wins after {} moves", mark, game.move_count()),
        None => println!("The game is a draw"),
    }

    Ok(())
}
