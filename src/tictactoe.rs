//! Tic-tac-toe on a 3×3 board
//!
//! A small, cheap-to-copy reference game for the search. Moves are
//! enumerated row-major and the game ends as soon as a line is completed
//! or the board is full.

use std::fmt;

use crate::{game_state, GameState, MCTSError, Result};

const ROWS: usize = 3;
const COLUMNS: usize = 3;
const CELLS: usize = ROWS * COLUMNS;

const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// The two players
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    /// The other player
    pub fn opponent(self) -> Mark {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }

    fn symbol(self) -> char {
        match self {
            Mark::X => 'X',
            Mark::O => 'O',
        }
    }
}

impl game_state::Player for Mark {}

/// A board cell, the move type of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub row: usize,
    pub column: usize,
}

impl Cell {
    /// Creates a cell, rejecting coordinates outside the board
    pub fn new(row: usize, column: usize) -> Result<Self> {
        if row >= ROWS || column >= COLUMNS {
            return Err(MCTSError::InvalidPosition(format!(
                "cell ({}, {}) is outside the {}x{} board",
                row, column, ROWS, COLUMNS
            )));
        }
        Ok(Cell { row, column })
    }

    /// Row-major index of the cell, 0 to 8
    pub fn index(self) -> usize {
        self.row * COLUMNS + self.column
    }

    fn from_index(index: usize) -> Self {
        Cell {
            row: index / COLUMNS,
            column: index % COLUMNS,
        }
    }
}

impl game_state::Action for Cell {}

/// A tic-tac-toe position
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TicTacToe {
    cells: [Option<Mark>; CELLS],
    to_move: Mark,
    move_count: usize,
    winner: Option<Mark>,
}

impl TicTacToe {
    /// Creates an empty board with `first_player` to move
    pub fn new(first_player: Mark) -> Self {
        TicTacToe {
            cells: [None; CELLS],
            to_move: first_player,
            move_count: 0,
            winner: None,
        }
    }

    /// Builds a position from nine row-major cells
    ///
    /// `X`/`O` (either case) are marks, `.`, `_` or `-` are empty. Whitespace
    /// is ignored, so rows may be separated.
    ///
    /// ```
    /// use uct_mcts::tictactoe::{Mark, TicTacToe};
    ///
    /// let game = TicTacToe::from_cells("XX. OO. ...", Mark::X).unwrap();
    /// assert_eq!(game.to_cells(), "XX.OO....");
    /// ```
    pub fn from_cells(cells: &str, to_move: Mark) -> Result<Self> {
        let symbols: Vec<char> = cells.chars().filter(|c| !c.is_whitespace()).collect();
        if symbols.len() != CELLS {
            return Err(MCTSError::InvalidPosition(format!(
                "expected {} cells, got {}",
                CELLS,
                symbols.len()
            )));
        }

        let mut game = TicTacToe::new(to_move);
        for (i, symbol) in symbols.into_iter().enumerate() {
            game.cells[i] = match symbol {
                'X' | 'x' => Some(Mark::X),
                'O' | 'o' => Some(Mark::O),
                '.' | '_' | '-' => None,
                other => {
                    return Err(MCTSError::InvalidPosition(format!(
                        "unexpected cell symbol {:?}",
                        other
                    )))
                }
            };
        }
        game.move_count = game.cells.iter().filter(|cell| cell.is_some()).count();
        game.winner = game.find_winner();
        Ok(game)
    }

    /// Row-major cells as a string of `X`, `O` and `.`
    pub fn to_cells(&self) -> String {
        self.cells
            .iter()
            .map(|cell| cell.map_or('.', Mark::symbol))
            .collect()
    }

    /// Mark at a cell, if any
    pub fn get(&self, cell: Cell) -> Option<Mark> {
        self.cells[cell.index()]
    }

    /// Number of marks on the board
    pub fn move_count(&self) -> usize {
        self.move_count
    }

    /// Plays the player to move at (`row`, `column`)
    ///
    /// Returns `Ok(false)` without changing anything when the cell is taken
    /// or the game is already over.
    ///
    /// # Errors
    ///
    /// [`MCTSError::InvalidPosition`] for coordinates outside the board.
    pub fn play(&mut self, row: usize, column: usize) -> Result<bool> {
        let cell = Cell::new(row, column)?;
        if self.is_terminal() || self.cells[cell.index()].is_some() {
            return Ok(false);
        }

        self.cells[cell.index()] = Some(self.to_move);
        self.move_count += 1;
        self.to_move = self.to_move.opponent();
        self.winner = self.find_winner();
        Ok(true)
    }

    fn find_winner(&self) -> Option<Mark> {
        LINES.iter().find_map(|&[a, b, c]| match self.cells[a] {
            Some(mark) if self.cells[b] == Some(mark) && self.cells[c] == Some(mark) => Some(mark),
            _ => None,
        })
    }
}

impl GameState for TicTacToe {
    type Action = Cell;
    type Player = Mark;

    fn get_legal_actions(&self) -> Vec<Cell> {
        if self.is_terminal() {
            return Vec::new();
        }
        (0..CELLS)
            .filter(|&i| self.cells[i].is_none())
            .map(Cell::from_index)
            .collect()
    }

    fn apply_action(&self, action: &Cell) -> Option<Self> {
        let mut next = self.clone();
        match next.play(action.row, action.column) {
            Ok(true) => Some(next),
            _ => None,
        }
    }

    fn is_terminal(&self) -> bool {
        self.winner.is_some() || self.move_count == CELLS
    }

    fn get_winner(&self) -> Option<Mark> {
        self.winner
    }

    fn get_current_player(&self) -> Mark {
        self.to_move
    }
}

impl fmt::Display for TicTacToe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..ROWS {
            let line: Vec<String> = (0..COLUMNS)
                .map(|column| {
                    self.cells[row * COLUMNS + column]
                        .map_or('.', Mark::symbol)
                        .to_string()
                })
                .collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        match self.winner {
            Some(mark) => write!(f, "Winner: {}", mark.symbol()),
            None if self.is_terminal() => write!(f, "Draw"),
            None => write!(f, "{} to move", self.to_move.symbol()),
        }
    }
}
