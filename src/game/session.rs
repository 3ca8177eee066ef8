use crate::error::MoveError;

use super::{Board, Player};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Winner(Player),
    Draw,
}

/// One game of Connect-M: the board plus the turn and outcome state the
/// board itself does not carry.
///
/// The session trusts its parameters; the supported ranges (3..=10 for
/// `size`, 2..=size for `run_length`) are enforced by the configuration
/// layer before a session is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSession {
    board: Board,
    run_length: usize,
    first_player: Player,
    current_player: Player,
    outcome: Option<GameOutcome>,
}

impl GameSession {
    /// Start a fresh game on an empty `size` x `size` board where
    /// `run_length` connected pieces win.
    pub fn new(size: usize, run_length: usize, first_player: Player) -> Self {
        GameSession {
            board: Board::new(size),
            run_length,
            first_player,
            current_player: first_player,
            outcome: None,
        }
    }

    /// Get reference to the board
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Number of connected pieces required to win
    pub fn run_length(&self) -> usize {
        self.run_length
    }

    /// Get current player
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Get game outcome if game is over
    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    /// Check if game is over
    pub fn is_terminal(&self) -> bool {
        self.outcome.is_some()
    }

    /// Columns that can still take a piece, in ascending order. Empty once
    /// the game is over.
    pub fn legal_moves(&self) -> Vec<usize> {
        if self.is_terminal() {
            return Vec::new();
        }
        self.board.legal_columns()
    }

    /// Drop the current player's piece into `column`.
    ///
    /// On success returns the landing row, records a win or draw if the
    /// move ended the game, and passes the turn to the other player. On
    /// failure the turn does not change hands.
    pub fn play(&mut self, column: usize) -> Result<usize, MoveError> {
        if self.is_terminal() {
            return Err(MoveError::GameOver);
        }

        let row = self.board.drop_piece(column, self.current_player)?;

        if self.board.check_win(self.current_player, self.run_length) {
            self.outcome = Some(GameOutcome::Winner(self.current_player));
        } else if self.board.is_full() {
            self.outcome = Some(GameOutcome::Draw);
        }

        self.current_player = self.current_player.other();
        Ok(row)
    }

    /// Clear the board and restart with the same first player.
    pub fn reset(&mut self) {
        self.board.clear();
        self.current_player = self.first_player;
        self.outcome = None;
    }
}
