//! Core Connect-M game logic: the gravity board, player types, and the
//! session state machine that arbitrates turns and outcomes.

mod board;
mod player;
mod session;

pub use board::{Board, Cell};
pub use player::Player;
pub use session::{GameOutcome, GameSession};
