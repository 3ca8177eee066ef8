//! Opponent implementations: the minimax search engine and a random
//! baseline, both behind the [`Agent`] trait.

mod agent;
mod minimax;
mod random;

pub use agent::Agent;
pub use minimax::{Heuristic, MinimaxAgent, RunHeuristic, DEFAULT_SEARCH_DEPTH, WIN_SCORE};
pub use random::RandomAgent;
