use crate::game::{Board, Cell, GameSession, Player};

use super::agent::Agent;

/// Score of a position the engine's side has already won; a lost position
/// scores the negation.
pub const WIN_SCORE: i32 = 1_000;
/// Bonus for a forward run exactly one piece short of the target length.
const NEAR_WIN_SCORE: i32 = 50;
/// Bonus for a forward run exactly two pieces short of the target length.
const PROGRESS_SCORE: i32 = 10;
/// Search depth in plies used when none is configured.
pub const DEFAULT_SEARCH_DEPTH: usize = 4;

/// Axes runs are counted along, forward sense only: down, right, and the
/// two downward diagonals. Counting one sense per axis from every occupied
/// cell visits each run once per cell without double counting axes.
const DIRECTIONS: [(i32, i32); 4] = [(1, 0), (0, 1), (1, 1), (1, -1)];

/// Trait for evaluating a board position from a player's perspective.
pub trait Heuristic: Send {
    /// Positive favors `player`, negative favors the opponent.
    fn evaluate(&self, board: &Board, player: Player, run_length: usize) -> i32;
}

/// Default heuristic: counts forward runs from every occupied cell and
/// rewards runs one or two pieces short of `run_length`, own runs adding
/// and opponent runs subtracting.
pub struct RunHeuristic;

impl RunHeuristic {
    /// Score the forward runs that start at a single occupied cell.
    fn cell_potential(board: &Board, row: usize, col: usize, cell: Cell, run_length: usize) -> i32 {
        let mut score = 0;
        for (row_step, col_step) in DIRECTIONS {
            let run = 1 + forward_run(board, row, col, row_step, col_step, cell);
            if run + 1 == run_length {
                score += NEAR_WIN_SCORE;
            } else if run + 2 == run_length {
                score += PROGRESS_SCORE;
            }
        }
        score
    }
}

impl Heuristic for RunHeuristic {
    fn evaluate(&self, board: &Board, player: Player, run_length: usize) -> i32 {
        let own = player.to_cell();
        let opp = player.other().to_cell();
        let mut score = 0;

        for row in 0..board.size() {
            for col in 0..board.size() {
                let cell = board.get(row, col);
                if cell == own {
                    score += Self::cell_potential(board, row, col, own, run_length);
                } else if cell == opp {
                    score -= Self::cell_potential(board, row, col, opp, run_length);
                }
            }
        }

        score
    }
}

/// Consecutive `cell` cells strictly beyond `(row, col)` in one direction,
/// not counting the origin.
fn forward_run(
    board: &Board,
    row: usize,
    col: usize,
    row_step: i32,
    col_step: i32,
    cell: Cell,
) -> usize {
    let size = board.size() as i32;
    let mut count = 0;
    let mut r = row as i32 + row_step;
    let mut c = col as i32 + col_step;
    while r >= 0 && r < size && c >= 0 && c < size && board.get(r as usize, c as usize) == cell {
        count += 1;
        r += row_step;
        c += col_step;
    }
    count
}

/// Minimax agent with alpha-beta pruning.
///
/// Plays for whichever side the caller passes in and keeps no state between
/// calls beyond the configured depth and evaluator. The search mutates the
/// board it is given through drop/remove pairs and restores it exactly
/// before returning.
pub struct MinimaxAgent {
    depth: usize,
    heuristic: Box<dyn Heuristic>,
}

impl MinimaxAgent {
    pub fn new(depth: usize) -> Self {
        MinimaxAgent {
            depth,
            heuristic: Box::new(RunHeuristic),
        }
    }

    pub fn with_heuristic(depth: usize, heuristic: Box<dyn Heuristic>) -> Self {
        MinimaxAgent { depth, heuristic }
    }

    /// Pick the best column for `player`, or `None` when every column is
    /// full.
    ///
    /// Candidates are tried in ascending column order and each is scored by
    /// dropping into it and searching the reply position at the configured
    /// depth. Ties keep the first candidate, so the lowest tied column wins
    /// and move choice is fully deterministic.
    pub fn best_move(&self, board: &mut Board, player: Player, run_length: usize) -> Option<usize> {
        let mut best_column = None;
        // Search scores stay far above i32::MIN, so the first open column
        // always replaces this.
        let mut best_score = i32::MIN;

        for col in 0..board.size() {
            if board.drop_piece(col, player).is_err() {
                // Full column; col is never out of range here.
                continue;
            }
            let score = self.search(board, player, run_length, self.depth, i32::MIN, i32::MAX, false);
            board.remove_top(col);

            if score > best_score {
                best_score = score;
                best_column = Some(col);
            }
        }

        best_column
    }

    /// Recursive minimax step. `maximizing` is true when `player` (the
    /// engine's side) is to move; scores are always from `player`'s
    /// perspective.
    ///
    /// Decided positions score before depth is consulted, so a depth-0 call
    /// still recognizes a finished game. A position with no playable column
    /// falls back to the static evaluation, the same as hitting the depth
    /// floor.
    #[allow(clippy::too_many_arguments)]
    fn search(
        &self,
        board: &mut Board,
        player: Player,
        run_length: usize,
        depth: usize,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
    ) -> i32 {
        if board.check_win(player, run_length) {
            return WIN_SCORE;
        }
        if board.check_win(player.other(), run_length) {
            return -WIN_SCORE;
        }
        if depth == 0 || board.is_full() {
            return self.heuristic.evaluate(board, player, run_length);
        }

        if maximizing {
            let mut best = i32::MIN;
            for col in 0..board.size() {
                if board.drop_piece(col, player).is_err() {
                    continue;
                }
                let score = self.search(board, player, run_length, depth - 1, alpha, beta, false);
                board.remove_top(col);

                best = best.max(score);
                alpha = alpha.max(score);
                if beta <= alpha {
                    break;
                }
            }
            best
        } else {
            let mut best = i32::MAX;
            for col in 0..board.size() {
                if board.drop_piece(col, player.other()).is_err() {
                    continue;
                }
                let score = self.search(board, player, run_length, depth - 1, alpha, beta, true);
                board.remove_top(col);

                best = best.min(score);
                beta = beta.min(score);
                if beta <= alpha {
                    break;
                }
            }
            best
        }
    }
}

impl Agent for MinimaxAgent {
    /// Searches a scratch copy of the session's board: one clone per call,
    /// constant-cost drop/remove mutation per node inside.
    fn select_action(&mut self, session: &GameSession) -> Option<usize> {
        let mut board = session.board().clone();
        self.best_move(&mut board, session.current_player(), session.run_length())
    }

    fn name(&self) -> &str {
        "Minimax"
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;
    use crate::ai::RandomAgent;
    use crate::game::GameOutcome;

    fn board_from_moves(size: usize, moves: &[usize]) -> Board {
        let mut board = Board::new(size);
        let mut player = Player::Red;
        for &col in moves {
            board.drop_piece(col, player).unwrap();
            player = player.other();
        }
        board
    }

    fn random_board(rng: &mut StdRng, size: usize, max_drops: usize) -> Board {
        let mut board = Board::new(size);
        for _ in 0..rng.random_range(0..max_drops) {
            let open = board.legal_columns();
            if open.is_empty() {
                break;
            }
            let col = open[rng.random_range(0..open.len())];
            let player = if rng.random_bool(0.5) {
                Player::Red
            } else {
                Player::Yellow
            };
            board.drop_piece(col, player).unwrap();
        }
        board
    }

    /// Plain minimax without pruning, used as the oracle for cutoff
    /// correctness.
    fn full_width(
        board: &mut Board,
        player: Player,
        run_length: usize,
        depth: usize,
        maximizing: bool,
    ) -> i32 {
        if board.check_win(player, run_length) {
            return WIN_SCORE;
        }
        if board.check_win(player.other(), run_length) {
            return -WIN_SCORE;
        }
        if depth == 0 || board.is_full() {
            return RunHeuristic.evaluate(board, player, run_length);
        }

        let side = if maximizing { player } else { player.other() };
        let mut best = if maximizing { i32::MIN } else { i32::MAX };
        for col in 0..board.size() {
            if board.drop_piece(col, side).is_err() {
                continue;
            }
            let score = full_width(board, player, run_length, depth - 1, !maximizing);
            board.remove_top(col);
            best = if maximizing {
                best.max(score)
            } else {
                best.min(score)
            };
        }
        best
    }

    // --- Heuristic tests ---

    #[test]
    fn heuristic_empty_board_is_zero() {
        let board = Board::new(7);
        let h = RunHeuristic;
        assert_eq!(h.evaluate(&board, Player::Red, 4), 0);
        assert_eq!(h.evaluate(&board, Player::Yellow, 4), 0);
    }

    #[test]
    fn heuristic_is_zero_sum() {
        let board = board_from_moves(7, &[3, 3, 2, 4, 1, 2, 0, 5, 6]);
        let h = RunHeuristic;
        assert_eq!(
            h.evaluate(&board, Player::Red, 4),
            -h.evaluate(&board, Player::Yellow, 4)
        );
    }

    #[test]
    fn heuristic_scores_open_three() {
        let mut board = Board::new(7);
        for col in 0..3 {
            board.drop_piece(col, Player::Red).unwrap();
        }
        let h = RunHeuristic;
        // The leftmost piece sees a forward run of three (near win), the
        // middle one a run of two (progress), the rightmost nothing.
        assert_eq!(
            h.evaluate(&board, Player::Red, 4),
            NEAR_WIN_SCORE + PROGRESS_SCORE
        );
        assert_eq!(
            h.evaluate(&board, Player::Yellow, 4),
            -(NEAR_WIN_SCORE + PROGRESS_SCORE)
        );
    }

    #[test]
    fn heuristic_tracks_run_length() {
        let mut board = Board::new(7);
        for col in 0..3 {
            board.drop_piece(col, Player::Red).unwrap();
        }
        let h = RunHeuristic;
        // The same three pieces are a near win when four connect, mere
        // progress when five do, and worthless when six do.
        assert_eq!(
            h.evaluate(&board, Player::Red, 4),
            NEAR_WIN_SCORE + PROGRESS_SCORE
        );
        assert_eq!(h.evaluate(&board, Player::Red, 5), PROGRESS_SCORE);
        assert_eq!(h.evaluate(&board, Player::Red, 6), 0);
    }

    // --- Algorithm tests ---

    #[test]
    fn selects_legal_action() {
        let mut agent = MinimaxAgent::new(4);
        let session = GameSession::new(7, 4, Player::Red);
        let action = agent.select_action(&session).unwrap();
        assert!(
            session.legal_moves().contains(&action),
            "action {action} is not legal"
        );
    }

    #[test]
    fn takes_winning_move() {
        let mut session = GameSession::new(7, 4, Player::Red);
        // Red builds 0,1,2 on the bottom row; Yellow scatters harmlessly
        session.play(0).unwrap(); // Red
        session.play(4).unwrap(); // Yellow
        session.play(1).unwrap(); // Red
        session.play(4).unwrap(); // Yellow
        session.play(2).unwrap(); // Red
        session.play(5).unwrap(); // Yellow

        let mut agent = MinimaxAgent::new(4);
        let action = agent.select_action(&session);
        assert_eq!(action, Some(3), "should take the winning move at col 3");
    }

    #[test]
    fn blocks_opponent_win() {
        let mut session = GameSession::new(7, 4, Player::Red);
        session.play(6).unwrap(); // Red
        session.play(0).unwrap(); // Yellow
        session.play(6).unwrap(); // Red
        session.play(1).unwrap(); // Yellow
        session.play(5).unwrap(); // Red
        session.play(2).unwrap(); // Yellow
        // Yellow holds 0,1,2 on the bottom row; Red must play col 3.
        let mut agent = MinimaxAgent::new(4);
        let action = agent.select_action(&session);
        assert_eq!(action, Some(3), "should block the opponent at col 3");
    }

    #[test]
    fn depth_one_still_wins_and_blocks() {
        // Winning and blocking are one-move tactics, so the shallowest
        // search must already find them.
        let mut agent = MinimaxAgent::new(1);

        let mut session = GameSession::new(7, 4, Player::Red);
        session.play(0).unwrap(); // Red
        session.play(4).unwrap(); // Yellow
        session.play(1).unwrap(); // Red
        session.play(4).unwrap(); // Yellow
        session.play(2).unwrap(); // Red
        session.play(5).unwrap(); // Yellow
        assert_eq!(agent.select_action(&session), Some(3), "missed the win");

        let mut session = GameSession::new(7, 4, Player::Red);
        session.play(6).unwrap(); // Red
        session.play(0).unwrap(); // Yellow
        session.play(6).unwrap(); // Red
        session.play(1).unwrap(); // Yellow
        session.play(5).unwrap(); // Red
        session.play(2).unwrap(); // Yellow
        assert_eq!(agent.select_action(&session), Some(3), "missed the block");
    }

    #[test]
    fn prefers_win_over_block() {
        let mut session = GameSession::new(7, 4, Player::Red);
        // Red owns the bottom row 0,1,2 and Yellow the row above; both
        // need col 3, but Red moves first and wins outright.
        for col in 0..3 {
            session.play(col).unwrap(); // Red
            session.play(col).unwrap(); // Yellow
        }
        let mut agent = MinimaxAgent::new(4);
        let action = agent.select_action(&session);
        assert_eq!(action, Some(3), "should prefer winning over blocking");
    }

    #[test]
    fn wins_at_shorter_run_length() {
        let mut session = GameSession::new(5, 3, Player::Yellow);
        session.play(0).unwrap(); // Yellow
        session.play(4).unwrap(); // Red
        session.play(1).unwrap(); // Yellow
        session.play(4).unwrap(); // Red
        // Yellow completes three at col 2 before Red's col 4 stack matters.
        let mut agent = MinimaxAgent::new(4);
        assert_eq!(agent.select_action(&session), Some(2));
    }

    #[test]
    fn returns_none_when_board_is_full() {
        let mut board = Board::new(4);
        for col in 0..4 {
            for _ in 0..4 {
                board.drop_piece(col, Player::Red).unwrap();
            }
        }
        let agent = MinimaxAgent::new(4);
        assert_eq!(agent.best_move(&mut board, Player::Yellow, 4), None);
    }

    #[test]
    fn single_open_column_is_chosen() {
        let mut board = Board::new(4);
        // Fill columns 0..3 with alternating stacks that give neither side
        // a run of four.
        for col in 0..3 {
            let mut player = if col == 1 { Player::Yellow } else { Player::Red };
            for _ in 0..4 {
                board.drop_piece(col, player).unwrap();
                player = player.other();
            }
        }
        let agent = MinimaxAgent::new(4);
        assert_eq!(agent.best_move(&mut board, Player::Red, 4), Some(3));
    }

    #[test]
    fn lowest_column_wins_ties() {
        // With a run length of two, every column next to the lone red
        // piece is an immediate win; all root scores tie at WIN_SCORE and
        // the first candidate must be kept.
        let mut board = Board::new(3);
        board.drop_piece(1, Player::Red).unwrap();
        let agent = MinimaxAgent::new(4);
        assert_eq!(agent.best_move(&mut board, Player::Red, 2), Some(0));
    }

    #[test]
    fn never_picks_full_column() {
        let mut rng = StdRng::seed_from_u64(11);
        let agent = MinimaxAgent::new(2);
        for _ in 0..20 {
            let mut board = Board::new(5);
            for _ in 0..5 {
                let player = if rng.random_bool(0.5) {
                    Player::Red
                } else {
                    Player::Yellow
                };
                board.drop_piece(2, player).unwrap();
            }
            for _ in 0..rng.random_range(0..10) {
                let open = board.legal_columns();
                let col = open[rng.random_range(0..open.len())];
                let player = if rng.random_bool(0.5) {
                    Player::Red
                } else {
                    Player::Yellow
                };
                board.drop_piece(col, player).unwrap();
            }
            let col = agent.best_move(&mut board, Player::Red, 4).unwrap();
            assert!(
                !board.is_column_full(col).unwrap(),
                "picked full column {col}"
            );
        }
    }

    #[test]
    fn board_restored_after_search() {
        let mut rng = StdRng::seed_from_u64(23);
        let agent = MinimaxAgent::new(3);
        for _ in 0..10 {
            let mut board = random_board(&mut rng, 6, 12);
            let before = board.clone();
            agent.best_move(&mut board, Player::Yellow, 4);
            assert_eq!(board, before, "search left the board modified");
        }
    }

    #[test]
    fn pruning_preserves_minimax_scores() {
        let fixtures: [(usize, usize, &[usize]); 5] = [
            (7, 4, &[3, 3, 2, 4, 4, 2, 5]),
            (7, 4, &[0, 1, 1, 2, 3, 2, 6, 5]),
            (7, 4, &[3, 2, 3, 4, 2, 2, 5, 6, 1]),
            (5, 3, &[2, 2, 1, 3, 1]),
            (6, 4, &[0, 0, 1, 1, 2, 3, 5, 5]),
        ];
        let depth = 3;

        for (i, &(size, run_length, moves)) in fixtures.iter().enumerate() {
            let mut board = board_from_moves(size, moves);
            let agent = MinimaxAgent::new(depth);
            let player = if moves.len() % 2 == 0 {
                Player::Red
            } else {
                Player::Yellow
            };

            for col in board.legal_columns() {
                board.drop_piece(col, player).unwrap();
                let pruned =
                    agent.search(&mut board, player, run_length, depth, i32::MIN, i32::MAX, false);
                let full = full_width(&mut board, player, run_length, depth, false);
                board.remove_top(col);
                assert_eq!(pruned, full, "fixture {i}, column {col}: scores differ");
            }

            let full_choice = {
                let mut best: Option<(usize, i32)> = None;
                for col in board.legal_columns() {
                    board.drop_piece(col, player).unwrap();
                    let score = full_width(&mut board, player, run_length, depth, false);
                    board.remove_top(col);
                    if best.map_or(true, |(_, s)| score > s) {
                        best = Some((col, score));
                    }
                }
                best.map(|(col, _)| col)
            };
            let pruned_choice = agent.best_move(&mut board, player, run_length);
            assert_eq!(pruned_choice, full_choice, "fixture {i}: chosen columns differ");
        }
    }

    // --- Integration tests ---

    #[test]
    fn full_game_vs_self_completes() {
        let mut red = MinimaxAgent::new(3);
        let mut yellow = MinimaxAgent::new(3);
        let mut session = GameSession::new(7, 4, Player::Red);
        let mut turn = 0;

        while !session.is_terminal() && turn < 49 {
            let agent = if session.current_player() == Player::Red {
                &mut red
            } else {
                &mut yellow
            };
            let action = agent.select_action(&session).unwrap();
            session.play(action).unwrap();
            turn += 1;
        }

        assert!(session.is_terminal(), "game should complete");
        assert!(session.outcome().is_some());
    }

    #[test]
    fn beats_random_agent() {
        let games_per_color = 10;
        let mut minimax_wins = 0;
        let total = games_per_color * 2;

        for game in 0..total {
            let minimax_player = if game < games_per_color {
                Player::Red
            } else {
                Player::Yellow
            };
            let mut minimax = MinimaxAgent::new(3);
            let mut random = RandomAgent::seeded(game as u64);
            let mut session = GameSession::new(7, 4, Player::Red);

            while !session.is_terminal() {
                let action = if session.current_player() == minimax_player {
                    minimax.select_action(&session)
                } else {
                    random.select_action(&session)
                };
                session.play(action.unwrap()).unwrap();
            }

            if session.outcome() == Some(GameOutcome::Winner(minimax_player)) {
                minimax_wins += 1;
            }
        }

        let win_rate = minimax_wins as f64 / total as f64;
        assert!(
            win_rate > 0.80,
            "minimax should beat random >80% of the time, got {:.0}% ({minimax_wins}/{total})",
            win_rate * 100.0
        );
    }

    // --- Agent trait tests ---

    #[test]
    fn name_is_minimax() {
        let agent = MinimaxAgent::new(7);
        assert_eq!(agent.name(), "Minimax");
    }
}
