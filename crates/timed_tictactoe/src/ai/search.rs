//! Depth-limited minimax with alpha-beta pruning.
//!
//! The search takes board values and builds each child with
//! [`Board::with_mark`], so there is no shared scratch state to undo.
//! The computer maximizes.

use crate::rules::evaluate;
use crate::{Board, Outcome, Player, Position};

/// Base score of a decided game; depth is subtracted so faster wins and
/// slower losses are preferred.
pub const WIN_SCORE: i32 = 10;

/// Scores `board` with `depth` plies already played below the root move.
///
/// Terminal boards score `10 - depth` for a computer win, `depth - 10` for a
/// human win and `0` for a draw. Once `depth` exceeds `max_depth` the node
/// scores `0`.
pub fn minimax(
    board: Board,
    depth: u8,
    max_depth: u8,
    maximizing: bool,
    mut alpha: i32,
    mut beta: i32,
) -> i32 {
    match evaluate(&board) {
        Outcome::ComputerWin => return WIN_SCORE - i32::from(depth),
        Outcome::HumanWin => return i32::from(depth) - WIN_SCORE,
        Outcome::Draw => return 0,
        Outcome::Ongoing => {}
    }

    if depth > max_depth {
        return 0;
    }

    let mover = if maximizing {
        Player::Computer
    } else {
        Player::Human
    };

    let mut best = if maximizing { i32::MIN } else { i32::MAX };
    for pos in board.empty_cells() {
        let score = minimax(
            board.with_mark(pos, mover),
            depth + 1,
            max_depth,
            !maximizing,
            alpha,
            beta,
        );
        if maximizing {
            best = best.max(score);
            alpha = alpha.max(score);
        } else {
            best = best.min(score);
            beta = beta.min(score);
        }
        if beta <= alpha {
            break;
        }
    }
    best
}

/// Best computer move by minimax, ties going to the first square found.
///
/// Each root move is searched with a fresh alpha-beta window.
/// Returns `None` only when the board has no empty square.
pub fn best_move(board: &Board, max_depth: u8) -> Option<(Position, i32)> {
    let mut best: Option<(Position, i32)> = None;
    for pos in board.empty_cells() {
        let score = minimax(
            board.with_mark(pos, Player::Computer),
            0,
            max_depth,
            false,
            i32::MIN,
            i32::MAX,
        );
        if best.is_none_or(|(_, best_score)| score > best_score) {
            best = Some((pos, score));
        }
    }
    best
}
