//! Game rules for tic-tac-toe.
//!
//! Pure functions over a [`Board`] value. The AI evaluates thousands of
//! hypothetical boards per decision, so nothing here allocates or logs.

pub mod draw;
pub mod win;

pub use draw::is_full;
pub use win::{LINES, check_winner, winning_line};

use super::{Board, Outcome};

/// Evaluates a board.
///
/// Rows are checked before columns before diagonals and the first complete
/// line decides the winner. A full board without a complete line is a draw.
pub fn evaluate(board: &Board) -> Outcome {
    if let Some(winner) = check_winner(board) {
        Outcome::win_for(winner)
    } else if is_full(board) {
        Outcome::Draw
    } else {
        Outcome::Ongoing
    }
}
