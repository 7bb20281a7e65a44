//! Cheap tactical scans used by the decision cascade.
//!
//! Every scan works on board copies and follows row-major order, so the
//! first qualifying square is always the same for the same board.

use crate::rules::evaluate;
use crate::{Board, Outcome, Player, Position};
use rand::Rng;
use rand::seq::SliceRandom;

/// First empty square that completes a line for `player`.
pub fn find_winning_move(board: &Board, player: Player) -> Option<Position> {
    let target = Outcome::win_for(player);
    board
        .empty_cells()
        .into_iter()
        .find(|&pos| evaluate(&board.with_mark(pos, player)) == target)
}

/// First empty square that stops the opponent of `player` from completing a line.
pub fn find_blocking_move(board: &Board, player: Player) -> Option<Position> {
    find_winning_move(board, player.opponent())
}

/// Number of squares that would immediately win for `player`.
pub fn count_winning_moves(board: &Board, player: Player) -> usize {
    let target = Outcome::win_for(player);
    board
        .empty_cells()
        .into_iter()
        .filter(|&pos| evaluate(&board.with_mark(pos, player)) == target)
        .count()
}

/// First square that gives `player` two simultaneous winning threats.
pub fn find_fork_move(board: &Board, player: Player) -> Option<Position> {
    board
        .empty_cells()
        .into_iter()
        .find(|&pos| count_winning_moves(&board.with_mark(pos, player), player) >= 2)
}

/// The center, if it is free.
pub fn take_center(board: &Board) -> Option<Position> {
    board.is_empty(Position::CENTER).then_some(Position::CENTER)
}

/// A uniformly random free corner.
pub fn take_corner<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> Option<Position> {
    pick_free(board, &Position::CORNERS, rng)
}

/// A uniformly random free edge midpoint.
pub fn take_side<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> Option<Position> {
    pick_free(board, &Position::SIDES, rng)
}

/// A uniformly random empty square.
pub fn random_empty<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> Option<Position> {
    board.empty_cells().choose(rng).copied()
}

fn pick_free<R: Rng + ?Sized>(
    board: &Board,
    group: &[Position],
    rng: &mut R,
) -> Option<Position> {
    let free: Vec<Position> = group
        .iter()
        .copied()
        .filter(|pos| board.is_empty(*pos))
        .collect();
    free.choose(rng).copied()
}
