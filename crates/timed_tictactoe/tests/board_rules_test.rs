//! Tests for the board value and outcome evaluation.

use timed_tictactoe::rules::{LINES, evaluate, winning_line};
use timed_tictactoe::{Board, IllegalMove, Outcome, Player, Position, Square};

#[test]
fn test_every_line_wins_for_either_player() {
    for line in LINES {
        for player in [Player::Human, Player::Computer] {
            let mut board = Board::new();
            for pos in line {
                board.place(pos, player).unwrap();
            }
            assert_eq!(evaluate(&board), Outcome::win_for(player), "line {:?}", line);
            assert_eq!(winning_line(&board), Some((player, line)));
        }
    }
}

#[test]
fn test_two_in_a_line_is_ongoing() {
    for line in LINES {
        let mut board = Board::new();
        board.place(line[0], Player::Human).unwrap();
        board.place(line[1], Player::Human).unwrap();
        assert_eq!(evaluate(&board), Outcome::Ongoing);
        assert_eq!(winning_line(&board), None);
    }
}

#[test]
fn test_rows_checked_before_columns() {
    let board: Board = "XXX/X../X..".parse().unwrap();
    assert_eq!(
        winning_line(&board),
        Some((
            Player::Human,
            [Position::TopLeft, Position::TopCenter, Position::TopRight]
        ))
    );
}

#[test]
fn test_full_board_without_line_is_draw() {
    let board: Board = "XOX/XOO/OXX".parse().unwrap();
    assert!(board.is_full());
    assert_eq!(evaluate(&board), Outcome::Draw);
    assert!(evaluate(&board).is_terminal());
    assert_eq!(evaluate(&board).winner(), None);
}

#[test]
fn test_place_rejects_occupied_square() {
    let mut board = Board::new();
    board.place(Position::Center, Player::Computer).unwrap();
    assert_eq!(
        board.place(Position::Center, Player::Human),
        Err(IllegalMove::CellOccupied(Position::Center))
    );
    assert_eq!(board.get(Position::Center), Square::Occupied(Player::Computer));
}

#[test]
fn test_empty_cells_shrink_as_marks_land() {
    let mut board = Board::new();
    assert_eq!(board.empty_cells(), Position::ALL.to_vec());
    board.place(Position::TopLeft, Player::Human).unwrap();
    board.place(Position::BottomRight, Player::Computer).unwrap();
    let empty = board.empty_cells();
    assert_eq!(empty.len(), 7);
    assert_eq!(empty.first(), Some(&Position::TopCenter));
    assert_eq!(empty.last(), Some(&Position::BottomCenter));
}

#[test]
fn test_position_coordinates_agree() {
    for (index, pos) in Position::ALL.iter().enumerate() {
        assert_eq!(pos.to_index(), index);
        assert_eq!(Position::from_row_col(pos.row(), pos.col()), Some(*pos));
        assert_eq!(Position::from_key(pos.key()), Some(*pos));
    }
    assert_eq!(Position::from_row_col(3, 0), None);
    assert_eq!(Position::from_row_col(0, 3), None);
}
