//! Core domain types for timed tic-tac-toe.

use super::error::IllegalMove;
use super::position::Position;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Side in the match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    /// The human (plays X, moves first).
    Human,
    /// The computer opponent (plays O).
    Computer,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::Human => Player::Computer,
            Player::Computer => Player::Human,
        }
    }

    /// Board symbol for this player.
    pub fn symbol(self) -> char {
        match self {
            Player::Human => 'X',
            Player::Computer => 'O',
        }
    }
}

/// Whose move is currently legal.
pub type Turn = Player;

/// A square on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Square {
    /// Empty square.
    Empty,
    /// Square occupied by a player.
    Occupied(Player),
}

/// 3x3 board, a plain value.
///
/// The board only knows about squares. Turn order and match phase are
/// enforced by [`MatchController`](crate::MatchController).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    /// Squares in row-major order (0-8).
    squares: [Square; 9],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            squares: [Square::Empty; 9],
        }
    }

    /// Gets the square at the given position.
    pub fn get(&self, pos: Position) -> Square {
        self.squares[pos.to_index()]
    }

    /// Checks if a square is empty.
    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos) == Square::Empty
    }

    /// Returns all squares as a slice.
    pub fn squares(&self) -> &[Square; 9] {
        &self.squares
    }

    /// Places a mark on an empty square.
    ///
    /// # Errors
    ///
    /// Returns [`IllegalMove::CellOccupied`] if the square already holds a mark.
    pub fn place(&mut self, pos: Position, player: Player) -> Result<(), IllegalMove> {
        if !self.is_empty(pos) {
            return Err(IllegalMove::CellOccupied(pos));
        }
        self.squares[pos.to_index()] = Square::Occupied(player);
        Ok(())
    }

    /// Overwrites a square without any checks.
    #[cfg(test)]
    pub(crate) fn set(&mut self, pos: Position, square: Square) {
        self.squares[pos.to_index()] = square;
    }

    /// Returns a copy of this board with `player` marked at `pos`.
    ///
    /// Used for hypothetical moves; the square is overwritten unconditionally.
    pub fn with_mark(&self, pos: Position, player: Player) -> Self {
        let mut next = *self;
        next.squares[pos.to_index()] = Square::Occupied(player);
        next
    }

    /// Empty positions in row-major order.
    pub fn empty_cells(&self) -> Vec<Position> {
        Position::ALL
            .iter()
            .copied()
            .filter(|pos| self.is_empty(*pos))
            .collect()
    }

    /// Number of squares holding `player`'s mark.
    pub fn count(&self, player: Player) -> usize {
        self.squares
            .iter()
            .filter(|s| **s == Square::Occupied(player))
            .count()
    }

    /// Number of occupied squares.
    pub fn filled(&self) -> usize {
        self.squares.iter().filter(|s| **s != Square::Empty).count()
    }

    /// Checks if every square is occupied.
    pub fn is_full(&self) -> bool {
        self.squares.iter().all(|s| *s != Square::Empty)
    }

    /// Formats the board as a human-readable string.
    ///
    /// Empty squares show their key (1-9).
    pub fn display(&self) -> String {
        let mut result = String::new();
        for row in 0..3 {
            for col in 0..3 {
                let pos = row * 3 + col;
                let symbol = match self.squares[pos] {
                    Square::Empty => (pos + 1).to_string(),
                    Square::Occupied(player) => player.symbol().to_string(),
                };
                result.push_str(&symbol);
                if col < 2 {
                    result.push('|');
                }
            }
            if row < 2 {
                result.push_str("\n-+-+-\n");
            }
        }
        result
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Error parsing a board from text.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Invalid board text: {}", message)]
pub struct BoardParseError {
    /// What went wrong.
    pub message: String,
}

impl FromStr for Board {
    type Err = BoardParseError;

    /// Parses nine cells: `X` human, `O` computer, `.` or `-` empty.
    ///
    /// Whitespace, `|` and `/` are ignored so rows can be laid out freely.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut squares = Vec::with_capacity(9);
        for ch in s.chars() {
            match ch {
                'X' | 'x' => squares.push(Square::Occupied(Player::Human)),
                'O' | 'o' => squares.push(Square::Occupied(Player::Computer)),
                '.' | '-' => squares.push(Square::Empty),
                c if c.is_whitespace() || c == '|' || c == '/' => {}
                other => {
                    return Err(BoardParseError {
                        message: format!("unexpected character {:?}", other),
                    });
                }
            }
        }
        let squares: [Square; 9] = squares.try_into().map_err(|cells: Vec<Square>| {
            BoardParseError {
                message: format!("expected 9 cells, found {}", cells.len()),
            }
        })?;
        Ok(Self { squares })
    }
}

/// Result of evaluating a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// No line complete and at least one empty square.
    Ongoing,
    /// The human completed a line.
    HumanWin,
    /// The computer completed a line.
    ComputerWin,
    /// Board full without a complete line.
    Draw,
}

impl Outcome {
    /// Outcome for a line completed by `player`.
    pub fn win_for(player: Player) -> Self {
        match player {
            Player::Human => Outcome::HumanWin,
            Player::Computer => Outcome::ComputerWin,
        }
    }

    /// Returns the winner if there is one.
    pub fn winner(self) -> Option<Player> {
        match self {
            Outcome::HumanWin => Some(Player::Human),
            Outcome::ComputerWin => Some(Player::Computer),
            Outcome::Ongoing | Outcome::Draw => None,
        }
    }

    /// Returns true once the match is decided.
    pub fn is_terminal(self) -> bool {
        self != Outcome::Ongoing
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Ongoing => write!(f, "In progress"),
            Outcome::HumanWin => write!(f, "You Win!"),
            Outcome::ComputerWin => write!(f, "Computer Wins!"),
            Outcome::Draw => write!(f, "It's a Tie!"),
        }
    }
}

/// Computer strength, fixed for the lifetime of a match.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Difficulty {
    /// Mostly random play.
    Easy,
    /// Wins and blocks, sometimes random.
    Medium,
    /// Forks, fork denial and search; never random.
    Hard,
}

impl Difficulty {
    /// Returns the display label.
    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    /// Short description shown under the menu entry.
    pub fn blurb(self) -> &'static str {
        match self {
            Difficulty::Easy => "AI makes mistakes often",
            Difficulty::Medium => "AI plays smart strategy",
            Difficulty::Hard => "Perfect AI - Advanced tactics",
        }
    }

    /// Whether fork creation and denial are part of the cascade.
    pub fn uses_forks(self) -> bool {
        self == Difficulty::Hard
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Top-level match lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchPhase {
    /// Choosing a difficulty.
    Menu,
    /// Moves are being played.
    InProgress,
    /// The match is decided.
    Over,
}

impl std::fmt::Display for MatchPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchPhase::Menu => write!(f, "menu"),
            MatchPhase::InProgress => write!(f, "in progress"),
            MatchPhase::Over => write!(f, "over"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_rejects_occupied() {
        let mut board = Board::new();
        assert!(board.place(Position::Center, Player::Human).is_ok());
        assert_eq!(
            board.place(Position::Center, Player::Computer),
            Err(IllegalMove::CellOccupied(Position::Center))
        );
        assert_eq!(board.get(Position::Center), Square::Occupied(Player::Human));
    }

    #[test]
    fn test_with_mark_leaves_original() {
        let board = Board::new();
        let next = board.with_mark(Position::TopLeft, Player::Computer);
        assert!(board.is_empty(Position::TopLeft));
        assert_eq!(next.count(Player::Computer), 1);
    }

    #[test]
    fn test_empty_cells_row_major() {
        let board: Board = "X.O/.X./O..".parse().unwrap();
        assert_eq!(
            board.empty_cells(),
            vec![
                Position::TopCenter,
                Position::MiddleLeft,
                Position::MiddleRight,
                Position::BottomCenter,
                Position::BottomRight,
            ]
        );
    }

    #[test]
    fn test_parse_rejects_short_board() {
        let err = "XO.".parse::<Board>().unwrap_err();
        assert!(err.to_string().contains("expected 9 cells"));
    }

    #[test]
    fn test_display_shows_keys_and_marks() {
        let board: Board = "X.. .O. ...".parse().unwrap();
        assert_eq!(board.display(), "X|2|3\n-+-+-\n4|O|6\n-+-+-\n7|8|9");
    }

    #[test]
    fn test_difficulty_parses_case_insensitive() {
        assert_eq!("HARD".parse::<Difficulty>().unwrap(), Difficulty::Hard);
        assert_eq!("easy".parse::<Difficulty>().unwrap(), Difficulty::Easy);
        assert!("impossible".parse::<Difficulty>().is_err());
    }
}
