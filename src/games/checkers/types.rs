//! Core domain types for checkers.

use serde::{Deserialize, Serialize};

/// Side length of the board.
pub const BOARD_DIM: i32 = 8;

/// Colour of a piece.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Color {
    /// Red starts on the high rows and moves toward `y = 0`.
    Red,
    /// Black starts on the low rows, moves toward `y = 7`, and moves first.
    Black,
}

impl Color {
    /// Returns the opposing colour.
    pub fn opponent(self) -> Self {
        match self {
            Color::Red => Color::Black,
            Color::Black => Color::Red,
        }
    }

    /// Row delta of a forward step for men of this colour.
    pub fn forward(self) -> i32 {
        match self {
            Color::Red => -1,
            Color::Black => 1,
        }
    }

    /// Row on which men of this colour are crowned.
    pub fn crowning_row(self) -> i32 {
        match self {
            Color::Red => 0,
            Color::Black => BOARD_DIM - 1,
        }
    }
}

/// Rank of a piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rank {
    /// Moves and captures diagonally forward only.
    Man,
    /// Moves and captures diagonally in any direction.
    King,
}

/// A piece on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    /// Owner of the piece.
    pub color: Color,
    /// Man or king.
    pub rank: Rank,
}

impl Piece {
    /// Creates an uncrowned piece.
    pub fn man(color: Color) -> Self {
        Self {
            color,
            rank: Rank::Man,
        }
    }

    /// Creates a crowned piece.
    pub fn king(color: Color) -> Self {
        Self {
            color,
            rank: Rank::King,
        }
    }

    /// Returns true for kings.
    pub fn is_king(&self) -> bool {
        self.rank == Rank::King
    }

    /// Row deltas this piece may travel along.
    pub fn row_directions(&self) -> &'static [i32] {
        match (self.rank, self.color) {
            (Rank::King, _) => &[-1, 1],
            (Rank::Man, Color::Red) => &[-1],
            (Rank::Man, Color::Black) => &[1],
        }
    }
}

/// Side to move, or the winner of a game.
///
/// `NoPlayer` marks "nobody": no active turn owner, or no winner yet.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
pub enum Player {
    /// The red side.
    #[strum(serialize = "red")]
    Red,
    /// The black side.
    #[strum(serialize = "black")]
    Black,
    /// Nobody.
    #[strum(serialize = "NO_PLAYER")]
    NoPlayer,
}

impl Player {
    /// Returns the colour this player moves, if any.
    pub fn color(self) -> Option<Color> {
        match self {
            Player::Red => Some(Color::Red),
            Player::Black => Some(Color::Black),
            Player::NoPlayer => None,
        }
    }
}

impl From<Color> for Player {
    fn from(color: Color) -> Self {
        match color {
            Color::Red => Player::Red,
            Color::Black => Player::Black,
        }
    }
}

/// Zero-based board coordinate, `x` the file and `y` the row.
///
/// Coordinates are signed so that [`Pos::NONE`] can mark "no square".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Pos {
    /// File, 0..=7.
    pub x: i32,
    /// Row, 0..=7.
    pub y: i32,
}

impl Pos {
    /// Sentinel for "no square", used when a move captured nothing.
    pub const NONE: Pos = Pos { x: -1, y: -1 };

    /// Creates a coordinate.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns true if both coordinates are inside the board.
    pub fn in_bounds(&self) -> bool {
        (0..BOARD_DIM).contains(&self.x) && (0..BOARD_DIM).contains(&self.y)
    }

    /// Returns true for the dark squares pieces may stand on.
    pub fn is_playable(&self) -> bool {
        self.in_bounds() && (self.x + self.y) % 2 == 1
    }

    /// Returns this coordinate shifted by `(dx, dy)`.
    pub fn offset(&self, dx: i32, dy: i32) -> Pos {
        Pos::new(self.x + dx, self.y + dy)
    }

    /// Midpoint between two squares two diagonals apart.
    pub fn midpoint(&self, other: Pos) -> Pos {
        Pos::new((self.x + other.x) / 2, (self.y + other.y) / 2)
    }
}

impl std::fmt::Display for Pos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
