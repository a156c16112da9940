//! Checkers board and its text encoding.
//!
//! A board is encoded as eight rows joined by `|`, row `y = 0` first. Each
//! row holds one character per file: `*` for an empty square, `b`/`B` for a
//! black man/king and `r`/`R` for a red man/king. The side to move is a
//! single character: `r`, `b`, or `*` for nobody.

use super::types::{BOARD_DIM, Color, Piece, Player, Pos, Rank};
use std::str::FromStr;
use tracing::instrument;

/// Separator between encoded rows.
pub const ROW_SEP: char = '|';

const EMPTY: char = '*';
const DIM: usize = BOARD_DIM as usize;

/// Rows of the starting position each side fills.
const START_ROWS: i32 = 3;

/// Error decoding a stored board or turn.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum CodecError {
    /// Wrong number of rows.
    #[display("Malformed board: expected 8 rows, found {}", _0)]
    RowCount(usize),

    /// A row with the wrong number of squares.
    #[display("Malformed board: row {} has {} squares, expected 8", row, len)]
    RowLength {
        /// Offending row.
        row: usize,
        /// Squares found.
        len: usize,
    },

    /// A character outside the board alphabet.
    #[display("Malformed board: unknown square {:?} at {}", ch, pos)]
    Character {
        /// The character found.
        ch: char,
        /// Where it was found.
        pos: Pos,
    },

    /// An unknown turn marker.
    #[display("Malformed turn: {:?}", _0)]
    Turn(String),
}

impl std::error::Error for CodecError {}

/// 8x8 checkers board.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    /// Squares indexed `[y][x]`.
    squares: [[Option<Piece>; DIM]; DIM],
}

impl Board {
    /// Creates a board with no pieces.
    pub fn empty() -> Self {
        Self {
            squares: [[None; DIM]; DIM],
        }
    }

    /// Creates the standard starting position: black men on the three
    /// lowest rows, red men on the three highest, dark squares only.
    #[instrument]
    pub fn standard() -> Self {
        let mut board = Self::empty();
        for y in 0..BOARD_DIM {
            for x in 0..BOARD_DIM {
                let pos = Pos::new(x, y);
                if !pos.is_playable() {
                    continue;
                }
                if y < START_ROWS {
                    board.set(pos, Some(Piece::man(Color::Black)));
                } else if y >= BOARD_DIM - START_ROWS {
                    board.set(pos, Some(Piece::man(Color::Red)));
                }
            }
        }
        board
    }

    /// Gets the piece at `pos`. Squares off the board read as empty.
    pub fn get(&self, pos: Pos) -> Option<Piece> {
        if !pos.in_bounds() {
            return None;
        }
        self.squares[pos.y as usize][pos.x as usize]
    }

    /// Sets the square at `pos`. Positions off the board are ignored.
    pub fn set(&mut self, pos: Pos, piece: Option<Piece>) {
        if pos.in_bounds() {
            self.squares[pos.y as usize][pos.x as usize] = piece;
        }
    }

    /// Removes and returns the piece at `pos`.
    pub fn take(&mut self, pos: Pos) -> Option<Piece> {
        let piece = self.get(pos);
        self.set(pos, None);
        piece
    }

    /// Returns true if `pos` holds a piece.
    pub fn is_occupied(&self, pos: Pos) -> bool {
        self.get(pos).is_some()
    }

    /// Iterates over every piece with its square, row by row.
    pub fn pieces(&self) -> impl Iterator<Item = (Pos, Piece)> + '_ {
        self.squares.iter().enumerate().flat_map(|(y, row)| {
            row.iter().enumerate().filter_map(move |(x, square)| {
                square.map(|piece| (Pos::new(x as i32, y as i32), piece))
            })
        })
    }

    /// Counts the pieces of one colour.
    pub fn count(&self, color: Color) -> usize {
        self.pieces().filter(|(_, piece)| piece.color == color).count()
    }

    /// Encodes the board.
    pub fn serialize(&self) -> String {
        let mut encoded = String::with_capacity(DIM * (DIM + 1));
        for (y, row) in self.squares.iter().enumerate() {
            if y > 0 {
                encoded.push(ROW_SEP);
            }
            encoded.extend(row.iter().map(|square| square_char(*square)));
        }
        encoded
    }

    /// Decodes a board.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError`] on a wrong row count, a wrong row length, or a
    /// character outside the board alphabet.
    #[instrument(skip(encoded))]
    pub fn parse(encoded: &str) -> Result<Self, CodecError> {
        let rows: Vec<&str> = encoded.split(ROW_SEP).collect();
        if rows.len() != DIM {
            return Err(CodecError::RowCount(rows.len()));
        }

        let mut board = Self::empty();
        for (y, row) in rows.iter().enumerate() {
            let len = row.chars().count();
            if len != DIM {
                return Err(CodecError::RowLength { row: y, len });
            }
            for (x, ch) in row.chars().enumerate() {
                let pos = Pos::new(x as i32, y as i32);
                let square = char_square(ch).ok_or(CodecError::Character { ch, pos })?;
                board.set(pos, square);
            }
        }
        Ok(board)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.serialize())
    }
}

impl FromStr for Board {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn square_char(square: Option<Piece>) -> char {
    match square {
        None => EMPTY,
        Some(Piece {
            color: Color::Black,
            rank: Rank::Man,
        }) => 'b',
        Some(Piece {
            color: Color::Black,
            rank: Rank::King,
        }) => 'B',
        Some(Piece {
            color: Color::Red,
            rank: Rank::Man,
        }) => 'r',
        Some(Piece {
            color: Color::Red,
            rank: Rank::King,
        }) => 'R',
    }
}

/// `None` for characters outside the alphabet, `Some(None)` for empty.
fn char_square(ch: char) -> Option<Option<Piece>> {
    match ch {
        EMPTY => Some(None),
        'b' => Some(Some(Piece::man(Color::Black))),
        'B' => Some(Some(Piece::king(Color::Black))),
        'r' => Some(Some(Piece::man(Color::Red))),
        'R' => Some(Some(Piece::king(Color::Red))),
        _ => None,
    }
}

/// Encodes the side to move.
pub fn turn_to_str(turn: Player) -> &'static str {
    match turn {
        Player::Red => "r",
        Player::Black => "b",
        Player::NoPlayer => "*",
    }
}

/// Decodes the side to move.
///
/// # Errors
///
/// Returns [`CodecError::Turn`] for anything but `r`, `b` or `*`.
pub fn turn_from_str(encoded: &str) -> Result<Player, CodecError> {
    match encoded {
        "r" => Ok(Player::Red),
        "b" => Ok(Player::Black),
        "*" => Ok(Player::NoPlayer),
        other => Err(CodecError::Turn(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const START: &str = "*b*b*b*b|b*b*b*b*|*b*b*b*b|********|********|r*r*r*r*|*r*r*r*r|r*r*r*r*";

    #[test]
    fn test_standard_board_encoding() {
        assert_eq!(Board::standard().serialize(), START);
    }

    #[test]
    fn test_standard_board_counts() {
        let board = Board::standard();
        assert_eq!(board.count(Color::Black), 12);
        assert_eq!(board.count(Color::Red), 12);
        assert!(board.pieces().all(|(pos, _)| pos.is_playable()));
    }

    #[test]
    fn test_kings_round_trip() {
        let mut board = Board::empty();
        board.set(Pos::new(1, 0), Some(Piece::king(Color::Red)));
        board.set(Pos::new(6, 7), Some(Piece::king(Color::Black)));
        board.set(Pos::new(3, 4), Some(Piece::man(Color::Black)));
        let encoded = board.serialize();
        assert_eq!(&encoded[..8], "*R******");
        assert_eq!(Board::parse(&encoded), Ok(board));
    }

    #[test]
    fn test_wrong_row_count() {
        assert_eq!(Board::parse("********"), Err(CodecError::RowCount(1)));
    }

    #[test]
    fn test_wrong_row_length() {
        let short = START.replacen("*b*b*b*b", "*b*b*b*", 1);
        assert_eq!(
            Board::parse(&short),
            Err(CodecError::RowLength { row: 0, len: 7 })
        );
    }

    #[test]
    fn test_unknown_character() {
        let bad = START.replacen("*b*b*b*b", "*b*x*b*b", 1);
        assert_eq!(
            Board::parse(&bad),
            Err(CodecError::Character {
                ch: 'x',
                pos: Pos::new(3, 0)
            })
        );
    }

    #[test]
    fn test_turn_codec() {
        for turn in [Player::Red, Player::Black, Player::NoPlayer] {
            assert_eq!(turn_from_str(turn_to_str(turn)), Ok(turn));
        }
        assert!(turn_from_str("x").is_err());
    }
}
