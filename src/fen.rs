// Read-only helpers for the position encoding sent by the server. The server is the only party
// that produces FEN; here we only extract what the view needs to display it.

use std::{fmt, ops};

use crate::coord::{Col, Coord, NUM_COLS, NUM_ROWS, Row};
use crate::force::Force;


// Position used before the server sent anything.
pub const PLACEHOLDER_FEN: &str = "8/8/8/8/8/8/8/8 w KQkq - 0 1";

const WHITE_TO_MOVE: &str = "w";

// Side to move according to the FEN active colour field. Anything but the white-to-move token
// (including a missing field) means black.
pub fn turn_color(fen: &str) -> Force {
    match fen.split_whitespace().nth(1) {
        Some(WHITE_TO_MOVE) => Force::White,
        _ => Force::Black,
    }
}


// Piece letters by square. Letters are kept as sent: fairy armies reuse the classic letters, so
// the view doesn't need to know what a piece does.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Placement {
    squares: [[Option<char>; NUM_COLS as usize]; NUM_ROWS as usize],
}

impl Placement {
    pub fn empty() -> Self { Placement { squares: [[None; NUM_COLS as usize]; NUM_ROWS as usize] } }

    pub fn relocate(&mut self, from: Coord, to: Coord) {
        if let Some(piece) = self[from].take() {
            self[to] = Some(piece);
        }
    }
}

impl ops::Index<Coord> for Placement {
    type Output = Option<char>;
    fn index(&self, coord: Coord) -> &Self::Output {
        &self.squares[coord.row.to_zero_based() as usize][coord.col.to_zero_based() as usize]
    }
}

impl ops::IndexMut<Coord> for Placement {
    fn index_mut(&mut self, coord: Coord) -> &mut Self::Output {
        &mut self.squares[coord.row.to_zero_based() as usize][coord.col.to_zero_based() as usize]
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum FenError {
    Empty,
    RowCount(usize),
    RowLength(String),
    UnexpectedChar(char),
}

impl fmt::Display for FenError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FenError::Empty => write!(f, "empty FEN"),
            FenError::RowCount(n) => write!(f, "expected {} rows, found {}", NUM_ROWS, n),
            FenError::RowLength(row) => write!(f, "row \"{}\" must have {} columns", row, NUM_COLS),
            FenError::UnexpectedChar(ch) => write!(f, "unexpected character '{}'", ch),
        }
    }
}

pub fn parse_placement(fen: &str) -> Result<Placement, FenError> {
    let board = fen.split_whitespace().next().ok_or(FenError::Empty)?;
    let rows: Vec<_> = board.split('/').collect();
    if rows.len() != NUM_ROWS as usize {
        return Err(FenError::RowCount(rows.len()));
    }
    let mut placement = Placement::empty();
    for (row_text, row) in rows.into_iter().zip(Row::all().rev()) {
        let too_long = || FenError::RowLength(row_text.to_owned());
        let mut col_idx: u8 = 0;
        for ch in row_text.chars() {
            if let Some(gap) = ch.to_digit(10) {
                col_idx += gap as u8;
                if col_idx > NUM_COLS {
                    return Err(too_long());
                }
            } else if ch.is_ascii_alphabetic() {
                if col_idx >= NUM_COLS {
                    return Err(too_long());
                }
                placement[Coord::new(row, Col::from_zero_based(col_idx))] = Some(ch);
                col_idx += 1;
            } else {
                return Err(FenError::UnexpectedChar(ch));
            }
        }
        if col_idx != NUM_COLS {
            return Err(too_long());
        }
    }
    Ok(placement)
}

#[cfg(test)]
mod tests {
    use super::*;

    const START: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    #[test]
    fn turn_color_from_active_field() {
        assert_eq!(turn_color(START), Force::White);
        assert_eq!(
            turn_color("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1"),
            Force::Black
        );
        // Castling rights may be empty, which leaves a double space behind.
        assert_eq!(turn_color("4k3/8/8/8/8/8/8/4K3 w  - 0 1"), Force::White);
        assert_eq!(turn_color("4k3/8/8/8/8/8/8/4K3"), Force::Black);
    }

    #[test]
    fn placement_start() {
        let placement = parse_placement(START).unwrap();
        assert_eq!(placement[Coord::E1], Some('K'));
        assert_eq!(placement[Coord::E8], Some('k'));
        assert_eq!(placement[Coord::D2], Some('P'));
        assert_eq!(placement[Coord::E4], None);
        assert_eq!(placement[Coord::A8], Some('r'));
        assert_eq!(placement[Coord::H1], Some('R'));
    }

    #[test]
    fn placement_placeholder_is_empty() {
        assert_eq!(parse_placement(PLACEHOLDER_FEN).unwrap(), Placement::empty());
    }

    #[test]
    fn placement_relocate() {
        let mut placement = parse_placement(START).unwrap();
        placement.relocate(Coord::E2, Coord::E4);
        assert_eq!(placement[Coord::E2], None);
        assert_eq!(placement[Coord::E4], Some('P'));
    }

    #[test]
    fn placement_malformed() {
        assert_eq!(parse_placement(""), Err(FenError::Empty));
        assert_eq!(parse_placement("8/8/8/8/8/8/8 w - - 0 1"), Err(FenError::RowCount(7)));
        assert!(parse_placement("9/8/8/8/8/8/8/8 w - - 0 1").is_err());
        assert!(parse_placement("7/8/8/8/8/8/8/8 w - - 0 1").is_err());
        assert!(parse_placement("ppppppppp/8/8/8/8/8/8/8 w - - 0 1").is_err());
        assert_eq!(
            parse_placement("8/8/8/8/8/8/8/7* w - - 0 1"),
            Err(FenError::UnexpectedChar('*'))
        );
    }
}
