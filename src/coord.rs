use std::fmt;

use itertools::Itertools;
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};


pub const NUM_ROWS: u8 = 8;
pub const NUM_COLS: u8 = 8;


#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Row {
    idx: u8, // 0-based
}

impl Row {
    pub const fn from_zero_based(idx: u8) -> Self {
        assert!(idx < NUM_ROWS);
        Self { idx }
    }
    pub fn from_algebraic(ch: char) -> Option<Self> {
        let idx = (ch as u32).checked_sub('1' as u32)?;
        (idx < NUM_ROWS as u32).then(|| Self { idx: idx as u8 })
    }
    pub const fn to_zero_based(self) -> u8 { self.idx }
    pub const fn to_algebraic(self) -> char { (self.idx + b'1') as char }
    pub fn all() -> impl DoubleEndedIterator<Item = Self> + Clone {
        (0..NUM_ROWS).map(Self::from_zero_based)
    }
}


#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Col {
    idx: u8, // 0-based
}

impl Col {
    pub const fn from_zero_based(idx: u8) -> Self {
        assert!(idx < NUM_COLS);
        Self { idx }
    }
    pub fn from_algebraic(ch: char) -> Option<Self> {
        let idx = (ch as u32).checked_sub('a' as u32)?;
        (idx < NUM_COLS as u32).then(|| Self { idx: idx as u8 })
    }
    pub const fn to_zero_based(self) -> u8 { self.idx }
    pub const fn to_algebraic(self) -> char { (self.idx + b'a') as char }
    pub fn all() -> impl DoubleEndedIterator<Item = Self> + Clone {
        (0..NUM_COLS).map(Self::from_zero_based)
    }
}


// Square identifier as understood by the board widget: "a1" .. "h8".
// Ordered by column first so that maps keyed by `Coord` print in the widget's order.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Coord {
    pub col: Col,
    pub row: Row,
}

impl Coord {
    pub const fn new(row: Row, col: Col) -> Self { Self { row, col } }
    pub fn from_algebraic(s: &str) -> Option<Self> {
        let (col, row) = s.chars().collect_tuple()?;
        Some(Coord {
            row: Row::from_algebraic(row)?,
            col: Col::from_algebraic(col)?,
        })
    }
    pub fn to_algebraic(self) -> String {
        format!("{}{}", self.col.to_algebraic(), self.row.to_algebraic())
    }
}

impl fmt::Debug for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Coord({}{})", self.col.to_algebraic(), self.row.to_algebraic())
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.col.to_algebraic(), self.row.to_algebraic())
    }
}

impl Serialize for Coord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_algebraic())
    }
}

impl<'de> Deserialize<'de> for Coord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Coord::from_algebraic(&s)
            .ok_or_else(|| de::Error::custom(format!("invalid square: \"{}\"", s)))
    }
}


macro_rules! coord_consts {
    ($($name:ident = $col:literal $row:literal),* $(,)?) => {
        impl Coord {
            $(
                pub const $name: Coord = Coord::new(
                    Row::from_zero_based($row - 1),
                    Col::from_zero_based($col as u8 - b'a'),
                );
            )*
        }
    };
}

// Squares used by hand-written positions, mostly in tests.
coord_consts! {
    A1 = 'a' 1, A2 = 'a' 2, A7 = 'a' 7, A8 = 'a' 8,
    B1 = 'b' 1, B8 = 'b' 8,
    C3 = 'c' 3, C6 = 'c' 6,
    D2 = 'd' 2, D4 = 'd' 4, D5 = 'd' 5, D7 = 'd' 7,
    E1 = 'e' 1, E2 = 'e' 2, E3 = 'e' 3, E4 = 'e' 4, E5 = 'e' 5, E7 = 'e' 7, E8 = 'e' 8,
    F3 = 'f' 3, F6 = 'f' 6,
    G1 = 'g' 1, G8 = 'g' 8,
    H1 = 'h' 1, H8 = 'h' 8,
}
