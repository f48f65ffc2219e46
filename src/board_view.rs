// The board widget is an opaque component. `BoardView` is the subset of its capabilities the
// session relies on; `BoardState` is a plain in-memory implementation of the same capabilities.

use serde::Serialize;

use crate::coord::Coord;
use crate::event::LegalDests;
use crate::fen::{self, PLACEHOLDER_FEN, Placement};
use crate::force::Force;
use crate::shape::DrawShape;


// Which side's pieces the local user may drag.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MovableColor {
    White,
    Black,
    Both,
}

// Initial widget configuration, applied once before the connection is up.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct BoardConfig {
    pub fen: String,
    pub movable_color: MovableColor,
    // Moves are only accepted towards destinations from the legal destination map.
    pub free_moves: bool,
    pub premoves: bool,
    pub coordinates: bool,
    pub auto_castle: bool,
    pub highlight_check: bool,
    pub highlight_last_move: bool,
    pub show_ghost: bool,
    pub snap_drawing_to_valid_move: bool,
}

impl Default for BoardConfig {
    fn default() -> Self {
        BoardConfig {
            fen: PLACEHOLDER_FEN.to_owned(),
            movable_color: MovableColor::Both,
            free_moves: false,
            premoves: false,
            coordinates: false,
            auto_castle: false,
            highlight_check: true,
            highlight_last_move: true,
            show_ghost: true,
            snap_drawing_to_valid_move: false,
        }
    }
}

// Everything a full state sync changes on the board.
#[derive(Clone, PartialEq, Debug)]
pub struct BoardPosition {
    pub orientation: Force,
    pub fen: String,
    pub check: bool,
    pub dests: LegalDests,
    pub turn_color: Force,
}

pub trait BoardView {
    fn configure(&mut self, config: &BoardConfig);
    fn apply_position(&mut self, position: &BoardPosition);
    fn clear_last_move_highlight(&mut self);
    // Purely visual: the authoritative position arrives separately.
    fn animate_move(&mut self, from: Coord, to: Coord);
    fn set_drawn_shapes(&mut self, shapes: &[DrawShape]);
}


// View copy of the server state. Never computes anything the server hasn't declared.
#[derive(Clone, Debug)]
pub struct BoardState {
    config: BoardConfig,
    orientation: Force,
    fen: String,
    placement: Placement,
    check: bool,
    dests: LegalDests,
    turn_color: Force,
    last_move: Option<(Coord, Coord)>,
    shapes: Vec<DrawShape>,
}

impl BoardState {
    pub fn new() -> Self {
        BoardState {
            config: BoardConfig::default(),
            orientation: Force::White,
            fen: PLACEHOLDER_FEN.to_owned(),
            placement: Placement::empty(),
            check: false,
            dests: LegalDests::new(),
            turn_color: Force::White,
            last_move: None,
            shapes: vec![],
        }
    }

    pub fn config(&self) -> &BoardConfig { &self.config }
    pub fn orientation(&self) -> Force { self.orientation }
    pub fn fen(&self) -> &str { &self.fen }
    pub fn placement(&self) -> &Placement { &self.placement }
    pub fn check(&self) -> bool { self.check }
    pub fn dests(&self) -> &LegalDests { &self.dests }
    pub fn turn_color(&self) -> Force { self.turn_color }
    pub fn last_move(&self) -> Option<(Coord, Coord)> { self.last_move }
    pub fn shapes(&self) -> &[DrawShape] { &self.shapes }

    // Same check the widget applies to a drag & drop before reporting a move.
    pub fn is_move_allowed(&self, from: Coord, to: Coord) -> bool {
        if self.config.free_moves {
            return true;
        }
        self.dests.get(&from).is_some_and(|dests| dests.contains(&to))
    }

    fn set_fen(&mut self, fen: &str) {
        self.fen = fen.to_owned();
        self.placement = fen::parse_placement(fen).unwrap_or_else(|err| {
            log::warn!("Cannot display position \"{}\": {}", fen, err);
            Placement::empty()
        });
    }
}

impl Default for BoardState {
    fn default() -> Self { Self::new() }
}

impl BoardView for BoardState {
    fn configure(&mut self, config: &BoardConfig) {
        self.config = config.clone();
        self.set_fen(&config.fen);
    }

    fn apply_position(&mut self, position: &BoardPosition) {
        self.orientation = position.orientation;
        self.set_fen(&position.fen);
        self.check = position.check && self.config.highlight_check;
        self.dests = position.dests.clone();
        self.turn_color = position.turn_color;
    }

    fn clear_last_move_highlight(&mut self) { self.last_move = None; }

    fn animate_move(&mut self, from: Coord, to: Coord) {
        self.placement.relocate(from, to);
        if self.config.highlight_last_move {
            self.last_move = Some((from, to));
        }
    }

    fn set_drawn_shapes(&mut self, shapes: &[DrawShape]) { self.shapes = shapes.to_vec(); }
}
