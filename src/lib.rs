#![forbid(unsafe_code)]
#![cfg_attr(feature = "strict", deny(warnings))]

pub mod board_view;
pub mod client;
pub mod coord;
pub mod event;
pub mod fen;
pub mod force;
pub mod keepalive;
pub mod shape;
pub mod test_util;
pub mod ui;

pub use board_view::{BoardConfig, BoardPosition, BoardState, BoardView, MovableColor};
pub use client::{ClientSession, EventError};
pub use coord::{Col, Coord, Row};
pub use event::{ClientEvent, LegalDests, PlayerNames, PositionUpdate, ServerEvent};
pub use fen::FenError;
pub use force::Force;
pub use shape::DrawShape;
pub use ui::{ConnectionStatus, GameResultText, GameUi, Roster};
