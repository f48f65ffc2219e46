// Test doubles for the widget and page. They live in the library so that front-end crates can
// use them in their own tests too.

use std::sync::mpsc;

use crate::board_view::{BoardConfig, BoardPosition, BoardState, BoardView};
use crate::client::ClientSession;
use crate::coord::Coord;
use crate::event::ClientEvent;
use crate::shape::DrawShape;
use crate::ui::{ConnectionStatus, GameResultText, GameUi, Roster};


#[derive(Clone, PartialEq, Debug)]
pub enum BoardCall {
    Configure,
    ApplyPosition(BoardPosition),
    ClearLastMoveHighlight,
    AnimateMove(Coord, Coord),
    SetDrawnShapes(Vec<DrawShape>),
}

// Board view that keeps a mirror of the state and remembers every call it received.
#[derive(Default)]
pub struct RecordingBoard {
    pub state: BoardState,
    pub calls: Vec<BoardCall>,
}

impl BoardView for RecordingBoard {
    fn configure(&mut self, config: &BoardConfig) {
        self.calls.push(BoardCall::Configure);
        self.state.configure(config);
    }
    fn apply_position(&mut self, position: &BoardPosition) {
        self.calls.push(BoardCall::ApplyPosition(position.clone()));
        self.state.apply_position(position);
    }
    fn clear_last_move_highlight(&mut self) {
        self.calls.push(BoardCall::ClearLastMoveHighlight);
        self.state.clear_last_move_highlight();
    }
    fn animate_move(&mut self, from: Coord, to: Coord) {
        self.calls.push(BoardCall::AnimateMove(from, to));
        self.state.animate_move(from, to);
    }
    fn set_drawn_shapes(&mut self, shapes: &[DrawShape]) {
        self.calls.push(BoardCall::SetDrawnShapes(shapes.to_vec()));
        self.state.set_drawn_shapes(shapes);
    }
}

// Page elements as a user would see them.
#[derive(Default, Debug)]
pub struct FakeUi {
    pub army_options: Vec<String>,
    pub name_us: String,
    pub name_them: String,
    pub result_text: String,
    pub result_visible: bool,
    pub connection_status: Option<ConnectionStatus>,
}

impl GameUi for FakeUi {
    fn set_army_options(&mut self, armies: &[String]) { self.army_options = armies.to_vec(); }
    fn set_roster(&mut self, roster: &Roster) {
        self.name_us = roster.us.clone();
        self.name_them = roster.them.clone();
    }
    fn set_result(&mut self, result: &GameResultText) {
        self.result_text = result.text().to_owned();
        self.result_visible = result.is_visible();
    }
    fn set_connection_status(&mut self, status: ConnectionStatus) {
        self.connection_status = Some(status);
    }
}

pub type TestSession = ClientSession<RecordingBoard, FakeUi>;

pub fn test_session() -> (TestSession, mpsc::Receiver<ClientEvent>) {
    let (events_tx, events_rx) = mpsc::channel();
    let session = ClientSession::new(RecordingBoard::default(), FakeUi::default(), events_tx);
    (session, events_rx)
}

pub fn drain_events(events_rx: &mpsc::Receiver<ClientEvent>) -> Vec<ClientEvent> {
    events_rx.try_iter().collect()
}
