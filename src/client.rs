use std::sync::mpsc;

use instant::Instant;
use log::{debug, info, warn};

use crate::board_view::{BoardConfig, BoardPosition, BoardView};
use crate::coord::Coord;
use crate::event::{ClientEvent, PositionUpdate, ServerEvent};
use crate::fen;
use crate::keepalive::{Keepalive, KeepaliveOutcome};
use crate::shape::DrawShape;
use crate::ui::{ConnectionStatus, GameResultText, GameUi, Roster};


#[derive(Clone, Debug)]
pub enum EventError {
    // Inbound text is not a valid envelope. The message is dropped; the session goes on.
    MalformedMessage(String),
}

#[derive(Debug)]
enum ConnectionState {
    Connecting,
    Open { keepalive: Keepalive },
    Disconnected,
}

impl ConnectionState {
    fn status(&self) -> ConnectionStatus {
        match self {
            ConnectionState::Connecting => ConnectionStatus::Connecting,
            ConnectionState::Open { .. } => ConnectionStatus::Open,
            ConnectionState::Disconnected => ConnectionStatus::Disconnected,
        }
    }
}

// One connection to the game server together with the board and the page elements it drives.
// Outgoing envelopes are pushed to `events_tx`; the transport owns the other end.
pub struct ClientSession<B: BoardView, U: GameUi> {
    board: B,
    ui: U,
    events_tx: mpsc::Sender<ClientEvent>,
    connection: ConnectionState,
}

impl<B: BoardView, U: GameUi> ClientSession<B, U> {
    pub fn new(mut board: B, mut ui: U, events_tx: mpsc::Sender<ClientEvent>) -> Self {
        board.configure(&BoardConfig::default());
        ui.set_connection_status(ConnectionStatus::Connecting);
        ClientSession {
            board,
            ui,
            events_tx,
            connection: ConnectionState::Connecting,
        }
    }

    pub fn board(&self) -> &B { &self.board }
    pub fn board_mut(&mut self) -> &mut B { &mut self.board }
    pub fn ui(&self) -> &U { &self.ui }
    pub fn connection_status(&self) -> ConnectionStatus { self.connection.status() }

    pub fn on_open(&mut self, now: Instant) {
        match self.connection {
            ConnectionState::Connecting => {}
            ConnectionState::Open { .. } => {
                warn!("Connection is already open");
                return;
            }
            ConnectionState::Disconnected => {
                warn!("Cannot reopen a closed session");
                return;
            }
        }
        info!("Connected");
        self.set_connection(ConnectionState::Open { keepalive: Keepalive::new(now) });
        self.send(ClientEvent::UpdatePosition);
    }

    pub fn on_close(&mut self) {
        if !matches!(self.connection, ConnectionState::Disconnected) {
            warn!("Disconnected from server");
            self.set_connection(ConnectionState::Disconnected);
        }
    }

    // Should be called periodically, at least once a second.
    pub fn refresh(&mut self, now: Instant) {
        if let ConnectionState::Open { ref mut keepalive } = self.connection {
            match keepalive.beat(now) {
                KeepaliveOutcome::AllGood => {}
                KeepaliveOutcome::SendBeat => self.send(ClientEvent::Hi),
            }
        }
    }

    pub fn process_server_message(&mut self, text: &str) -> Result<(), EventError> {
        let event = serde_json::from_str(text).map_err(|err| {
            EventError::MalformedMessage(format!("{} in message {:?}", err, text))
        })?;
        self.process_server_event(event);
        Ok(())
    }

    pub fn process_server_event(&mut self, event: ServerEvent) {
        match event {
            ServerEvent::Move { orig, dest, position } => {
                self.board.animate_move(orig, dest);
                if let Some(position) = position {
                    self.apply_position(position);
                }
            }
            ServerEvent::Armies { armies } => {
                self.ui.set_army_options(&armies);
            }
            ServerEvent::Position(position) => {
                self.apply_position(position);
            }
            ServerEvent::Draw { shapes } => {
                self.board.set_drawn_shapes(&shapes);
            }
            ServerEvent::NewGame => {
                self.board.clear_last_move_highlight();
            }
            ServerEvent::Unknown => {
                debug!("Ignoring message of unknown type");
            }
        }
    }

    // Local user completed a move on the board.
    pub fn user_move(&mut self, orig: Coord, dest: Coord) {
        self.send(ClientEvent::Move { orig, dest });
    }

    // Local user changed the drawing. The server echoes it back to all clients.
    pub fn user_draw(&mut self, shapes: Vec<DrawShape>) { self.send(ClientEvent::Draw { shapes }); }

    pub fn new_game(&mut self) {
        self.send(ClientEvent::NewGame);
        self.board.clear_last_move_highlight();
    }

    pub fn select_army(&mut self, army: String) { self.send(ClientEvent::SelectArmy { army }); }

    pub fn undo(&mut self, n: u32) { self.send(ClientEvent::Undo { n }); }

    fn apply_position(&mut self, position: PositionUpdate) {
        let PositionUpdate {
            fen,
            check,
            dests,
            your_color,
            clear_last,
            result,
            names,
        } = position;
        let turn_color = fen::turn_color(&fen);
        self.board.apply_position(&BoardPosition {
            orientation: your_color,
            fen,
            check,
            dests,
            turn_color,
        });
        // Must go after the position: applying a position may move the highlight.
        if clear_last {
            self.board.clear_last_move_highlight();
        }
        self.ui.set_result(&GameResultText::new(result));
        self.ui.set_roster(&Roster::for_viewer(your_color, &names));
    }

    fn set_connection(&mut self, connection: ConnectionState) {
        self.connection = connection;
        self.ui.set_connection_status(self.connection.status());
    }

    fn send(&mut self, event: ClientEvent) {
        if !matches!(self.connection, ConnectionState::Open { .. }) {
            warn!("Not connected, dropping {:?}", event);
            return;
        }
        if self.events_tx.send(event).is_err() {
            warn!("Transport is gone");
            self.set_connection(ConnectionState::Disconnected);
        }
    }
}
