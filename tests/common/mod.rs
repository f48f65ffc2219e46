// Rust-upgrade (https://github.com/rust-lang/rust/issues/46379):
//   remove `#[allow(dead_code)]` before public functions.

use fairy_board::test_util::{TestSession, drain_events, test_session};
use fairy_board::{ClientEvent, Coord};
use instant::Instant;
use serde_json::{Value, json};


pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
pub const AFTER_E4_FEN: &str = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1";

// Session that is connected and has already consumed the initial `update_position`.
#[allow(dead_code)]
pub fn open_session() -> (TestSession, std::sync::mpsc::Receiver<ClientEvent>, Instant) {
    let (mut session, events_rx) = test_session();
    let now = Instant::now();
    session.on_open(now);
    assert_eq!(drain_events(&events_rx), vec![ClientEvent::UpdatePosition]);
    (session, events_rx, now)
}

#[allow(dead_code)]
pub fn position_message(fen: &str, your_color: &str, result: &str) -> Value {
    json!({
        "msg_type": "position",
        "fen": fen,
        "check": false,
        "dests": {},
        "yourColor": your_color,
        "result": result,
        "names": { "white": "A", "black": "B" },
    })
}

#[allow(dead_code)]
pub fn send_json(session: &mut TestSession, value: Value) {
    session.process_server_message(&value.to_string()).unwrap();
}

#[allow(dead_code)]
pub fn outgoing_move(orig: Coord, dest: Coord) -> ClientEvent { ClientEvent::Move { orig, dest } }
