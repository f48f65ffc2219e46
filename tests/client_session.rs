mod common;

use std::time::Duration;

use common::*;
use fairy_board::board_view::MovableColor;
use fairy_board::fen::PLACEHOLDER_FEN;
use fairy_board::test_util::{BoardCall, drain_events, test_session};
use fairy_board::*;
use pretty_assertions::assert_eq;
use serde_json::json;


#[test]
fn board_configured_before_connection() {
    let (session, events_rx) = test_session();
    assert_eq!(session.board().calls, vec![BoardCall::Configure]);
    let config = session.board().state.config();
    assert_eq!(config.fen, PLACEHOLDER_FEN);
    assert_eq!(config.movable_color, MovableColor::Both);
    assert!(!config.premoves && !config.coordinates && !config.auto_castle);
    assert!(config.highlight_check && config.highlight_last_move && config.show_ghost);
    assert_eq!(session.connection_status(), ConnectionStatus::Connecting);
    assert_eq!(session.ui().connection_status, Some(ConnectionStatus::Connecting));
    assert!(drain_events(&events_rx).is_empty());
}

#[test]
fn open_requests_position() {
    let (session, _events_rx, _) = open_session();
    assert_eq!(session.connection_status(), ConnectionStatus::Open);
    assert_eq!(session.ui().connection_status, Some(ConnectionStatus::Open));
}

#[test]
fn start_position_example() {
    let (mut session, _events_rx, _) = open_session();
    send_json(&mut session, position_message(START_FEN, "white", ""));
    let board = &session.board().state;
    assert_eq!(board.fen(), START_FEN);
    assert_eq!(board.orientation(), Force::White);
    assert_eq!(board.turn_color(), Force::White);
    assert_eq!(board.placement()[Coord::E1], Some('K'));
    let ui = session.ui();
    assert!(!ui.result_visible);
    assert_eq!(ui.name_us, "A");
    assert_eq!(ui.name_them, "B");
}

#[test]
fn turn_color_follows_fen() {
    let (mut session, _events_rx, _) = open_session();
    send_json(&mut session, position_message(AFTER_E4_FEN, "white", ""));
    assert_eq!(session.board().state.turn_color(), Force::Black);
    send_json(&mut session, position_message(START_FEN, "black", ""));
    assert_eq!(session.board().state.turn_color(), Force::White);
}

#[test]
fn result_banner() {
    let (mut session, _events_rx, _) = open_session();
    send_json(&mut session, position_message(START_FEN, "white", "1-0"));
    assert!(session.ui().result_visible);
    assert_eq!(session.ui().result_text, "1-0");
    send_json(&mut session, position_message(START_FEN, "white", ""));
    assert!(!session.ui().result_visible);
    assert_eq!(session.ui().result_text, "");
}

#[test]
fn names_follow_viewer_color() {
    let (mut session, _events_rx, _) = open_session();
    send_json(&mut session, position_message(START_FEN, "black", ""));
    assert_eq!(session.ui().name_us, "B");
    assert_eq!(session.ui().name_them, "A");
    assert_eq!(session.board().state.orientation(), Force::Black);
}

#[test]
fn clear_last_applied_after_position() {
    let (mut session, _events_rx, _) = open_session();
    // `clearLast` placed before `fen` in the payload on purpose.
    send_json(&mut session, json!({
        "msg_type": "position",
        "clearLast": true,
        "fen": START_FEN,
        "check": false,
        "dests": {},
        "yourColor": "white",
        "result": "",
        "names": { "white": "A", "black": "B" },
    }));
    let calls = &session.board().calls;
    let n = calls.len();
    assert!(matches!(calls[n - 2], BoardCall::ApplyPosition(_)));
    assert_eq!(calls[n - 1], BoardCall::ClearLastMoveHighlight);
    assert_eq!(session.board().state.last_move(), None);
}

#[test]
fn move_animates_then_syncs() {
    let (mut session, _events_rx, _) = open_session();
    send_json(&mut session, position_message(START_FEN, "white", ""));
    let mut message = position_message(AFTER_E4_FEN, "white", "");
    message["msg_type"] = json!("move");
    message["orig"] = json!("e2");
    message["dest"] = json!("e4");
    send_json(&mut session, message);

    let calls = &session.board().calls;
    let n = calls.len();
    assert_eq!(calls[n - 2], BoardCall::AnimateMove(Coord::E2, Coord::E4));
    let BoardCall::ApplyPosition(ref position) = calls[n - 1] else {
        panic!("unexpected call: {:?}", calls[n - 1]);
    };
    assert_eq!(position.fen, AFTER_E4_FEN);
    assert_eq!(position.turn_color, Force::Black);
    assert_eq!(session.board().state.last_move(), Some((Coord::E2, Coord::E4)));
    assert_eq!(session.board().state.placement()[Coord::E4], Some('P'));
}

#[test]
fn move_with_broken_state_is_rejected() {
    let (mut session, _events_rx, _) = open_session();
    send_json(&mut session, position_message(START_FEN, "white", ""));
    let calls_before = session.board().calls.len();
    let mut message = position_message(AFTER_E4_FEN, "White", "1-0");
    message["msg_type"] = json!("move");
    message["orig"] = json!("e2");
    message["dest"] = json!("e4");
    assert!(matches!(
        session.process_server_message(&message.to_string()),
        Err(EventError::MalformedMessage(_))
    ));

    assert_eq!(session.board().calls.len(), calls_before);
    assert_eq!(session.board().state.last_move(), None);
    assert_eq!(session.board().state.placement()[Coord::E4], None);
    assert!(!session.ui().result_visible);
    assert_eq!(session.ui().result_text, "");
}

#[test]
fn legal_dests_forwarded() {
    let (mut session, _events_rx, _) = open_session();
    let mut message = position_message(START_FEN, "white", "");
    message["dests"] = json!({ "e2": ["e3", "e4"], "b1": ["a3", "c3"] });
    message["check"] = json!(true);
    send_json(&mut session, message);
    let board = &session.board().state;
    assert!(board.is_move_allowed(Coord::E2, Coord::E4));
    assert!(board.is_move_allowed(Coord::B1, Coord::C3));
    assert!(!board.is_move_allowed(Coord::E2, Coord::E5));
    assert!(board.check());
}

#[test]
fn armies_replace_options() {
    let (mut session, _events_rx, _) = open_session();
    send_json(&mut session, json!({ "msg_type": "armies", "armies": ["Old", "Older", "Oldest"] }));
    send_json(&mut session, json!({ "msg_type": "armies", "armies": ["Classic", "Fog"] }));
    assert_eq!(session.ui().army_options, vec!["Classic".to_owned(), "Fog".to_owned()]);
}

#[test]
fn draw_replaces_shapes() {
    let (mut session, _events_rx, _) = open_session();
    send_json(&mut session, json!({
        "msg_type": "draw",
        "shapes": [{ "orig": "e2", "dest": "e4", "brush": "green" }, { "orig": "d5", "brush": "red" }],
    }));
    assert_eq!(session.board().state.shapes().len(), 2);
    send_json(&mut session, json!({ "msg_type": "draw", "shapes": [] }));
    assert!(session.board().state.shapes().is_empty());
}

#[test]
fn new_game_from_server_clears_highlight() {
    let (mut session, _events_rx, _) = open_session();
    send_json(&mut session, json!({ "msg_type": "move", "orig": "e2", "dest": "e4" }));
    assert!(session.board().state.last_move().is_some());
    send_json(&mut session, json!({ "msg_type": "newgame" }));
    assert_eq!(session.board().state.last_move(), None);
}

#[test]
fn unknown_and_malformed_messages_are_isolated() {
    let (mut session, events_rx, _) = open_session();
    let calls_before = session.board().calls.len();
    send_json(&mut session, json!({ "msg_type": "chat", "text": "hello" }));
    assert!(matches!(
        session.process_server_message("{ not json"),
        Err(EventError::MalformedMessage(_))
    ));
    assert!(matches!(
        session.process_server_message(r#"{"msg_type": "position", "fen": 42}"#),
        Err(EventError::MalformedMessage(_))
    ));
    assert_eq!(session.board().calls.len(), calls_before);

    // Later messages are still processed.
    send_json(&mut session, position_message(START_FEN, "white", ""));
    assert_eq!(session.board().state.fen(), START_FEN);
    assert_eq!(session.connection_status(), ConnectionStatus::Open);
    assert!(drain_events(&events_rx).is_empty());
}

#[test]
fn user_move_sends_exactly_one_envelope() {
    let (mut session, events_rx, _) = open_session();
    session.user_move(Coord::E2, Coord::E4);
    assert_eq!(drain_events(&events_rx), vec![outgoing_move(Coord::E2, Coord::E4)]);
    session.user_move(Coord::G8, Coord::F6);
    session.user_move(Coord::D2, Coord::D4);
    assert_eq!(drain_events(&events_rx), vec![
        outgoing_move(Coord::G8, Coord::F6),
        outgoing_move(Coord::D2, Coord::D4),
    ]);
}

#[test]
fn user_actions() {
    let (mut session, events_rx, _) = open_session();
    let shapes = vec![DrawShape::arrow(Coord::E2, Coord::E4, "green")];
    session.user_draw(shapes.clone());
    session.select_army("Nutty Knights".to_owned());
    session.undo(2);
    session.new_game();
    assert_eq!(drain_events(&events_rx), vec![
        ClientEvent::Draw { shapes },
        ClientEvent::SelectArmy { army: "Nutty Knights".to_owned() },
        ClientEvent::Undo { n: 2 },
        ClientEvent::NewGame,
    ]);
    assert_eq!(session.board().calls.last(), Some(&BoardCall::ClearLastMoveHighlight));
}

#[test]
fn keepalive_every_five_seconds() {
    let (mut session, events_rx, t0) = open_session();
    for ms in (0..=4900).step_by(100) {
        session.refresh(t0 + Duration::from_millis(ms));
    }
    assert!(drain_events(&events_rx).is_empty());
    session.refresh(t0 + Duration::from_secs(5));
    assert_eq!(drain_events(&events_rx), vec![ClientEvent::Hi]);
    for ms in (5100..=15000).step_by(100) {
        session.refresh(t0 + Duration::from_millis(ms));
    }
    assert_eq!(drain_events(&events_rx), vec![ClientEvent::Hi, ClientEvent::Hi]);
}

#[test]
fn nothing_sent_before_open() {
    let (mut session, events_rx) = test_session();
    session.user_move(Coord::E2, Coord::E4);
    session.refresh(instant::Instant::now() + Duration::from_secs(60));
    assert!(drain_events(&events_rx).is_empty());
    // Inbound messages are still applied.
    send_json(&mut session, position_message(START_FEN, "white", ""));
    assert_eq!(session.board().state.fen(), START_FEN);
}

#[test]
fn close_stops_everything() {
    let (mut session, events_rx, t0) = open_session();
    session.on_close();
    assert_eq!(session.connection_status(), ConnectionStatus::Disconnected);
    assert_eq!(session.ui().connection_status, Some(ConnectionStatus::Disconnected));
    session.refresh(t0 + Duration::from_secs(30));
    session.user_move(Coord::E2, Coord::E4);
    session.new_game();
    assert!(drain_events(&events_rx).is_empty());

    // No reconnection.
    session.on_open(t0 + Duration::from_secs(31));
    assert_eq!(session.connection_status(), ConnectionStatus::Disconnected);
    assert!(drain_events(&events_rx).is_empty());
}

#[test]
fn transport_loss_is_surfaced() {
    let (mut session, events_rx, _) = open_session();
    drop(events_rx);
    session.user_move(Coord::E2, Coord::E4);
    assert_eq!(session.connection_status(), ConnectionStatus::Disconnected);
    assert_eq!(session.ui().connection_status, Some(ConnectionStatus::Disconnected));
}
