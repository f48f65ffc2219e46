#![cfg_attr(feature = "strict", deny(warnings))]

pub mod chessground;
pub mod dom_ui;
pub mod web_document;
pub mod web_element_ext;
pub mod web_error_handling;

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::mpsc;

use fairy_board::client::ClientSession;
use fairy_board::coord::Coord;
use fairy_board::event::ClientEvent;
use gloo_timers::callback::Interval;
use instant::Instant;
use log::{error, warn};
use wasm_bindgen::prelude::*;

use crate::chessground::{ChessgroundView, parse_drawn_shapes};
use crate::dom_ui::DomUi;
use crate::web_document::{web_document, web_window};
use crate::web_error_handling::{JsResult, set_panic_hook};


const WEBSOCKET_PATH: &str = "/websocket";
// `ClientSession::refresh` wants to be called at least once a second.
const REFRESH_INTERVAL_MS: u32 = 1000;

type Session = ClientSession<ChessgroundView, DomUi>;

#[wasm_bindgen(start)]
pub fn init_page() {
    set_panic_hook();
    wasm_logger::init(wasm_logger::Config::new(log::Level::Info));
}

// State shared by the socket callbacks, the board hooks and the refresh timer.
struct Connection {
    session: RefCell<Session>,
    server_rx: mpsc::Receiver<ClientEvent>,
    socket: web_sys::WebSocket,
    refresh_timer: RefCell<Option<Interval>>,
}

impl Connection {
    // Runs `f` and ships everything the session wanted to send.
    fn with_session(&self, f: impl FnOnce(&mut Session)) {
        let Ok(mut session) = self.session.try_borrow_mut() else {
            error!("Session callback re-entered");
            return;
        };
        f(&mut session);
        drop(session);
        self.flush();
    }

    fn flush(&self) {
        while let Ok(event) = self.server_rx.try_recv() {
            let text = match serde_json::to_string(&event) {
                Ok(text) => text,
                Err(err) => {
                    error!("Cannot serialize {:?}: {}", event, err);
                    continue;
                }
            };
            if let Err(err) = self.socket.send_with_str(&text) {
                warn!("Cannot send {}: {:?}", text, err);
            }
        }
    }

    fn start_refresh_timer(self: &Rc<Self>) {
        let weak = Rc::downgrade(self);
        let timer = Interval::new(REFRESH_INTERVAL_MS, move || {
            if let Some(connection) = weak.upgrade() {
                connection.with_session(|session| session.refresh(Instant::now()));
            }
        });
        *self.refresh_timer.borrow_mut() = Some(timer);
    }

    fn stop_refresh_timer(&self) {
        // Dropping an `Interval` cancels it.
        self.refresh_timer.borrow_mut().take();
    }
}

struct Handlers {
    on_open: Closure<dyn FnMut()>,
    on_message: Closure<dyn FnMut(web_sys::MessageEvent)>,
    on_close: Closure<dyn FnMut(web_sys::CloseEvent)>,
    on_error: Closure<dyn FnMut(web_sys::Event)>,
    after_move: Closure<dyn FnMut(String, String)>,
    on_draw: Closure<dyn FnMut(JsValue)>,
}

impl Handlers {
    fn new(connection: &Rc<Connection>) -> Self {
        let on_open = {
            let weak = Rc::downgrade(connection);
            Closure::<dyn FnMut()>::new(move || {
                if let Some(connection) = weak.upgrade() {
                    connection.with_session(|session| session.on_open(Instant::now()));
                    connection.start_refresh_timer();
                }
            })
        };
        let on_message = {
            let weak = Rc::downgrade(connection);
            Closure::<dyn FnMut(web_sys::MessageEvent)>::new(move |event: web_sys::MessageEvent| {
                let Some(connection) = weak.upgrade() else {
                    return;
                };
                let Some(text) = event.data().as_string() else {
                    warn!("Ignoring non-text message");
                    return;
                };
                connection.with_session(|session| {
                    if let Err(err) = session.process_server_message(&text) {
                        warn!("{:?}", err);
                    }
                });
            })
        };
        let on_close = {
            let weak = Rc::downgrade(connection);
            Closure::<dyn FnMut(web_sys::CloseEvent)>::new(move |event: web_sys::CloseEvent| {
                warn!("Socket closed: code {}, reason {:?}", event.code(), event.reason());
                if let Some(connection) = weak.upgrade() {
                    connection.stop_refresh_timer();
                    connection.with_session(|session| session.on_close());
                }
            })
        };
        let on_error = Closure::<dyn FnMut(web_sys::Event)>::new(|event: web_sys::Event| {
            // A `close` event always follows.
            warn!("Socket error: {:?}", event.type_());
        });
        let after_move = {
            let weak = Rc::downgrade(connection);
            Closure::<dyn FnMut(String, String)>::new(move |orig: String, dest: String| {
                let Some(connection) = weak.upgrade() else {
                    return;
                };
                match (Coord::from_algebraic(&orig), Coord::from_algebraic(&dest)) {
                    (Some(orig), Some(dest)) => {
                        connection.with_session(|session| session.user_move(orig, dest));
                    }
                    _ => error!("Board reported an invalid move {} -> {}", orig, dest),
                }
            })
        };
        let on_draw = {
            let weak = Rc::downgrade(connection);
            Closure::<dyn FnMut(JsValue)>::new(move |shapes: JsValue| {
                let Some(connection) = weak.upgrade() else {
                    return;
                };
                match parse_drawn_shapes(shapes) {
                    Ok(shapes) => connection.with_session(|session| session.user_draw(shapes)),
                    Err(err) => error!("Board reported invalid shapes: {}", err),
                }
            })
        };
        Handlers {
            on_open,
            on_message,
            on_close,
            on_error,
            after_move,
            on_draw,
        }
    }
}

// One board on the page connected to the game server. Dropping the client closes the socket and
// cancels every callback it installed.
#[wasm_bindgen]
pub struct WebClient {
    connection: Rc<Connection>,
    // Must outlive every JS reference to the closures; see `Drop`.
    _handlers: Handlers,
}

#[wasm_bindgen]
impl WebClient {
    pub fn connect(board_element_id: &str) -> JsResult<WebClient> {
        let document = web_document()?;
        let board = ChessgroundView::new(&document.get_existing_element_by_id(board_element_id)?);
        let ui = DomUi::new(document)?;
        let url = format!("ws://{}{}", web_window()?.location().hostname()?, WEBSOCKET_PATH);
        let socket = web_sys::WebSocket::new(&url)?;
        let (server_tx, server_rx) = mpsc::channel();
        let connection = Rc::new(Connection {
            session: RefCell::new(ClientSession::new(board, ui, server_tx)),
            server_rx,
            socket,
            refresh_timer: RefCell::new(None),
        });
        let handlers = Handlers::new(&connection);
        let socket = &connection.socket;
        socket.set_onopen(Some(handlers.on_open.as_ref().unchecked_ref()));
        socket.set_onmessage(Some(handlers.on_message.as_ref().unchecked_ref()));
        socket.set_onclose(Some(handlers.on_close.as_ref().unchecked_ref()));
        socket.set_onerror(Some(handlers.on_error.as_ref().unchecked_ref()));
        connection
            .session
            .borrow()
            .board()
            .install_hooks(&handlers.after_move, &handlers.on_draw)?;
        Ok(WebClient { connection, _handlers: handlers })
    }

    pub fn new_game(&self) { self.connection.with_session(|session| session.new_game()); }

    // Sends the army currently picked in the army selector.
    pub fn select_army(&self) {
        self.connection.with_session(|session| match session.ui().selected_army() {
            Some(army) => session.select_army(army),
            None => warn!("No army selected"),
        });
    }

    pub fn undo(&self, n: u32) { self.connection.with_session(|session| session.undo(n)); }

    // One of "connecting", "open", "disconnected".
    pub fn connection_status(&self) -> String {
        self.connection.session.borrow().connection_status().as_str().to_owned()
    }
}

impl Drop for WebClient {
    fn drop(&mut self) {
        let socket = &self.connection.socket;
        socket.set_onopen(None);
        socket.set_onmessage(None);
        socket.set_onclose(None);
        socket.set_onerror(None);
        if let Err(err) = socket.close() {
            warn!("Cannot close socket: {:?}", err);
        }
        self.connection.stop_refresh_timer();
        if let Ok(session) = self.connection.session.try_borrow() {
            if let Err(err) = session.board().remove_hooks() {
                warn!("Cannot remove board hooks: {:?}", err);
            }
        }
    }
}
