use std::fmt;
use std::io;
use std::net::TcpStream;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use anyhow::{Context, anyhow};
use crossterm::style::{self, Stylize};
use crossterm::{cursor, event as term_event, execute, terminal};
use fairy_board::board_view::BoardState;
use fairy_board::client::ClientSession;
use fairy_board::shape::{DrawShape, toggle_shape};
use instant::Instant;
use log::{info, warn};
use scopeguard::defer;
use tungstenite::protocol;
use url::Url;

use crate::command::{self, Command};
use crate::network::{self, CommunicationError};
use crate::tui::{self, TerminalUi};


pub const DEFAULT_PATH: &str = "/websocket";
const TICK_INTERVAL: Duration = Duration::from_millis(100);
const ARROW_BRUSH: &str = "green";
const CIRCLE_BRUSH: &str = "green";

type Session = ClientSession<BoardState, TerminalUi>;

pub struct ClientConfig {
    pub server_address: String,
    pub path: String,
}

enum IncomingEvent {
    Network(String),
    NetworkClosed,
    Terminal(term_event::Event),
    Tick,
}

enum Flow {
    Continue,
    Quit,
}

fn writeln_raw(stdout: &mut io::Stdout, v: impl fmt::Display) -> io::Result<()> {
    let s = v.to_string();
    // Note. Not using `lines()` because it removes trailing new line.
    for line in s.split('\n') {
        execute!(
            stdout,
            style::Print(line),
            terminal::Clear(terminal::ClearType::UntilNewLine),
            cursor::MoveToNextLine(1),
            cursor::Hide
        )?;
    }
    Ok(())
}

fn render(
    stdout: &mut io::Stdout, app_start_time: Instant, session: &Session, keyboard_input: &str,
    command_error: &Option<String>,
) -> io::Result<()> {
    let now = Instant::now();
    execute!(stdout, cursor::MoveTo(0, 0))?;
    writeln_raw(stdout, format!("{}\n", tui::render_client(session.board(), session.ui())))?;
    // Note. Don't clear the board to avoid blinking.
    execute!(stdout, terminal::Clear(terminal::ClearType::FromCursorDown))?;

    // Simulate cursor: real cursor blinking is broken with Show/Hide.
    let show_cursor = now.duration_since(app_start_time).as_millis() % 1000 >= 500;
    let cursor = if show_cursor { '▂' } else { ' ' };
    let input_with_cursor = format!("{}{}", keyboard_input, cursor);
    writeln_raw(stdout, format!("{}\n", input_with_cursor.with(style::Color::White)))?;

    match command_error {
        Some(err) => writeln_raw(stdout, err.clone().with(style::Color::Red))?,
        None => writeln_raw(stdout, command::HELP.with(style::Color::DarkGrey))?,
    }
    Ok(())
}

fn execute_command(session: &mut Session, cmd: Command) -> Result<Flow, String> {
    match cmd {
        Command::Move { orig, dest } => {
            if !session.board().is_move_allowed(orig, dest) {
                return Err(format!("Illegal move {}{}", orig, dest));
            }
            session.user_move(orig, dest);
        }
        Command::NewGame => session.new_game(),
        Command::SelectArmy(army) => {
            if !session.ui().armies().is_empty() && !session.ui().armies().contains(&army) {
                return Err(format!("Unknown army '{}'", army));
            }
            session.select_army(army);
        }
        Command::Undo(n) => session.undo(n),
        Command::Arrow { orig, dest } => {
            draw(session, DrawShape::arrow(orig, dest, ARROW_BRUSH))
        }
        Command::Circle(square) => draw(session, DrawShape::circle(square, CIRCLE_BRUSH)),
        Command::ClearShapes => session.user_draw(vec![]),
        Command::Help => return Err(command::HELP.to_owned()),
        Command::Quit => return Ok(Flow::Quit),
    }
    Ok(Flow::Continue)
}

// The board is updated when the server echoes the drawing back.
fn draw(session: &mut Session, shape: DrawShape) {
    let mut shapes = session.board().shapes().to_vec();
    toggle_shape(&mut shapes, shape);
    session.user_draw(shapes);
}

fn connect(config: &ClientConfig) -> anyhow::Result<tungstenite::WebSocket<TcpStream>> {
    let url = Url::parse(&format!("ws://{}{}", config.server_address, config.path))?;
    let stream = TcpStream::connect(config.server_address.as_str())
        .with_context(|| format!("Cannot connect to {}", config.server_address))?;
    let (socket, _) = tungstenite::client(url.as_str(), stream)
        .map_err(|err| anyhow!("WebSocket handshake with {} failed: {}", url, err))?;
    Ok(socket)
}

pub fn run(config: ClientConfig) -> anyhow::Result<()> {
    let (server_tx, server_rx) = mpsc::channel();
    let mut session = ClientSession::new(BoardState::new(), TerminalUi::new(), server_tx);

    info!("Connecting to {}{}...", config.server_address, config.path);
    let mut socket_in = connect(&config)?;
    let mut socket_out = network::clone_websocket(&socket_in, protocol::Role::Client)?;
    std::mem::drop(config);

    let mut stdout = io::stdout();
    terminal::enable_raw_mode()?;
    defer! {
        let _ = terminal::disable_raw_mode();
        let _ = execute!(io::stdout(), terminal::LeaveAlternateScreen, cursor::Show);
    };
    execute!(stdout, terminal::EnterAlternateScreen, cursor::Hide)?;
    let app_start_time = Instant::now();

    let (tx, rx) = mpsc::channel();
    let tx_net = tx.clone();
    let tx_local = tx.clone();
    let tx_tick = tx;
    thread::spawn(move || {
        loop {
            match network::read_text(&mut socket_in) {
                Ok(text) => {
                    if tx_net.send(IncomingEvent::Network(text)).is_err() {
                        return;
                    }
                }
                Err(err) => {
                    if !matches!(err, CommunicationError::ConnectionClosed) {
                        warn!("Connection lost: {:?}", err);
                    }
                    let _ = tx_net.send(IncomingEvent::NetworkClosed);
                    return;
                }
            }
        }
    });
    thread::spawn(move || {
        while let Ok(ev) = term_event::read() {
            if tx_local.send(IncomingEvent::Terminal(ev)).is_err() {
                return;
            }
        }
    });
    thread::spawn(move || {
        loop {
            thread::sleep(TICK_INTERVAL);
            if tx_tick.send(IncomingEvent::Tick).is_err() {
                return;
            }
        }
    });
    thread::spawn(move || {
        for ev in server_rx {
            if let Err(err) = network::write_obj(&mut socket_out, &ev) {
                warn!("Cannot send {:?}: {:?}", ev, err);
                return;
            }
        }
    });

    session.on_open(Instant::now());
    let mut keyboard_input = String::new();
    let mut command_error = None;
    for event in rx {
        match event {
            IncomingEvent::Network(text) => {
                if let Err(err) = session.process_server_message(&text) {
                    warn!("{:?}", err);
                }
            }
            IncomingEvent::NetworkClosed => {
                session.on_close();
            }
            IncomingEvent::Terminal(term_event::Event::Key(event)) => {
                if event.kind != term_event::KeyEventKind::Press {
                    continue;
                }
                match event.code {
                    term_event::KeyCode::Char('c')
                        if event.modifiers.contains(term_event::KeyModifiers::CONTROL) =>
                    {
                        return Ok(());
                    }
                    term_event::KeyCode::Char(ch) => {
                        keyboard_input.push(ch);
                    }
                    term_event::KeyCode::Backspace => {
                        keyboard_input.pop();
                    }
                    term_event::KeyCode::Enter => {
                        let result = command::parse_command(&keyboard_input)
                            .and_then(|cmd| execute_command(&mut session, cmd));
                        keyboard_input.clear();
                        command_error = match result {
                            Ok(Flow::Quit) => return Ok(()),
                            Ok(Flow::Continue) => None,
                            Err(err) => Some(err),
                        };
                    }
                    _ => {}
                }
            }
            IncomingEvent::Terminal(_) => {}
            IncomingEvent::Tick => {
                // Any event triggers repaint, so no additional action is required.
            }
        }
        session.refresh(Instant::now());
        render(&mut stdout, app_start_time, &session, &keyboard_input, &command_error)?;
    }
    Err(anyhow!("Unexpected end of events stream"))
}
