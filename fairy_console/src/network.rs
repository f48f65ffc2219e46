use std::io;
use std::net::TcpStream;

use log::{debug, warn};
use serde::Serialize;
use tungstenite::{Message, WebSocket, protocol::Role};


#[derive(Debug)]
pub enum CommunicationError {
    Socket(tungstenite::Error),
    Serde(serde_json::Error),
    ConnectionClosed,
}

pub fn write_obj<T, S>(socket: &mut WebSocket<S>, obj: &T) -> Result<(), CommunicationError>
where
    T: Serialize,
    S: io::Read + io::Write,
{
    let serialized = serde_json::to_string(obj).map_err(CommunicationError::Serde)?;
    socket.send(Message::text(serialized)).map_err(CommunicationError::Socket)
}

// Returns the next text message. Parsing is left to the session so that a malformed envelope
// doesn't take the reader down.
pub fn read_text<S>(socket: &mut WebSocket<S>) -> Result<String, CommunicationError>
where
    S: io::Read + io::Write,
{
    loop {
        let msg = socket.read().map_err(|err| match err {
            tungstenite::Error::ConnectionClosed | tungstenite::Error::AlreadyClosed => {
                CommunicationError::ConnectionClosed
            }
            err => CommunicationError::Socket(err),
        })?;
        match msg {
            Message::Text(text) => return Ok(text.as_str().to_owned()),
            Message::Close(frame) => {
                debug!("Server closed the connection: {:?}", frame);
                return Err(CommunicationError::ConnectionClosed);
            }
            Message::Binary(data) => warn!("Ignoring binary message of {} bytes", data.len()),
            Message::Ping(_) | Message::Pong(_) | Message::Frame(_) => {}
        }
    }
}

// Improvement potential: Instead of cloning the socket, call TcpStream.set_nonblocking on the
//   underlying stream and do reads and writes in the same thread.
pub fn clone_websocket(
    socket: &WebSocket<TcpStream>, role: Role,
) -> io::Result<WebSocket<TcpStream>> {
    let stream = socket.get_ref().try_clone()?;
    let config = *socket.get_config();
    Ok(WebSocket::from_raw_socket(stream, role, Some(config)))
}
