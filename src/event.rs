use std::collections::BTreeMap;

use enum_map::EnumMap;
use serde::{Deserialize, Serialize};

use crate::coord::Coord;
use crate::force::Force;
use crate::shape::DrawShape;


// Legal destinations by origin square, as declared by the server.
pub type LegalDests = BTreeMap<Coord, Vec<Coord>>;

// Army names by colour. Serialized as `{"white": .., "black": ..}`.
pub type PlayerNames = EnumMap<Force, String>;

// Full authoritative state for one viewer.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionUpdate {
    pub fen: String,
    #[serde(default)]
    pub check: bool,
    #[serde(default)]
    pub dests: LegalDests,
    pub your_color: Force,
    // Present (and true) when the position was reset rather than advanced by a move:
    // new game or undo.
    #[serde(default)]
    pub clear_last: bool,
    // Empty while the game is in progress.
    #[serde(default)]
    pub result: String,
    pub names: PlayerNames,
}

// Improvement potential: `move` and `position` carry the same state; the server could send
// `position` with an optional `lastMove` instead.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(tag = "msg_type", rename_all = "snake_case", try_from = "RawServerEvent")]
pub enum ServerEvent {
    Move {
        orig: Coord,
        dest: Coord,
        #[serde(flatten)]
        position: Option<PositionUpdate>,
    },
    Armies {
        armies: Vec<String>,
    },
    Position(PositionUpdate),
    Draw {
        shapes: Vec<DrawShape>,
    },
    #[serde(rename = "newgame")]
    NewGame,
    // Message types introduced by newer servers.
    #[serde(other)]
    Unknown,
}

// Wire shape of `ServerEvent`. A flattened `Option` swallows errors, so `move` keeps the
// remaining fields as is: they must form a valid position whenever `fen` is among them.
#[derive(Deserialize)]
#[serde(tag = "msg_type", rename_all = "snake_case")]
enum RawServerEvent {
    Move {
        orig: Coord,
        dest: Coord,
        #[serde(flatten)]
        rest: serde_json::Map<String, serde_json::Value>,
    },
    Armies {
        armies: Vec<String>,
    },
    Position(PositionUpdate),
    Draw {
        shapes: Vec<DrawShape>,
    },
    #[serde(rename = "newgame")]
    NewGame,
    #[serde(other)]
    Unknown,
}

impl TryFrom<RawServerEvent> for ServerEvent {
    type Error = serde_json::Error;

    fn try_from(raw: RawServerEvent) -> Result<Self, Self::Error> {
        Ok(match raw {
            RawServerEvent::Move { orig, dest, rest } => {
                let position = if rest.contains_key("fen") {
                    Some(serde_json::from_value(serde_json::Value::Object(rest))?)
                } else {
                    None
                };
                ServerEvent::Move { orig, dest, position }
            }
            RawServerEvent::Armies { armies } => ServerEvent::Armies { armies },
            RawServerEvent::Position(position) => ServerEvent::Position(position),
            RawServerEvent::Draw { shapes } => ServerEvent::Draw { shapes },
            RawServerEvent::NewGame => ServerEvent::NewGame,
            RawServerEvent::Unknown => ServerEvent::Unknown,
        })
    }
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(tag = "msg_type", rename_all = "snake_case")]
pub enum ClientEvent {
    UpdatePosition,
    // Keepalive.
    Hi,
    Move {
        orig: Coord,
        dest: Coord,
    },
    Draw {
        shapes: Vec<DrawShape>,
    },
    #[serde(rename = "newgame")]
    NewGame,
    SelectArmy {
        army: String,
    },
    Undo {
        n: u32,
    },
}
