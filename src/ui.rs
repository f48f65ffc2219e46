// Page elements around the board: army selector, name labels, result banner and connection
// indicator.

use crate::event::PlayerNames;
use crate::force::Force;


#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ConnectionStatus {
    Connecting,
    Open,
    // Terminal: there is no reconnection.
    Disconnected,
}

impl ConnectionStatus {
    pub const ALL: [ConnectionStatus; 3] =
        [ConnectionStatus::Connecting, ConnectionStatus::Open, ConnectionStatus::Disconnected];

    // Stable name exposed to page scripts and used as the indicator CSS class.
    pub fn as_str(self) -> &'static str {
        match self {
            ConnectionStatus::Connecting => "connecting",
            ConnectionStatus::Open => "open",
            ConnectionStatus::Disconnected => "disconnected",
        }
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Roster {
    pub us: String,
    pub them: String,
}

impl Roster {
    pub fn for_viewer(your_color: Force, names: &PlayerNames) -> Self {
        Roster {
            us: names[your_color].clone(),
            them: names[your_color.opponent()].clone(),
        }
    }
}

// Result banner content. Empty text means the game is in progress and the banner is hidden.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct GameResultText(String);

impl GameResultText {
    pub fn new(text: impl Into<String>) -> Self { GameResultText(text.into()) }
    pub fn text(&self) -> &str { &self.0 }
    pub fn is_visible(&self) -> bool { !self.0.is_empty() }
}

pub trait GameUi {
    // Replaces all options.
    fn set_army_options(&mut self, armies: &[String]);
    fn set_roster(&mut self, roster: &Roster);
    fn set_result(&mut self, result: &GameResultText);
    fn set_connection_status(&mut self, status: ConnectionStatus);
}
