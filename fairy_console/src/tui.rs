use console::Style;
use fairy_board::board_view::BoardState;
use fairy_board::coord::{Col, Coord, Row};
use fairy_board::force::Force;
use fairy_board::ui::{ConnectionStatus, GameResultText, GameUi, Roster};
use itertools::Itertools;


// Page elements of the browser client, kept as plain state for rendering.
#[derive(Debug)]
pub struct TerminalUi {
    armies: Vec<String>,
    roster: Option<Roster>,
    result: GameResultText,
    connection_status: ConnectionStatus,
}

impl TerminalUi {
    pub fn new() -> Self {
        TerminalUi {
            armies: vec![],
            roster: None,
            result: GameResultText::new(""),
            connection_status: ConnectionStatus::Connecting,
        }
    }

    pub fn armies(&self) -> &[String] { &self.armies }
    pub fn roster(&self) -> Option<&Roster> { self.roster.as_ref() }
    pub fn result(&self) -> &GameResultText { &self.result }
    pub fn connection_status(&self) -> ConnectionStatus { self.connection_status }
}

impl GameUi for TerminalUi {
    fn set_army_options(&mut self, armies: &[String]) { self.armies = armies.to_vec(); }
    fn set_roster(&mut self, roster: &Roster) { self.roster = Some(roster.clone()); }
    fn set_result(&mut self, result: &GameResultText) { self.result = result.clone(); }
    fn set_connection_status(&mut self, status: ConnectionStatus) {
        self.connection_status = status;
    }
}

pub fn render_client(board: &BoardState, ui: &TerminalUi) -> String {
    let (us, them) = match ui.roster() {
        Some(roster) => (roster.us.as_str(), roster.them.as_str()),
        None => ("", ""),
    };
    let mut lines = vec![
        render_connection_status(ui.connection_status()),
        String::new(),
        them.to_owned(),
        render_grid(board),
        us.to_owned(),
        String::new(),
        format!("{} to move", capitalize(board.turn_color().as_str())),
    ];
    if ui.result().is_visible() {
        lines.push(Style::new().magenta().bold().apply_to(ui.result().text()).to_string());
    }
    if !board.shapes().is_empty() {
        lines.push(format!("Drawn: {}", render_shapes(board)));
    }
    if !ui.armies().is_empty() {
        lines.push(format!("Armies: {}", ui.armies().iter().join(", ")));
    }
    lines.join("\n")
}

fn render_connection_status(status: ConnectionStatus) -> String {
    match status {
        ConnectionStatus::Connecting => Style::new().yellow().apply_to("Connecting...").to_string(),
        ConnectionStatus::Open => Style::new().green().apply_to("Connected").to_string(),
        ConnectionStatus::Disconnected => Style::new().red().apply_to("Disconnected").to_string(),
    }
}

fn render_shapes(board: &BoardState) -> String {
    board
        .shapes()
        .iter()
        .map(|shape| match shape.dest {
            Some(dest) if shape.is_arrow() => format!("{}→{}", shape.orig, dest),
            _ => format!("({})", shape.orig),
        })
        .join(" ")
}

// Rows and columns in the order they appear on the screen, top to bottom and left to right.
fn display_order(orientation: Force) -> (Vec<Row>, Vec<Col>) {
    let rows = Row::all().rev().collect_vec();
    let cols = Col::all().collect_vec();
    match orientation {
        Force::White => (rows, cols),
        Force::Black => (rows.into_iter().rev().collect(), cols.into_iter().rev().collect()),
    }
}

fn render_grid(board: &BoardState) -> String {
    let colors = [
        Style::new().color256(233).on_color256(222),
        Style::new().color256(233).on_color256(230),
    ];
    let highlight = Style::new().color256(233).on_color256(150);
    let check = Style::new().color256(233).on_color256(203);
    let last_move = board.last_move();
    let king = match board.turn_color() {
        Force::White => 'K',
        Force::Black => 'k',
    };
    let (rows, cols) = display_order(board.orientation());
    let col_header = format!(
        "{}{}{}",
        format_square(' '),
        cols.iter().map(|col| format_square(col.to_algebraic())).join(""),
        format_square(' ')
    );
    let mut ret = vec![col_header.clone()];
    for &row in &rows {
        let mut line = format_square(row.to_algebraic());
        for &col in &cols {
            let coord = Coord::new(row, col);
            let piece = board.placement()[coord];
            let style = if board.check() && piece == Some(king) {
                &check
            } else if last_move.is_some_and(|(from, to)| coord == from || coord == to) {
                &highlight
            } else {
                let color_idx = (coord.row.to_zero_based() + coord.col.to_zero_based()) % 2;
                &colors[usize::from(color_idx)]
            };
            line.push_str(&style.apply_to(format_square(piece.unwrap_or(' '))).to_string());
        }
        line.push_str(&format_square(row.to_algebraic()));
        ret.push(line);
    }
    ret.push(col_header);
    ret.join("\n")
}

fn format_square(ch: char) -> String { format!(" {} ", ch) }

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
