// Keyboard input of the console client. A line is either a move ("e2e4", "e2-e4", "e2 e4") or a
// slash command.

use fairy_board::coord::Coord;


pub const HELP: &str =
    "Commands: e2e4 | /new | /army <name> | /undo [n] | /arrow e2 e4 | /circle e4 | /clear | /quit";

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Command {
    Move { orig: Coord, dest: Coord },
    NewGame,
    SelectArmy(String),
    Undo(u32),
    // Toggles the arrow: drawing the same arrow twice removes it.
    Arrow { orig: Coord, dest: Coord },
    Circle(Coord),
    ClearShapes,
    Help,
    Quit,
}

pub fn parse_command(input: &str) -> Result<Command, String> {
    let input = input.trim();
    let Some(cmd) = input.strip_prefix('/') else {
        return parse_move(input);
    };
    let mut words = cmd.split_whitespace();
    let name = words.next().unwrap_or("");
    let args: Vec<_> = words.collect();
    match (name, args.as_slice()) {
        ("new", []) => Ok(Command::NewGame),
        ("army", []) => Err("Usage: /army <name>".to_owned()),
        // Army names may contain spaces.
        ("army", _) => Ok(Command::SelectArmy(args.join(" "))),
        ("undo", []) => Ok(Command::Undo(1)),
        ("undo", [n]) => match n.parse() {
            Ok(n) if n > 0 => Ok(Command::Undo(n)),
            _ => Err(format!("Invalid number of moves: '{}'", n)),
        },
        ("arrow", [orig, dest]) => Ok(Command::Arrow {
            orig: parse_square(orig)?,
            dest: parse_square(dest)?,
        }),
        ("circle", [square]) => Ok(Command::Circle(parse_square(square)?)),
        ("clear", []) => Ok(Command::ClearShapes),
        ("help", []) => Ok(Command::Help),
        ("quit", []) => Ok(Command::Quit),
        _ => Err(format!("Unknown command: '{}'", cmd)),
    }
}

fn parse_move(input: &str) -> Result<Command, String> {
    let squares: String = input.chars().filter(|ch| !ch.is_whitespace() && *ch != '-').collect();
    let invalid = || format!("Cannot parse move '{}'", input);
    if squares.len() != 4 || !squares.is_ascii() {
        return Err(invalid());
    }
    let (orig, dest) = squares.split_at(2);
    match (Coord::from_algebraic(orig), Coord::from_algebraic(dest)) {
        (Some(orig), Some(dest)) => Ok(Command::Move { orig, dest }),
        _ => Err(invalid()),
    }
}

fn parse_square(s: &str) -> Result<Coord, String> {
    Coord::from_algebraic(s).ok_or_else(|| format!("Invalid square: '{}'", s))
}
