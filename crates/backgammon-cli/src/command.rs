//! Line commands accepted by the shell.

use backgammon_core::{Destination, Origin, NUM_POINTS};
use thiserror::Error;

pub const USAGE: &str = "\
commands:
  roll                         roll the dice
  select <bar|1-24>            select (or deselect) an origin
  move <bar|1-24> <off|1-24> <die>
                               play a legal move
  end                          end the turn
  undo                         restore the start of this turn
  new                          start a new game
  clear                        dismiss the message
  show                         print the board
  moves                        list the legal moves
  help                         print this help
  quit                         leave the shell";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Empty command")]
    Empty,

    #[error("Unknown command: {0}")]
    Unknown(String),

    #[error("Missing argument: {0}")]
    MissingArgument(&'static str),

    #[error("Unexpected argument: {0}")]
    TrailingArgument(String),

    #[error("Invalid origin: {0}")]
    InvalidOrigin(String),

    #[error("Invalid destination: {0}")]
    InvalidDestination(String),

    #[error("Invalid die: {0}")]
    InvalidDie(String),
}

/// An engine action as typed by the user.
///
/// A typed move carries no hit flag; the session looks it up in the legal set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionRequest {
    Roll,
    Select(Origin),
    Move {
        from: Origin,
        to: Destination,
        die: u8,
    },
    EndTurn,
    Undo,
    NewGame,
    ClearMessage,
}

/// One parsed line of input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Action(ActionRequest),
    Show,
    Moves,
    Help,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let mut words = line.split_whitespace();
        let name = words.next().ok_or(CommandError::Empty)?.to_ascii_lowercase();

        let command = match name.as_str() {
            "roll" | "r" => Command::Action(ActionRequest::Roll),
            "select" | "s" => {
                let origin = parse_origin(words.next().ok_or(CommandError::MissingArgument("origin"))?)?;
                Command::Action(ActionRequest::Select(origin))
            }
            "move" | "m" => {
                let from = parse_origin(words.next().ok_or(CommandError::MissingArgument("origin"))?)?;
                let to = parse_destination(
                    words.next().ok_or(CommandError::MissingArgument("destination"))?,
                )?;
                let die = parse_die(words.next().ok_or(CommandError::MissingArgument("die"))?)?;
                Command::Action(ActionRequest::Move { from, to, die })
            }
            "end" => Command::Action(ActionRequest::EndTurn),
            "undo" | "u" => Command::Action(ActionRequest::Undo),
            "new" => Command::Action(ActionRequest::NewGame),
            "clear" => Command::Action(ActionRequest::ClearMessage),
            "show" => Command::Show,
            "moves" => Command::Moves,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            _ => return Err(CommandError::Unknown(name)),
        };

        match words.next() {
            Some(extra) => Err(CommandError::TrailingArgument(extra.to_string())),
            None => Ok(command),
        }
    }
}

fn parse_point(word: &str) -> Option<u8> {
    word.parse::<u8>()
        .ok()
        .filter(|n| (1..=NUM_POINTS).contains(n))
}

fn parse_origin(word: &str) -> Result<Origin, CommandError> {
    if word.eq_ignore_ascii_case("bar") {
        return Ok(Origin::Bar);
    }
    parse_point(word)
        .map(Origin::Point)
        .ok_or_else(|| CommandError::InvalidOrigin(word.to_string()))
}

fn parse_destination(word: &str) -> Result<Destination, CommandError> {
    if word.eq_ignore_ascii_case("off") {
        return Ok(Destination::Off);
    }
    parse_point(word)
        .map(Destination::Point)
        .ok_or_else(|| CommandError::InvalidDestination(word.to_string()))
}

fn parse_die(word: &str) -> Result<u8, CommandError> {
    word.parse::<u8>()
        .ok()
        .filter(|d| (1..=6).contains(d))
        .ok_or_else(|| CommandError::InvalidDie(word.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(Command::parse("roll"), Ok(Command::Action(ActionRequest::Roll)));
        assert_eq!(Command::parse("  END  "), Ok(Command::Action(ActionRequest::EndTurn)));
        assert_eq!(Command::parse("undo"), Ok(Command::Action(ActionRequest::Undo)));
        assert_eq!(Command::parse("new"), Ok(Command::Action(ActionRequest::NewGame)));
        assert_eq!(Command::parse("clear"), Ok(Command::Action(ActionRequest::ClearMessage)));
        assert_eq!(Command::parse("show"), Ok(Command::Show));
        assert_eq!(Command::parse("moves"), Ok(Command::Moves));
        assert_eq!(Command::parse("quit"), Ok(Command::Quit));
    }

    #[test]
    fn test_parse_select() {
        assert_eq!(
            Command::parse("select bar"),
            Ok(Command::Action(ActionRequest::Select(Origin::Bar)))
        );
        assert_eq!(
            Command::parse("select 13"),
            Ok(Command::Action(ActionRequest::Select(Origin::Point(13))))
        );
        assert_eq!(
            Command::parse("select 25"),
            Err(CommandError::InvalidOrigin("25".to_string()))
        );
        assert_eq!(
            Command::parse("select"),
            Err(CommandError::MissingArgument("origin"))
        );
    }

    #[test]
    fn test_parse_move() {
        assert_eq!(
            Command::parse("move 13 10 3"),
            Ok(Command::Action(ActionRequest::Move {
                from: Origin::Point(13),
                to: Destination::Point(10),
                die: 3,
            }))
        );
        assert_eq!(
            Command::parse("m 3 off 5"),
            Ok(Command::Action(ActionRequest::Move {
                from: Origin::Point(3),
                to: Destination::Off,
                die: 5,
            }))
        );
        assert_eq!(
            Command::parse("move 13 10 7"),
            Err(CommandError::InvalidDie("7".to_string()))
        );
        assert_eq!(
            Command::parse("move bar bar 3"),
            Err(CommandError::InvalidDestination("bar".to_string()))
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(Command::parse(""), Err(CommandError::Empty));
        assert_eq!(
            Command::parse("fly"),
            Err(CommandError::Unknown("fly".to_string()))
        );
        assert_eq!(
            Command::parse("roll now"),
            Err(CommandError::TrailingArgument("now".to_string()))
        );
    }
}
