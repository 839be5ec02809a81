//! Text commands typed at the prompt.
//!
//! Users count columns 1..=7 and foundations 1..=4; `parse` validates those
//! and converts them to the 0-based indices `Move` uses.

use thiserror::Error;

use crate::card::CARDS_PER_DECK;
use crate::moves::Move;
use crate::tableau::{NUM_COLS, NUM_FOUNDATIONS};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Play(Move),
    Reset,
    Save(String),
    Load(String),
    Hint,
    Help,
    Quit,
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("no command given")]
    Empty,
    #[error("unknown command '{0}', type 'help' for a list")]
    Unknown(String),
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error("'{0}' is not a number")]
    NotANumber(String),
    #[error("{what} must be between 1 and {max}, got {value}")]
    OutOfRange {
        what: &'static str,
        value: usize,
        max: usize,
    },
}

pub const HELP: &str = "\
Commands:
  d, draw                 draw a card from the deck onto the pile
  m, move <from> <to> [n] move the top n cards (default 1) between columns
  pc <col>                pile -> column
  pr <slot>               pile -> foundation
  cr <col> <slot>         column -> foundation
  rc <slot> <col>         foundation -> column
  shuffle                 turn the pile back into the deck once it is empty
  reset                   deal a new game
  save <name>             save to <name>.sot
  load <name>             load <name>.sot
  hint                    list the moves available
  help                    show this text
  q, quit                 leave the game
Columns are 1-7, foundations are 1-4 (H, D, C, S).";

fn number(arg: &str, what: &'static str, max: usize) -> Result<usize, CommandError> {
    let value: usize = arg
        .parse()
        .map_err(|_| CommandError::NotANumber(arg.to_string()))?;
    if value == 0 || value > max {
        return Err(CommandError::OutOfRange { what, value, max });
    }
    Ok(value)
}

/// 0-based column index from a 1-based argument.
fn column(arg: &str) -> Result<u8, CommandError> {
    number(arg, "column", NUM_COLS).map(|c| (c - 1) as u8)
}

/// 0-based foundation slot from a 1-based argument.
fn slot(arg: &str) -> Result<u8, CommandError> {
    number(arg, "foundation", NUM_FOUNDATIONS).map(|s| (s - 1) as u8)
}

fn name(args: &[&str], usage: &'static str) -> Result<String, CommandError> {
    match args {
        [name] => Ok((*name).to_string()),
        _ => Err(CommandError::Usage(usage)),
    }
}

pub fn parse(line: &str) -> Result<Command, CommandError> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    let Some((head, args)) = parts.split_first() else {
        return Err(CommandError::Empty);
    };

    let cmd = head.to_lowercase();
    let play = |mv: Move| -> Result<Command, CommandError> { Ok(Command::Play(mv)) };
    match (cmd.as_str(), args) {
        ("d" | "draw", []) => play(Move::Draw),
        ("shuffle", []) => play(Move::Reshuffle),
        ("m" | "move", [from, to, rest @ ..]) if rest.len() <= 1 => {
            let count = match rest {
                [n] => number(n, "count", CARDS_PER_DECK as usize)? as u8,
                _ => 1,
            };
            play(Move::ColumnToColumn {
                from: column(from)?,
                to: column(to)?,
                count,
            })
        }
        ("m" | "move", _) => Err(CommandError::Usage("move <from> <to> [count]")),
        ("pc", [to]) => play(Move::PileToColumn { to: column(to)? }),
        ("pc", _) => Err(CommandError::Usage("pc <column>")),
        ("pr", [s]) => play(Move::PileToReserve { slot: slot(s)? }),
        ("pr", _) => Err(CommandError::Usage("pr <foundation>")),
        ("cr", [from, s]) => play(Move::ColumnToReserve {
            from: column(from)?,
            slot: slot(s)?,
        }),
        ("cr", _) => Err(CommandError::Usage("cr <column> <foundation>")),
        ("rc", [s, to]) => play(Move::ReserveToColumn {
            slot: slot(s)?,
            to: column(to)?,
        }),
        ("rc", _) => Err(CommandError::Usage("rc <foundation> <column>")),
        ("reset", []) => Ok(Command::Reset),
        ("save", _) => name(args, "save <name>").map(Command::Save),
        ("load", _) => name(args, "load <name>").map(Command::Load),
        ("hint", []) => Ok(Command::Hint),
        ("help" | "?", _) => Ok(Command::Help),
        ("q" | "quit" | "exit", []) => Ok(Command::Quit),
        ("d" | "draw" | "shuffle" | "reset" | "hint" | "q" | "quit" | "exit", _) => {
            Err(CommandError::Usage("this command takes no arguments"))
        }
        _ => Err(CommandError::Unknown((*head).to_string())),
    }
}

/// The text a user would type to play `mv`.
pub fn command_for(mv: Move) -> String {
    match mv {
        Move::Draw => "d".to_string(),
        Move::Reshuffle => "shuffle".to_string(),
        Move::ColumnToColumn { from, to, count: 1 } => format!("m {} {}", from + 1, to + 1),
        Move::ColumnToColumn { from, to, count } => {
            format!("m {} {} {}", from + 1, to + 1, count)
        }
        Move::PileToColumn { to } => format!("pc {}", to + 1),
        Move::PileToReserve { slot } => format!("pr {}", slot + 1),
        Move::ColumnToReserve { from, slot } => format!("cr {} {}", from + 1, slot + 1),
        Move::ReserveToColumn { slot, to } => format!("rc {} {}", slot + 1, to + 1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn moves_use_one_based_indices() {
        assert_eq!(
            parse("m 1 4"),
            Ok(Command::Play(Move::ColumnToColumn {
                from: 0,
                to: 3,
                count: 1
            }))
        );
        assert_eq!(
            parse("  MOVE 7 2 3 "),
            Ok(Command::Play(Move::ColumnToColumn {
                from: 6,
                to: 1,
                count: 3
            }))
        );
        assert_eq!(parse("pc 5"), Ok(Command::Play(Move::PileToColumn { to: 4 })));
        assert_eq!(parse("pr 1"), Ok(Command::Play(Move::PileToReserve { slot: 0 })));
        assert_eq!(
            parse("cr 2 4"),
            Ok(Command::Play(Move::ColumnToReserve { from: 1, slot: 3 }))
        );
        assert_eq!(
            parse("rc 3 7"),
            Ok(Command::Play(Move::ReserveToColumn { slot: 2, to: 6 }))
        );
        assert_eq!(parse("d"), Ok(Command::Play(Move::Draw)));
        assert_eq!(parse("shuffle"), Ok(Command::Play(Move::Reshuffle)));
    }

    #[test]
    fn session_commands() {
        assert_eq!(parse("save my game"), Err(CommandError::Usage("save <name>")));
        assert_eq!(parse("save latest"), Ok(Command::Save("latest".to_string())));
        assert_eq!(parse("load x"), Ok(Command::Load("x".to_string())));
        assert_eq!(parse("reset"), Ok(Command::Reset));
        assert_eq!(parse("hint"), Ok(Command::Hint));
        assert_eq!(parse("help"), Ok(Command::Help));
        assert_eq!(parse("q"), Ok(Command::Quit));
    }

    #[test]
    fn bad_input_is_reported() {
        assert_eq!(parse(""), Err(CommandError::Empty));
        assert_eq!(parse("   "), Err(CommandError::Empty));
        assert_eq!(parse("fly"), Err(CommandError::Unknown("fly".to_string())));
        assert_eq!(
            parse("m 0 3"),
            Err(CommandError::OutOfRange {
                what: "column",
                value: 0,
                max: 7
            })
        );
        assert_eq!(
            parse("pr 5"),
            Err(CommandError::OutOfRange {
                what: "foundation",
                value: 5,
                max: 4
            })
        );
        assert_eq!(parse("pc x"), Err(CommandError::NotANumber("x".to_string())));
        assert!(matches!(parse("m 1"), Err(CommandError::Usage(_))));
        assert!(matches!(parse("m 1 2 3 4"), Err(CommandError::Usage(_))));
        assert!(matches!(parse("d 3"), Err(CommandError::Usage(_))));
    }

    #[test]
    fn command_for_parses_back() {
        let moves = [
            Move::Draw,
            Move::Reshuffle,
            Move::ColumnToColumn { from: 2, to: 5, count: 1 },
            Move::ColumnToColumn { from: 0, to: 6, count: 4 },
            Move::PileToColumn { to: 3 },
            Move::PileToReserve { slot: 2 },
            Move::ColumnToReserve { from: 4, slot: 1 },
            Move::ReserveToColumn { slot: 3, to: 0 },
        ];
        for mv in moves {
            assert_eq!(parse(&command_for(mv)), Ok(Command::Play(mv)), "{mv:?}");
        }
    }
}
