pub mod card;
pub mod codec;
pub mod command;
pub mod config;
pub mod deck;
pub mod display;
pub mod game;
pub mod moves;
pub mod pysol;
pub mod save;
pub mod stats;
pub mod tableau;

use std::io::{self, BufRead, Write};

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{info, warn};

use crate::command::{Command, CommandError, HELP, command_for};
use crate::config::{Config, DEFAULT_AUTOSAVE};
use crate::display::render_game;
use crate::game::GameState;
use crate::moves::Move;
use crate::pysol::DealError;
use crate::save::SaveError;
use crate::stats::Stats;

/// Build and deal the first game of a session.
///
/// With `game_number` the deck is the PySolFC deal of that number; otherwise
/// it is shuffled from `config.seed`, or from the OS when no seed is set.
pub fn new_game(config: &Config, game_number: Option<&str>) -> Result<GameState, DealError> {
    let rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut game = match game_number {
        Some(number) => GameState::from_deck(pysol::deck_from_game_number(number)?, rng),
        None => GameState::with_rng(rng),
    }
    .with_rules(config.rules);
    game.start();
    Ok(game)
}

/// What the front-end should show after a command.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Outcome {
    pub message: String,
    pub quit: bool,
}

impl Outcome {
    fn say(message: impl Into<String>) -> Self {
        Outcome {
            message: message.into(),
            quit: false,
        }
    }
}

/// One player's sitting: the current game, settings and counters.
pub struct Session {
    game: GameState,
    config: Config,
    stats: Stats,
    won_announced: bool,
}

impl Session {
    /// Wrap an already dealt game.
    pub fn new(game: GameState, config: Config) -> Self {
        let mut stats = Stats::default();
        stats.record_start();
        Session {
            game,
            config,
            stats,
            won_announced: false,
        }
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    /// Load the autosave, falling back to the default name when autosave
    /// is switched off.
    pub fn resume(&mut self) -> Result<(), SaveError> {
        let name = self.config.autosave.as_deref().unwrap_or(DEFAULT_AUTOSAVE);
        let path = save::save_path(&self.config.save_dir, name)?;
        self.game.load_from(&path)?;
        self.won_announced = false;
        Ok(())
    }

    pub fn handle(&mut self, command: Command) -> Outcome {
        let mut outcome = match command {
            Command::Play(mv) => self.play(mv),
            Command::Reset => {
                self.game.reset();
                self.stats.record_start();
                self.won_announced = false;
                Outcome::say("New game dealt.")
            }
            Command::Save(name) => self.save(&name),
            Command::Load(name) => self.load(&name),
            Command::Hint => self.hint(),
            Command::Help => Outcome::say(HELP),
            Command::Quit => Outcome {
                message: format!(
                    "Games started: {}, won: {}",
                    self.stats.games_started, self.stats.games_won
                ),
                quit: true,
            },
        };

        if self.game.is_game_won() && !self.won_announced {
            self.won_announced = true;
            self.stats.record_win();
            info!(games_won = self.stats.games_won, "game won");
            outcome.message.push_str("\nYou won! Type 'reset' for a new game.");
        }

        self.autosave();
        outcome
    }

    fn play(&mut self, mv: Move) -> Outcome {
        let description = mv.describe(self.game.tableau());
        if !self.game.apply_move(mv) {
            return Outcome::say(format!("Not allowed: {description}"));
        }
        match (mv, self.game.current_card()) {
            (Move::Draw, Some(card)) => Outcome::say(format!("Drew {card}")),
            _ => Outcome::say(description),
        }
    }

    fn save(&self, name: &str) -> Outcome {
        let result = save::save_path(&self.config.save_dir, name)
            .and_then(|path| self.game.save_to(&path).map(|()| path));
        match result {
            Ok(path) => Outcome::say(format!("Saved to {}", path.display())),
            Err(e) => Outcome::say(format!("Save failed: {e}")),
        }
    }

    fn load(&mut self, name: &str) -> Outcome {
        let result = save::save_path(&self.config.save_dir, name)
            .and_then(|path| self.game.load_from(&path).map(|()| path));
        match result {
            Ok(path) => {
                self.won_announced = false;
                Outcome::say(format!("Loaded {}", path.display()))
            }
            Err(e) => Outcome::say(format!("Load failed: {e}")),
        }
    }

    fn hint(&self) -> Outcome {
        let moves = self.game.legal_moves();
        if moves.is_empty() {
            return Outcome::say("No moves available. Type 'reset' for a new game.");
        }
        let lines: Vec<String> = moves
            .iter()
            .map(|&mv| {
                format!(
                    "  {:<10} {}",
                    command_for(mv),
                    mv.describe(self.game.tableau())
                )
            })
            .collect();
        Outcome::say(format!("Available moves:\n{}", lines.join("\n")))
    }

    fn autosave(&self) {
        let Some(name) = self.config.autosave.as_deref() else {
            return;
        };
        let result = save::save_path(&self.config.save_dir, name)
            .and_then(|path| self.game.save_to(&path));
        if let Err(e) = result {
            warn!(error = %e, "autosave failed");
        }
    }
}

/// Read commands from `input` until `quit` or end of input, printing the
/// board after each one.
pub fn run<R: BufRead, W: Write>(session: &mut Session, input: R, mut out: W) -> io::Result<()> {
    writeln!(out, "{}", render_game(session.game()))?;
    write!(out, "> ")?;
    out.flush()?;

    for line in input.lines() {
        let line = line?;
        match command::parse(&line) {
            Ok(command) => {
                let outcome = session.handle(command);
                if !outcome.message.is_empty() {
                    writeln!(out, "{}", outcome.message)?;
                }
                if outcome.quit {
                    return Ok(());
                }
            }
            Err(CommandError::Empty) => {}
            Err(e) => writeln!(out, "{e}")?,
        }
        writeln!(out, "{}", render_game(session.game()))?;
        write!(out, "> ")?;
        out.flush()?;
    }

    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::Suit;
    use crate::tableau::Tableau;
    use crate::tableau::tests::full_run;
    use std::io::Cursor;
    use std::path::Path;

    fn session_in(dir: &Path) -> Session {
        let config = Config {
            save_dir: dir.to_path_buf(),
            seed: Some(2024),
            ..Config::default()
        };
        let game = new_game(&config, None).unwrap();
        Session::new(game, config)
    }

    #[test]
    fn every_command_autosaves() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session_in(dir.path());
        let latest = dir.path().join("latest.sot");
        assert!(!latest.exists());

        let outcome = session.handle(Command::Play(Move::Draw));
        assert!(outcome.message.starts_with("Drew "));
        assert!(latest.exists());

        let on_disk = save::read_save(&latest).unwrap();
        assert_eq!(&on_disk, session.game().tableau());
    }

    #[test]
    fn autosave_can_be_switched_off() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            save_dir: dir.path().to_path_buf(),
            autosave: None,
            seed: Some(1),
            ..Config::default()
        };
        let game = new_game(&config, None).unwrap();
        let mut session = Session::new(game, config);
        session.handle(Command::Play(Move::Draw));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn illegal_moves_are_reported_and_change_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session_in(dir.path());
        let before = session.game().tableau().clone();

        let outcome = session.handle(Command::Play(Move::PileToColumn { to: 0 }));
        assert!(outcome.message.starts_with("Not allowed"));
        assert!(!outcome.quit);
        assert_eq!(session.game().tableau(), &before);
    }

    #[test]
    fn save_load_and_resume() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session_in(dir.path());
        session.handle(Command::Play(Move::Draw));
        let saved = session.game().tableau().clone();

        let outcome = session.handle(Command::Save("mine".to_string()));
        assert!(outcome.message.starts_with("Saved"), "{}", outcome.message);

        session.handle(Command::Reset);
        assert_eq!(session.stats().games_started, 2);
        assert_ne!(session.game().tableau(), &saved);

        let outcome = session.handle(Command::Load("mine".to_string()));
        assert!(outcome.message.starts_with("Loaded"), "{}", outcome.message);
        assert_eq!(session.game().tableau(), &saved);

        let outcome = session.handle(Command::Save("a:b".to_string()));
        assert!(outcome.message.starts_with("Save failed"));

        let mut other = session_in(dir.path());
        other.resume().unwrap();
        assert_eq!(other.game().tableau(), &saved);
    }

    #[test]
    fn a_win_is_announced_once() {
        let dir = tempfile::tempdir().unwrap();
        let mut won = Tableau::new_empty();
        won.columns[0] = full_run(Suit::Spades, Suit::Hearts);
        won.columns[1] = full_run(Suit::Hearts, Suit::Spades);
        won.columns[2] = full_run(Suit::Clubs, Suit::Diamonds);
        won.columns[3] = full_run(Suit::Diamonds, Suit::Clubs);
        save::write_save(&dir.path().join("done.sot"), &won).unwrap();

        let mut session = session_in(dir.path());
        let outcome = session.handle(Command::Load("done".to_string()));
        assert!(outcome.message.contains("You won!"));
        assert_eq!(session.stats().games_won, 1);

        let outcome = session.handle(Command::Hint);
        assert!(!outcome.message.contains("You won!"));
        assert_eq!(session.stats().games_won, 1);
    }

    #[test]
    fn hint_lists_typeable_commands() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session_in(dir.path());
        let outcome = session.handle(Command::Hint);
        assert!(outcome.message.starts_with("Available moves:"));
        assert!(outcome.message.contains("  d "));
    }

    #[test]
    fn numbered_deals_are_reproducible() {
        let config = Config::default();
        let a = new_game(&config, Some("ms11982")).unwrap();
        let b = new_game(&config, Some("ms11982")).unwrap();
        assert_eq!(a.tableau(), b.tableau());
        assert!(new_game(&config, Some("not a number")).is_err());
    }

    #[test]
    fn run_reads_commands_until_quit() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session_in(dir.path());
        let input = Cursor::new("d\n\nfly\nhelp\nq\nd\n");
        let mut out = Vec::new();
        run(&mut session, input, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Drew "));
        assert!(text.contains("unknown command 'fly'"));
        assert!(text.contains("Commands:"));
        assert!(text.contains("Games started: 1, won: 0"));
        // The draw after `q` is never played.
        assert_eq!(session.game().pile().len(), 1);
    }
}
