use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use solitaire::config::Config;
use solitaire::{Session, new_game, run};

/// Terminal patience game.
#[derive(Parser, Debug)]
#[command(name = "solitaire", version, about)]
struct Cli {
    /// Seed for the shuffle, for a reproducible game
    #[arg(long)]
    seed: Option<u64>,

    /// Deal a PySolFC game number instead of a random deck (e.g. 1234 or ms1234)
    #[arg(long)]
    game: Option<String>,

    /// Directory where .sot save files are kept
    #[arg(long)]
    save_dir: Option<PathBuf>,

    /// Do not save the game after every command
    #[arg(long)]
    no_autosave: bool,

    /// Continue from the autosave
    #[arg(long)]
    resume: bool,

    /// TOML settings file
    #[arg(long)]
    config: Option<PathBuf>,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }
    if let Some(dir) = cli.save_dir {
        config.save_dir = dir;
    }
    if cli.no_autosave {
        config.autosave = None;
    }

    let game = new_game(&config, cli.game.as_deref()).context("could not deal the game")?;
    let mut session = Session::new(game, config);
    if cli.resume {
        if let Err(e) = session.resume() {
            warn!(error = %e, "could not resume, starting a new game");
        }
    }

    run(&mut session, io::stdin().lock(), io::stdout().lock())?;
    Ok(())
}
