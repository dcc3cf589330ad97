mod app;
mod command;
mod config;
mod consts;
mod game;
mod highscore;
mod util;
mod words;
use crate::app::App;
use crate::config::Config;
use crate::game::Game;
use crate::highscore::JsonScoreStore;
use anyhow::Context;
use lexopt::{Arg, Parser};
use log::{info, LevelFilter};
use simplelog::WriteLogger;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Command-line invocation
#[derive(Clone, Debug, Eq, PartialEq)]
enum Arguments {
    Run { config: Option<PathBuf> },
    Help,
    Version,
}

impl Arguments {
    fn from_parser(mut parser: Parser) -> Result<Arguments, lexopt::Error> {
        let mut config = None;
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('c') | Arg::Long("config") => {
                    config = Some(PathBuf::from(parser.value()?));
                }
                Arg::Short('h') | Arg::Long("help") => return Ok(Arguments::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Arguments::Version),
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Arguments::Run { config })
    }

    fn run(self) -> anyhow::Result<ExitCode> {
        match self {
            Arguments::Run { config } => {
                let (path, allow_missing) = match config {
                    Some(p) => (p, false),
                    None => (Config::default_path()?, true),
                };
                let config = Config::load(&path, allow_missing).with_context(|| {
                    format!("failed to load configuration from {}", path.display())
                })?;
                init_logging(&config);
                info!(
                    "Starting {} {} with {} words",
                    env!("CARGO_PKG_NAME"),
                    env!("CARGO_PKG_VERSION"),
                    config.game.words.len()
                );
                let store = JsonScoreStore::new(config.high_score_file());
                let game = Game::new(config.game.words, config.game.tuning, store);
                let terminal = ratatui::init();
                let r = App::new(game).run(terminal);
                ratatui::restore();
                info!("Exiting");
                Ok(io_exit(r))
            }
            Arguments::Help => {
                println!("Usage: wordsnake [-c|--config <FILE>]");
                println!();
                println!("Spell words with a snake in your terminal");
                println!();
                println!("Options:");
                println!("  -c <FILE>, --config <FILE>");
                println!("                    Read configuration from the given file");
                println!();
                println!("  -h, --help        Display this help message and exit");
                println!("  -V, --version     Show the program version and exit");
                Ok(ExitCode::SUCCESS)
            }
            Arguments::Version => {
                println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                Ok(ExitCode::SUCCESS)
            }
        }
    }
}

fn main() -> ExitCode {
    let args = match Arguments::from_parser(Parser::from_env()) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("wordsnake: {e}");
            return ExitCode::from(2);
        }
    };
    match args.run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("wordsnake: {e:?}");
            ExitCode::FAILURE
        }
    }
}

/// Send log messages to the configured log file.  Failure to set up logging
/// is reported but does not stop the game.
fn init_logging(config: &Config) {
    let Some(path) = config.log_file() else {
        return;
    };
    if let Err(e) = open_log(&path, config.files.log_level) {
        eprintln!("wordsnake: failed to set up logging: {e:#}");
    }
}

fn open_log(path: &Path, level: LevelFilter) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs_err::create_dir_all(parent)?;
    }
    let fp = fs_err::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;
    WriteLogger::init(level, simplelog::Config::default(), fp)?;
    Ok(())
}

fn io_exit(r: io::Result<()>) -> ExitCode {
    match r {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.kind() == ErrorKind::BrokenPipe => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::from(2)
        }
    }
}
