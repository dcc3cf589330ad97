use crate::game::Tuning;
use crate::highscore::JsonScoreStore;
use crate::words::{ParseWordError, Word, WordList};
use log::LevelFilter;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Program configuration read from a configuration file
#[derive(Clone, Deserialize, Debug, Default, Eq, PartialEq)]
pub(crate) struct Config {
    /// Gameplay settings
    #[serde(default)]
    pub(crate) game: GameConfig,

    /// Settings about data files
    #[serde(default)]
    pub(crate) files: FileConfig,
}

impl Config {
    /// Return the default configuration file path
    pub(crate) fn default_path() -> Result<PathBuf, ConfigError> {
        dirs::config_local_dir()
            .map(|p| p.join("wordsnake").join("config.toml"))
            .ok_or(ConfigError::NoPath)
    }

    /// Read configuration from a file on disk.  If the file does not exist and
    /// `allow_missing` is true, a default `Config` value is returned.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the file could not be read or if the file's contents
    /// could not be deserialized.
    pub(crate) fn load(path: &Path, allow_missing: bool) -> Result<Config, ConfigError> {
        let content = match fs_err::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && allow_missing => {
                return Ok(Config::default())
            }
            Err(e) => return Err(ConfigError::Read(e)),
        };
        toml::from_str(&content).map_err(Into::into)
    }

    /// Return the path at which the high score should be stored: the file
    /// given in the configuration or, if that is not set, the default high
    /// score path.  Returns `None` if neither is available.
    pub(crate) fn high_score_file(&self) -> Option<PathBuf> {
        self.files
            .high_score_file
            .clone()
            .or_else(JsonScoreStore::default_path)
    }

    /// Return the path to which log messages should be written, if any
    pub(crate) fn log_file(&self) -> Option<PathBuf> {
        if self.files.log_level == LevelFilter::Off {
            return None;
        }
        self.files
            .log_file
            .clone()
            .or_else(|| dirs::data_local_dir().map(|p| p.join("wordsnake").join("wordsnake.log")))
    }
}

#[derive(Clone, Deserialize, Debug, Default, Eq, PartialEq)]
#[serde(try_from = "RawGameConfig")]
pub(crate) struct GameConfig {
    pub(crate) tuning: Tuning,
    pub(crate) words: WordList,
}

#[derive(Clone, Deserialize, Debug, Default, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
struct RawGameConfig {
    base_tick_ms: Option<u64>,
    tick_step_ms: Option<u64>,
    min_tick_ms: Option<u64>,
    words: Option<Vec<String>>,
}

impl TryFrom<RawGameConfig> for GameConfig {
    type Error = InvalidGameConfig;

    fn try_from(value: RawGameConfig) -> Result<GameConfig, InvalidGameConfig> {
        let defaults = Tuning::default();
        let tuning = Tuning {
            base_tick: value
                .base_tick_ms
                .map_or(defaults.base_tick, Duration::from_millis),
            tick_step: value
                .tick_step_ms
                .map_or(defaults.tick_step, Duration::from_millis),
            min_tick: value
                .min_tick_ms
                .map_or(defaults.min_tick, Duration::from_millis),
        };
        if tuning.base_tick.is_zero() || tuning.min_tick.is_zero() {
            return Err(InvalidGameConfig::ZeroTick);
        }
        if tuning.min_tick > tuning.base_tick {
            return Err(InvalidGameConfig::MinAboveBase);
        }
        let words = match value.words {
            Some(words) => {
                let words = words
                    .iter()
                    .map(|w| {
                        w.parse::<Word>().map_err(|source| InvalidGameConfig::Word {
                            word: w.clone(),
                            source,
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                WordList::new(words).ok_or(InvalidGameConfig::NoWords)?
            }
            None => WordList::default(),
        };
        Ok(GameConfig { tuning, words })
    }
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub(crate) enum InvalidGameConfig {
    #[error("tick intervals must be positive")]
    ZeroTick,
    #[error("min-tick-ms cannot be greater than base-tick-ms")]
    MinAboveBase,
    #[error("word list cannot be empty")]
    NoWords,
    #[error("invalid word {word:?}")]
    Word {
        word: String,
        source: ParseWordError,
    },
}

#[derive(Clone, Deserialize, Debug, Eq, PartialEq)]
#[serde(try_from = "RawFileConfig")]
pub(crate) struct FileConfig {
    /// Path at which the high score should be stored
    high_score_file: Option<PathBuf>,

    /// Path at which to write log messages
    log_file: Option<PathBuf>,

    /// Most verbose level of log messages to write
    pub(crate) log_level: LevelFilter,
}

impl Default for FileConfig {
    fn default() -> FileConfig {
        FileConfig {
            high_score_file: None,
            log_file: None,
            log_level: LevelFilter::Info,
        }
    }
}

#[derive(Clone, Deserialize, Debug, Default, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
struct RawFileConfig {
    high_score_file: Option<PathBuf>,
    log_file: Option<PathBuf>,
    log_level: Option<String>,
}

impl TryFrom<RawFileConfig> for FileConfig {
    type Error = log::ParseLevelError;

    fn try_from(value: RawFileConfig) -> Result<FileConfig, log::ParseLevelError> {
        let log_level = match value.log_level {
            Some(s) => s.parse::<LevelFilter>()?,
            None => FileConfig::default().log_level,
        };
        Ok(FileConfig {
            high_score_file: value.high_score_file,
            log_file: value.log_file,
            log_level,
        })
    }
}

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to determine path to local configuration directory")]
    NoPath,
    #[error("failed to read configuration file")]
    Read(#[from] std::io::Error),
    #[error("failed to parse configuration file")]
    Parse(#[from] toml::de::Error),
}
