use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Somewhere to keep the best score across games
pub(crate) trait ScoreStore {
    /// Return the stored high score, or 0 if there is none
    fn get(&self) -> u32;

    /// Replace the stored high score
    fn set(&mut self, score: u32);
}

/// A [`ScoreStore`] backed by a JSON file on disk.
///
/// Failures to read or write the file are logged and otherwise ignored: a
/// missing or unreadable file counts as a high score of 0, and a failed write
/// just means the score isn't remembered next time.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct JsonScoreStore {
    path: Option<PathBuf>,
}

impl JsonScoreStore {
    /// Create a store that keeps the high score at `path`.  If `path` is
    /// `None`, the store never holds anything.
    pub(crate) fn new(path: Option<PathBuf>) -> JsonScoreStore {
        JsonScoreStore { path }
    }

    /// Return the default high score file path
    pub(crate) fn default_path() -> Option<PathBuf> {
        dirs::data_local_dir().map(|p| p.join("wordsnake").join("highscore.json"))
    }

    fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn load(&self) -> Result<u32, LoadError> {
        let path = self.path().ok_or_else(LoadError::no_path)?;
        let src = match fs_err::read(path) {
            Ok(src) => src,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(LoadError::read(e)),
        };
        serde_json::from_slice::<HighScoreFile>(&src)
            .map(|hsf| hsf.high_score)
            .map_err(LoadError::deserialize)
    }

    fn save(&self, high_score: u32) -> Result<(), SaveError> {
        let path = self.path().ok_or_else(SaveError::no_path)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs_err::create_dir_all(parent).map_err(SaveError::mkdir)?;
        }
        let mut src =
            serde_json::to_string(&HighScoreFile { high_score }).map_err(SaveError::serialize)?;
        src.push('\n');
        fs_err::write(path, &src).map_err(SaveError::write)?;
        Ok(())
    }
}

impl ScoreStore for JsonScoreStore {
    fn get(&self) -> u32 {
        match self.load() {
            Ok(score) => score,
            Err(e) => {
                log::warn!("{:#}", anyhow::Error::new(e));
                0
            }
        }
    }

    fn set(&mut self, score: u32) {
        match self.save(score) {
            Ok(()) => log::debug!("Saved high score {score}"),
            Err(e) => log::warn!("{:#}", anyhow::Error::new(e)),
        }
    }
}

/// A [`ScoreStore`] that only lasts as long as the process
#[cfg(test)]
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct MemoryScoreStore(pub(crate) u32);

#[cfg(test)]
impl ScoreStore for MemoryScoreStore {
    fn get(&self) -> u32 {
        self.0
    }

    fn set(&mut self, score: u32) {
        self.0 = score;
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
struct HighScoreFile {
    high_score: u32,
}

#[derive(Debug, Error)]
#[error("Failed to save high score to disk")]
pub(crate) struct SaveError(#[source] SaveErrorSource);

impl SaveError {
    fn no_path() -> Self {
        SaveError(SaveErrorSource::NoPath)
    }

    fn mkdir(e: std::io::Error) -> Self {
        SaveError(SaveErrorSource::Mkdir(e))
    }

    fn serialize(e: serde_json::Error) -> Self {
        SaveError(SaveErrorSource::Serialize(e))
    }

    fn write(e: std::io::Error) -> Self {
        SaveError(SaveErrorSource::Write(e))
    }
}

#[derive(Debug, Error)]
enum SaveErrorSource {
    #[error("failed to determine path to local data directory")]
    NoPath,
    #[error("failed to create parent directories")]
    Mkdir(#[source] std::io::Error),
    #[error("failed to serialize high score")]
    Serialize(#[source] serde_json::Error),
    #[error("failed to write high score file")]
    Write(#[source] std::io::Error),
}

#[derive(Debug, Error)]
#[error("Failed to read high score from disk")]
pub(crate) struct LoadError(#[source] LoadErrorSource);

impl LoadError {
    fn no_path() -> Self {
        LoadError(LoadErrorSource::NoPath)
    }

    fn read(e: std::io::Error) -> Self {
        LoadError(LoadErrorSource::Read(e))
    }

    fn deserialize(e: serde_json::Error) -> Self {
        LoadError(LoadErrorSource::Deserialize(e))
    }
}

#[derive(Debug, Error)]
enum LoadErrorSource {
    #[error("failed to determine path to local data directory")]
    NoPath,
    #[error("failed to read high score file")]
    Read(#[source] std::io::Error),
    #[error("failed to deserialize high score")]
    Deserialize(#[source] serde_json::Error),
}
