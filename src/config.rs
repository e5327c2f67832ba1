use crate::generator::{Alphabet, AlphabetError};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Upper bound on `|alphabet| ^ word_length`. The generator itself enforces
/// nothing, so the guard lives here with the rest of the validation.
pub const MAX_COMBINATIONS: usize = 10_000;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub word_length: usize,
    pub letters: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            word_length: 2,
            letters: "asdf".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Alphabet(AlphabetError),
    ZeroLength,
    TooManyCombinations(usize),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Alphabet(e) => write!(f, "{e}"),
            ConfigError::ZeroLength => write!(f, "word length must be at least 1"),
            ConfigError::TooManyCombinations(n) => {
                write!(f, "{n} combinations exceed the limit of {MAX_COMBINATIONS}")
            }
        }
    }
}

impl Error for ConfigError {}

impl From<AlphabetError> for ConfigError {
    fn from(e: AlphabetError) -> Self {
        ConfigError::Alphabet(e)
    }
}

impl Config {
    /// Checks the whole configuration and hands back the parsed alphabet on
    /// success, so callers validate and build in one step.
    pub fn validate(&self) -> Result<Alphabet, ConfigError> {
        if self.word_length == 0 {
            return Err(ConfigError::ZeroLength);
        }
        let alphabet = Alphabet::parse(&self.letters)?;
        // A length that does not even fit in u32 is over the cap by definition;
        // `as u32` would truncate it and could slip through the guard.
        let combinations = u32::try_from(self.word_length)
            .ok()
            .and_then(|exp| alphabet.len().checked_pow(exp))
            .unwrap_or(usize::MAX);
        if combinations > MAX_COMBINATIONS {
            return Err(ConfigError::TooManyCombinations(combinations));
        }
        Ok(alphabet)
    }
}

/// Would `c` be accepted into the letters field? Whitespace and characters
/// already present are rejected as they are typed.
pub fn letters_field_accepts(buffer: &str, c: char) -> bool {
    !c.is_whitespace() && !buffer.contains(c)
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> std::io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let path = if let Some(pd) = ProjectDirs::from("", "", "kombo") {
            pd.config_dir().join("config.json")
        } else {
            PathBuf::from("kombo_config.json")
        };
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        if let Ok(bytes) = fs::read(&self.path) {
            if let Ok(cfg) = serde_json::from_slice::<Config>(&bytes) {
                return cfg;
            }
        }
        Config::default()
    }

    fn save(&self, cfg: &Config) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg).unwrap_or_default();
        fs::write(&self.path, data)
    }
}
