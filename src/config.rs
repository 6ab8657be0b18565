use crate::error::{Error, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Countdown lengths a test can run for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, strum_macros::Display)]
pub enum TestDuration {
    #[strum(to_string = "15s")]
    Fifteen,
    #[default]
    #[strum(to_string = "30s")]
    Thirty,
    #[strum(to_string = "60s")]
    Sixty,
}

impl TestDuration {
    pub const ALL: [TestDuration; 3] = [Self::Fifteen, Self::Thirty, Self::Sixty];

    pub fn secs(self) -> u32 {
        match self {
            Self::Fifteen => 15,
            Self::Thirty => 30,
            Self::Sixty => 60,
        }
    }

    /// Next option in the 15 -> 30 -> 60 -> 15 cycle
    pub fn cycle(self) -> Self {
        match self {
            Self::Fifteen => Self::Thirty,
            Self::Thirty => Self::Sixty,
            Self::Sixty => Self::Fifteen,
        }
    }
}

impl TryFrom<u64> for TestDuration {
    type Error = Error;

    fn try_from(secs: u64) -> Result<Self> {
        match secs {
            15 => Ok(Self::Fifteen),
            30 => Ok(Self::Thirty),
            60 => Ok(Self::Sixty),
            other => Err(Error::InvalidDuration(other)),
        }
    }
}

impl FromStr for TestDuration {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim().trim_end_matches('s');
        let secs = trimmed
            .parse::<u64>()
            .map_err(|_| Error::InvalidDuration(0))?;
        Self::try_from(secs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub duration_secs: u64,
    pub dark_mode: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            duration_secs: TestDuration::default().secs() as u64,
            dark_mode: false,
        }
    }
}

impl Config {
    /// The configured duration, or the default when the stored value is not
    /// one of the supported options.
    pub fn duration(&self) -> TestDuration {
        TestDuration::try_from(self.duration_secs).unwrap_or_else(|err| {
            tracing::warn!(%err, "ignoring configured duration");
            TestDuration::default()
        })
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let path = if let Some(pd) = ProjectDirs::from("", "", "typesprint") {
            pd.config_dir().join("config.json")
        } else {
            PathBuf::from("typesprint_config.json")
        };
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        match fs::read(&self.path) {
            Ok(bytes) => serde_json::from_slice::<Config>(&bytes).unwrap_or_else(|err| {
                tracing::warn!(path = %self.path.display(), %err, "malformed config, using defaults");
                Config::default()
            }),
            Err(_) => Config::default(),
        }
    }

    fn save(&self, cfg: &Config) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg)?;
        fs::write(&self.path, data)?;
        tracing::debug!(path = %self.path.display(), "config saved");
        Ok(())
    }
}
