use anyhow::Error;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct DataConfig {
    pub delimiter: char,
    pub has_headers: bool,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            has_headers: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    pub predictions_path: PathBuf,
    pub precision: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            predictions_path: PathBuf::from("predictions.txt"),
            precision: 4,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub data: DataConfig,
    pub output: OutputConfig,
    pub log: LogConfig,
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> Result<Self, Error> {
        let parsed: Self = toml::from_str(contents)?;
        Ok(parsed)
    }
}
