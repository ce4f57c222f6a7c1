use crate::error::{Error, Result};
use serde_derive::Deserialize;
use std::{
    fmt, fs,
    path::{Path, PathBuf},
};

pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const DEFAULT_ARTIFACT_NAME: &str = "comment";

pub const TOKEN_VAR: &str = "GITHUB_TOKEN";
pub const API_URL_VAR: &str = "GITHUB_API_URL";
pub const EVENT_PATH_VAR: &str = "GITHUB_EVENT_PATH";

/// A GitHub token. Never shows up in `Debug` output.
#[derive(PartialEq, Eq, Clone, Deserialize)]
#[serde(transparent)]
pub struct Token(pub String);

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Token([REDACTED])")
    }
}

#[derive(PartialEq, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GithubConfig {
    pub api_url: String,
    pub token: Option<Token>,
}

impl Default for GithubConfig {
    fn default() -> Self {
        GithubConfig {
            api_url: DEFAULT_API_URL.to_owned(),
            token: None,
        }
    }
}

/// Layout of the bundle the upstream workflow uploads.
#[derive(PartialEq, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ArtifactConfig {
    pub name: String,
    pub number_file: PathBuf,
    pub body_file: PathBuf,
}

impl Default for ArtifactConfig {
    fn default() -> Self {
        ArtifactConfig {
            name: DEFAULT_ARTIFACT_NAME.to_owned(),
            number_file: PathBuf::from("pr_number"),
            body_file: PathBuf::from("result"),
        }
    }
}

#[derive(PartialEq, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TriggerConfig {
    pub events: Vec<String>,
}

impl Default for TriggerConfig {
    fn default() -> Self {
        TriggerConfig {
            events: vec!["pull_request".to_owned()],
        }
    }
}

impl TriggerConfig {
    pub fn accepts(&self, event: &str) -> bool {
        self.events.iter().any(|e| e == event)
    }
}

#[derive(PartialEq, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub work_dir: PathBuf,
    pub github: GithubConfig,
    pub artifact: ArtifactConfig,
    pub trigger: TriggerConfig,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            work_dir: PathBuf::from("."),
            github: GithubConfig::default(),
            artifact: ArtifactConfig::default(),
            trigger: TriggerConfig::default(),
        }
    }
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(file_path: P) -> Result<Self> {
        let config_s = fs::read_to_string(&file_path)?;
        let config: Config = toml::from_str(&config_s).map_err(|e| {
            Error::Config(format!("{}: {}", file_path.as_ref().display(), e))
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml(s: &str) -> Result<Self> {
        let config: Config = toml::from_str(s).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Overlays values found through `lookup`, normally `std::env::var`.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(token) = lookup(TOKEN_VAR).filter(|t| !t.is_empty()) {
            self.github.token = Some(Token(token));
        }
        if let Some(api_url) = lookup(API_URL_VAR).filter(|u| !u.is_empty()) {
            self.github.api_url = api_url;
        }
    }

    pub fn token(&self) -> Result<&Token> {
        self.github.token.as_ref().ok_or_else(|| {
            Error::Config(format!(
                "no GitHub token configured, set {} or github.token",
                TOKEN_VAR
            ))
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.artifact.name.is_empty() {
            return Err(Error::Config("artifact.name must not be empty".to_owned()));
        }
        if self.artifact.number_file == self.artifact.body_file {
            return Err(Error::Config(
                "artifact.number_file and artifact.body_file must differ".to_owned(),
            ));
        }
        if self.trigger.events.is_empty() {
            return Err(Error::Config(
                "trigger.events must list at least one event".to_owned(),
            ));
        }
        Ok(())
    }
}
