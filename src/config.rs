use std::{path::PathBuf, io::{Error, ErrorKind}, fs, time::Duration};

use home::home_dir;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::shelf::error::Error as ShelfError;

const CONFIG_PATH_RELATIVE: &'static str = ".picshelf";
const CONFIG_FILENAME: &'static str = "config.yml";
const DEFAULT_SERVER: &'static str = "http://localhost:8000/";
pub const SERVER_ENV: &'static str = "PICSHELF_SERVER";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub server: Url,
    pub notice_timeout_secs: u64,
    pub confirm_delete: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server: Url::parse(DEFAULT_SERVER).expect("default server url is valid"),
            notice_timeout_secs: 5,
            confirm_delete: true,
        }
    }
}

impl Config {
    pub fn path() -> Result<PathBuf, Error> {
        let path = home_dir()
            .ok_or(Error::new(ErrorKind::NotFound, "Impossible to get home directory."))?
            .join(CONFIG_PATH_RELATIVE)
            .join(CONFIG_FILENAME);
        Ok(path)
    }

    /// Reads `~/.picshelf/config.yml`; a missing file means defaults.
    pub fn load() -> Result<Config, ShelfError> {
        let path = Self::path()?;
        if !path.exists() {
            debug!("No config at {}, using defaults", path.display());
            return Ok(Config::default());
        }
        let text = fs::read_to_string(&path)?;
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> Result<Config, ShelfError> {
        if text.trim().is_empty() {
            return Ok(Config::default());
        }
        let config = serde_yaml::from_str::<Config>(text)?;
        Ok(config)
    }

    /// Environment first, then the command line; the last one set wins.
    pub fn with_overrides(mut self, env_server: Option<String>, cli_server: Option<Url>) -> Result<Config, ShelfError> {
        if let Some(server) = env_server {
            self.server = Url::parse(&server)?;
        }
        if let Some(server) = cli_server {
            self.server = server;
        }
        Ok(self)
    }

    pub fn notice_timeout(&self) -> Duration {
        Duration::from_secs(self.notice_timeout_secs)
    }
}
