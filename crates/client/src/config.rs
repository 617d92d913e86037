use std::{fs::File, io::Read, path::Path};

use serde::{Deserialize, Serialize};
use xdg::BaseDirectories;

use crate::{Error, Result, DEFAULT_PAGE_LIMIT};

/// Where to find the API, and how to talk to it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Including the version and without a trailing slash,
    /// e.g. `https://studip.example.com/jsonapi.php/v1`
    pub base_url: String,

    #[serde(default = "default_page_limit")]
    pub page_limit: usize,
}

fn default_page_limit() -> usize {
    DEFAULT_PAGE_LIMIT
}

impl Config {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            page_limit: DEFAULT_PAGE_LIMIT,
        }
    }

    /// Load `config.json` from the user's config directories
    pub fn load() -> Result<Self> {
        let path = BaseDirectories::with_prefix("studip-client")?
            .find_config_file("config.json")
            .ok_or(Error::NoConfig)?;

        Self::from_path(&path)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let file = File::open(path)?;

        Self::from_reader(file)
    }

    pub fn from_reader(reader: impl Read) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }
}
