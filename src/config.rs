use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::interpreter::DEFAULT_MAX_INCLUDE_DEPTH;
use crate::page::{DEFAULT_BOX_HEIGHT, DEFAULT_BOX_WIDTH};

const CONFIG_PATH_ENV_VAR: &str = "CALIN_CONFIG_FILE";

pub(crate) fn find_configfile_locations() -> Vec<PathBuf> {
    let mut locations = Vec::new();

    if let Ok(path) = env::var(CONFIG_PATH_ENV_VAR) {
        locations.push(PathBuf::from(path));
    }

    if let Some(dir) = dirs::config_dir() {
        locations.push(dir.join("calin").join("config.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        locations.push(home.join(".calin.toml"));
    }

    locations
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub box_width: usize,
    pub box_height: usize,
    pub max_include_depth: usize,
    /// Directory that description file paths are resolved against.
    pub include_root: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            box_width: DEFAULT_BOX_WIDTH,
            box_height: DEFAULT_BOX_HEIGHT,
            max_include_depth: DEFAULT_MAX_INCLUDE_DEPTH,
            include_root: None,
        }
    }
}

impl FromStr for Config {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        content.parse::<Config>().map_err(|e| {
            let msg = format!(
                "{}: {}",
                path.display(),
                e.message.as_deref().unwrap_or_default()
            );
            e.with_msg(&msg)
        })
    }
}

/// Uses `configfile` if given, else the first existing file among the
/// default locations, else the built-in defaults.
pub fn load_suitable_config(configfile: Option<&Path>) -> Result<Config> {
    if let Some(path) = configfile {
        return Config::from_file(path);
    }

    for path in find_configfile_locations() {
        if path.is_file() {
            log::info!("Using config file '{}'", path.display());
            return Config::from_file(&path);
        }
    }

    log::info!("No config file found, using defaults");
    Ok(Config::default())
}
