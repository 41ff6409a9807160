use std::path::PathBuf;

use crate::app::error::Result;
use crate::config::Config;

pub struct AppContext {
    pub config: Config,
    pub config_path: PathBuf,
}

impl AppContext {
    /// Load the config from `config_path`, or the default location
    pub fn new(config_path: Option<PathBuf>) -> Result<Self> {
        let config_path = match config_path {
            Some(p) => p,
            None => Config::default_config_path()?,
        };
        let config = Config::load_or_create(&config_path)?;

        Ok(Self {
            config,
            config_path,
        })
    }
}
