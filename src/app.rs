use std::path::PathBuf;

use crate::cli::{Cli, OutputFormat};
use crate::config::{Config, PROJECT_CONFIG_FILE};
use crate::error::Result;
use crate::search::SearchEngine;

pub struct AppContext {
    pub project_root: PathBuf,
    /// Explicit config file, if one was given
    pub config_path: Option<PathBuf>,
    pub config: Config,
    pub engine: SearchEngine,
    pub robot_mode: bool,
    pub output_format: OutputFormat,
    pub verbosity: u8,
}

impl AppContext {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let project_root = std::env::current_dir()?;
        let config = Config::load(cli.config.as_deref(), &project_root)?;
        Self::with_config(cli, project_root, config)
    }

    pub fn with_config(cli: &Cli, project_root: PathBuf, config: Config) -> Result<Self> {
        let output_format = match cli.requested_format() {
            Some(format) => format,
            None => config.output.format.parse()?,
        };

        Ok(Self {
            engine: SearchEngine::new(&config.search, &config.cache),
            project_root,
            config_path: cli.config.clone(),
            config,
            robot_mode: cli.robot,
            output_format,
            verbosity: cli.verbose,
        })
    }

    /// Whether human output may use ANSI styling.
    #[must_use]
    pub fn use_color(&self) -> bool {
        self.config.output.color && console::colors_enabled()
    }

    /// Config files consulted for this context, in merge order.
    #[must_use]
    pub fn config_sources(&self) -> Vec<PathBuf> {
        if let Some(path) = &self.config_path {
            return vec![path.clone()];
        }
        Config::global_path()
            .into_iter()
            .chain(std::iter::once(self.project_root.join(PROJECT_CONFIG_FILE)))
            .collect()
    }
}
