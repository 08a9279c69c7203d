//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Format, Serialized, Toml},
};
use std::path::PathBuf;

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources.
    ///
    /// Sources merge lowest priority first: built-in defaults, then the
    /// global XDG file (`$XDG_CONFIG_HOME/gavel/config.toml`), then the
    /// project file (`./gavel.toml` or `./.gavel.toml`), then an explicit
    /// `--config` path.
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, Box<figment::Error>> {
        let mut sources: Vec<PathBuf> = Vec::new();
        sources.extend(Self::global_config_path());
        sources.extend(Self::project_config_path());
        sources.extend(config_path.cloned());

        sources
            .iter()
            .filter(|path| path.exists())
            .fold(
                Figment::new().merge(Serialized::defaults(FileConfig::default())),
                |figment, path| figment.merge(Toml::file(path)),
            )
            .extract()
            .map_err(Box::new)
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// Get the global config file path
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("gavel").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        ["gavel.toml", ".gavel.toml"]
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Print the config file locations being used (for debugging)
    pub fn print_config_sources() {
        let marker = |present: bool| if present { "[FOUND]" } else { "[     ]" };

        println!("Configuration sources (in priority order):");
        match Self::project_config_path() {
            Some(path) => println!("  {} Project: {}", marker(true), path.display()),
            None => println!("  {} Project: ./gavel.toml or ./.gavel.toml", marker(false)),
        }
        if let Some(path) = Self::global_config_path() {
            println!("  {} Global:  {}", marker(path.exists()), path.display());
        }
        println!("  {} Default: built-in defaults", marker(false));
    }
}
