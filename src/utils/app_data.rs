use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const APP_NAME: &str = "pipview";
const CONFIG_FILE: &str = "config.json";
const DOCUMENTS_DIR: &str = "documents";

/// Application configuration stored in the app data directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Where saved documents live. Defaults to `<app data>/documents`.
    #[serde(default)]
    pub store_dir: Option<PathBuf>,

    /// Print node descriptions in tree output
    #[serde(default = "default_show_descriptions")]
    pub show_descriptions: bool,

    /// Spaces per tree level in tree output
    #[serde(default = "default_indent_width")]
    pub indent_width: usize,
}

fn default_show_descriptions() -> bool {
    true
}

fn default_indent_width() -> usize {
    2
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            store_dir: None,
            show_descriptions: default_show_descriptions(),
            indent_width: default_indent_width(),
        }
    }
}

impl AppConfig {
    /// Load config from the app data directory, or return default if not found
    pub fn load() -> Result<Self> {
        Self::load_from(&get_config_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = fs::read_to_string(config_path)
                .with_context(|| format!("Failed to read config file {}", config_path.display()))?;
            let config: AppConfig =
                serde_json::from_str(&content).context("Failed to parse config file")?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Resolve the document store directory, creating it if needed
    pub fn effective_store_dir(&self) -> Result<PathBuf> {
        let dir = match &self.store_dir {
            Some(dir) => dir.clone(),
            None => get_app_data_dir()?.join(DOCUMENTS_DIR),
        };
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create store directory {}", dir.display()))?;
        Ok(dir)
    }
}

/// Get the path to the config file
pub fn get_config_path() -> Result<PathBuf> {
    let app_dir = get_app_data_dir()?;
    Ok(app_dir.join(CONFIG_FILE))
}

/// Get the application data directory.
/// `PIPVIEW_HOME` overrides the platform default.
pub fn get_app_data_dir() -> Result<PathBuf> {
    if let Some(home) = std::env::var_os("PIPVIEW_HOME") {
        let dir = PathBuf::from(home);
        fs::create_dir_all(&dir)?;
        return Ok(dir);
    }

    let base = if cfg!(target_os = "macos") {
        dirs::home_dir()
            .map(|h| h.join("Library").join("Application Support"))
    } else if cfg!(target_os = "windows") {
        dirs::data_local_dir()
    } else {
        // Linux/Unix: use XDG_DATA_HOME or ~/.local/share
        dirs::data_dir()
    };

    let base = base.context("Could not determine app data directory")?;
    let app_dir = base.join(APP_NAME);

    fs::create_dir_all(&app_dir)?;
    Ok(app_dir)
}
