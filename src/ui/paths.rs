use std::fs;
use std::io;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "image-processor";

/// Per-user directories of the application
///
/// - Linux: ~/.local/share/image-processor/{logs,output}, ~/.config/image-processor/settings.json
/// - macOS: ~/Library/Application Support/image-processor/...
/// - Windows: %APPDATA%\image-processor\...
#[derive(Debug, Clone)]
pub struct AppDirs {
    /// Diagnostic log and the action log
    pub logs: PathBuf,
    /// Default location offered by the save dialog
    pub output: PathBuf,
    pub settings_file: PathBuf,
}

impl AppDirs {
    /// Resolve the platform directories, falling back to the home directory
    /// and then the working directory
    pub fn resolve() -> Self {
        let fallback = || dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        let data = dirs::data_dir().unwrap_or_else(fallback).join(APP_DIR);
        let config = dirs::config_dir().unwrap_or_else(fallback).join(APP_DIR);
        Self::under(&data, &config)
    }

    /// Layout rooted at explicit data and config directories
    pub fn under(data: &Path, config: &Path) -> Self {
        Self {
            logs: data.join("logs"),
            output: data.join("output"),
            settings_file: config.join("settings.json"),
        }
    }

    /// Create the service directories on first run
    pub fn create(&self) -> io::Result<()> {
        fs::create_dir_all(&self.logs)?;
        fs::create_dir_all(&self.output)?;
        if let Some(parent) = self.settings_file.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(())
    }
}
