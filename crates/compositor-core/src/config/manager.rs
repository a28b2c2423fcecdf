//! Persisting compositor configuration as RON files

use std::path::{Path, PathBuf};

use thiserror::Error;

use super::CompositorConfig;

/// Configuration error types
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// IO error during file operations
    #[error("IO error: {0}")]
    Io(String),
    /// Error during serialization
    #[error("Serialization error: {0}")]
    Serialize(String),
    /// Error during deserialization
    #[error("Deserialization error: {0}")]
    Deserialize(String),
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Compositor configuration bound to the RON file it was read from.
///
/// Edits go through [`ConfigManager::update`], which records that the file
/// is stale; [`ConfigManager::save`] writes it back only in that case.
pub struct ConfigManager {
    config: CompositorConfig,
    path: PathBuf,
    stale: bool,
}

impl ConfigManager {
    /// Reads the configuration at `path`.
    ///
    /// A missing file yields the defaults. A file that exists but cannot be
    /// read or parsed is an error, so a typo never silently resets settings.
    pub fn load(path: impl Into<PathBuf>) -> ConfigResult<Self> {
        let path = path.into();
        let config = match std::fs::read_to_string(&path) {
            Ok(content) => {
                let config = CompositorConfig::from_ron(&content)?;
                tracing::info!("Loaded compositor config from {:?}", path);
                config
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("No compositor config at {:?}, using defaults", path);
                CompositorConfig::new()
            }
            Err(e) => return Err(ConfigError::Io(e.to_string())),
        };

        Ok(Self {
            config,
            path,
            stale: false,
        })
    }

    pub fn config(&self) -> &CompositorConfig {
        &self.config
    }

    /// Applies `edit` to the configuration.
    pub fn update(&mut self, edit: impl FnOnce(&mut CompositorConfig)) {
        edit(&mut self.config);
        self.stale = true;
    }

    /// True when edits have not been written to disk yet.
    pub fn has_unsaved_changes(&self) -> bool {
        self.stale
    }

    /// Writes pending edits, creating parent directories as needed.
    pub fn save(&mut self) -> ConfigResult<()> {
        if !self.stale {
            return Ok(());
        }

        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir).map_err(|e| ConfigError::Io(e.to_string()))?;
        }
        std::fs::write(&self.path, self.config.to_ron()?)
            .map_err(|e| ConfigError::Io(e.to_string()))?;

        tracing::debug!("Wrote compositor config to {:?}", self.path);
        self.stale = false;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
