use anyhow::Result;
use gazekit_interaction::{InteractableConfig, InteractorConfig};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};
use tracing::warn;

const DEFAULT_GAZE_PATH: &str = "config/gaze.toml";

/// Settings for the demo interactor and every interactable it builds.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct GazeConfig {
    pub interactor: InteractorConfig,
    /// Applied to every panel in the scene.
    pub interactable: InteractableConfig,
}

impl GazeConfig {
    /// Load gaze configuration from the default path.
    pub fn load() -> Self {
        Self::load_from_path(Path::new(DEFAULT_GAZE_PATH))
    }

    /// Load configuration from an explicit path, falling back to defaults on errors.
    pub fn load_from_path(path: &Path) -> Self {
        let mut config = match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<GazeConfig>(&contents) {
                Ok(cfg) => cfg,
                Err(err) => {
                    warn!("Failed to parse {}: {err}. Using defaults", path.display());
                    GazeConfig::default()
                }
            },
            Err(err) => {
                if path != Path::new(DEFAULT_GAZE_PATH)
                    || err.kind() != std::io::ErrorKind::NotFound
                {
                    warn!("Failed to read {}: {err}. Using defaults", path.display());
                } else {
                    warn!("Gaze config not found at {}. Using defaults", path.display());
                }
                GazeConfig::default()
            }
        };

        if let Err(err) = config.interactor.validate() {
            warn!("{err} in {}. Using default interactor settings", path.display());
            config.interactor = InteractorConfig::default();
        }
        config
    }

    /// Save gaze configuration to an explicit path.
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        let toml = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        Ok(())
    }
}
