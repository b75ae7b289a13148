use std::path::Path;

use crate::config::{AppConfig, LoadedConfig};

pub struct CliContext {
    loaded: LoadedConfig,
}

impl CliContext {
    pub fn new(loaded: LoadedConfig) -> Self {
        Self { loaded }
    }

    pub fn config(&self) -> &AppConfig {
        &self.loaded.config
    }

    pub fn config_path(&self) -> &Path {
        &self.loaded.path
    }

    pub fn config_file_found(&self) -> bool {
        self.loaded.file_found
    }

    pub fn env_overrides(&self) -> &[String] {
        &self.loaded.env_overrides
    }
}
