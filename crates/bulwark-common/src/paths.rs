//! Standard filesystem paths for Bulwark.

use std::path::PathBuf;

use once_cell::sync::Lazy;

/// Default configuration directory for Bulwark.
pub static BULWARK_CONFIG_DIR: Lazy<PathBuf> = Lazy::new(|| {
    std::env::var("BULWARK_CONFIG_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from("/etc"))
                .join("bulwark")
        })
});

/// Standard paths used by Bulwark.
#[derive(Debug, Clone)]
pub struct BulwarkPaths {
    /// Configuration directory.
    pub config: PathBuf,
}

impl BulwarkPaths {
    /// Create paths with default locations.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create paths with a custom configuration directory.
    #[must_use]
    pub fn with_config_dir(config: impl Into<PathBuf>) -> Self {
        Self {
            config: config.into(),
        }
    }

    /// Main configuration file.
    #[must_use]
    pub fn config_file(&self) -> PathBuf {
        self.config.join("config.toml")
    }
}

impl Default for BulwarkPaths {
    fn default() -> Self {
        Self {
            config: BULWARK_CONFIG_DIR.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn custom_config_dir() {
        let paths = BulwarkPaths::with_config_dir("/tmp/bulwark");
        assert_eq!(
            paths.config_file(),
            PathBuf::from("/tmp/bulwark/config.toml")
        );
    }
}
