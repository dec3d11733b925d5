//! Operator configuration.
//!
//! An optional TOML file layers extra grants over the defaults:
//!
//! ```toml
//! infra_namespace = "openshift-infra"
//!
//! [groups]
//! restricted = ["system:serviceaccounts:ci"]
//!
//! [users]
//! anyuid = ["alice"]
//! ```

use std::path::Path;

use bulwark_common::{BulwarkError, BulwarkPaths, BulwarkResult};
use serde::Deserialize;

use crate::bootstrap::{SubjectGrants, bootstrap_scc_access, merge_grants};

/// Namespace hosting infrastructure controllers when nothing else is set.
pub const DEFAULT_INFRA_NAMESPACE: &str = "openshift-infra";

/// Bulwark configuration file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Namespace hosting infrastructure controllers.
    #[serde(default)]
    pub infra_namespace: Option<String>,

    /// Extra group grants, appended after the defaults.
    #[serde(default)]
    pub groups: SubjectGrants,

    /// Extra user grants, appended after the defaults.
    #[serde(default)]
    pub users: SubjectGrants,
}

impl Config {
    /// Parse a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid configuration.
    pub fn parse(text: &str) -> BulwarkResult<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Load a configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> BulwarkResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| BulwarkError::Config {
            message: format!("failed to read {}: {e}", path.display()),
        })?;
        tracing::debug!(path = %path.display(), "Loaded configuration");
        Self::parse(&text)
    }

    /// Load `path` if given, otherwise the default config file if present.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit path is missing, or if any file that
    /// exists cannot be parsed.
    pub fn resolve(path: Option<&Path>, paths: &BulwarkPaths) -> BulwarkResult<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }

        let default = paths.config_file();
        if default.exists() {
            Self::load(&default)
        } else {
            tracing::debug!(path = %default.display(), "No configuration file, using defaults");
            Ok(Self::default())
        }
    }

    /// Set the infrastructure namespace.
    #[must_use]
    pub fn with_infra_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.infra_namespace = Some(namespace.into());
        self
    }

    /// The effective infrastructure namespace.
    #[must_use]
    pub fn infra_namespace(&self) -> &str {
        self.infra_namespace
            .as_deref()
            .unwrap_or(DEFAULT_INFRA_NAMESPACE)
    }

    /// Default grants for the infrastructure namespace with this file's
    /// grants appended.
    #[must_use]
    pub fn grants(&self) -> (SubjectGrants, SubjectGrants) {
        let (groups, users) = bootstrap_scc_access(self.infra_namespace());
        (
            merge_grants(groups, &self.groups),
            merge_grants(users, &self.users),
        )
    }
}
