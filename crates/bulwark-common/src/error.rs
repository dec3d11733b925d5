//! Common error types for Bulwark.

use miette::Diagnostic;
use thiserror::Error;

/// Result type alias using [`BulwarkError`].
pub type BulwarkResult<T> = Result<T, BulwarkError>;

/// Common errors across Bulwark.
///
/// Building the bootstrap catalog never fails; these cover the edges around
/// it (parsing identities and labels, loading config, writing policy files).
#[derive(Error, Diagnostic, Debug)]
pub enum BulwarkError {
    /// A username that is not a service account username.
    #[error("Invalid service account username: {username}")]
    #[diagnostic(
        code(bulwark::identity::invalid_username),
        help("Service account usernames look like 'system:serviceaccount:<namespace>:<name>'")
    )]
    InvalidServiceAccountUsername {
        /// The rejected username.
        username: String,
    },

    /// Unrecognized Linux capability name.
    #[error("Unknown capability: {name}")]
    #[diagnostic(
        code(bulwark::capability::unknown),
        help("Use names like 'KILL', 'SYS_CHROOT' or 'CAP_SETUID'")
    )]
    UnknownCapability {
        /// The rejected capability name.
        name: String,
    },

    /// Malformed SELinux label.
    #[error("Invalid SELinux options: {label}")]
    #[diagnostic(
        code(bulwark::selinux::invalid_options),
        help("SELinux labels look like 'user:role:type' with an optional ':level'")
    )]
    InvalidSELinuxOptions {
        /// The rejected label.
        label: String,
    },

    /// No constraint with the given name.
    #[error("Security context constraint not found: {name}")]
    #[diagnostic(code(bulwark::constraint::not_found))]
    ConstraintNotFound {
        /// The constraint name that was not found.
        name: String,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    #[diagnostic(code(bulwark::io))]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    #[diagnostic(code(bulwark::serialization))]
    Serialization(String),

    /// Configuration error.
    #[error("Configuration error: {message}")]
    #[diagnostic(code(bulwark::config))]
    Config {
        /// The error message.
        message: String,
    },
}

impl From<serde_json::Error> for BulwarkError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for BulwarkError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for BulwarkError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = BulwarkError::ConstraintNotFound {
            name: "superuser".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Security context constraint not found: superuser"
        );
    }

    #[test]
    fn error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: BulwarkError = io_err.into();
        assert!(matches!(err, BulwarkError::Io(_)));
    }

    #[test]
    fn error_from_toml() {
        let toml_err = toml::from_str::<toml::Table>("infra_namespace = ").unwrap_err();
        let err: BulwarkError = toml_err.into();
        assert!(matches!(err, BulwarkError::Config { .. }));
    }
}
