//! Service account identity naming.
//!
//! Service accounts authenticate as users named
//! `system:serviceaccount:<namespace>:<name>`. Policy code never builds these
//! strings itself; it goes through a [`ServiceAccountNamer`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{BulwarkError, BulwarkResult};

/// Prefix shared by every service account username.
pub const SERVICE_ACCOUNT_USERNAME_PREFIX: &str = "system:serviceaccount:";

/// Group containing every service account in the cluster.
pub const ALL_SERVICE_ACCOUNTS_GROUP: &str = "system:serviceaccounts";

/// Turns a `(namespace, account)` pair into the username the account
/// authenticates as.
pub trait ServiceAccountNamer {
    /// Build the username for `name` in `namespace`.
    fn make_username(&self, namespace: &str, name: &str) -> String;
}

/// The standard `system:serviceaccount:` naming scheme.
///
/// Performs no validation: an empty namespace yields an empty segment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DefaultServiceAccountNamer;

impl ServiceAccountNamer for DefaultServiceAccountNamer {
    fn make_username(&self, namespace: &str, name: &str) -> String {
        make_username(namespace, name)
    }
}

/// Build a service account username with the standard scheme.
#[must_use]
pub fn make_username(namespace: &str, name: &str) -> String {
    format!("{SERVICE_ACCOUNT_USERNAME_PREFIX}{namespace}:{name}")
}

/// Split a service account username into `(namespace, name)`.
///
/// # Errors
///
/// Returns an error if the prefix is missing or the remainder is not exactly
/// two non-empty, colon-separated parts.
pub fn split_username(username: &str) -> BulwarkResult<(String, String)> {
    let invalid = || BulwarkError::InvalidServiceAccountUsername {
        username: username.to_string(),
    };

    let rest = username
        .strip_prefix(SERVICE_ACCOUNT_USERNAME_PREFIX)
        .ok_or_else(invalid)?;

    let parts: Vec<&str> = rest.split(':').collect();
    match parts.as_slice() {
        [namespace, name] if !namespace.is_empty() && !name.is_empty() => {
            Ok(((*namespace).to_string(), (*name).to_string()))
        }
        _ => Err(invalid()),
    }
}

/// Group containing every service account in `namespace`.
#[must_use]
pub fn namespace_group(namespace: &str) -> String {
    format!("{ALL_SERVICE_ACCOUNTS_GROUP}:{namespace}")
}

/// A validated service account username.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ServiceAccountUsername {
    namespace: String,
    name: String,
}

impl ServiceAccountUsername {
    /// Create a username from its parts.
    #[must_use]
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }

    /// Namespace the account lives in.
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Account name within the namespace.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for ServiceAccountUsername {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&make_username(&self.namespace, &self.name))
    }
}

impl FromStr for ServiceAccountUsername {
    type Err = BulwarkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (namespace, name) = split_username(s)?;
        Ok(Self { namespace, name })
    }
}

impl TryFrom<String> for ServiceAccountUsername {
    type Error = BulwarkError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ServiceAccountUsername> for String {
    fn from(value: ServiceAccountUsername) -> Self {
        value.to_string()
    }
}
