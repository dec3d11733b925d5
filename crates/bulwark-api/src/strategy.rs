//! Identity and label assignment strategies.
//!
//! Each strategy is a closed set of modes. Modes other than `RunAsAny` that
//! hand out values (SELinux levels, UID ranges) read them from annotations
//! the admission side places on the target namespace; when those are
//! missing, building the effective strategy fails downstream.

use std::fmt;
use std::str::FromStr;

use bulwark_common::{BulwarkError, BulwarkResult};
use serde::{Deserialize, Serialize};

/// How the SELinux context of a workload is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SELinuxContextStrategy {
    /// Any label, including none.
    RunAsAny,
    /// A label allocated to the namespace.
    MustRunAs,
}

impl SELinuxContextStrategy {
    /// Whether the target namespace must carry allocation annotations.
    #[must_use]
    pub const fn requires_namespace_allocation(self) -> bool {
        matches!(self, Self::MustRunAs)
    }
}

/// How the UID of a workload is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RunAsUserStrategy {
    /// Any UID, including root.
    RunAsAny,
    /// Any non-zero UID, requested by the pod or set by the image.
    MustRunAsNonRoot,
    /// A UID from the range allocated to the namespace.
    MustRunAsRange,
}

impl RunAsUserStrategy {
    /// Whether the target namespace must carry allocation annotations.
    #[must_use]
    pub const fn requires_namespace_allocation(self) -> bool {
        matches!(self, Self::MustRunAsNonRoot | Self::MustRunAsRange)
    }
}

/// How the fsGroup of a workload is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FsGroupStrategy {
    /// Any group.
    RunAsAny,
    /// A group from the configured ranges.
    MustRunAs,
}

/// How supplemental groups of a workload are chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SupplementalGroupsStrategy {
    /// Any groups.
    RunAsAny,
    /// Groups from the configured ranges.
    MustRunAs,
}

/// Inclusive ID range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IdRange {
    /// Lowest ID in the range.
    pub min: i64,
    /// Highest ID in the range.
    pub max: i64,
}

/// An SELinux label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SELinuxOptions {
    /// User component.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub user: String,
    /// Role component.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub role: String,
    /// Type component.
    #[serde(default, rename = "type", skip_serializing_if = "String::is_empty")]
    pub type_: String,
    /// Level component.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub level: String,
}

impl SELinuxOptions {
    /// Create a new label.
    #[must_use]
    pub fn new(user: &str, role: &str, type_: &str, level: Option<&str>) -> Self {
        Self {
            user: user.to_string(),
            role: role.to_string(),
            type_: type_.to_string(),
            level: level.unwrap_or_default().to_string(),
        }
    }

    /// Parse a `user:role:type[:level]` label.
    ///
    /// The level may itself contain colons (`s0:c1,c2`).
    ///
    /// # Errors
    ///
    /// Returns an error if fewer than three components are present.
    pub fn parse(label: &str) -> BulwarkResult<Self> {
        let parts: Vec<&str> = label.splitn(4, ':').collect();

        if parts.len() < 3 {
            return Err(BulwarkError::InvalidSELinuxOptions {
                label: label.to_string(),
            });
        }

        Ok(Self::new(parts[0], parts[1], parts[2], parts.get(3).copied()))
    }
}

impl fmt::Display for SELinuxOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.user, self.role, self.type_)?;
        if !self.level.is_empty() {
            write!(f, ":{}", self.level)?;
        }
        Ok(())
    }
}

impl FromStr for SELinuxOptions {
    type Err = BulwarkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// SELinux strategy plus an optional fixed label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SELinuxContextStrategyOptions {
    /// Strategy mode.
    #[serde(rename = "type")]
    pub type_: SELinuxContextStrategy,
    /// Label to use with `MustRunAs`; the namespace allocation otherwise.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub se_linux_options: Option<SELinuxOptions>,
}

impl From<SELinuxContextStrategy> for SELinuxContextStrategyOptions {
    fn from(type_: SELinuxContextStrategy) -> Self {
        Self {
            type_,
            se_linux_options: None,
        }
    }
}

/// RunAsUser strategy plus optional fixed UID or UID range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunAsUserStrategyOptions {
    /// Strategy mode.
    #[serde(rename = "type")]
    pub type_: RunAsUserStrategy,
    /// Fixed UID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<i64>,
    /// Lower bound of a fixed UID range.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid_range_min: Option<i64>,
    /// Upper bound of a fixed UID range.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid_range_max: Option<i64>,
}

impl From<RunAsUserStrategy> for RunAsUserStrategyOptions {
    fn from(type_: RunAsUserStrategy) -> Self {
        Self {
            type_,
            uid: None,
            uid_range_min: None,
            uid_range_max: None,
        }
    }
}

/// FSGroup strategy plus optional ranges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FsGroupStrategyOptions {
    /// Strategy mode.
    #[serde(rename = "type")]
    pub type_: FsGroupStrategy,
    /// Allowed ranges; empty means the namespace allocation.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ranges: Vec<IdRange>,
}

impl From<FsGroupStrategy> for FsGroupStrategyOptions {
    fn from(type_: FsGroupStrategy) -> Self {
        Self {
            type_,
            ranges: Vec::new(),
        }
    }
}

/// Supplemental groups strategy plus optional ranges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplementalGroupsStrategyOptions {
    /// Strategy mode.
    #[serde(rename = "type")]
    pub type_: SupplementalGroupsStrategy,
    /// Allowed ranges; empty means the namespace allocation.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ranges: Vec<IdRange>,
}

impl From<SupplementalGroupsStrategy> for SupplementalGroupsStrategyOptions {
    fn from(type_: SupplementalGroupsStrategy) -> Self {
        Self {
            type_,
            ranges: Vec::new(),
        }
    }
}
