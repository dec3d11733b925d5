//! The security context constraints object.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::capability::Capability;
use crate::strategy::{
    FsGroupStrategyOptions, RunAsUserStrategyOptions, SELinuxContextStrategyOptions,
    SupplementalGroupsStrategyOptions,
};

/// Annotation holding the operator-facing description of an object.
pub const DESCRIPTION_ANNOTATION: &str = "kubernetes.io/description";

/// API version written on serialized constraints and lists.
pub const API_VERSION: &str = "v1";

/// Kind written on serialized constraints.
pub const KIND: &str = "SecurityContextConstraints";

/// Object metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectMeta {
    /// Object name, unique among constraints.
    pub name: String,
    /// Free-form annotations.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub annotations: BTreeMap<String, String>,
}

impl ObjectMeta {
    /// Metadata with just a name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            annotations: BTreeMap::new(),
        }
    }

    /// Add an annotation.
    #[must_use]
    pub fn with_annotation(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.annotations.insert(key.into(), value.into());
        self
    }
}

/// Security context constraints.
///
/// Host access flags default to `false` when absent. `users` and `groups`
/// list the subjects allowed to use the constraint, in grant order and
/// without de-duplication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityContextConstraints {
    /// Object metadata.
    pub metadata: ObjectMeta,

    /// Preference among matching constraints. `None` ranks below any value,
    /// and is distinct from `Some(0)`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,

    /// Allow privileged containers.
    #[serde(default)]
    pub allow_privileged_container: bool,
    /// Allow host directory volumes.
    #[serde(default)]
    pub allow_host_dir_volume_plugin: bool,
    /// Allow emptyDir volumes.
    #[serde(default)]
    pub allow_empty_dir_volume_plugin: bool,
    /// Allow the host network namespace.
    #[serde(default)]
    pub allow_host_network: bool,
    /// Allow binding host ports.
    #[serde(default)]
    pub allow_host_ports: bool,
    /// Allow the host PID namespace.
    #[serde(default, rename = "allowHostPID")]
    pub allow_host_pid: bool,
    /// Allow the host IPC namespace.
    #[serde(default, rename = "allowHostIPC")]
    pub allow_host_ipc: bool,

    /// Capabilities always dropped from containers.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required_drop_capabilities: Vec<Capability>,

    /// SELinux context strategy.
    #[serde(rename = "seLinuxContext")]
    pub se_linux_context: SELinuxContextStrategyOptions,
    /// UID strategy.
    pub run_as_user: RunAsUserStrategyOptions,
    /// fsGroup strategy.
    pub fs_group: FsGroupStrategyOptions,
    /// Supplemental groups strategy.
    pub supplemental_groups: SupplementalGroupsStrategyOptions,

    /// Users granted this constraint.
    #[serde(default)]
    pub users: Vec<String>,
    /// Groups granted this constraint.
    #[serde(default)]
    pub groups: Vec<String>,
}

impl SecurityContextConstraints {
    /// Constraint name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    /// Operator-facing description, if annotated.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.metadata
            .annotations
            .get(DESCRIPTION_ANNOTATION)
            .map(String::as_str)
    }

    /// Whether admission needs UID/SELinux allocation annotations on the
    /// target namespace to use this constraint.
    #[must_use]
    pub const fn requires_namespace_allocation(&self) -> bool {
        self.se_linux_context.type_.requires_namespace_allocation()
            || self.run_as_user.type_.requires_namespace_allocation()
    }

    /// Whether `cap` is always dropped.
    #[must_use]
    pub fn drops(&self, cap: Capability) -> bool {
        self.required_drop_capabilities.contains(&cap)
    }
}

/// A constraint with its `apiVersion` and `kind` stamped on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypedSecurityContextConstraints {
    /// Always [`API_VERSION`].
    #[serde(rename = "apiVersion")]
    pub api_version: String,
    /// Always [`KIND`].
    pub kind: String,
    /// The constraint itself.
    #[serde(flatten)]
    pub constraints: SecurityContextConstraints,
}

impl From<SecurityContextConstraints> for TypedSecurityContextConstraints {
    fn from(constraints: SecurityContextConstraints) -> Self {
        Self {
            api_version: API_VERSION.to_string(),
            kind: KIND.to_string(),
            constraints,
        }
    }
}

/// A `List` document of constraints, as written to bootstrap policy files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityContextConstraintsList {
    /// Always [`API_VERSION`].
    #[serde(rename = "apiVersion")]
    pub api_version: String,
    /// Always `List`.
    pub kind: String,
    /// Constraints in catalog order.
    pub items: Vec<TypedSecurityContextConstraints>,
}

impl SecurityContextConstraintsList {
    /// Wrap constraints into a list, keeping their order.
    #[must_use]
    pub fn new(items: impl IntoIterator<Item = SecurityContextConstraints>) -> Self {
        Self {
            api_version: API_VERSION.to_string(),
            kind: "List".to_string(),
            items: items.into_iter().map(Into::into).collect(),
        }
    }
}
