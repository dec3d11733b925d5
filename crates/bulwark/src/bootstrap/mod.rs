//! Bootstrap security policy.
//!
//! The catalog and its default grants are computed fresh on every call:
//!
//! - [`bootstrap_scc_access`] derives group and user grants for an
//!   infrastructure namespace
//! - [`bootstrap_security_context_constraints`] builds the six default
//!   constraints and appends those grants onto them by name

mod access;
mod constraints;
mod subjects;

use std::collections::BTreeMap;

pub use access::{bootstrap_scc_access, bootstrap_scc_access_with, merge_grants};
pub use constraints::{
    ANY_UID, ANY_UID_PRIORITY, CATALOG_NAMES, HOST_MOUNT_AND_ANY_UID, HOST_NS, NON_ROOT,
    PRIVILEGED, RESTRICTED, bootstrap_security_context_constraints,
};
pub use subjects::{
    AUTHENTICATED_GROUP, CLUSTER_ADMIN_GROUP, INFRA_BUILD_CONTROLLER_SERVICE_ACCOUNT_NAME,
    INFRA_PERSISTENT_VOLUME_BINDER_CONTROLLER_SERVICE_ACCOUNT_NAME, NODES_GROUP,
};

/// Constraint name to the subjects granted it, in grant order.
pub type SubjectGrants = BTreeMap<String, Vec<String>>;
