//! Well-known subjects referenced by the default grants.

/// Group of cluster administrators.
pub const CLUSTER_ADMIN_GROUP: &str = "system:cluster-admins";

/// Group of node identities.
pub const NODES_GROUP: &str = "system:nodes";

/// Group every authenticated user belongs to.
pub const AUTHENTICATED_GROUP: &str = "system:authenticated";

/// Service account the build controller runs as.
pub const INFRA_BUILD_CONTROLLER_SERVICE_ACCOUNT_NAME: &str = "build-controller";

/// Service account the persistent volume binder runs as.
pub const INFRA_PERSISTENT_VOLUME_BINDER_CONTROLLER_SERVICE_ACCOUNT_NAME: &str =
    "pv-binder-controller";
