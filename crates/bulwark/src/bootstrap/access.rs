//! Default subject grants for the bootstrap catalog.

use bulwark_common::{DefaultServiceAccountNamer, ServiceAccountNamer};

use super::SubjectGrants;
use super::constraints::{ANY_UID, HOST_MOUNT_AND_ANY_UID, PRIVILEGED, RESTRICTED};
use super::subjects::{
    AUTHENTICATED_GROUP, CLUSTER_ADMIN_GROUP, INFRA_BUILD_CONTROLLER_SERVICE_ACCOUNT_NAME,
    INFRA_PERSISTENT_VOLUME_BINDER_CONTROLLER_SERVICE_ACCOUNT_NAME, NODES_GROUP,
};

/// Default `(groups, users)` grants for infrastructure controllers running in
/// `infra_namespace`.
///
/// The namespace is not validated; an empty one still yields every key.
#[must_use]
pub fn bootstrap_scc_access(infra_namespace: &str) -> (SubjectGrants, SubjectGrants) {
    bootstrap_scc_access_with(&DefaultServiceAccountNamer, infra_namespace)
}

/// Like [`bootstrap_scc_access`], with service account usernames produced by
/// `namer`.
#[must_use]
pub fn bootstrap_scc_access_with<N>(
    namer: &N,
    infra_namespace: &str,
) -> (SubjectGrants, SubjectGrants)
where
    N: ServiceAccountNamer + ?Sized,
{
    let groups = SubjectGrants::from([
        (
            PRIVILEGED.to_string(),
            vec![CLUSTER_ADMIN_GROUP.to_string(), NODES_GROUP.to_string()],
        ),
        (ANY_UID.to_string(), vec![CLUSTER_ADMIN_GROUP.to_string()]),
        (RESTRICTED.to_string(), vec![AUTHENTICATED_GROUP.to_string()]),
    ]);

    let build_controller =
        namer.make_username(infra_namespace, INFRA_BUILD_CONTROLLER_SERVICE_ACCOUNT_NAME);
    let pv_controller = namer.make_username(
        infra_namespace,
        INFRA_PERSISTENT_VOLUME_BINDER_CONTROLLER_SERVICE_ACCOUNT_NAME,
    );
    let users = SubjectGrants::from([
        (PRIVILEGED.to_string(), vec![build_controller]),
        (HOST_MOUNT_AND_ANY_UID.to_string(), vec![pv_controller]),
    ]);

    (groups, users)
}

/// Append every list in `extra` onto the matching list in `base`.
///
/// Order is preserved and duplicates are kept.
#[must_use]
pub fn merge_grants(mut base: SubjectGrants, extra: &SubjectGrants) -> SubjectGrants {
    for (name, subjects) in extra {
        base.entry(name.clone())
            .or_default()
            .extend(subjects.iter().cloned());
    }
    base
}
