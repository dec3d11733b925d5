//! The default security context constraints catalog.

use bulwark_api::{
    Capability, DESCRIPTION_ANNOTATION, FsGroupStrategy, ObjectMeta, RunAsUserStrategy,
    SELinuxContextStrategy, SecurityContextConstraints, SupplementalGroupsStrategy,
};

use super::SubjectGrants;

/// All privileged and host features, any user, group or SELinux context.
pub const PRIVILEGED: &str = "privileged";
const PRIVILEGED_DESC: &str = "privileged allows access to all privileged and host features and the ability to run as any user, any group, any fsGroup, and with any SELinux context.  WARNING: this is the most relaxed SCC and should be used only for cluster administration. Grant with caution.";

/// No host features; UID and SELinux context allocated to the namespace.
pub const RESTRICTED: &str = "restricted";
const RESTRICTED_DESC: &str = "restricted denies access to all host features and requires pods to be run with a UID, and SELinux context that are allocated to the namespace.  This is the most restrictive SCC.";

/// Like `restricted`, but any non-root UID.
pub const NON_ROOT: &str = "nonroot";
const NON_ROOT_DESC: &str = "nonroot provides all features of the restricted SCC but allows users to run with any non-root UID.  The user must specify the UID or it must be specified on the by the manifest of the container runtime.";

/// Like `restricted`, plus host mounts and any UID.
pub const HOST_MOUNT_AND_ANY_UID: &str = "hostmount-anyuid";
const HOST_MOUNT_AND_ANY_UID_DESC: &str = "hostmount-anyuid provides all the features of the restricted SCC but allows host mounts and any UID by a pod.  This is primarily used by the persistent volume recycler. WARNING: this SCC allows host file system access as any UID, including UID 0.  Grant with caution.";

/// All host namespaces, UID and SELinux context still allocated.
pub const HOST_NS: &str = "hostaccess";
const HOST_NS_DESC: &str = "hostaccess allows access to all host namespaces but still requires pods to be run with a UID and SELinux context that are allocated to the namespace. WARNING: this SCC allows host access to namespaces, file systems, and PIDS.  It should only be used by trusted pods.  Grant with caution.";

/// Like `restricted`, but any UID and GID.
pub const ANY_UID: &str = "anyuid";
const ANY_UID_DESC: &str = "anyuid provides all features of the restricted SCC but allows users to run with any UID and any GID.  This is the default SCC for authenticated users.";

/// Priority of `anyuid`. Leaves room below for admin-defined priorities.
pub const ANY_UID_PRIORITY: i32 = 10;

/// Catalog names, in catalog order.
pub const CATALOG_NAMES: [&str; 6] = [
    PRIVILEGED,
    RESTRICTED,
    NON_ROOT,
    HOST_MOUNT_AND_ANY_UID,
    HOST_NS,
    ANY_UID,
];

const UNSAFE_CAPABILITIES: [Capability; 5] = [
    Capability::Kill,
    Capability::Mknod,
    Capability::SysChroot,
    Capability::Setuid,
    Capability::Setgid,
];

/// Build the default constraints and append the given grants to them.
///
/// `groups` and `users` map constraint names to subjects. Subjects are
/// appended in order without de-duplication; names outside the catalog are
/// ignored. Every call returns freshly built values.
#[must_use]
pub fn bootstrap_security_context_constraints(
    groups: &SubjectGrants,
    users: &SubjectGrants,
) -> Vec<SecurityContextConstraints> {
    let mut constraints = vec![
        SecurityContextConstraints {
            allow_privileged_container: true,
            allow_host_dir_volume_plugin: true,
            allow_host_network: true,
            allow_host_ports: true,
            allow_host_pid: true,
            allow_host_ipc: true,
            ..base(
                PRIVILEGED,
                PRIVILEGED_DESC,
                SELinuxContextStrategy::RunAsAny,
                RunAsUserStrategy::RunAsAny,
            )
        },
        SecurityContextConstraints {
            required_drop_capabilities: UNSAFE_CAPABILITIES.to_vec(),
            ..base(
                RESTRICTED,
                RESTRICTED_DESC,
                SELinuxContextStrategy::MustRunAs,
                RunAsUserStrategy::MustRunAsRange,
            )
        },
        // UID comes from the pod or from the image's USER directive.
        base(
            NON_ROOT,
            NON_ROOT_DESC,
            SELinuxContextStrategy::MustRunAs,
            RunAsUserStrategy::MustRunAsNonRoot,
        ),
        // Used by the persistent volume recycler.
        SecurityContextConstraints {
            allow_host_dir_volume_plugin: true,
            ..base(
                HOST_MOUNT_AND_ANY_UID,
                HOST_MOUNT_AND_ANY_UID_DESC,
                SELinuxContextStrategy::MustRunAs,
                RunAsUserStrategy::RunAsAny,
            )
        },
        SecurityContextConstraints {
            allow_host_dir_volume_plugin: true,
            allow_host_network: true,
            allow_host_ports: true,
            allow_host_pid: true,
            allow_host_ipc: true,
            ..base(
                HOST_NS,
                HOST_NS_DESC,
                SELinuxContextStrategy::MustRunAs,
                RunAsUserStrategy::MustRunAsRange,
            )
        },
        // Preferred over constraints that force a UID.
        SecurityContextConstraints {
            priority: Some(ANY_UID_PRIORITY),
            required_drop_capabilities: UNSAFE_CAPABILITIES.to_vec(),
            ..base(
                ANY_UID,
                ANY_UID_DESC,
                SELinuxContextStrategy::MustRunAs,
                RunAsUserStrategy::RunAsAny,
            )
        },
    ];

    for name in groups.keys().chain(users.keys()) {
        if !CATALOG_NAMES.contains(&name.as_str()) {
            tracing::debug!(constraint = %name, "Ignoring grant for unknown constraint");
        }
    }

    for scc in &mut constraints {
        if let Some(to_add) = users.get(scc.name()) {
            scc.users.extend(to_add.iter().cloned());
        }
        if let Some(to_add) = groups.get(scc.name()) {
            scc.groups.extend(to_add.iter().cloned());
        }
        tracing::debug!(
            constraint = %scc.name(),
            users = scc.users.len(),
            groups = scc.groups.len(),
            "Applied default access"
        );
    }

    constraints
}

/// A constraint with no host access, no grants and `RunAsAny` group
/// strategies. emptyDir volumes are allowed for every catalog entry.
fn base(
    name: &str,
    description: &str,
    se_linux: SELinuxContextStrategy,
    run_as_user: RunAsUserStrategy,
) -> SecurityContextConstraints {
    SecurityContextConstraints {
        metadata: ObjectMeta::new(name).with_annotation(DESCRIPTION_ANNOTATION, description),
        priority: None,
        allow_privileged_container: false,
        allow_host_dir_volume_plugin: false,
        allow_empty_dir_volume_plugin: true,
        allow_host_network: false,
        allow_host_ports: false,
        allow_host_pid: false,
        allow_host_ipc: false,
        required_drop_capabilities: Vec::new(),
        se_linux_context: se_linux.into(),
        run_as_user: run_as_user.into(),
        fs_group: FsGroupStrategy::RunAsAny.into(),
        supplemental_groups: SupplementalGroupsStrategy::RunAsAny.into(),
        users: Vec::new(),
        groups: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grants(entries: &[(&str, &[&str])]) -> SubjectGrants {
        entries
            .iter()
            .map(|(name, subjects)| {
                (
                    (*name).to_string(),
                    subjects.iter().map(|s| (*s).to_string()).collect(),
                )
            })
            .collect()
    }

    fn find<'a>(
        constraints: &'a [SecurityContextConstraints],
        name: &str,
    ) -> &'a SecurityContextConstraints {
        constraints.iter().find(|scc| scc.name() == name).unwrap()
    }

    #[test]
    fn test_catalog_order() {
        let constraints =
            bootstrap_security_context_constraints(&SubjectGrants::new(), &SubjectGrants::new());
        let names: Vec<_> = constraints.iter().map(SecurityContextConstraints::name).collect();
        assert_eq!(names, CATALOG_NAMES);
    }

    #[test]
    fn test_empty_grants() {
        let constraints =
            bootstrap_security_context_constraints(&SubjectGrants::new(), &SubjectGrants::new());
        for scc in &constraints {
            assert!(scc.users.is_empty(), "{} has users", scc.name());
            assert!(scc.groups.is_empty(), "{} has groups", scc.name());
        }
    }

    #[test]
    fn test_every_entry_is_described() {
        let constraints =
            bootstrap_security_context_constraints(&SubjectGrants::new(), &SubjectGrants::new());
        for scc in &constraints {
            let description = scc.description().unwrap();
            assert!(description.starts_with(scc.name()));
            assert!(scc.allow_empty_dir_volume_plugin);
        }
    }

    #[test]
    fn test_strategies() {
        let constraints =
            bootstrap_security_context_constraints(&SubjectGrants::new(), &SubjectGrants::new());

        let privileged = find(&constraints, PRIVILEGED);
        assert!(privileged.allow_privileged_container);
        assert!(privileged.allow_host_ipc);
        assert!(!privileged.requires_namespace_allocation());

        let nonroot = find(&constraints, NON_ROOT);
        assert_eq!(nonroot.run_as_user.type_, RunAsUserStrategy::MustRunAsNonRoot);
        assert!(!nonroot.allow_host_dir_volume_plugin);

        let hostmount = find(&constraints, HOST_MOUNT_AND_ANY_UID);
        assert!(hostmount.allow_host_dir_volume_plugin);
        assert!(!hostmount.allow_host_network);
        assert_eq!(hostmount.run_as_user.type_, RunAsUserStrategy::RunAsAny);

        let hostaccess = find(&constraints, HOST_NS);
        assert!(hostaccess.allow_host_pid);
        assert!(!hostaccess.allow_privileged_container);
        assert_eq!(hostaccess.run_as_user.type_, RunAsUserStrategy::MustRunAsRange);

        for scc in &constraints {
            assert_eq!(scc.fs_group.type_, FsGroupStrategy::RunAsAny);
            assert_eq!(
                scc.supplemental_groups.type_,
                SupplementalGroupsStrategy::RunAsAny
            );
            if scc.name() != PRIVILEGED {
                assert_eq!(scc.se_linux_context.type_, SELinuxContextStrategy::MustRunAs);
                assert!(scc.requires_namespace_allocation());
            }
        }
    }

    #[test]
    fn test_grants_are_appended_in_order() {
        let groups = grants(&[(RESTRICTED, &["team-a", "team-b", "team-a"])]);
        let users = grants(&[(ANY_UID, &["bob", "alice"])]);
        let constraints = bootstrap_security_context_constraints(&groups, &users);

        assert_eq!(find(&constraints, RESTRICTED).groups, ["team-a", "team-b", "team-a"]);
        assert_eq!(find(&constraints, ANY_UID).users, ["bob", "alice"]);
        assert!(find(&constraints, ANY_UID).groups.is_empty());
    }

    #[test]
    fn test_unknown_names_are_ignored() {
        let groups = grants(&[("nonexistent", &["x"])]);
        let users = grants(&[("nonexistent", &["y"])]);
        let constraints = bootstrap_security_context_constraints(&groups, &users);

        assert_eq!(constraints.len(), 6);
        assert!(constraints.iter().all(|scc| scc.users.is_empty() && scc.groups.is_empty()));
    }
}
