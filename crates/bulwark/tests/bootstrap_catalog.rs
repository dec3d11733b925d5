//! Integration tests for the bootstrap catalog and its default grants.

use std::collections::BTreeSet;

use bulwark::bootstrap::{
    ANY_UID, ANY_UID_PRIORITY, CATALOG_NAMES, PRIVILEGED, RESTRICTED, SubjectGrants,
    bootstrap_scc_access, bootstrap_scc_access_with, bootstrap_security_context_constraints,
};
use bulwark_api::{Capability, SecurityContextConstraints};
use bulwark_common::ServiceAccountNamer;
use bulwark_common::identity::make_username;
use proptest::prelude::*;

fn named<'a>(
    constraints: &'a [SecurityContextConstraints],
    name: &str,
) -> &'a SecurityContextConstraints {
    constraints
        .iter()
        .find(|scc| scc.name() == name)
        .unwrap_or_else(|| panic!("missing constraint {name}"))
}

#[test]
fn test_required_drops_only_on_restricted_tiers() {
    let constraints =
        bootstrap_security_context_constraints(&SubjectGrants::new(), &SubjectGrants::new());
    let expected: BTreeSet<Capability> = [
        Capability::Kill,
        Capability::Mknod,
        Capability::SysChroot,
        Capability::Setuid,
        Capability::Setgid,
    ]
    .into_iter()
    .collect();

    for scc in &constraints {
        let drops: BTreeSet<Capability> =
            scc.required_drop_capabilities.iter().copied().collect();
        if scc.name() == RESTRICTED || scc.name() == ANY_UID {
            assert_eq!(drops, expected, "{}", scc.name());
            assert!(expected.iter().all(|cap| scc.drops(*cap)), "{}", scc.name());
        } else {
            assert!(drops.is_empty(), "{} drops {drops:?}", scc.name());
            assert!(!scc.drops(Capability::Kill), "{}", scc.name());
        }
        assert!(!scc.drops(Capability::SysAdmin), "{}", scc.name());
    }
}

#[test]
fn test_only_anyuid_has_priority() {
    let constraints =
        bootstrap_security_context_constraints(&SubjectGrants::new(), &SubjectGrants::new());
    for scc in &constraints {
        if scc.name() == ANY_UID {
            assert_eq!(scc.priority, Some(ANY_UID_PRIORITY));
            assert_eq!(scc.priority, Some(10));
        } else {
            assert_eq!(scc.priority, None, "{}", scc.name());
        }
    }
}

#[test]
fn test_calls_are_independent() {
    let (groups, users) = bootstrap_scc_access("openshift-infra");
    let mut first = bootstrap_security_context_constraints(&groups, &users);
    let second = bootstrap_security_context_constraints(&groups, &users);
    assert_eq!(first, second);

    first[0].users.push("mallory".to_string());
    first[0].groups.clear();

    assert_ne!(first, second);
    assert_eq!(
        second[0].users,
        ["system:serviceaccount:openshift-infra:build-controller"]
    );
    assert_eq!(second[0].groups, ["system:cluster-admins", "system:nodes"]);

    let third = bootstrap_security_context_constraints(&groups, &users);
    assert_eq!(third, second);
}

#[test]
fn test_openshift_infra_defaults() {
    struct Recording(std::cell::RefCell<Vec<(String, String)>>);

    impl ServiceAccountNamer for Recording {
        fn make_username(&self, namespace: &str, name: &str) -> String {
            self.0
                .borrow_mut()
                .push((namespace.to_string(), name.to_string()));
            make_username(namespace, name)
        }
    }

    let namer = Recording(std::cell::RefCell::new(Vec::new()));
    let (groups, users) = bootstrap_scc_access_with(&namer, "openshift-infra");

    assert_eq!(groups[PRIVILEGED], ["system:cluster-admins", "system:nodes"]);
    assert_eq!(users[PRIVILEGED].len(), 1);
    assert_eq!(
        users[PRIVILEGED][0],
        make_username("openshift-infra", "build-controller")
    );
    assert!(
        namer
            .0
            .borrow()
            .iter()
            .all(|(namespace, _)| namespace == "openshift-infra")
    );
}

#[test_log::test]
fn test_round_trip_privileged() {
    let (groups, users) = bootstrap_scc_access("ns-a");
    let constraints = bootstrap_security_context_constraints(&groups, &users);

    let privileged = named(&constraints, PRIVILEGED);
    assert_eq!(privileged.groups, ["system:cluster-admins", "system:nodes"]);
    assert_eq!(privileged.users, [make_username("ns-a", "build-controller")]);

    assert_eq!(
        named(&constraints, "hostmount-anyuid").users,
        [make_username("ns-a", "pv-binder-controller")]
    );
    assert_eq!(named(&constraints, ANY_UID).groups, ["system:cluster-admins"]);
    assert_eq!(named(&constraints, RESTRICTED).groups, ["system:authenticated"]);
    assert!(named(&constraints, "nonroot").groups.is_empty());
    assert!(named(&constraints, "hostaccess").users.is_empty());
}

fn arb_grants() -> impl Strategy<Value = SubjectGrants> {
    let name = prop_oneof![
        proptest::sample::select(CATALOG_NAMES.to_vec()).prop_map(str::to_string),
        "[a-z-]{1,12}",
    ];
    proptest::collection::btree_map(name, proptest::collection::vec("[a-z:]{1,8}", 0..4), 0..8)
}

proptest! {
    #[test]
    fn catalog_shape_is_fixed(groups in arb_grants(), users in arb_grants()) {
        let constraints = bootstrap_security_context_constraints(&groups, &users);
        let names: Vec<&str> = constraints.iter().map(SecurityContextConstraints::name).collect();
        prop_assert_eq!(names, CATALOG_NAMES.to_vec());
    }

    #[test]
    fn grants_land_verbatim(groups in arb_grants(), users in arb_grants()) {
        let constraints = bootstrap_security_context_constraints(&groups, &users);
        for scc in &constraints {
            let expected_users = users.get(scc.name()).cloned().unwrap_or_default();
            let expected_groups = groups.get(scc.name()).cloned().unwrap_or_default();
            prop_assert_eq!(&scc.users, &expected_users);
            prop_assert_eq!(&scc.groups, &expected_groups);
        }
    }
}
