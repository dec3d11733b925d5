//! # bulwark-api
//!
//! Data model for security context constraints (SCCs).
//!
//! An SCC is a named bundle of host-access flags, identity assignment
//! strategies and capability requirements. Admission evaluates workloads
//! against SCCs; this crate only describes them.
//!
//! Field names serialize the way the cluster API spells them
//! (`allowHostPID`, `seLinuxContext`, `requiredDropCapabilities`), so values
//! round-trip through JSON and YAML manifests unchanged.

#![warn(missing_docs)]

pub mod capability;
pub mod constraints;
pub mod strategy;

pub use capability::Capability;
pub use constraints::{
    DESCRIPTION_ANNOTATION, ObjectMeta, SecurityContextConstraints,
    SecurityContextConstraintsList, TypedSecurityContextConstraints,
};
pub use strategy::{
    FsGroupStrategy, FsGroupStrategyOptions, IdRange, RunAsUserStrategy,
    RunAsUserStrategyOptions, SELinuxContextStrategy, SELinuxContextStrategyOptions,
    SELinuxOptions, SupplementalGroupsStrategy, SupplementalGroupsStrategyOptions,
};
