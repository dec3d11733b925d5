//! # Bulwark
//!
//! Bootstrap security context constraints for multi-tenant clusters.
//!
//! ## Features
//!
//! - **Default catalog**: six constraints, from `privileged` down to `restricted`
//! - **Default grants**: which groups and infrastructure service accounts may use each one
//! - **Policy files**: render the catalog as a JSON or YAML `List`
//!
//! ## Usage
//!
//! ```
//! use bulwark::bootstrap::{bootstrap_scc_access, bootstrap_security_context_constraints};
//!
//! let (groups, users) = bootstrap_scc_access("openshift-infra");
//! let constraints = bootstrap_security_context_constraints(&groups, &users);
//!
//! assert_eq!(constraints.len(), 6);
//! assert_eq!(constraints[0].name(), "privileged");
//! ```

#![warn(missing_docs)]

pub mod bootstrap;
pub mod cli;
pub mod config;

pub use bootstrap::{SubjectGrants, bootstrap_scc_access, bootstrap_security_context_constraints};
pub use config::Config;
