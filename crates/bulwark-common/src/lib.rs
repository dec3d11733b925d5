//! # bulwark-common
//!
//! Shared utilities and types for the Bulwark policy tooling.
//!
//! This crate provides common functionality used across all Bulwark crates:
//! - Service account identity naming
//! - Standard configuration paths
//! - Common error types

#![warn(missing_docs)]

pub mod error;
pub mod identity;
pub mod paths;

pub use error::{BulwarkError, BulwarkResult};
pub use identity::{DefaultServiceAccountNamer, ServiceAccountNamer, ServiceAccountUsername};
pub use paths::BulwarkPaths;
