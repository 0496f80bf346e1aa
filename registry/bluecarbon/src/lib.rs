//! # Blue Carbon Registry
//!
//! Records, compiled-in catalogs and derived metrics for the blue carbon
//! registry admin console.
//!
//! | Area          | Module(s)                                   |
//! |---------------|---------------------------------------------|
//! | Map projects  | [`types`], [`invariants`], [`summary`]      |
//! | Review queue  | [`queue`]                                   |
//! | Accounts      | [`users`]                                   |
//! | Marketplace   | [`market`]                                  |
//! | Charts        | [`series`]                                  |
//! | Sample data   | [`catalog`]                                 |
//! | List screens  | [`filter`], [`format`]                      |
//!
//! ## Architecture
//!
//! The crate holds no state. Every catalog accessor returns a fresh owned
//! copy, every derived metric is a pure function, and every check returns a
//! [`RegistryError`] instead of panicking so callers can skip bad records
//! and keep the rest.

pub mod catalog;
pub mod errors;
pub mod filter;
pub mod format;
pub mod invariants;
pub mod market;
pub mod queue;
pub mod series;
pub mod summary;
pub mod types;
pub mod users;

#[cfg(test)]
mod test_catalog;

pub use errors::{RegistryError, Result};
pub use summary::{retirement_rate, CatalogSummary};
pub use types::{Activity, ActivityKind, LngLat, Project, ProjectStatus, VerificationStatus};

