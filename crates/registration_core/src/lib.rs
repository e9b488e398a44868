//! Shared member-registration domain primitives.
//!
//! This crate owns the registration request/response contracts, the
//! persisted record shapes, and route identification. It intentionally
//! excludes AWS SDK and Lambda runtime concerns.

pub mod contract;
pub mod routes;
