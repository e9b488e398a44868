//! AWS-oriented adapters and handlers for the member registration API.
//!
//! This crate owns runtime integration details (the Lambda router handler
//! and the document-store adapter seam) and exposes a single runtime module
//! boundary for the registration contract and route primitives.

pub mod adapters;
pub mod handlers;
pub mod runtime;
