//! Runtime module boundary over the registration domain crate.

pub use registration_core::contract;
pub use registration_core::routes;
