//! # devkeep-domain
//!
//! Pure domain model for the devkeep device catalog.
//!
//! ## Responsibilities
//! - Value objects wrapping the primitive device fields (id, name, brand,
//!   state, creation timestamp), each enforcing its own validity rule
//! - The [`Device`](device::Device) entity: construction from untrusted
//!   primitives, partial updates, and the in-use lifecycle guards
//! - The error taxonomy shared by every layer: validation, not-found,
//!   and storage failures
//!
//! ## Dependency rule
//! This crate has **no internal dependencies** and performs no IO.
//! It must never import anything from `app` or the adapter crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod device;
pub mod error;
pub mod time;
