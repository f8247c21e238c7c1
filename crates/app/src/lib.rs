//! # devkeep-app
//!
//! Application layer for the devkeep device catalog.
//!
//! ## Responsibilities
//! - Define the **ports**: the [`DeviceRepository`](ports::DeviceRepository)
//!   trait that storage adapters implement
//! - Implement the **use-cases**: [`DeviceService`](services::DeviceService)
//!   orchestrates domain validation, lifecycle guards, and persistence
//!
//! ## Dependency rule
//! Depends only on `devkeep-domain`. Adapters depend on this crate for the
//! port traits; this crate must never reference an adapter.

pub mod ports;
pub mod services;
