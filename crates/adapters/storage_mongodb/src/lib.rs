//! # devkeep-adapter-storage-mongodb
//!
//! MongoDB persistence adapter using the official
//! [mongodb](https://docs.rs/mongodb) driver.
//!
//! ## Responsibilities
//! - Implement [`DeviceRepository`](devkeep_app::ports::DeviceRepository)
//!   against a `devices` collection keyed by the domain id
//! - Own the connection lifecycle: lazy, memoized, shared across
//!   concurrent first callers
//! - Ensure the unique/secondary/compound indexes on first connection
//! - Map between domain primitives and BSON documents
//!
//! ## Dependency rule
//! Depends on `devkeep-app` (for the port trait) and `devkeep-domain`
//! (for domain types). Neither must ever reference this adapter.

pub mod config;
pub mod device_repo;
pub mod error;
pub mod store;

pub use config::MongoConfig;
pub use device_repo::MongoDeviceRepository;
pub use error::StorageError;
pub use store::MongoStore;
