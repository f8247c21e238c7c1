//! Storage port — the repository trait for device persistence.

use std::future::Future;

use devkeep_domain::device::{Device, DeviceId};
use devkeep_domain::error::DevKeepError;

/// Storage-agnostic persistence contract for devices.
///
/// Every implementation must expose the same success and failure
/// semantics: callers never observe a different error taxonomy depending
/// on which backend is wired in. In particular:
///
/// - [`find_by_id`](Self::find_by_id), [`update`](Self::update) and
///   [`delete`](Self::delete) fail with [`DevKeepError::NotFound`] when
///   the identifier has no record;
/// - [`save`](Self::save) fails with a
///   [`DuplicateId`](devkeep_domain::error::ValidationError::DuplicateId)
///   validation error when the identifier already exists;
/// - infrastructure failures surface as [`DevKeepError::Storage`],
///   untransformed.
pub trait DeviceRepository: Send + Sync {
    /// Fetch every stored device.
    fn get_all(&self) -> impl Future<Output = Result<Vec<Device>, DevKeepError>> + Send;

    /// Fetch one device by identifier.
    fn find_by_id(
        &self,
        id: &DeviceId,
    ) -> impl Future<Output = Result<Device, DevKeepError>> + Send;

    /// Persist a new device and return it.
    fn save(&self, device: Device) -> impl Future<Output = Result<Device, DevKeepError>> + Send;

    /// Replace the stored record matching the device's identifier.
    fn update(&self, device: Device) -> impl Future<Output = Result<Device, DevKeepError>> + Send;

    /// Remove the record matching the identifier.
    fn delete(&self, id: &DeviceId) -> impl Future<Output = Result<(), DevKeepError>> + Send;
}
