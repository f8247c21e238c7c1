//! # devkeep-adapter-storage-memory
//!
//! In-memory implementation of
//! [`DeviceRepository`](devkeep_app::ports::DeviceRepository), for fast
//! local development and tests. Nothing survives a process restart.
//!
//! Devices are held as an ordered sequence and looked up by a linear scan
//! on identifier equality, matching the document store's semantics:
//! `find_by_id`/`update`/`delete` fail with `NotFound` for unknown ids and
//! `save` rejects duplicate identifiers.

use std::future::Future;
use std::sync::{Mutex, PoisonError};

use devkeep_app::ports::DeviceRepository;
use devkeep_domain::device::{Device, DeviceId};
use devkeep_domain::error::{DevKeepError, NotFoundError, ValidationError};

/// Process-local device repository.
#[derive(Default)]
pub struct InMemoryDeviceRepository {
    devices: Mutex<Vec<Device>>,
}

impl InMemoryDeviceRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Device>> {
        // a poisoned lock only means another caller panicked mid-operation;
        // the Vec itself is always left in a consistent state
        self.devices.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl DeviceRepository for InMemoryDeviceRepository {
    fn get_all(&self) -> impl Future<Output = Result<Vec<Device>, DevKeepError>> + Send {
        let result = self.lock().clone();
        async { Ok(result) }
    }

    fn find_by_id(
        &self,
        id: &DeviceId,
    ) -> impl Future<Output = Result<Device, DevKeepError>> + Send {
        let result = self
            .lock()
            .iter()
            .find(|device| device.id() == id)
            .cloned()
            .ok_or_else(|| NotFoundError::device(id.as_str()).into());
        async { result }
    }

    fn save(&self, device: Device) -> impl Future<Output = Result<Device, DevKeepError>> + Send {
        let mut devices = self.lock();
        let result = if devices.iter().any(|stored| stored.id() == device.id()) {
            Err(ValidationError::DuplicateId {
                id: device.id().to_string(),
            }
            .into())
        } else {
            devices.push(device.clone());
            Ok(device)
        };
        drop(devices);
        async { result }
    }

    fn update(&self, device: Device) -> impl Future<Output = Result<Device, DevKeepError>> + Send {
        let mut devices = self.lock();
        let result = match devices.iter().position(|stored| stored.id() == device.id()) {
            Some(index) => {
                devices[index] = device.clone();
                Ok(device)
            }
            None => Err(NotFoundError::device(device.id().as_str()).into()),
        };
        drop(devices);
        async { result }
    }

    fn delete(&self, id: &DeviceId) -> impl Future<Output = Result<(), DevKeepError>> + Send {
        let mut devices = self.lock();
        let result = match devices.iter().position(|stored| stored.id() == id) {
            Some(index) => {
                devices.remove(index);
                Ok(())
            }
            None => Err(NotFoundError::device(id.as_str()).into()),
        };
        drop(devices);
        async { result }
    }
}
