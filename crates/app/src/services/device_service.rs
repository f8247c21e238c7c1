//! Device service — use-cases for managing the device catalog.

use serde::Serialize;

use devkeep_domain::device::{Device, DeviceId, DevicePatch, DevicePrimitives};
use devkeep_domain::error::{DevKeepError, ValidationError};

use crate::ports::DeviceRepository;

/// Exact-match listing filter. Empty fields match everything.
#[derive(Debug, Clone, Default)]
pub struct DeviceFilter {
    pub brand: Option<String>,
    pub state: Option<String>,
    pub name: Option<String>,
}

impl DeviceFilter {
    fn matches(&self, device: &DevicePrimitives) -> bool {
        self.brand.as_ref().is_none_or(|b| *b == device.brand)
            && self.state.as_ref().is_none_or(|s| *s == device.state)
            && self.name.as_ref().is_none_or(|n| *n == device.name)
    }
}

/// Listing result: the matching devices plus their count.
#[derive(Debug, Clone, Serialize)]
pub struct DeviceList {
    pub total: usize,
    pub data: Vec<DevicePrimitives>,
}

/// Application service for device CRUD operations.
pub struct DeviceService<R> {
    repo: R,
}

impl<R: DeviceRepository> DeviceService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Create a new device from untrusted primitives and persist it.
    ///
    /// # Errors
    ///
    /// Returns [`DevKeepError::Validation`] when any mandatory field is
    /// missing or invalid, or a storage error from the repository.
    #[tracing::instrument(skip(self, patch))]
    pub async fn create_device(&self, patch: DevicePatch) -> Result<DevicePrimitives, DevKeepError> {
        let device = Device::from_primitives(patch)?;
        let saved = self.repo.save(device).await?;
        tracing::debug!(id = %saved.id(), "device created");
        Ok(saved.to_primitives())
    }

    /// List devices, optionally narrowed by exact brand/state/name matches.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn get_devices(&self, filter: &DeviceFilter) -> Result<DeviceList, DevKeepError> {
        let data: Vec<DevicePrimitives> = self
            .repo
            .get_all()
            .await?
            .iter()
            .map(Device::to_primitives)
            .filter(|primitives| filter.matches(primitives))
            .collect();
        tracing::debug!(total = data.len(), "devices listed");
        Ok(DeviceList {
            total: data.len(),
            data,
        })
    }

    /// Look up a single device by its identifier token.
    ///
    /// # Errors
    ///
    /// Returns [`DevKeepError::Validation`] for an empty token and
    /// [`DevKeepError::NotFound`] when no device matches.
    #[tracing::instrument(skip(self))]
    pub async fn get_device(&self, id: &str) -> Result<DevicePrimitives, DevKeepError> {
        let id = DeviceId::parse(id)?;
        let device = self.repo.find_by_id(&id).await?;
        Ok(device.to_primitives())
    }

    /// Apply a partial update to an existing device and persist it.
    ///
    /// # Errors
    ///
    /// Returns [`DevKeepError::NotFound`] when the device does not exist,
    /// or [`DevKeepError::Validation`] when the patch violates a field
    /// rule or the in-use guard.
    #[tracing::instrument(skip(self, patch))]
    pub async fn update_device(
        &self,
        id: &str,
        patch: DevicePatch,
    ) -> Result<DevicePrimitives, DevKeepError> {
        let id = DeviceId::parse(id)?;
        let mut device = self.repo.find_by_id(&id).await?;
        device.update_fields(patch)?;
        let updated = self.repo.update(device).await?;
        tracing::debug!(id = %updated.id(), "device updated");
        Ok(updated.to_primitives())
    }

    /// Remove a device, unless its lifecycle state forbids it.
    ///
    /// # Errors
    ///
    /// Returns [`DevKeepError::NotFound`] when the device does not exist,
    /// or [`DevKeepError::Validation`] when the device is in use.
    #[tracing::instrument(skip(self))]
    pub async fn delete_device(&self, id: &str) -> Result<(), DevKeepError> {
        let id = DeviceId::parse(id)?;
        let device = self.repo.find_by_id(&id).await?;
        if !device.can_be_deleted() {
            tracing::warn!(id = %id, "deletion blocked, device is in use");
            return Err(ValidationError::DeleteWhileInUse.into());
        }
        self.repo.delete(&id).await?;
        tracing::debug!(id = %id, "device deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use devkeep_domain::error::NotFoundError;
    use std::collections::HashMap;
    use std::future::Future;
    use std::sync::Mutex;

    struct FakeDeviceRepo {
        store: Mutex<HashMap<DeviceId, Device>>,
    }

    impl Default for FakeDeviceRepo {
        fn default() -> Self {
            Self {
                store: Mutex::new(HashMap::new()),
            }
        }
    }

    impl DeviceRepository for FakeDeviceRepo {
        fn get_all(&self) -> impl Future<Output = Result<Vec<Device>, DevKeepError>> + Send {
            let store = self.store.lock().unwrap();
            let result: Vec<Device> = store.values().cloned().collect();
            async { Ok(result) }
        }

        fn find_by_id(
            &self,
            id: &DeviceId,
        ) -> impl Future<Output = Result<Device, DevKeepError>> + Send {
            let store = self.store.lock().unwrap();
            let result = store
                .get(id)
                .cloned()
                .ok_or_else(|| NotFoundError::device(id.as_str()).into());
            async { result }
        }

        fn save(&self, device: Device) -> impl Future<Output = Result<Device, DevKeepError>> + Send {
            let mut store = self.store.lock().unwrap();
            let result = if store.contains_key(device.id()) {
                Err(ValidationError::DuplicateId {
                    id: device.id().to_string(),
                }
                .into())
            } else {
                store.insert(device.id().clone(), device.clone());
                Ok(device)
            };
            async { result }
        }

        fn update(
            &self,
            device: Device,
        ) -> impl Future<Output = Result<Device, DevKeepError>> + Send {
            let mut store = self.store.lock().unwrap();
            let result = if store.contains_key(device.id()) {
                store.insert(device.id().clone(), device.clone());
                Ok(device)
            } else {
                Err(NotFoundError::device(device.id().as_str()).into())
            };
            async { result }
        }

        fn delete(&self, id: &DeviceId) -> impl Future<Output = Result<(), DevKeepError>> + Send {
            let mut store = self.store.lock().unwrap();
            let result = store
                .remove(id)
                .map(|_| ())
                .ok_or_else(|| NotFoundError::device(id.as_str()).into());
            async { result }
        }
    }

    fn make_service() -> DeviceService<FakeDeviceRepo> {
        DeviceService::new(FakeDeviceRepo::default())
    }

    fn pixel() -> DevicePatch {
        DevicePatch::default()
            .name("Pixel")
            .brand("Google")
            .state("available")
    }

    #[tokio::test]
    async fn should_create_and_fetch_device() {
        let svc = make_service();
        let created = svc.create_device(pixel()).await.unwrap();

        let fetched = svc.get_device(&created.id).await.unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn should_reject_create_when_mandatory_fields_missing() {
        let svc = make_service();
        let result = svc.create_device(DevicePatch::default().name("Pixel")).await;
        assert!(matches!(result, Err(DevKeepError::Validation(_))));
    }

    #[tokio::test]
    async fn should_return_not_found_for_unknown_device() {
        let svc = make_service();
        let result = svc.get_device("missing-id").await;
        assert!(matches!(result, Err(DevKeepError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_list_devices_with_filters() {
        let svc = make_service();
        svc.create_device(pixel()).await.unwrap();
        svc.create_device(
            DevicePatch::default()
                .name("Galaxy")
                .brand("Samsung")
                .state("inactive"),
        )
        .await
        .unwrap();

        let all = svc.get_devices(&DeviceFilter::default()).await.unwrap();
        assert_eq!(all.total, 2);

        let filter = DeviceFilter {
            brand: Some("Samsung".to_string()),
            ..DeviceFilter::default()
        };
        let samsung = svc.get_devices(&filter).await.unwrap();
        assert_eq!(samsung.total, 1);
        assert_eq!(samsung.data[0].name, "Galaxy");

        let filter = DeviceFilter {
            brand: Some("Samsung".to_string()),
            state: Some("available".to_string()),
            ..DeviceFilter::default()
        };
        let none = svc.get_devices(&filter).await.unwrap();
        assert_eq!(none.total, 0);
    }

    #[tokio::test]
    async fn should_update_device_fields() {
        let svc = make_service();
        let created = svc.create_device(pixel()).await.unwrap();

        let updated = svc
            .update_device(&created.id, DevicePatch::default().brand("Alphabet"))
            .await
            .unwrap();

        assert_eq!(updated.brand, "Alphabet");
        assert_eq!(updated.name, "Pixel");
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.created_at, created.created_at);
    }

    #[tokio::test]
    async fn should_return_not_found_when_updating_unknown_device() {
        let svc = make_service();
        let result = svc
            .update_device("missing-id", DevicePatch::default().name("X"))
            .await;
        assert!(matches!(result, Err(DevKeepError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_reject_name_update_while_in_use_and_keep_stored_state() {
        let svc = make_service();
        let created = svc.create_device(pixel().state("in-use")).await.unwrap();

        let result = svc
            .update_device(&created.id, DevicePatch::default().name("X"))
            .await;
        assert!(matches!(
            result,
            Err(DevKeepError::Validation(ValidationError::UpdateWhileInUse))
        ));

        let stored = svc.get_device(&created.id).await.unwrap();
        assert_eq!(stored.name, "Pixel");
    }

    #[tokio::test]
    async fn should_allow_state_transition_out_of_in_use() {
        let svc = make_service();
        let created = svc.create_device(pixel().state("in-use")).await.unwrap();

        let updated = svc
            .update_device(&created.id, DevicePatch::default().state("available"))
            .await
            .unwrap();
        assert_eq!(updated.state, "available");
    }

    #[tokio::test]
    async fn should_delete_device_when_not_in_use() {
        let svc = make_service();
        let created = svc.create_device(pixel()).await.unwrap();

        svc.delete_device(&created.id).await.unwrap();

        let result = svc.get_device(&created.id).await;
        assert!(matches!(result, Err(DevKeepError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_block_deletion_while_in_use() {
        let svc = make_service();
        let created = svc.create_device(pixel().state("in-use")).await.unwrap();

        let result = svc.delete_device(&created.id).await;
        assert!(matches!(
            result,
            Err(DevKeepError::Validation(ValidationError::DeleteWhileInUse))
        ));

        // still there
        assert!(svc.get_device(&created.id).await.is_ok());
    }

    #[tokio::test]
    async fn should_return_not_found_when_deleting_unknown_device() {
        let svc = make_service();
        let result = svc.delete_device("missing-id").await;
        assert!(matches!(result, Err(DevKeepError::NotFound(_))));
    }
}
