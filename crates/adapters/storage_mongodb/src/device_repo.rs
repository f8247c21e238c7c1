//! MongoDB implementation of [`DeviceRepository`].

use std::future::Future;
use std::sync::Arc;

use futures::TryStreamExt;
use mongodb::bson::doc;
use mongodb::error::{ErrorKind, WriteFailure};

use devkeep_app::ports::DeviceRepository;
use devkeep_domain::device::{Device, DeviceId, DevicePrimitives};
use devkeep_domain::error::{DevKeepError, NotFoundError, ValidationError};

use crate::error::StorageError;
use crate::store::MongoStore;

/// Device repository backed by a `devices` collection.
///
/// Documents are keyed by the domain `id` field (distinct from Mongo's
/// `_id`) and stored in the same flat five-string shape produced by
/// [`Device::to_primitives`]; reads re-run the value-object rules through
/// [`Device::from_primitives`], so the two repository variants accept
/// exactly the same data.
pub struct MongoDeviceRepository {
    store: Arc<MongoStore>,
}

impl MongoDeviceRepository {
    /// Create a repository sharing the given store handle.
    #[must_use]
    pub fn new(store: Arc<MongoStore>) -> Self {
        Self { store }
    }
}

/// Whether the driver error is a unique-index violation (code 11000).
fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_error)) => write_error.code == 11000,
        _ => false,
    }
}

fn to_device(primitives: DevicePrimitives) -> Result<Device, DevKeepError> {
    Device::from_primitives(primitives.into())
}

impl DeviceRepository for MongoDeviceRepository {
    fn get_all(&self) -> impl Future<Output = Result<Vec<Device>, DevKeepError>> + Send {
        let store = Arc::clone(&self.store);
        async move {
            let collection = store.devices().await?;
            let cursor = collection
                .find(doc! {})
                .await
                .map_err(StorageError::from)?;
            let documents: Vec<DevicePrimitives> =
                cursor.try_collect().await.map_err(StorageError::from)?;
            tracing::debug!(total = documents.len(), "devices fetched");
            documents.into_iter().map(to_device).collect()
        }
    }

    fn find_by_id(
        &self,
        id: &DeviceId,
    ) -> impl Future<Output = Result<Device, DevKeepError>> + Send {
        let store = Arc::clone(&self.store);
        let id = id.clone();
        async move {
            let collection = store.devices().await?;
            let document = collection
                .find_one(doc! { "id": id.as_str() })
                .await
                .map_err(StorageError::from)?;
            match document {
                Some(primitives) => to_device(primitives),
                None => Err(NotFoundError::device(id.as_str()).into()),
            }
        }
    }

    fn save(&self, device: Device) -> impl Future<Output = Result<Device, DevKeepError>> + Send {
        let store = Arc::clone(&self.store);
        async move {
            let collection = store.devices().await?;
            let primitives = device.to_primitives();
            match collection.insert_one(&primitives).await {
                Ok(_) => {
                    tracing::debug!(id = %primitives.id, "device saved");
                    Ok(device)
                }
                Err(err) if is_duplicate_key(&err) => {
                    Err(ValidationError::DuplicateId { id: primitives.id }.into())
                }
                Err(err) => Err(StorageError::from(err).into()),
            }
        }
    }

    fn update(&self, device: Device) -> impl Future<Output = Result<Device, DevKeepError>> + Send {
        let store = Arc::clone(&self.store);
        async move {
            let collection = store.devices().await?;
            let primitives = device.to_primitives();
            let replaced = collection
                .find_one_and_replace(doc! { "id": primitives.id.as_str() }, &primitives)
                .await
                .map_err(StorageError::from)?;
            if replaced.is_none() {
                return Err(NotFoundError::device(primitives.id).into());
            }
            tracing::debug!(id = %primitives.id, "device updated");
            Ok(device)
        }
    }

    fn delete(&self, id: &DeviceId) -> impl Future<Output = Result<(), DevKeepError>> + Send {
        let store = Arc::clone(&self.store);
        let id = id.clone();
        async move {
            let collection = store.devices().await?;
            let result = collection
                .delete_one(doc! { "id": id.as_str() })
                .await
                .map_err(StorageError::from)?;
            if result.deleted_count == 0 {
                return Err(NotFoundError::device(id.as_str()).into());
            }
            tracing::debug!(id = %id, "device deleted");
            Ok(())
        }
    }
}
