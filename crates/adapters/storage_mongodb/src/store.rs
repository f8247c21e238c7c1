//! Lazily connected MongoDB handle, shared by the repositories.

use mongodb::bson::doc;
use mongodb::options::{ClientOptions, IndexOptions};
use mongodb::{Client, Collection, Database, IndexModel};
use tokio::sync::OnceCell;

use devkeep_domain::device::DevicePrimitives;

use crate::config::MongoConfig;
use crate::error::StorageError;

pub(crate) const DEVICES_COLLECTION: &str = "devices";

/// Owned, dependency-injected MongoDB handle.
///
/// Construction is cheap and performs no IO. The first operation that needs
/// the database triggers the connection and index bootstrap; concurrent
/// first callers await the same in-flight attempt instead of racing to
/// connect. Once established, the handle is reused for the lifetime of the
/// store.
pub struct MongoStore {
    config: MongoConfig,
    database: OnceCell<Database>,
}

impl MongoStore {
    /// Create a disconnected store from the given configuration.
    #[must_use]
    pub fn new(config: MongoConfig) -> Self {
        Self {
            config,
            database: OnceCell::new(),
        }
    }

    /// Get the database handle, connecting on first use.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the server cannot be reached or the
    /// index bootstrap fails.
    pub async fn database(&self) -> Result<&Database, StorageError> {
        self.database.get_or_try_init(|| self.connect()).await
    }

    /// The typed `devices` collection.
    pub(crate) async fn devices(&self) -> Result<Collection<DevicePrimitives>, StorageError> {
        Ok(self.database().await?.collection(DEVICES_COLLECTION))
    }

    async fn connect(&self) -> Result<Database, StorageError> {
        let options = match &self.config.uri {
            Some(uri) => ClientOptions::parse(uri).await?,
            None => self.config.client_options(),
        };
        tracing::info!(
            database = %self.config.database,
            "connecting to MongoDB"
        );
        let client = Client::with_options(options)?;
        let database = client.database(&self.config.database);
        ensure_indexes(&database).await?;
        tracing::info!(database = %self.config.database, "connected to MongoDB");
        Ok(database)
    }
}

/// Create the indexes backing the uniqueness constraint and the commonly
/// filtered listings. Idempotent: re-creating an existing index is a no-op
/// on the server.
async fn ensure_indexes(database: &Database) -> Result<(), StorageError> {
    let collection: Collection<DevicePrimitives> = database.collection(DEVICES_COLLECTION);
    let unique = IndexOptions::builder().unique(true).build();
    let indexes = [
        IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(unique)
            .build(),
        IndexModel::builder().keys(doc! { "name": 1 }).build(),
        IndexModel::builder().keys(doc! { "brand": 1 }).build(),
        IndexModel::builder().keys(doc! { "state": 1 }).build(),
        IndexModel::builder().keys(doc! { "createdAt": 1 }).build(),
        IndexModel::builder()
            .keys(doc! { "brand": 1, "state": 1 })
            .build(),
        IndexModel::builder()
            .keys(doc! { "state": 1, "createdAt": 1 })
            .build(),
    ];
    collection.create_indexes(indexes).await?;
    Ok(())
}
