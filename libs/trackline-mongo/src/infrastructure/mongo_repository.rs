//! MongoDB Tracker Repository Implementation
//!
//! This module implements the `TrackerRepository` port with the official
//! MongoDB driver. All driver errors become `TrackingError::StorageFailure`
//! carrying the driver's own message.

use futures::TryStreamExt;
use mongodb::{bson::doc, options::ClientOptions, Client, Collection};
use thiserror::Error;
use tracing::{debug, error, info, instrument};
use trackline_domain::{
    ports::TrackerRepository,
    tracking::{
        DeviceId, NewTrackerReport, ReportId, StoreReadiness, TrackerReport, TrackingError,
    },
};

use super::{document::TrackerDocument, settings::MongoSettings};

/// Errors raised while building the client at startup
///
/// Reachability is not checked here; the readiness probe handles that.
#[derive(Error, Debug)]
pub enum StoreSetupError {
    /// The connection string could not be parsed or resolved
    #[error("Invalid MongoDB connection string: {0}")]
    InvalidUri(mongodb::error::Error),

    /// The driver refused the resulting client options
    #[error("Failed to create MongoDB client: {0}")]
    Client(mongodb::error::Error),
}

/// MongoDB-based implementation of the TrackerRepository port
///
/// Cloning is cheap: the driver client is reference counted and pools its
/// connections, so every clone shares one pool and one readiness flag.
#[derive(Clone)]
pub struct MongoTrackerRepository {
    client: Client,
    collection: Collection<TrackerDocument>,
    database: String,
    readiness: StoreReadiness,
}

impl MongoTrackerRepository {
    /// Build the client and collection handle
    ///
    /// The driver connects lazily, so this returns before the server is
    /// reachable. The repository starts not ready until a probe succeeds.
    ///
    /// # Errors
    ///
    /// Returns `StoreSetupError` if the URI is malformed or the options are rejected
    pub async fn connect(settings: &MongoSettings) -> Result<Self, StoreSetupError> {
        let mut options = ClientOptions::parse(&settings.uri)
            .await
            .map_err(StoreSetupError::InvalidUri)?;
        settings.apply(&mut options);

        let database = settings.resolve_database(&options);
        let client = Client::with_options(options).map_err(StoreSetupError::Client)?;
        let collection = client
            .database(&database)
            .collection::<TrackerDocument>(&settings.collection);

        info!(
            database = %database,
            collection = %settings.collection,
            "Initializing MongoTrackerRepository"
        );

        Ok(Self {
            client,
            collection,
            database,
            readiness: StoreReadiness::new(),
        })
    }

    pub fn database_name(&self) -> &str {
        &self.database
    }

    pub fn collection_name(&self) -> &str {
        self.collection.name()
    }

    /// Round-trip a `ping` command to the server
    ///
    /// Waits at most the configured server selection timeout.
    pub async fn ping(&self) -> Result<(), TrackingError> {
        self.client
            .database(&self.database)
            .run_command(doc! { "ping": 1 })
            .await
            .map(|_| ())
            .map_err(|err| TrackingError::storage_failure(err.to_string()))
    }
}

impl TrackerRepository for MongoTrackerRepository {
    #[instrument(skip(self, report), fields(device_id = %report.device_id()))]
    fn insert(
        &self,
        report: &NewTrackerReport,
    ) -> impl std::future::Future<Output = Result<ReportId, TrackingError>> + Send {
        let collection = self.collection.clone();
        let document = TrackerDocument::from(report);

        async move {
            debug!(collection = %collection.name(), "Inserting tracker report");

            match collection.insert_one(&document).await {
                Ok(result) => {
                    let id = match result.inserted_id.as_object_id() {
                        Some(oid) => oid.to_hex(),
                        None => result.inserted_id.to_string(),
                    };
                    debug!(report_id = %id, "Tracker report inserted");
                    Ok(ReportId::new(id))
                }
                Err(err) => {
                    error!(error = ?err, "Failed to insert tracker report");
                    Err(TrackingError::storage_failure(err.to_string()))
                }
            }
        }
    }

    #[instrument(skip(self), fields(device_id = %device_id))]
    fn find_by_device(
        &self,
        device_id: &DeviceId,
    ) -> impl std::future::Future<Output = Result<Vec<TrackerReport>, TrackingError>> + Send {
        let collection = self.collection.clone();
        let filter = doc! { "deviceId": device_id.as_str() };

        async move {
            debug!(collection = %collection.name(), "Querying tracker reports");

            let fetched = match collection.find(filter).await {
                Ok(cursor) => cursor.try_collect::<Vec<TrackerDocument>>().await,
                Err(err) => Err(err),
            };

            match fetched {
                Ok(documents) => {
                    debug!(count = documents.len(), "Tracker reports fetched");
                    documents
                        .into_iter()
                        .map(TrackerReport::try_from)
                        .collect::<Result<Vec<_>, _>>()
                }
                Err(err) => {
                    error!(error = ?err, "Failed to query tracker reports");
                    Err(TrackingError::storage_failure(err.to_string()))
                }
            }
        }
    }

    fn readiness(&self) -> &StoreReadiness {
        &self.readiness
    }
}
