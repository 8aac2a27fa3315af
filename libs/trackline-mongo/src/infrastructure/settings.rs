//! Connection settings for the MongoDB client

use std::time::Duration;

use mongodb::options::ClientOptions;

/// Database used when the connection string names none
pub const DEFAULT_DATABASE: &str = "test";

/// Collection holding tracker reports
pub const DEFAULT_COLLECTION: &str = "trackers";

/// Everything needed to build the MongoDB client
///
/// Defaults bound every network wait: 15 s to select a server, 15 s to open
/// a connection, 45 s before an idle pooled connection is closed. Writes are
/// retried once by the driver.
#[derive(Debug, Clone, PartialEq)]
pub struct MongoSettings {
    pub uri: String,
    /// Used only when `uri` has no database path
    pub database: String,
    pub collection: String,
    pub server_selection_timeout: Duration,
    pub idle_timeout: Duration,
    pub connect_timeout: Duration,
    pub retry_writes: bool,
    pub app_name: Option<String>,
}

impl MongoSettings {
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            ..Self::default()
        }
    }

    /// Copy the bounded timeouts and retry policy onto parsed client options
    pub fn apply(&self, options: &mut ClientOptions) {
        options.server_selection_timeout = Some(self.server_selection_timeout);
        options.connect_timeout = Some(self.connect_timeout);
        options.max_idle_time = Some(self.idle_timeout);
        options.retry_writes = Some(self.retry_writes);
        if options.app_name.is_none() {
            options.app_name = self.app_name.clone();
        }
    }

    /// The database named in the connection string, else the configured fallback
    pub fn resolve_database(&self, options: &ClientOptions) -> String {
        options
            .default_database
            .clone()
            .unwrap_or_else(|| self.database.clone())
    }
}

impl Default for MongoSettings {
    fn default() -> Self {
        Self {
            uri: "mongodb://localhost:27017".to_string(),
            database: DEFAULT_DATABASE.to_string(),
            collection: DEFAULT_COLLECTION.to_string(),
            server_selection_timeout: Duration::from_millis(15_000),
            idle_timeout: Duration::from_millis(45_000),
            connect_timeout: Duration::from_millis(15_000),
            retry_writes: true,
            app_name: None,
        }
    }
}
