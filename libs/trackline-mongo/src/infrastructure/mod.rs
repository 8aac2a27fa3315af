//! Infrastructure layer: driver settings, document mapping, repository, probe

mod document;
mod mongo_repository;
mod probe;
mod settings;

pub use document::TrackerDocument;
pub use mongo_repository::{MongoTrackerRepository, StoreSetupError};
pub use probe::spawn_readiness_probe;
pub use settings::MongoSettings;
