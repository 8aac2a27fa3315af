//! MongoDB adapter for Trackline
//!
//! Implements the `TrackerRepository` port on top of a single MongoDB
//! collection and keeps the store's readiness flag current.

pub mod infrastructure;

pub use infrastructure::{
    spawn_readiness_probe, MongoSettings, MongoTrackerRepository, StoreSetupError,
    TrackerDocument,
};
