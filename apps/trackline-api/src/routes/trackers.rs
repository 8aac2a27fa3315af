//! Tracker routes

use axum::{
    routing::{get, post},
    Router,
};
use trackline_domain::ports::TrackerRepository;

use crate::{
    handlers::trackers::{create_tracker_handler, get_trackers_handler},
    AppState,
};

/// Create tracker routes
pub fn routes<R>() -> Router<AppState<R>>
where
    R: TrackerRepository + 'static,
{
    Router::new()
        .route("/trackers", post(create_tracker_handler::<R>))
        .route("/trackers/:device_id", get(get_trackers_handler::<R>))
}
