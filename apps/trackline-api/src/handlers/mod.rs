//! HTTP handlers

pub mod health;
pub mod trackers;
