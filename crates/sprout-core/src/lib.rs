//! sprout-core - Core library for Sprout
//!
//! This crate contains the shared models, storage layer, offline sync
//! engine, and care-scheduling logic used by all Sprout interfaces.

pub mod alert;
pub mod driver;
pub mod error;
pub mod models;
pub mod schedule;
pub mod store;
pub mod sync;

pub use error::{Error, Result};
pub use models::{CareKind, Plant, PlantId};
