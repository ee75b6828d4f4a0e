#![forbid(unsafe_code)]

//! Core domain model and business logic for the dumbbell workout planner.
//!
//! This crate provides:
//! - Domain types (days, plan entries, history records)
//! - The built-in exercise catalog and library
//! - The workout generator
//! - The progression state machine with its rest countdown and session clock
//! - History persistence over a key-value store
//! - The `Workout` application state tying these together

pub mod types;
pub mod error;
pub mod catalog;
pub mod config;
pub mod logging;
pub mod clock;
pub mod storage;
pub mod history;
pub mod generator;
pub mod rest;
pub mod progression;
pub mod workout;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use catalog::{build_default_catalog, get_default_catalog, Catalog, MuscleGroup};
pub use config::Config;
pub use clock::{Clock, ManualClock, SystemClock};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use history::{HistoryRecorder, HISTORY_KEY};
pub use generator::{generate, PlanRequest};
pub use progression::{Advance, Progression};
pub use workout::{estimate_calories, Step, Tick, Workout};
