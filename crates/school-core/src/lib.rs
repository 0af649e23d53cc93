//! # school-core
//!
//! Core logic for the school platform - shared by the CLI and any other
//! front end.
//!
//! This crate provides:
//! - Key-value persistence (`db` module)
//! - Data models for items and the roster (`models` module)
//! - Item store, dashboard aggregation and subject grid (`services` module)
//! - Sign-up and password recovery flows (`wizard` module)
//! - Password hashing and sign-in (`auth` module)
//! - Runtime configuration (`config` module)
//! - Unified error handling (`error` module)

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;
pub mod wizard;

// Re-exports for convenience
pub use config::SchoolConfig;
pub use db::{Database, KeyValueStore, MemoryStore};
pub use error::{Error, Result};

// Re-export commonly used types from models
pub use models::{
    Accommodations, ClassGroup, CreateItem, Dimension, DimensionCount, DueWindow, Item,
    ItemFilters, ItemKind, ItemScope, ItemStatus, Kpis, Roster, Student,
};

// Re-export commonly used types from services
pub use services::{
    aggregate_by_dimension, compute_kpis, filter_items, filter_subjects, rank_upcoming,
    sample_subjects, sample_topics, scope_breakdown, subject_name, ItemStore, SubjectCard,
    SubjectFilter, SubjectSort, Topic, TopicStatus, DEFAULT_UPCOMING_LIMIT, ITEMS_KEY, ROSTER_KEY,
};

pub use wizard::{FlowKind, FlowOutcome, FlowSession, Role, SignupPolicy, Step, WizardState};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Returns the library version
pub fn version() -> &'static str {
    VERSION
}
