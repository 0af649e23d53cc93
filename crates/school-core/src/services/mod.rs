//! Services module - item store, dashboard aggregation, subject grid and topics

pub mod aggregate;
pub mod store;
pub mod subjects;

pub use aggregate::{
    aggregate_by_dimension, compute_kpis, filter_items, in_window, rank_upcoming,
    scope_breakdown, DEFAULT_UPCOMING_LIMIT,
};
pub use store::{ItemStore, ITEMS_KEY, ROSTER_KEY};
pub use subjects::{
    filter_subjects, sample_subjects, sample_topics, subject_name, SubjectCard, SubjectFilter,
    SubjectSort, Topic, TopicStatus,
};
