//! Document Store Module
//!
//! Thin call-throughs to a document collection: school and student helpers
//! and nginx log statistics. Filtering and aggregation run in the server.

mod collection;
mod log_stats;
mod schools;

#[cfg(test)]
mod fake;

pub use collection::{connect_collection, DocumentCollection, UpdateSummary};
pub use log_stats::{IpCount, LogStats, HTTP_METHODS, TOP_IPS_LIMIT};
pub use schools::{
    insert_school, list_all, schools_by_topic, top_students, update_topics, StudentAverage,
};
