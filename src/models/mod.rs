//! Data models for check-in records and analytics.

pub mod analytics;
pub mod student;

pub use analytics::AnalyticsData;
pub use student::{CheckInRequest, StudentRecord, StudentWire};
