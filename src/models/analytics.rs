//! Daily check-in counts.

use serde::{Deserialize, Serialize};

/// One point of the per-day check-in series.
///
/// The wire shape matches the internal one, so no translation layer is needed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsData {
    /// Calendar day, `YYYY-MM-DD`.
    pub date: String,
    pub count: u64,
}

/// Largest count in the series, 0 for an empty series.
pub fn peak_count(series: &[AnalyticsData]) -> u64 {
    series.iter().map(|p| p.count).max().unwrap_or(0)
}
