//! Treasury dashboard DTOs

use chrono::NaiveDate;
use serde::Deserialize;

/// Query parameters for `GET /treasury/kpis`
#[derive(Debug, Deserialize)]
pub struct KpiQuery {
    /// Period granularity: week, month, quarter, or year
    #[serde(default = "default_period")]
    pub period: String,
    /// 0 = current period, 1 = previous, ...
    #[serde(default)]
    pub offset: u32,
    /// Chart window shorthand: 30d, 90d, or 1y
    #[serde(default = "default_window")]
    pub window: String,
    /// Reference date; defaults to today when omitted
    pub reference_date: Option<NaiveDate>,
}

fn default_period() -> String {
    "week".to_string()
}

fn default_window() -> String {
    "30d".to_string()
}

/// Query parameters for `GET /treasury/schedule`
#[derive(Debug, Deserialize)]
pub struct ScheduleQuery {
    /// Inclusive horizon end; open-ended when omitted
    pub end: Option<NaiveDate>,
    /// Reference date; defaults to today when omitted
    pub reference_date: Option<NaiveDate>,
}
