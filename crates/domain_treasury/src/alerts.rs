//! Treasury alert generation
//!
//! Alerts are derived from the already-computed period figures and the
//! forward schedule; they carry no state and are rebuilt on every request.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use core_kernel::Money;

use crate::schedule::ScheduleEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertSeverity {
    Critical,
    Danger,
    Warning,
    Info,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub severity: AlertSeverity,
    pub message: String,
}

/// Thresholds driving alert generation, in dinars
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlertThresholds {
    /// Forecast below this raises a critical alert
    pub forecast_floor: Decimal,
    /// Schedule events with an absolute amount above this raise an info alert
    pub large_event: Decimal,
}

impl Default for AlertThresholds {
    fn default() -> Self {
        Self {
            forecast_floor: dec!(5000),
            large_event: dec!(10000),
        }
    }
}

/// Derives the alert list for the current period
pub fn generate_alerts(
    forecast: Money,
    balance: Money,
    expected_income: Money,
    expected_expense: Money,
    schedule: &[ScheduleEvent],
    thresholds: &AlertThresholds,
) -> Vec<Alert> {
    let mut alerts = Vec::new();

    if forecast.amount() < thresholds.forecast_floor {
        alerts.push(Alert {
            severity: AlertSeverity::Critical,
            message: format!(
                "Projected cash position {forecast} is below the {:.3} DT floor",
                thresholds.forecast_floor
            ),
        });
    }

    if balance.is_negative() {
        alerts.push(Alert {
            severity: AlertSeverity::Danger,
            message: format!("Period balance is negative at {balance}"),
        });
    }

    if expected_expense > expected_income {
        alerts.push(Alert {
            severity: AlertSeverity::Warning,
            message: format!(
                "Committed outflows {expected_expense} exceed expected inflows {expected_income}"
            ),
        });
    }

    let threshold = Money::new(thresholds.large_event);
    for event in schedule {
        if event.amount.abs() > threshold {
            alerts.push(Alert {
                severity: AlertSeverity::Info,
                message: format!(
                    "{}: {} for {}",
                    event.date.format("%d/%m/%Y"),
                    event.amount,
                    event.description
                ),
            });
        }
    }

    alerts
}
