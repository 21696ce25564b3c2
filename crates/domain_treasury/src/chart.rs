//! Weekly balance evolution series for the dashboard chart

use serde::{Deserialize, Serialize};

use chrono::NaiveDate;
use core_kernel::{week_label, week_series};

use crate::error::TreasuryError;
use crate::kpi::{expense, income};
use crate::records::TreasuryBook;

/// Number of weekly points on the evolution chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartWindow {
    FourWeeks,
    ThirteenWeeks,
    FiftyTwoWeeks,
}

impl ChartWindow {
    /// Parses the wire shorthand used by the dashboard ("30d", "90d", "1y")
    pub fn parse(raw: &str) -> Result<Self, TreasuryError> {
        match raw {
            "30d" => Ok(Self::FourWeeks),
            "90d" => Ok(Self::ThirteenWeeks),
            "1y" => Ok(Self::FiftyTwoWeeks),
            other => Err(TreasuryError::UnknownChartWindow(other.to_string())),
        }
    }

    pub fn weeks(self) -> u32 {
        match self {
            Self::FourWeeks => 4,
            Self::ThirteenWeeks => 13,
            Self::FiftyTwoWeeks => 52,
        }
    }
}

impl Default for ChartWindow {
    fn default() -> Self {
        Self::FourWeeks
    }
}

/// One point on the evolution chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    /// Week start formatted "dd/mm"
    pub label: String,
    /// Net balance (income minus expense) of that week, in dinars
    pub balance: rust_decimal::Decimal,
}

/// Oldest-first weekly series ending at the reference date's week
pub type ChartSeries = Vec<ChartPoint>;

/// Computes the per-week net balance over the window
pub fn build_balance_series(
    book: &TreasuryBook,
    reference: NaiveDate,
    window: ChartWindow,
) -> ChartSeries {
    week_series(reference, window.weeks())
        .into_iter()
        .map(|week| {
            let balance = income(book, &week) - expense(book, &week);
            ChartPoint {
                label: week_label(week.start),
                balance: balance.round_millimes().amount(),
            }
        })
        .collect()
}
