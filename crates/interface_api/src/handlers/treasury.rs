//! Treasury dashboard handlers

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Utc;

use core_kernel::PeriodKind;
use domain_treasury::{
    build_schedule, compute_kpis, AlertThresholds, ChartWindow, KpiBundle, KpiParams,
    ScheduleEvent, TreasuryError,
};
use infra_db::TreasuryRepository;

use crate::dto::treasury::{KpiQuery, ScheduleQuery};
use crate::error::ApiError;
use crate::AppState;

/// Computes the KPI bundle for the requested period
pub async fn get_kpis(
    State(state): State<AppState>,
    Query(query): Query<KpiQuery>,
) -> Result<Json<KpiBundle>, ApiError> {
    let period: PeriodKind = query
        .period
        .parse()
        .map_err(|_| TreasuryError::InvalidPeriod(query.period.clone()))?;
    let chart_window = ChartWindow::parse(&query.window)?;
    let reference_date = query
        .reference_date
        .unwrap_or_else(|| Utc::now().date_naive());

    let repo = TreasuryRepository::new(state.pool.clone());
    let book = repo.load_book().await?;

    let params = KpiParams {
        period,
        offset: query.offset,
        reference_date,
        chart_window,
        thresholds: AlertThresholds::default(),
    };
    let bundle = compute_kpis(&book, &params)?;
    Ok(Json(bundle))
}

/// Builds the forward cash schedule
pub async fn get_schedule(
    State(state): State<AppState>,
    Query(query): Query<ScheduleQuery>,
) -> Result<Json<Vec<ScheduleEvent>>, ApiError> {
    let reference_date = query
        .reference_date
        .unwrap_or_else(|| Utc::now().date_naive());

    let repo = TreasuryRepository::new(state.pool.clone());
    let book = repo.load_book().await?;

    Ok(Json(build_schedule(&book, reference_date, query.end)))
}
