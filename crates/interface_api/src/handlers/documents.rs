//! Document handlers

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use core_kernel::DocumentId;
use infra_db::DocumentRepository;

use crate::dto::documents::TotalsResponse;
use crate::error::ApiError;
use crate::AppState;

/// Recomputes a document's totals and returns the stored result
pub async fn recompute_totals(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<TotalsResponse>, ApiError> {
    let repo = DocumentRepository::new(state.pool.clone());
    let totals = repo
        .recompute_and_store_totals(DocumentId::from_uuid(id))
        .await?;
    Ok(Json(totals.into()))
}
