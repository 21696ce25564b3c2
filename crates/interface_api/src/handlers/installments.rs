//! Installment plan handlers

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;
use validator::Validate;

use core_kernel::{DocumentId, InstallmentId, Money, PlanId};
use domain_installments::InstallmentPlan;
use infra_db::InstallmentRepository;

use crate::dto::installments::{
    CreatePlanRequest, GenerationResponse, PlanResponse, StatusCascadeResponse,
    UpdateStatusRequest,
};
use crate::error::ApiError;
use crate::AppState;

/// Creates a plan and generates its installments
pub async fn create_plan(
    State(state): State<AppState>,
    Json(request): Json<CreatePlanRequest>,
) -> Result<Json<GenerationResponse>, ApiError> {
    request.validate()?;

    let mut plan = InstallmentPlan::new(
        Money::new(request.total),
        request.count,
        request.first_due,
    )
    .with_side(request.side);
    if let Some(document_id) = request.document_id {
        plan = plan.for_document(DocumentId::from_uuid(document_id));
    }
    if let Some(name) = request.counterparty_name {
        plan = plan.with_counterparty(name, request.counterparty_tax_id);
    }
    if let Some(period_days) = request.period_days {
        plan = plan.with_period_days(period_days);
    }

    let repo = InstallmentRepository::new(state.pool.clone());
    let outcome = repo.create_plan_with_installments(&mut plan).await?;

    Ok(Json(GenerationResponse {
        outcome,
        plan: (&plan).into(),
    }))
}

/// Generates installments for an existing plan
pub async fn generate_installments(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<GenerationResponse>, ApiError> {
    let repo = InstallmentRepository::new(state.pool.clone());
    let plan_id = PlanId::from_uuid(id);
    let outcome = repo.generate_for_plan(plan_id).await?;
    let plan = repo.find_by_id(plan_id).await?;

    Ok(Json(GenerationResponse {
        outcome,
        plan: (&plan).into(),
    }))
}

/// Gets a plan with its installments
pub async fn get_plan(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PlanResponse>, ApiError> {
    let repo = InstallmentRepository::new(state.pool.clone());
    let plan = repo.find_by_id(PlanId::from_uuid(id)).await?;
    Ok(Json((&plan).into()))
}

/// Updates an installment's status; the plan status cascades in the same call
pub async fn update_installment_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<Json<StatusCascadeResponse>, ApiError> {
    let repo = InstallmentRepository::new(state.pool.clone());
    let installment_id = InstallmentId::from_uuid(id);
    let plan_status = repo
        .set_installment_status(installment_id, request.status)
        .await?;

    Ok(Json(StatusCascadeResponse {
        installment_id: id,
        installment_status: request.status,
        plan_status,
    }))
}
