//! Installment plan DTOs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use domain_installments::{
    GenerationOutcome, Installment, InstallmentPlan, InstallmentStatus, PlanSide, PlanStatus,
};

#[derive(Debug, Deserialize, Validate)]
pub struct CreatePlanRequest {
    pub document_id: Option<Uuid>,
    #[serde(default)]
    pub side: PlanSide,
    pub counterparty_name: Option<String>,
    pub counterparty_tax_id: Option<String>,
    pub total: Decimal,
    #[validate(range(min = 1, max = 24))]
    pub count: u32,
    pub first_due: NaiveDate,
    #[validate(range(min = 1))]
    pub period_days: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: InstallmentStatus,
}

#[derive(Debug, Serialize)]
pub struct InstallmentResponse {
    pub id: Uuid,
    pub sequence: u32,
    pub due_date: NaiveDate,
    pub amount: Decimal,
    pub status: InstallmentStatus,
}

impl From<&Installment> for InstallmentResponse {
    fn from(installment: &Installment) -> Self {
        Self {
            id: *installment.id.as_uuid(),
            sequence: installment.sequence,
            due_date: installment.due_date,
            amount: installment.amount.amount(),
            status: installment.status,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PlanResponse {
    pub id: Uuid,
    pub document_id: Option<Uuid>,
    pub side: PlanSide,
    pub counterparty_name: Option<String>,
    pub total: Decimal,
    pub count: u32,
    pub first_due: NaiveDate,
    pub period_days: u32,
    pub status: PlanStatus,
    pub installments: Vec<InstallmentResponse>,
}

impl From<&InstallmentPlan> for PlanResponse {
    fn from(plan: &InstallmentPlan) -> Self {
        Self {
            id: *plan.id.as_uuid(),
            document_id: plan.document_id.map(|d| *d.as_uuid()),
            side: plan.side,
            counterparty_name: plan.counterparty_name.clone(),
            total: plan.total.amount(),
            count: plan.count,
            first_due: plan.first_due,
            period_days: plan.period_days,
            status: plan.status,
            installments: plan.installments.iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct GenerationResponse {
    pub outcome: GenerationOutcome,
    pub plan: PlanResponse,
}

#[derive(Debug, Serialize)]
pub struct StatusCascadeResponse {
    pub installment_id: Uuid,
    pub installment_status: InstallmentStatus,
    pub plan_status: PlanStatus,
}
