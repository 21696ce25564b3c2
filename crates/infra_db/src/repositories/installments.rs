//! Installment plan repository and the atomic status cascade

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::{debug, instrument};
use uuid::Uuid;

use core_kernel::{DocumentId, InstallmentId, Money, PlanId};
use domain_installments::{
    derive_plan_status, generate_installments, GenerationOutcome, Installment, InstallmentPlan,
    InstallmentStatus, PlanSide, PlanStatus,
};

use crate::error::DatabaseError;

/// Repository for installment plans
#[derive(Debug, Clone)]
pub struct InstallmentRepository {
    pool: PgPool,
}

#[derive(Debug, sqlx::FromRow)]
struct PlanRow {
    plan_id: Uuid,
    document_id: Option<Uuid>,
    side: String,
    counterparty_name: Option<String>,
    counterparty_tax_id: Option<String>,
    total: Decimal,
    installment_count: i32,
    first_due: NaiveDate,
    period_days: i32,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, sqlx::FromRow)]
struct InstallmentRow {
    installment_id: Uuid,
    plan_id: Uuid,
    sequence: i32,
    due_date: NaiveDate,
    amount: Decimal,
    status: String,
    bank_reference: Option<String>,
    acceptance: Option<String>,
}

fn parse_plan_status(raw: &str) -> Result<PlanStatus, DatabaseError> {
    match raw {
        "UNPAID" => Ok(PlanStatus::Unpaid),
        "PARTIALLY_PAID" => Ok(PlanStatus::PartiallyPaid),
        "PAID" => Ok(PlanStatus::Paid),
        other => Err(DatabaseError::InvalidStoredValue(format!(
            "unknown plan status '{other}'"
        ))),
    }
}

fn plan_status_str(status: PlanStatus) -> &'static str {
    match status {
        PlanStatus::Unpaid => "UNPAID",
        PlanStatus::PartiallyPaid => "PARTIALLY_PAID",
        PlanStatus::Paid => "PAID",
    }
}

fn parse_plan_side(raw: &str) -> Result<PlanSide, DatabaseError> {
    match raw {
        "client" => Ok(PlanSide::Client),
        "supplier" => Ok(PlanSide::Supplier),
        other => Err(DatabaseError::InvalidStoredValue(format!(
            "unknown plan side '{other}'"
        ))),
    }
}

fn plan_side_str(side: PlanSide) -> &'static str {
    match side {
        PlanSide::Client => "client",
        PlanSide::Supplier => "supplier",
    }
}

fn parse_installment_status(raw: &str) -> Result<InstallmentStatus, DatabaseError> {
    match raw {
        "UNPAID" => Ok(InstallmentStatus::Unpaid),
        "PAID" => Ok(InstallmentStatus::Paid),
        other => Err(DatabaseError::InvalidStoredValue(format!(
            "unknown installment status '{other}'"
        ))),
    }
}

fn installment_status_str(status: InstallmentStatus) -> &'static str {
    match status {
        InstallmentStatus::Unpaid => "UNPAID",
        InstallmentStatus::Paid => "PAID",
    }
}

impl InstallmentRow {
    fn into_installment(self) -> Result<Installment, DatabaseError> {
        Ok(Installment {
            id: InstallmentId::from_uuid(self.installment_id),
            plan_id: PlanId::from_uuid(self.plan_id),
            sequence: self.sequence as u32,
            due_date: self.due_date,
            amount: Money::new(self.amount),
            status: parse_installment_status(&self.status)?,
            bank_reference: self.bank_reference,
            acceptance: self.acceptance,
        })
    }
}

impl PlanRow {
    fn into_plan(self, installments: Vec<Installment>) -> Result<InstallmentPlan, DatabaseError> {
        Ok(InstallmentPlan {
            id: PlanId::from_uuid(self.plan_id),
            document_id: self.document_id.map(DocumentId::from_uuid),
            side: parse_plan_side(&self.side)?,
            counterparty_name: self.counterparty_name,
            counterparty_tax_id: self.counterparty_tax_id,
            total: Money::new(self.total),
            count: self.installment_count as u32,
            first_due: self.first_due,
            period_days: self.period_days as u32,
            status: parse_plan_status(&self.status)?,
            installments,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

async fn insert_installment(
    tx: &mut Transaction<'_, Postgres>,
    installment: &Installment,
) -> Result<(), DatabaseError> {
    sqlx::query(
        r#"
        INSERT INTO installments (
            installment_id, plan_id, sequence, due_date, amount, status,
            bank_reference, acceptance
        ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        "#,
    )
    .bind(installment.id.as_uuid())
    .bind(installment.plan_id.as_uuid())
    .bind(installment.sequence as i32)
    .bind(installment.due_date)
    .bind(installment.amount.amount())
    .bind(installment_status_str(installment.status))
    .bind(&installment.bank_reference)
    .bind(&installment.acceptance)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

impl InstallmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates a plan and generates its installments in one transaction
    ///
    /// Generation runs through the domain generator, so the sum invariant
    /// and the idempotency rules hold here exactly as they do in memory.
    #[instrument(skip(self, plan), fields(plan = %plan.id))]
    pub async fn create_plan_with_installments(
        &self,
        plan: &mut InstallmentPlan,
    ) -> Result<GenerationOutcome, DatabaseError> {
        let outcome = generate_installments(plan)?;

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO installment_plans (
                plan_id, document_id, side, counterparty_name, counterparty_tax_id,
                total, installment_count, first_due, period_days, status,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(plan.id.as_uuid())
        .bind(plan.document_id.map(|d| *d.as_uuid()))
        .bind(plan_side_str(plan.side))
        .bind(&plan.counterparty_name)
        .bind(&plan.counterparty_tax_id)
        .bind(plan.total.amount())
        .bind(plan.count as i32)
        .bind(plan.first_due)
        .bind(plan.period_days as i32)
        .bind(plan_status_str(plan.status))
        .bind(plan.created_at)
        .bind(plan.updated_at)
        .execute(&mut *tx)
        .await?;

        for installment in &plan.installments {
            insert_installment(&mut tx, installment).await?;
        }

        tx.commit().await?;
        debug!(?outcome, "plan persisted");
        Ok(outcome)
    }

    /// Generates installments for an existing plan that has none yet
    ///
    /// Skips generation when installments already exist, matching the
    /// in-memory generator's idempotency contract.
    #[instrument(skip(self))]
    pub async fn generate_for_plan(
        &self,
        plan_id: PlanId,
    ) -> Result<GenerationOutcome, DatabaseError> {
        let mut tx = self.pool.begin().await?;

        let row: Option<PlanRow> =
            sqlx::query_as("SELECT * FROM installment_plans WHERE plan_id = $1 FOR UPDATE")
                .bind(plan_id.as_uuid())
                .fetch_optional(&mut *tx)
                .await?;
        let row = row.ok_or_else(|| DatabaseError::not_found("Plan", plan_id))?;

        let existing: Vec<InstallmentRow> = sqlx::query_as(
            "SELECT * FROM installments WHERE plan_id = $1 ORDER BY sequence",
        )
        .bind(plan_id.as_uuid())
        .fetch_all(&mut *tx)
        .await?;

        let installments = existing
            .into_iter()
            .map(InstallmentRow::into_installment)
            .collect::<Result<Vec<_>, _>>()?;
        let mut plan = row.into_plan(installments)?;

        let outcome = generate_installments(&mut plan)?;
        if let GenerationOutcome::Generated { .. } = outcome {
            for installment in &plan.installments {
                insert_installment(&mut tx, installment).await?;
            }
        }

        tx.commit().await?;
        Ok(outcome)
    }

    /// Loads a plan with its installments ordered by sequence
    pub async fn find_by_id(&self, plan_id: PlanId) -> Result<InstallmentPlan, DatabaseError> {
        let row: Option<PlanRow> =
            sqlx::query_as("SELECT * FROM installment_plans WHERE plan_id = $1")
                .bind(plan_id.as_uuid())
                .fetch_optional(&self.pool)
                .await?;
        let row = row.ok_or_else(|| DatabaseError::not_found("Plan", plan_id))?;

        let installments: Vec<InstallmentRow> = sqlx::query_as(
            "SELECT * FROM installments WHERE plan_id = $1 ORDER BY sequence",
        )
        .bind(plan_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        row.into_plan(
            installments
                .into_iter()
                .map(InstallmentRow::into_installment)
                .collect::<Result<Vec<_>, _>>()?,
        )
    }

    /// Updates one installment's status and cascades to the plan
    ///
    /// The installment update, the sibling rescan, and the plan status
    /// write all happen inside one transaction, with the plan row locked
    /// first. Without the plan lock, two concurrent updates to sibling
    /// installments could each rescan before the other commits and the
    /// last writer would persist a plan status missing the first change.
    #[instrument(skip(self))]
    pub async fn set_installment_status(
        &self,
        installment_id: InstallmentId,
        status: InstallmentStatus,
    ) -> Result<PlanStatus, DatabaseError> {
        let mut tx = self.pool.begin().await?;

        let plan_id: Option<(Uuid,)> =
            sqlx::query_as("SELECT plan_id FROM installments WHERE installment_id = $1")
                .bind(installment_id.as_uuid())
                .fetch_optional(&mut *tx)
                .await?;
        let (plan_id,) =
            plan_id.ok_or_else(|| DatabaseError::not_found("Installment", installment_id))?;

        // Serializes cascades per plan; the rescan below must observe
        // every committed sibling update.
        sqlx::query("SELECT plan_id FROM installment_plans WHERE plan_id = $1 FOR UPDATE")
            .bind(plan_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("UPDATE installments SET status = $2 WHERE installment_id = $1")
            .bind(installment_id.as_uuid())
            .bind(installment_status_str(status))
            .execute(&mut *tx)
            .await?;

        let siblings: Vec<InstallmentRow> = sqlx::query_as(
            "SELECT * FROM installments WHERE plan_id = $1 ORDER BY sequence",
        )
        .bind(plan_id)
        .fetch_all(&mut *tx)
        .await?;
        let siblings = siblings
            .into_iter()
            .map(InstallmentRow::into_installment)
            .collect::<Result<Vec<_>, _>>()?;

        let plan_status = derive_plan_status(&siblings);

        sqlx::query(
            "UPDATE installment_plans SET status = $2, updated_at = now() WHERE plan_id = $1",
        )
        .bind(plan_id)
        .bind(plan_status_str(plan_status))
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        debug!(installment = %installment_id, plan_status = ?plan_status, "status cascade applied");
        Ok(plan_status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_status_round_trips_through_storage_form() {
        for status in [
            PlanStatus::Unpaid,
            PlanStatus::PartiallyPaid,
            PlanStatus::Paid,
        ] {
            assert_eq!(parse_plan_status(plan_status_str(status)).unwrap(), status);
        }
        assert!(parse_plan_status("CANCELLED").is_err());
    }

    #[test]
    fn test_plan_side_round_trips_through_storage_form() {
        for side in [PlanSide::Client, PlanSide::Supplier] {
            assert_eq!(parse_plan_side(plan_side_str(side)).unwrap(), side);
        }
        assert!(parse_plan_side("bank").is_err());
    }

    #[test]
    fn test_installment_status_round_trips_through_storage_form() {
        for status in [InstallmentStatus::Unpaid, InstallmentStatus::Paid] {
            assert_eq!(
                parse_installment_status(installment_status_str(status)).unwrap(),
                status
            );
        }
    }
}
