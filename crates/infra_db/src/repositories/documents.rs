//! Document repository and the atomic totals recompute service

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::{debug, instrument};
use uuid::Uuid;

use core_kernel::{ClientId, DocumentId, ItemId, LineId, Money, Rate};
use domain_documents::{
    compute_totals, Document, DocumentKind, DocumentNature, DocumentTotals, InMemoryCatalog, Line,
};

use crate::error::DatabaseError;

/// Repository for commercial documents and their computed totals
#[derive(Debug, Clone)]
pub struct DocumentRepository {
    pool: PgPool,
}

#[derive(Debug, sqlx::FromRow)]
struct DocumentRow {
    document_id: Uuid,
    number: String,
    kind: String,
    nature: String,
    client_id: Option<Uuid>,
    tax_rate: Decimal,
    stamp_duty: Decimal,
    issue_date: NaiveDate,
    total_ht: Option<Decimal>,
    total_surcharge: Option<Decimal>,
    total_vat: Option<Decimal>,
    total_stamp: Option<Decimal>,
    total_ttc: Option<Decimal>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, sqlx::FromRow)]
struct LineRow {
    line_id: Uuid,
    item_id: Uuid,
    quantity: Decimal,
    unit_price: Option<Decimal>,
    discount_pct: Decimal,
    deleted: bool,
}

#[derive(Debug, sqlx::FromRow)]
struct ItemPriceRow {
    item_id: Uuid,
    unit_price: Decimal,
}

fn parse_kind(raw: &str) -> Result<DocumentKind, DatabaseError> {
    match raw {
        "invoice" => Ok(DocumentKind::Invoice),
        "quote" => Ok(DocumentKind::Quote),
        "order" => Ok(DocumentKind::Order),
        "supplier_invoice" => Ok(DocumentKind::SupplierInvoice),
        other => Err(DatabaseError::InvalidStoredValue(format!(
            "unknown document kind '{other}'"
        ))),
    }
}

fn kind_str(kind: DocumentKind) -> &'static str {
    match kind {
        DocumentKind::Invoice => "invoice",
        DocumentKind::Quote => "quote",
        DocumentKind::Order => "order",
        DocumentKind::SupplierInvoice => "supplier_invoice",
    }
}

fn parse_nature(raw: &str) -> Result<DocumentNature, DatabaseError> {
    match raw {
        "standard" => Ok(DocumentNature::Standard),
        "credit_note" => Ok(DocumentNature::CreditNote),
        other => Err(DatabaseError::InvalidStoredValue(format!(
            "unknown document nature '{other}'"
        ))),
    }
}

fn nature_str(nature: DocumentNature) -> &'static str {
    match nature {
        DocumentNature::Standard => "standard",
        DocumentNature::CreditNote => "credit_note",
    }
}

impl DocumentRow {
    fn into_document(self, lines: Vec<Line>) -> Result<Document, DatabaseError> {
        let totals = match (
            self.total_ht,
            self.total_surcharge,
            self.total_vat,
            self.total_stamp,
            self.total_ttc,
        ) {
            (Some(ht), Some(surcharge), Some(vat), Some(stamp), Some(ttc)) => {
                Some(DocumentTotals {
                    ht: Money::new(ht),
                    surcharge: Money::new(surcharge),
                    vat: Money::new(vat),
                    stamp: Money::new(stamp),
                    ttc: Money::new(ttc),
                })
            }
            _ => None,
        };

        Ok(Document {
            id: DocumentId::from_uuid(self.document_id),
            number: self.number,
            kind: parse_kind(&self.kind)?,
            nature: parse_nature(&self.nature)?,
            client_id: self.client_id.map(ClientId::from_uuid),
            tax_rate: Rate::from_percentage(self.tax_rate),
            stamp_duty: Money::new(self.stamp_duty),
            issue_date: self.issue_date,
            lines,
            totals,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

impl From<LineRow> for Line {
    fn from(row: LineRow) -> Self {
        Line {
            id: LineId::from_uuid(row.line_id),
            item_id: ItemId::from_uuid(row.item_id),
            quantity: row.quantity,
            unit_price: row.unit_price.map(Money::new),
            discount_pct: row.discount_pct,
            deleted: row.deleted,
        }
    }
}

impl DocumentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts a document and its lines
    pub async fn create(&self, document: &Document) -> Result<(), DatabaseError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO documents (
                document_id, number, kind, nature, client_id, tax_rate,
                stamp_duty, issue_date, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(document.id.as_uuid())
        .bind(&document.number)
        .bind(kind_str(document.kind))
        .bind(nature_str(document.nature))
        .bind(document.client_id.map(|c| *c.as_uuid()))
        .bind(document.tax_rate.as_percentage())
        .bind(document.stamp_duty.amount())
        .bind(document.issue_date)
        .bind(document.created_at)
        .bind(document.updated_at)
        .execute(&mut *tx)
        .await?;

        for line in &document.lines {
            sqlx::query(
                r#"
                INSERT INTO document_lines (
                    line_id, document_id, item_id, quantity, unit_price,
                    discount_pct, deleted
                ) VALUES ($1, $2, $3, $4, $5, $6, $7)
                "#,
            )
            .bind(line.id.as_uuid())
            .bind(document.id.as_uuid())
            .bind(line.item_id.as_uuid())
            .bind(line.quantity)
            .bind(line.unit_price.map(|p| p.amount()))
            .bind(line.discount_pct)
            .bind(line.deleted)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// Loads a document with all of its lines
    pub async fn find_by_id(&self, id: DocumentId) -> Result<Document, DatabaseError> {
        let row: Option<DocumentRow> =
            sqlx::query_as("SELECT * FROM documents WHERE document_id = $1")
                .bind(id.as_uuid())
                .fetch_optional(&self.pool)
                .await?;
        let row = row.ok_or_else(|| DatabaseError::not_found("Document", id))?;

        let lines: Vec<LineRow> = sqlx::query_as(
            "SELECT line_id, item_id, quantity, unit_price, discount_pct, deleted \
             FROM document_lines WHERE document_id = $1 ORDER BY line_id",
        )
        .bind(id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        row.into_document(lines.into_iter().map(Line::from).collect())
    }

    /// Recomputes and stores a document's totals in one transaction
    ///
    /// Reads the document, its active lines, and the catalog prices of the
    /// referenced items, runs the totals calculation, and writes the result
    /// columns. The read and the write share a transaction so a concurrent
    /// line edit cannot produce totals for a state that never existed.
    #[instrument(skip(self))]
    pub async fn recompute_and_store_totals(
        &self,
        id: DocumentId,
    ) -> Result<DocumentTotals, DatabaseError> {
        let mut tx = self.pool.begin().await?;

        let row: Option<DocumentRow> =
            sqlx::query_as("SELECT * FROM documents WHERE document_id = $1 FOR UPDATE")
                .bind(id.as_uuid())
                .fetch_optional(&mut *tx)
                .await?;
        let row = row.ok_or_else(|| DatabaseError::not_found("Document", id))?;

        let lines: Vec<LineRow> = sqlx::query_as(
            "SELECT line_id, item_id, quantity, unit_price, discount_pct, deleted \
             FROM document_lines WHERE document_id = $1 ORDER BY line_id",
        )
        .bind(id.as_uuid())
        .fetch_all(&mut *tx)
        .await?;

        let prices: Vec<ItemPriceRow> = sqlx::query_as(
            "SELECT i.item_id, i.unit_price FROM items i \
             JOIN document_lines l ON l.item_id = i.item_id \
             WHERE l.document_id = $1",
        )
        .bind(id.as_uuid())
        .fetch_all(&mut *tx)
        .await?;

        let mut catalog = InMemoryCatalog::new();
        for price in prices {
            catalog.insert(ItemId::from_uuid(price.item_id), Money::new(price.unit_price));
        }

        let document = row.into_document(lines.into_iter().map(Line::from).collect())?;
        let totals = compute_totals(&document, &catalog)?;

        sqlx::query(
            r#"
            UPDATE documents
            SET total_ht = $2, total_surcharge = $3, total_vat = $4,
                total_stamp = $5, total_ttc = $6, updated_at = now()
            WHERE document_id = $1
            "#,
        )
        .bind(id.as_uuid())
        .bind(totals.ht.amount())
        .bind(totals.surcharge.amount())
        .bind(totals.vat.amount())
        .bind(totals.stamp.amount())
        .bind(totals.ttc.amount())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        debug!(document = %id, ttc = %totals.ttc, "stored recomputed totals");
        Ok(totals)
    }

    /// Inserts a catalog item
    pub async fn create_item(
        &self,
        id: ItemId,
        name: &str,
        unit_price: Money,
    ) -> Result<(), DatabaseError> {
        sqlx::query("INSERT INTO items (item_id, name, unit_price) VALUES ($1, $2, $3)")
            .bind(id.as_uuid())
            .bind(name)
            .bind(unit_price.amount())
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_round_trips_through_storage_form() {
        for kind in [
            DocumentKind::Invoice,
            DocumentKind::Quote,
            DocumentKind::Order,
            DocumentKind::SupplierInvoice,
        ] {
            assert_eq!(parse_kind(kind_str(kind)).unwrap(), kind);
        }
        assert!(parse_kind("receipt").is_err());
    }

    #[test]
    fn test_nature_round_trips_through_storage_form() {
        for nature in [DocumentNature::Standard, DocumentNature::CreditNote] {
            assert_eq!(parse_nature(nature_str(nature)).unwrap(), nature);
        }
    }
}
