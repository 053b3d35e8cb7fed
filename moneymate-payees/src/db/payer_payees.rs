//! SQLite payer/payee store

use super::{PayerPayeeStore, AUTOCOMPLETE_LIMIT};
use async_trait::async_trait;
use moneymate_common::models::{Pagination, PayerPayee, PayerPayeeType};
use moneymate_common::{Error, Result};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::debug;
use uuid::Uuid;

#[derive(Clone)]
pub struct SqlitePayerPayeeStore {
    pool: SqlitePool,
}

impl SqlitePayerPayeeStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn row_to_payer_payee(row: &SqliteRow) -> Result<PayerPayee> {
    let id_str: String = row.get("id");
    let id = Uuid::parse_str(&id_str)
        .map_err(|e| Error::Internal(format!("Invalid payer/payee id {}: {}", id_str, e)))?;

    Ok(PayerPayee {
        id,
        name: row.get("name"),
        external_id: row.get("external_id"),
    })
}

/// Escape LIKE wildcards so user input matches literally
fn like_prefix(prefix: &str) -> String {
    let mut escaped = String::with_capacity(prefix.len() + 1);
    for c in prefix.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

#[async_trait]
impl PayerPayeeStore for SqlitePayerPayeeStore {
    async fn put_payer_or_payee(&self, ty: PayerPayeeType, record: &PayerPayee) -> Result<()> {
        debug!(
            payer_payee_id = %record.id,
            external_id = %record.external_id,
            "Upserting {}", ty
        );

        sqlx::query(
            r#"
            INSERT INTO payer_payees (id, name, payer_payee_type, external_id)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                payer_payee_type = excluded.payer_payee_type,
                external_id = excluded.external_id
            "#,
        )
        .bind(record.id.to_string())
        .bind(&record.name)
        .bind(ty.as_str())
        .bind(&record.external_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn create_payer_or_payee(&self, ty: PayerPayeeType, record: &PayerPayee) -> Result<()> {
        let result = sqlx::query(
            r#"
            INSERT INTO payer_payees (id, name, payer_payee_type, external_id)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(record.id.to_string())
        .bind(&record.name)
        .bind(ty.as_str())
        .bind(&record.external_id)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => Err(
                Error::InvalidInput(format!("{} {} already exists", ty, record.id)),
            ),
            Err(e) => Err(e.into()),
        }
    }

    async fn get_payer_or_payee(&self, ty: PayerPayeeType, id: Uuid) -> Result<PayerPayee> {
        let row = sqlx::query(
            r#"
            SELECT id, name, external_id
            FROM payer_payees
            WHERE id = ? AND payer_payee_type = ?
            "#,
        )
        .bind(id.to_string())
        .bind(ty.as_str())
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => row_to_payer_payee(&row),
            None => Err(Error::NotFound(format!("{} {}", ty, id))),
        }
    }

    async fn list_payers_or_payees(
        &self,
        ty: PayerPayeeType,
        pagination: Pagination,
    ) -> Result<Vec<PayerPayee>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, external_id
            FROM payer_payees
            WHERE payer_payee_type = ?
            ORDER BY name, id
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(ty.as_str())
        .bind(pagination.limit as i64)
        .bind(pagination.offset as i64)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_payer_payee).collect()
    }

    async fn autocomplete_payer_or_payee(
        &self,
        ty: PayerPayeeType,
        prefix: &str,
    ) -> Result<Vec<PayerPayee>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, external_id
            FROM payer_payees
            WHERE payer_payee_type = ? AND name LIKE ? ESCAPE '\'
            ORDER BY name, id
            LIMIT ?
            "#,
        )
        .bind(ty.as_str())
        .bind(like_prefix(prefix))
        .bind(AUTOCOMPLETE_LIMIT as i64)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_payer_payee).collect()
    }
}
