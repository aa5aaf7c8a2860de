//! PostgreSQL prospect store.
//!
//! Key columns for the check-then-insert match, full record as JSONB.
//! Queries are runtime-bound so the crate builds without a live database.

use async_trait::async_trait;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};
use crate::traits::store::{InsertOutcome, ProspectStore};
use crate::types::ScoredProspect;

/// sqlx-backed store; enable with the `postgres` feature.
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the prospects table when absent.
    pub async fn ensure_schema(&self) -> StoreResult<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS prospects (
                id UUID PRIMARY KEY,
                email TEXT,
                first_name TEXT NOT NULL,
                last_name TEXT NOT NULL,
                company TEXT NOT NULL,
                payload JSONB NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT now()
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::Backend(Box::new(e)))?;
        Ok(())
    }

    async fn find_match(&self, prospect: &ScoredProspect) -> StoreResult<Option<Uuid>> {
        let email = prospect
            .contact
            .email
            .as_deref()
            .map(|e| e.trim().to_lowercase())
            .filter(|e| !e.is_empty());

        let row = sqlx::query(
            r#"
            SELECT id FROM prospects
            WHERE ($1::TEXT IS NOT NULL AND lower(email) = $1)
               OR (lower(first_name) = $2 AND lower(last_name) = $3 AND lower(company) = $4)
            LIMIT 1
            "#,
        )
        .bind(email)
        .bind(prospect.contact.first_name.trim().to_lowercase())
        .bind(prospect.contact.last_name.trim().to_lowercase())
        .bind(prospect.contact.company.trim().to_lowercase())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::Backend(Box::new(e)))?;

        row.map(|r| r.try_get::<Uuid, _>("id"))
            .transpose()
            .map_err(|e| StoreError::Backend(Box::new(e)))
    }
}

#[async_trait]
impl ProspectStore for PostgresStore {
    async fn insert_if_new(&self, prospect: &ScoredProspect) -> StoreResult<InsertOutcome> {
        if let Some(existing_id) = self.find_match(prospect).await? {
            return Ok(InsertOutcome::AlreadyExists(existing_id));
        }

        let payload =
            serde_json::to_value(prospect).map_err(|e| StoreError::Backend(Box::new(e)))?;

        sqlx::query(
            r#"
            INSERT INTO prospects (id, email, first_name, last_name, company, payload)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(prospect.contact.id)
        .bind(prospect.contact.email.as_deref())
        .bind(&prospect.contact.first_name)
        .bind(&prospect.contact.last_name)
        .bind(&prospect.contact.company)
        .bind(payload)
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::Backend(Box::new(e)))?;

        Ok(InsertOutcome::Inserted)
    }

    async fn get(&self, id: Uuid) -> StoreResult<Option<ScoredProspect>> {
        let row = sqlx::query("SELECT payload FROM prospects WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StoreError::Backend(Box::new(e)))?;

        row.map(|r| {
            let payload: serde_json::Value = r
                .try_get("payload")
                .map_err(|e| StoreError::Backend(Box::new(e)))?;
            serde_json::from_value(payload).map_err(|e| StoreError::Backend(Box::new(e)))
        })
        .transpose()
    }

    async fn count(&self) -> StoreResult<usize> {
        let row = sqlx::query("SELECT count(*) AS n FROM prospects")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| StoreError::Backend(Box::new(e)))?;

        let n: i64 = row
            .try_get("n")
            .map_err(|e| StoreError::Backend(Box::new(e)))?;
        Ok(n as usize)
    }
}
