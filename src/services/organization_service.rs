use serde::Deserialize;
use sqlx::PgPool;

use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::Organization;

#[derive(Debug, Clone, Deserialize)]
pub struct NewOrganization {
    pub company_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

/// Partial update; omitted fields keep their stored values.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrganizationUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, thiserror::Error)]
pub enum OrganizationError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Database manager error: {0}")]
    DatabaseManager(#[from] DatabaseError),
    #[error("Organization not found: {0}")]
    NotFound(i32),
}

pub struct OrganizationService {
    pool: PgPool,
}

impl OrganizationService {
    pub async fn new() -> Result<Self, OrganizationError> {
        let pool = DatabaseManager::pool().await?;
        Ok(Self { pool })
    }

    pub fn with_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_for_company(
        &self,
        company_id: i32,
    ) -> Result<Vec<Organization>, OrganizationError> {
        let organizations = sqlx::query_as::<_, Organization>(
            r#"
            SELECT id, company_id, name, description, is_active, created_at, updated_at
            FROM organizations WHERE company_id = $1 ORDER BY name
            "#,
        )
        .bind(company_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(organizations)
    }

    pub async fn create(&self, org: &NewOrganization) -> Result<Organization, OrganizationError> {
        let created = sqlx::query_as::<_, Organization>(
            r#"
            INSERT INTO organizations (company_id, name, description, is_active)
            VALUES ($1, $2, $3, COALESCE($4, TRUE)) RETURNING *
            "#,
        )
        .bind(org.company_id)
        .bind(&org.name)
        .bind(&org.description)
        .bind(org.is_active)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    pub async fn update(
        &self,
        id: i32,
        changes: &OrganizationUpdate,
    ) -> Result<Organization, OrganizationError> {
        sqlx::query_as::<_, Organization>(
            r#"
            UPDATE organizations SET
                name = COALESCE($1, name),
                description = COALESCE($2, description),
                is_active = COALESCE($3, is_active),
                updated_at = NOW()
            WHERE id = $4 RETURNING *
            "#,
        )
        .bind(&changes.name)
        .bind(&changes.description)
        .bind(changes.is_active)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(OrganizationError::NotFound(id))
    }

    /// Delete a branch; its hierarchy placements cascade away with it.
    pub async fn delete(&self, id: i32) -> Result<(), OrganizationError> {
        let result = sqlx::query("DELETE FROM organizations WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(OrganizationError::NotFound(id));
        }
        Ok(())
    }
}
