use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::PgPool;

use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::Role;

fn default_weight() -> i32 {
    1
}

fn default_top_count() -> i32 {
    5
}

/// Payload for creating a role. Weights default to 1 and top counts to 5
/// when the client omits them.
#[derive(Debug, Clone, Deserialize)]
pub struct NewRole {
    pub company_id: i32,
    pub name: String,
    pub description: Option<String>,
    #[serde(default = "default_weight")]
    pub meeting_weight: i32,
    #[serde(default = "default_top_count")]
    pub top_meeting_count: i32,
    #[serde(default = "default_weight")]
    pub research_review_weight: i32,
    #[serde(default = "default_top_count")]
    pub research_review_top_count: i32,
    #[serde(default = "default_weight")]
    pub task_weight: i32,
    #[serde(default = "default_top_count")]
    pub task_top_count: i32,
    #[serde(default = "default_weight")]
    pub rating_given_weight: i32,
    #[serde(default = "default_top_count")]
    pub rating_given_top_count: i32,
    pub est_cph: Option<Decimal>,
}

/// Partial update; omitted fields keep their stored values.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RoleUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub meeting_weight: Option<i32>,
    pub top_meeting_count: Option<i32>,
    pub research_review_weight: Option<i32>,
    pub research_review_top_count: Option<i32>,
    pub task_weight: Option<i32>,
    pub task_top_count: Option<i32>,
    pub rating_given_weight: Option<i32>,
    pub rating_given_top_count: Option<i32>,
    pub est_cph: Option<Decimal>,
}

#[derive(Debug, thiserror::Error)]
pub enum RoleError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Database manager error: {0}")]
    DatabaseManager(#[from] DatabaseError),
    #[error("Role not found: {0}")]
    NotFound(i32),
}

pub struct RoleService {
    pool: PgPool,
}

impl RoleService {
    pub async fn new() -> Result<Self, RoleError> {
        let pool = DatabaseManager::pool().await?;
        Ok(Self { pool })
    }

    pub fn with_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// All role definitions for a company, ordered by name.
    pub async fn list_for_company(&self, company_id: i32) -> Result<Vec<Role>, RoleError> {
        let roles = sqlx::query_as::<_, Role>(
            "SELECT * FROM company_roles WHERE company_id = $1 ORDER BY name",
        )
        .bind(company_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(roles)
    }

    pub async fn get(&self, id: i32) -> Result<Role, RoleError> {
        sqlx::query_as::<_, Role>("SELECT * FROM company_roles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(RoleError::NotFound(id))
    }

    pub async fn create(&self, role: &NewRole) -> Result<Role, RoleError> {
        let created = sqlx::query_as::<_, Role>(
            r#"
            INSERT INTO company_roles (
                company_id, name, description,
                meeting_weight, top_meeting_count,
                research_review_weight, research_review_top_count,
                task_weight, task_top_count,
                rating_given_weight, rating_given_top_count,
                est_cph
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING *
            "#,
        )
        .bind(role.company_id)
        .bind(&role.name)
        .bind(&role.description)
        .bind(role.meeting_weight)
        .bind(role.top_meeting_count)
        .bind(role.research_review_weight)
        .bind(role.research_review_top_count)
        .bind(role.task_weight)
        .bind(role.task_top_count)
        .bind(role.rating_given_weight)
        .bind(role.rating_given_top_count)
        .bind(role.est_cph)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    pub async fn update(&self, id: i32, changes: &RoleUpdate) -> Result<Role, RoleError> {
        sqlx::query_as::<_, Role>(
            r#"
            UPDATE company_roles SET
                name = COALESCE($1, name),
                description = COALESCE($2, description),
                meeting_weight = COALESCE($3, meeting_weight),
                top_meeting_count = COALESCE($4, top_meeting_count),
                research_review_weight = COALESCE($5, research_review_weight),
                research_review_top_count = COALESCE($6, research_review_top_count),
                task_weight = COALESCE($7, task_weight),
                task_top_count = COALESCE($8, task_top_count),
                rating_given_weight = COALESCE($9, rating_given_weight),
                rating_given_top_count = COALESCE($10, rating_given_top_count),
                est_cph = COALESCE($11, est_cph),
                updated_at = NOW()
            WHERE id = $12
            RETURNING *
            "#,
        )
        .bind(&changes.name)
        .bind(&changes.description)
        .bind(changes.meeting_weight)
        .bind(changes.top_meeting_count)
        .bind(changes.research_review_weight)
        .bind(changes.research_review_top_count)
        .bind(changes.task_weight)
        .bind(changes.task_top_count)
        .bind(changes.rating_given_weight)
        .bind(changes.rating_given_top_count)
        .bind(changes.est_cph)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(RoleError::NotFound(id))
    }

    /// Delete a role definition. Placements referencing it cascade away in
    /// the store; already-loaded trees drop it on their next rebuild.
    pub async fn delete(&self, id: i32) -> Result<(), RoleError> {
        let result = sqlx::query("DELETE FROM company_roles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(RoleError::NotFound(id));
        }
        Ok(())
    }
}
