use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A reusable role definition belonging to a company.
///
/// Roles exist independently of any hierarchy; placing one in an
/// organization's chart is a separate row in `organization_role_nodes`.
/// The weight/top-count pairs drive downstream activity scoring and are
/// carried verbatim; the hierarchy machinery only reads `id`, `name` and
/// `description`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Role {
    pub id: i32,
    pub company_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub meeting_weight: i32,
    pub top_meeting_count: i32,
    pub research_review_weight: i32,
    pub research_review_top_count: i32,
    pub task_weight: i32,
    pub task_top_count: i32,
    pub rating_given_weight: i32,
    pub rating_given_top_count: i32,
    pub est_cph: Option<Decimal>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
