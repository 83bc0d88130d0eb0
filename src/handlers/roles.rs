use axum::{extract::Path, Json};
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::services::role_service::{NewRole, RoleService, RoleUpdate};

/// GET /api/companies/:company_id/roles - list a company's role definitions
pub async fn list(Path(company_id): Path<i32>) -> Result<Json<Value>, ApiError> {
    let service = RoleService::new().await?;
    let roles = service.list_for_company(company_id).await?;
    Ok(Json(json!({ "success": true, "roles": roles })))
}

/// POST /api/roles - create a role definition
pub async fn create(Json(payload): Json<NewRole>) -> Result<Json<Value>, ApiError> {
    let service = RoleService::new().await?;
    let role = service.create(&payload).await?;
    Ok(Json(json!({ "success": true, "role": role })))
}

/// PUT /api/roles/:id - update a role definition
pub async fn update(
    Path(id): Path<i32>,
    Json(payload): Json<RoleUpdate>,
) -> Result<Json<Value>, ApiError> {
    let service = RoleService::new().await?;
    let role = service.update(id, &payload).await?;
    Ok(Json(json!({ "success": true, "role": role })))
}

/// DELETE /api/roles/:id - delete a role definition
pub async fn delete(Path(id): Path<i32>) -> Result<Json<Value>, ApiError> {
    let service = RoleService::new().await?;
    service.delete(id).await?;
    Ok(Json(json!({ "success": true })))
}
