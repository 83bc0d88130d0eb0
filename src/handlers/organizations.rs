use axum::{extract::Path, Json};
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::services::organization_service::{
    NewOrganization, OrganizationService, OrganizationUpdate,
};

/// GET /api/companies/:company_id/organizations - list a company's branches
pub async fn list(Path(company_id): Path<i32>) -> Result<Json<Value>, ApiError> {
    let service = OrganizationService::new().await?;
    let organizations = service.list_for_company(company_id).await?;
    Ok(Json(json!({ "success": true, "organizations": organizations })))
}

/// POST /api/organizations - create a branch
pub async fn create(Json(payload): Json<NewOrganization>) -> Result<Json<Value>, ApiError> {
    let service = OrganizationService::new().await?;
    let organization = service.create(&payload).await?;
    Ok(Json(json!({ "success": true, "organization": organization })))
}

/// PUT /api/organizations/:id - update a branch
pub async fn update(
    Path(id): Path<i32>,
    Json(payload): Json<OrganizationUpdate>,
) -> Result<Json<Value>, ApiError> {
    let service = OrganizationService::new().await?;
    let organization = service.update(id, &payload).await?;
    Ok(Json(json!({ "success": true, "organization": organization })))
}

/// DELETE /api/organizations/:id - delete a branch and its hierarchy
pub async fn delete(Path(id): Path<i32>) -> Result<Json<Value>, ApiError> {
    let service = OrganizationService::new().await?;
    service.delete(id).await?;
    Ok(Json(json!({ "success": true })))
}
