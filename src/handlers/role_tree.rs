use axum::{extract::Path, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::hierarchy::FlatNodeWrite;
use crate::services::hierarchy_service::HierarchyService;

#[derive(Debug, Deserialize)]
pub struct SaveTreePayload {
    pub nodes: Vec<FlatNodeWrite>,
}

/// GET /api/organizations/:id/role-tree - the persisted placement rows
pub async fn get(Path(organization_id): Path<i32>) -> Result<Json<Value>, ApiError> {
    let service = HierarchyService::new().await?;
    let nodes = service.load_tree(organization_id).await?;
    Ok(Json(json!({ "success": true, "nodes": nodes })))
}

/// POST /api/organizations/:id/role-tree - replace the tree wholesale.
/// Prior placements are discarded and fresh ids assigned.
pub async fn save(
    Path(organization_id): Path<i32>,
    Json(payload): Json<SaveTreePayload>,
) -> Result<Json<Value>, ApiError> {
    let service = HierarchyService::new().await?;
    let saved = service.replace_tree(organization_id, &payload.nodes).await?;
    Ok(Json(json!({ "success": true, "saved": saved })))
}
