use sqlx::PgPool;
use tracing::info;

use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::Role;
use crate::hierarchy::{FlatNode, FlatNodeWrite, RoleTree};

#[derive(Debug, thiserror::Error)]
pub enum HierarchyError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Database manager error: {0}")]
    DatabaseManager(#[from] DatabaseError),
    #[error("Organization not found: {0}")]
    OrganizationNotFound(i32),
    #[error("node {row} references parent index {parent}; parents must precede children")]
    InvalidParentRef { row: usize, parent: usize },
}

/// Load and wholesale-replace an organization's persisted role tree.
pub struct HierarchyService {
    pool: PgPool,
}

impl HierarchyService {
    pub async fn new() -> Result<Self, HierarchyError> {
        let pool = DatabaseManager::pool().await?;
        Ok(Self { pool })
    }

    pub fn with_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The organization's placement rows, ordered the way the builder and
    /// the UI expect them (grouped by parent, then rank, then id).
    pub async fn load_tree(&self, organization_id: i32) -> Result<Vec<FlatNode>, HierarchyError> {
        let nodes = sqlx::query_as::<_, FlatNode>(
            r#"
            SELECT id, role_id, parent_node_id, sort_order, depth_level
            FROM organization_role_nodes WHERE organization_id = $1
            ORDER BY COALESCE(parent_node_id, 0), sort_order, id
            "#,
        )
        .bind(organization_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(nodes)
    }

    /// Replace the organization's tree with the submitted rows, atomically.
    ///
    /// The rows are normalized through the hierarchy core before they touch
    /// the store: synthetic placement ids are assigned from row positions,
    /// the forest is rebuilt (dropping placements of deleted roles,
    /// recovering dangling parents, breaking cycles) and re-flattened, so
    /// whatever the client sent, the store ends up with contiguous sort
    /// orders and parent-plus-one depths. Prior placements are deleted and
    /// fresh ids assigned; parent references are remapped as rows are
    /// inserted in pre-order.
    pub async fn replace_tree(
        &self,
        organization_id: i32,
        rows: &[FlatNodeWrite],
    ) -> Result<usize, HierarchyError> {
        for (i, row) in rows.iter().enumerate() {
            if let Some(p) = row.parent_index {
                if p >= i {
                    return Err(HierarchyError::InvalidParentRef { row: i, parent: p });
                }
            }
        }

        let company_id = self.company_for_organization(organization_id).await?;
        let roles = sqlx::query_as::<_, Role>("SELECT * FROM company_roles WHERE company_id = $1")
            .bind(company_id)
            .fetch_all(&self.pool)
            .await?;

        let synthetic = FlatNodeWrite::with_synthetic_ids(rows);
        let tree = RoleTree::build(&synthetic, &roles);
        let writes = tree.flatten();

        let mut tx = self.pool.begin().await?;
        sqlx::query("DELETE FROM organization_role_nodes WHERE organization_id = $1")
            .bind(organization_id)
            .execute(&mut *tx)
            .await?;

        // Pre-order emission means every parent_index points at a row whose
        // fresh id is already known, so one pass suffices.
        let mut inserted_ids: Vec<i32> = Vec::with_capacity(writes.len());
        for write in &writes {
            let parent_node_id: Option<i32> = write.parent_index.map(|p| inserted_ids[p]);
            let (id,): (i32,) = sqlx::query_as(
                r#"
                INSERT INTO organization_role_nodes
                    (organization_id, role_id, parent_node_id, sort_order, depth_level)
                VALUES ($1, $2, $3, $4, $5) RETURNING id
                "#,
            )
            .bind(organization_id)
            .bind(write.role_id)
            .bind(parent_node_id)
            .bind(write.sort_order)
            .bind(write.depth_level)
            .fetch_one(&mut *tx)
            .await?;
            inserted_ids.push(id);
        }
        tx.commit().await?;

        info!(
            organization_id,
            submitted = rows.len(),
            saved = writes.len(),
            "replaced role tree"
        );
        Ok(writes.len())
    }

    async fn company_for_organization(&self, organization_id: i32) -> Result<i32, HierarchyError> {
        let row: Option<(i32,)> =
            sqlx::query_as("SELECT company_id FROM organizations WHERE id = $1")
                .bind(organization_id)
                .fetch_optional(&self.pool)
                .await?;
        row.map(|(company_id,)| company_id)
            .ok_or(HierarchyError::OrganizationNotFound(organization_id))
    }
}
