use serde::{Deserialize, Serialize};

/// Identity of a role definition (`company_roles.id`).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[serde(transparent)]
#[sqlx(transparent)]
pub struct RoleId(pub i32);

/// Identity of one placement row (`organization_role_nodes.id`).
///
/// Kept distinct from [`RoleId`]: a placement is "this role, at this position
/// in this organization's chart", and nothing in the tree machinery relies on
/// a role appearing only once.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[serde(transparent)]
#[sqlx(transparent)]
pub struct PlacementId(pub i32);

/// Handle to a node in an in-memory [`RoleTree`][crate::hierarchy::RoleTree].
///
/// Stable for the lifetime of the tree it came from (removal tombstones the
/// slot rather than shifting indices). Meaningless across trees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

/// One persisted placement row, as read from the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct FlatNode {
    pub id: PlacementId,
    pub role_id: RoleId,
    pub parent_node_id: Option<PlacementId>,
    pub sort_order: i32,
    pub depth_level: i32,
}

/// One placement row on its way to the store.
///
/// Fresh saves never carry placement ids - the store assigns them. The parent
/// reference is therefore the index of the parent row within the same list;
/// pre-order emission guarantees that index points at an earlier row, so the
/// store can remap to real ids in a single insert pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatNodeWrite {
    pub role_id: RoleId,
    pub parent_index: Option<usize>,
    pub sort_order: i32,
    pub depth_level: i32,
}

impl FlatNodeWrite {
    /// Assign synthetic placement ids (row position, 1-based) to a submitted
    /// batch so it can be rebuilt through [`RoleTree::build`]. A
    /// `parent_index` outside `0..row` is mapped to a placement id no row
    /// carries; the builder then applies its dangling-parent recovery.
    pub fn with_synthetic_ids(rows: &[Self]) -> Vec<FlatNode> {
        rows.iter()
            .enumerate()
            .map(|(i, row)| FlatNode {
                id: PlacementId(i as i32 + 1),
                role_id: row.role_id,
                parent_node_id: row.parent_index.map(|p| PlacementId(p as i32 + 1)),
                sort_order: row.sort_order,
                depth_level: row.depth_level,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synthetic_ids_are_row_positions() {
        let rows = vec![
            FlatNodeWrite { role_id: RoleId(7), parent_index: None, sort_order: 0, depth_level: 0 },
            FlatNodeWrite { role_id: RoleId(8), parent_index: Some(0), sort_order: 0, depth_level: 1 },
            FlatNodeWrite { role_id: RoleId(9), parent_index: Some(1), sort_order: 0, depth_level: 2 },
        ];
        let flat = FlatNodeWrite::with_synthetic_ids(&rows);
        assert_eq!(flat[0].id, PlacementId(1));
        assert_eq!(flat[0].parent_node_id, None);
        assert_eq!(flat[1].parent_node_id, Some(PlacementId(1)));
        assert_eq!(flat[2].parent_node_id, Some(PlacementId(2)));
    }
}
