//! Factories shared by the hierarchy unit tests.

use chrono::Utc;

use crate::database::models::Role;
use crate::hierarchy::{FlatNode, PlacementId, RoleId};

/// A role definition with neutral scoring defaults.
pub fn role(id: i32, name: &str) -> Role {
    Role {
        id,
        company_id: 1,
        name: name.to_string(),
        description: None,
        meeting_weight: 1,
        top_meeting_count: 5,
        research_review_weight: 1,
        research_review_top_count: 5,
        task_weight: 1,
        task_top_count: 5,
        rating_given_weight: 1,
        rating_given_top_count: 5,
        est_cph: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

/// A persisted placement row.
pub fn flat(id: i32, role_id: i32, parent: Option<i32>, sort: i32, depth: i32) -> FlatNode {
    FlatNode {
        id: PlacementId(id),
        role_id: RoleId(role_id),
        parent_node_id: parent.map(PlacementId),
        sort_order: sort,
        depth_level: depth,
    }
}
