use std::collections::{HashMap, HashSet};

use tracing::{debug, warn};

use crate::database::models::Role;
use crate::hierarchy::node::{FlatNode, NodeId, PlacementId, RoleId};
use crate::hierarchy::tree::{RoleTree, TreeNode};

impl RoleTree {
    /// Build the forest from persisted placement rows plus the company's
    /// role definitions.
    ///
    /// Tolerant by design: rows whose role has since been deleted are
    /// skipped, rows whose parent cannot be found are promoted to roots,
    /// and parent cycles (only producible by a store bypassing the save
    /// path) are broken by re-rooting rather than by failing the load.
    /// Every surviving node starts expanded.
    pub fn build(flat_nodes: &[FlatNode], roles: &[Role]) -> RoleTree {
        let role_by_id: HashMap<RoleId, &Role> =
            roles.iter().map(|r| (RoleId(r.id), r)).collect();

        let mut tree = RoleTree::new();
        let mut by_placement: HashMap<PlacementId, NodeId> = HashMap::new();
        let mut sort_key: HashMap<NodeId, (i32, PlacementId)> = HashMap::new();

        // First pass: materialize a node per row whose role still exists.
        for row in flat_nodes {
            let Some(role) = role_by_id.get(&row.role_id) else {
                debug!(role_id = row.role_id.0, placement = row.id.0, "skipping placement for deleted role");
                continue;
            };
            let id = tree.push_node(TreeNode {
                role_id: row.role_id,
                name: role.name.clone(),
                description: role.description.clone(),
                parent: None,
                children: Vec::new(),
            });
            by_placement.insert(row.id, id);
            sort_key.insert(id, (row.sort_order, row.id));
        }

        // Second pass: link children to parents by placement id.
        for row in flat_nodes {
            let Some(&id) = by_placement.get(&row.id) else {
                continue;
            };
            match row.parent_node_id {
                None => tree.roots.push(id),
                Some(parent_placement) => match by_placement.get(&parent_placement) {
                    Some(&parent) if parent != id => {
                        if let Some(n) = tree.slots[parent.0].as_mut() {
                            n.children.push(id);
                        }
                        if let Some(n) = tree.slots[id.0].as_mut() {
                            n.parent = Some(parent);
                        }
                    }
                    _ => {
                        warn!(
                            placement = row.id.0,
                            parent = parent_placement.0,
                            "dangling parent reference; promoting placement to root"
                        );
                        tree.roots.push(id);
                    }
                },
            }
        }

        // Restore persisted sibling order. Placement id breaks sort_order
        // ties the same way the store's ORDER BY does.
        let key = |id: &NodeId| sort_key.get(id).copied().unwrap_or((0, PlacementId(0)));
        tree.roots.sort_by_key(key);
        for slot in tree.slots.iter_mut().flatten() {
            slot.children.sort_by_key(key);
        }

        break_cycles(&mut tree);

        for idx in 0..tree.slots.len() {
            if tree.slots[idx].is_some() {
                tree.expanded.insert(NodeId(idx));
            }
        }

        tree
    }
}

/// Any node unreachable from the roots after linking sits on a parent cycle.
/// Sever the first such node's parent edge and make it a root; its subtree
/// comes along intact. Repeats until everything is reachable.
fn break_cycles(tree: &mut RoleTree) {
    let mut reachable: HashSet<NodeId> = HashSet::new();
    let mut stack: Vec<NodeId> = tree.roots.clone();
    while let Some(id) = stack.pop() {
        if reachable.insert(id) {
            stack.extend(tree.children(id).iter().copied());
        }
    }

    for idx in 0..tree.slots.len() {
        let id = NodeId(idx);
        if tree.slots[idx].is_none() || reachable.contains(&id) {
            continue;
        }
        warn!(slot = idx, "parent cycle in stored hierarchy; re-rooting node");
        if let Some(parent) = tree.parent(id) {
            if let Some(node) = tree.slots[parent.0].as_mut() {
                node.children.retain(|&c| c != id);
            }
        }
        if let Some(node) = tree.slots[idx].as_mut() {
            node.parent = None;
        }
        tree.roots.push(id);

        let mut stack = vec![id];
        while let Some(cur) = stack.pop() {
            if reachable.insert(cur) {
                stack.extend(tree.children(cur).iter().copied());
            }
        }
    }
}
