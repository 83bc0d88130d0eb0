use crate::hierarchy::node::{FlatNodeWrite, NodeId};
use crate::hierarchy::tree::RoleTree;

impl RoleTree {
    /// Re-flatten the forest for a wholesale save: pre-order depth-first,
    /// with `sort_order` and `depth_level` recomputed from the current
    /// shape. Sibling order in the output mirrors the children lists
    /// exactly, which is what makes a reorder survive a save/reload
    /// round-trip. Expansion state plays no part.
    pub fn flatten(&self) -> Vec<FlatNodeWrite> {
        let mut out = Vec::with_capacity(self.len());
        for (i, &root) in self.roots.iter().enumerate() {
            self.flatten_into(root, None, i as i32, 0, &mut out);
        }
        out
    }

    fn flatten_into(
        &self,
        id: NodeId,
        parent_index: Option<usize>,
        sort_order: i32,
        depth_level: i32,
        out: &mut Vec<FlatNodeWrite>,
    ) {
        let Some(node) = self.node(id) else {
            return;
        };
        let my_index = out.len();
        out.push(FlatNodeWrite {
            role_id: node.role_id,
            parent_index,
            sort_order,
            depth_level,
        });
        for (i, &child) in node.children.iter().enumerate() {
            self.flatten_into(child, Some(my_index), i as i32, depth_level + 1, out);
        }
    }
}
