use std::collections::HashSet;

use crate::hierarchy::node::NodeId;
use crate::hierarchy::tree::RoleTree;

/// Which nodes are expanded for rendering. Presentation state only: it is
/// never persisted, and the structural operations only ever *add* to it (to
/// keep freshly created or reparented children visible), never read it.
#[derive(Debug, Clone, Default)]
pub struct ExpandedNodes {
    set: HashSet<NodeId>,
}

impl ExpandedNodes {
    pub fn insert(&mut self, id: NodeId) {
        self.set.insert(id);
    }

    pub fn remove(&mut self, id: NodeId) {
        self.set.remove(&id);
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.set.contains(&id)
    }

    /// Flip membership; returns the new state.
    pub fn toggle(&mut self, id: NodeId) -> bool {
        if self.set.remove(&id) {
            false
        } else {
            self.set.insert(id);
            true
        }
    }

    pub fn len(&self) -> usize {
        self.set.len()
    }

    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }
}

impl RoleTree {
    /// Pre-order render list: `(node, depth)` pairs, descending only into
    /// expanded nodes. This is the list a tree view draws one row per entry.
    pub fn visible_nodes(&self) -> Vec<(NodeId, usize)> {
        let mut out = Vec::new();
        for &root in &self.roots {
            self.visible_into(root, 0, &mut out);
        }
        out
    }

    fn visible_into(&self, id: NodeId, depth: usize, out: &mut Vec<(NodeId, usize)>) {
        if self.node(id).is_none() {
            return;
        }
        out.push((id, depth));
        if self.is_expanded(id) {
            for &child in self.children(id) {
                self.visible_into(child, depth + 1, out);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::role;

    #[test]
    fn toggle_twice_restores_membership() {
        let mut tree = RoleTree::new();
        let id = tree.add_role(&role(1, "A"), None).unwrap();
        assert!(tree.is_expanded(id));
        assert!(!tree.toggle_expanded(id));
        assert!(!tree.is_expanded(id));
        assert!(tree.toggle_expanded(id));
        assert!(tree.is_expanded(id));
    }

    #[test]
    fn collapsing_hides_descendants_from_the_render_list() {
        let mut tree = RoleTree::new();
        let a = tree.add_role(&role(1, "A"), None).unwrap();
        let b = tree.add_role(&role(2, "B"), Some(a)).unwrap();
        let c = tree.add_role(&role(3, "C"), Some(b)).unwrap();
        let d = tree.add_role(&role(4, "D"), None).unwrap();

        assert_eq!(tree.visible_nodes(), [(a, 0), (b, 1), (c, 2), (d, 0)]);

        tree.toggle_expanded(b);
        assert_eq!(tree.visible_nodes(), [(a, 0), (b, 1), (d, 0)]);

        // Collapsing the root hides the collapsed child too; re-expanding
        // the root restores it with B still collapsed underneath.
        tree.toggle_expanded(a);
        assert_eq!(tree.visible_nodes(), [(a, 0), (d, 0)]);
        tree.toggle_expanded(a);
        assert_eq!(tree.visible_nodes(), [(a, 0), (b, 1), (d, 0)]);
    }

    #[test]
    fn expanded_set_tracks_inserts_and_removals() {
        let mut set = ExpandedNodes::default();
        assert!(set.is_empty());
        let id = NodeId(3);
        set.insert(id);
        assert!(set.contains(id));
        assert_eq!(set.len(), 1);
        set.remove(id);
        assert!(!set.contains(id));
    }
}
