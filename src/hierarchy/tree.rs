use crate::database::models::Role;
use crate::hierarchy::expand::ExpandedNodes;
use crate::hierarchy::node::{NodeId, RoleId};

/// One node of the in-memory forest: the role's display fields plus its
/// structural links. Children are owned exclusively by their parent's index
/// list; the explicit back-link keeps sibling lookups O(1) during edits.
#[derive(Debug, Clone)]
pub struct TreeNode {
    pub role_id: RoleId,
    pub name: String,
    pub description: Option<String>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

/// An editable forest of role placements.
///
/// Nodes live in an arena (`slots`); a [`NodeId`] is an index into it and
/// stays valid until the tree is dropped - removal tombstones slots instead
/// of shifting them. Every structural operation is a silent no-op when its
/// target is missing or its precondition fails: those cases correspond to
/// disabled buttons in the editing UI, not to errors.
#[derive(Debug, Clone, Default)]
pub struct RoleTree {
    pub(crate) slots: Vec<Option<TreeNode>>,
    pub(crate) roots: Vec<NodeId>,
    pub(crate) expanded: ExpandedNodes,
}

impl RoleTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live nodes in the forest.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(|s| s.is_none())
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn node(&self, id: NodeId) -> Option<&TreeNode> {
        self.slots.get(id.0).and_then(|s| s.as_ref())
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(|n| n.parent)
    }

    /// Depth of a node: 0 for roots, parent's depth + 1 otherwise.
    pub fn depth(&self, id: NodeId) -> Option<usize> {
        self.node(id)?;
        let mut depth = 0;
        let mut cur = self.parent(id);
        while let Some(p) = cur {
            depth += 1;
            cur = self.parent(p);
        }
        Some(depth)
    }

    /// Locate the placement of a role, if it is in the forest. One placement
    /// per role is the expected (UI-enforced) shape; with duplicates present
    /// an arbitrary one is returned.
    pub fn find_role(&self, role_id: RoleId) -> Option<NodeId> {
        self.slots
            .iter()
            .enumerate()
            .find(|(_, s)| s.as_ref().is_some_and(|n| n.role_id == role_id))
            .map(|(i, _)| NodeId(i))
    }

    /// Role ids of every live placement, in arena order. The "available
    /// roles" side panel excludes these.
    pub fn placed_roles(&self) -> Vec<RoleId> {
        self.slots
            .iter()
            .flatten()
            .map(|n| n.role_id)
            .collect()
    }

    pub fn is_expanded(&self, id: NodeId) -> bool {
        self.expanded.contains(id)
    }

    /// Flip a node's expansion state; returns the new state. Presentation
    /// only - never consulted by the structural operations below.
    pub fn toggle_expanded(&mut self, id: NodeId) -> bool {
        self.expanded.toggle(id)
    }

    /// Append a new placement for `role`, under `parent` or at the roots.
    /// The parent (if given) is expanded so the new child is visible.
    /// Returns `None` without touching the forest when `parent` does not
    /// resolve to a live node.
    pub fn add_role(&mut self, role: &Role, parent: Option<NodeId>) -> Option<NodeId> {
        if let Some(p) = parent {
            self.node(p)?;
        }
        let id = self.push_node(TreeNode {
            role_id: RoleId(role.id),
            name: role.name.clone(),
            description: role.description.clone(),
            parent,
            children: Vec::new(),
        });
        match parent {
            Some(p) => {
                self.slot_mut(p).children.push(id);
                self.expanded.insert(p);
            }
            None => self.roots.push(id),
        }
        self.expanded.insert(id);
        Some(id)
    }

    /// Swap a node with its previous sibling. No-op at the first position.
    pub fn move_up(&mut self, id: NodeId) -> bool {
        let Some(parent) = self.node(id).map(|n| n.parent) else {
            return false;
        };
        let siblings = self.siblings_mut(parent);
        match siblings.iter().position(|&c| c == id) {
            Some(idx) if idx > 0 => {
                siblings.swap(idx, idx - 1);
                true
            }
            _ => false,
        }
    }

    /// Swap a node with its next sibling. No-op at the last position.
    pub fn move_down(&mut self, id: NodeId) -> bool {
        let Some(parent) = self.node(id).map(|n| n.parent) else {
            return false;
        };
        let siblings = self.siblings_mut(parent);
        match siblings.iter().position(|&c| c == id) {
            Some(idx) if idx + 1 < siblings.len() => {
                siblings.swap(idx, idx + 1);
                true
            }
            _ => false,
        }
    }

    /// Outdent: promote a node to its parent's level, immediately after the
    /// parent in the parent's own sibling list. No-op for roots.
    pub fn move_left(&mut self, id: NodeId) -> bool {
        let Some(parent) = self.node(id).and_then(|n| n.parent) else {
            return false;
        };
        let grandparent = self.node(parent).and_then(|n| n.parent);

        let children = &mut self.slot_mut(parent).children;
        let Some(idx) = children.iter().position(|&c| c == id) else {
            return false;
        };
        children.remove(idx);

        let parent_siblings = self.siblings_mut(grandparent);
        let after = parent_siblings
            .iter()
            .position(|&c| c == parent)
            .map_or(parent_siblings.len(), |p| p + 1);
        parent_siblings.insert(after, id);
        self.slot_mut(id).parent = grandparent;
        true
    }

    /// Indent: demote a node under its immediately preceding sibling, as that
    /// sibling's last child. The new parent is expanded so the node stays
    /// visible. No-op at the first position.
    pub fn move_right(&mut self, id: NodeId) -> bool {
        let Some(parent) = self.node(id).map(|n| n.parent) else {
            return false;
        };
        let siblings = self.siblings_mut(parent);
        let Some(idx) = siblings.iter().position(|&c| c == id) else {
            return false;
        };
        if idx == 0 {
            return false;
        }
        let prev = siblings[idx - 1];
        siblings.remove(idx);
        self.slot_mut(prev).children.push(id);
        self.slot_mut(id).parent = Some(prev);
        self.expanded.insert(prev);
        true
    }

    /// Detach a node and tombstone its whole subtree. Local-only: persisted
    /// rows are untouched until the next save.
    pub fn remove(&mut self, id: NodeId) -> bool {
        let Some(parent) = self.node(id).map(|n| n.parent) else {
            return false;
        };
        let siblings = self.siblings_mut(parent);
        let Some(idx) = siblings.iter().position(|&c| c == id) else {
            return false;
        };
        siblings.remove(idx);

        let mut stack = vec![id];
        while let Some(cur) = stack.pop() {
            if let Some(node) = self.slots[cur.0].take() {
                stack.extend(node.children);
            }
            self.expanded.remove(cur);
        }
        true
    }

    pub(crate) fn push_node(&mut self, node: TreeNode) -> NodeId {
        self.slots.push(Some(node));
        NodeId(self.slots.len() - 1)
    }

    fn slot_mut(&mut self, id: NodeId) -> &mut TreeNode {
        self.slots[id.0]
            .as_mut()
            .unwrap_or_else(|| unreachable!("live NodeId {:?} checked before use", id))
    }

    /// The sibling list a child of `parent` lives in: the parent's children,
    /// or the root list for `None`.
    fn siblings_mut(&mut self, parent: Option<NodeId>) -> &mut Vec<NodeId> {
        match parent {
            Some(p) => &mut self.slot_mut(p).children,
            None => &mut self.roots,
        }
    }
}
