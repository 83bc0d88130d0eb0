//! Role hierarchy core: flat persisted rows <-> in-memory editable forest.
//!
//! The persisted form is a list of placement rows (`FlatNode`), one per role
//! position in an organization's chart. Loading builds an arena-backed forest
//! (`RoleTree`) that the caller edits with structural operations (add, move
//! up/down, indent, outdent, remove). Saving flattens the forest back into
//! ordered rows (`FlatNodeWrite`) with recomputed sort orders and depths;
//! the store assigns fresh placement ids on every save.

pub mod build;
pub mod expand;
pub mod flatten;
pub mod node;
pub mod tree;

pub use expand::ExpandedNodes;
pub use node::{FlatNode, FlatNodeWrite, NodeId, PlacementId, RoleId};
pub use tree::{RoleTree, TreeNode};
