pub mod organizations;
pub mod role_tree;
pub mod roles;
