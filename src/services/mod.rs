pub mod hierarchy_service;
pub mod organization_service;
pub mod role_service;

pub use hierarchy_service::{HierarchyError, HierarchyService};
pub use organization_service::{OrganizationError, OrganizationService};
pub use role_service::{RoleError, RoleService};
