/// Filesystem adapters for workspaces and packaged descriptors
mod resource_catalog;
mod workspace;

pub use resource_catalog::DirectoryDescriptorCatalog;
pub use workspace::{Workspace, WorkspaceManager, WORKSPACE_PREFIX};
