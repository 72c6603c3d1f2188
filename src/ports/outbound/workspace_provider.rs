use crate::shared::Result;
use std::path::{Path, PathBuf};

/// An exclusively owned evaluation directory
pub trait WorkspaceHandle: Send {
    fn path(&self) -> &Path;

    /// Writes `contents` verbatim under `file_name`
    fn write_file(&self, file_name: &str, contents: &[u8]) -> Result<PathBuf>;

    /// Recursively deletes the directory if it is still present
    fn release(self: Box<Self>) -> Result<()>;
}

/// WorkspaceProvider port handing out isolated workspaces
///
/// Every acquisition yields a fresh, empty, uniquely named directory. A handle
/// dropped without `release` still removes its directory on a best-effort
/// basis.
pub trait WorkspaceProvider: Send + Sync {
    fn acquire(&self) -> Result<Box<dyn WorkspaceHandle>>;
}
