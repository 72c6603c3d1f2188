use crate::ports::outbound::{WorkspaceHandle, WorkspaceProvider};
use crate::shared::error::RuntimeError;
use crate::shared::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Name prefix of every workspace directory
pub const WORKSPACE_PREFIX: &str = "gradle-dependency-runtime-";

/// WorkspaceManager - hands out isolated directories for descriptor evaluation
///
/// Every acquisition creates a fresh, empty directory with a random suffix,
/// so concurrent workspaces never collide.
#[derive(Debug, Clone, Default)]
pub struct WorkspaceManager {
    base_dir: Option<PathBuf>,
}

impl WorkspaceManager {
    /// Creates workspaces under the system temporary directory
    pub fn new() -> Self {
        Self { base_dir: None }
    }

    /// Creates workspaces under `base_dir`
    pub fn in_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: Some(base_dir.into()),
        }
    }

    /// Creates a new workspace
    ///
    /// # Errors
    /// Returns `RuntimeError::Workspace` if the directory cannot be created
    pub fn acquire(&self) -> Result<Workspace> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(WORKSPACE_PREFIX);

        let created = match &self.base_dir {
            Some(base) => builder.tempdir_in(base),
            None => builder.tempdir(),
        };

        let dir = created.map_err(|e| RuntimeError::Workspace {
            path: self
                .base_dir
                .clone()
                .unwrap_or_else(std::env::temp_dir),
            details: format!("Failed to create workspace: {}", e),
        })?;

        Ok(Workspace {
            path: dir.keep(),
            released: false,
        })
    }
}

/// An exclusively owned evaluation directory
///
/// Call [`Workspace::release`] to delete it and observe failures. If the value
/// is dropped without being released (early return, panic, cancelled future)
/// the directory is still removed on a best-effort basis.
#[derive(Debug)]
pub struct Workspace {
    path: PathBuf,
    released: bool,
}

impl Workspace {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes `contents` verbatim into the workspace under `file_name`
    ///
    /// # Errors
    /// Returns `RuntimeError::Workspace` if the file cannot be written
    pub fn write_file(&self, file_name: &str, contents: &[u8]) -> Result<PathBuf> {
        let target = self.path.join(file_name);
        fs::write(&target, contents).map_err(|e| RuntimeError::Workspace {
            path: target.clone(),
            details: format!("Failed to write {}: {}", file_name, e),
        })?;
        Ok(target)
    }

    /// Recursively deletes the workspace if it is still present
    ///
    /// # Errors
    /// Returns `RuntimeError::Workspace` if the directory cannot be deleted
    pub fn release(mut self) -> Result<()> {
        self.released = true;
        if !self.path.exists() {
            return Ok(());
        }
        fs::remove_dir_all(&self.path).map_err(|e| {
            RuntimeError::Workspace {
                path: self.path.clone(),
                details: format!("Failed to delete workspace: {}", e),
            }
            .into()
        })
    }
}

impl WorkspaceHandle for Workspace {
    fn path(&self) -> &Path {
        Workspace::path(self)
    }

    fn write_file(&self, file_name: &str, contents: &[u8]) -> Result<PathBuf> {
        Workspace::write_file(self, file_name, contents)
    }

    fn release(self: Box<Self>) -> Result<()> {
        Workspace::release(*self)
    }
}

impl WorkspaceProvider for WorkspaceManager {
    fn acquire(&self) -> Result<Box<dyn WorkspaceHandle>> {
        Ok(Box::new(WorkspaceManager::acquire(self)?))
    }
}

impl Drop for Workspace {
    fn drop(&mut self) {
        if !self.released && self.path.exists() {
            let _ = fs::remove_dir_all(&self.path);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_acquire_creates_empty_prefixed_directory() {
        let base = TempDir::new().unwrap();
        let manager = WorkspaceManager::in_dir(base.path());

        let workspace = manager.acquire().unwrap();
        assert!(workspace.path().is_dir());
        assert!(workspace.path().starts_with(base.path()));
        assert_eq!(fs::read_dir(workspace.path()).unwrap().count(), 0);

        let name = workspace.path().file_name().unwrap().to_string_lossy();
        assert!(name.starts_with(WORKSPACE_PREFIX));

        workspace.release().unwrap();
    }

    #[test]
    fn test_workspaces_are_unique() {
        let base = TempDir::new().unwrap();
        let manager = WorkspaceManager::in_dir(base.path());

        let first = manager.acquire().unwrap();
        let second = manager.acquire().unwrap();
        assert_ne!(first.path(), second.path());

        first.release().unwrap();
        second.release().unwrap();
    }

    #[test]
    fn test_release_removes_directory_with_contents() {
        let base = TempDir::new().unwrap();
        let workspace = WorkspaceManager::in_dir(base.path()).acquire().unwrap();
        let path = workspace.path().to_path_buf();

        workspace.write_file("build.gradle", b"apply plugin: 'java'").unwrap();
        fs::create_dir(path.join("nested")).unwrap();
        fs::write(path.join("nested/file.txt"), "x").unwrap();

        workspace.release().unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_release_tolerates_missing_directory() {
        let base = TempDir::new().unwrap();
        let workspace = WorkspaceManager::in_dir(base.path()).acquire().unwrap();
        fs::remove_dir_all(workspace.path()).unwrap();

        assert!(workspace.release().is_ok());
    }

    #[test]
    fn test_drop_without_release_removes_directory() {
        let base = TempDir::new().unwrap();
        let path = {
            let workspace = WorkspaceManager::in_dir(base.path()).acquire().unwrap();
            workspace.path().to_path_buf()
        };
        assert!(!path.exists());
    }

    #[test]
    fn test_write_file_is_verbatim() {
        let base = TempDir::new().unwrap();
        let workspace = WorkspaceManager::in_dir(base.path()).acquire().unwrap();
        let bytes = b"dependencies {\r\n  runtime 'a:b:1'\r\n}\n";

        let written = workspace.write_file("build.gradle", bytes).unwrap();
        assert_eq!(fs::read(written).unwrap(), bytes);

        workspace.release().unwrap();
    }

    #[test]
    fn test_provider_port_round_trip() {
        let base = TempDir::new().unwrap();
        let provider: Box<dyn WorkspaceProvider> = Box::new(WorkspaceManager::in_dir(base.path()));

        let handle = provider.acquire().unwrap();
        let path = handle.path().to_path_buf();
        handle.write_file("build.gradle", b"x").unwrap();
        handle.release().unwrap();

        assert!(!path.exists());
    }

    #[test]
    fn test_acquire_in_missing_base_fails_with_workspace_error() {
        let manager = WorkspaceManager::in_dir("/nonexistent/base/for/workspaces");
        let err = manager.acquire().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RuntimeError>(),
            Some(RuntimeError::Workspace { .. })
        ));
    }
}
