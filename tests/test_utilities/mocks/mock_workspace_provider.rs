use gradle_dependency_runtime::prelude::*;
use gradle_dependency_runtime::ports::outbound::WorkspaceHandle;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

struct UnreleasableWorkspace {
    dir: TempDir,
}

impl WorkspaceHandle for UnreleasableWorkspace {
    fn path(&self) -> &Path {
        self.dir.path()
    }

    fn write_file(&self, file_name: &str, contents: &[u8]) -> Result<PathBuf> {
        let path = self.dir.path().join(file_name);
        std::fs::write(&path, contents)?;
        Ok(path)
    }

    fn release(self: Box<Self>) -> Result<()> {
        Err(RuntimeError::Workspace {
            path: self.dir.path().to_path_buf(),
            details: "Directory is busy".to_string(),
        }
        .into())
    }
}

/// Mock WorkspaceProvider whose workspaces fail to release
#[derive(Default, Clone)]
pub struct UnreleasableWorkspaceProvider {
    acquired: Arc<Mutex<usize>>,
}

impl UnreleasableWorkspaceProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn acquired(&self) -> usize {
        *self.acquired.lock().unwrap()
    }
}

impl WorkspaceProvider for UnreleasableWorkspaceProvider {
    fn acquire(&self) -> Result<Box<dyn WorkspaceHandle>> {
        *self.acquired.lock().unwrap() += 1;
        Ok(Box::new(UnreleasableWorkspace {
            dir: TempDir::new()?,
        }))
    }
}
