use crate::dependency_runtime::domain::{artifact_resource_path, MANIFEST_ROOT};
use crate::ports::outbound::DescriptorCatalog;
use crate::shared::error::RuntimeError;
use crate::shared::security::{validate_path_segment, validate_regular_file};
use crate::shared::Result;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Component, Path, PathBuf};

/// DirectoryDescriptorCatalog adapter for descriptors packaged on disk
///
/// Each root plays the part of one classpath entry: listings are the union
/// of all roots, and lookups return the first root that holds the resource.
pub struct DirectoryDescriptorCatalog {
    roots: Vec<PathBuf>,
}

impl DirectoryDescriptorCatalog {
    pub fn new(roots: Vec<PathBuf>) -> Self {
        Self { roots }
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    /// Union of the sub-directory names of `relative` across all roots
    fn list_directories(&self, relative: &Path) -> Result<Vec<String>> {
        let mut names = BTreeSet::new();

        for root in &self.roots {
            let dir = root.join(relative);
            if !dir.is_dir() {
                continue;
            }

            let entries = fs::read_dir(&dir).map_err(|e| RuntimeError::DescriptorRead {
                location: dir.display().to_string(),
                details: e.to_string(),
            })?;

            for entry in entries {
                let entry = entry.map_err(|e| RuntimeError::DescriptorRead {
                    location: dir.display().to_string(),
                    details: e.to_string(),
                })?;
                // file_type() does not follow symlinks
                let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
                if is_dir {
                    names.insert(entry.file_name().to_string_lossy().into_owned());
                }
            }
        }

        Ok(names.into_iter().collect())
    }
}

impl DescriptorCatalog for DirectoryDescriptorCatalog {
    fn list_groups(&self) -> Result<Vec<String>> {
        self.list_directories(Path::new(MANIFEST_ROOT))
    }

    fn list_artifacts(&self, group: &str) -> Result<Vec<String>> {
        validate_path_segment(group, "Group")?;
        self.list_directories(&Path::new(MANIFEST_ROOT).join(group))
    }

    fn locate_descriptor(&self, group: &str, artifact: &str) -> Result<Vec<u8>> {
        validate_path_segment(group, "Group")?;
        validate_path_segment(artifact, "Artifact")?;
        self.read_resource(&artifact_resource_path(group, artifact))
    }

    fn read_resource(&self, path: &str) -> Result<Vec<u8>> {
        let relative = Path::new(path);
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if escapes {
            return Err(RuntimeError::SecurityError {
                path: relative.to_path_buf(),
                reason: "Resource paths must be relative and must not contain '..'".to_string(),
                hint: "Use a path such as META-INF/gradle/com.acme/widget/build.gradle".to_string(),
            }
            .into());
        }

        for root in &self.roots {
            let candidate = root.join(relative);
            if fs::symlink_metadata(&candidate).is_err() {
                continue;
            }

            validate_regular_file(&candidate, "build descriptor")?;
            return fs::read(&candidate).map_err(|e| {
                RuntimeError::DescriptorRead {
                    location: candidate.display().to_string(),
                    details: e.to_string(),
                }
                .into()
            });
        }

        Err(RuntimeError::DescriptorNotFound {
            location: path.to_string(),
        }
        .into())
    }
}
