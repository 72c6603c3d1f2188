use async_trait::async_trait;
use gradle_dependency_runtime::prelude::*;
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// Repositories and coordinates of one `download` call
pub type RecordedCall = (Vec<String>, Vec<DependencyCoordinate>);

/// Mock DependencyResolver recording every call
///
/// Resolves each coordinate to `/m2/{artifact}-{version}.jar` unless told to
/// fail for an artifact.
#[derive(Default, Clone)]
pub struct MockDependencyResolver {
    calls: Arc<Mutex<Vec<RecordedCall>>>,
    failing_artifact: Option<String>,
}

impl MockDependencyResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_for(artifact: &str) -> Self {
        Self {
            failing_artifact: Some(artifact.to_string()),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl DependencyResolver for MockDependencyResolver {
    async fn download(
        &self,
        repositories: &[RepositoryEndpoint],
        dependencies: &[DependencyCoordinate],
    ) -> Result<HashSet<ResolvedDependency>> {
        self.calls.lock().unwrap().push((
            repositories.iter().map(|r| r.url().to_string()).collect(),
            dependencies.to_vec(),
        ));

        let mut resolved = HashSet::new();
        for coordinate in dependencies {
            if self.failing_artifact.as_deref() == Some(coordinate.artifact()) {
                return Err(RuntimeError::Resolution {
                    coordinate: coordinate.notation(),
                    details: "Not found in any repository".to_string(),
                }
                .into());
            }
            resolved.insert(ResolvedDependency::new(
                coordinate.clone(),
                PathBuf::from(format!(
                    "/m2/{}-{}.jar",
                    coordinate.artifact(),
                    coordinate.version()
                )),
            ));
        }
        Ok(resolved)
    }
}
