use crate::dependency_runtime::domain::{
    DependencyCoordinate, RepositoryEndpoint, ResolvedDependency,
};
use crate::ports::outbound::DependencyResolver;
use crate::shared::error::RuntimeError;
use crate::shared::Result;
use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use reqwest::{StatusCode, Url};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Maximum number of artifacts downloaded at once
const MAX_CONCURRENT: usize = 8;

/// MavenRepositoryResolver adapter materializing artifacts from Maven-layout
/// repositories
///
/// For each coordinate the repositories are tried in declaration order for
/// `{group as path}/{artifact}/{version}/{artifact}-{version}.jar`. The first
/// hit is written into the local repository directory, in the same layout.
/// Both `http(s)://` and `file://` repositories are supported.
pub struct MavenRepositoryResolver {
    client: reqwest::Client,
    local_repository: PathBuf,
    max_retries: u32,
}

impl MavenRepositoryResolver {
    /// Creates a resolver writing artifacts under `local_repository`
    pub fn new(local_repository: impl Into<PathBuf>) -> Result<Self> {
        let version = env!("CARGO_PKG_VERSION");
        let user_agent = format!("gradle-dependency-runtime/{}", version);
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            local_repository: local_repository.into(),
            max_retries: 3,
        })
    }

    pub fn local_repository(&self) -> &Path {
        &self.local_repository
    }

    /// Path segments of the artifact below a repository root
    fn artifact_segments(coordinate: &DependencyCoordinate) -> Vec<String> {
        let mut segments: Vec<String> = coordinate.group().split('.').map(String::from).collect();
        segments.push(coordinate.artifact().to_string());
        segments.push(coordinate.version().to_string());
        segments.push(format!(
            "{}-{}.jar",
            coordinate.artifact(),
            coordinate.version()
        ));
        segments
    }

    fn artifact_url(repository: &RepositoryEndpoint, coordinate: &DependencyCoordinate) -> String {
        let encoded: Vec<String> = Self::artifact_segments(coordinate)
            .iter()
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect();
        format!(
            "{}/{}",
            repository.url().trim_end_matches('/'),
            encoded.join("/")
        )
    }

    /// Fetches the artifact from one repository; `None` when it is absent
    async fn fetch_from(
        &self,
        repository: &RepositoryEndpoint,
        coordinate: &DependencyCoordinate,
    ) -> Result<Option<Vec<u8>>> {
        let base = Url::parse(repository.url())
            .map_err(|e| anyhow::anyhow!("Invalid repository URL '{}': {}", repository, e))?;

        match base.scheme() {
            "file" => {
                let root = base.to_file_path().map_err(|_| {
                    anyhow::anyhow!("Repository '{}' is not a local path", repository)
                })?;
                let path = Self::artifact_segments(coordinate)
                    .iter()
                    .fold(root, |path, segment| path.join(segment));
                match tokio::fs::read(&path).await {
                    Ok(bytes) => Ok(Some(bytes)),
                    Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
                    Err(e) => Err(anyhow::anyhow!("Failed to read {}: {}", path.display(), e)),
                }
            }
            "http" | "https" => {
                self.fetch_with_retry(&Self::artifact_url(repository, coordinate))
                    .await
            }
            other => anyhow::bail!(
                "Repository '{}' uses the unsupported scheme '{}'",
                repository,
                other
            ),
        }
    }

    /// Downloads with retry logic; a 404 is an answer, not a failure
    async fn fetch_with_retry(&self, url: &str) -> Result<Option<Vec<u8>>> {
        let mut last_error = None;

        for attempt in 1..=self.max_retries {
            match self.fetch_http(url).await {
                Ok(result) => return Ok(result),
                Err(e) => {
                    last_error = Some(e);
                    if attempt < self.max_retries {
                        tokio::time::sleep(Duration::from_millis(100 * attempt as u64)).await;
                    }
                }
            }
        }

        Err(last_error.unwrap_or_else(|| anyhow::anyhow!("No download attempt was made for {}", url)))
    }

    async fn fetch_http(&self, url: &str) -> Result<Option<Vec<u8>>> {
        let response = self.client.get(url).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            anyhow::bail!("{} returned status code {}", url, response.status());
        }

        Ok(Some(response.bytes().await?.to_vec()))
    }

    async fn store(&self, coordinate: &DependencyCoordinate, bytes: &[u8]) -> Result<PathBuf> {
        let target = Self::artifact_segments(coordinate)
            .iter()
            .fold(self.local_repository.clone(), |path, segment| path.join(segment));

        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&target, bytes).await?;
        Ok(target)
    }

    async fn resolve(
        &self,
        repositories: &[RepositoryEndpoint],
        coordinate: &DependencyCoordinate,
    ) -> Result<ResolvedDependency> {
        let mut failures = Vec::new();

        for repository in repositories {
            match self.fetch_from(repository, coordinate).await {
                Ok(Some(bytes)) => {
                    let location = self.store(coordinate, &bytes).await.map_err(|e| {
                        RuntimeError::Resolution {
                            coordinate: coordinate.notation(),
                            details: format!("Failed to store artifact: {}", e),
                        }
                    })?;
                    return Ok(ResolvedDependency::new(coordinate.clone(), location));
                }
                Ok(None) => failures.push(format!("not found in {}", repository)),
                Err(e) => failures.push(e.to_string()),
            }
        }

        let details = if failures.is_empty() {
            "No repositories declared".to_string()
        } else {
            failures.join("; ")
        };
        Err(RuntimeError::Resolution {
            coordinate: coordinate.notation(),
            details,
        }
        .into())
    }
}

#[async_trait]
impl DependencyResolver for MavenRepositoryResolver {
    async fn download(
        &self,
        repositories: &[RepositoryEndpoint],
        dependencies: &[DependencyCoordinate],
    ) -> Result<HashSet<ResolvedDependency>> {
        let mut seen = HashSet::new();
        let unique: Vec<&DependencyCoordinate> =
            dependencies.iter().filter(|c| seen.insert(*c)).collect();

        let pending: Vec<_> = unique
            .into_iter()
            .map(|coordinate| self.resolve(repositories, coordinate))
            .collect();

        let results: Vec<Result<ResolvedDependency>> = stream::iter(pending)
            .buffer_unordered(MAX_CONCURRENT)
            .collect()
            .await;

        results.into_iter().collect()
    }
}
