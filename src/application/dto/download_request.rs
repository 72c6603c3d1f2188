use crate::dependency_runtime::domain::{DescriptorSource, ScopeSet};
use crate::shared::error::RuntimeError;
use crate::shared::security::validate_path_segment;
use crate::shared::Result;

/// DownloadRequest - Internal request DTO for the download use case
///
/// Without a source every descriptor published under the manifest
/// convention is processed.
#[derive(Debug, Clone, Default)]
pub struct DownloadRequest {
    /// Single descriptor to process, or `None` for all packaged descriptors
    pub source: Option<DescriptorSource>,
    /// Scopes to retain, {COMPILE, RUNTIME} unless specified
    pub scopes: ScopeSet,
}

impl DownloadRequest {
    pub fn new(source: Option<DescriptorSource>, scopes: ScopeSet) -> Self {
        Self { source, scopes }
    }

    pub fn builder() -> DownloadRequestBuilder {
        DownloadRequestBuilder::default()
    }
}

/// Builder validating a [`DownloadRequest`] before it reaches the pipeline
#[derive(Debug, Default)]
pub struct DownloadRequestBuilder {
    source: Option<DescriptorSource>,
    scopes: Option<ScopeSet>,
}

impl DownloadRequestBuilder {
    pub fn source(mut self, source: DescriptorSource) -> Self {
        self.source = Some(source);
        self
    }

    pub fn artifact(self, group: impl Into<String>, artifact: impl Into<String>) -> Self {
        self.source(DescriptorSource::artifact(group, artifact))
    }

    pub fn scopes(mut self, scopes: ScopeSet) -> Self {
        self.scopes = Some(scopes);
        self
    }

    /// # Errors
    /// Returns an error if an artifact source names an unsafe path segment or
    /// a URL/resource source is blank
    pub fn build(self) -> Result<DownloadRequest> {
        match &self.source {
            Some(DescriptorSource::Artifact { group, artifact }) => {
                validate_path_segment(group, "Group")?;
                validate_path_segment(artifact, "Artifact")?;
            }
            Some(DescriptorSource::Url(location)) | Some(DescriptorSource::Resource(location))
                if location.trim().is_empty() =>
            {
                return Err(RuntimeError::Validation {
                    message: "Descriptor location cannot be empty".to_string(),
                }
                .into());
            }
            _ => {}
        }

        Ok(DownloadRequest::new(
            self.source,
            self.scopes.unwrap_or_default(),
        ))
    }
}
