use async_trait::async_trait;
use gradle_dependency_runtime::prelude::*;
use std::collections::HashMap;

/// Mock DescriptorFetcher serving descriptors from memory
#[derive(Default)]
pub struct MockDescriptorFetcher {
    documents: HashMap<String, String>,
}

impl MockDescriptorFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(mut self, url: &str, contents: &str) -> Self {
        self.documents.insert(url.to_string(), contents.to_string());
        self
    }
}

#[async_trait]
impl DescriptorFetcher for MockDescriptorFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        self.documents
            .get(url)
            .map(|d| d.as_bytes().to_vec())
            .ok_or_else(|| {
                RuntimeError::DescriptorNotFound {
                    location: url.to_string(),
                }
                .into()
            })
    }
}
