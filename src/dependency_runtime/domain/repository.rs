use crate::shared::Result;
use reqwest::Url;
use std::fmt;

/// An artifact repository endpoint, always held in absolute URL form
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepositoryEndpoint {
    url: String,
}

impl RepositoryEndpoint {
    /// Creates an endpoint from an absolute URL
    ///
    /// # Errors
    /// Returns an error if `url` is not an absolute URL
    pub fn new(url: &str) -> Result<Self> {
        let parsed = Url::parse(url.trim())
            .map_err(|e| anyhow::anyhow!("Invalid repository URL '{}': {}", url, e))?;
        Ok(Self::from_url(&parsed))
    }

    pub fn from_url(url: &Url) -> Self {
        Self {
            url: url.to_string(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for RepositoryEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}
