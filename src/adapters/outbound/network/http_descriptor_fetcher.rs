use crate::ports::outbound::DescriptorFetcher;
use crate::shared::error::RuntimeError;
use crate::shared::security::validate_regular_file;
use crate::shared::Result;
use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use std::time::Duration;

/// HttpDescriptorFetcher adapter for descriptors addressed by URL
///
/// `http(s)://` locations are downloaded with retry; `file://` locations are
/// read from disk after the same checks applied to packaged descriptors.
pub struct HttpDescriptorFetcher {
    client: reqwest::Client,
    max_retries: u32,
}

impl HttpDescriptorFetcher {
    pub fn new() -> Result<Self> {
        let version = env!("CARGO_PKG_VERSION");
        let user_agent = format!("gradle-dependency-runtime/{}", version);
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            max_retries: 3,
        })
    }

    async fn fetch_with_retry(&self, url: &Url) -> Result<Vec<u8>> {
        let mut last_error = None;

        for attempt in 1..=self.max_retries {
            let response = match self.client.get(url.clone()).send().await {
                Ok(response) => response,
                Err(e) => {
                    last_error = Some(e);
                    if attempt < self.max_retries {
                        tokio::time::sleep(Duration::from_millis(100 * attempt as u64)).await;
                    }
                    continue;
                }
            };

            // Status answers are final; only transport failures are retried
            return match response.status() {
                StatusCode::NOT_FOUND => Err(RuntimeError::DescriptorNotFound {
                    location: url.to_string(),
                }
                .into()),
                status if !status.is_success() => Err(RuntimeError::DescriptorRead {
                    location: url.to_string(),
                    details: format!("server returned status code {}", status),
                }
                .into()),
                _ => Ok(response.bytes().await?.to_vec()),
            };
        }

        Err(RuntimeError::DescriptorRead {
            location: url.to_string(),
            details: last_error
                .map(|e| e.to_string())
                .unwrap_or_else(|| "no attempt was made".to_string()),
        }
        .into())
    }

    fn read_file(url: &Url) -> Result<Vec<u8>> {
        let path = url.to_file_path().map_err(|_| RuntimeError::DescriptorRead {
            location: url.to_string(),
            details: "not a local path".to_string(),
        })?;
        if !path.exists() {
            return Err(RuntimeError::DescriptorNotFound {
                location: url.to_string(),
            }
            .into());
        }
        validate_regular_file(&path, "build descriptor")?;
        std::fs::read(&path).map_err(|e| {
            RuntimeError::DescriptorRead {
                location: url.to_string(),
                details: e.to_string(),
            }
            .into()
        })
    }
}

#[async_trait]
impl DescriptorFetcher for HttpDescriptorFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let parsed = Url::parse(url).map_err(|e| RuntimeError::Validation {
            message: format!("Invalid descriptor URL '{}': {}", url, e),
        })?;

        match parsed.scheme() {
            "file" => Self::read_file(&parsed),
            "http" | "https" => self.fetch_with_retry(&parsed).await,
            other => Err(RuntimeError::Validation {
                message: format!("Unsupported descriptor URL scheme '{}'", other),
            }
            .into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_fetcher_creation() {
        assert!(HttpDescriptorFetcher::new().is_ok());
    }

    #[tokio::test]
    async fn test_fetch_file_url() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("build.gradle");
        std::fs::write(&path, "apply plugin: 'java'").unwrap();
        let url = Url::from_file_path(&path).unwrap();

        let fetcher = HttpDescriptorFetcher::new().unwrap();
        let bytes = fetcher.fetch(url.as_str()).await.unwrap();
        assert_eq!(bytes, b"apply plugin: 'java'");
    }

    #[tokio::test]
    async fn test_fetch_missing_file_is_not_found() {
        let dir = TempDir::new().unwrap();
        let url = Url::from_file_path(dir.path().join("missing.gradle")).unwrap();

        let fetcher = HttpDescriptorFetcher::new().unwrap();
        let err = fetcher.fetch(url.as_str()).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RuntimeError>(),
            Some(RuntimeError::DescriptorNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_fetch_rejects_invalid_and_unsupported_urls() {
        let fetcher = HttpDescriptorFetcher::new().unwrap();

        let err = fetcher.fetch("not a url").await.unwrap_err();
        assert!(err.to_string().contains("Invalid descriptor URL"));

        let err = fetcher.fetch("ftp://host/build.gradle").await.unwrap_err();
        assert!(err.to_string().contains("Unsupported descriptor URL scheme 'ftp'"));
    }
}
