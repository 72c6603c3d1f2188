/// Data Transfer Objects for application layer
///
/// DTOs are used to transfer data between the application layer
/// and adapters, keeping the domain layer isolated.
mod download_request;
mod download_response;

pub use download_request::{DownloadRequest, DownloadRequestBuilder};
pub use download_response::DownloadResponse;
