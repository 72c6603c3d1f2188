/// Network adapters for repositories and remote descriptors
mod http_descriptor_fetcher;
mod maven_resolver;

pub use http_descriptor_fetcher::HttpDescriptorFetcher;
pub use maven_resolver::MavenRepositoryResolver;
