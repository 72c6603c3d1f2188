mod aggregator;
mod model_extractor;
mod scope_filter;

pub use aggregator::DependencyAggregator;
pub use model_extractor::{ModelExtractor, RUNTIME_CONFIGURATION};
pub use scope_filter::ScopeFilter;
