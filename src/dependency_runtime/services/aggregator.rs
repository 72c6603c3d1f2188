use crate::dependency_runtime::domain::ResolvedDependency;
use std::collections::HashSet;

/// DependencyAggregator - unions resolved batches into one deduplicated set
///
/// Union follows the identity of [`ResolvedDependency`], so the result does
/// not depend on batch order or on a batch being added twice.
#[derive(Debug, Default)]
pub struct DependencyAggregator {
    dependencies: HashSet<ResolvedDependency>,
}

impl DependencyAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a batch, returning how many records were new
    pub fn add_batch<I>(&mut self, batch: I) -> usize
    where
        I: IntoIterator<Item = ResolvedDependency>,
    {
        let before = self.dependencies.len();
        self.dependencies.extend(batch);
        self.dependencies.len() - before
    }

    pub fn len(&self) -> usize {
        self.dependencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dependencies.is_empty()
    }

    pub fn into_set(self) -> HashSet<ResolvedDependency> {
        self.dependencies
    }

    /// Unions any number of batches
    pub fn aggregate<I, B>(batches: I) -> HashSet<ResolvedDependency>
    where
        I: IntoIterator<Item = B>,
        B: IntoIterator<Item = ResolvedDependency>,
    {
        let mut aggregator = Self::new();
        for batch in batches {
            aggregator.add_batch(batch);
        }
        aggregator.into_set()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dependency_runtime::domain::{DependencyCoordinate, DependencyScope};
    use std::path::PathBuf;

    fn resolved(artifact: &str) -> ResolvedDependency {
        let coordinate =
            DependencyCoordinate::new("com.acme", artifact, "1.2.0", DependencyScope::Runtime)
                .unwrap();
        ResolvedDependency::new(coordinate, PathBuf::from(format!("/repo/{}.jar", artifact)))
    }

    #[test]
    fn test_add_batch_reports_new_records() {
        let mut aggregator = DependencyAggregator::new();
        assert_eq!(aggregator.add_batch(vec![resolved("widget"), resolved("gadget")]), 2);
        assert_eq!(aggregator.add_batch(vec![resolved("widget")]), 0);
        assert_eq!(aggregator.len(), 2);
    }

    #[test]
    fn test_aggregate_is_idempotent() {
        let batch = vec![resolved("widget"), resolved("gadget")];
        let once = DependencyAggregator::aggregate(vec![batch.clone()]);
        let twice = DependencyAggregator::aggregate(vec![batch.clone(), batch]);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_aggregate_is_commutative() {
        let first = vec![resolved("widget")];
        let second = vec![resolved("gadget"), resolved("widget")];
        let forward = DependencyAggregator::aggregate(vec![first.clone(), second.clone()]);
        let backward = DependencyAggregator::aggregate(vec![second, first]);
        assert_eq!(forward, backward);
        assert_eq!(forward.len(), 2);
    }

    #[test]
    fn test_aggregate_nothing() {
        let empty: Vec<Vec<ResolvedDependency>> = vec![];
        assert!(DependencyAggregator::aggregate(empty).is_empty());
        assert!(DependencyAggregator::new().is_empty());
    }
}
