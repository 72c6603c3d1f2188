use super::coordinate::DependencyCoordinate;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};

/// A dependency materialized by the resolver
///
/// Identity is the coordinate alone: the same coordinate resolved twice is one
/// record, wherever the artifact ended up on disk.
#[derive(Debug, Clone)]
pub struct ResolvedDependency {
    coordinate: DependencyCoordinate,
    location: PathBuf,
}

impl ResolvedDependency {
    pub fn new(coordinate: DependencyCoordinate, location: PathBuf) -> Self {
        Self {
            coordinate,
            location,
        }
    }

    pub fn coordinate(&self) -> &DependencyCoordinate {
        &self.coordinate
    }

    /// Path of the materialized artifact
    pub fn location(&self) -> &Path {
        &self.location
    }
}

impl PartialEq for ResolvedDependency {
    fn eq(&self, other: &Self) -> bool {
        self.coordinate == other.coordinate
    }
}

impl Eq for ResolvedDependency {}

impl Hash for ResolvedDependency {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.coordinate.hash(state);
    }
}
