use crate::shared::Result;

/// DescriptorCatalog port for packaged build descriptors
///
/// Descriptors are published under `META-INF/gradle/{group}/{artifact}/build.gradle`.
/// This port abstracts where those resources live.
pub trait DescriptorCatalog {
    /// Lists the group identifiers under the manifest root
    ///
    /// An absent manifest root yields an empty list, not an error.
    fn list_groups(&self) -> Result<Vec<String>>;

    /// Lists the artifact identifiers published for a group
    fn list_artifacts(&self, group: &str) -> Result<Vec<String>>;

    /// Reads the descriptor of a (group, artifact) pair
    ///
    /// # Errors
    /// Returns `RuntimeError::DescriptorNotFound` if no descriptor exists
    fn locate_descriptor(&self, group: &str, artifact: &str) -> Result<Vec<u8>>;

    /// Reads an arbitrary resource by its path relative to the resource roots
    ///
    /// # Errors
    /// Returns `RuntimeError::DescriptorNotFound` if no resource exists
    fn read_resource(&self, path: &str) -> Result<Vec<u8>>;
}
