use std::fmt;

/// Packaged-resource root under which build descriptors are published
pub const MANIFEST_ROOT: &str = "META-INF/gradle";

/// Conventional file name of a build descriptor
pub const DESCRIPTOR_FILE_NAME: &str = "build.gradle";

/// Where a build descriptor comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DescriptorSource {
    /// Raw descriptor content already in memory
    Bytes(Vec<u8>),
    /// A network (`http(s)://`) or `file://` location
    Url(String),
    /// A path relative to the packaged-resource roots
    Resource(String),
    /// The conventional descriptor of a published (group, artifact) pair
    Artifact { group: String, artifact: String },
}

impl DescriptorSource {
    pub fn artifact(group: impl Into<String>, artifact: impl Into<String>) -> Self {
        DescriptorSource::Artifact {
            group: group.into(),
            artifact: artifact.into(),
        }
    }

    /// Human-readable name used in logs and error context
    pub fn label(&self) -> String {
        match self {
            DescriptorSource::Bytes(bytes) => format!("<in-memory descriptor, {} bytes>", bytes.len()),
            DescriptorSource::Url(url) => url.clone(),
            DescriptorSource::Resource(path) => path.clone(),
            DescriptorSource::Artifact { group, artifact } => format!("{}/{}", group, artifact),
        }
    }
}

impl fmt::Display for DescriptorSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// `META-INF/gradle/{group}/{artifact}/build.gradle`
pub fn artifact_resource_path(group: &str, artifact: &str) -> String {
    format!(
        "{}/{}/{}/{}",
        MANIFEST_ROOT, group, artifact, DESCRIPTOR_FILE_NAME
    )
}
