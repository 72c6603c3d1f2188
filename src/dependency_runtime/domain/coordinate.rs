use super::scope::DependencyScope;
use crate::shared::Result;
use std::fmt;

/// Maximum length of a single coordinate component (security limit)
const MAX_COMPONENT_LENGTH: usize = 255;

/// Maven-style dependency coordinate
///
/// Identity is the full tuple (group, artifact, version, scope): two
/// coordinates with the same fields are the same logical dependency.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DependencyCoordinate {
    group: String,
    artifact: String,
    version: String,
    scope: DependencyScope,
}

impl DependencyCoordinate {
    pub fn new(
        group: impl Into<String>,
        artifact: impl Into<String>,
        version: impl Into<String>,
        scope: DependencyScope,
    ) -> Result<Self> {
        let group = group.into();
        let artifact = artifact.into();
        let version = version.into();

        validate_component(&group, "Group")?;
        validate_component(&artifact, "Artifact")?;
        validate_component(&version, "Version")?;

        Ok(Self {
            group,
            artifact,
            version,
            scope,
        })
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn artifact(&self) -> &str {
        &self.artifact
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn scope(&self) -> DependencyScope {
        self.scope
    }

    /// The `group:artifact:version` notation, without the scope
    pub fn notation(&self) -> String {
        format!("{}:{}:{}", self.group, self.artifact, self.version)
    }
}

impl fmt::Display for DependencyCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{} ({})",
            self.group, self.artifact, self.version, self.scope
        )
    }
}

fn validate_component(value: &str, component_type: &str) -> Result<()> {
    if value.trim().is_empty() {
        anyhow::bail!("{} of a dependency coordinate cannot be empty", component_type);
    }

    if value.len() > MAX_COMPONENT_LENGTH {
        anyhow::bail!(
            "{} is too long ({} bytes). Maximum allowed: {} bytes",
            component_type,
            value.len(),
            MAX_COMPONENT_LENGTH
        );
    }

    // Components end up as repository path segments
    if value.contains('/') || value.contains('\\') || value.contains("..") {
        anyhow::bail!(
            "{} '{}' contains path separators or parent references",
            component_type,
            value
        );
    }

    if value.chars().any(|c| c.is_whitespace() || c == ':') {
        anyhow::bail!(
            "{} '{}' contains whitespace or ':' which is not allowed",
            component_type,
            value
        );
    }

    Ok(())
}
