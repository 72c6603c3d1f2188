use crate::dependency_runtime::domain::DESCRIPTOR_FILE_NAME;
use crate::shared::Result;
use async_trait::async_trait;
use std::path::Path;

/// Kind of repository an engine exposes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositoryKind {
    /// Maven-layout artifact repository
    Maven,
    Ivy,
    FlatDir,
    Other,
}

/// A repository as declared in the evaluated project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclaredRepository {
    pub name: Option<String>,
    pub kind: RepositoryKind,
    /// Declared URL, possibly relative to the project directory
    pub url: Option<String>,
}

impl DeclaredRepository {
    pub fn maven(name: Option<&str>, url: Option<&str>) -> Self {
        Self {
            name: name.map(String::from),
            kind: RepositoryKind::Maven,
            url: url.map(String::from),
        }
    }

    pub fn is_artifact_repository(&self) -> bool {
        self.kind == RepositoryKind::Maven
    }
}

/// A dependency as declared in a configuration
///
/// `group` and `version` are absent for file collections and project
/// dependencies, which have no Maven coordinate.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DeclaredDependency {
    pub group: Option<String>,
    pub name: String,
    pub version: Option<String>,
    pub external: bool,
}

impl DeclaredDependency {
    pub fn module(group: &str, name: &str, version: Option<&str>) -> Self {
        Self {
            group: Some(group.to_string()),
            name: name.to_string(),
            version: version.map(String::from),
            external: true,
        }
    }

    /// A file collection or project dependency
    pub fn local(name: &str) -> Self {
        Self {
            group: None,
            name: name.to_string(),
            version: None,
            external: false,
        }
    }
}

/// A named configuration of the evaluated project
pub trait ConfigurationModel {
    fn name(&self) -> &str;

    /// Every dependency of this configuration, including those inherited
    /// through `extendsFrom`, without duplicates
    fn all_dependencies(&self) -> Vec<DeclaredDependency>;
}

/// Read-only view of an evaluated project
pub trait ProjectModel {
    /// Directory the project was evaluated in
    fn project_dir(&self) -> &Path;

    /// Repositories in declaration order
    fn repositories(&self) -> Vec<DeclaredRepository>;

    /// Looks up a configuration by name
    fn configuration(&self, name: &str) -> Option<Box<dyn ConfigurationModel + '_>>;
}

/// Callback fired once the engine has evaluated the project and before any
/// build-execution phase
pub type ModelReadyHook = Box<dyn FnOnce(&dyn ProjectModel) -> Result<()> + Send>;

/// EvaluationEngine port for an embedded build-evaluation engine
///
/// An engine instance serves exactly one evaluation. Hooks are registered
/// first, then `load_project` evaluates the descriptor found in the given
/// directory and fires every registered hook exactly once.
#[async_trait]
pub trait EvaluationEngine: Send {
    /// File name the engine expects the descriptor under
    fn descriptor_file_name(&self) -> &str {
        DESCRIPTOR_FILE_NAME
    }

    /// Registers a model-ready hook
    fn after_project(&mut self, hook: ModelReadyHook);

    /// Evaluates the project rooted at `project_dir`
    ///
    /// # Errors
    /// Returns an error if the descriptor is malformed, the engine fails, or
    /// a registered hook fails
    async fn load_project(&mut self, project_dir: &Path) -> Result<()>;
}

/// Creates isolated engine instances, one per evaluation
pub trait EvaluationEngineFactory: Send + Sync {
    fn create(&self) -> Result<Box<dyn EvaluationEngine>>;
}
