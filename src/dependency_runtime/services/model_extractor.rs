use crate::dependency_runtime::domain::{
    DependencyCoordinate, DependencyScope, ExtractedModel, RepositoryEndpoint,
};
use crate::ports::outbound::{DeclaredDependency, DeclaredRepository, ProjectModel};
use crate::shared::Result;
use reqwest::Url;
use std::path::Path;

/// Configuration whose dependencies are extracted
pub const RUNTIME_CONFIGURATION: &str = "runtime";

/// ModelExtractor - turns an evaluated project model into repositories and
/// coordinates
///
/// Only Maven-kind repositories are kept. Dependencies come from every
/// dependency of the `runtime` configuration, inherited ones included, and
/// are always tagged RUNTIME; scope filtering happens later.
pub struct ModelExtractor;

impl ModelExtractor {
    /// Extracts repositories and runtime dependencies
    ///
    /// # Errors
    /// Returns an error if:
    /// - The `runtime` configuration does not exist
    /// - A Maven repository has no URL or an unresolvable one
    /// - A module dependency lacks a group or version
    pub fn extract(model: &dyn ProjectModel) -> Result<ExtractedModel> {
        let repositories = Self::extract_repositories(model)?;
        let dependencies = Self::extract_dependencies(model)?;
        Ok(ExtractedModel::new(repositories, dependencies))
    }

    fn extract_repositories(model: &dyn ProjectModel) -> Result<Vec<RepositoryEndpoint>> {
        model
            .repositories()
            .iter()
            .filter(|repository| repository.is_artifact_repository())
            .map(|repository| Self::resolve_repository(repository, model.project_dir()))
            .collect()
    }

    fn resolve_repository(
        repository: &DeclaredRepository,
        project_dir: &Path,
    ) -> Result<RepositoryEndpoint> {
        let url = repository.url.as_deref().ok_or_else(|| {
            anyhow::anyhow!(
                "Maven repository '{}' does not declare a URL",
                repository.name.as_deref().unwrap_or("maven")
            )
        })?;
        let absolute = resolve_url(url, project_dir)?;
        Ok(RepositoryEndpoint::from_url(&absolute))
    }

    fn extract_dependencies(model: &dyn ProjectModel) -> Result<Vec<DependencyCoordinate>> {
        let configuration = model.configuration(RUNTIME_CONFIGURATION).ok_or_else(|| {
            anyhow::anyhow!(
                "Configuration with name '{}' not found",
                RUNTIME_CONFIGURATION
            )
        })?;

        configuration
            .all_dependencies()
            .into_iter()
            // File collections and project dependencies have no Maven coordinate
            .filter(|dependency| dependency.external)
            .map(|dependency| to_coordinate(&dependency))
            .collect()
    }
}

fn to_coordinate(dependency: &DeclaredDependency) -> Result<DependencyCoordinate> {
    let group = dependency
        .group
        .as_deref()
        .ok_or_else(|| anyhow::anyhow!("Dependency '{}' has no group", dependency.name))?;
    let version = dependency.version.as_deref().ok_or_else(|| {
        anyhow::anyhow!(
            "Dependency '{}:{}' has no version",
            group,
            dependency.name
        )
    })?;
    DependencyCoordinate::new(group, &dependency.name, version, DependencyScope::Runtime)
}

/// Resolves a declared repository URL to an absolute one, relative paths
/// being taken against the project directory
fn resolve_url(declared: &str, project_dir: &Path) -> Result<Url> {
    let declared = declared.trim();
    if declared.contains("://") || declared.starts_with("file:") {
        return Url::parse(declared)
            .map_err(|e| anyhow::anyhow!("Invalid repository URL '{}': {}", declared, e));
    }

    let path = project_dir.join(declared);
    let url = if path.is_dir() {
        Url::from_directory_path(&path)
    } else {
        Url::from_file_path(&path)
    };
    url.map_err(|_| {
        anyhow::anyhow!(
            "Repository path '{}' cannot be expressed as a URL",
            path.display()
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::outbound::{ConfigurationModel, RepositoryKind};
    use std::collections::HashMap;
    use std::path::PathBuf;

    struct FakeConfiguration<'a> {
        name: String,
        project: &'a FakeProject,
    }

    impl ConfigurationModel for FakeConfiguration<'_> {
        fn name(&self) -> &str {
            &self.name
        }

        fn all_dependencies(&self) -> Vec<DeclaredDependency> {
            let mut all = Vec::new();
            let mut pending = vec![self.name.clone()];
            while let Some(name) = pending.pop() {
                if let Some((deps, parents)) = self.project.configurations.get(&name) {
                    all.extend(deps.iter().cloned());
                    pending.extend(parents.iter().cloned());
                }
            }
            all
        }
    }

    struct FakeProject {
        dir: PathBuf,
        repositories: Vec<DeclaredRepository>,
        configurations: HashMap<String, (Vec<DeclaredDependency>, Vec<String>)>,
    }

    impl FakeProject {
        fn new() -> Self {
            Self {
                dir: PathBuf::from("/work/project"),
                repositories: vec![],
                configurations: HashMap::new(),
            }
        }

        fn with_configuration(
            mut self,
            name: &str,
            deps: Vec<DeclaredDependency>,
            extends: &[&str],
        ) -> Self {
            self.configurations.insert(
                name.to_string(),
                (deps, extends.iter().map(|s| s.to_string()).collect()),
            );
            self
        }
    }

    impl ProjectModel for FakeProject {
        fn project_dir(&self) -> &Path {
            &self.dir
        }

        fn repositories(&self) -> Vec<DeclaredRepository> {
            self.repositories.clone()
        }

        fn configuration(&self, name: &str) -> Option<Box<dyn ConfigurationModel + '_>> {
            self.configurations.get(name).map(|_| {
                Box::new(FakeConfiguration {
                    name: name.to_string(),
                    project: self,
                }) as Box<dyn ConfigurationModel + '_>
            })
        }
    }

    #[test]
    fn test_extract_maven_repository_and_runtime_dependency() {
        let mut project = FakeProject::new().with_configuration(
            "runtime",
            vec![DeclaredDependency::module("com.acme", "widget", Some("1.2.0"))],
            &[],
        );
        project.repositories = vec![DeclaredRepository::maven(
            Some("maven"),
            Some("https://repo.example/m2"),
        )];

        let extracted = ModelExtractor::extract(&project).unwrap();

        assert_eq!(extracted.repositories.len(), 1);
        assert_eq!(extracted.repositories[0].url(), "https://repo.example/m2");
        assert_eq!(
            extracted.dependencies,
            vec![DependencyCoordinate::new(
                "com.acme",
                "widget",
                "1.2.0",
                DependencyScope::Runtime
            )
            .unwrap()]
        );
    }

    #[test]
    fn test_extract_skips_non_maven_repositories() {
        let mut project = FakeProject::new().with_configuration("runtime", vec![], &[]);
        project.repositories = vec![
            DeclaredRepository {
                name: Some("ivy".to_string()),
                kind: RepositoryKind::Ivy,
                url: Some("https://ivy.example".to_string()),
            },
            DeclaredRepository {
                name: Some("flatDir".to_string()),
                kind: RepositoryKind::FlatDir,
                url: None,
            },
            DeclaredRepository::maven(Some("central"), Some("https://repo.maven.apache.org/maven2/")),
        ];

        let extracted = ModelExtractor::extract(&project).unwrap();
        assert_eq!(extracted.repositories.len(), 1);
        assert_eq!(
            extracted.repositories[0].url(),
            "https://repo.maven.apache.org/maven2/"
        );
    }

    #[test]
    fn test_extract_includes_inherited_dependencies_tagged_runtime() {
        let project = FakeProject::new()
            .with_configuration(
                "compile",
                vec![DeclaredDependency::module("org.base", "core", Some("2.0"))],
                &[],
            )
            .with_configuration(
                "runtime",
                vec![DeclaredDependency::module("com.acme", "widget", Some("1.2.0"))],
                &["compile"],
            );

        let extracted = ModelExtractor::extract(&project).unwrap();
        assert_eq!(extracted.dependencies.len(), 2);
        assert!(extracted
            .dependencies
            .iter()
            .all(|d| d.scope() == DependencyScope::Runtime));
        assert!(extracted
            .dependencies
            .iter()
            .any(|d| d.notation() == "org.base:core:2.0"));
    }

    #[test]
    fn test_extract_missing_runtime_configuration_fails() {
        let project = FakeProject::new().with_configuration("compile", vec![], &[]);
        let err = ModelExtractor::extract(&project).unwrap_err();
        assert!(err
            .to_string()
            .contains("Configuration with name 'runtime' not found"));
    }

    #[test]
    fn test_extract_maven_repository_without_url_fails() {
        let mut project = FakeProject::new().with_configuration("runtime", vec![], &[]);
        project.repositories = vec![DeclaredRepository::maven(Some("broken"), None)];
        let err = ModelExtractor::extract(&project).unwrap_err();
        assert!(err.to_string().contains("'broken' does not declare a URL"));
    }

    #[test]
    fn test_extract_skips_local_dependencies() {
        let project = FakeProject::new().with_configuration(
            "runtime",
            vec![
                DeclaredDependency::local("libs/a.jar"),
                DeclaredDependency::module("com.acme", "widget", Some("1.2.0")),
            ],
            &[],
        );
        let extracted = ModelExtractor::extract(&project).unwrap();
        assert_eq!(extracted.dependencies.len(), 1);
    }

    #[test]
    fn test_extract_versionless_module_fails() {
        let project = FakeProject::new().with_configuration(
            "runtime",
            vec![DeclaredDependency::module("com.acme", "widget", None)],
            &[],
        );
        let err = ModelExtractor::extract(&project).unwrap_err();
        assert!(err.to_string().contains("has no version"));
    }

    #[test]
    fn test_resolve_relative_url_against_project_dir() {
        let url = resolve_url("libs/repo", Path::new("/work/project")).unwrap();
        assert_eq!(url.as_str(), "file:///work/project/libs/repo");
    }

    #[test]
    fn test_resolve_absolute_url_unchanged() {
        let url = resolve_url(" https://repo.example/m2 ", Path::new("/work")).unwrap();
        assert_eq!(url.as_str(), "https://repo.example/m2");
    }
}
