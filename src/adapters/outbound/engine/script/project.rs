use crate::ports::outbound::{
    ConfigurationModel, DeclaredDependency, DeclaredRepository, ProjectModel,
};
use crate::shared::Result;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Plugins that contribute the conventional JVM configurations
const JVM_PLUGINS: &[&str] = &[
    "java",
    "java-library",
    "application",
    "groovy",
    "scala",
    "war",
    "kotlin",
    "org.jetbrains.kotlin.jvm",
];

/// Plugins known to add no dependency configurations
const INERT_PLUGINS: &[&str] = &[
    "base",
    "distribution",
    "eclipse",
    "idea",
    "maven",
    "maven-publish",
    "signing",
];

/// Configurations created by the JVM plugins, with their parents
const JVM_CONFIGURATIONS: &[(&str, &[&str])] = &[
    ("compile", &[]),
    ("implementation", &["compile"]),
    ("compileOnly", &[]),
    ("compileClasspath", &["compile", "compileOnly", "implementation"]),
    ("annotationProcessor", &[]),
    ("runtime", &["compile"]),
    ("runtimeOnly", &[]),
    ("runtimeClasspath", &["runtimeOnly", "runtime", "implementation"]),
    ("testCompile", &["compile"]),
    ("testImplementation", &["testCompile", "implementation"]),
    ("testCompileOnly", &[]),
    ("testCompileClasspath", &["testCompile", "testCompileOnly", "testImplementation"]),
    ("testRuntime", &["runtime", "testCompile"]),
    ("testRuntimeOnly", &["runtimeOnly"]),
    ("testRuntimeClasspath", &["testRuntimeOnly", "testRuntime", "testImplementation"]),
    ("apiElements", &[]),
    ("runtimeElements", &["implementation", "runtimeOnly", "runtime"]),
    ("archives", &[]),
    ("default", &["runtime"]),
];

#[derive(Debug, Clone)]
struct ScriptConfiguration {
    name: String,
    extends_from: Vec<String>,
    dependencies: Vec<DeclaredDependency>,
}

/// Project model produced by evaluating a build script
#[derive(Debug, Clone)]
pub struct ScriptProject {
    dir: PathBuf,
    plugins: Vec<String>,
    repositories: Vec<DeclaredRepository>,
    configurations: Vec<ScriptConfiguration>,
}

impl ScriptProject {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            plugins: Vec::new(),
            repositories: Vec::new(),
            configurations: Vec::new(),
        }
    }

    pub fn has_plugin(&self, id: &str) -> bool {
        self.plugins.iter().any(|p| p == id)
    }

    /// True once a plugin this model does not know has been applied; such a
    /// plugin may contribute configurations of its own
    pub fn has_foreign_plugin(&self) -> bool {
        self.plugins
            .iter()
            .any(|p| !JVM_PLUGINS.contains(&p.as_str()) && !INERT_PLUGINS.contains(&p.as_str()))
    }

    /// Applies a plugin, creating the configurations it contributes
    pub fn apply_plugin(&mut self, id: &str) -> Result<()> {
        if self.has_plugin(id) {
            return Ok(());
        }
        self.plugins.push(id.to_string());

        if JVM_PLUGINS.contains(&id) {
            for (name, parents) in JVM_CONFIGURATIONS {
                self.maybe_create(name);
                for parent in *parents {
                    self.extend(name, parent)?;
                }
            }
        }
        if id == "java-library" {
            self.maybe_create("api");
            self.maybe_create("compileOnlyApi");
            self.extend("implementation", "api")?;
            self.extend("compileOnly", "compileOnlyApi")?;
            self.extend("apiElements", "api")?;
        }
        Ok(())
    }

    /// Adds a repository, numbering default names the way Gradle does
    /// (`maven`, `maven2`, `maven3`, ...)
    pub fn add_repository(&mut self, mut repository: DeclaredRepository) {
        if let Some(base) = repository.name.clone() {
            let mut candidate = base.clone();
            let mut counter = 2;
            while self
                .repositories
                .iter()
                .any(|r| r.name.as_deref() == Some(candidate.as_str()))
            {
                candidate = format!("{}{}", base, counter);
                counter += 1;
            }
            repository.name = Some(candidate);
        }
        self.repositories.push(repository);
    }

    pub fn has_configuration(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    pub fn maybe_create(&mut self, name: &str) {
        if !self.has_configuration(name) {
            self.configurations.push(ScriptConfiguration {
                name: name.to_string(),
                extends_from: Vec::new(),
                dependencies: Vec::new(),
            });
        }
    }

    /// Makes `name` inherit every dependency of `parent`
    ///
    /// # Errors
    /// Returns an error if either configuration is unknown or the link would
    /// create an inheritance cycle
    pub fn extend(&mut self, name: &str, parent: &str) -> Result<()> {
        for existing in [name, parent] {
            if !self.has_configuration(existing) {
                anyhow::bail!("Configuration with name '{}' not found", existing);
            }
        }
        if self.hierarchy(parent).iter().any(|c| c == name) {
            anyhow::bail!(
                "Cyclic extendsFrom from configuration '{}' and configuration '{}' is not allowed",
                name,
                parent
            );
        }

        if let Some(configuration) = self.find_mut(name) {
            if !configuration.extends_from.iter().any(|p| p == parent) {
                configuration.extends_from.push(parent.to_string());
            }
        }
        Ok(())
    }

    pub fn add_dependency(&mut self, configuration: &str, dependency: DeclaredDependency) -> Result<()> {
        let target = self
            .find_mut(configuration)
            .ok_or_else(|| anyhow::anyhow!("Configuration with name '{}' not found", configuration))?;
        target.dependencies.push(dependency);
        Ok(())
    }

    fn find(&self, name: &str) -> Option<&ScriptConfiguration> {
        self.configurations.iter().find(|c| c.name == name)
    }

    fn find_mut(&mut self, name: &str) -> Option<&mut ScriptConfiguration> {
        self.configurations.iter_mut().find(|c| c.name == name)
    }

    /// `name` followed by every configuration it inherits from, depth first
    fn hierarchy(&self, name: &str) -> Vec<String> {
        let mut visited = Vec::new();
        let mut pending = vec![name.to_string()];
        while let Some(current) = pending.pop() {
            if visited.contains(&current) {
                continue;
            }
            if let Some(configuration) = self.find(&current) {
                pending.extend(configuration.extends_from.iter().rev().cloned());
            }
            visited.push(current);
        }
        visited
    }

    fn all_dependencies_of(&self, name: &str) -> Vec<DeclaredDependency> {
        let mut seen = HashSet::new();
        self.hierarchy(name)
            .iter()
            .filter_map(|c| self.find(c))
            .flat_map(|c| c.dependencies.iter())
            .filter(|d| seen.insert((*d).clone()))
            .cloned()
            .collect()
    }
}

struct ScriptConfigurationView<'a> {
    project: &'a ScriptProject,
    name: &'a str,
}

impl ConfigurationModel for ScriptConfigurationView<'_> {
    fn name(&self) -> &str {
        self.name
    }

    fn all_dependencies(&self) -> Vec<DeclaredDependency> {
        self.project.all_dependencies_of(self.name)
    }
}

impl ProjectModel for ScriptProject {
    fn project_dir(&self) -> &Path {
        &self.dir
    }

    fn repositories(&self) -> Vec<DeclaredRepository> {
        self.repositories.clone()
    }

    fn configuration(&self, name: &str) -> Option<Box<dyn ConfigurationModel + '_>> {
        self.find(name).map(|configuration| {
            Box::new(ScriptConfigurationView {
                project: self,
                name: &configuration.name,
            }) as Box<dyn ConfigurationModel + '_>
        })
    }
}
