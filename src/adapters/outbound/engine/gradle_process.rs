use crate::ports::outbound::{
    ConfigurationModel, DeclaredDependency, DeclaredRepository, EvaluationEngine,
    EvaluationEngineFactory, ModelReadyHook, ProjectModel, RepositoryKind,
};
use crate::shared::Result;
use anyhow::Context;
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tokio::process::Command;

/// Prefix of the stdout line carrying the evaluated model
const REPORT_MARKER: &str = "@@gradle-dependency-runtime-model@@";

const INIT_SCRIPT_NAME: &str = "gradle-dependency-runtime-init.gradle";

/// Marks the workspace as the build root so Gradle stops searching parent
/// directories for a settings file
const SETTINGS_FILE_NAME: &str = "settings.gradle";

/// Init script reporting the root project once every project is evaluated.
/// With `--dry-run` no task action ever runs.
const INIT_SCRIPT: &str = r#"
import groovy.json.JsonOutput
import org.gradle.api.artifacts.ExternalModuleDependency
import org.gradle.api.artifacts.repositories.FlatDirectoryArtifactRepository
import org.gradle.api.artifacts.repositories.IvyArtifactRepository
import org.gradle.api.artifacts.repositories.MavenArtifactRepository

gradle.projectsEvaluated { g ->
    def p = g.rootProject
    def repositories = p.repositories.collect { r ->
        def kind = 'other'
        def url = null
        if (r instanceof MavenArtifactRepository) { kind = 'maven'; url = r.url?.toString() }
        else if (r instanceof IvyArtifactRepository) { kind = 'ivy'; url = r.url?.toString() }
        else if (r instanceof FlatDirectoryArtifactRepository) { kind = 'flatDir' }
        [name: r.name, kind: kind, url: url]
    }
    def configurations = p.configurations.collect { c ->
        [name: c.name, dependencies: c.allDependencies.collect { d ->
            [group: d.group, name: d.name, version: d.version,
             external: d instanceof ExternalModuleDependency]
        }]
    }
    println '@@gradle-dependency-runtime-model@@' + JsonOutput.toJson([
        projectDir: p.projectDir.absolutePath,
        repositories: repositories,
        configurations: configurations
    ])
}
"#;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProjectReport {
    project_dir: PathBuf,
    #[serde(default)]
    repositories: Vec<RepositoryReport>,
    #[serde(default)]
    configurations: Vec<ConfigurationReport>,
}

#[derive(Debug, Deserialize)]
struct RepositoryReport {
    name: Option<String>,
    kind: String,
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ConfigurationReport {
    name: String,
    #[serde(default)]
    dependencies: Vec<DependencyReport>,
}

#[derive(Debug, Deserialize)]
struct DependencyReport {
    group: Option<String>,
    name: String,
    version: Option<String>,
    external: bool,
}

impl ConfigurationModel for &ConfigurationReport {
    fn name(&self) -> &str {
        &self.name
    }

    fn all_dependencies(&self) -> Vec<DeclaredDependency> {
        let mut seen = HashSet::new();
        self.dependencies
            .iter()
            .map(|d| DeclaredDependency {
                group: d.group.clone(),
                name: d.name.clone(),
                version: d.version.clone(),
                external: d.external,
            })
            .filter(|d| seen.insert(d.clone()))
            .collect()
    }
}

impl ProjectModel for ProjectReport {
    fn project_dir(&self) -> &Path {
        &self.project_dir
    }

    fn repositories(&self) -> Vec<DeclaredRepository> {
        self.repositories
            .iter()
            .map(|r| DeclaredRepository {
                name: r.name.clone(),
                kind: match r.kind.as_str() {
                    "maven" => RepositoryKind::Maven,
                    "ivy" => RepositoryKind::Ivy,
                    "flatDir" => RepositoryKind::FlatDir,
                    _ => RepositoryKind::Other,
                },
                url: r.url.clone(),
            })
            .collect()
    }

    fn configuration(&self, name: &str) -> Option<Box<dyn ConfigurationModel + '_>> {
        self.configurations
            .iter()
            .find(|c| c.name == name)
            .map(|c| Box::new(c) as Box<dyn ConfigurationModel + '_>)
    }
}

/// Extracts the model report from Gradle's standard output
fn parse_report(stdout: &str) -> Result<ProjectReport> {
    let payload = stdout
        .lines()
        .find_map(|line| line.trim().strip_prefix(REPORT_MARKER))
        .ok_or_else(|| anyhow::anyhow!("Gradle finished without reporting the evaluated project"))?;
    serde_json::from_str(payload).context("Gradle reported a malformed project model")
}

/// GradleProcessEngine adapter delegating evaluation to a Gradle installation
///
/// Runs `gradle --dry-run help` with an init script that reports the root
/// project after evaluation; no task action executes.
pub struct GradleProcessEngine {
    command: String,
    hooks: Vec<ModelReadyHook>,
}

impl GradleProcessEngine {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            hooks: Vec::new(),
        }
    }
}

#[async_trait]
impl EvaluationEngine for GradleProcessEngine {
    fn after_project(&mut self, hook: ModelReadyHook) {
        self.hooks.push(hook);
    }

    async fn load_project(&mut self, project_dir: &Path) -> Result<()> {
        let settings = project_dir.join(SETTINGS_FILE_NAME);
        tokio::fs::write(&settings, "")
            .await
            .with_context(|| format!("Failed to write {}", settings.display()))?;

        let init_script = project_dir.join(INIT_SCRIPT_NAME);
        tokio::fs::write(&init_script, INIT_SCRIPT)
            .await
            .with_context(|| format!("Failed to write {}", init_script.display()))?;

        let output = Command::new(&self.command)
            .arg("--quiet")
            .arg("--dry-run")
            .arg("--init-script")
            .arg(&init_script)
            .arg("--project-dir")
            .arg(project_dir)
            .arg("help")
            .current_dir(project_dir)
            .kill_on_drop(true)
            .output()
            .await
            .with_context(|| format!("Failed to start '{}'", self.command))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!(
                "'{}' exited with {}: {}",
                self.command,
                output.status,
                stderr.trim()
            );
        }

        let report = parse_report(&String::from_utf8_lossy(&output.stdout))?;
        for hook in std::mem::take(&mut self.hooks) {
            hook(&report)?;
        }
        Ok(())
    }
}

/// Creates [`GradleProcessEngine`] instances running `command`
#[derive(Debug, Clone)]
pub struct GradleProcessEngineFactory {
    command: String,
}

impl GradleProcessEngineFactory {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }
}

impl EvaluationEngineFactory for GradleProcessEngineFactory {
    fn create(&self) -> Result<Box<dyn EvaluationEngine>> {
        Ok(Box::new(GradleProcessEngine::new(self.command.clone())))
    }
}
