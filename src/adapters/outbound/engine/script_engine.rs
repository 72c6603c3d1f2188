use super::script;
use crate::ports::outbound::{EvaluationEngine, EvaluationEngineFactory, ModelReadyHook};
use crate::shared::Result;
use anyhow::Context;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// ScriptEngine adapter evaluating build scripts in-process
///
/// Each instance owns its hook registry and settings; nothing is shared
/// between evaluations.
pub struct ScriptEngine {
    maven_local: Option<PathBuf>,
    hooks: Vec<ModelReadyHook>,
}

impl ScriptEngine {
    pub fn new(maven_local: Option<PathBuf>) -> Self {
        Self {
            maven_local,
            hooks: Vec::new(),
        }
    }
}

#[async_trait]
impl EvaluationEngine for ScriptEngine {
    fn after_project(&mut self, hook: ModelReadyHook) {
        self.hooks.push(hook);
    }

    async fn load_project(&mut self, project_dir: &Path) -> Result<()> {
        let build_file = project_dir.join(self.descriptor_file_name());
        let source = tokio::fs::read_to_string(&build_file)
            .await
            .with_context(|| format!("Failed to read build file {}", build_file.display()))?;

        let project = script::evaluate(&source, project_dir, self.maven_local.clone())
            .with_context(|| format!("Build file '{}' could not be evaluated", build_file.display()))?;

        // Taking the hooks guarantees each fires at most once
        for hook in std::mem::take(&mut self.hooks) {
            hook(&project)?;
        }
        Ok(())
    }
}

/// Creates [`ScriptEngine`] instances
#[derive(Debug, Clone)]
pub struct ScriptEngineFactory {
    maven_local: Option<PathBuf>,
}

impl ScriptEngineFactory {
    /// `mavenLocal()` resolves to `~/.m2/repository`
    pub fn new() -> Self {
        Self {
            maven_local: default_maven_local(),
        }
    }

    /// `mavenLocal()` resolves to `maven_local`
    pub fn with_maven_local(maven_local: impl Into<PathBuf>) -> Self {
        Self {
            maven_local: Some(maven_local.into()),
        }
    }
}

impl Default for ScriptEngineFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl EvaluationEngineFactory for ScriptEngineFactory {
    fn create(&self) -> Result<Box<dyn EvaluationEngine>> {
        Ok(Box::new(ScriptEngine::new(self.maven_local.clone())))
    }
}

/// `~/.m2/repository`, if a home directory is known
pub fn default_maven_local() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(|home| PathBuf::from(home).join(".m2").join("repository"))
}
