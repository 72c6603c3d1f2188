use clap::Parser;
use reqwest::Url;
use std::path::PathBuf;

use crate::dependency_runtime::domain::{DependencyScope, DescriptorSource};
use crate::shared::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// One artifact path per line
    List,
    /// Platform classpath string
    Classpath,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "list" => Ok(OutputFormat::List),
            "classpath" | "cp" => Ok(OutputFormat::Classpath),
            _ => Err(format!(
                "Invalid format: {}. Please specify 'list' or 'classpath'",
                s
            )),
        }
    }
}

/// Evaluation engine selectable from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineKind {
    /// Built-in build-script evaluator
    Script,
    /// Installed Gradle, run in dry-run mode
    Gradle,
}

impl std::str::FromStr for EngineKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "script" => Ok(EngineKind::Script),
            "gradle" => Ok(EngineKind::Gradle),
            _ => Err(format!(
                "Invalid engine: {}. Please specify 'script' or 'gradle'",
                s
            )),
        }
    }
}

fn parse_scope(s: &str) -> std::result::Result<DependencyScope, String> {
    s.parse::<DependencyScope>().map_err(|e| e.to_string())
}

/// Download the runtime dependencies declared by packaged Gradle build scripts
#[derive(Parser, Debug)]
#[command(name = "gradle-dependency-runtime")]
#[command(version)]
#[command(
    about = "Download the runtime dependencies declared by packaged Gradle build scripts",
    long_about = None
)]
pub struct Args {
    /// Resource root holding META-INF/gradle (defaults to current directory).
    /// Can be specified multiple times
    #[arg(short, long = "resources", value_name = "DIR")]
    pub resources: Vec<PathBuf>,

    /// Single build descriptor to process, as a file path or URL
    #[arg(short, long, value_name = "PATH|URL", conflicts_with_all = ["group", "artifact"])]
    pub descriptor: Option<String>,

    /// Group of the packaged descriptor to process (requires --artifact)
    #[arg(long, requires = "artifact")]
    pub group: Option<String>,

    /// Artifact of the packaged descriptor to process (requires --group)
    #[arg(long, requires = "group")]
    pub artifact: Option<String>,

    /// Scope to retain (defaults to compile and runtime).
    /// Can be specified multiple times: -s runtime -s compile
    #[arg(short, long = "scope", value_name = "SCOPE", value_parser = parse_scope)]
    pub scope: Vec<DependencyScope>,

    /// Local repository receiving downloaded artifacts (defaults to ~/.m2/repository)
    #[arg(short, long, value_name = "DIR")]
    pub local_repository: Option<PathBuf>,

    /// Evaluation engine: script or gradle
    #[arg(short, long, default_value = "script")]
    pub engine: EngineKind,

    /// Gradle executable used by the gradle engine
    #[arg(long, value_name = "CMD", default_value = "gradle")]
    pub gradle_command: String,

    /// Output format: list or classpath
    #[arg(short, long, default_value = "list")]
    pub format: OutputFormat,

    /// Only report errors on stderr
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Descriptor selected on the command line, if any
    ///
    /// Anything containing `://` is a URL; other values are file paths,
    /// resolved against the current directory.
    pub fn descriptor_source(&self) -> Result<Option<DescriptorSource>> {
        if let Some(descriptor) = &self.descriptor {
            if descriptor.contains("://") {
                return Ok(Some(DescriptorSource::Url(descriptor.clone())));
            }
            let path = std::env::current_dir()?.join(descriptor);
            let url = Url::from_file_path(&path).map_err(|_| {
                anyhow::anyhow!("Descriptor path is not absolute: {}", path.display())
            })?;
            return Ok(Some(DescriptorSource::Url(url.to_string())));
        }

        Ok(match (&self.group, &self.artifact) {
            (Some(group), Some(artifact)) => Some(DescriptorSource::artifact(group, artifact)),
            _ => None,
        })
    }
}
