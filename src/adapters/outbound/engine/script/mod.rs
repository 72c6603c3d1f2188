//! Embedded evaluator for the declarative subset of Groovy build scripts
//!
//! The evaluator runs the script top to bottom: plugins create their
//! conventional configurations, `repositories`, `configurations` and
//! `dependencies` blocks populate the model, and everything else (tasks,
//! extensions, `buildscript`) is skipped.

mod interpreter;
mod lexer;
mod parser;
mod project;

pub use interpreter::{GOOGLE_URL, JCENTER_URL, MAVEN_CENTRAL_URL, PLUGIN_PORTAL_URL};
pub use project::ScriptProject;

use crate::shared::Result;
use interpreter::Interpreter;
use std::path::{Path, PathBuf};

/// Evaluates `source` as the build script of the project in `project_dir`
///
/// # Errors
/// Returns an error naming the offending line if the script cannot be
/// tokenized, parsed, or evaluated
pub fn evaluate(source: &str, project_dir: &Path, maven_local: Option<PathBuf>) -> Result<ScriptProject> {
    let tokens = lexer::tokenize(source)?;
    let statements = parser::parse(tokens)?;
    Interpreter::new(project_dir, maven_local).run(&statements)
}
