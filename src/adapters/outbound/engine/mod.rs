/// Evaluation engine adapters
///
/// `ScriptEngine` evaluates build scripts in-process; `GradleProcessEngine`
/// delegates to an installed Gradle.
pub mod gradle_process;
pub mod script;
pub mod script_engine;

pub use gradle_process::{GradleProcessEngine, GradleProcessEngineFactory};
pub use script_engine::{default_maven_local, ScriptEngine, ScriptEngineFactory};
