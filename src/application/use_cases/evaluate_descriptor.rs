use crate::dependency_runtime::domain::ExtractedModel;
use crate::dependency_runtime::services::ModelExtractor;
use crate::ports::outbound::{
    EvaluationEngineFactory, ProgressReporter, ProjectModel, WorkspaceHandle, WorkspaceProvider,
};
use crate::shared::error::RuntimeError;
use crate::shared::Result;
use futures::channel::oneshot;

/// EvaluateDescriptorUseCase - drives one build-engine evaluation
///
/// Every call acquires its own workspace and its own engine instance. The
/// model is extracted inside the engine's model-ready hook, and the call only
/// returns once that hook has completed or failed.
///
/// # Type Parameters
/// * `EF` - EvaluationEngineFactory implementation
/// * `WP` - WorkspaceProvider implementation
pub struct EvaluateDescriptorUseCase<EF, WP> {
    engine_factory: EF,
    workspace_provider: WP,
}

impl<EF, WP> EvaluateDescriptorUseCase<EF, WP>
where
    EF: EvaluationEngineFactory,
    WP: WorkspaceProvider,
{
    pub fn new(engine_factory: EF, workspace_provider: WP) -> Self {
        Self {
            engine_factory,
            workspace_provider,
        }
    }

    /// Evaluates `contents` and extracts repositories and runtime dependencies
    ///
    /// # Arguments
    /// * `descriptor` - Label identifying the descriptor in errors
    /// * `contents` - Raw descriptor bytes, written verbatim
    /// * `reporter` - Receives secondary cleanup failures
    ///
    /// # Errors
    /// Returns `RuntimeError::Workspace` if the workspace cannot be created,
    /// written or removed, and `RuntimeError::Evaluation` if the engine or
    /// the extraction fails. When evaluation and cleanup both fail, the
    /// evaluation error is returned and the cleanup error is reported.
    pub async fn evaluate(
        &self,
        descriptor: &str,
        contents: &[u8],
        reporter: &dyn ProgressReporter,
    ) -> Result<ExtractedModel> {
        let workspace = self.workspace_provider.acquire()?;
        let outcome = self.evaluate_in(workspace.as_ref(), descriptor, contents).await;
        let released = workspace.release();

        match (outcome, released) {
            (Ok(model), Ok(())) => Ok(model),
            (Ok(_), Err(cleanup)) => Err(cleanup),
            (Err(primary), Ok(())) => Err(primary),
            (Err(primary), Err(cleanup)) => {
                reporter.report_error(&format!(
                    "⚠️  Warning: Workspace cleanup for {} also failed: {:#}",
                    descriptor, cleanup
                ));
                Err(primary)
            }
        }
    }

    async fn evaluate_in(
        &self,
        workspace: &dyn WorkspaceHandle,
        descriptor: &str,
        contents: &[u8],
    ) -> Result<ExtractedModel> {
        let mut engine = self
            .engine_factory
            .create()
            .map_err(|e| RuntimeError::evaluation(descriptor, e))?;

        workspace.write_file(engine.descriptor_file_name(), contents)?;

        let (sender, receiver) = oneshot::channel();
        engine.after_project(Box::new(move |model: &dyn ProjectModel| -> Result<()> {
            let extracted = ModelExtractor::extract(model)?;
            sender.send(extracted).ok();
            Ok(())
        }));

        engine
            .load_project(workspace.path())
            .await
            .map_err(|e| RuntimeError::evaluation(descriptor, e))?;

        let model = receiver.await.map_err(|_| {
            RuntimeError::evaluation_shape(
                descriptor,
                "The build engine finished without evaluating the project",
            )
        })?;
        Ok(model)
    }
}
