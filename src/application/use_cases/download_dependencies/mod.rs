use crate::application::dto::{DownloadRequest, DownloadResponse};
use crate::application::use_cases::EvaluateDescriptorUseCase;
use crate::dependency_runtime::domain::{DescriptorSource, ResolvedDependency, ScopeSet};
use crate::dependency_runtime::services::{DependencyAggregator, ScopeFilter};
use crate::ports::outbound::{
    DependencyResolver, DescriptorCatalog, DescriptorFetcher, EvaluationEngineFactory,
    ProgressReporter, WorkspaceProvider,
};
use crate::shared::security::validate_path_segment;
use crate::shared::Result;
use anyhow::Context;
use std::collections::HashSet;

/// DownloadDependenciesUseCase - Core use case for runtime dependency download
///
/// For each build descriptor: evaluate it in an isolated workspace, keep the
/// requested scopes, hand repositories and coordinates to the resolver, and
/// merge the resolved batches into one deduplicated set. Descriptors are
/// processed one at a time and the first failure aborts the whole call.
///
/// # Type Parameters
/// * `CAT` - DescriptorCatalog implementation
/// * `FET` - DescriptorFetcher implementation
/// * `EF` - EvaluationEngineFactory implementation
/// * `WP` - WorkspaceProvider implementation
/// * `RES` - DependencyResolver implementation
/// * `PR` - ProgressReporter implementation
pub struct DownloadDependenciesUseCase<CAT, FET, EF, WP, RES, PR> {
    descriptor_catalog: CAT,
    descriptor_fetcher: FET,
    evaluator: EvaluateDescriptorUseCase<EF, WP>,
    dependency_resolver: RES,
    progress_reporter: PR,
}

impl<CAT, FET, EF, WP, RES, PR> DownloadDependenciesUseCase<CAT, FET, EF, WP, RES, PR>
where
    CAT: DescriptorCatalog,
    FET: DescriptorFetcher,
    EF: EvaluationEngineFactory,
    WP: WorkspaceProvider,
    RES: DependencyResolver,
    PR: ProgressReporter,
{
    /// Creates a new DownloadDependenciesUseCase with injected dependencies
    pub fn new(
        descriptor_catalog: CAT,
        descriptor_fetcher: FET,
        engine_factory: EF,
        workspace_provider: WP,
        dependency_resolver: RES,
        progress_reporter: PR,
    ) -> Self {
        Self {
            descriptor_catalog,
            descriptor_fetcher,
            evaluator: EvaluateDescriptorUseCase::new(engine_factory, workspace_provider),
            dependency_resolver,
            progress_reporter,
        }
    }

    /// Executes the download use case
    ///
    /// # Arguments
    /// * `request` - Descriptor source (or none for every packaged
    ///   descriptor) and the scopes to retain
    pub async fn execute(&self, request: DownloadRequest) -> Result<DownloadResponse> {
        match &request.source {
            Some(source) => self.download_source(source, &request.scopes).await,
            None => self.download_all(&request.scopes).await,
        }
    }

    /// Downloads the dependencies of every descriptor published under the
    /// manifest convention
    ///
    /// No packaged descriptors is a success with an empty result.
    pub async fn download_all(&self, scopes: &ScopeSet) -> Result<DownloadResponse> {
        // Step 1: Discover packaged descriptors
        let descriptors = self.discover_descriptors()?;
        if descriptors.is_empty() {
            self.progress_reporter
                .report("ℹ️  No packaged build descriptors found, nothing to download");
            return Ok(DownloadResponse::default());
        }
        self.progress_reporter.report(&format!(
            "🔍 Found {} packaged build descriptor(s)",
            descriptors.len()
        ));

        // Step 2: Process descriptors sequentially, aggregating each batch
        let mut aggregator = DependencyAggregator::new();
        let total = descriptors.len();
        for (index, source) in descriptors.iter().enumerate() {
            self.progress_reporter
                .report_progress(index + 1, total, Some(source.label().as_str()));
            let batch = self.process_descriptor(source, scopes).await?;
            aggregator.add_batch(batch);
        }

        // Step 3: Build response
        self.progress_reporter.report_completion(&format!(
            "✅ Resolved {} runtime dependenc{} from {} descriptor(s)",
            aggregator.len(),
            if aggregator.len() == 1 { "y" } else { "ies" },
            total
        ));
        Ok(DownloadResponse::new(aggregator.into_set(), total))
    }

    /// Downloads the dependencies of a single descriptor
    pub async fn download_source(
        &self,
        source: &DescriptorSource,
        scopes: &ScopeSet,
    ) -> Result<DownloadResponse> {
        let resolved = self.process_descriptor(source, scopes).await?;
        self.progress_reporter.report_completion(&format!(
            "✅ Resolved {} runtime dependenc{} from {}",
            resolved.len(),
            if resolved.len() == 1 { "y" } else { "ies" },
            source
        ));
        Ok(DownloadResponse::new(resolved, 1))
    }

    /// Downloads the dependencies of the descriptor packaged for
    /// `group`/`artifact`
    pub async fn download_artifact(
        &self,
        group: &str,
        artifact: &str,
        scopes: &ScopeSet,
    ) -> Result<DownloadResponse> {
        self.download_source(&DescriptorSource::artifact(group, artifact), scopes)
            .await
    }

    fn discover_descriptors(&self) -> Result<Vec<DescriptorSource>> {
        let mut descriptors = Vec::new();
        for group in self.descriptor_catalog.list_groups()? {
            for artifact in self.descriptor_catalog.list_artifacts(&group)? {
                descriptors.push(DescriptorSource::artifact(group.clone(), artifact));
            }
        }
        Ok(descriptors)
    }

    async fn process_descriptor(
        &self,
        source: &DescriptorSource,
        scopes: &ScopeSet,
    ) -> Result<HashSet<ResolvedDependency>> {
        self.resolve_descriptor(source, scopes)
            .await
            .with_context(|| format!("Failed to process build descriptor {}", source))
    }

    async fn resolve_descriptor(
        &self,
        source: &DescriptorSource,
        scopes: &ScopeSet,
    ) -> Result<HashSet<ResolvedDependency>> {
        let label = source.label();

        // Step 1: Read descriptor bytes
        let contents = self.read_descriptor(source).await?;

        // Step 2: Evaluate and extract
        self.progress_reporter
            .report(&format!("📖 Evaluating build descriptor: {}", label));
        let model = self
            .evaluator
            .evaluate(&label, &contents, &self.progress_reporter)
            .await?;
        self.progress_reporter.report(&format!(
            "✅ Extracted {} repositor{} and {} runtime dependenc{}",
            model.repositories.len(),
            if model.repositories.len() == 1 { "y" } else { "ies" },
            model.dependencies.len(),
            if model.dependencies.len() == 1 { "y" } else { "ies" },
        ));

        // Step 3: Apply scope filter
        let declared = model.dependencies.len();
        let dependencies = ScopeFilter::filter(model.dependencies, scopes);
        if dependencies.len() < declared {
            self.progress_reporter.report(&format!(
                "   Excluded {} dependenc{} outside scopes {}",
                declared - dependencies.len(),
                if declared - dependencies.len() == 1 { "y" } else { "ies" },
                scopes
            ));
        }
        if dependencies.is_empty() {
            return Ok(HashSet::new());
        }

        // Step 4: Delegate resolution
        self.progress_reporter.report(&format!(
            "🌐 Resolving {} dependenc{}...",
            dependencies.len(),
            if dependencies.len() == 1 { "y" } else { "ies" }
        ));
        self.dependency_resolver
            .download(&model.repositories, &dependencies)
            .await
    }

    async fn read_descriptor(&self, source: &DescriptorSource) -> Result<Vec<u8>> {
        match source {
            DescriptorSource::Bytes(bytes) => Ok(bytes.clone()),
            DescriptorSource::Url(url) => self.descriptor_fetcher.fetch(url).await,
            DescriptorSource::Resource(path) => self.descriptor_catalog.read_resource(path),
            DescriptorSource::Artifact { group, artifact } => {
                validate_path_segment(group, "Group")?;
                validate_path_segment(artifact, "Artifact")?;
                self.descriptor_catalog.locate_descriptor(group, artifact)
            }
        }
    }
}
