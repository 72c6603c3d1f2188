use clap::Parser;
use gradle_dependency_runtime::adapters::outbound::console::StderrProgressReporter;
use gradle_dependency_runtime::adapters::outbound::engine::{
    default_maven_local, GradleProcessEngineFactory, ScriptEngineFactory,
};
use gradle_dependency_runtime::adapters::outbound::filesystem::{
    DirectoryDescriptorCatalog, WorkspaceManager,
};
use gradle_dependency_runtime::adapters::outbound::network::{
    HttpDescriptorFetcher, MavenRepositoryResolver,
};
use gradle_dependency_runtime::application::dto::{DownloadRequest, DownloadResponse};
use gradle_dependency_runtime::application::use_cases::DownloadDependenciesUseCase;
use gradle_dependency_runtime::cli::{Args, EngineKind, OutputFormat};
use gradle_dependency_runtime::dependency_runtime::domain::ScopeSet;
use gradle_dependency_runtime::ports::outbound::EvaluationEngineFactory;
use gradle_dependency_runtime::shared::error::ExitCode;
use gradle_dependency_runtime::shared::Result;
use std::path::PathBuf;
use std::process;

#[tokio::main]
async fn main() {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let code = if e.use_stderr() {
                ExitCode::InvalidArguments
            } else {
                ExitCode::Success
            };
            let _ = e.print();
            process::exit(code.as_i32());
        }
    };

    if let Err(e) = run(args).await {
        eprintln!("\n❌ An error occurred:\n");
        eprintln!("{}", e);

        // Display error chain
        let mut source = e.source();
        while let Some(err) = source {
            eprintln!("\nCaused by: {}", err);
            source = err.source();
        }

        eprintln!();
        process::exit(ExitCode::ApplicationError.as_i32());
    }
}

async fn run(args: Args) -> Result<()> {
    let scopes = if args.scope.is_empty() {
        ScopeSet::default()
    } else {
        ScopeSet::new(args.scope.iter().copied())
    };
    let request = DownloadRequest::builder().scopes(scopes);
    let request = match args.descriptor_source()? {
        Some(source) => request.source(source),
        None => request,
    }
    .build()?;

    // mavenLocal() and the download target share one local repository
    let local_repository = args
        .local_repository
        .clone()
        .or_else(default_maven_local)
        .ok_or_else(|| {
            anyhow::anyhow!(
                "Cannot determine the local repository.\n\n💡 Hint: Pass --local-repository <DIR>"
            )
        })?;

    let response = match args.engine {
        EngineKind::Script => {
            let factory = ScriptEngineFactory::with_maven_local(&local_repository);
            execute(factory, &args, local_repository, request).await?
        }
        EngineKind::Gradle => {
            let factory = GradleProcessEngineFactory::new(args.gradle_command.clone());
            execute(factory, &args, local_repository, request).await?
        }
    };

    present(&response, args.format);
    Ok(())
}

/// Wires the adapters around the selected engine and runs the use case
async fn execute<EF: EvaluationEngineFactory>(
    engine_factory: EF,
    args: &Args,
    local_repository: PathBuf,
    request: DownloadRequest,
) -> Result<DownloadResponse> {
    let resource_roots = if args.resources.is_empty() {
        vec![PathBuf::from(".")]
    } else {
        args.resources.clone()
    };

    // Create adapters (Dependency Injection)
    let descriptor_catalog = DirectoryDescriptorCatalog::new(resource_roots);
    let descriptor_fetcher = HttpDescriptorFetcher::new()?;
    let workspace_provider = WorkspaceManager::new();
    let dependency_resolver = MavenRepositoryResolver::new(local_repository)?;
    let progress_reporter = if args.quiet {
        StderrProgressReporter::quiet()
    } else {
        StderrProgressReporter::new()
    };

    // Create use case with injected dependencies
    let use_case = DownloadDependenciesUseCase::new(
        descriptor_catalog,
        descriptor_fetcher,
        engine_factory,
        workspace_provider,
        dependency_resolver,
        progress_reporter,
    );

    use_case.execute(request).await
}

fn present(response: &DownloadResponse, format: OutputFormat) {
    match format {
        OutputFormat::List => {
            for dependency in response.sorted() {
                println!("{}", dependency.location().display());
            }
        }
        OutputFormat::Classpath => {
            if !response.dependencies.is_empty() {
                println!("{}", response.classpath());
            }
        }
    }
}
