//! gradle-dependency-runtime - runtime dependencies from packaged Gradle build scripts
//!
//! This library evaluates Gradle build descriptors far enough to read their
//! repositories and `runtime` dependencies, without running a build, and hands
//! the result to a resolver that materializes the artifacts locally. It is
//! organised in hexagonal layers.
//!
//! # Architecture
//!
//! - **Domain Layer** (`dependency_runtime`): coordinates, scopes and the pure
//!   extraction, filtering and aggregation services
//! - **Application Layer** (`application`): the evaluation driver and the
//!   download use case
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Concrete implementations of ports
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use gradle_dependency_runtime::prelude::*;
//!
//! # async fn run() -> Result<()> {
//! // Create use case with injected adapters
//! let use_case = DownloadDependenciesUseCase::new(
//!     DirectoryDescriptorCatalog::new(vec![".".into()]),
//!     HttpDescriptorFetcher::new()?,
//!     ScriptEngineFactory::new(),
//!     WorkspaceManager::new(),
//!     MavenRepositoryResolver::new("/tmp/m2")?,
//!     StderrProgressReporter::new(),
//! );
//!
//! // Download everything declared under META-INF/gradle
//! let response = use_case.execute(DownloadRequest::builder().build()?).await?;
//! println!("{}", response.classpath());
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod cli;
pub mod dependency_runtime;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::engine::{GradleProcessEngineFactory, ScriptEngineFactory};
    pub use crate::adapters::outbound::filesystem::{DirectoryDescriptorCatalog, WorkspaceManager};
    pub use crate::adapters::outbound::network::{HttpDescriptorFetcher, MavenRepositoryResolver};
    pub use crate::application::dto::{DownloadRequest, DownloadResponse};
    pub use crate::application::use_cases::{
        DownloadDependenciesUseCase, EvaluateDescriptorUseCase,
    };
    pub use crate::dependency_runtime::domain::{
        DependencyCoordinate, DependencyScope, DescriptorSource, RepositoryEndpoint,
        ResolvedDependency, ScopeSet,
    };
    pub use crate::ports::outbound::{
        DependencyResolver, DescriptorCatalog, DescriptorFetcher, EvaluationEngine,
        EvaluationEngineFactory, ProgressReporter, ProjectModel, WorkspaceProvider,
    };
    pub use crate::shared::error::RuntimeError;
    pub use crate::shared::Result;
}
