/// Use cases module containing application business logic orchestration
mod download_dependencies;
mod evaluate_descriptor;

pub use download_dependencies::DownloadDependenciesUseCase;
pub use evaluate_descriptor::EvaluateDescriptorUseCase;
