/// Domain layer - dependency coordinates, scopes and the pure services that
/// extract, filter and aggregate them
pub mod domain;
pub mod services;
