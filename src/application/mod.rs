/// Application layer - Use cases and DTOs
///
/// This layer orchestrates workspace, evaluation, extraction, filtering and
/// resolution, talking to infrastructure only through ports.
pub mod dto;
pub mod use_cases;
