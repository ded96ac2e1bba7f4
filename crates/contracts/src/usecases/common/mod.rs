//! Общие типы и трейты для всех use cases

pub mod usecase_metadata;
pub mod usecase_result;

pub use usecase_metadata::UseCaseMetadata;
pub use usecase_result::UseCaseError;
