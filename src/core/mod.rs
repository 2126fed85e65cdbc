//! Business logic: validation, export orchestration, diagnostics

pub mod diagnostics;
pub mod export;
pub mod validate;
