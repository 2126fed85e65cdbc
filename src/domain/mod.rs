//! Core domain types and models
//!
//! This module contains the domain layer: the error hierarchy, validated
//! identifier newtypes, the data source enumeration, the export request,
//! and the tabular result model.

pub mod errors;
pub mod ids;
pub mod request;
pub mod result;
pub mod source;
pub mod table;

pub use errors::{QueryError, VantageError};
pub use ids::{StorefrontId, WorkspaceId};
pub use request::{ExportRequest, MAX_STOREFRONTS};
pub use result::Result;
pub use source::{DataSource, DeviceType, DisplayType, ExtraOptions, ProductPosition};
pub use table::{CellValue, Table};
