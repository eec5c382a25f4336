//! Response DTOs for the students API
//!
//! Defines the structure of outgoing HTTP response bodies that are not the
//! student record itself.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Response body for the DELETE operation (DELETE /student/:id)
///
/// A delete that matched nothing is still acknowledged, with a zero count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResult {
    /// Whether the store accepted the operation
    pub acknowledged: bool,
    /// Number of records removed (0 or 1)
    pub deleted_count: u64,
}

impl DeleteResult {
    /// Creates a new acknowledged DeleteResult
    pub fn new(deleted_count: u64) -> Self {
        Self {
            acknowledged: true,
            deleted_count,
        }
    }
}

/// Error response body for server-side failures
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
