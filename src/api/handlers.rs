//! API Handlers
//!
//! HTTP request handlers for each student endpoint. Each handler is a thin
//! orchestration over the [`StudentStore`].

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{StatusCode, Uri},
    Json,
};
use tracing::debug;

use crate::api::extract::Payload;
use crate::error::{ApiError, Result};
use crate::models::{DeleteResult, ErrorResponse, Student, StudentPayload};
use crate::store::StudentStore;

/// Tag for grouping student endpoints in OpenAPI documentation
pub const STUDENT_TAG: &str = "student";

/// Application state shared across all handlers.
///
/// Holds the store behind an `Arc<dyn StudentStore>`; backends handle their
/// own synchronization.
#[derive(Clone)]
pub struct AppState {
    /// Shared student store
    pub store: Arc<dyn StudentStore>,
}

impl AppState {
    /// Creates a new AppState owning the given store.
    pub fn new(store: impl StudentStore + 'static) -> Self {
        Self::from_store(Arc::new(store))
    }

    /// Creates a new AppState from an already shared store.
    pub fn from_store(store: Arc<dyn StudentStore>) -> Self {
        Self { store }
    }
}

/// Get a list of students.
///
/// Retrieves every student in the database.
#[utoipa::path(
    get,
    path = "/student",
    tag = STUDENT_TAG,
    responses(
        (status = 200, description = "Array of student objects", body = [Student]),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
)]
pub async fn list_students(State(state): State<AppState>) -> Result<Json<Vec<Student>>> {
    let students = state.store.list().await?;
    Ok(Json(students))
}

/// Create a new student.
///
/// Stores the supplied fields under a freshly generated id.
#[utoipa::path(
    post,
    path = "/student",
    tag = STUDENT_TAG,
    request_body = StudentPayload,
    responses(
        (status = 200, description = "The created student object", body = Student),
        (status = 400, description = "Invalid parameters", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
)]
pub async fn create_student(
    State(state): State<AppState>,
    Payload(payload): Payload<StudentPayload>,
) -> Result<Json<Student>> {
    debug!("create student: {:?}", payload);
    let student = state.store.create(payload).await?;
    Ok(Json(student))
}

/// Delete a student by ID.
///
/// Deleting an id that matches nothing still succeeds, with a zero count.
#[utoipa::path(
    delete,
    path = "/student/{id}",
    tag = STUDENT_TAG,
    params(
        ("id" = String, Path, description = "ID of the student to delete")
    ),
    responses(
        (status = 200, description = "Delete result with the number of removed records", body = DeleteResult),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
)]
pub async fn delete_student(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResult>> {
    let result = state.store.delete(&id).await?;
    debug!("delete student {}: {} removed", id, result.deleted_count);
    Ok(Json(result))
}

/// Update a student by ID.
///
/// Replaces only the supplied fields and refreshes `updatedAt`.
#[utoipa::path(
    patch,
    path = "/student/{id}",
    tag = STUDENT_TAG,
    params(
        ("id" = String, Path, description = "ID of the student to update")
    ),
    request_body = StudentPayload,
    responses(
        (status = 200, description = "The updated student object", body = Student),
        (status = 400, description = "Invalid parameters", body = ErrorResponse),
        (status = 404, description = "Student not found", body = String),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
)]
pub async fn update_student(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Payload(patch): Payload<StudentPayload>,
) -> Result<Json<Student>> {
    debug!("update student {}: {:?}", id, patch);
    state
        .store
        .update(&id, patch)
        .await?
        .map(Json)
        .ok_or_else(ApiError::student_not_found)
}

/// Get students with work and photo.
///
/// Retrieves students whose practical work is done and who have a non-empty photo.
#[utoipa::path(
    get,
    path = "/student/foto",
    tag = STUDENT_TAG,
    responses(
        (status = 200, description = "Array of student objects", body = [Student]),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
)]
pub async fn students_with_work_and_photo(
    State(state): State<AppState>,
) -> Result<Json<Vec<Student>>> {
    let students = state.store.with_work_and_photo().await?;
    debug!("{} students with work and photo", students.len());
    Ok(Json(students))
}

/// Fallback for unknown routes.
pub async fn handler404(uri: Uri) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse::new(format!("Invalid path: {}", uri))),
    )
}
