//! API Documentation
//!
//! OpenAPI description generated from the handler annotations, served as JSON
//! and through an interactive Swagger UI.

use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::handlers;
use crate::models::{DeleteResult, ErrorResponse, Student, StudentPayload};

/// Path of the interactive documentation UI
pub const DOCS_PATH: &str = "/api-docs";

/// Path of the machine-readable OpenAPI document
pub const OPENAPI_JSON_PATH: &str = "/openapi.json";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Students API",
        version = "1.0.0",
        description = "API for managing student data"
    ),
    paths(
        handlers::list_students,
        handlers::create_student,
        handlers::delete_student,
        handlers::update_student,
        handlers::students_with_work_and_photo,
    ),
    components(schemas(Student, StudentPayload, DeleteResult, ErrorResponse)),
    tags((name = "student", description = "Student records"))
)]
pub struct ApiDoc;

/// Swagger UI service, mergeable into the main router.
pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new(DOCS_PATH).url(OPENAPI_JSON_PATH, ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_info() {
        let doc = ApiDoc::openapi();
        assert_eq!(doc.info.title, "Students API");
        assert_eq!(doc.info.version, "1.0.0");
    }

    #[test]
    fn test_openapi_lists_every_route() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;
        assert!(paths.contains_key("/student"));
        assert!(paths.contains_key("/student/{id}"));
        assert!(paths.contains_key("/student/foto"));
    }

    #[test]
    fn test_openapi_has_student_schema() {
        let doc = ApiDoc::openapi();
        let schemas = doc.components.expect("components").schemas;
        assert!(schemas.contains_key("Student"));
        assert!(schemas.contains_key("StudentPayload"));
    }
}
