//! API Routes
//!
//! Configures the Axum router with all student endpoints.

use std::any::Any;

use axum::{
    http::{
        header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, ORIGIN},
        HeaderName, Method,
    },
    response::{IntoResponse, Response},
    routing::{delete, get},
    Router,
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any as AnyOrigin, CorsLayer},
    trace::TraceLayer,
};

use super::docs::swagger_ui;
use super::handlers::{
    create_student, delete_student, handler404, list_students, students_with_work_and_photo,
    update_student, AppState,
};
use crate::error::ApiError;

/// Turns a handler panic into a 500 response.
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    ApiError::Internal(detail).into_response()
}

/// Cross-origin policy: any origin, the classic CRUD methods and the usual
/// content/auth headers.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AnyOrigin)
        .allow_methods([Method::GET, Method::PUT, Method::POST, Method::DELETE])
        .allow_headers([
            ORIGIN,
            HeaderName::from_static("x-requested-with"),
            CONTENT_TYPE,
            ACCEPT,
            AUTHORIZATION,
        ])
}

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /student` - List students
/// - `POST /student` - Create a student
/// - `DELETE /student/:id` - Delete a student
/// - `PATCH /student/:id` - Update a student
/// - `GET /student/foto` - Students with done work and a photo
/// - `GET /api-docs` - Swagger UI (`/openapi.json` for the raw document)
///
/// # Middleware
/// - Tracing: Logs all requests
/// - CORS: Allows any origin
/// - Catch-panic: Converts handler panics into 500 responses
/// - Fallback: Unknown paths answer 404 with a JSON error
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(swagger_ui())
        .route("/student", get(list_students).post(create_student))
        .route("/student/foto", get(students_with_work_and_photo))
        .route("/student/:id", delete(delete_student).patch(update_student))
        .fallback(handler404)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::util::ServiceExt;

    fn create_test_app() -> Router {
        create_router(AppState::new(MemoryStore::new()))
    }

    #[tokio::test]
    async fn test_list_endpoint() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/student")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_foto_is_not_treated_as_id() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/student/foto")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_update_not_found() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .method("PATCH")
                    .uri("/student/nonexistent")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"mark":3}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_unknown_path() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/courses")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_cors_headers() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/student")
                    .header("origin", "http://example.com")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response.headers().get("access-control-allow-origin").unwrap(),
            "*"
        );
    }

    #[tokio::test]
    async fn test_docs_are_served() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/openapi.json")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn test_panic_becomes_500() {
        let response = handle_panic(Box::new("boom"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
