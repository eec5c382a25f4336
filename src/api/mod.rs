//! API Module
//!
//! HTTP handlers, routing and documentation for the students REST API.
//!
//! # Endpoints
//! - `GET /student` - List every student
//! - `POST /student` - Create a student
//! - `DELETE /student/:id` - Delete a student
//! - `PATCH /student/:id` - Update some fields of a student
//! - `GET /student/foto` - Students with done practical work and a photo
//! - `GET /api-docs` - Swagger UI

pub mod docs;
pub mod extract;
pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
