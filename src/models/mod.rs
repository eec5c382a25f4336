//! Request and Response models for the students API
//!
//! This module defines the student record and the DTOs (Data Transfer Objects)
//! used for serializing/deserializing HTTP request and response bodies.

mod coerce;
pub mod requests;
pub mod responses;
pub mod student;

// Re-export commonly used types
pub use requests::StudentPayload;
pub use responses::{DeleteResult, ErrorResponse};
pub use student::{now, Student};
