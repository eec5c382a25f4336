//! Students API - A small CRUD HTTP service for student records
//!
//! Stores students in a document store (MongoDB, or in memory) and serves
//! list/create/update/delete and a filtered query over HTTP, with generated
//! OpenAPI documentation and dynamic port selection at startup.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod server;
pub mod store;

pub use api::{create_router, AppState};
pub use config::{Config, StorageBackend};
pub use server::{find_available_port, Server};
