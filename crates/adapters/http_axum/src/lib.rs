//! # devices-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve a **JSON API** under `/api/devices` for creating, reading,
//!   updating and deleting devices
//! - Map HTTP requests into application service calls (driving adapter)
//! - Map application results and errors into HTTP responses
//! - Log every request with its status and latency
//! - Publish an OpenAPI document describing the JSON API
//!
//! ## Dependency rule
//! Depends on `devices-app` (for port traits and services) and `devices-domain`
//! (for domain types used in request/response mapping). Never leaks axum types
//! into the domain.

pub mod api;
pub mod error;
pub mod openapi;
pub mod router;
pub mod state;
