//! REST API server: routes, DTOs and OpenAPI documentation for the job snapshot.

pub mod config;
pub mod dto;
pub mod error;
pub mod openapi;
pub mod routes;
pub mod state;
