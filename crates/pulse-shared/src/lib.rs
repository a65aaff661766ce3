//! # Pulse Shared
//!
//! Request/response types of the HTTP API, shared between the server
//! and any Rust client of it.

pub mod dto;
pub mod response;

pub use response::{ApiResponse, ErrorResponse};
