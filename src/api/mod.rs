//! API client module for the Task Master backend.
//!
//! Provides the authenticated HTTP client with silent token refresh, the
//! request/response types, and typed operations for accounts, categories
//! and tasks.

pub mod categories;
pub mod client;
pub mod error;
pub mod tasks;
pub mod types;
pub mod user;


pub use client::{ApiClient, ApiRequest};
pub use error::ApiError;
