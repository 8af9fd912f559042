//! Bayline backend API client
//!
//! The single HTTP boundary of the console. Every request goes through
//! [`ApiClient`]: base URL from configuration, bearer token injected from
//! the shared token store, cookies carried, and every failure normalized
//! into an [`ApiError`] the rest of the application can render uniformly.

pub mod auth;
pub mod bays;
pub mod client;
pub mod config;
pub mod error;

pub use auth::{AuthApi, CurrentUser, LoginResponse};
pub use bays::{Bay, BaysApi};
pub use client::ApiClient;
pub use config::ClientConfig;
pub use error::{ApiError, ApiResult, FieldDetail};
