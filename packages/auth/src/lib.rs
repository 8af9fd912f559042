//! Authentication and token management for Bayline
//!
//! Holds the in-memory bearer-token state shared by every API consumer,
//! with optional persistence under the user's home directory.

pub mod error;
pub mod store;
pub mod token;

pub use error::{AuthError, AuthResult};
pub use store::TokenStore;
pub use token::TokenInfo;
