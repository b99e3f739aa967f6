//! Typed client for the remote commerce API.
//!
//! [`CommerceApi`] is the seam the storefront state machines depend on;
//! [`CommerceClient`] is the `reqwest` implementation used in production.

pub mod client;
pub mod commerce;
pub mod error;
pub mod types;

pub use client::CommerceClient;
pub use commerce::CommerceApi;
pub use error::ApiError;
pub use types::EligibilityResponse;
