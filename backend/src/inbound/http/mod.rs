//! HTTP inbound adapter exposing REST endpoints.

pub mod counter;
pub mod cors;
pub mod error;
pub mod health;
pub mod schemas;
pub mod state;
#[cfg(any(test, feature = "test-support"))]
pub mod test_utils;
pub mod validation;

pub use error::ApiResult;
