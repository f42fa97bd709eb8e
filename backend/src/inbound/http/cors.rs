//! Cross-origin policy for browser clients.
//!
//! The counter is consumed by a browser front-end served from another origin,
//! so every origin, method and header is accepted and credentials are allowed.

use actix_cors::Cors;

/// Build the CORS middleware applied to the whole application.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use backend::inbound::http::cors::cors_policy;
///
/// let _app = App::new().wrap(cors_policy());
/// ```
#[must_use]
pub fn cors_policy() -> Cors {
    Cors::permissive()
}
