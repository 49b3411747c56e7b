//! Responses produced by the dispatcher itself

use crate::Response;

/// Not-found, method-not-allowed and redirect responses
///
/// Every method has a default; override the ones that need a different body.
///
/// # Example
/// ```
/// use jet_core::{Fallback, Response, ResponseBuilder, StatusCode};
///
/// struct JsonErrors;
///
/// impl Fallback for JsonErrors {
///     fn not_found(&self, _method: &str, _path: &str) -> Response {
///         ResponseBuilder::new(StatusCode::NOT_FOUND)
///             .header("content-type", "application/json")
///             .body(r#"{"error":"not found"}"#)
///             .build()
///     }
/// }
///
/// assert_eq!(JsonErrors.not_found("GET", "/x").content_type(), Some("application/json"));
/// assert_eq!(JsonErrors.method_not_allowed("PUT", "/x").status, StatusCode::METHOD_NOT_ALLOWED);
/// ```
pub trait Fallback: Send + Sync {
    /// No route matched, and no redirect applied
    fn not_found(&self, _method: &str, _path: &str) -> Response {
        Response::not_found()
    }

    /// The route matched but its verb map has no entry for the method
    fn method_not_allowed(&self, _method: &str, _path: &str) -> Response {
        Response::method_not_allowed()
    }

    /// The trailing-slash-toggled path matched; `location` includes the query
    fn redirect_to(&self, location: &str) -> Response {
        Response::moved_permanently(location)
    }
}

/// Plain-text built-in responses
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultFallback;

impl Fallback for DefaultFallback {}
