//! Request context seam

use jet_router::Params;

/// What the dispatcher needs from a request
///
/// The dispatcher reads the method, path and query string, and writes the
/// extracted parameters back. Nothing else on the request is touched.
pub trait RequestContext {
    /// Request method as received
    fn method(&self) -> &str;

    /// Request path, without the query string
    fn path(&self) -> &str;

    /// Query string without the leading `?`
    fn query(&self) -> Option<&str>;

    /// Store extracted parameters under `key`
    fn store_params(&mut self, key: &str, params: Params);
}
