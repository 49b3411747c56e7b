//! HTTP Request types

use crate::context::RequestContext;
use jet_router::{Params, DEFAULT_PARAM_KEY};
use smallvec::SmallVec;
use std::collections::HashMap;

/// HTTP Request
#[derive(Debug, Clone, Default)]
pub struct Request {
    /// Request method as received; not validated
    pub method: String,
    /// Request path (without query string)
    pub path: String,
    /// Query string (without leading ?)
    pub query: Option<String>,
    /// Request headers (stack-allocated for small header counts)
    pub headers: SmallVec<[(String, String); 16]>,
    /// Request body
    pub body: bytes::Bytes,
    /// Parameter sets stored by the dispatcher, keyed by context key
    pub extensions: HashMap<String, Params>,
}

impl Request {
    /// Create a request from a method and a request target
    ///
    /// Anything after the first `?` becomes the query string.
    pub fn new(method: impl Into<String>, target: &str) -> Self {
        let (path, query) = match target.split_once('?') {
            Some((path, query)) => (path, Some(query.to_string())),
            None => (target, None),
        };
        Self {
            method: method.into(),
            path: path.to_string(),
            query,
            ..Self::default()
        }
    }

    /// Get a header value (case-insensitive)
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Parameters stored under `key`
    pub fn params(&self, key: &str) -> Option<&Params> {
        self.extensions.get(key)
    }

    /// Parameters stored under the default key
    pub fn path_params(&self) -> Option<&Params> {
        self.params(DEFAULT_PARAM_KEY)
    }

    /// Get a route parameter from the default key as a string
    pub fn param(&self, name: &str) -> Option<&str> {
        self.path_params()?.get_str(name)
    }
}

impl RequestContext for Request {
    fn method(&self) -> &str {
        &self.method
    }

    fn path(&self) -> &str {
        &self.path
    }

    fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    fn store_params(&mut self, key: &str, params: Params) {
        self.extensions.insert(key.to_string(), params);
    }
}

/// Builder for constructing requests
pub struct RequestBuilder {
    request: Request,
}

impl RequestBuilder {
    pub fn new(method: impl Into<String>, target: &str) -> Self {
        Self {
            request: Request::new(method, target),
        }
    }

    /// Set query string
    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.request.query = Some(query.into());
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.request.headers.push((name.into(), value.into()));
        self
    }

    pub fn body(mut self, body: impl Into<bytes::Bytes>) -> Self {
        self.request.body = body.into();
        self
    }

    pub fn build(self) -> Request {
        self.request
    }
}
