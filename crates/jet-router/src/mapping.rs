//! Nested route descriptions and their flattening
//!
//! A [`Routes`] value is an ordered list of `(path segment, route)` pairs,
//! where a route is a handler, a verb map, or another nested `Routes`.
//! Flattening concatenates segments depth-first, left to right.

use crate::method::{Method, MethodKey};
use crate::Result;
use smallvec::SmallVec;

/// One entry of a route description
#[derive(Debug, Clone)]
pub enum Route<H> {
    /// A single handler for every method
    Handler(H),
    /// Verb name -> handler; names are validated when the router is built
    Methods(Vec<(String, H)>),
    /// Further segments appended to this entry's path
    Nested(Routes<H>),
}

/// Ordered, arbitrarily nested route description
///
/// # Example
/// ```
/// use jet_router::Routes;
///
/// let routes = Routes::new()
///     .handler("/", "welcome")
///     .nest("/api/books", Routes::new()
///         .handler("", "book_list")
///         .handler("/:id", "book_show"))
///     .methods("/admin/books", [("GET", "admin_list"), ("POST", "admin_create")]);
/// assert_eq!(routes.len(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct Routes<H> {
    entries: Vec<(String, Route<H>)>,
}

impl<H> Routes<H> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append a raw entry
    pub fn push(&mut self, path: impl Into<String>, route: Route<H>) {
        self.entries.push((path.into(), route));
    }

    /// Map a path to a handler
    pub fn handler(mut self, path: impl Into<String>, handler: H) -> Self {
        self.push(path, Route::Handler(handler));
        self
    }

    /// Map a path to a verb map
    pub fn methods<I, K>(mut self, path: impl Into<String>, methods: I) -> Self
    where
        I: IntoIterator<Item = (K, H)>,
        K: Into<String>,
    {
        let methods = methods.into_iter().map(|(k, h)| (k.into(), h)).collect();
        self.push(path, Route::Methods(methods));
        self
    }

    /// Mount nested routes under a prefix
    pub fn nest(mut self, prefix: impl Into<String>, routes: Routes<H>) -> Self {
        self.push(prefix, Route::Nested(routes));
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<H> Default for Routes<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H, S: Into<String>> FromIterator<(S, Route<H>)> for Routes<H> {
    fn from_iter<I: IntoIterator<Item = (S, Route<H>)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(p, r)| (p.into(), r)).collect(),
        }
    }
}

/// Ordered verb map with normalized keys
#[derive(Debug, Clone, PartialEq)]
pub struct MethodMap<H> {
    entries: SmallVec<[(MethodKey, H); 4]>,
}

impl<H> MethodMap<H> {
    pub fn new() -> Self {
        Self {
            entries: SmallVec::new(),
        }
    }

    /// Insert or replace; replacement keeps the original position
    pub fn insert(&mut self, key: MethodKey, handler: H) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = handler,
            None => self.entries.push((key, handler)),
        }
    }

    pub fn get(&self, key: MethodKey) -> Option<&H> {
        self.entries.iter().find(|(k, _)| *k == key).map(|(_, h)| h)
    }

    /// Pick the handler for a request method
    ///
    /// Exact match first; `HEAD` falls back to `GET`; then `ANY`. Unknown
    /// request methods only ever reach `ANY`.
    pub fn resolve(&self, method: &str) -> Option<&H> {
        let method = Method::parse(method.as_bytes());
        method
            .and_then(|m| self.get(MethodKey::Method(m)))
            .or_else(|| match method {
                Some(Method::Head) => self.get(MethodKey::Method(Method::Get)),
                _ => None,
            })
            .or_else(|| self.get(MethodKey::Any))
    }

    pub fn iter(&self) -> impl Iterator<Item = (MethodKey, &H)> {
        self.entries.iter().map(|(k, h)| (*k, h))
    }

    pub fn keys(&self) -> impl Iterator<Item = MethodKey> + '_ {
        self.entries.iter().map(|(k, _)| *k)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<H> Default for MethodMap<H> {
    fn default() -> Self {
        Self::new()
    }
}

/// What a path resolves to
#[derive(Debug, Clone, PartialEq)]
pub enum Target<H> {
    Direct(H),
    ByMethod(MethodMap<H>),
}

impl<H> Target<H> {
    pub fn as_direct(&self) -> Option<&H> {
        match self {
            Target::Direct(h) => Some(h),
            Target::ByMethod(_) => None,
        }
    }

    pub fn as_methods(&self) -> Option<&MethodMap<H>> {
        match self {
            Target::Direct(_) => None,
            Target::ByMethod(map) => Some(map),
        }
    }
}

fn normalize_methods<H>(methods: Vec<(String, H)>) -> Result<MethodMap<H>> {
    let mut map = MethodMap::new();
    for (name, handler) in methods {
        map.insert(MethodKey::parse(&name)?, handler);
    }
    Ok(map)
}

/// Flatten a description into `(full pattern, target)` pairs
pub(crate) fn flatten<H>(routes: Routes<H>) -> Result<Vec<(String, Target<H>)>> {
    let mut out = Vec::new();
    flatten_into(routes, "", &mut out)?;
    Ok(out)
}

fn flatten_into<H>(
    routes: Routes<H>,
    base: &str,
    out: &mut Vec<(String, Target<H>)>,
) -> Result<()> {
    for (segment, route) in routes.entries {
        let path = format!("{base}{segment}");
        match route {
            Route::Handler(h) => out.push((path, Target::Direct(h))),
            Route::Methods(methods) => out.push((path, Target::ByMethod(normalize_methods(methods)?))),
            Route::Nested(children) => flatten_into(children, &path, out)?,
        }
    }
    Ok(())
}
