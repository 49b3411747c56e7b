//! Request dispatch
//!
//! ```text
//! lookup ──found──> direct target ─────────────────────────> invoke
//!    │                verb map ──resolved (exact/HEAD→GET/ANY)─> invoke
//!    │                         └─unresolved──────────────────> 405
//!    └─not found──> GET/HEAD, path != "/", toggled path found ─> 301
//!                   otherwise ─────────────────────────────────> 404
//! ```

use crate::context::RequestContext;
use crate::fallback::{DefaultFallback, Fallback};
use crate::handler::Handler;
use crate::Response;
use jet_router::{Method, Params, Router, RouterConfig, Routes, Target};

/// Outcome of routing one request, before any response is built
#[derive(Debug, PartialEq)]
pub enum Resolution<'r, H> {
    /// Call `handler`; `params` is empty for fixed paths
    Invoke { handler: &'r H, params: Params },
    /// Redirect to the toggled path, query string included
    Redirect(String),
    MethodNotAllowed,
    NotFound,
}

/// Drives a [`Router`] for one request at a time
pub struct Dispatcher<H, F = DefaultFallback> {
    router: Router<H>,
    fallback: F,
}

impl<H> Dispatcher<H> {
    pub fn new(router: Router<H>) -> Self {
        Self {
            router,
            fallback: DefaultFallback,
        }
    }

    /// Compile `routes` and wrap the result
    pub fn build(routes: Routes<H>, config: RouterConfig) -> jet_router::Result<Self> {
        Ok(Self::new(Router::build(routes, config)?))
    }
}

impl<H, F: Fallback> Dispatcher<H, F> {
    /// Replace the responses used for 404, 405 and redirects
    pub fn with_fallback<G: Fallback>(self, fallback: G) -> Dispatcher<H, G> {
        Dispatcher {
            router: self.router,
            fallback,
        }
    }

    pub fn router(&self) -> &Router<H> {
        &self.router
    }

    /// Route a request without invoking anything
    pub fn resolve(&self, method: &str, path: &str, query: Option<&str>) -> Resolution<'_, H> {
        let Some(found) = self.router.lookup(path) else {
            return match self.redirect_location(method, path, query) {
                Some(location) => {
                    tracing::trace!(method, path, location = %location, "redirecting to toggled path");
                    Resolution::Redirect(location)
                }
                None => Resolution::NotFound,
            };
        };

        let handler = match found.target {
            Target::Direct(handler) => handler,
            Target::ByMethod(map) => match map.resolve(method) {
                Some(handler) => handler,
                None => {
                    tracing::trace!(method, path, pattern = found.pattern, "method not allowed");
                    return Resolution::MethodNotAllowed;
                }
            },
        };

        Resolution::Invoke {
            handler,
            params: found.params,
        }
    }

    /// Location for a trailing-slash redirect, if one applies
    fn redirect_location(&self, method: &str, path: &str, query: Option<&str>) -> Option<String> {
        if path == "/" {
            return None;
        }
        if !Method::parse(method.as_bytes()).is_some_and(|m| m.is_safe_for_redirect()) {
            return None;
        }

        let toggled = match path.strip_suffix('/') {
            Some(stripped) => stripped.to_string(),
            None => format!("{path}/"),
        };
        self.router.lookup(&toggled)?;

        match query {
            Some(query) if !query.is_empty() => Some(format!("{toggled}?{query}")),
            _ => Some(toggled),
        }
    }

    /// Route the request and produce its response
    ///
    /// Extracted parameters are stored in the context under the router's
    /// parameter key before the handler runs; fixed paths store nothing.
    pub fn dispatch<C>(&self, ctx: &mut C) -> Response
    where
        C: RequestContext,
        H: Handler<C>,
    {
        match self.resolve(ctx.method(), ctx.path(), ctx.query()) {
            Resolution::Invoke { handler, params } => {
                if !params.is_empty() {
                    ctx.store_params(self.router.param_key(), params);
                }
                handler.handle(ctx)
            }
            Resolution::Redirect(location) => self.fallback.redirect_to(&location),
            Resolution::MethodNotAllowed => {
                self.fallback.method_not_allowed(ctx.method(), ctx.path())
            }
            Resolution::NotFound => self.fallback.not_found(ctx.method(), ctx.path()),
        }
    }
}

impl<H, F> std::fmt::Debug for Dispatcher<H, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("router", &self.router)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dispatcher() -> Dispatcher<&'static str> {
        let routes = Routes::new()
            .handler("/", "root")
            .handler("/api/books", "list")
            .handler("/api/books/:id", "show")
            .handler("/docs/", "docs")
            .methods("/admin/books", [("GET", "admin_get"), ("POST", "admin_post")])
            .methods("/admin/any", [("POST", "post"), ("ANY", "any")]);
        Dispatcher::build(routes, RouterConfig::new()).unwrap()
    }

    #[test]
    fn test_resolve_direct() {
        let d = dispatcher();
        match d.resolve("DELETE", "/api/books/3", None) {
            Resolution::Invoke { handler, params } => {
                assert_eq!(*handler, "show");
                assert_eq!(params.get_str("id"), Some("3"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_resolve_verb_map() {
        let d = dispatcher();
        let handler_for = |method| match d.resolve(method, "/admin/books", None) {
            Resolution::Invoke { handler, .. } => Some(*handler),
            _ => None,
        };
        assert_eq!(handler_for("GET"), Some("admin_get"));
        assert_eq!(handler_for("HEAD"), Some("admin_get"));
        assert_eq!(handler_for("POST"), Some("admin_post"));
        assert_eq!(d.resolve("PUT", "/admin/books", None), Resolution::MethodNotAllowed);
        assert_eq!(d.resolve("BREW", "/admin/books", None), Resolution::MethodNotAllowed);
    }

    #[test]
    fn test_resolve_any_fallback() {
        let d = dispatcher();
        for method in ["GET", "PUT", "BREW"] {
            assert!(matches!(
                d.resolve(method, "/admin/any", None),
                Resolution::Invoke { handler: &"any", .. }
            ));
        }
    }

    #[test]
    fn test_redirect_toggles_trailing_slash() {
        let d = dispatcher();
        assert_eq!(
            d.resolve("GET", "/api/books/", None),
            Resolution::Redirect("/api/books".to_string())
        );
        assert_eq!(
            d.resolve("HEAD", "/docs", Some("v=2")),
            Resolution::Redirect("/docs/?v=2".to_string())
        );
        assert_eq!(
            d.resolve("GET", "/api/books/9/", Some("")),
            Resolution::Redirect("/api/books/9".to_string())
        );
    }

    #[test]
    fn test_no_redirect_for_unsafe_methods_or_root() {
        let d = dispatcher();
        assert_eq!(d.resolve("POST", "/api/books/", None), Resolution::NotFound);
        assert_eq!(d.resolve("get", "/api/books/", None), Resolution::NotFound);
        assert_eq!(d.resolve("GET", "/missing/", None), Resolution::NotFound);

        let d = Dispatcher::build(Routes::new().handler("", "empty"), RouterConfig::new()).unwrap();
        assert_eq!(d.resolve("GET", "/", None), Resolution::NotFound);
    }
}
