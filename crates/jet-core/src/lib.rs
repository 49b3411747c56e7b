//! jet-core: Request dispatch over a compiled jet-router table
//!
//! Resolves a request's method and path to a handler, stores extracted path
//! parameters in the request context, and produces the built-in 404, 405 and
//! trailing-slash 301 responses.
//!
//! ## Example
//! ```
//! use jet_core::{handler, BoxedHandler, Dispatcher, Request, Response, RouterConfig, Routes};
//!
//! let routes: Routes<BoxedHandler<Request>> = Routes::new()
//!     .handler("/api/books", handler(|_: &mut Request| Response::text("list")))
//!     .handler("/api/books/:id", handler(|req: &mut Request| {
//!         Response::text(format!("book {}", req.param("id").unwrap_or("?")))
//!     }));
//! let app = Dispatcher::build(routes, RouterConfig::new()).unwrap();
//!
//! let res = app.dispatch(&mut Request::new("GET", "/api/books/42"));
//! assert_eq!(res.body_string().as_deref(), Some("book 42"));
//!
//! let res = app.dispatch(&mut Request::new("GET", "/api/books/?page=2"));
//! assert_eq!(res.status.as_u16(), 301);
//! assert_eq!(res.location(), Some("/api/books?page=2"));
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::all)]

pub mod context;
pub mod dispatch;
pub mod fallback;
pub mod handler;
pub mod request;
pub mod response;

// Re-exports
pub use context::RequestContext;
pub use dispatch::{Dispatcher, Resolution};
pub use fallback::{DefaultFallback, Fallback};
pub use handler::{handler, BoxedHandler, Handler};
pub use request::{Request, RequestBuilder};
pub use response::{Response, ResponseBuilder, StatusCode};

// Router re-exports
pub use jet_router::{
    Error, Match, Method, MethodKey, MethodMap, ParamValue, Params, Route, Router, RouterConfig,
    Routes, Target,
};
