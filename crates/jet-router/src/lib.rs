//! jet-router: Regex-synthesizing URL path router
//!
//! Compiles a nested path mapping once into lookup artifacts, then resolves
//! request paths against them.
//!
//! ## Features
//! - Exact-match table for parameter-free paths
//! - One combined regex for all variable paths, built from a prefix trie
//! - Slice/split extraction for patterns with one or two parameters
//! - Optional bounded LRU cache of variable-path lookups
//! - Per-path verb maps with `HEAD`→`GET` and `ANY` fallback
//!
//! ## Path Syntax
//! - `:name` - Named parameter (default class `[^./?]+`)
//! - `(...)` - Optional group, e.g. `(.:format)`
//! - `(a|b)` - Optional alternation, e.g. `(.html|.json)`
//!
//! ## Lookup Order
//! 1. Fixed table
//! 2. Cache
//! 3. Combined regex, then parameter extraction
//!
//! ## Example
//! ```
//! use jet_router::{Router, Routes, Target};
//!
//! let routes = Routes::new()
//!     .handler("/", 0)
//!     .nest("/api/books", Routes::new()
//!         .handler("", 1)
//!         .handler("/:id(.:format)", 2)
//!         .methods("/:id/edit", [("GET", 3), ("POST", 4)]));
//! let router = Router::new(routes).unwrap();
//!
//! let m = router.lookup("/api/books/9.json").unwrap();
//! assert_eq!(m.target, &Target::Direct(2));
//! assert_eq!(m.params.get_str("format"), Some("json"));
//!
//! let m = router.lookup("/api/books/9/edit").unwrap();
//! assert_eq!(m.target.as_methods().unwrap().resolve("HEAD"), Some(&3));
//! ```

#![forbid(unsafe_code)]

mod cache;
mod compile;
mod config;
mod error;
mod mapping;
mod method;
mod params;
mod pattern;
mod router;
mod trie;

pub use compile::FastPath;
pub use config::{
    IntParamFn, ParamPatternFn, RouterConfig, DEFAULT_PARAM_KEY, DEFAULT_PARAM_PATTERN,
    INT_PARAM_PATTERN,
};
pub use error::{Error, Result};
pub use mapping::{MethodMap, Route, Routes, Target};
pub use method::{Method, MethodKey};
pub use params::{ParamValue, Params};
pub use pattern::{Pattern, Token};
pub use router::{Match, Router};
