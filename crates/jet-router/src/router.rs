//! Compiled router and lookup engine

use crate::cache::LruCache;
use crate::compile::{compile, Leaf};
use crate::config::RouterConfig;
use crate::mapping::{flatten, Routes, Target};
use crate::params::Params;
use crate::Result;
use parking_lot::Mutex;
use regex::Regex;
use std::collections::HashMap;

/// Lookup result
#[derive(Debug, PartialEq)]
pub struct Match<'r, H> {
    /// Pattern the path matched, as registered
    pub pattern: &'r str,
    /// Handler or verb map
    pub target: &'r Target<H>,
    /// Extracted parameters; empty for fixed paths
    pub params: Params,
}

/// Immutable routing table built from a nested [`Routes`] description
///
/// Safe to share across threads; the optional lookup cache is the only
/// mutable state and sits behind a mutex.
pub struct Router<H> {
    entries: Vec<(String, Target<H>)>,
    fixed: HashMap<String, usize>,
    combined: Option<Regex>,
    leaves: Vec<Leaf>,
    cache: Option<Mutex<LruCache<(usize, Params)>>>,
    config: RouterConfig,
}

impl<H> Router<H> {
    /// Build with the default configuration
    pub fn new(routes: Routes<H>) -> Result<Self> {
        Self::build(routes, RouterConfig::default())
    }

    /// Compile a route description
    ///
    /// Fails on the first configuration error; nothing is returned half-built.
    ///
    /// # Example
    /// ```
    /// use jet_router::{Router, RouterConfig, Routes};
    ///
    /// let routes = Routes::new()
    ///     .handler("/", "welcome")
    ///     .nest("/api/books", Routes::new()
    ///         .handler("", "book_list")
    ///         .handler("/:id", "book_show"));
    /// let router = Router::build(routes, RouterConfig::new().cache_capacity(100)).unwrap();
    ///
    /// let m = router.lookup("/api/books/42").unwrap();
    /// assert_eq!(m.target.as_direct(), Some(&"book_show"));
    /// assert_eq!(m.params.get_str("id"), Some("42"));
    /// assert!(router.lookup("/api/authors").is_none());
    /// ```
    pub fn build(routes: Routes<H>, config: RouterConfig) -> Result<Self> {
        let entries = flatten(routes)?;
        let compiled = compile(entries.iter().map(|(p, _)| p.as_str()), &config)?;

        let cache = (config.cache_capacity > 0)
            .then(|| Mutex::new(LruCache::new(config.cache_capacity)));

        tracing::debug!(
            routes = entries.len(),
            fixed = compiled.fixed.len(),
            variable = compiled.leaves.len(),
            cache_capacity = config.cache_capacity,
            "compiled route mapping"
        );

        Ok(Self {
            entries,
            fixed: compiled.fixed,
            combined: compiled.combined,
            leaves: compiled.leaves,
            cache,
            config,
        })
    }

    /// Find the target and parameters for a request path
    pub fn lookup(&self, path: &str) -> Option<Match<'_, H>> {
        if let Some(&route) = self.fixed.get(path) {
            return Some(self.matched(route, Params::new()));
        }

        if let Some(cache) = &self.cache {
            if let Some((route, params)) = cache.lock().get(path).cloned() {
                tracing::trace!(path, "route cache hit");
                return Some(self.matched(route, params));
            }
        }

        let leaf = self.discriminate(path)?;
        let params = leaf.extract(path)?;

        if let Some(cache) = &self.cache {
            let evicted = cache
                .lock()
                .insert(path.to_string(), (leaf.route, params.clone()));
            if let Some(evicted) = evicted {
                tracing::trace!(path, evicted = %evicted, "route cache eviction");
            }
        }

        Some(self.matched(leaf.route, params))
    }

    /// Run the combined expression and pick the leaf whose marker fired
    fn discriminate(&self, path: &str) -> Option<&Leaf> {
        let combined = self.combined.as_ref()?;
        let Some(caps) = combined.captures(path) else {
            tracing::trace!(path, "no variable route matched");
            return None;
        };
        let index = caps.iter().skip(1).position(|m| m.is_some())?;
        self.leaves.get(index)
    }

    fn matched(&self, route: usize, params: Params) -> Match<'_, H> {
        let (pattern, target) = &self.entries[route];
        Match {
            pattern,
            target,
            params,
        }
    }

    /// All `(pattern, target)` pairs in registration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Target<H>)> {
        self.entries.iter().map(|(p, t)| (p.as_str(), t))
    }

    /// Exact-match paths, sorted
    pub fn fixed_paths(&self) -> Vec<&str> {
        let mut paths: Vec<_> = self.fixed.keys().map(String::as_str).collect();
        paths.sort_unstable();
        paths
    }

    /// Variable patterns in discriminator order
    pub fn variable_patterns(&self) -> impl Iterator<Item = &str> {
        self.leaves.iter().map(|leaf| leaf.pattern.as_str())
    }

    /// Source of the combined expression, `None` without variable routes
    pub fn pattern_regex(&self) -> Option<&str> {
        self.combined.as_ref().map(Regex::as_str)
    }

    /// Cached request paths, least recently used first
    pub fn cached_paths(&self) -> Vec<String> {
        self.cache
            .as_ref()
            .map(|cache| cache.lock().keys().into_iter().map(String::from).collect())
            .unwrap_or_default()
    }

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// Request-context key for extracted parameters
    pub fn param_key(&self) -> &str {
        &self.config.param_key
    }

    /// Number of registered patterns
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<H> std::fmt::Debug for Router<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Router")
            .field("patterns", &self.entries.iter().map(|(p, _)| p).collect::<Vec<_>>())
            .field("fixed", &self.fixed.len())
            .field("combined", &self.pattern_regex())
            .field("config", &self.config)
            .finish()
    }
}
