//! Router configuration

use std::sync::Arc;

/// Parameter class used when nothing else applies: no dot, slash or `?`
pub const DEFAULT_PARAM_PATTERN: &str = "[^./?]+";

/// Parameter class for names selected by the integer rule
///
/// ASCII only: `\d` would also accept digits from other scripts, which do not
/// parse as `i64`.
pub const INT_PARAM_PATTERN: &str = "[0-9]+";

/// Default request-context key for extracted parameters
pub const DEFAULT_PARAM_KEY: &str = "path_params";

/// Selects parameter names whose values convert to integers
pub type IntParamFn = Arc<dyn Fn(&str) -> bool + Send + Sync>;

/// Per-name parameter class override, returning a regex fragment
pub type ParamPatternFn = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Router configuration
#[derive(Clone)]
pub struct RouterConfig {
    /// Max cached variable-path lookups (0 disables the cache)
    pub cache_capacity: usize,
    /// Key under which parameters are stored in the request context
    pub param_key: String,
    /// Integer parameter rule
    pub int_param: Option<IntParamFn>,
    /// Parameter class override
    pub param_pattern: Option<ParamPatternFn>,
    /// Slice/split extraction for simple patterns
    pub fast_path: bool,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            cache_capacity: 0,
            param_key: DEFAULT_PARAM_KEY.to_string(),
            int_param: None,
            param_pattern: None,
            fast_path: true,
        }
    }
}

impl RouterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = capacity;
        self
    }

    pub fn param_key(mut self, key: impl Into<String>) -> Self {
        self.param_key = key.into();
        self
    }

    pub fn int_param<F>(mut self, f: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        self.int_param = Some(Arc::new(f));
        self
    }

    /// Treat `id` and every `*_id` parameter as an integer
    pub fn int_ids(self) -> Self {
        self.int_param(|name| name == "id" || name.ends_with("_id"))
    }

    pub fn param_pattern<F>(mut self, f: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        self.param_pattern = Some(Arc::new(f));
        self
    }

    pub fn fast_path(mut self, enabled: bool) -> Self {
        self.fast_path = enabled;
        self
    }

    pub(crate) fn is_int_param(&self, name: &str) -> bool {
        self.int_param.as_ref().is_some_and(|f| f(name))
    }

    /// Regex fragment for a parameter name
    pub(crate) fn param_class(&self, name: &str) -> ParamClass {
        if let Some(custom) = self.param_pattern.as_ref().and_then(|f| f(name)) {
            return ParamClass::Custom(custom);
        }
        if self.is_int_param(name) {
            ParamClass::Digits
        } else {
            ParamClass::Default
        }
    }
}

impl std::fmt::Debug for RouterConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouterConfig")
            .field("cache_capacity", &self.cache_capacity)
            .field("param_key", &self.param_key)
            .field("int_param", &self.int_param.is_some())
            .field("param_pattern", &self.param_pattern.is_some())
            .field("fast_path", &self.fast_path)
            .finish()
    }
}

/// Resolved character class of one parameter slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ParamClass {
    Default,
    Digits,
    Custom(String),
}

impl ParamClass {
    pub(crate) fn as_regex(&self) -> &str {
        match self {
            ParamClass::Default => DEFAULT_PARAM_PATTERN,
            ParamClass::Digits => INT_PARAM_PATTERN,
            ParamClass::Custom(s) => s,
        }
    }

    /// Whether a value of this class can never contain `c`; unknown for custom classes
    pub(crate) fn excludes(&self, c: char) -> bool {
        match self {
            ParamClass::Default => matches!(c, '.' | '/' | '?'),
            ParamClass::Digits => !c.is_ascii_digit(),
            ParamClass::Custom(_) => false,
        }
    }
}
