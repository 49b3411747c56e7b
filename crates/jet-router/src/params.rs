//! Extracted path parameter values

use smallvec::SmallVec;
use std::collections::HashMap;
use std::sync::Arc;

/// A single parameter value
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ParamValue {
    Str(String),
    Int(i64),
}

impl ParamValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::Str(s) => Some(s),
            ParamValue::Int(_) => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            ParamValue::Int(n) => Some(*n),
            ParamValue::Str(_) => None,
        }
    }

    /// Convert to integer when requested; values that do not fit stay strings
    pub(crate) fn from_capture(raw: &str, as_int: bool) -> Self {
        if as_int {
            match raw.parse::<i64>() {
                Ok(n) => return ParamValue::Int(n),
                Err(e) => tracing::trace!(value = raw, error = %e, "integer parameter kept as string"),
            }
        }
        ParamValue::Str(raw.to_string())
    }
}

impl std::fmt::Display for ParamValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParamValue::Str(s) => f.write_str(s),
            ParamValue::Int(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        ParamValue::Str(s.to_string())
    }
}

impl From<i64> for ParamValue {
    fn from(n: i64) -> Self {
        ParamValue::Int(n)
    }
}

/// Ordered parameter name -> value mapping
///
/// Every declared name is present; a parameter inside an optional group that
/// did not take part in the match has no value.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Params {
    entries: SmallVec<[(Arc<str>, Option<ParamValue>); 4]>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_capacity(n: usize) -> Self {
        Self {
            entries: SmallVec::with_capacity(n),
        }
    }

    pub fn push(&mut self, name: impl Into<Arc<str>>, value: Option<ParamValue>) {
        self.entries.push((name.into(), value));
    }

    /// Value of a parameter, `None` if undeclared or absent
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.entries
            .iter()
            .find(|(k, _)| &**k == name)
            .and_then(|(_, v)| v.as_ref())
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(ParamValue::as_str)
    }

    /// Integer value of a parameter
    ///
    /// `None` also for a name selected by the integer rule whose digits
    /// overflow `i64`; that value is kept as [`ParamValue::Str`] and is still
    /// available through [`Params::get_str`].
    pub fn get_int(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(ParamValue::as_int)
    }

    /// True if the name was declared by the matched pattern
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(k, _)| &**k == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| &**k)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&ParamValue>)> {
        self.entries.iter().map(|(k, v)| (&**k, v.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Present values as a map of strings, for convenient access
    pub fn to_map(&self) -> HashMap<String, String> {
        self.entries
            .iter()
            .filter_map(|(k, v)| v.as_ref().map(|v| (k.to_string(), v.to_string())))
            .collect()
    }
}

impl<K: Into<Arc<str>>, V: Into<ParamValue>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), Some(v.into())))
                .collect(),
        }
    }
}
