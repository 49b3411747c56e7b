//! HTTP method vocabulary
//!
//! `Method` is a request verb; `MethodKey` is a verb-map key, which may also
//! be the `ANY` wildcard.

use crate::{Error, Result};

/// HTTP Method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Method {
    Get = 0,
    Post = 1,
    Put = 2,
    Delete = 3,
    Patch = 4,
    Head = 5,
    Options = 6,
    Trace = 7,
    Link = 8,
    Unlink = 9,
}

impl Method {
    /// Every supported method, in canonical order
    pub const ALL: [Method; 10] = [
        Method::Get,
        Method::Post,
        Method::Put,
        Method::Delete,
        Method::Patch,
        Method::Head,
        Method::Options,
        Method::Trace,
        Method::Link,
        Method::Unlink,
    ];

    /// Parse method from bytes (exact, uppercase) - optimized with early first-byte check
    #[inline(always)]
    pub fn parse(bytes: &[u8]) -> Option<Self> {
        match bytes.first()? {
            b'G' if bytes == b"GET" => Some(Method::Get),
            b'P' => match bytes {
                b"POST" => Some(Method::Post),
                b"PUT" => Some(Method::Put),
                b"PATCH" => Some(Method::Patch),
                _ => None,
            },
            b'D' if bytes == b"DELETE" => Some(Method::Delete),
            b'H' if bytes == b"HEAD" => Some(Method::Head),
            b'O' if bytes == b"OPTIONS" => Some(Method::Options),
            b'T' if bytes == b"TRACE" => Some(Method::Trace),
            b'L' if bytes == b"LINK" => Some(Method::Link),
            b'U' if bytes == b"UNLINK" => Some(Method::Unlink),
            _ => None,
        }
    }

    /// Parse from string (case-insensitive)
    pub fn from_str(s: &str) -> Result<Self> {
        Self::parse(s.to_ascii_uppercase().as_bytes())
            .ok_or_else(|| Error::UnknownMethod(s.to_string()))
    }

    /// Convert to string
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
            Method::Patch => "PATCH",
            Method::Head => "HEAD",
            Method::Options => "OPTIONS",
            Method::Trace => "TRACE",
            Method::Link => "LINK",
            Method::Unlink => "UNLINK",
        }
    }

    /// True for methods that may be answered with a trailing-slash redirect
    pub fn is_safe_for_redirect(&self) -> bool {
        matches!(self, Method::Get | Method::Head)
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Key of a verb map: a concrete method or the `ANY` fallback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MethodKey {
    Method(Method),
    Any,
}

impl MethodKey {
    /// Normalize a verb-map key; anything outside the vocabulary is rejected
    pub fn parse(s: &str) -> Result<Self> {
        if s.eq_ignore_ascii_case("ANY") {
            return Ok(MethodKey::Any);
        }
        Method::from_str(s).map(MethodKey::Method)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MethodKey::Method(m) => m.as_str(),
            MethodKey::Any => "ANY",
        }
    }
}

impl From<Method> for MethodKey {
    fn from(method: Method) -> Self {
        MethodKey::Method(method)
    }
}

impl std::fmt::Display for MethodKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_parse_bytes() {
        assert_eq!(Method::parse(b"GET"), Some(Method::Get));
        assert_eq!(Method::parse(b"POST"), Some(Method::Post));
        assert_eq!(Method::parse(b"PUT"), Some(Method::Put));
        assert_eq!(Method::parse(b"DELETE"), Some(Method::Delete));
        assert_eq!(Method::parse(b"PATCH"), Some(Method::Patch));
        assert_eq!(Method::parse(b"HEAD"), Some(Method::Head));
        assert_eq!(Method::parse(b"OPTIONS"), Some(Method::Options));
        assert_eq!(Method::parse(b"TRACE"), Some(Method::Trace));
        assert_eq!(Method::parse(b"LINK"), Some(Method::Link));
        assert_eq!(Method::parse(b"UNLINK"), Some(Method::Unlink));
        assert_eq!(Method::parse(b"CONNECT"), None);
        assert_eq!(Method::parse(b"get"), None);
        assert_eq!(Method::parse(b""), None);
    }

    #[test]
    fn test_method_from_str() {
        assert_eq!(Method::from_str("GET").unwrap(), Method::Get);
        assert_eq!(Method::from_str("post").unwrap(), Method::Post);
        assert!(Method::from_str("LOCK").is_err());
    }

    #[test]
    fn test_method_round_trips_through_as_str() {
        for method in Method::ALL {
            assert_eq!(Method::parse(method.as_str().as_bytes()), Some(method));
        }
    }

    #[test]
    fn test_method_key_any() {
        assert_eq!(MethodKey::parse("ANY").unwrap(), MethodKey::Any);
        assert_eq!(MethodKey::parse("any").unwrap(), MethodKey::Any);
        assert_eq!(
            MethodKey::parse("delete").unwrap(),
            MethodKey::Method(Method::Delete)
        );
    }

    #[test]
    fn test_method_key_unknown() {
        let err = MethodKey::parse("UNLOCK").unwrap_err();
        assert_eq!(err.to_string(), "UNLOCK: unknown request method");
    }

    #[test]
    fn test_redirect_methods() {
        assert!(Method::Get.is_safe_for_redirect());
        assert!(Method::Head.is_safe_for_redirect());
        assert!(!Method::Post.is_safe_for_redirect());
    }
}
