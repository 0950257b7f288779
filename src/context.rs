//! Per-request context handed to route conditions, the path matcher and hooks.

use crate::ids::RequestId;
use serde_json::Value;
use smallvec::SmallVec;
use std::collections::HashMap;
use std::sync::Arc;

/// Header carrying an upstream correlation id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Maximum inline headers before heap allocation
pub const MAX_INLINE_HEADERS: usize = 16;

/// Stack-allocated header storage; names are `Arc<str>` so clones are O(1).
pub type HeaderVec = SmallVec<[(Arc<str>, String); MAX_INLINE_HEADERS]>;

/// The request as seen by the resolver.
///
/// The method is kept verbatim; every comparison the resolver makes against it is
/// case-insensitive. `items` is a free-form bag that conditions may inspect
/// (tenant, feature flags, authenticated principal, ...).
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Correlation id for logs and trace lines
    pub request_id: RequestId,
    /// HTTP method as received
    pub method: String,
    /// Request path, without query string
    pub path: String,
    /// Request headers
    pub headers: HeaderVec,
    /// Arbitrary values attached by earlier pipeline stages
    pub items: HashMap<String, Value>,
}

impl RequestContext {
    /// Build a context for `method` and `path`.
    ///
    /// A query string, if present, is stripped from the path.
    #[must_use]
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        let mut path = path.into();
        if let Some(idx) = path.find('?') {
            path.truncate(idx);
        }
        Self {
            request_id: RequestId::new(),
            method: method.into(),
            path,
            headers: HeaderVec::new(),
            items: HashMap::new(),
        }
    }

    /// Attach a header. `x-request-id` also replaces the correlation id when valid.
    #[must_use]
    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        let value = value.into();
        if name.eq_ignore_ascii_case(REQUEST_ID_HEADER) {
            self.request_id = RequestId::from_header_or_new(Some(&value));
        }
        self.headers.push((Arc::from(name), value));
        self
    }

    /// Attach a context item.
    #[must_use]
    pub fn with_item(mut self, key: impl Into<String>, value: Value) -> Self {
        self.items.insert(key.into(), value);
        self
    }

    /// Get a header by name (case-insensitive per RFC 7230)
    #[inline]
    #[must_use]
    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    #[inline]
    #[must_use]
    pub fn item(&self, key: &str) -> Option<&Value> {
        self.items.get(key)
    }

    /// Case-insensitive method check.
    #[inline]
    #[must_use]
    pub fn is_method(&self, method: &str) -> bool {
        self.method.eq_ignore_ascii_case(method)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_string_is_dropped() {
        let ctx = RequestContext::new("GET", "/users?limit=10");
        assert_eq!(ctx.path, "/users");
    }

    #[test]
    fn test_headers_are_case_insensitive() {
        let ctx = RequestContext::new("GET", "/").with_header("X-Tenant", "acme");
        assert_eq!(ctx.get_header("x-tenant"), Some("acme"));
        assert!(ctx.get_header("x-other").is_none());
    }

    #[test]
    fn test_request_id_header_is_adopted() {
        let id = RequestId::new();
        let ctx = RequestContext::new("get", "/").with_header("X-Request-Id", id.to_string());
        assert_eq!(ctx.request_id, id);
        assert!(ctx.is_method("GET"));
    }
}
