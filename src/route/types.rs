use crate::context::RequestContext;
use std::fmt;
use std::sync::Arc;

/// Predicate a request must satisfy for a route to be eligible.
pub type Condition = Arc<dyn Fn(&RequestContext) -> bool + Send + Sync>;

/// Opaque identifier of the module owning a route.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModuleKey(Arc<str>);

impl ModuleKey {
    #[must_use]
    pub fn new(key: &str) -> Self {
        Self(Arc::from(key))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ModuleKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl From<String> for ModuleKey {
    fn from(key: String) -> Self {
        Self(Arc::from(key))
    }
}

impl fmt::Display for ModuleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Number of `/` separators in a template; the resolver's specificity signal.
#[inline]
#[must_use]
pub fn segment_count(template: &str) -> usize {
    template.bytes().filter(|b| *b == b'/').count()
}

/// A registered route. Immutable once its module has been added to a cache.
#[derive(Clone)]
pub struct RouteDescription {
    /// HTTP method as registered (compared case-insensitively)
    pub method: String,
    /// Path template, e.g. `/users/{id}`
    pub path: String,
    /// Precomputed `segment_count(path)`
    pub segment_count: usize,
    /// Name of the handler bound to this route
    pub handler_name: String,
    /// Owning module, assigned by [`RouteModule::route`](super::RouteModule::route)
    pub module_key: ModuleKey,
    /// Position within the owning module's route list
    pub index: usize,
    condition: Option<Condition>,
}

impl RouteDescription {
    #[must_use]
    pub fn new(
        method: impl Into<String>,
        path: impl Into<String>,
        handler_name: impl Into<String>,
    ) -> Self {
        let path = path.into();
        Self {
            method: method.into(),
            segment_count: segment_count(&path),
            path,
            handler_name: handler_name.into(),
            module_key: ModuleKey::new(""),
            index: 0,
            condition: None,
        }
    }

    /// Only consider this route when `condition` holds for the request.
    #[must_use]
    pub fn with_condition<F>(mut self, condition: F) -> Self
    where
        F: Fn(&RequestContext) -> bool + Send + Sync + 'static,
    {
        self.condition = Some(Arc::new(condition));
        self
    }

    #[must_use]
    pub fn condition(&self) -> Option<&Condition> {
        self.condition.as_ref()
    }

    /// `true` when there is no condition or the condition holds.
    #[inline]
    #[must_use]
    pub fn allows(&self, ctx: &RequestContext) -> bool {
        self.condition.as_ref().map_or(true, |condition| condition(ctx))
    }

    /// Case-insensitive method comparison; a GET route also serves HEAD.
    #[inline]
    #[must_use]
    pub fn accepts_method(&self, request_method: &str) -> bool {
        self.method.eq_ignore_ascii_case(request_method)
            || (self.method.eq_ignore_ascii_case(http::Method::GET.as_str())
                && request_method.eq_ignore_ascii_case(http::Method::HEAD.as_str()))
    }

    /// Same method (ignoring case) and same template.
    #[must_use]
    pub fn same_route(&self, other: &RouteDescription) -> bool {
        self.method.eq_ignore_ascii_case(&other.method) && self.path == other.path
    }
}

impl fmt::Debug for RouteDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteDescription")
            .field("method", &self.method)
            .field("path", &self.path)
            .field("segment_count", &self.segment_count)
            .field("handler_name", &self.handler_name)
            .field("module_key", &self.module_key)
            .field("index", &self.index)
            .field("has_condition", &self.condition.is_some())
            .finish()
    }
}

impl fmt::Display for RouteDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method.to_ascii_uppercase(), self.path)
    }
}
