use super::types::{ModuleKey, RouteDescription};
use crate::context::RequestContext;
use crate::response::Response;
use std::fmt;
use std::sync::Arc;

/// Runs before the handler; returning a response short-circuits the request.
pub type BeforeHook = Arc<dyn Fn(&RequestContext) -> Option<Response> + Send + Sync>;
/// Runs after the handler and may rewrite its response.
pub type AfterHook = Arc<dyn Fn(&RequestContext, &mut Response) + Send + Sync>;
/// Turns a handler failure into a response.
pub type ErrorHook =
    Arc<dyn Fn(&RequestContext, &anyhow::Error) -> Option<Response> + Send + Sync>;

/// A group of routes sharing a key and a set of hooks.
///
/// Routes are numbered in the order they are added; that number is the index the
/// resolver later uses to find the route again on a freshly built module.
///
/// ```rust
/// use brrtrouter_resolver::route::RouteModule;
///
/// let users = RouteModule::new("users")
///     .get("/users", "list_users")
///     .get("/users/{id}", "get_user")
///     .post("/users", "create_user");
/// assert_eq!(users.routes().len(), 3);
/// assert_eq!(users.route_at(1).map(|r| r.path.as_str()), Some("/users/{id}"));
/// ```
#[derive(Clone)]
pub struct RouteModule {
    key: ModuleKey,
    routes: Vec<Arc<RouteDescription>>,
    before: Option<BeforeHook>,
    after: Option<AfterHook>,
    on_error: Option<ErrorHook>,
}

impl RouteModule {
    #[must_use]
    pub fn new(key: impl Into<ModuleKey>) -> Self {
        Self {
            key: key.into(),
            routes: Vec::new(),
            before: None,
            after: None,
            on_error: None,
        }
    }

    /// Register a route, stamping it with this module's key and the next index.
    #[must_use]
    pub fn route(mut self, mut description: RouteDescription) -> Self {
        description.module_key = self.key.clone();
        description.index = self.routes.len();
        self.routes.push(Arc::new(description));
        self
    }

    #[must_use]
    pub fn get(self, path: &str, handler_name: &str) -> Self {
        self.route(RouteDescription::new("GET", path, handler_name))
    }

    #[must_use]
    pub fn post(self, path: &str, handler_name: &str) -> Self {
        self.route(RouteDescription::new("POST", path, handler_name))
    }

    #[must_use]
    pub fn put(self, path: &str, handler_name: &str) -> Self {
        self.route(RouteDescription::new("PUT", path, handler_name))
    }

    #[must_use]
    pub fn patch(self, path: &str, handler_name: &str) -> Self {
        self.route(RouteDescription::new("PATCH", path, handler_name))
    }

    #[must_use]
    pub fn delete(self, path: &str, handler_name: &str) -> Self {
        self.route(RouteDescription::new("DELETE", path, handler_name))
    }

    #[must_use]
    pub fn head(self, path: &str, handler_name: &str) -> Self {
        self.route(RouteDescription::new("HEAD", path, handler_name))
    }

    #[must_use]
    pub fn options(self, path: &str, handler_name: &str) -> Self {
        self.route(RouteDescription::new("OPTIONS", path, handler_name))
    }

    #[must_use]
    pub fn before<F>(mut self, hook: F) -> Self
    where
        F: Fn(&RequestContext) -> Option<Response> + Send + Sync + 'static,
    {
        self.before = Some(Arc::new(hook));
        self
    }

    #[must_use]
    pub fn after<F>(mut self, hook: F) -> Self
    where
        F: Fn(&RequestContext, &mut Response) + Send + Sync + 'static,
    {
        self.after = Some(Arc::new(hook));
        self
    }

    #[must_use]
    pub fn on_error<F>(mut self, hook: F) -> Self
    where
        F: Fn(&RequestContext, &anyhow::Error) -> Option<Response> + Send + Sync + 'static,
    {
        self.on_error = Some(Arc::new(hook));
        self
    }

    #[must_use]
    pub fn key(&self) -> &ModuleKey {
        &self.key
    }

    #[must_use]
    pub fn routes(&self) -> &[Arc<RouteDescription>] {
        &self.routes
    }

    #[must_use]
    pub fn route_at(&self, index: usize) -> Option<&Arc<RouteDescription>> {
        self.routes.get(index)
    }

    #[must_use]
    pub fn before_hook(&self) -> Option<&BeforeHook> {
        self.before.as_ref()
    }

    #[must_use]
    pub fn after_hook(&self) -> Option<&AfterHook> {
        self.after.as_ref()
    }

    #[must_use]
    pub fn error_hook(&self) -> Option<&ErrorHook> {
        self.on_error.as_ref()
    }
}

impl fmt::Debug for RouteModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteModule")
            .field("key", &self.key)
            .field("routes", &self.routes)
            .field("before", &self.before.is_some())
            .field("after", &self.after.is_some())
            .field("on_error", &self.on_error.is_some())
            .finish()
    }
}
