use super::module::RouteModule;
use super::types::ModuleKey;
use crate::context::RequestContext;
use crate::resolver::RouteCandidate;
use arc_swap::ArcSwap;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, warn};

/// Ordered source of route candidates.
pub trait CandidateSource: Send + Sync {
    /// All candidates in registration order (module order, then route index).
    fn candidates(&self) -> &[RouteCandidate];

    fn is_empty(&self) -> bool {
        self.candidates().is_empty()
    }
}

/// Looks up and builds the module owning a selected route.
pub trait ModuleCatalog: Send + Sync {
    fn module_by_key(&self, key: &ModuleKey, ctx: &RequestContext) -> Option<Arc<RouteModule>>;

    /// Produce the per-request module instance. Returning `None` is an internal error.
    fn build_module(
        &self,
        module: Arc<RouteModule>,
        _ctx: &RequestContext,
    ) -> Option<Arc<RouteModule>> {
        Some(module)
    }
}

/// Immutable snapshot of every registered module and its routes.
///
/// Built once (at startup or on reload) and then only read. Reloading means
/// building a new cache and publishing it through [`SharedRouteCache`].
#[derive(Debug, Clone, Default)]
pub struct RouteCache {
    modules: Vec<Arc<RouteModule>>,
    by_key: HashMap<ModuleKey, usize>,
    candidates: Vec<RouteCandidate>,
}

impl RouteCache {
    /// Build a cache from modules. A module whose key was already seen is skipped.
    #[must_use]
    pub fn new<I>(modules: I) -> Self
    where
        I: IntoIterator<Item = RouteModule>,
    {
        let mut cache = Self::default();
        for module in modules {
            if cache.by_key.contains_key(module.key()) {
                warn!(
                    module_key = %module.key(),
                    "Duplicate module key, keeping the first registration"
                );
                continue;
            }
            cache
                .candidates
                .extend(module.routes().iter().map(|r| RouteCandidate::new(Arc::clone(r))));
            cache
                .by_key
                .insert(module.key().clone(), cache.modules.len());
            cache.modules.push(Arc::new(module));
        }

        let routes_summary: Vec<String> = cache
            .candidates
            .iter()
            .take(10)
            .map(|c| c.description.to_string())
            .collect();
        info!(
            routes_count = cache.candidates.len(),
            modules_count = cache.modules.len(),
            routes_summary = ?routes_summary,
            "Route cache built"
        );
        cache
    }

    #[must_use]
    pub fn modules(&self) -> &[Arc<RouteModule>] {
        &self.modules
    }

    #[must_use]
    pub fn module(&self, key: &ModuleKey) -> Option<&Arc<RouteModule>> {
        self.by_key.get(key).and_then(|idx| self.modules.get(*idx))
    }

    /// Number of routes across all modules.
    #[must_use]
    pub fn route_count(&self) -> usize {
        self.candidates.len()
    }

    /// Print all registered routes to stdout
    pub fn dump_routes(&self) {
        println!(
            "[routes] modules={} count={}",
            self.modules.len(),
            self.candidates.len()
        );
        for candidate in &self.candidates {
            let route = &candidate.description;
            println!(
                "[route] {route} -> {} (module={}, index={}{})",
                route.handler_name,
                route.module_key,
                route.index,
                if route.condition().is_some() {
                    ", conditional"
                } else {
                    ""
                }
            );
        }
    }
}

impl CandidateSource for RouteCache {
    fn candidates(&self) -> &[RouteCandidate] {
        &self.candidates
    }
}

impl ModuleCatalog for RouteCache {
    fn module_by_key(&self, key: &ModuleKey, _ctx: &RequestContext) -> Option<Arc<RouteModule>> {
        self.module(key).map(Arc::clone)
    }
}

/// Route cache that can be replaced atomically while requests are being resolved.
///
/// Readers take a snapshot with [`load`](Self::load) and keep using it for the
/// whole resolution call; [`publish`](Self::publish) swaps in a new snapshot
/// without blocking them.
#[derive(Debug)]
pub struct SharedRouteCache {
    inner: ArcSwap<RouteCache>,
}

impl SharedRouteCache {
    #[must_use]
    pub fn new(cache: RouteCache) -> Self {
        Self {
            inner: ArcSwap::from_pointee(cache),
        }
    }

    #[must_use]
    pub fn load(&self) -> Arc<RouteCache> {
        self.inner.load_full()
    }

    /// Publish a new snapshot, returning the one it replaced.
    pub fn publish(&self, cache: RouteCache) -> Arc<RouteCache> {
        let routes_count = cache.route_count();
        let previous = self.inner.swap(Arc::new(cache));
        info!(
            routes_count,
            previous_routes_count = previous.route_count(),
            "Route cache published"
        );
        previous
    }
}

impl Default for SharedRouteCache {
    fn default() -> Self {
        Self::new(RouteCache::default())
    }
}
