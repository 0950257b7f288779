//! Resolver core - hot path for route resolution.
//!
//! The following clippy lints are denied to keep allocations out of the stage loop:
//!
//! - `clippy::inefficient_to_string` - Catches unnecessary allocations
//! - `clippy::format_push_string` - Prevents format! string building
//! - `clippy::unnecessary_to_owned` - Prevents .to_owned() on borrowed data

#![deny(clippy::inefficient_to_string)]
#![deny(clippy::format_push_string)]
#![deny(clippy::unnecessary_to_owned)]

use super::candidate::{
    filter, RejectionBucket, RouteCandidate, INVALID_CONDITION, METHOD_DID_NOT_MATCH,
    PATH_DID_NOT_MATCH,
};
use super::outcome::{Resolution, ResolveResult, ResolvedRoute};
use super::select::{select_best, select_exact};
use crate::context::RequestContext;
use crate::error::ResolveError;
use crate::matcher::{PathMatcher, TemplateMatcher};
use crate::route::{CandidateSource, ModuleCatalog, RouteCache, SharedRouteCache};
use crate::runtime_config::ResolverConfig;
use crate::trace::{self, NullTrace, TraceSink, TracingTrace};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

/// Selects the route for a request, or synthesizes a 404/405/OPTIONS outcome.
///
/// Resolution runs four stages over the candidate snapshot:
///
/// 1. **Condition** - routes whose condition is false are dropped
/// 2. **Path** - the matcher decides and captures parameters
/// 3. **Method** - case-insensitive, GET routes also accept HEAD
/// 4. **Selection** - an exact (parameter-free) match wins outright, otherwise the
///    most specific parameterized route
///
/// Stages 1 to 3 terminate the call as soon as nothing survives. Every call works on
/// fresh data; the only shared state is the immutable [`RouteCache`] snapshot, so
/// one resolver can serve any number of threads.
///
/// # Example
///
/// ```rust
/// use brrtrouter_resolver::context::RequestContext;
/// use brrtrouter_resolver::resolver::{OutcomeKind, RouteResolver};
/// use brrtrouter_resolver::route::{RouteCache, RouteModule};
///
/// let cache = RouteCache::new([RouteModule::new("users")
///     .get("/users/{id}", "get_user")
///     .get("/users/list", "list_users")]);
/// let resolver = RouteResolver::new(cache);
///
/// let result = resolver.resolve(&RequestContext::new("GET", "/users/list")).unwrap();
/// assert_eq!(result.handler_name(), Some("list_users"));
///
/// let result = resolver.resolve(&RequestContext::new("DELETE", "/users/7")).unwrap();
/// assert_eq!(result.kind(), OutcomeKind::MethodNotAllowed);
/// ```
#[derive(Clone)]
pub struct RouteResolver {
    cache: Arc<SharedRouteCache>,
    matcher: Arc<dyn PathMatcher>,
    trace: Arc<dyn TraceSink>,
    config: ResolverConfig,
}

impl RouteResolver {
    /// Resolver over `cache` with the default configuration.
    #[must_use]
    pub fn new(cache: RouteCache) -> Self {
        Self::with_config(cache, ResolverConfig::default())
    }

    #[must_use]
    pub fn with_config(cache: RouteCache, config: ResolverConfig) -> Self {
        Self::from_shared(Arc::new(SharedRouteCache::new(cache)), config)
    }

    /// Resolver reading from a cache that may be republished (hot reload).
    #[must_use]
    pub fn from_shared(cache: Arc<SharedRouteCache>, config: ResolverConfig) -> Self {
        let trace: Arc<dyn TraceSink> = if config.trace_enabled {
            Arc::new(TracingTrace)
        } else {
            Arc::new(NullTrace)
        };
        let resolver = Self {
            cache,
            matcher: Arc::new(TemplateMatcher::from_config(&config)),
            trace,
            config,
        };
        resolver.prepare_templates();
        resolver
    }

    /// Replace the path matcher.
    #[must_use]
    pub fn with_matcher(mut self, matcher: Arc<dyn PathMatcher>) -> Self {
        self.matcher = matcher;
        self.prepare_templates();
        self
    }

    /// Replace the trace sink.
    #[must_use]
    pub fn with_trace(mut self, trace: Arc<dyn TraceSink>) -> Self {
        self.trace = trace;
        self
    }

    #[must_use]
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Handle to the shared cache, for hot reload.
    #[must_use]
    pub fn shared_cache(&self) -> Arc<SharedRouteCache> {
        Arc::clone(&self.cache)
    }

    /// Current snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Arc<RouteCache> {
        self.cache.load()
    }

    /// Atomically replace the route snapshot and compile its templates.
    ///
    /// Snapshots published straight into the [`SharedRouteCache`] (hot reload) are
    /// compiled on first use instead.
    pub fn publish(&self, cache: RouteCache) {
        self.cache.publish(cache);
        self.prepare_templates();
    }

    fn prepare_templates(&self) {
        let snapshot = self.cache.load();
        for candidate in snapshot.candidates() {
            self.matcher.prepare(&candidate.description.path);
        }
    }

    /// Resolve a request against the current snapshot.
    ///
    /// # Errors
    ///
    /// Only when the selected route's module cannot be resolved, built, or does not
    /// contain the selected route. Missing routes and wrong methods are outcomes,
    /// not errors.
    pub fn resolve(&self, ctx: &RequestContext) -> Result<ResolveResult, ResolveError> {
        self.resolve_detailed(ctx).map(|resolution| resolution.result)
    }

    /// Like [`resolve`](Self::resolve) but also returns the rejection trail.
    ///
    /// # Errors
    ///
    /// See [`resolve`](Self::resolve).
    pub fn resolve_detailed(&self, ctx: &RequestContext) -> Result<Resolution, ResolveError> {
        let snapshot = self.cache.load();
        self.run(&*snapshot, &*snapshot, ctx, self.trace.as_ref())
    }

    /// Resolve against an explicit candidate source and module catalog.
    ///
    /// # Errors
    ///
    /// See [`resolve`](Self::resolve).
    pub fn resolve_with(
        &self,
        source: &dyn CandidateSource,
        catalog: &dyn ModuleCatalog,
        ctx: &RequestContext,
    ) -> Result<Resolution, ResolveError> {
        self.run(source, catalog, ctx, self.trace.as_ref())
    }

    /// Run the pipeline with timing and outcome logging.
    pub(crate) fn run(
        &self,
        source: &dyn CandidateSource,
        catalog: &dyn ModuleCatalog,
        ctx: &RequestContext,
        trace: &dyn TraceSink,
    ) -> Result<Resolution, ResolveError> {
        debug!(
            request_id = %ctx.request_id,
            method = %ctx.method,
            path = %ctx.path,
            "Route resolution attempt"
        );

        let start = Instant::now();
        let resolution = self.run_stages(source, catalog, ctx, trace);
        let duration = start.elapsed();

        match &resolution {
            Ok(resolution) => self.log_outcome(ctx, resolution, duration),
            Err(e) => error!(
                request_id = %ctx.request_id,
                method = %ctx.method,
                path = %ctx.path,
                error = %e,
                "Route resolution failed"
            ),
        }
        resolution
    }

    /// The stage pipeline alone, without timing or outcome logging.
    pub(crate) fn run_stages(
        &self,
        source: &dyn CandidateSource,
        catalog: &dyn ModuleCatalog,
        ctx: &RequestContext,
        trace: &dyn TraceSink,
    ) -> Result<Resolution, ResolveError> {
        let mut rejections = RejectionBucket::default();

        if source.is_empty() {
            trace::write(trace, || "No routes available".to_string());
            return Ok(not_found(ctx, rejections));
        }

        let candidates = source.candidates().to_vec();
        trace::write(trace, || format!("Found {} potential routes", candidates.len()));

        let survivors = filter(candidates, INVALID_CONDITION, &mut rejections, |c| {
            if c.description.allows(ctx) {
                Ok(c)
            } else {
                Err(c)
            }
        });
        trace::write(trace, || {
            format!("Routes surviving condition check: {}", survivors.len())
        });
        if survivors.is_empty() {
            return Ok(not_found(ctx, rejections));
        }

        let survivors = filter(survivors, PATH_DID_NOT_MATCH, &mut rejections, |c| {
            let matched = self.matcher.match_path(
                &ctx.path,
                &c.description.path,
                c.description.segment_count,
                ctx,
            );
            if matched.is_match {
                Ok(c.with_match(matched))
            } else {
                Err(c)
            }
        });
        trace::write(trace, || {
            format!("Routes surviving path match: {}", survivors.len())
        });
        if survivors.is_empty() {
            return Ok(not_found(ctx, rejections));
        }

        let survivors = filter(survivors, METHOD_DID_NOT_MATCH, &mut rejections, |c| {
            if c.description.accepts_method(&ctx.method) {
                Ok(c)
            } else {
                Err(c)
            }
        });
        trace::write(trace, || {
            format!("Routes surviving method match: {}", survivors.len())
        });
        if survivors.is_empty() {
            let allowed = distinct_methods(rejections.get(METHOD_DID_NOT_MATCH));
            let route = if ctx.is_method(http::Method::OPTIONS.as_str()) {
                trace::write(trace, || {
                    format!("Answering OPTIONS with allowed methods {allowed:?}")
                });
                ResolvedRoute::Options {
                    path: ctx.path.clone(),
                    allowed,
                }
            } else {
                trace::write(trace, || {
                    format!("Method not allowed, allowed methods {allowed:?}")
                });
                ResolvedRoute::MethodNotAllowed {
                    method: ctx.method.clone(),
                    path: ctx.path.clone(),
                    allowed,
                }
            };
            return Ok(Resolution {
                result: ResolveResult::synthetic(route),
                rejections,
            });
        }

        let selected = match select_exact(&survivors) {
            Some(exact) => {
                trace::write(trace, || {
                    format!("Selected exact match {}", exact.description)
                });
                exact
            }
            None => match select_best(&survivors) {
                Some(best) => {
                    trace::write(trace, || {
                        format!(
                            "No exact match among {} routes, selected {} ({} parameters, {} segments)",
                            survivors.len(),
                            best.description,
                            best.parameter_count(),
                            best.segment_count()
                        )
                    });
                    best
                }
                None => return Ok(not_found(ctx, rejections)),
            },
        };

        let result = build_matched(catalog, selected, ctx)?;
        Ok(Resolution { result, rejections })
    }

    fn log_outcome(&self, ctx: &RequestContext, resolution: &Resolution, duration: Duration) {
        let duration_us = duration.as_micros();
        if duration_us > u128::from(self.config.slow_resolve_threshold_us) {
            warn!(
                request_id = %ctx.request_id,
                method = %ctx.method,
                path = %ctx.path,
                outcome = %resolution.result.kind(),
                duration_us,
                "Slow route resolution detected"
            );
        }

        match &resolution.result.route {
            ResolvedRoute::Matched(route) => info!(
                request_id = %ctx.request_id,
                method = %ctx.method,
                path = %ctx.path,
                handler_name = %route.handler_name,
                route_pattern = %route.path,
                module_key = %route.module_key,
                path_params = ?resolution.result.parameters,
                duration_us,
                "Route matched"
            ),
            ResolvedRoute::Options { allowed, .. } => debug!(
                request_id = %ctx.request_id,
                path = %ctx.path,
                allowed = ?allowed,
                duration_us,
                "Synthesized OPTIONS response"
            ),
            ResolvedRoute::MethodNotAllowed { allowed, .. } => warn!(
                request_id = %ctx.request_id,
                method = %ctx.method,
                path = %ctx.path,
                allowed = ?allowed,
                duration_us,
                "Method not allowed"
            ),
            ResolvedRoute::NotFound { .. } => warn!(
                request_id = %ctx.request_id,
                method = %ctx.method,
                path = %ctx.path,
                rejected = resolution.rejections.len(),
                duration_us,
                "No route matched"
            ),
        }
    }
}

fn not_found(ctx: &RequestContext, rejections: RejectionBucket) -> Resolution {
    Resolution {
        result: ResolveResult::synthetic(ResolvedRoute::NotFound {
            method: ctx.method.clone(),
            path: ctx.path.clone(),
        }),
        rejections,
    }
}

/// Distinct upper-cased methods, in first-seen order.
fn distinct_methods(candidates: &[RouteCandidate]) -> Vec<String> {
    let mut methods: Vec<String> = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        let method = candidate.description.method.to_ascii_uppercase();
        if !methods.contains(&method) {
            methods.push(method);
        }
    }
    methods
}

/// Resolve and build the owning module, then take the route and hooks from it.
fn build_matched(
    catalog: &dyn ModuleCatalog,
    selected: &RouteCandidate,
    ctx: &RequestContext,
) -> Result<ResolveResult, ResolveError> {
    let module_key = &selected.module_key;
    let module = catalog
        .module_by_key(module_key, ctx)
        .ok_or_else(|| ResolveError::ModuleNotFound {
            module_key: module_key.clone(),
        })?;
    let module = catalog
        .build_module(module, ctx)
        .ok_or_else(|| ResolveError::ModuleBuildFailed {
            module_key: module_key.clone(),
        })?;

    let route = module
        .route_at(selected.index)
        .ok_or_else(|| ResolveError::RouteIndexOutOfRange {
            module_key: module_key.clone(),
            index: selected.index,
            route_count: module.routes().len(),
        })?;
    if !route.same_route(&selected.description) {
        return Err(ResolveError::RouteMismatch {
            module_key: module_key.clone(),
            index: selected.index,
            expected: selected.description.to_string(),
            found: route.to_string(),
        });
    }

    Ok(ResolveResult {
        route: ResolvedRoute::Matched(Arc::clone(route)),
        parameters: selected.match_result.parameters.clone(),
        before: module.before_hook().map(Arc::clone),
        after: module.after_hook().map(Arc::clone),
        on_error: module.error_hook().map(Arc::clone),
    })
}
