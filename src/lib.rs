//! # BRRTRouter Resolver
//!
//! Route resolution engine: given a request and an ordered set of registered
//! routes, select the single route that should handle it, or synthesize a
//! `404 Not Found`, `405 Method Not Allowed` or `OPTIONS` outcome.
//!
//! ## Architecture
//!
//! - **[`route`]** - route descriptions, modules with lifecycle hooks, the immutable
//!   [`RouteCache`] snapshot and YAML manifests
//! - **[`matcher`]** - path template matching and parameter capture
//! - **[`resolver`]** - the four-stage candidate pipeline, outcome synthesis,
//!   tie-breaking and diagnostics
//! - **[`trace`]** - opt-in per-resolution trace lines
//! - **[`hot_reload`]** - republishing the route cache when a manifest changes
//! - **[`cli`]** - the `brrtr-resolve` command line
//!
//! ## Resolution
//!
//! ```text
//! all candidates
//!   └─ condition ──► "Invalid condition"            (none left: NotFound)
//!       └─ path ──► "Path did not match"            (none left: NotFound)
//!           └─ method ──► "Request method did not match"
//!                          (none left: MethodNotAllowed, or Options for OPTIONS)
//!               └─ exact match, else fewest params / most segments / first
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use brrtrouter_resolver::{OutcomeKind, RequestContext, RouteCache, RouteModule, RouteResolver};
//!
//! let cache = RouteCache::new([
//!     RouteModule::new("users")
//!         .get("/users", "list_users")
//!         .get("/users/{id}", "get_user")
//!         .post("/users", "create_user"),
//! ]);
//! let resolver = RouteResolver::new(cache);
//!
//! let result = resolver.resolve(&RequestContext::new("GET", "/users/42")).unwrap();
//! assert_eq!(result.handler_name(), Some("get_user"));
//! assert_eq!(result.get_param("id"), Some("42"));
//!
//! let result = resolver.resolve(&RequestContext::new("OPTIONS", "/users")).unwrap();
//! assert_eq!(result.kind(), OutcomeKind::Options);
//! assert_eq!(result.route.allowed_methods(), ["GET", "POST"]);
//! ```
//!
//! ## Configuration
//!
//! [`ResolverConfig::from_env`] reads `BRRTR_RESOLVE_TRACE`, `BRRTR_CASE_SENSITIVE`,
//! `BRRTR_STRICT_TRAILING_SLASH` and `BRRTR_SLOW_RESOLVE_US`. Logging is configured
//! separately through [`logging::LogConfig`].

pub mod cli;
pub mod context;
pub mod error;
pub mod hot_reload;
pub mod ids;
pub mod logging;
pub mod matcher;
pub mod resolver;
pub mod response;
pub mod route;
pub mod runtime_config;
pub mod trace;

pub use context::RequestContext;
pub use error::ResolveError;
pub use resolver::{OutcomeKind, Resolution, ResolveResult, ResolvedRoute, RouteResolver};
pub use route::{RouteCache, RouteDescription, RouteManifest, RouteModule, SharedRouteCache};
pub use runtime_config::ResolverConfig;
