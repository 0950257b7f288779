//! # Route Module
//!
//! Route definitions as the resolver consumes them.
//!
//! - [`RouteDescription`] - one registered route (method, template, condition, handler)
//! - [`RouteModule`] - a keyed group of routes with before/after/error hooks
//! - [`RouteCache`] - the immutable snapshot the resolver reads from
//! - [`SharedRouteCache`] - swap-on-write holder used for hot reload
//! - [`CandidateSource`] / [`ModuleCatalog`] - the seams the resolver is written against
//! - [`RouteManifest`] - YAML description of modules and routes

mod cache;
mod manifest;
mod module;
mod types;

pub use cache::{CandidateSource, ModuleCatalog, RouteCache, SharedRouteCache};
pub use manifest::{ModuleManifest, RouteEntry, RouteManifest};
pub use module::{AfterHook, BeforeHook, ErrorHook, RouteModule};
pub use types::{segment_count, Condition, ModuleKey, RouteDescription};
