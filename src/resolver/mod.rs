//! # Resolver Module
//!
//! Picks exactly one route for a request, or explains why none applies.
//!
//! ## Overview
//!
//! ```text
//! CandidateSource ──► condition ──► path ──► method ──► exact match? ──► module hooks
//!                        │            │         │            │
//!                        ▼            ▼         ▼            ▼
//!                    NotFound     NotFound   405/OPTIONS  tie-break
//! ```
//!
//! Each stage moves the candidates it eliminates into a [`RejectionBucket`] under a
//! fixed reason (`"Invalid condition"`, `"Path did not match"`,
//! `"Request method did not match"`). When a stage leaves nothing, resolution ends
//! with a synthetic [`ResolvedRoute`]:
//!
//! - nothing registered, or nothing past the condition/path stages: `NotFound`
//! - the path matched but the method did not: `MethodNotAllowed`, or `Options` for
//!   an `OPTIONS` request, both carrying the distinct methods registered for the path
//!
//! Otherwise a parameter-free match wins; failing that, the candidate with the fewest
//! captured parameters and then the most path segments, earliest registration first.
//!
//! ## Diagnostics
//!
//! [`RouteResolver::resolve_for_diagnostics`] and [`RouteResolver::diagnose`] replay
//! a resolution for any method/path and return the rejection trail.

mod candidate;
mod core;
mod diagnostics;
mod outcome;
mod select;

pub use candidate::{
    RejectionBucket, RouteCandidate, INVALID_CONDITION, METHOD_DID_NOT_MATCH, PATH_DID_NOT_MATCH,
};
pub use core::RouteResolver;
pub use diagnostics::{CapturedParameter, RejectedRoute, RejectionRecord, ResolutionReport};
pub use outcome::{OutcomeKind, Resolution, ResolveResult, ResolvedRoute};
