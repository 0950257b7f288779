//! Read-only replay of a resolution for operator tooling.
//!
//! Diagnostics build a synthetic request for an arbitrary method and path, run the
//! same pipeline against the live snapshot, and report which routes each stage
//! rejected and why. Nothing is cached, nothing is written to the trace sink and no
//! request outcome is logged.

use super::candidate::RejectionBucket;
use super::core::RouteResolver;
use super::outcome::{OutcomeKind, Resolution};
use crate::context::RequestContext;
use crate::error::ResolveError;
use crate::trace::NullTrace;
use serde::Serialize;
use std::fmt;

/// One rejected route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedRoute {
    pub method: String,
    pub path: String,
    pub module_key: String,
}

/// All routes rejected for one reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectionRecord {
    pub reason: String,
    pub routes: Vec<RejectedRoute>,
}

/// A captured parameter of the selected route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CapturedParameter {
    pub name: String,
    pub value: String,
}

/// Full picture of one diagnostic resolution.
#[derive(Debug, Clone, Serialize)]
pub struct ResolutionReport {
    pub method: String,
    pub path: String,
    pub outcome: OutcomeKind,
    /// `METHOD /template` of the selected route
    pub route: Option<String>,
    pub handler: Option<String>,
    pub module_key: Option<String>,
    pub parameters: Vec<CapturedParameter>,
    pub allowed_methods: Vec<String>,
    pub rejections: Vec<RejectionRecord>,
}

impl RejectionBucket {
    /// Display form of the bucket, one record per reason in first-rejection order.
    #[must_use]
    pub fn records(&self) -> Vec<RejectionRecord> {
        self.iter()
            .map(|(reason, candidates)| RejectionRecord {
                reason: reason.to_string(),
                routes: candidates
                    .iter()
                    .map(|c| RejectedRoute {
                        method: c.description.method.clone(),
                        path: c.description.path.clone(),
                        module_key: c.module_key.to_string(),
                    })
                    .collect(),
            })
            .collect()
    }
}

impl RouteResolver {
    fn replay(&self, ctx: &RequestContext) -> Result<Resolution, ResolveError> {
        let snapshot = self.snapshot();
        self.run_stages(&*snapshot, &*snapshot, ctx, &NullTrace)
    }

    /// Rejection trail of resolving `method path` against the current snapshot.
    ///
    /// # Errors
    ///
    /// Propagates internal resolution errors (see [`RouteResolver::resolve`]).
    pub fn resolve_for_diagnostics(
        &self,
        method: &str,
        path: &str,
    ) -> Result<Vec<RejectionRecord>, ResolveError> {
        self.replay(&RequestContext::new(method, path))
            .map(|resolution| resolution.rejections.records())
    }

    /// Outcome, selected route and rejection trail of resolving `method path`.
    ///
    /// # Errors
    ///
    /// Propagates internal resolution errors (see [`RouteResolver::resolve`]).
    pub fn diagnose(&self, method: &str, path: &str) -> Result<ResolutionReport, ResolveError> {
        let ctx = RequestContext::new(method, path);
        let resolution = self.replay(&ctx)?;
        let result = &resolution.result;
        let route = result.route.route();

        Ok(ResolutionReport {
            method: ctx.method,
            path: ctx.path,
            outcome: result.kind(),
            route: route.map(|r| r.to_string()),
            handler: route.map(|r| r.handler_name.clone()),
            module_key: route.map(|r| r.module_key.to_string()),
            parameters: result
                .parameters
                .iter()
                .map(|(name, value)| CapturedParameter {
                    name: name.to_string(),
                    value: value.clone(),
                })
                .collect(),
            allowed_methods: result.route.allowed_methods().to_vec(),
            rejections: resolution.rejections.records(),
        })
    }
}

impl fmt::Display for ResolutionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {} -> {}", self.method, self.path, self.outcome)?;
        if let (Some(route), Some(handler)) = (&self.route, &self.handler) {
            writeln!(
                f,
                "  route: {route} -> {handler} (module={})",
                self.module_key.as_deref().unwrap_or("")
            )?;
        }
        for parameter in &self.parameters {
            writeln!(f, "  param: {} = {}", parameter.name, parameter.value)?;
        }
        if !self.allowed_methods.is_empty() {
            writeln!(f, "  allowed: {}", self.allowed_methods.join(", "))?;
        }
        for record in &self.rejections {
            writeln!(f, "  rejected ({}):", record.reason)?;
            for route in &record.routes {
                writeln!(
                    f,
                    "    {} {} [{}]",
                    route.method.to_ascii_uppercase(),
                    route.path,
                    route.module_key
                )?;
            }
        }
        Ok(())
    }
}
