use super::candidate::RejectionBucket;
use crate::matcher::ParamVec;
use crate::response::Response;
use crate::route::{AfterHook, BeforeHook, ErrorHook, RouteDescription};
use http::StatusCode;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// Which of the four outcomes a resolution produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeKind {
    Matched,
    NotFound,
    MethodNotAllowed,
    Options,
}

impl fmt::Display for OutcomeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OutcomeKind::Matched => "Matched",
            OutcomeKind::NotFound => "NotFound",
            OutcomeKind::MethodNotAllowed => "MethodNotAllowed",
            OutcomeKind::Options => "Options",
        };
        f.write_str(s)
    }
}

/// The route a request resolved to, real or synthetic.
#[derive(Debug, Clone)]
pub enum ResolvedRoute {
    /// A registered route was selected
    Matched(Arc<RouteDescription>),
    /// No route survived the condition or path stage (or none are registered)
    NotFound { method: String, path: String },
    /// The path matched but no route accepts the method
    MethodNotAllowed {
        method: String,
        path: String,
        /// Distinct methods registered for the path
        allowed: Vec<String>,
    },
    /// `OPTIONS` on a path without an explicit OPTIONS route
    Options {
        path: String,
        /// Distinct methods registered for the path
        allowed: Vec<String>,
    },
}

impl ResolvedRoute {
    #[must_use]
    pub fn kind(&self) -> OutcomeKind {
        match self {
            ResolvedRoute::Matched(_) => OutcomeKind::Matched,
            ResolvedRoute::NotFound { .. } => OutcomeKind::NotFound,
            ResolvedRoute::MethodNotAllowed { .. } => OutcomeKind::MethodNotAllowed,
            ResolvedRoute::Options { .. } => OutcomeKind::Options,
        }
    }

    #[must_use]
    pub fn route(&self) -> Option<&Arc<RouteDescription>> {
        match self {
            ResolvedRoute::Matched(route) => Some(route),
            _ => None,
        }
    }

    /// Allowed methods for 405 and OPTIONS outcomes, empty otherwise.
    #[must_use]
    pub fn allowed_methods(&self) -> &[String] {
        match self {
            ResolvedRoute::MethodNotAllowed { allowed, .. }
            | ResolvedRoute::Options { allowed, .. } => allowed,
            _ => &[],
        }
    }

    /// Response for synthetic outcomes. Matched routes return `None`: their
    /// handler produces the response.
    #[must_use]
    pub fn default_response(&self) -> Option<Response> {
        match self {
            ResolvedRoute::Matched(_) => None,
            ResolvedRoute::NotFound { method, path } => Some(Response::json(
                StatusCode::NOT_FOUND.as_u16(),
                serde_json::json!({
                    "error": "Not Found",
                    "method": method,
                    "path": path,
                }),
            )),
            ResolvedRoute::MethodNotAllowed {
                method,
                path,
                allowed,
            } => {
                let mut response = Response::json(
                    StatusCode::METHOD_NOT_ALLOWED.as_u16(),
                    serde_json::json!({
                        "error": "Method Not Allowed",
                        "method": method,
                        "path": path,
                        "allowed": allowed,
                    }),
                );
                response.set_header(http::header::ALLOW.as_str(), allowed.join(", "));
                Some(response)
            }
            ResolvedRoute::Options { allowed, .. } => {
                let mut response = Response::new(
                    StatusCode::OK.as_u16(),
                    Default::default(),
                    serde_json::Value::Null,
                );
                response.set_header(http::header::ALLOW.as_str(), allowed.join(", "));
                Some(response)
            }
        }
    }
}

/// Everything the request pipeline needs to run the selected route.
///
/// Synthetic outcomes carry no parameters and no hooks.
#[derive(Clone)]
pub struct ResolveResult {
    pub route: ResolvedRoute,
    pub parameters: ParamVec,
    pub before: Option<BeforeHook>,
    pub after: Option<AfterHook>,
    pub on_error: Option<ErrorHook>,
}

impl ResolveResult {
    pub(crate) fn synthetic(route: ResolvedRoute) -> Self {
        Self {
            route,
            parameters: ParamVec::new(),
            before: None,
            after: None,
            on_error: None,
        }
    }

    #[inline]
    #[must_use]
    pub fn kind(&self) -> OutcomeKind {
        self.route.kind()
    }

    #[inline]
    #[must_use]
    pub fn is_matched(&self) -> bool {
        matches!(self.route, ResolvedRoute::Matched(_))
    }

    /// Get a captured parameter by name ("last write wins")
    #[inline]
    #[must_use]
    pub fn get_param(&self, name: &str) -> Option<&str> {
        self.parameters
            .iter()
            .rfind(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_str())
    }

    #[must_use]
    pub fn handler_name(&self) -> Option<&str> {
        self.route.route().map(|r| r.handler_name.as_str())
    }
}

impl fmt::Debug for ResolveResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolveResult")
            .field("route", &self.route)
            .field("parameters", &self.parameters)
            .field("before", &self.before.is_some())
            .field("after", &self.after.is_some())
            .field("on_error", &self.on_error.is_some())
            .finish()
    }
}

/// A [`ResolveResult`] together with the rejection trail that produced it.
#[derive(Debug, Clone)]
pub struct Resolution {
    pub result: ResolveResult,
    pub rejections: RejectionBucket,
}
