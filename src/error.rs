use crate::route::ModuleKey;
use std::fmt;

/// Internal failures of route resolution.
///
/// An unmatched path, a wrong method or a false condition are *not* errors: they
/// produce a synthetic outcome. The variants below mean the route snapshot and the
/// module catalog disagree, or a template can never be matched. Either way the
/// request must be aborted with an internal error instead of running a wrong route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// The selected candidate's module key is unknown to the catalog
    ModuleNotFound {
        /// Key carried by the selected candidate
        module_key: ModuleKey,
    },
    /// The catalog knows the module but could not build an instance of it
    ModuleBuildFailed {
        /// Key carried by the selected candidate
        module_key: ModuleKey,
    },
    /// The built module has fewer routes than the candidate's index implies
    RouteIndexOutOfRange {
        /// Key carried by the selected candidate
        module_key: ModuleKey,
        /// Index carried by the selected candidate
        index: usize,
        /// Number of routes on the built module
        route_count: usize,
    },
    /// The route at the candidate's index is not the route that was selected
    RouteMismatch {
        /// Key carried by the selected candidate
        module_key: ModuleKey,
        /// Index carried by the selected candidate
        index: usize,
        /// `METHOD /template` of the selected candidate
        expected: String,
        /// `METHOD /template` found on the built module
        found: String,
    },
    /// A path template the default matcher cannot compile
    MalformedTemplate {
        /// The offending template
        template: String,
        /// Human readable cause
        reason: String,
    },
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolveError::ModuleNotFound { module_key } => {
                write!(f, "route resolution error: module '{module_key}' is not registered")
            }
            ResolveError::ModuleBuildFailed { module_key } => {
                write!(f, "route resolution error: module '{module_key}' could not be built")
            }
            ResolveError::RouteIndexOutOfRange {
                module_key,
                index,
                route_count,
            } => write!(
                f,
                "route resolution error: module '{module_key}' has {route_count} routes, \
                 selected route index {index} is out of range"
            ),
            ResolveError::RouteMismatch {
                module_key,
                index,
                expected,
                found,
            } => write!(
                f,
                "route resolution error: module '{module_key}' route {index} is '{found}', \
                 expected '{expected}'"
            ),
            ResolveError::MalformedTemplate { template, reason } => {
                write!(f, "malformed path template '{template}': {reason}")
            }
        }
    }
}

impl std::error::Error for ResolveError {}

impl ResolveError {
    /// `true` for snapshot/catalog disagreements, `false` for template problems.
    #[must_use]
    pub fn is_internal(&self) -> bool {
        !matches!(self, ResolveError::MalformedTemplate { .. })
    }
}
