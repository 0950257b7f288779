//! Matcher core - on the resolver hot path.

#![deny(clippy::inefficient_to_string)]
#![deny(clippy::format_push_string)]
#![deny(clippy::unnecessary_to_owned)]

use crate::context::RequestContext;
use crate::error::ResolveError;
use crate::runtime_config::ResolverConfig;
use dashmap::DashMap;
use regex::Regex;
use smallvec::SmallVec;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, error};

/// Maximum number of captured parameters before heap allocation.
/// Most REST APIs have ≤4 path params (e.g., /users/{id}/posts/{postId}).
pub const MAX_INLINE_PARAMS: usize = 8;

/// Captured parameters in capture order.
///
/// Names are `Arc<str>` shared with the compiled template; values are per-request.
pub type ParamVec = SmallVec<[(Arc<str>, String); MAX_INLINE_PARAMS]>;

/// Outcome of matching one request path against one template.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchResult {
    /// Whether the path matched the template
    pub is_match: bool,
    /// Captured parameters; empty means a literal (exact) match
    pub parameters: ParamVec,
}

impl MatchResult {
    #[must_use]
    pub fn no_match() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn matched(parameters: ParamVec) -> Self {
        Self {
            is_match: true,
            parameters,
        }
    }

    /// Matched without capturing anything.
    #[inline]
    #[must_use]
    pub fn is_exact(&self) -> bool {
        self.parameters.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn parameter_count(&self) -> usize {
        self.parameters.len()
    }

    /// Get a captured parameter by name
    #[inline]
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.parameters
            .iter()
            .rfind(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Decides whether a request path matches a route template.
pub trait PathMatcher: Send + Sync {
    fn match_path(
        &self,
        path: &str,
        template: &str,
        segment_count: usize,
        ctx: &RequestContext,
    ) -> MatchResult;

    /// Compile `template` ahead of the first request. Matchers without a cache ignore it.
    fn prepare(&self, _template: &str) {}
}

#[derive(Debug)]
struct CompiledTemplate {
    regex: Regex,
    param_names: Vec<Arc<str>>,
}

/// Default matcher for `/literal/{param}` templates.
///
/// Templates are compiled to anchored regexes on first use and cached; a template
/// that fails to compile is cached as unmatchable and reported once.
///
/// ```rust
/// use brrtrouter_resolver::context::RequestContext;
/// use brrtrouter_resolver::matcher::{PathMatcher, TemplateMatcher};
///
/// let matcher = TemplateMatcher::new();
/// let ctx = RequestContext::new("GET", "/users/42");
/// let m = matcher.match_path("/users/42", "/users/{id}", 2, &ctx);
/// assert!(m.is_match);
/// assert_eq!(m.get("id"), Some("42"));
/// ```
#[derive(Debug, Default)]
pub struct TemplateMatcher {
    compiled: DashMap<String, Option<Arc<CompiledTemplate>>>,
    case_sensitive: bool,
    strict_trailing_slash: bool,
}

impl TemplateMatcher {
    /// Case-insensitive, trailing-slash tolerant matcher.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_config(config: &ResolverConfig) -> Self {
        Self {
            compiled: DashMap::new(),
            case_sensitive: config.case_sensitive,
            strict_trailing_slash: config.strict_trailing_slash,
        }
    }

    /// Check a template and return its parameter names in order.
    ///
    /// Templates start with `/`, have no empty segments (except the root `/`), and
    /// every segment containing a brace is exactly `{name}` with a unique name.
    pub fn validate(template: &str) -> Result<Vec<String>, ResolveError> {
        let malformed = |reason: &str| ResolveError::MalformedTemplate {
            template: template.to_string(),
            reason: reason.to_string(),
        };

        if !template.starts_with('/') {
            return Err(malformed("template must start with '/'"));
        }
        if template == "/" {
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        let mut seen = HashSet::new();
        for segment in template[1..].split('/') {
            if segment.is_empty() {
                return Err(malformed("empty path segment"));
            }
            if !segment.contains(['{', '}']) {
                continue;
            }
            let name = segment
                .strip_prefix('{')
                .and_then(|s| s.strip_suffix('}'))
                .ok_or_else(|| malformed("parameter must span a whole segment"))?;
            if name.is_empty() {
                return Err(malformed("empty parameter name"));
            }
            if name.contains(['{', '}']) {
                return Err(malformed("unbalanced braces"));
            }
            if !seen.insert(name) {
                return Err(malformed("duplicate parameter name"));
            }
            names.push(name.to_string());
        }
        Ok(names)
    }

    /// Convert a template to an anchored regex plus its parameter names.
    ///
    /// `/users/{id}` becomes `^/users/([^/]+)$` (prefixed with `(?i)` unless
    /// case-sensitive); literal segments are escaped.
    pub(crate) fn template_to_regex(
        template: &str,
        case_sensitive: bool,
    ) -> Result<(Regex, Vec<Arc<str>>), ResolveError> {
        let names = Self::validate(template)?;

        let mut pattern = String::with_capacity(template.len() + 16);
        if !case_sensitive {
            pattern.push_str("(?i)");
        }
        pattern.push('^');
        if template == "/" {
            pattern.push('/');
        } else {
            for segment in template[1..].split('/') {
                pattern.push('/');
                if segment.starts_with('{') {
                    pattern.push_str("([^/]+)");
                } else {
                    pattern.push_str(&regex::escape(segment));
                }
            }
        }
        pattern.push('$');

        let regex = Regex::new(&pattern).map_err(|e| ResolveError::MalformedTemplate {
            template: template.to_string(),
            reason: e.to_string(),
        })?;
        Ok((regex, names.into_iter().map(Arc::from).collect()))
    }

    /// Number of templates compiled so far, including ones that can never match.
    #[must_use]
    pub fn cached_templates(&self) -> usize {
        self.compiled.len()
    }

    fn compiled(&self, template: &str) -> Option<Arc<CompiledTemplate>> {
        if let Some(entry) = self.compiled.get(template) {
            return entry.value().clone();
        }

        let compiled = match Self::template_to_regex(template, self.case_sensitive) {
            Ok((regex, param_names)) => Some(Arc::new(CompiledTemplate { regex, param_names })),
            Err(e) => {
                error!(template = %template, error = %e, "Template can never match");
                None
            }
        };
        self.compiled
            .entry(template.to_string())
            .or_insert(compiled)
            .value()
            .clone()
    }

    fn normalize<'a>(&self, path: &'a str) -> &'a str {
        if path.is_empty() {
            return "/";
        }
        if !self.strict_trailing_slash && path.len() > 1 {
            if let Some(trimmed) = path.strip_suffix('/') {
                return trimmed;
            }
        }
        path
    }
}

impl PathMatcher for TemplateMatcher {
    fn prepare(&self, template: &str) {
        let _ = self.compiled(template);
    }

    fn match_path(
        &self,
        path: &str,
        template: &str,
        segment_count: usize,
        _ctx: &RequestContext,
    ) -> MatchResult {
        let path = self.normalize(path);

        // `{param}` never spans a '/', so differing depth can never match.
        if path.bytes().filter(|b| *b == b'/').count() != segment_count {
            return MatchResult::no_match();
        }

        let Some(compiled) = self.compiled(template) else {
            return MatchResult::no_match();
        };
        let Some(captures) = compiled.regex.captures(path) else {
            return MatchResult::no_match();
        };

        let mut parameters = ParamVec::new();
        for (i, name) in compiled.param_names.iter().enumerate() {
            if let Some(value) = captures.get(i + 1) {
                parameters.push((Arc::clone(name), value.as_str().to_string()));
            }
        }
        debug!(
            path = %path,
            template = %template,
            params = ?parameters,
            "Template matched"
        );
        MatchResult::matched(parameters)
    }
}
