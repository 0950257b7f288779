//! # Matcher Module
//!
//! Path template matching, the capability the resolver's path stage is built on.
//!
//! The resolver only depends on the [`PathMatcher`] trait: give it a literal path,
//! a template and the template's segment count, get back a [`MatchResult`]. The
//! bundled [`TemplateMatcher`] handles `/literal/{param}` templates with compiled,
//! cached regexes; hosts with richer template grammars plug in their own matcher.
//!
//! ## Example
//!
//! ```rust
//! use brrtrouter_resolver::context::RequestContext;
//! use brrtrouter_resolver::matcher::{PathMatcher, TemplateMatcher};
//!
//! let matcher = TemplateMatcher::new();
//! let ctx = RequestContext::new("GET", "/users/7/posts/9");
//! let m = matcher.match_path(&ctx.path, "/users/{user_id}/posts/{post_id}", 4, &ctx);
//! assert_eq!(m.get("user_id"), Some("7"));
//! assert_eq!(m.get("post_id"), Some("9"));
//! ```

mod core;
#[cfg(test)]
mod tests;

pub use core::{MatchResult, ParamVec, PathMatcher, TemplateMatcher, MAX_INLINE_PARAMS};
