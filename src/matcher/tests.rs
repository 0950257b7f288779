use super::{PathMatcher, TemplateMatcher};
use crate::context::RequestContext;
use crate::error::ResolveError;
use crate::route::segment_count;
use crate::runtime_config::ResolverConfig;

fn match_with(matcher: &TemplateMatcher, path: &str, template: &str) -> super::MatchResult {
    let ctx = RequestContext::new("GET", path);
    matcher.match_path(path, template, segment_count(template), &ctx)
}

#[test]
fn test_root_path() {
    let (re, params) = TemplateMatcher::template_to_regex("/", true).unwrap();
    assert!(re.is_match("/"));
    assert!(params.is_empty());
}

#[test]
fn test_parameterized_path() {
    let (re, params) = TemplateMatcher::template_to_regex("/items/{id}", true).unwrap();
    assert!(re.is_match("/items/123"));
    assert_eq!(params.len(), 1);
    assert_eq!(params[0].as_ref(), "id");
}

#[test]
fn test_nested_path() {
    let (re, params) = TemplateMatcher::template_to_regex("/a/{b}/c", true).unwrap();
    assert!(re.is_match("/a/1/c"));
    assert!(!re.is_match("/a/1/d"));
    assert_eq!(params.len(), 1);
}

#[test]
fn test_literal_segments_are_escaped() {
    let matcher = TemplateMatcher::new();
    assert!(match_with(&matcher, "/v1.0/status", "/v1.0/status").is_match);
    assert!(!match_with(&matcher, "/v1x0/status", "/v1.0/status").is_match);
}

#[test]
fn test_exact_match_has_no_parameters() {
    let matcher = TemplateMatcher::new();
    let m = match_with(&matcher, "/users/list", "/users/list");
    assert!(m.is_match);
    assert!(m.is_exact());
}

#[test]
fn test_captures_in_order() {
    let matcher = TemplateMatcher::new();
    let m = match_with(&matcher, "/org/1/team/2", "/org/{org}/team/{team}");
    assert!(m.is_match);
    let names: Vec<&str> = m.parameters.iter().map(|(k, _)| k.as_ref()).collect();
    assert_eq!(names, vec!["org", "team"]);
    assert_eq!(m.get("team"), Some("2"));
    assert_eq!(m.parameter_count(), 2);
}

#[test]
fn test_segment_count_mismatch_is_rejected() {
    let matcher = TemplateMatcher::new();
    assert!(!match_with(&matcher, "/users/1/extra", "/users/{id}").is_match);
    assert!(!match_with(&matcher, "/users", "/users/{id}").is_match);
}

#[test]
fn test_case_insensitive_by_default() {
    let matcher = TemplateMatcher::new();
    let m = match_with(&matcher, "/USERS/Bob", "/users/{name}");
    assert!(m.is_match);
    assert_eq!(m.get("name"), Some("Bob"));
}

#[test]
fn test_case_sensitive_when_configured() {
    let matcher = TemplateMatcher::from_config(&ResolverConfig {
        case_sensitive: true,
        ..ResolverConfig::default()
    });
    assert!(!match_with(&matcher, "/USERS/bob", "/users/{name}").is_match);
    assert!(match_with(&matcher, "/users/bob", "/users/{name}").is_match);
}

#[test]
fn test_trailing_slash_tolerance() {
    let lenient = TemplateMatcher::new();
    assert!(match_with(&lenient, "/users/", "/users").is_match);
    assert!(match_with(&lenient, "/", "/").is_match);
    assert!(match_with(&lenient, "", "/").is_match);

    let strict = TemplateMatcher::from_config(&ResolverConfig {
        strict_trailing_slash: true,
        ..ResolverConfig::default()
    });
    assert!(!match_with(&strict, "/users/", "/users").is_match);
}

#[test]
fn test_validate_rejects_malformed_templates() {
    for template in [
        "users",
        "/users//list",
        "/users/{}",
        "/users/{id",
        "/users/id}",
        "/users/x{id}",
        "/a/{id}/b/{id}",
        "/users/{{id}}",
    ] {
        let err = TemplateMatcher::validate(template).unwrap_err();
        assert!(
            matches!(err, ResolveError::MalformedTemplate { .. }),
            "expected {template} to be rejected"
        );
        assert!(!err.is_internal());
    }
}

#[test]
fn test_validate_returns_parameter_names() {
    assert_eq!(
        TemplateMatcher::validate("/users/{user_id}/posts/{post_id}").unwrap(),
        vec!["user_id".to_string(), "post_id".to_string()]
    );
    assert!(TemplateMatcher::validate("/").unwrap().is_empty());
}

#[test]
fn test_malformed_template_never_matches() {
    let matcher = TemplateMatcher::new();
    assert!(!match_with(&matcher, "/users/1", "/users/{id").is_match);
    // Second lookup hits the cached failure.
    assert!(!match_with(&matcher, "/users/1", "/users/{id").is_match);
}

#[test]
fn test_prepare_compiles_each_template_once() {
    let matcher = TemplateMatcher::new();
    assert_eq!(matcher.cached_templates(), 0);
    matcher.prepare("/users/{id}");
    matcher.prepare("/users/{id}");
    matcher.prepare("/users/{id}/{id}");
    assert_eq!(matcher.cached_templates(), 2);

    assert_eq!(match_with(&matcher, "/users/7", "/users/{id}").get("id"), Some("7"));
    assert!(!match_with(&matcher, "/users/7/8", "/users/{id}/{id}").is_match);
    assert_eq!(matcher.cached_templates(), 2);
}
