use brrtrouter_resolver::resolver::{
    CapturedParameter, RejectedRoute, INVALID_CONDITION, METHOD_DID_NOT_MATCH, PATH_DID_NOT_MATCH,
};
use brrtrouter_resolver::trace::BufferedTrace;
use brrtrouter_resolver::{
    OutcomeKind, RequestContext, RouteCache, RouteDescription, RouteManifest, RouteModule,
    RouteResolver,
};
use std::sync::Arc;

mod common;
use common::fixtures::{zoo_resolver, USERS_MANIFEST};
use common::log_capture::CapturedLogs;

#[test]
fn test_rejection_trail_groups_by_reason() {
    let records = zoo_resolver()
        .resolve_for_diagnostics("POST", "/zoo/animals/5")
        .unwrap();

    let reasons: Vec<&str> = records.iter().map(|r| r.reason.as_str()).collect();
    assert_eq!(reasons, vec![PATH_DID_NOT_MATCH, METHOD_DID_NOT_MATCH]);

    let method_rejections = &records[1].routes;
    assert_eq!(method_rejections.len(), 4);
    assert_eq!(
        method_rejections[0],
        RejectedRoute {
            method: "GET".to_string(),
            path: "/zoo/animals/{id}".to_string(),
            module_key: "zoo".to_string(),
        }
    );
}

#[test]
fn test_condition_rejections_are_reported_first() {
    let cache = RouteCache::new([RouteModule::new("flags")
        .route(RouteDescription::new("GET", "/flag", "flagged").with_condition(|_| false))
        .get("/other", "other")]);
    let records = RouteResolver::new(cache)
        .resolve_for_diagnostics("GET", "/flag")
        .unwrap();
    assert_eq!(records[0].reason, INVALID_CONDITION);
    assert_eq!(records[0].routes[0].path, "/flag");
    assert_eq!(records[1].reason, PATH_DID_NOT_MATCH);
    assert_eq!(records[1].routes[0].path, "/other");
}

#[test]
fn test_diagnose_matched_request() {
    let manifest = RouteManifest::from_yaml_str(USERS_MANIFEST).unwrap();
    let resolver = RouteResolver::new(manifest.to_cache());
    let report = resolver.diagnose("GET", "/users/42").unwrap();

    assert_eq!(report.outcome, OutcomeKind::Matched);
    assert_eq!(report.route.as_deref(), Some("GET /users/{id}"));
    assert_eq!(report.handler.as_deref(), Some("get_user"));
    assert_eq!(report.module_key.as_deref(), Some("users"));
    assert_eq!(
        report.parameters,
        vec![CapturedParameter {
            name: "id".to_string(),
            value: "42".to_string(),
        }]
    );
    assert!(report.allowed_methods.is_empty());

    let text = report.to_string();
    assert!(text.starts_with("GET /users/42 -> Matched"));
    assert!(text.contains("param: id = 42"));
    assert!(text.contains("rejected (Request method did not match):"));
    assert!(text.contains("DELETE /users/{id} [users]"));
}

#[test]
fn test_diagnose_method_not_allowed_as_json() {
    let manifest = RouteManifest::from_yaml_str(USERS_MANIFEST).unwrap();
    let resolver = RouteResolver::new(manifest.to_cache());
    let report = resolver.diagnose("PUT", "/users").unwrap();

    assert_eq!(report.outcome, OutcomeKind::MethodNotAllowed);
    assert_eq!(report.allowed_methods, vec!["GET", "POST"]);
    assert!(report.route.is_none());

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["outcome"], "method_not_allowed");
    assert_eq!(json["allowed_methods"], serde_json::json!(["GET", "POST"]));
    assert_eq!(json["rejections"][1]["reason"], METHOD_DID_NOT_MATCH);
}

#[test]
fn test_diagnostics_do_not_write_trace_lines() {
    let trace = Arc::new(BufferedTrace::new());
    let resolver = zoo_resolver().with_trace(trace.clone());
    resolver.diagnose("GET", "/zoo/animals").unwrap();
    resolver.resolve_for_diagnostics("GET", "/nope").unwrap();
    assert!(trace.lines().is_empty());
}

#[test]
fn test_diagnose_empty_table() {
    let report = RouteResolver::new(RouteCache::default())
        .diagnose("GET", "/")
        .unwrap();
    assert_eq!(report.outcome, OutcomeKind::NotFound);
    assert!(report.rejections.is_empty());
    assert_eq!(report.to_string(), "GET / -> NotFound\n");
}

#[test]
fn test_diagnostics_do_not_log_request_outcomes() {
    let logs = CapturedLogs::init();
    let resolver = zoo_resolver();

    resolver.resolve(&RequestContext::new("GET", "/zoo/animals")).unwrap();
    assert!(logs.contents().contains("Route matched"));
    logs.clear();

    resolver.resolve_for_diagnostics("GET", "/zoo/animals/1").unwrap();
    resolver.resolve_for_diagnostics("GET", "/nope").unwrap();
    resolver.diagnose("DELETE", "/zoo/animals").unwrap();

    let output = logs.contents();
    for message in [
        "Route matched",
        "No route matched",
        "Method not allowed",
        "Slow route resolution detected",
        "Route resolution attempt",
    ] {
        assert!(!output.contains(message), "diagnostics logged {message:?}:\n{output}");
    }
}
