//! Unit tests for CLI commands

use crate::cli::{run, Cli, Commands};
use clap::Parser;
use std::io::Write;

#[test]
fn test_resolve_command_defaults_to_get() {
    let cli = Cli::try_parse_from([
        "brrtr-resolve",
        "resolve",
        "--manifest",
        "routes.yaml",
        "--path",
        "/users/7",
    ])
    .unwrap();

    match cli.command {
        Commands::Resolve {
            manifest,
            method,
            path,
            json,
        } => {
            assert_eq!(manifest.to_string_lossy(), "routes.yaml");
            assert_eq!(method, "GET");
            assert_eq!(path, "/users/7");
            assert!(!json);
        }
        _ => panic!("Expected Resolve command"),
    }
}

#[test]
fn test_resolve_command_with_flags() {
    let cli = Cli::try_parse_from([
        "brrtr-resolve",
        "resolve",
        "-m",
        "routes.yaml",
        "--method",
        "options",
        "-p",
        "/users",
        "--json",
    ])
    .unwrap();

    match cli.command {
        Commands::Resolve { method, json, .. } => {
            assert_eq!(method, "options");
            assert!(json);
        }
        _ => panic!("Expected Resolve command"),
    }
}

#[test]
fn test_all_commands_parse() {
    let commands = vec![
        vec!["brrtr-resolve", "routes", "--manifest", "routes.yaml"],
        vec![
            "brrtr-resolve",
            "resolve",
            "--manifest",
            "routes.yaml",
            "--path",
            "/",
        ],
        vec!["brrtr-resolve", "watch", "--manifest", "routes.yaml"],
    ];

    for args in commands {
        let cli = Cli::try_parse_from(&args);
        assert!(cli.is_ok(), "Failed to parse command: {:?}", args);
    }
}

#[test]
fn test_resolve_requires_path() {
    let cli = Cli::try_parse_from(["brrtr-resolve", "resolve", "--manifest", "routes.yaml"]);
    assert!(cli.is_err());
}

#[test]
fn test_run_resolve_against_manifest_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "modules:\n  - key: users\n    routes:\n      - {{ method: GET, path: \"/users/{{id}}\", handler: get_user }}"
    )
    .unwrap();

    let path = file.path().to_string_lossy().to_string();
    for method in ["GET", "DELETE", "OPTIONS"] {
        let cli = Cli::try_parse_from([
            "brrtr-resolve",
            "resolve",
            "--manifest",
            path.as_str(),
            "--method",
            method,
            "--path",
            "/users/7",
        ])
        .unwrap();
        assert!(run(cli).is_ok());
    }
}

#[test]
fn test_run_fails_on_missing_manifest() {
    let cli = Cli::try_parse_from([
        "brrtr-resolve",
        "routes",
        "--manifest",
        "/definitely/not/here.yaml",
    ])
    .unwrap();
    let err = run(cli).unwrap_err();
    assert!(format!("{err:#}").contains("Failed to read route manifest"));
}
