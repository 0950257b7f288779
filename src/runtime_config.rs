//! # Runtime Configuration Module
//!
//! Environment variable and manifest based configuration for the resolver.
//!
//! ## Environment Variables
//!
//! ### `BRRTR_RESOLVE_TRACE`
//!
//! Enables the per-request trace sink (`true`/`1`/`yes`). Every stage decision is
//! written as a human readable line under the `brrtrouter_resolver::trace` target.
//!
//! Default: `false`
//!
//! ### `BRRTR_CASE_SENSITIVE`
//!
//! Makes literal template segments match case-sensitively.
//!
//! Default: `false`
//!
//! ### `BRRTR_STRICT_TRAILING_SLASH`
//!
//! When enabled, `/users/` no longer matches the template `/users`.
//!
//! Default: `false`
//!
//! ### `BRRTR_SLOW_RESOLVE_US`
//!
//! Resolution time in microseconds above which a `Slow route resolution` warning is
//! logged. Accepts decimal (`1000`) or hexadecimal (`0x3e8`).
//!
//! Default: `1000`
//!
//! ## Usage
//!
//! ```rust
//! use brrtrouter_resolver::runtime_config::ResolverConfig;
//!
//! let config = ResolverConfig::from_env();
//! println!("trace enabled: {}", config.trace_enabled);
//! ```
//!
//! The same fields can be supplied in the `resolver:` section of a route manifest:
//!
//! ```yaml
//! resolver:
//!   trace_enabled: true
//!   case_sensitive: false
//!   slow_resolve_threshold_us: 500
//! ```

use serde::{Deserialize, Serialize};
use std::env;

const DEFAULT_SLOW_RESOLVE_US: u64 = 1000;

/// Resolver configuration loaded from the environment or a manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Write every stage decision to the trace sink
    pub trace_enabled: bool,
    /// Match literal template segments case-sensitively
    pub case_sensitive: bool,
    /// Reject request paths that only differ from a template by a trailing `/`
    pub strict_trailing_slash: bool,
    /// Warn when a single resolution takes longer than this (microseconds)
    pub slow_resolve_threshold_us: u64,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            trace_enabled: false,
            case_sensitive: false,
            strict_trailing_slash: false,
            slow_resolve_threshold_us: DEFAULT_SLOW_RESOLVE_US,
        }
    }
}

impl ResolverConfig {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Unset or unparsable values fall back to the defaults.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            trace_enabled: parse_flag(lookup("BRRTR_RESOLVE_TRACE"))
                .unwrap_or(defaults.trace_enabled),
            case_sensitive: parse_flag(lookup("BRRTR_CASE_SENSITIVE"))
                .unwrap_or(defaults.case_sensitive),
            strict_trailing_slash: parse_flag(lookup("BRRTR_STRICT_TRAILING_SLASH"))
                .unwrap_or(defaults.strict_trailing_slash),
            slow_resolve_threshold_us: parse_number(lookup("BRRTR_SLOW_RESOLVE_US"))
                .unwrap_or(defaults.slow_resolve_threshold_us),
        }
    }
}

fn parse_flag(value: Option<String>) -> Option<bool> {
    match value?.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn parse_number(value: Option<String>) -> Option<u64> {
    let value = value?;
    let value = value.trim();
    if let Some(hex) = value.strip_prefix("0x") {
        u64::from_str_radix(hex, 16).ok()
    } else {
        value.parse().ok()
    }
}
