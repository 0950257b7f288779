//! # CLI Module
//!
//! Command-line access to a route manifest: list the routes, resolve a request and
//! see why every other route was rejected, or watch the file for changes.
//!
//! ## Commands
//!
//! ### `routes`
//!
//! ```bash
//! brrtr-resolve routes --manifest routes.yaml
//! ```
//!
//! ### `resolve`
//!
//! ```bash
//! brrtr-resolve resolve --manifest routes.yaml --method DELETE --path /users/7
//! brrtr-resolve resolve --manifest routes.yaml --path /users/list --json
//! ```
//!
//! Prints the outcome (`Matched`, `NotFound`, `MethodNotAllowed`, `Options`), the
//! selected route and its parameters, and the rejection trail.
//!
//! ### `watch`
//!
//! ```bash
//! brrtr-resolve watch --manifest routes.yaml
//! ```
//!
//! Reloads the manifest on every change and prints the new route table.

mod commands;

#[cfg(test)]
mod tests;

pub use commands::{run, run_cli, Cli, Commands};
