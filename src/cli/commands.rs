use crate::hot_reload::watch_manifest;
use crate::resolver::RouteResolver;
use crate::route::{RouteManifest, SharedRouteCache};
use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::mpsc;
use std::sync::Arc;

/// Command-line interface for the route resolver
#[derive(Parser, Debug)]
#[command(name = "brrtr-resolve")]
#[command(about = "Inspect and diagnose route resolution", long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print every route in a manifest
    Routes {
        /// Path to the YAML route manifest
        #[arg(short, long)]
        manifest: PathBuf,
    },
    /// Resolve one request and print the outcome with its rejection trail
    Resolve {
        /// Path to the YAML route manifest
        #[arg(short, long)]
        manifest: PathBuf,

        /// Request method
        #[arg(long, default_value = "GET")]
        method: String,

        /// Request path (a query string is ignored)
        #[arg(short, long)]
        path: String,

        /// Print the report as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Watch a manifest and print the route table after every reload
    Watch {
        /// Path to the YAML route manifest
        #[arg(short, long)]
        manifest: PathBuf,
    },
}

/// Parse the process arguments and run the selected command.
pub fn run_cli() -> anyhow::Result<()> {
    run(Cli::parse())
}

/// Run an already parsed command line.
pub fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Routes { manifest } => {
            let manifest = RouteManifest::load(&manifest)?;
            manifest.to_cache().dump_routes();
            Ok(())
        }
        Commands::Resolve {
            manifest,
            method,
            path,
            json,
        } => {
            let manifest = RouteManifest::load(&manifest)?;
            let resolver =
                RouteResolver::with_config(manifest.to_cache(), manifest.resolver_config());
            let report = resolver.diagnose(&method, &path)?;
            if json {
                let rendered = serde_json::to_string_pretty(&report)
                    .context("Failed to serialize resolution report")?;
                println!("{rendered}");
            } else {
                print!("{report}");
            }
            Ok(())
        }
        Commands::Watch { manifest } => {
            let initial = RouteManifest::load(&manifest)?;
            let shared = Arc::new(SharedRouteCache::new(initial.to_cache()));
            shared.load().dump_routes();

            let (tx, rx) = mpsc::channel();
            let _watcher = watch_manifest(&manifest, Arc::clone(&shared), move |cache| {
                let _ = tx.send(cache.route_count());
            })
            .with_context(|| format!("Failed to watch {}", manifest.display()))?;

            println!("watching {} (Ctrl-C to stop)", manifest.display());
            for _ in rx {
                shared.load().dump_routes();
            }
            Ok(())
        }
    }
}
