//! # Hot Reload Module
//!
//! Live reloading of a YAML route manifest without restarting the host.
//!
//! ## Overview
//!
//! [`watch_manifest`] watches the manifest file and, on every modification:
//!
//! 1. **Parse** - the manifest is read and validated
//! 2. **Build** - a new [`RouteCache`] is built from it
//! 3. **Publish** - the cache is swapped into the [`SharedRouteCache`]
//! 4. **Hook** - the caller's callback sees the new cache
//!
//! Resolutions already in flight keep the snapshot they loaded; the next call sees
//! the new one.
//!
//! ## Error Handling
//!
//! If the new manifest fails to parse or validate, the error is logged and the
//! previous snapshot stays active.
//!
//! ## Resolver Settings
//!
//! Only routes are hot-reloaded. Matcher and logging settings are fixed when a
//! [`RouteResolver`](crate::resolver::RouteResolver) is built, so a changed
//! `resolver:` section is reported through [`ManifestReload::resolver`] but not
//! applied; rebuild the resolver to pick it up.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use brrtrouter_resolver::hot_reload::watch_manifest;
//! use brrtrouter_resolver::route::SharedRouteCache;
//! use std::sync::Arc;
//!
//! let shared = Arc::new(SharedRouteCache::default());
//! let _watcher = watch_manifest("routes.yaml", Arc::clone(&shared), |cache| {
//!     println!("Reloaded {} routes", cache.route_count());
//! })?;
//! # Ok::<(), notify::Error>(())
//! ```

use crate::route::{RouteCache, RouteManifest, SharedRouteCache};
use crate::runtime_config::ResolverConfig;
use notify::{Config, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info, warn};

/// Outcome of a successful manifest reload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManifestReload {
    /// Routes in the published snapshot
    pub routes_count: usize,
    /// The manifest's `resolver:` section, if any. Not applied to running resolvers.
    pub resolver: Option<ResolverConfig>,
}

/// Load `path` and publish its routes into `shared`.
///
/// # Errors
///
/// Read, parse and validation failures. `shared` is left untouched on error.
pub fn reload_manifest(path: &Path, shared: &SharedRouteCache) -> anyhow::Result<ManifestReload> {
    let manifest = RouteManifest::load(path)?;
    let cache = manifest.to_cache();
    let reload = ManifestReload {
        routes_count: cache.route_count(),
        resolver: manifest.resolver,
    };
    shared.publish(cache);
    Ok(reload)
}

/// Watch a manifest file and republish `shared` when it changes.
///
/// The returned watcher stops watching when dropped.
///
/// # Errors
///
/// When the watcher cannot be created or the path cannot be watched.
pub fn watch_manifest<P, F>(
    manifest_path: P,
    shared: Arc<SharedRouteCache>,
    mut on_reload: F,
) -> notify::Result<RecommendedWatcher>
where
    P: AsRef<Path>,
    F: FnMut(&RouteCache) + Send + 'static,
{
    let path: PathBuf = manifest_path.as_ref().to_path_buf();
    let watch_path = path.clone();

    let mut watcher = RecommendedWatcher::new(
        move |res: Result<notify::Event, notify::Error>| match res {
            Ok(event) => {
                if !matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_)) {
                    return;
                }
                match reload_manifest(&watch_path, &shared) {
                    Ok(reload) => {
                        info!(
                            manifest = %watch_path.display(),
                            routes_count = reload.routes_count,
                            "hot-reload: applied route manifest"
                        );
                        if reload.resolver.is_some() {
                            warn!(
                                manifest = %watch_path.display(),
                                "hot-reload: resolver settings are not reloaded, restart to apply them"
                            );
                        }
                        on_reload(&shared.load());
                    }
                    Err(e) => error!(
                        manifest = %watch_path.display(),
                        error = %format!("{e:#}"),
                        "hot-reload: manifest rejected, keeping previous routes"
                    ),
                }
            }
            Err(e) => error!(error = %e, "hot-reload: watch error"),
        },
        Config::default(),
    )?;

    watcher.watch(&path, RecursiveMode::NonRecursive)?;
    Ok(watcher)
}
