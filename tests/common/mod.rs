#![allow(dead_code)]

pub mod temp_files {
    use std::path::PathBuf;
    use tempfile::TempDir;

    /// A manifest written into its own temporary directory. The directory is
    /// removed when this value drops.
    pub struct TempManifest {
        dir: TempDir,
        path: PathBuf,
    }

    impl TempManifest {
        pub fn path(&self) -> &std::path::Path {
            &self.path
        }

        pub fn dir(&self) -> &std::path::Path {
            self.dir.path()
        }

        /// Overwrite the manifest contents
        pub fn rewrite(&self, content: &str) {
            std::fs::write(&self.path, content).unwrap();
        }
    }

    /// Creates a temporary `routes.yaml` with `content`
    pub fn create_temp_manifest(content: &str) -> TempManifest {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("routes.yaml");
        std::fs::write(&path, content).unwrap();
        TempManifest { dir, path }
    }
}

pub mod fixtures {
    use brrtrouter_resolver::{RouteCache, RouteModule, RouteResolver};

    pub const USERS_MANIFEST: &str = r#"resolver:
  slow_resolve_threshold_us: 50000
modules:
  - key: users
    routes:
      - { method: GET, path: /users, handler: list_users }
      - { method: POST, path: /users, handler: create_user }
      - { method: GET, path: "/users/{id}", handler: get_user }
      - { method: DELETE, path: "/users/{id}", handler: delete_user }
      - { method: GET, path: /users/list, handler: list_users_page }
  - key: health
    routes:
      - { method: GET, path: /, handler: root }
      - { method: HEAD, path: /, handler: root_head }
"#;

    /// The route table most tests share.
    pub fn zoo_cache() -> RouteCache {
        RouteCache::new([
            RouteModule::new("zoo")
                .get("/", "root_handler")
                .get("/zoo/animals", "get_animals")
                .post("/zoo/animals", "create_animal")
                .get("/zoo/animals/{id}", "get_animal")
                .put("/zoo/animals/{id}", "update_animal")
                .patch("/zoo/animals/{id}", "patch_animal")
                .delete("/zoo/animals/{id}", "delete_animal")
                .get("/zoo/animals/{id}/toys/{toy_id}", "animal_toy"),
            RouteModule::new("health")
                .head("/zoo/health", "health_check")
                .options("/zoo/health", "supported_ops"),
        ])
    }

    pub fn zoo_resolver() -> RouteResolver {
        RouteResolver::new(zoo_cache())
    }
}

pub mod log_capture {
    use std::io;
    use std::sync::{Arc, Mutex};
    use tracing_subscriber::fmt::MakeWriter;

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for SharedBuffer {
        type Writer = SharedBuffer;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    /// Captures every event emitted on the current thread while alive.
    pub struct CapturedLogs {
        buffer: SharedBuffer,
        _guard: tracing::subscriber::DefaultGuard,
    }

    impl CapturedLogs {
        pub fn init() -> Self {
            let buffer = SharedBuffer::default();
            let subscriber = tracing_subscriber::fmt()
                .with_max_level(tracing::Level::TRACE)
                .with_ansi(false)
                .with_writer(buffer.clone())
                .finish();
            let guard = tracing::subscriber::set_default(subscriber);
            Self {
                buffer,
                _guard: guard,
            }
        }

        pub fn contents(&self) -> String {
            String::from_utf8_lossy(&self.buffer.0.lock().unwrap()).into_owned()
        }

        pub fn clear(&self) {
            self.buffer.0.lock().unwrap().clear();
        }
    }
}
