//! Test helpers: build the real router around an in-memory asset provider.
//!
//! Run from workspace root: `cargo test -p imgrelay-api --test upload_test`.

pub mod fixtures;

use async_trait::async_trait;
use axum_test::TestServer;
use imgrelay_api::setup::{routes, services};
use imgrelay_core::{Config, TransformSpec};
use imgrelay_services::{AssetProvider, ProviderError, ProviderResult};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// Behaviour switches for [`FakeProvider`]
#[derive(Default, Clone, Copy)]
pub struct ProviderBehavior {
    pub fail_submit: bool,
    pub fail_lookup: bool,
    pub fail_transform: bool,
}

/// A submission as seen by the fake provider
#[derive(Debug, Clone)]
pub struct Submission {
    pub public_id: String,
    pub filename: String,
    pub data: Vec<u8>,
    /// Whether the scratch file was on disk while the provider was called
    pub scratch_present: bool,
}

/// In-memory asset provider that records every call.
pub struct FakeProvider {
    behavior: ProviderBehavior,
    scratch_dir: PathBuf,
    pub submissions: Mutex<Vec<Submission>>,
    pub lookups: Mutex<Vec<String>>,
}

impl FakeProvider {
    pub fn new(behavior: ProviderBehavior, scratch_dir: &Path) -> Self {
        Self {
            behavior,
            scratch_dir: scratch_dir.to_path_buf(),
            submissions: Mutex::new(Vec::new()),
            lookups: Mutex::new(Vec::new()),
        }
    }

    pub fn submissions(&self) -> Vec<Submission> {
        self.submissions.lock().unwrap().clone()
    }
}

#[async_trait]
impl AssetProvider for FakeProvider {
    async fn submit(
        &self,
        public_id: &str,
        filename: &str,
        _content_type: &str,
        data: Vec<u8>,
    ) -> ProviderResult<()> {
        let scratch_present = self.scratch_dir.join(filename).is_file();
        if self.behavior.fail_submit {
            return Err(ProviderError::Transport(
                "simulated connection reset".to_string(),
            ));
        }
        self.submissions.lock().unwrap().push(Submission {
            public_id: public_id.to_string(),
            filename: filename.to_string(),
            data,
            scratch_present,
        });
        Ok(())
    }

    async fn lookup_canonical_url(&self, public_id: &str) -> ProviderResult<String> {
        self.lookups.lock().unwrap().push(public_id.to_string());
        if self.behavior.fail_lookup {
            return Err(ProviderError::Rejected {
                status: 420,
                body: "Rate Limited".to_string(),
            });
        }
        Ok(format!(
            "https://res.cloudinary.com/test/image/upload/v1/{}.jpg",
            public_id
        ))
    }

    fn build_transformed_url(
        &self,
        public_id: &str,
        spec: &TransformSpec,
    ) -> ProviderResult<String> {
        if self.behavior.fail_transform {
            return Err(ProviderError::InvalidIdentifier(public_id.to_string()));
        }
        Ok(format!(
            "https://res.cloudinary.com/test/image/upload/{}/v1/{}",
            spec, public_id
        ))
    }
}

/// Test application: server, fake provider and the scratch directory.
pub struct TestApp {
    pub server: TestServer,
    pub provider: Arc<FakeProvider>,
    pub _temp_dir: TempDir,
    pub scratch_dir: PathBuf,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    /// Number of entries currently in the scratch directory (0 if it does not exist).
    pub fn scratch_entries(&self) -> usize {
        std::fs::read_dir(&self.scratch_dir)
            .map(|d| d.count())
            .unwrap_or(0)
    }
}

pub fn create_test_config(uploads_dir: &Path) -> Config {
    let vars: HashMap<&str, String> = HashMap::from([
        ("CLOUDINARY_CLOUD_NAME", "test".to_string()),
        ("CLOUDINARY_API_KEY", "key".to_string()),
        ("CLOUDINARY_API_SECRET", "secret".to_string()),
        ("MAX_UPLOAD_SIZE_MB", "1".to_string()),
        ("UPLOADS_DIR", uploads_dir.display().to_string()),
    ]);
    Config::from_lookup(|key| vars.get(key).cloned()).expect("Failed to build test config")
}

/// Setup test app with default (always succeeding) provider behaviour.
pub fn setup_test_app() -> TestApp {
    setup_test_app_with(ProviderBehavior::default())
}

pub fn setup_test_app_with(behavior: ProviderBehavior) -> TestApp {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    // Not created up front: the first upload must create it.
    let scratch_dir = temp_dir.path().join("uploads");
    setup_test_app_in(behavior, temp_dir, scratch_dir)
}

pub fn setup_test_app_in(
    behavior: ProviderBehavior,
    temp_dir: TempDir,
    scratch_dir: PathBuf,
) -> TestApp {
    let config = create_test_config(&scratch_dir);
    let provider = Arc::new(FakeProvider::new(behavior, &scratch_dir));
    let state = services::initialize_state(&config, provider.clone());
    let router = routes::setup_routes(&config, state);
    let server = TestServer::new(router).expect("Failed to create test server");

    TestApp {
        server,
        provider,
        _temp_dir: temp_dir,
        scratch_dir,
    }
}
