//! End-to-end tests for the Selam admin.
//!
//! Every test runs the real [`Dashboard`] against a `wiremock` backend, with
//! the token slot in a temporary directory. No network or live backend is
//! needed:
//!
//! ```bash
//! cargo test -p selam-integration-tests
//! ```

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::path::PathBuf;

use serde_json::{Value, json};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use selam_admin::{AdminConfig, Dashboard};

/// Token used by [`TestContext::signed_in`].
pub const TEST_TOKEN: &str = "tok-integration";

/// A mock backend plus a private token slot.
pub struct TestContext {
    pub server: MockServer,
    pub config: AdminConfig,
    _dir: TempDir,
}

impl TestContext {
    pub async fn new() -> Self {
        Self::with_env(&[]).await
    }

    /// Start a backend; `extra` adds configuration variables.
    pub async fn with_env(extra: &[(&str, &str)]) -> Self {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();
        let token_path = dir.path().join("auth_token");
        let base_url = api_url(&server);

        let mut vars: Vec<(String, String)> = vec![
            ("SELAM_API_BASE_URL".into(), base_url),
            (
                "SELAM_TOKEN_PATH".into(),
                token_path.to_string_lossy().into_owned(),
            ),
            ("SELAM_HTTP_TIMEOUT_SECS".into(), "5".into()),
        ];
        vars.extend(extra.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())));

        let config = AdminConfig::from_lookup(|key| {
            vars.iter().find(|(k, _)| k == key).map(|(_, v)| v.clone())
        })
        .unwrap();

        Self {
            server,
            config,
            _dir: dir,
        }
    }

    pub fn token_path(&self) -> PathBuf {
        self.config.token_path.clone()
    }

    /// A dashboard with no session.
    pub fn dashboard(&self) -> Dashboard {
        Dashboard::from_config(&self.config).unwrap()
    }

    /// A dashboard restored from a persisted [`TEST_TOKEN`].
    pub async fn signed_in(&self) -> Dashboard {
        std::fs::write(self.token_path(), TEST_TOKEN).unwrap();
        mount_profile(&self.server).await;

        let mut dashboard = self.dashboard();
        assert!(dashboard.session.restore_session().await);
        dashboard
    }
}

/// Base URL of the mock API.
pub fn api_url(server: &MockServer) -> String {
    format!("{}/api/v1", server.uri())
}

/// `{"success": true, "data": data}`
pub fn ok(data: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({"success": true, "data": data}))
}

/// Answer `GET /auth/me` with the test admin.
pub async fn mount_profile(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/v1/auth/me"))
        .respond_with(ok(admin_user()))
        .mount(server)
        .await;
}

pub fn admin_user() -> Value {
    json!({"id": "admin-1", "email": "admin@selamsoftware.com",
           "displayName": "Selam Admin", "role": "ADMIN", "isActive": true})
}

pub fn jobs() -> Value {
    json!([
        {"id": "j-1", "title": "Backend Engineer", "department": "Engineering",
         "location": "Remote", "employmentType": "Full-time", "isPublished": true},
        {"id": "j-2", "title": "Product Designer", "department": "Design",
         "location": "Addis Ababa", "employmentType": "Contract"},
        {"id": "j-3", "title": "Support Lead", "department": "Operations",
         "location": "Nairobi", "employmentType": "Full-time", "isPublished": true}
    ])
}

pub fn applications(status: &str) -> Value {
    json!([
        {"id": "app-1", "jobId": "j-1", "candidateName": "Liya Haile",
         "candidateEmail": "liya@example.com", "status": status},
        {"id": "app-2", "jobId": "j-2", "candidateName": "Samuel Tesfaye",
         "candidateEmail": "samuel@example.com", "status": "SUBMITTED"}
    ])
}

pub fn products() -> Value {
    json!([
        {"slug": "acme-hr", "name": "Acme HR", "category": "HR", "status": "ACTIVE",
         "shortDescription": "People operations", "rating": 4.5, "usersCount": 120},
        {"slug": "acme-pay", "name": "Acme Pay", "category": "Finance",
         "status": "COMING_SOON"}
    ])
}

pub fn messages() -> Value {
    json!([
        {"id": "msg-1", "name": "Abebe", "email": "abebe@example.com",
         "subject": "Pricing", "message": "How much is Acme HR?", "status": "NEW"},
        {"id": "msg-2", "name": "Hana", "email": "hana@example.com",
         "subject": "Demo", "message": "Can we book a demo?", "status": "RESOLVED"}
    ])
}

/// `{"success": true}` with no data, as most mutations answer.
pub fn accepted() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({"success": true}))
}
