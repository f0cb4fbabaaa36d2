//! Common test utilities for E2E tests

#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use statusd::data::{Document, PagedQuery, PagedResult, StatusStore, StoreError};
use statusd::{AppState, config};
use tokio::net::TcpListener;

pub const SESSION_SECRET: &str = "test-secret-key-32-bytes-long!!!";

mockall::mock! {
    /// Scriptable document store
    pub Store {}

    #[async_trait]
    impl StatusStore for Store {
        async fn paged_find(&self, query: PagedQuery) -> Result<PagedResult, StoreError>;
        async fn find_by_id(&self, id: &str) -> Result<Option<Document>, StoreError>;
        async fn create(&self, pivot: &str, name: &str) -> Result<Document, StoreError>;
        async fn find_by_id_and_update(
            &self,
            id: &str,
            update: Document,
        ) -> Result<Option<Document>, StoreError>;
        async fn find_by_id_and_remove(&self, id: &str) -> Result<u64, StoreError>;
    }
}

/// Build a `Document` from a JSON object literal
pub fn document(value: serde_json::Value) -> Document {
    match value {
        serde_json::Value::Object(map) => map,
        other => panic!("expected a JSON object, got {other}"),
    }
}

pub fn test_config() -> config::AppConfig {
    config::AppConfig {
        server: config::ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0, // Let OS assign port
            cors_origin: None,
        },
        auth: config::AuthConfig {
            session_secret: SESSION_SECRET.to_string(),
            session_max_age: 3600,
            admin_username: "admin".to_string(),
        },
        pagination: config::PaginationConfig {
            default_limit: 20,
            max_limit: 100,
        },
        logging: config::LoggingConfig {
            level: "info".to_string(),
            format: "pretty".to_string(),
        },
    }
}

/// Test server instance
pub struct TestServer {
    pub addr: String,
    pub state: AppState,
    pub client: reqwest::Client,
}

impl TestServer {
    /// Start a server over a scripted store
    pub async fn new(store: MockStore) -> Self {
        Self::with_store(Arc::new(store)).await
    }

    /// Start a server over any store
    pub async fn with_store(store: Arc<dyn StatusStore>) -> Self {
        let state = AppState::with_store(test_config(), store);

        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .unwrap();

        // Bind to random port
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let app = statusd::build_router(state.clone());
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            addr: format!("http://{}", addr),
            state,
            client,
        }
    }

    /// Get base URL for API requests
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.addr, path)
    }

    /// Signed session token with the admin scope
    pub fn admin_token(&self) -> String {
        use statusd::auth::{Session, create_session_token};

        let session = Session::admin("admin", 3600);
        create_session_token(&session, &self.state.config.auth.session_secret)
            .expect("Failed to create test token")
    }

    /// Signed session token without any scope
    pub fn user_token(&self) -> String {
        use statusd::auth::{Session, create_session_token};

        let mut session = Session::admin("reader", 3600);
        session.scope.clear();
        create_session_token(&session, &self.state.config.auth.session_secret)
            .expect("Failed to create test token")
    }

    /// Request builder with admin credentials attached
    pub fn admin(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        self.client
            .request(method, self.url(path))
            .header("Authorization", format!("Bearer {}", self.admin_token()))
    }
}
