//! # Common Test Utilities
//!
//! This module centralizes the test harness used across the `bizquery-server`
//! integration tests.
//!
//! - `TestApp::spawn`: a full application built from configuration, with the
//!   completion API pointed at an `httpmock::MockServer`.
//! - `TestApp::spawn_with_mock`: the same server with a scripted in-process AI
//!   provider, for tests that assert on the prompts or need several replies.

// Allow unused code because this is a test utility module, and not all
// functions might be used by every test file that includes it.
#![allow(unused)]

use anyhow::Result;
use axum::serve;
use bizquery::{
    config::{AgentConfig, AiConfig, AppConfig},
    AgentOptions, QueryAgent,
};
use bizquery_server::{
    router,
    state::{build_app_state, AppState},
};
use bizquery_test_utils::{MockAiProvider, TestSetup};
use httpmock::MockServer;
use reqwest::Client;
use std::{net::SocketAddr, sync::Arc};
use tokio::{net::TcpListener, task::JoinHandle};

pub const CHAT_PATH: &str = "/v1/chat/completions";

// --- Full Application Test Harness ---

/// A harness for end-to-end testing of the Axum server.
///
/// This struct spawns the server on a random available port over a temporary
/// database holding the Widget scenario.
pub struct TestApp {
    pub address: String,
    pub client: Client,
    pub mock_server: MockServer,
    pub app_state: AppState,
    pub setup: TestSetup,
    _server_handle: JoinHandle<()>,
    shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

/// The configuration used by `TestApp::spawn`. Interpretation is off so each
/// question makes exactly one completion call.
pub fn test_config(setup: &TestSetup, mock_server: &MockServer) -> AppConfig {
    AppConfig {
        port: 0,
        db_url: setup.db_url(),
        ai: AiConfig {
            provider: "local".to_string(),
            api_url: Some(mock_server.url(CHAT_PATH)),
            ..Default::default()
        },
        agent: AgentConfig {
            interpret_results: false,
            ..Default::default()
        },
    }
}

impl TestApp {
    /// Spawns the application server and returns a `TestApp` instance.
    pub async fn spawn() -> Result<Self> {
        let mock_server = MockServer::start_async().await;
        let setup = TestSetup::with_widget_scenario().await?;
        let config = test_config(&setup, &mock_server);
        let app_state = build_app_state(config).await?;
        Self::spawn_with_state(app_state, mock_server, setup).await
    }

    /// Spawns the server with a scripted AI provider in place of the HTTP one.
    pub async fn spawn_with_mock(provider: MockAiProvider, options: AgentOptions) -> Result<Self> {
        let mock_server = MockServer::start_async().await;
        let setup = TestSetup::with_widget_scenario().await?;
        let config = test_config(&setup, &mock_server);

        let agent = QueryAgent::builder()
            .ai_provider(Box::new(provider))
            .storage(Box::new(setup.provider.clone()))
            .options(options)
            .build()?;
        let app_state = AppState {
            config: Arc::new(config),
            sqlite_provider: Arc::new(setup.provider.clone()),
            agent: Arc::new(agent),
        };
        Self::spawn_with_state(app_state, mock_server, setup).await
    }

    pub async fn spawn_with_state(
        app_state: AppState,
        mock_server: MockServer,
        setup: TestSetup,
    ) -> Result<Self> {
        dotenvy::dotenv().ok();
        // `try_init` is used to prevent panic if the logger is already initialized.
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .compact()
            .try_init();

        let app_state_for_harness = app_state.clone();
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr: SocketAddr = listener.local_addr()?;
        let address = format!("http://{addr}");

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();
        let server_handle = tokio::spawn(async move {
            let app = router::create_router(app_state);
            let server = serve(listener, app).with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            });
            if let Err(e) = server.await {
                tracing::error!("[TestApp] Server error: {}", e);
            }
        });

        Ok(Self {
            address,
            client: Client::new(),
            mock_server,
            app_state: app_state_for_harness,
            setup,
            _server_handle: server_handle,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.address)
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
