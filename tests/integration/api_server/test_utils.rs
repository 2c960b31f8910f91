//! Test utilities for API server integration tests

use axum_test::TestServer;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;
use trendwatch::agents::Explainer;
use trendwatch::core::http::{create_router, AppState};
use trendwatch::metrics::Metrics;
use trendwatch::services::market_data::StaticMarketDataProvider;
use trendwatch::signals::SignalEngine;

use crate::fixtures::default_strategy;

/// Test helper for API server integration tests
#[allow(dead_code)]
pub struct TestApiServer {
    pub server: TestServer,
    pub metrics: Arc<Metrics>,
    pub watchlist_path: PathBuf,
    _dir: TempDir,
}

impl TestApiServer {
    pub async fn new(provider: StaticMarketDataProvider) -> Self {
        Self::build(provider, None)
    }

    pub async fn with_explainer(
        provider: StaticMarketDataProvider,
        explainer: Arc<dyn Explainer>,
    ) -> Self {
        Self::build(provider, Some(explainer))
    }

    fn build(provider: StaticMarketDataProvider, explainer: Option<Arc<dyn Explainer>>) -> Self {
        let dir = tempfile::tempdir().expect("temp dir");
        let watchlist_path = dir.path().join("watchlist.json");
        let metrics = Arc::new(Metrics::new().expect("metrics initialization"));
        let engine = Arc::new(SignalEngine::new(default_strategy(), Arc::new(provider)));

        let mut state = AppState::new(engine, metrics.clone(), watchlist_path.clone());
        if let Some(explainer) = explainer {
            state = state.with_explainer(explainer);
        }

        let app = create_router(state);
        let server = TestServer::new(app).expect("start test server");

        Self {
            server,
            metrics,
            watchlist_path,
            _dir: dir,
        }
    }
}
