//! Wiring shared by the binaries.

use crate::agents::{build_explainer, Explainer};
use crate::config::{AppConfig, Settings};
use crate::core::monitor::StockMonitor;
use crate::metrics::Metrics;
use crate::models::strategy::StrategyConfig;
use crate::notifiers::NotificationManager;
use crate::services::market_data::MarketDataProvider;
use crate::services::sina::SinaMarketDataProvider;
use crate::signals::SignalEngine;
use std::sync::Arc;
use tracing::{info, warn};

/// Everything a process needs to evaluate and report signals.
pub struct Components {
    pub settings: Settings,
    pub strategy: Arc<StrategyConfig>,
    pub app: AppConfig,
    pub engine: Arc<SignalEngine>,
    pub metrics: Arc<Metrics>,
    pub explainer: Option<Arc<dyn Explainer>>,
}

impl Components {
    /// Load configuration and build the engine. A missing or invalid strategy is fatal.
    pub fn load(settings: Settings) -> Result<Self, Box<dyn std::error::Error>> {
        let strategy = Arc::new(StrategyConfig::from_file(&settings.strategy_config_path)?);
        info!(
            path = %settings.strategy_config_path.display(),
            strategy = %strategy.strategy.name,
            "Strategy loaded"
        );

        let app = AppConfig::load_or_default(&settings.app_config_path)?;

        let provider: Arc<dyn MarketDataProvider> = Arc::new(SinaMarketDataProvider::with_base_url(
            settings.market_data_base_url.clone(),
        )?);
        let engine = Arc::new(
            SignalEngine::new(strategy.clone(), provider).with_bar_limit(settings.market_data_bars),
        );

        let explainer: Option<Arc<dyn Explainer>> = if app.llm.enabled {
            match build_explainer(&app.llm) {
                Ok(explainer) => Some(Arc::from(explainer)),
                Err(e) => {
                    warn!(error = %e, "LLM explainer unavailable, continuing without it");
                    None
                }
            }
        } else {
            None
        };

        Ok(Self {
            settings,
            strategy,
            app,
            engine,
            metrics: Arc::new(Metrics::new()?),
            explainer,
        })
    }

    pub fn notification_manager(&self) -> NotificationManager {
        let manager = NotificationManager::from_config(&self.app.notification, reqwest::Client::new());
        info!(
            channels = manager.channel_count(),
            "Notification manager ready with {} channel(s)",
            manager.channel_count()
        );
        manager
    }

    pub fn monitor(&self) -> StockMonitor {
        let monitor = StockMonitor::new(
            self.engine.clone(),
            Arc::new(self.notification_manager()),
            self.metrics.clone(),
            self.settings.watchlist_path.clone(),
            self.settings.index_pool_path.clone(),
        )
        .with_delay(self.settings.monitor_delay);
        match &self.explainer {
            Some(explainer) => monitor.with_explainer(explainer.clone()),
            None => monitor,
        }
    }
}
