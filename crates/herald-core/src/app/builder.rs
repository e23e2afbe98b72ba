//! CampaignBuilder - Campaign の構築とワイヤリング
//!
//! # Fail-fast
//! - `expect_platforms()` で gateway が必須のプラットフォームを宣言する
//! - `build()` 時に「期待集合 ⊆ gateway 登録済み集合」をチェックし、
//!   不足があれば BuildError::MissingGateways を返す
//! - 設定値（HeraldConfig）の検証もここで行う

use std::sync::Arc;

use crate::app::{
    AnalyticsTracker, Campaign, ContentGenerationEngine, DistributionCoordinator, TaskClassifier,
};
use crate::config::HeraldConfig;
use crate::domain::{HeraldError, PlatformId, PlatformRegistry};
use crate::impls::{OsRandom, SimulatedMetrics};
use crate::ports::{
    Clock, Credentials, IdGenerator, MetricsSource, PlatformGateway, RandomSource, SystemClock,
    UlidGenerator,
};

/// 未指定の依存は本番向けのデフォルト（OsRandom, SystemClock, 組み込みプラットフォーム,
/// SimulatedMetrics）で埋められる。
///
/// ```ignore
/// let campaign = CampaignBuilder::new()
///     .gateway("tiktok", Arc::new(tiktok), Credentials::new("acct", "token"))
///     .expect_platforms(&["tiktok"])
///     .build()?;
/// ```
#[derive(Default)]
pub struct CampaignBuilder {
    config: HeraldConfig,
    registry: Option<Arc<PlatformRegistry>>,
    random: Option<Arc<dyn RandomSource>>,
    clock: Option<Arc<dyn Clock>>,
    ids: Option<Arc<dyn IdGenerator>>,
    metrics: Option<Arc<dyn MetricsSource>>,
    gateways: Vec<(PlatformId, Arc<dyn PlatformGateway>, Credentials)>,
    expected_platforms: Option<Vec<String>>,
}

#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Missing gateways for platforms: {0:?}. These platforms were expected but have no gateway.")]
    MissingGateways(Vec<String>),

    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] HeraldError),
}

impl CampaignBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(mut self, config: HeraldConfig) -> Self {
        self.config = config;
        self
    }

    pub fn registry(mut self, registry: Arc<PlatformRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn random(mut self, random: Arc<dyn RandomSource>) -> Self {
        self.random = Some(random);
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn id_generator(mut self, ids: Arc<dyn IdGenerator>) -> Self {
        self.ids = Some(ids);
        self
    }

    pub fn metrics_source(mut self, metrics: Arc<dyn MetricsSource>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Register the gateway used for `platform`. A later call for the same platform wins.
    pub fn gateway(
        mut self,
        platform: impl Into<PlatformId>,
        gateway: Arc<dyn PlatformGateway>,
        credentials: Credentials,
    ) -> Self {
        self.gateways.push((platform.into(), gateway, credentials));
        self
    }

    /// Platforms that must have a gateway when `build()` is called.
    pub fn expect_platforms(mut self, platforms: &[&str]) -> Self {
        self.expected_platforms = Some(platforms.iter().map(|p| p.to_string()).collect());
        self
    }

    pub fn build(self) -> Result<Campaign, BuildError> {
        self.config.validate()?;

        if let Some(expected) = &self.expected_platforms {
            let missing: Vec<String> = expected
                .iter()
                .filter(|p| !self.gateways.iter().any(|(id, _, _)| id.as_str() == p.as_str()))
                .cloned()
                .collect();
            if !missing.is_empty() {
                return Err(BuildError::MissingGateways(missing));
            }
        }

        let random = self.random.unwrap_or_else(|| Arc::new(OsRandom));
        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock));
        let ids = self
            .ids
            .unwrap_or_else(|| Arc::new(UlidGenerator::new(clock.clone())));
        let registry = self
            .registry
            .unwrap_or_else(|| Arc::new(PlatformRegistry::global().clone()));
        let metrics = self
            .metrics
            .unwrap_or_else(|| Arc::new(SimulatedMetrics::new(random.clone())));

        let coordinator = self.gateways.into_iter().fold(
            DistributionCoordinator::new(random.clone(), clock.clone(), self.config.throttle()),
            |c, (platform, gateway, credentials)| c.with_target(platform, gateway, credentials),
        );

        Ok(Campaign::new(
            ids.clone(),
            ContentGenerationEngine::new(registry, random.clone()),
            coordinator,
            AnalyticsTracker::new(metrics, random, clock.clone()),
            TaskClassifier::new(ids, clock),
            self.config,
        ))
    }
}
