//! Campaign - 生成 → 配信 → 計測 → レポートを 1 回分まとめて実行する
//!
//! 各コンポーネントは独立に使えるので、Campaign はそれらを順番に呼ぶだけ。
//! 構築は CampaignBuilder 経由で行う。

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::watch;
use tracing::{info, warn};

use crate::app::{AnalyticsTracker, ContentGenerationEngine, DistributionCoordinator, TaskClassifier};
use crate::config::HeraldConfig;
use crate::domain::{
    BundleMap, CampaignId, EngagementMetrics, PerformanceReport, PlatformId, ResultMap, Task,
};
use crate::ports::IdGenerator;

/// Everything one `Campaign::run` produced.
#[derive(Debug, Clone, Serialize)]
pub struct CampaignOutcome {
    pub campaign_id: CampaignId,
    pub bundles: BundleMap,
    pub results: ResultMap,
    pub metrics: BTreeMap<PlatformId, EngagementMetrics>,
    pub report: PerformanceReport,
    /// Present when the config records a spend per run.
    pub roi: Option<f64>,
}

pub struct Campaign {
    ids: Arc<dyn IdGenerator>,
    engine: ContentGenerationEngine,
    coordinator: DistributionCoordinator,
    tracker: AnalyticsTracker,
    classifier: TaskClassifier,
    config: HeraldConfig,
}

impl Campaign {
    pub(crate) fn new(
        ids: Arc<dyn IdGenerator>,
        engine: ContentGenerationEngine,
        coordinator: DistributionCoordinator,
        tracker: AnalyticsTracker,
        classifier: TaskClassifier,
        config: HeraldConfig,
    ) -> Self {
        Self {
            ids,
            engine,
            coordinator,
            tracker,
            classifier,
            config,
        }
    }

    pub fn engine(&self) -> &ContentGenerationEngine {
        &self.engine
    }

    pub fn coordinator(&self) -> &DistributionCoordinator {
        &self.coordinator
    }

    pub fn tracker(&self) -> &AnalyticsTracker {
        &self.tracker
    }

    pub fn config(&self) -> &HeraldConfig {
        &self.config
    }

    pub fn classify(&self, description: &str) -> Task {
        self.classifier.classify(description)
    }

    pub async fn run(&self, topic: &str, audience: &str) -> CampaignOutcome {
        let (_shutdown_tx, shutdown_rx) = watch::channel(false);
        self.run_until(topic, audience, shutdown_rx).await
    }

    /// One full pass. `shutdown` is forwarded to distribution; whatever was posted
    /// before it fired is still tracked and reported.
    pub async fn run_until(
        &self,
        topic: &str,
        audience: &str,
        shutdown: watch::Receiver<bool>,
    ) -> CampaignOutcome {
        let campaign_id = self.ids.generate_campaign_id();
        info!(campaign_id = %campaign_id, topic, audience, "campaign started");

        let bundles = self.engine.generate(topic, audience);
        let results = self.coordinator.distribute_until(&bundles, shutdown).await;
        let metrics = self.tracker.track_results(&results).await;

        let mut roi = None;
        if let Some(spend) = self.config.campaign_spend {
            match self.tracker.record_spend(spend).await {
                Ok(()) => roi = self.tracker.campaign_roi(self.config.lifetime_value).await.ok(),
                Err(err) => warn!(campaign_id = %campaign_id, error = %err, "spend not recorded"),
            }
        }

        let report = self.tracker.generate_report().await;
        info!(
            campaign_id = %campaign_id,
            posted = results.values().filter(|r| r.success).count(),
            tracked = metrics.len(),
            aggregate_score = report.aggregate_score,
            "campaign finished"
        );

        CampaignOutcome {
            campaign_id,
            bundles,
            results,
            metrics,
            report,
            roi,
        }
    }
}
