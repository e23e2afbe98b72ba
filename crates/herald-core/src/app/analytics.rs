//! AnalyticsTracker - エンゲージメントの追跡・ROI・レポート
//!
//! 数値の取得は MetricsSource に任せ、ここでは派生値（engagement_rate,
//! virality_score, addiction_metric）の計算と履歴の集計だけを行う。

use std::collections::BTreeMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::domain::{
    EngagementMetrics, HeraldError, PerformanceReport, PlatformId, PostId, ReportSource,
    ResultMap,
};
use crate::ports::{Clock, MetricsSource, RandomSource};

/// Upper bound (exclusive) of the jitter added to `virality_score`.
pub const VIRALITY_JITTER: f64 = 3.0;

/// Upper bound (exclusive) of the jitter added to `addiction_metric`.
pub const ADDICTION_JITTER: f64 = 4.0;

#[derive(Default)]
struct TrackerState {
    metrics: Vec<EngagementMetrics>,
    /// platform -> last error message
    failures: BTreeMap<PlatformId, String>,
    spend: f64,
}

pub struct AnalyticsTracker {
    source: Arc<dyn MetricsSource>,
    random: Arc<dyn RandomSource>,
    clock: Arc<dyn Clock>,
    state: Mutex<TrackerState>,
}

impl AnalyticsTracker {
    pub fn new(
        source: Arc<dyn MetricsSource>,
        random: Arc<dyn RandomSource>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            source,
            random,
            clock,
            state: Mutex::new(TrackerState::default()),
        }
    }

    /// Pull counts for one post and derive its metrics. The result is kept for reports.
    pub async fn track(
        &self,
        platform: &PlatformId,
        post_id: &PostId,
    ) -> Result<EngagementMetrics, HeraldError> {
        let counts = self.source.fetch(platform, post_id).await?;
        let metrics = EngagementMetrics::derive(
            platform.clone(),
            post_id.clone(),
            counts,
            self.random.uniform(0.0, VIRALITY_JITTER),
            self.random.uniform(0.0, ADDICTION_JITTER),
            self.clock.now(),
        );
        debug!(
            platform = %platform,
            post_id = %post_id,
            engagement_rate = metrics.engagement_rate,
            "tracked engagement"
        );
        self.state.lock().await.metrics.push(metrics.clone());
        Ok(metrics)
    }

    /// Track every successful result; failed ones are remembered for recommendations
    /// until a later result for the same platform succeeds.
    /// A metrics failure for one platform only drops that platform from the output.
    pub async fn track_results(&self, results: &ResultMap) -> BTreeMap<PlatformId, EngagementMetrics> {
        let mut tracked = BTreeMap::new();
        for (platform, result) in results {
            let Some(post_id) = result.post_id.as_ref().filter(|_| result.success) else {
                let message = result.error.clone().unwrap_or_default();
                self.state
                    .lock()
                    .await
                    .failures
                    .insert(platform.clone(), message);
                continue;
            };
            self.state.lock().await.failures.remove(platform);
            match self.track(platform, post_id).await {
                Ok(metrics) => {
                    tracked.insert(platform.clone(), metrics);
                }
                Err(err) => warn!(platform = %platform, error = %err, "tracking failed"),
            }
        }
        tracked
    }

    /// Add campaign spend used for customer acquisition cost.
    pub async fn record_spend(&self, amount: f64) -> Result<(), HeraldError> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(HeraldError::invalid_input(format!(
                "spend must be positive, got {amount}"
            )));
        }
        self.state.lock().await.spend += amount;
        Ok(())
    }

    /// ROI of everything tracked so far against the recorded spend.
    pub async fn campaign_roi(&self, lifetime_value: f64) -> Result<f64, HeraldError> {
        let state = self.state.lock().await;
        let conversions = state.metrics.iter().map(|m| m.conversions).sum();
        Self::calculate_roi(state.spend, conversions, lifetime_value)
    }

    /// `((conversions * lifetime_value) - investment) / investment * 100`,
    /// rounded to 2 decimals and floored at 0.
    pub fn calculate_roi(
        investment: f64,
        conversions: u64,
        lifetime_value: f64,
    ) -> Result<f64, HeraldError> {
        if !investment.is_finite() || investment <= 0.0 {
            return Err(HeraldError::invalid_input(format!(
                "investment must be positive, got {investment}"
            )));
        }
        let revenue = conversions as f64 * lifetime_value;
        let roi = (revenue - investment) / investment * 100.0;
        Ok(round2(roi.max(0.0)))
    }

    /// Aggregate report over tracked history, or the default snapshot when nothing
    /// has been tracked or recorded yet.
    pub async fn generate_report(&self) -> PerformanceReport {
        let state = self.state.lock().await;
        if state.metrics.is_empty() && state.failures.is_empty() {
            return PerformanceReport::default_snapshot();
        }
        build_report(&state)
    }

    /// Snapshot of tracked metrics, oldest first.
    pub async fn history(&self) -> Vec<EngagementMetrics> {
        self.state.lock().await.metrics.clone()
    }
}

fn build_report(state: &TrackerState) -> PerformanceReport {
    let metrics = &state.metrics;
    let n = metrics.len();

    let mut per_platform: BTreeMap<&PlatformId, (f64, usize)> = BTreeMap::new();
    for m in metrics {
        let entry = per_platform.entry(&m.platform).or_insert((0.0, 0));
        entry.0 += m.engagement_rate;
        entry.1 += 1;
    }
    let platform_means: Vec<(&PlatformId, f64)> = per_platform
        .into_iter()
        .map(|(p, (sum, count))| (p, sum / count as f64))
        .collect();

    let top_platform = platform_means
        .iter()
        .fold(None::<(&PlatformId, f64)>, |best, &(p, rate)| match best {
            Some((_, best_rate)) if best_rate >= rate => best,
            _ => Some((p, rate)),
        })
        .map(|(p, _)| p.clone());

    let overall_mean = mean(metrics.iter().map(|m| m.engagement_rate), n);
    let conversions: u64 = metrics.iter().map(|m| m.conversions).sum();
    let clicks: u64 = metrics.iter().map(|m| m.click_throughs).sum();

    let conversion_rate = if clicks == 0 {
        0.0
    } else {
        round2(conversions as f64 / clicks as f64 * 100.0)
    };
    let customer_acquisition_cost = if conversions == 0 || state.spend <= 0.0 {
        0.0
    } else {
        round2(state.spend / conversions as f64)
    };

    let mut recommendations = Vec::new();
    if let Some(top) = &top_platform {
        recommendations.push(format!("Increase {top} content frequency"));
    }
    for (platform, platform_mean) in &platform_means {
        if Some(*platform) != top_platform.as_ref() && *platform_mean < overall_mean {
            recommendations.push(format!("Add more urgency to {platform} posts"));
        }
    }
    for (platform, error) in &state.failures {
        recommendations.push(format!("Retry distribution to {platform}: {error}"));
    }

    PerformanceReport {
        aggregate_score: round2(mean(metrics.iter().map(|m| m.virality_score), n) * 10.0),
        top_platform,
        conversion_rate,
        customer_acquisition_cost,
        addiction_effectiveness: round2(mean(metrics.iter().map(|m| m.addiction_metric), n)),
        tracked_posts: n,
        recommendations,
        source: ReportSource::History,
    }
}

fn mean(values: impl Iterator<Item = f64>, n: usize) -> f64 {
    if n == 0 { 0.0 } else { values.sum::<f64>() / n as f64 }
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
