//! Engagement metrics and the aggregate performance report.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::platform::PlatformId;
use super::post::PostId;

/// Hard cap for `virality_score`.
pub const VIRALITY_CAP: f64 = 9.9;

/// Hard cap for `addiction_metric`.
pub const ADDICTION_CAP: f64 = 9.8;

/// Raw counts as pulled from a metrics source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngagementCounts {
    pub views: u64,
    pub likes: u64,
    pub shares: u64,
    pub comments: u64,
    pub click_throughs: u64,
    pub conversions: u64,
}

impl EngagementCounts {
    /// `(likes + shares + comments) / max(views, 1) * 100`
    pub fn engagement_rate(&self) -> f64 {
        let interactions = self
            .likes
            .saturating_add(self.shares)
            .saturating_add(self.comments) as f64;
        interactions / self.views.max(1) as f64 * 100.0
    }
}

/// Metrics for one tracked post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngagementMetrics {
    pub platform: PlatformId,
    pub post_id: PostId,
    pub views: u64,
    pub likes: u64,
    pub shares: u64,
    pub comments: u64,
    pub click_throughs: u64,
    pub engagement_rate: f64,
    pub conversions: u64,
    /// `<= VIRALITY_CAP`
    pub virality_score: f64,
    /// `<= ADDICTION_CAP`
    pub addiction_metric: f64,
    pub timestamp: DateTime<Utc>,
}

impl EngagementMetrics {
    /// Derive the rates from raw counts. Jitters are added before capping.
    pub fn derive(
        platform: PlatformId,
        post_id: PostId,
        counts: EngagementCounts,
        virality_jitter: f64,
        addiction_jitter: f64,
        timestamp: DateTime<Utc>,
    ) -> Self {
        let engagement_rate = counts.engagement_rate();
        Self {
            platform,
            post_id,
            views: counts.views,
            likes: counts.likes,
            shares: counts.shares,
            comments: counts.comments,
            click_throughs: counts.click_throughs,
            engagement_rate,
            conversions: counts.conversions,
            virality_score: cap(engagement_rate / 10.0 + virality_jitter, VIRALITY_CAP),
            addiction_metric: cap(engagement_rate / 15.0 + addiction_jitter, ADDICTION_CAP),
            timestamp,
        }
    }

    pub fn counts(&self) -> EngagementCounts {
        EngagementCounts {
            views: self.views,
            likes: self.likes,
            shares: self.shares,
            comments: self.comments,
            click_throughs: self.click_throughs,
            conversions: self.conversions,
        }
    }
}

// NaN jitter must not escape the cap.
fn cap(value: f64, max: f64) -> f64 {
    if value.is_nan() { max } else { value.min(max) }
}

/// Where a report's numbers came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportSource {
    /// Aggregated from tracked metrics.
    History,
    /// Fixed illustrative values; nothing has been tracked yet.
    DefaultSnapshot,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceReport {
    pub aggregate_score: f64,
    pub top_platform: Option<PlatformId>,
    pub conversion_rate: f64,
    pub customer_acquisition_cost: f64,
    pub addiction_effectiveness: f64,
    pub tracked_posts: usize,
    pub recommendations: Vec<String>,
    pub source: ReportSource,
}

impl PerformanceReport {
    /// Returned when no metrics have been tracked.
    pub fn default_snapshot() -> Self {
        Self {
            aggregate_score: 87.5,
            top_platform: Some(PlatformId::new("tiktok")),
            conversion_rate: 15.3,
            customer_acquisition_cost: 12.75,
            addiction_effectiveness: 8.9,
            tracked_posts: 0,
            recommendations: vec![
                "Increase TikTok content frequency".to_string(),
                "Add more urgency to Instagram posts".to_string(),
                "Optimize YouTube Shorts for mobile".to_string(),
            ],
            source: ReportSource::DefaultSnapshot,
        }
    }
}
