//! Distribution results.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::errors::HeraldError;
use super::platform::PlatformId;

/// Identifier of a published post: `<platform>_<YYYYmmdd_HHMMSS>_<hex>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(String);

impl PostId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn compose(platform: &PlatformId, at: DateTime<Utc>, suffix: &str) -> Self {
        Self(format!("{}_{}_{}", platform, at.format("%Y%m%d_%H%M%S"), suffix))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Zeroed engagement record created alongside a successful post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackingRecord {
    /// `track_<platform>_<hex>`
    pub tracking_id: String,
    pub views: u64,
    pub engagement_rate: f64,
    pub conversions: u64,
    pub virality_score: f64,
    pub addiction_metric: f64,
}

impl TrackingRecord {
    pub fn zeroed(platform: &PlatformId, suffix: &str) -> Self {
        Self {
            tracking_id: format!("track_{platform}_{suffix}"),
            views: 0,
            engagement_rate: 0.0,
            conversions: 0,
            virality_score: 0.0,
            addiction_metric: 0.0,
        }
    }
}

/// Outcome of submitting one bundle to one platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostResult {
    pub platform: PlatformId,
    pub success: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_id: Option<PostId>,

    /// Identifier reported back by the platform itself.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_post_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracking: Option<TrackingRecord>,

    pub posted_at: DateTime<Utc>,

    /// Copied from the bundle's `addiction_score`.
    pub quality_score: f64,
}

impl PostResult {
    pub fn succeeded(
        platform: PlatformId,
        post_id: PostId,
        remote_post_id: String,
        tracking: TrackingRecord,
        posted_at: DateTime<Utc>,
        quality_score: f64,
    ) -> Self {
        Self {
            platform,
            success: true,
            post_id: Some(post_id),
            remote_post_id: Some(remote_post_id),
            error: None,
            tracking: Some(tracking),
            posted_at,
            quality_score,
        }
    }

    pub fn failed(
        platform: PlatformId,
        error: impl Into<String>,
        posted_at: DateTime<Utc>,
        quality_score: f64,
    ) -> Self {
        Self {
            platform,
            success: false,
            post_id: None,
            remote_post_id: None,
            error: Some(error.into()),
            tracking: None,
            posted_at,
            quality_score,
        }
    }

    /// The failure as a domain error, if this submission failed.
    pub fn failure(&self) -> Option<HeraldError> {
        if self.success {
            return None;
        }
        Some(HeraldError::PlatformSubmission {
            platform: self.platform.clone(),
            message: self.error.clone().unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn post_id_embeds_platform_and_timestamp() {
        let at = Utc.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap();
        let id = PostId::compose(&PlatformId::new("tiktok"), at, "deadbeef");
        assert_eq!(id.as_str(), "tiktok_20240309_070501_deadbeef");
    }

    #[test]
    fn failed_result_exposes_domain_error() {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let result = PostResult::failed(PlatformId::new("twitter"), "quota exceeded", at, 7.8);

        assert!(!result.success);
        assert!(result.post_id.is_none());
        assert_eq!(
            result.failure(),
            Some(HeraldError::PlatformSubmission {
                platform: PlatformId::new("twitter"),
                message: "quota exceeded".into(),
            })
        );
    }

    #[test]
    fn successful_result_has_zeroed_tracking() {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let platform = PlatformId::new("youtube");
        let result = PostResult::succeeded(
            platform.clone(),
            PostId::compose(&platform, at, "00ff00ff"),
            "yt-1".into(),
            TrackingRecord::zeroed(&platform, "0011223344556677"),
            at,
            8.2,
        );

        assert!(result.failure().is_none());
        let tracking = result.tracking.unwrap();
        assert_eq!(tracking.tracking_id, "track_youtube_0011223344556677");
        assert_eq!(tracking.views, 0);
        assert_eq!(tracking.engagement_rate, 0.0);
    }
}
