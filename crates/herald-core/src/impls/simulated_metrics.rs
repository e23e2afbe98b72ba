//! SimulatedMetrics - 乱数でエンゲージメント数を作る
//!
//! 本番では analytics API からの取得に置き換える。返す形（EngagementCounts）が契約。

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{EngagementCounts, HeraldError, PlatformId, PostId};
use crate::ports::{MetricsSource, RandomSource};

/// 各カウントの上限（排他的）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountBounds {
    pub views: u64,
    pub likes: u64,
    pub shares: u64,
    pub comments: u64,
    pub click_throughs: u64,
    pub conversions: u64,
}

impl Default for CountBounds {
    fn default() -> Self {
        Self {
            views: 10_000,
            likes: 2_000,
            shares: 500,
            comments: 300,
            click_throughs: 800,
            conversions: 100,
        }
    }
}

pub struct SimulatedMetrics {
    random: Arc<dyn RandomSource>,
    bounds: CountBounds,
}

impl SimulatedMetrics {
    pub fn new(random: Arc<dyn RandomSource>) -> Self {
        Self {
            random,
            bounds: CountBounds::default(),
        }
    }

    pub fn with_bounds(mut self, bounds: CountBounds) -> Self {
        self.bounds = bounds;
        self
    }
}

#[async_trait]
impl MetricsSource for SimulatedMetrics {
    async fn fetch(
        &self,
        _platform: &PlatformId,
        _post_id: &PostId,
    ) -> Result<EngagementCounts, HeraldError> {
        let r = &self.random;
        let b = &self.bounds;
        Ok(EngagementCounts {
            views: r.below(b.views),
            likes: r.below(b.likes),
            shares: r.below(b.shares),
            comments: r.below(b.comments),
            click_throughs: r.below(b.click_throughs),
            conversions: r.below(b.conversions),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::impls::SeededRandom;

    #[tokio::test]
    async fn counts_respect_bounds() {
        let source = SimulatedMetrics::new(Arc::new(SeededRandom::new(3)));
        let platform = PlatformId::new("tiktok");
        let post = PostId::new("tiktok_20240101_000000_abcd1234");

        for _ in 0..200 {
            let c = source.fetch(&platform, &post).await.unwrap();
            assert!(c.views < 10_000);
            assert!(c.likes < 2_000);
            assert!(c.shares < 500);
            assert!(c.comments < 300);
            assert!(c.click_throughs < 800);
            assert!(c.conversions < 100);
        }
    }

    #[tokio::test]
    async fn zero_bounds_yield_zero_counts() {
        let bounds = CountBounds {
            views: 0,
            likes: 0,
            shares: 0,
            comments: 0,
            click_throughs: 0,
            conversions: 0,
        };
        let source = SimulatedMetrics::new(Arc::new(SeededRandom::new(3))).with_bounds(bounds);
        let c = source
            .fetch(&PlatformId::new("x"), &PostId::new("p"))
            .await
            .unwrap();
        assert_eq!(c, EngagementCounts::default());
    }
}
