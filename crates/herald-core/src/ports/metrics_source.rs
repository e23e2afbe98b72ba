//! MetricsSource port - エンゲージメント数の取得
//!
//! 本番では各プラットフォームの analytics API から取得する。
//! このクレートでは `impls::SimulatedMetrics` が乱数で代用する。

use async_trait::async_trait;

use crate::domain::{EngagementCounts, HeraldError, PlatformId, PostId};

#[async_trait]
pub trait MetricsSource: Send + Sync {
    async fn fetch(
        &self,
        platform: &PlatformId,
        post_id: &PostId,
    ) -> Result<EngagementCounts, HeraldError>;
}
