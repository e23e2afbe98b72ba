//! SimulatedGateway - 開発用の投稿先
//!
//! 実際の API は呼ばず、常に成功する（`fail_with` を設定した場合を除く）。
//! 遅延を入れてタイムアウトや非同期の挙動を確認できる。

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::ContentBundle;
use crate::ports::{Credentials, PlatformError, PlatformGateway, RandomSource, Submission};

pub struct SimulatedGateway {
    random: Arc<dyn RandomSource>,
    latency: Duration,
    failure: Option<PlatformError>,
}

impl SimulatedGateway {
    pub fn new(random: Arc<dyn RandomSource>) -> Self {
        Self {
            random,
            latency: Duration::ZERO,
            failure: None,
        }
    }

    /// 投稿ごとに `latency` だけ待つ
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// 常にこのエラーを返す
    pub fn fail_with(mut self, error: PlatformError) -> Self {
        self.failure = Some(error);
        self
    }
}

#[async_trait]
impl PlatformGateway for SimulatedGateway {
    async fn submit(
        &self,
        bundle: &ContentBundle,
        credentials: &Credentials,
    ) -> Result<Submission, PlatformError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        if let Some(err) = &self.failure {
            return Err(err.clone());
        }
        debug!(
            platform = %bundle.platform,
            account = %credentials.account,
            "simulated submission accepted"
        );
        Ok(Submission {
            remote_post_id: format!("{}-{}", bundle.platform, self.random.hex_token(6)),
        })
    }
}
