//! DistributionCoordinator - バンドルを各プラットフォームへ順番に投稿する
//!
//! # 不変条件
//! - 1 プラットフォームの失敗は他のプラットフォームの結果に影響しない
//!   （失敗も gateway の panic も `success=false` の PostResult になり、バッチは中断しない）
//! - 連続する投稿の間には必ず `throttle` 以上の間隔を空ける。間隔は coordinator が持つ
//!   単一レーンで管理するので、バッチをまたいでも、並行する呼び出し同士でも守られる
//! - 履歴は append-only。Mutex で保護しているので共有しても良い
//!
//! # キャンセル
//! `distribute_until` の shutdown はプラットフォームの合間（throttle 待ち中を含む）
//! にだけ確認する。投稿中のリクエストは中断しない。
//!
//! 並列化する場合は全体の throttle をプラットフォームごとの rate limiter に置き換えること。

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, watch};
use tokio::task::JoinError;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::domain::{
    BundleMap, ContentBundle, HeraldError, PlatformId, PostId, PostResult, ResultMap,
    TrackingRecord,
};
use crate::observability::DistributionCounts;
use crate::ports::{Clock, Credentials, PlatformError, PlatformGateway, RandomSource};

/// 投稿先 1 つ分（gateway + 認証情報）
#[derive(Clone)]
pub struct PlatformTarget {
    pub gateway: Arc<dyn PlatformGateway>,
    pub credentials: Credentials,
}

pub struct DistributionCoordinator {
    targets: BTreeMap<PlatformId, PlatformTarget>,
    throttle: Duration,
    random: Arc<dyn RandomSource>,
    clock: Arc<dyn Clock>,
    /// 前回の投稿が終わった時刻。バッチの間ずっとロックする
    lane: Mutex<Option<Instant>>,
    history: Mutex<Vec<PostResult>>,
}

impl DistributionCoordinator {
    pub fn new(random: Arc<dyn RandomSource>, clock: Arc<dyn Clock>, throttle: Duration) -> Self {
        Self {
            targets: BTreeMap::new(),
            throttle,
            random,
            clock,
            lane: Mutex::new(None),
            history: Mutex::new(Vec::new()),
        }
    }

    /// Register (or replace) the target for a platform.
    pub fn with_target(
        mut self,
        platform: impl Into<PlatformId>,
        gateway: Arc<dyn PlatformGateway>,
        credentials: Credentials,
    ) -> Self {
        self.targets.insert(
            platform.into(),
            PlatformTarget {
                gateway,
                credentials,
            },
        );
        self
    }

    pub fn throttle(&self) -> Duration {
        self.throttle
    }

    pub fn supported_platforms(&self) -> Vec<PlatformId> {
        self.targets.keys().cloned().collect()
    }

    pub fn supports(&self, platform: &PlatformId) -> bool {
        self.targets.contains_key(platform)
    }

    /// Keys of `bundles` that `distribute` would ignore.
    pub fn unsupported(&self, bundles: &BundleMap) -> Vec<PlatformId> {
        bundles
            .keys()
            .filter(|p| !self.supports(p))
            .cloned()
            .collect()
    }

    /// Strict check for callers that do not want the permissive default.
    pub fn check_supported(&self, bundles: &BundleMap) -> Result<(), HeraldError> {
        match self.unsupported(bundles).into_iter().next() {
            Some(platform) => Err(HeraldError::UnsupportedPlatform(platform)),
            None => Ok(()),
        }
    }

    /// Submit every supported bundle. Never fails as a whole.
    pub async fn distribute(&self, bundles: &BundleMap) -> ResultMap {
        let (_shutdown_tx, shutdown_rx) = watch::channel(false);
        self.distribute_until(bundles, shutdown_rx).await
    }

    /// Like `distribute`, but stops before the next platform once `shutdown` turns true.
    /// Platforms not reached are absent from the result.
    ///
    /// Concurrent callers queue on the lane; a batch starts only after the previous
    /// one has finished.
    pub async fn distribute_until(
        &self,
        bundles: &BundleMap,
        mut shutdown: watch::Receiver<bool>,
    ) -> ResultMap {
        let mut results = BTreeMap::new();
        let mut last_submission = self.lane.lock().await;

        for (platform, bundle) in bundles {
            let Some(target) = self.targets.get(platform) else {
                debug!(
                    platform = %platform,
                    reason = %HeraldError::UnsupportedPlatform(platform.clone()),
                    "skipping bundle"
                );
                continue;
            };

            if let Some(last) = *last_submission {
                tokio::select! {
                    _ = tokio::time::sleep_until(last + self.throttle) => {}
                    _ = cancelled(&mut shutdown) => {}
                }
            }
            if *shutdown.borrow() {
                info!(remaining_from = %platform, "distribution cancelled");
                break;
            }

            let result = self.submit_one(platform, bundle, target).await;
            *last_submission = Some(Instant::now());

            self.history.lock().await.push(result.clone());
            results.insert(platform.clone(), result);
        }

        let counts = DistributionCounts::from_results(results.values());
        info!(
            attempted = counts.attempted,
            succeeded = counts.succeeded,
            failed = counts.failed,
            "distribution batch finished"
        );
        results
    }

    async fn submit_one(
        &self,
        platform: &PlatformId,
        bundle: &ContentBundle,
        target: &PlatformTarget,
    ) -> PostResult {
        // 別タスクで投稿し、gateway の panic をこのプラットフォームの失敗に閉じ込める
        let gateway = Arc::clone(&target.gateway);
        let credentials = target.credentials.clone();
        let owned = bundle.clone();
        let outcome = tokio::spawn(async move { gateway.submit(&owned, &credentials).await })
            .await
            .unwrap_or_else(|err| Err(PlatformError::Panicked(panic_message(err))));
        let posted_at = self.clock.now();

        match outcome {
            Ok(submission) => {
                let post_id = PostId::compose(platform, posted_at, &self.random.hex_token(4));
                let tracking = TrackingRecord::zeroed(platform, &self.random.hex_token(8));
                info!(platform = %platform, post_id = %post_id, "posted");
                PostResult::succeeded(
                    platform.clone(),
                    post_id,
                    submission.remote_post_id,
                    tracking,
                    posted_at,
                    bundle.addiction_score,
                )
            }
            Err(err) => {
                warn!(platform = %platform, error = %err, "submission failed");
                PostResult::failed(platform.clone(), err.to_string(), posted_at, bundle.addiction_score)
            }
        }
    }

    /// Snapshot of every result recorded so far, oldest first.
    pub async fn history(&self) -> Vec<PostResult> {
        self.history.lock().await.clone()
    }

    pub async fn counts(&self) -> DistributionCounts {
        DistributionCounts::from_results(self.history.lock().await.iter())
    }
}

fn panic_message(err: JoinError) -> String {
    match err.try_into_panic() {
        Ok(payload) => payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "non-string panic payload".to_string()),
        Err(err) => err.to_string(),
    }
}

/// Resolves once the flag is true. A dropped sender means "never".
async fn cancelled(rx: &mut watch::Receiver<bool>) {
    loop {
        if *rx.borrow_and_update() {
            return;
        }
        if rx.changed().await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}
