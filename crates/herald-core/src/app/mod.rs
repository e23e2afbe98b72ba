//! App - アプリケーション層
//!
//! ports を組み合わせてマーケティングのパイプラインを実装します。
//!
//! # 主要コンポーネント
//! - **ContentGenerationEngine**: topic からプラットフォーム別の ContentBundle を生成
//! - **DistributionCoordinator**: throttle 付きで順番に投稿し、結果を記録
//! - **AnalyticsTracker**: エンゲージメント計測、ROI、パフォーマンスレポート
//! - **TaskClassifier**: タスク記述の complexity / capability 分類
//! - **CampaignBuilder / Campaign**: 上記のワイヤリングと 1 回分の実行

pub mod analytics;
pub mod builder;
pub mod campaign;
pub mod classifier;
pub mod distribution;
pub mod generator;

// 主要な型を再エクスポート
pub use self::analytics::AnalyticsTracker;
pub use self::builder::{BuildError, CampaignBuilder};
pub use self::campaign::{Campaign, CampaignOutcome};
pub use self::classifier::TaskClassifier;
pub use self::distribution::{DistributionCoordinator, PlatformTarget};
pub use self::generator::ContentGenerationEngine;
