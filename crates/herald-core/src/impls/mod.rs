//! Impls - ports の実装（開発用・テスト用 + 暗号）
//!
//! # 含まれる実装
//! - **OsRandom / SeededRandom**: RandomSource
//! - **SimulatedGateway**: 常に成功する投稿先（失敗・遅延を注入可能）
//! - **SimulatedMetrics**: 乱数でエンゲージメント数を返す MetricsSource
//! - **AesGcmCipher**: AES-256-GCM + SHA-256 の Cipher
//!
//! 実際のプラットフォーム API 実装はこのクレートの対象外です。

pub mod aes_cipher;
pub mod random;
pub mod simulated_gateway;
pub mod simulated_metrics;

pub use self::aes_cipher::{AesGcmCipher, SealedPayload};
pub use self::random::{OsRandom, SeededRandom};
pub use self::simulated_gateway::SimulatedGateway;
pub use self::simulated_metrics::{CountBounds, SimulatedMetrics};
