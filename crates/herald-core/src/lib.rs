//! herald-core
//!
//! Core building blocks for Herald: content generation, throttled multi-platform
//! distribution, engagement analytics and task classification.
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（ids, platform, task, content, post, metrics, errors）
//! - **ports**: 抽象化レイヤー（PlatformGateway, MetricsSource, RandomSource, Clock, Cipher など）
//! - **app**: アプリケーションロジック（generator, distribution, analytics, classifier, campaign）
//! - **impls**: 実装（SimulatedGateway, SimulatedMetrics, AesGcmCipher など）
//! - **config**: 実行時設定（HeraldConfig）
//! - **observability**: 配信結果の集計ビュー

pub mod app;
pub mod config;
pub mod domain;
pub mod impls;
pub mod observability;
pub mod ports;

pub use app::{Campaign, CampaignBuilder, CampaignOutcome};
pub use config::HeraldConfig;
pub use domain::{HeraldError, Result};
