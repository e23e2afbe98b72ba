//! Ports - 抽象化レイヤー
//!
//! このモジュールは Hexagonal Architecture の「ポート」を定義します。
//! 外部のプラットフォーム API・メトリクス取得・乱数・時刻への依存は
//! すべてここの trait を通し、実装の詳細を隠蔽します。

pub mod cipher;
pub mod clock;
pub mod gateway;
pub mod id_generator;
pub mod metrics_source;
pub mod random;

// 主要な trait を再エクスポート
pub use self::cipher::{Cipher, CipherError};
pub use self::clock::{Clock, FixedClock, SystemClock};
pub use self::gateway::{Credentials, PlatformError, PlatformGateway, Submission};
pub use self::id_generator::{IdGenerator, UlidGenerator};
pub use self::metrics_source::MetricsSource;
pub use self::random::RandomSource;
