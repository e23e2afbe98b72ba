//! PlatformGateway port - 外部プラットフォームへの投稿
//!
//! 実際の API プロトコルはこのクレートの対象外です。coordinator はこの trait
//! だけを通して投稿します。タイムアウトは gateway 側の責務で、
//! `PlatformError::Timeout` として返します。

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::ContentBundle;

/// プラットフォームごとの認証情報
///
/// Debug では token を伏せる。
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub account: String,
    token: String,
}

impl Credentials {
    pub fn new(account: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            account: account.into(),
            token: token.into(),
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("account", &self.account)
            .field("token", &"***")
            .finish()
    }
}

/// 投稿成功時にプラットフォームが返すもの
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub remote_post_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlatformError {
    #[error("rejected by platform: {0}")]
    Rejected(String),

    #[error("timed out after {0:?}")]
    Timeout(Duration),

    #[error("unauthorized")]
    Unauthorized,

    #[error("transport error: {0}")]
    Transport(String),

    /// The gateway panicked while submitting.
    #[error("gateway panicked: {0}")]
    Panicked(String),
}

/// PlatformGateway は 1 プラットフォームへの投稿能力
///
/// # Thread Safety
/// - coordinator が `Arc<dyn PlatformGateway>` で保持するので `Send + Sync`
#[async_trait]
pub trait PlatformGateway: Send + Sync {
    async fn submit(
        &self,
        bundle: &ContentBundle,
        credentials: &Credentials,
    ) -> Result<Submission, PlatformError>;
}
