//! Errors - ドメインエラー
//!
//! 分類:
//! - InvalidInput: 入力検証エラー（例: 投資額が 0 以下の ROI 計算）
//! - PlatformSubmission: 単一プラットフォームへの投稿失敗（致命的ではない）
//! - UnsupportedPlatform: coordinator が知らないプラットフォーム
//! - Metrics: メトリクス取得の失敗

use thiserror::Error;

use super::platform::PlatformId;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum HeraldError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Only ever materialized inside a failed `PostResult`; `distribute` never returns it.
    #[error("submission to {platform} failed: {message}")]
    PlatformSubmission { platform: PlatformId, message: String },

    /// Unknown keys are ignored by the coordinator (permissive policy).
    /// Kept for callers that want to validate a bundle map up front.
    #[error("unsupported platform: {0}")]
    UnsupportedPlatform(PlatformId),

    #[error("metrics unavailable: {0}")]
    Metrics(String),
}

impl HeraldError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Is this a validation failure of caller-supplied input?
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, HeraldError::InvalidInput(_))
    }
}

pub type Result<T, E = HeraldError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submission_error_names_platform() {
        let err = HeraldError::PlatformSubmission {
            platform: PlatformId::new("tiktok"),
            message: "rate limited".to_string(),
        };
        assert_eq!(err.to_string(), "submission to tiktok failed: rate limited");
    }

    #[test]
    fn invalid_input_is_classified() {
        assert!(HeraldError::invalid_input("investment must be positive").is_invalid_input());
        assert!(!HeraldError::Metrics("down".into()).is_invalid_input());
    }
}
