//! Runtime settings.
//!
//! Built in code or deserialized (JSON, etc.) by the embedding application.
//! Loading from files or the environment is left to the caller.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::HeraldError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeraldConfig {
    /// Minimum spacing between consecutive submissions, in milliseconds.
    pub throttle_ms: u64,

    /// Customer lifetime value used for ROI in campaign reports.
    pub lifetime_value: f64,

    /// Spend recorded per campaign run. `None` means no spend is recorded.
    pub campaign_spend: Option<f64>,
}

impl Default for HeraldConfig {
    fn default() -> Self {
        Self {
            throttle_ms: 2_000,
            lifetime_value: 100.0,
            campaign_spend: None,
        }
    }
}

impl HeraldConfig {
    pub fn throttle(&self) -> Duration {
        Duration::from_millis(self.throttle_ms)
    }

    pub fn with_throttle(mut self, throttle: Duration) -> Self {
        self.throttle_ms = throttle.as_millis().min(u64::MAX as u128) as u64;
        self
    }

    pub fn with_campaign_spend(mut self, spend: f64) -> Self {
        self.campaign_spend = Some(spend);
        self
    }

    pub fn validate(&self) -> Result<(), HeraldError> {
        if !self.lifetime_value.is_finite() || self.lifetime_value < 0.0 {
            return Err(HeraldError::invalid_input(format!(
                "lifetime_value must be a non-negative number, got {}",
                self.lifetime_value
            )));
        }
        if let Some(spend) = self.campaign_spend
            && (!spend.is_finite() || spend <= 0.0)
        {
            return Err(HeraldError::invalid_input(format!(
                "campaign_spend must be positive, got {spend}"
            )));
        }
        Ok(())
    }
}
