//! Content bundle model.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::platform::{PlatformId, PostWindow};

/// Engagement tactic attached to generated content.
///
/// The declaration order is the catalog order; selection always takes a prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngagementTactic {
    CuriosityGaps,
    EmotionalTriggers,
    SocialProof,
    UrgencyMechanisms,
    VisualHooks,
    InteractiveElements,
    FearOfMissingOut,
    SocialValidation,
    Scarcity,
}

impl EngagementTactic {
    pub const CATALOG: [EngagementTactic; 9] = [
        EngagementTactic::CuriosityGaps,
        EngagementTactic::EmotionalTriggers,
        EngagementTactic::SocialProof,
        EngagementTactic::UrgencyMechanisms,
        EngagementTactic::VisualHooks,
        EngagementTactic::InteractiveElements,
        EngagementTactic::FearOfMissingOut,
        EngagementTactic::SocialValidation,
        EngagementTactic::Scarcity,
    ];

    /// First `floor(addiction_factor)` catalog entries, clamped to the catalog length.
    pub fn select(addiction_factor: f64) -> Vec<EngagementTactic> {
        let n = if addiction_factor.is_nan() || addiction_factor < 1.0 {
            0
        } else {
            (addiction_factor.floor() as usize).min(Self::CATALOG.len())
        };
        Self::CATALOG[..n].to_vec()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EngagementTactic::CuriosityGaps => "curiosity_gaps",
            EngagementTactic::EmotionalTriggers => "emotional_triggers",
            EngagementTactic::SocialProof => "social_proof",
            EngagementTactic::UrgencyMechanisms => "urgency_mechanisms",
            EngagementTactic::VisualHooks => "visual_hooks",
            EngagementTactic::InteractiveElements => "interactive_elements",
            EngagementTactic::FearOfMissingOut => "fear_of_missing_out",
            EngagementTactic::SocialValidation => "social_validation",
            EngagementTactic::Scarcity => "scarcity",
        }
    }
}

impl fmt::Display for EngagementTactic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Content generated for one platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentBundle {
    pub platform: PlatformId,
    pub content_type: String,
    pub body: String,
    pub addictive_elements: Vec<EngagementTactic>,
    pub optimal_post_window: PostWindow,
    pub hashtags: BTreeSet<String>,
    pub call_to_action: String,

    /// Equal to the platform's registry factor.
    pub addiction_score: f64,

    /// In `[7.5, 10.0]`.
    pub viral_potential: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::tiktok(9.5, 9)]
    #[case::facebook(7.5, 7)]
    #[case::youtube(8.2, 8)]
    #[case::above_catalog(12.0, 9)]
    #[case::below_one(0.9, 0)]
    #[case::zero(0.0, 0)]
    #[case::negative(-3.0, 0)]
    #[case::nan(f64::NAN, 0)]
    fn select_takes_catalog_prefix(#[case] factor: f64, #[case] expected_len: usize) {
        let selected = EngagementTactic::select(factor);
        assert_eq!(selected.len(), expected_len);
        assert_eq!(selected.as_slice(), &EngagementTactic::CATALOG[..expected_len]);
    }

    #[test]
    fn tactics_serialize_as_snake_case() {
        let json = serde_json::to_string(&EngagementTactic::FearOfMissingOut).unwrap();
        assert_eq!(json, "\"fear_of_missing_out\"");
    }
}
