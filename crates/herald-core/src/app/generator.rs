//! ContentGenerationEngine - topic から各プラットフォーム用の ContentBundle を作る
//!
//! 本文・タクティクス・投稿時間帯・ハッシュタグは決定的。
//! CTA と viral_potential だけが RandomSource に依存する。

use std::collections::BTreeSet;
use std::sync::Arc;

use rand::RngCore;
use rand::seq::SliceRandom;
use tracing::debug;

use crate::domain::{BundleMap, ContentBundle, EngagementTactic, PlatformConfig, PlatformRegistry};
use crate::ports::RandomSource;

/// Always attached to every bundle.
pub const BRAND_HASHTAGS: [&str; 4] = [
    "#JobSearchSA",
    "#CareerHack",
    "#GetHiredSA",
    "#SouthAfricaJobs",
];

/// One of these is picked per bundle.
pub const CALLS_TO_ACTION: [&str; 4] = [
    "LIMITED SPOTS: Join now before registration closes! 🚨",
    "Only 50 positions left - apply immediately! ⏰",
    "Your dream job is waiting - click now! 👇",
    "Don't miss out - companies are hiring TODAY! 🔥",
];

/// Range of `viral_potential`.
pub const VIRAL_POTENTIAL_MIN: f64 = 7.5;
pub const VIRAL_POTENTIAL_MAX: f64 = 10.0;

pub struct ContentGenerationEngine {
    registry: Arc<PlatformRegistry>,
    random: Arc<dyn RandomSource>,
}

impl ContentGenerationEngine {
    pub fn new(registry: Arc<PlatformRegistry>, random: Arc<dyn RandomSource>) -> Self {
        Self { registry, random }
    }

    /// Engine over the built-in platforms.
    pub fn with_builtin_platforms(random: Arc<dyn RandomSource>) -> Self {
        Self::new(Arc::new(PlatformRegistry::global().clone()), random)
    }

    pub fn registry(&self) -> &PlatformRegistry {
        &self.registry
    }

    /// One bundle per registered platform. Any topic/audience is accepted.
    pub fn generate(&self, topic: &str, audience: &str) -> BundleMap {
        let bundles: BundleMap = self
            .registry
            .iter()
            .map(|config| (config.id.clone(), self.bundle_for(config, topic)))
            .collect();
        debug!(topic, audience, platforms = bundles.len(), "generated content bundles");
        bundles
    }

    fn bundle_for(&self, config: &PlatformConfig, topic: &str) -> ContentBundle {
        ContentBundle {
            platform: config.id.clone(),
            content_type: config.content_format.clone(),
            body: config.render_body(topic),
            addictive_elements: EngagementTactic::select(config.addiction_factor),
            optimal_post_window: config.optimal_window(),
            hashtags: hashtags_for(topic),
            call_to_action: self.pick_call_to_action(),
            addiction_score: config.addiction_factor,
            viral_potential: self
                .random
                .uniform(VIRAL_POTENTIAL_MIN, VIRAL_POTENTIAL_MAX),
        }
    }

    fn pick_call_to_action(&self) -> String {
        let mut picked = CALLS_TO_ACTION[0];
        self.random.with_rng(&mut |rng: &mut dyn RngCore| {
            if let Some(cta) = CALLS_TO_ACTION.choose(rng) {
                picked = *cta;
            }
        });
        picked.to_string()
    }
}

/// Brand tags ∪ {`#` + topic without whitespace, `#` + topic + `Hack`}.
pub fn hashtags_for(topic: &str) -> BTreeSet<String> {
    let compact: String = topic.split_whitespace().collect();
    let mut tags: BTreeSet<String> = BRAND_HASHTAGS.iter().map(|t| t.to_string()).collect();
    tags.insert(format!("#{compact}"));
    tags.insert(format!("#{topic}Hack"));
    tags
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PlatformId, PostWindow};
    use crate::impls::{OsRandom, SeededRandom};

    fn engine() -> ContentGenerationEngine {
        ContentGenerationEngine::with_builtin_platforms(Arc::new(SeededRandom::new(11)))
    }

    #[test]
    fn one_bundle_per_registered_platform() {
        let bundles = engine().generate("Remote Work", "graduates");
        assert_eq!(bundles.len(), 6);
        for id in PlatformRegistry::global().ids() {
            assert_eq!(bundles[&id].platform, id);
        }
    }

    #[test]
    fn addiction_score_and_elements_follow_registry() {
        let bundles = engine().generate("Remote Work", "graduates");
        for config in PlatformRegistry::global().iter() {
            let bundle = &bundles[&config.id];
            assert_eq!(bundle.addiction_score, config.addiction_factor);

            let n = (config.addiction_factor.floor() as usize).min(EngagementTactic::CATALOG.len());
            assert_eq!(bundle.addictive_elements.len(), n);
            assert_eq!(
                bundle.addictive_elements.as_slice(),
                &EngagementTactic::CATALOG[..n]
            );
            assert_eq!(bundle.content_type, config.content_format);
            assert_eq!(bundle.optimal_post_window, config.optimal_window());
        }
    }

    #[test]
    fn random_fields_stay_in_their_sets() {
        let engine = ContentGenerationEngine::with_builtin_platforms(Arc::new(OsRandom));
        for _ in 0..50 {
            for bundle in engine.generate("Rust", "devs").values() {
                assert!(CALLS_TO_ACTION.contains(&bundle.call_to_action.as_str()));
                assert!(bundle.viral_potential >= VIRAL_POTENTIAL_MIN);
                assert!(bundle.viral_potential <= VIRAL_POTENTIAL_MAX);
            }
        }
    }

    #[test]
    fn body_contains_topic_verbatim() {
        let bundles = engine().generate("Data <Science>", "");
        for bundle in bundles.values() {
            assert!(bundle.body.contains("Data <Science>"));
        }
        assert!(bundles[&PlatformId::new("twitter")].body.starts_with("URGENT: Data <Science>"));
    }

    #[test]
    fn hashtags_strip_whitespace_from_topic() {
        let tags = hashtags_for("Remote  Work\tSA");
        assert!(tags.contains("#RemoteWorkSA"));
        assert!(tags.contains("#Remote  Work\tSAHack"));
        for brand in BRAND_HASHTAGS {
            assert!(tags.contains(brand));
        }
        assert_eq!(tags.len(), 6);
    }

    #[test]
    fn empty_topic_still_produces_bundles() {
        let bundles = engine().generate("", "");
        assert_eq!(bundles.len(), 6);
        let tags = &bundles[&PlatformId::new("tiktok")].hashtags;
        assert!(tags.contains("#"));
        assert!(tags.contains("#Hack"));
    }

    #[test]
    fn unknown_platform_uses_defaults() {
        let registry = PlatformRegistry::new([
            PlatformConfig::new("mastodon", "text", 12.0),
            PlatformConfig::new("bluesky", "text", 0.5),
        ]);
        let engine = ContentGenerationEngine::new(Arc::new(registry), Arc::new(SeededRandom::new(1)));
        let bundles = engine.generate("Rust", "devs");

        let mastodon = &bundles[&PlatformId::new("mastodon")];
        assert_eq!(mastodon.optimal_post_window, PostWindow::DEFAULT);
        assert_eq!(mastodon.addictive_elements.len(), EngagementTactic::CATALOG.len());
        assert!(mastodon.body.contains("Amazing Rust content"));

        assert!(bundles[&PlatformId::new("bluesky")].addictive_elements.is_empty());
    }
}
