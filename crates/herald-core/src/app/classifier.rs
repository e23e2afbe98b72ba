//! TaskClassifier - 自由記述のタスクを complexity と capability に分類
//!
//! キーワードの部分一致によるルールベース。失敗しない（空文字でも low / general）。

use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::debug;

use crate::domain::{Capability, Complexity, Task};
use crate::ports::{Clock, IdGenerator};

/// (keyword, weight)。複数レベルの一致はすべて加算される。
const COMPLEXITY_KEYWORDS: &[(&str, f64)] = &[
    ("complex", 1.0),
    ("strategic", 1.0),
    ("multiple", 1.0),
    ("integrate", 1.0),
    ("analyze", 1.0),
    ("create", 0.5),
    ("generate", 0.5),
    ("process", 0.5),
    ("manage", 0.5),
    ("simple", 0.2),
    ("basic", 0.2),
    ("single", 0.2),
    ("update", 0.2),
];

pub struct TaskClassifier {
    ids: Arc<dyn IdGenerator>,
    clock: Arc<dyn Clock>,
}

impl TaskClassifier {
    pub fn new(ids: Arc<dyn IdGenerator>, clock: Arc<dyn Clock>) -> Self {
        Self { ids, clock }
    }

    /// Classify a description into a new `Task`.
    pub fn classify(&self, description: &str) -> Task {
        let lowered = description.to_lowercase();
        let score = weighted_score(&lowered);
        let complexity = Complexity::from_score(score);
        let capabilities = required_capabilities(&lowered);

        let task = Task::new(
            self.ids.generate_task_id(),
            description,
            complexity,
            capabilities,
            self.clock.now(),
        );
        debug!(
            task_id = %task.id(),
            score,
            complexity = %complexity,
            capabilities = ?task.required_capabilities(),
            "classified task"
        );
        task
    }

    /// Raw weighted keyword score of a description.
    pub fn score(&self, description: &str) -> f64 {
        weighted_score(&description.to_lowercase())
    }
}

fn weighted_score(lowered: &str) -> f64 {
    COMPLEXITY_KEYWORDS
        .iter()
        .filter(|(keyword, _)| lowered.contains(keyword))
        .map(|(_, weight)| weight)
        .sum()
}

fn required_capabilities(lowered: &str) -> BTreeSet<Capability> {
    let found: BTreeSet<Capability> = Capability::DETECTABLE
        .into_iter()
        .filter(|c| c.keywords().iter().any(|k| lowered.contains(k)))
        .collect();
    if found.is_empty() {
        BTreeSet::from([Capability::General])
    } else {
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{FixedClock, UlidGenerator};
    use chrono::{TimeZone, Utc};
    use rstest::rstest;

    fn classifier() -> TaskClassifier {
        let clock = Arc::new(FixedClock::new(
            Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap(),
        ));
        TaskClassifier::new(Arc::new(UlidGenerator::new(clock.clone())), clock)
    }

    #[rstest]
    #[case::four_high_hits("Integrate and analyze multiple complex systems", Complexity::High)]
    #[case::low_hits("update basic single field", Complexity::Low)]
    #[case::two_medium_hits("create and generate", Complexity::Low)]
    #[case::three_medium_hits("Create, generate and process reports", Complexity::Medium)]
    #[case::mixed_levels("Analyze and manage a simple process", Complexity::High)]
    #[case::mixed_medium("manage a simple process", Complexity::Medium)]
    #[case::case_insensitive("STRATEGIC COMPLEX INTEGRATE", Complexity::High)]
    #[case::empty("", Complexity::Low)]
    fn complexity_levels(#[case] description: &str, #[case] expected: Complexity) {
        assert_eq!(classifier().classify(description).complexity(), expected);
    }

    #[test]
    fn matches_accumulate_across_levels() {
        // analyze(1.0) + manage(0.5) + simple(0.2) + process(0.5)
        let score = classifier().score("Analyze and manage a simple process");
        assert!((score - 2.2).abs() < 1e-9);
    }

    #[test]
    fn substring_matches_count() {
        // "updated" contains "update"
        assert!((classifier().score("updated") - 0.2).abs() < 1e-9);
    }

    #[test]
    fn capabilities_from_keywords() {
        let task = classifier().classify("Write a secure social post about payouts");
        let expected = BTreeSet::from([
            Capability::ContentCreation,
            Capability::SocialMedia,
            Capability::PaymentProcessing,
            Capability::Security,
        ]);
        assert_eq!(task.required_capabilities(), &expected);
    }

    #[test]
    fn no_keyword_falls_back_to_general() {
        let task = classifier().classify("");
        assert_eq!(
            task.required_capabilities(),
            &BTreeSet::from([Capability::General])
        );
        assert!(task.dependencies().is_empty());
    }

    #[test]
    fn analyze_maps_to_data_analysis() {
        let task = classifier().classify("Integrate and analyze multiple complex systems");
        assert!(task.requires(Capability::DataAnalysis));
        assert!(!task.requires(Capability::General));
    }

    #[test]
    fn tasks_get_unique_ids_and_clock_time() {
        let c = classifier();
        let a = c.classify("first");
        let b = c.classify("second");
        assert_ne!(a.id(), b.id());
        assert_eq!(
            a.created_at(),
            Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()
        );
        assert_eq!(a.description(), "first");
    }
}
