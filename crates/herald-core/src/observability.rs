use serde::{Deserialize, Serialize};

use crate::domain::PostResult;

/// Tallies over the coordinator's post history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributionCounts {
    pub attempted: usize,
    pub succeeded: usize,
    pub failed: usize,
}

impl DistributionCounts {
    pub fn from_results<'a>(results: impl IntoIterator<Item = &'a PostResult>) -> Self {
        let mut counts = DistributionCounts::default();
        for result in results {
            counts.attempted += 1;
            if result.success {
                counts.succeeded += 1;
            } else {
                counts.failed += 1;
            }
        }
        counts
    }
}
