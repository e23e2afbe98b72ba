//! Domain model (IDs, platforms, tasks, content, posts, metrics, errors).

pub mod content;
pub mod errors;
pub mod ids;
pub mod metrics;
pub mod platform;
pub mod post;
pub mod task;

pub use content::{ContentBundle, EngagementTactic};
pub use errors::{HeraldError, Result};
pub use ids::{CampaignId, TaskId};
pub use metrics::{
    ADDICTION_CAP, EngagementCounts, EngagementMetrics, PerformanceReport, ReportSource,
    VIRALITY_CAP,
};
pub use platform::{PlatformConfig, PlatformId, PlatformRegistry, PostWindow};
pub use post::{PostId, PostResult, TrackingRecord};
pub use task::{Capability, Complexity, Task};

use std::collections::BTreeMap;

/// One bundle per platform, as produced by the generator.
pub type BundleMap = BTreeMap<PlatformId, ContentBundle>;

/// One result per attempted platform, as produced by the coordinator.
pub type ResultMap = BTreeMap<PlatformId, PostResult>;
