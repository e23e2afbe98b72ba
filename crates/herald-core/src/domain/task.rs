use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::TaskId;

/// Complexity level assigned by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Complexity {
    Low,
    Medium,
    High,
}

impl Complexity {
    /// Map a weighted keyword score to a level: `> 2` high, `(1, 2]` medium, else low.
    pub fn from_score(score: f64) -> Self {
        if score > 2.0 {
            Complexity::High
        } else if score > 1.0 {
            Complexity::Medium
        } else {
            Complexity::Low
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Complexity::Low => "low",
            Complexity::Medium => "medium",
            Complexity::High => "high",
        }
    }
}

impl fmt::Display for Complexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Skill domain a task requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    DataAnalysis,
    ContentCreation,
    SocialMedia,
    WebDevelopment,
    PaymentProcessing,
    Compliance,
    Security,
    /// Used only when no other capability matched.
    General,
}

impl Capability {
    /// Categories the classifier can detect, in evaluation order.
    pub const DETECTABLE: [Capability; 7] = [
        Capability::DataAnalysis,
        Capability::ContentCreation,
        Capability::SocialMedia,
        Capability::WebDevelopment,
        Capability::PaymentProcessing,
        Capability::Compliance,
        Capability::Security,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Capability::DataAnalysis => "data_analysis",
            Capability::ContentCreation => "content_creation",
            Capability::SocialMedia => "social_media",
            Capability::WebDevelopment => "web_development",
            Capability::PaymentProcessing => "payment_processing",
            Capability::Compliance => "compliance",
            Capability::Security => "security",
            Capability::General => "general",
        }
    }

    /// Lower-case keywords that mark this capability as required.
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            Capability::DataAnalysis => &["analyze", "process", "statistics", "trends"],
            Capability::ContentCreation => &["create", "write", "generate", "content"],
            Capability::SocialMedia => &["post", "social", "tiktok", "instagram", "facebook"],
            Capability::WebDevelopment => &["website", "responsive", "frontend", "backend"],
            Capability::PaymentProcessing => &["payment", "transaction", "money", "payout"],
            Capability::Compliance => &["compliance", "legal", "regulation", "popi"],
            Capability::Security => &["security", "encrypt", "secure", "protect"],
            Capability::General => &[],
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified unit of work. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    description: String,
    complexity: Complexity,
    dependencies: Vec<TaskId>,
    required_capabilities: BTreeSet<Capability>,
    created_at: DateTime<Utc>,
}

impl Task {
    pub fn new(
        id: TaskId,
        description: impl Into<String>,
        complexity: Complexity,
        required_capabilities: BTreeSet<Capability>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            description: description.into(),
            complexity,
            dependencies: Vec::new(),
            required_capabilities,
            created_at,
        }
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn complexity(&self) -> Complexity {
        self.complexity
    }

    /// Always empty at creation.
    pub fn dependencies(&self) -> &[TaskId] {
        &self.dependencies
    }

    pub fn required_capabilities(&self) -> &BTreeSet<Capability> {
        &self.required_capabilities
    }

    pub fn requires(&self, capability: Capability) -> bool {
        self.required_capabilities.contains(&capability)
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
