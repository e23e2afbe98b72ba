//! Platform registry: the static per-platform configuration.
//!
//! The registry is immutable once built. `PlatformRegistry::global()` holds the
//! built-in entries and is initialized on first use; there is no teardown.

use std::fmt;
use std::sync::OnceLock;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// Platform identifier (`tiktok`, `instagram`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlatformId(String);

impl PlatformId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlatformId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for PlatformId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Time-of-day window in which a post is expected to perform best.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostWindow {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl PostWindow {
    /// Window used for platforms without an entry of their own (18:00-20:00).
    pub const DEFAULT: PostWindow = PostWindow::hours(18, 20);

    pub const fn hours(start: u32, end: u32) -> Self {
        Self {
            start: hm(start),
            end: hm(end),
        }
    }

    pub fn contains(&self, t: NaiveTime) -> bool {
        self.start <= t && t < self.end
    }
}

const fn hm(hour: u32) -> NaiveTime {
    match NaiveTime::from_hms_opt(hour, 0, 0) {
        Some(t) => t,
        None => NaiveTime::MIN,
    }
}

impl fmt::Display for PostWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start.format("%H:%M"), self.end.format("%H:%M"))
    }
}

/// Body template used when a platform has none (`{topic}` is substituted).
pub const GENERIC_TEMPLATE: &str =
    "🚀 Amazing {topic} content that will transform your career!";

/// One registry entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformConfig {
    pub id: PlatformId,

    /// Content format, e.g. `vertical_video`.
    pub content_format: String,

    /// Heuristic engagement rating, 0-10.
    pub addiction_factor: f64,

    /// `None` falls back to [`PostWindow::DEFAULT`].
    #[serde(default)]
    pub post_window: Option<PostWindow>,

    /// `None` falls back to [`GENERIC_TEMPLATE`].
    #[serde(default)]
    pub body_template: Option<String>,
}

impl PlatformConfig {
    pub fn new(id: impl Into<PlatformId>, content_format: impl Into<String>, addiction_factor: f64) -> Self {
        Self {
            id: id.into(),
            content_format: content_format.into(),
            addiction_factor,
            post_window: None,
            body_template: None,
        }
    }

    pub fn with_window(mut self, window: PostWindow) -> Self {
        self.post_window = Some(window);
        self
    }

    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.body_template = Some(template.into());
        self
    }

    pub fn optimal_window(&self) -> PostWindow {
        self.post_window.unwrap_or(PostWindow::DEFAULT)
    }

    /// Render the body text. `topic` is inserted verbatim.
    pub fn render_body(&self, topic: &str) -> String {
        self.body_template
            .as_deref()
            .unwrap_or(GENERIC_TEMPLATE)
            .replace("{topic}", topic)
    }
}

/// Immutable, ordered set of platform configs.
#[derive(Debug, Clone, Default)]
pub struct PlatformRegistry {
    entries: Vec<PlatformConfig>,
}

impl PlatformRegistry {
    /// Build a registry. A later entry with the same id replaces the earlier one.
    pub fn new(entries: impl IntoIterator<Item = PlatformConfig>) -> Self {
        let mut out: Vec<PlatformConfig> = Vec::new();
        for entry in entries {
            if let Some(existing) = out.iter_mut().find(|e| e.id == entry.id) {
                *existing = entry;
            } else {
                out.push(entry);
            }
        }
        Self { entries: out }
    }

    /// The process-wide built-in registry.
    pub fn global() -> &'static PlatformRegistry {
        static GLOBAL: OnceLock<PlatformRegistry> = OnceLock::new();
        GLOBAL.get_or_init(PlatformRegistry::builtin)
    }

    /// The six built-in platforms.
    pub fn builtin() -> Self {
        Self::new([
            PlatformConfig::new("tiktok", "vertical_video", 9.5)
                .with_window(PostWindow::hours(19, 23))
                .with_template("🚀 BREAKING: {topic} that will 10X your career! 👇 Watch till end for secret! #CareerHackSA"),
            PlatformConfig::new("instagram", "reels", 8.8)
                .with_window(PostWindow::hours(17, 20))
                .with_template("🌟 Discover how {topic} got 5000+ South Africans hired! ✨ Double tap if you want this! 👇"),
            PlatformConfig::new("youtube", "vertical_video", 8.2)
                .with_window(PostWindow::hours(20, 22))
                .with_template("SHOCKING: The {topic} method that companies don't want you to know! 🎯"),
            PlatformConfig::new("facebook", "square_video", 7.5)
                .with_window(PostWindow::hours(13, 16))
                .with_template("🤫 Secret {topic} technique revealed! Limited spots available - comment 'ME' to learn more!"),
            PlatformConfig::new("twitter", "text_image", 7.8)
                .with_window(PostWindow::hours(8, 10))
                .with_template("URGENT: {topic} is changing SA job market forever. You won't believe what happens next 🧵"),
            PlatformConfig::new("snapchat", "vertical_video_10s", 9.1)
                .with_window(PostWindow::hours(15, 18))
                .with_template("👀 Psst... {topic} hack that works in 24 hours! 👇 Swipe up before it's gone!"),
        ])
    }

    pub fn get(&self, id: &PlatformId) -> Option<&PlatformConfig> {
        self.entries.iter().find(|e| &e.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlatformConfig> {
        self.entries.iter()
    }

    pub fn ids(&self) -> Vec<PlatformId> {
        self.entries.iter().map(|e| e.id.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn builtin_registry_has_six_platforms() {
        let registry = PlatformRegistry::global();
        assert_eq!(registry.len(), 6);
        assert_eq!(
            registry.get(&"tiktok".into()).map(|c| c.addiction_factor),
            Some(9.5)
        );
    }

    #[rstest]
    #[case::tiktok("tiktok", "19:00-23:00")]
    #[case::twitter("twitter", "08:00-10:00")]
    #[case::snapchat("snapchat", "15:00-18:00")]
    fn builtin_windows(#[case] platform: &str, #[case] expected: &str) {
        let config = PlatformRegistry::global().get(&platform.into()).unwrap();
        assert_eq!(config.optimal_window().to_string(), expected);
    }

    #[rstest]
    #[case::tiktok(
        "tiktok",
        "🚀 BREAKING: Rust that will 10X your career! 👇 Watch till end for secret! #CareerHackSA"
    )]
    #[case::twitter(
        "twitter",
        "URGENT: Rust is changing SA job market forever. You won't believe what happens next 🧵"
    )]
    fn builtin_bodies(#[case] platform: &str, #[case] expected: &str) {
        let config = PlatformRegistry::global().get(&platform.into()).unwrap();
        assert_eq!(config.render_body("Rust"), expected);
    }

    #[test]
    fn missing_window_uses_default() {
        let config = PlatformConfig::new("mastodon", "text", 5.0);
        assert_eq!(config.optimal_window(), PostWindow::DEFAULT);
        assert_eq!(config.optimal_window().to_string(), "18:00-20:00");
    }

    #[test]
    fn missing_template_uses_generic_body() {
        let config = PlatformConfig::new("mastodon", "text", 5.0);
        assert_eq!(
            config.render_body("Rust"),
            "🚀 Amazing Rust content that will transform your career!"
        );
    }

    #[test]
    fn topic_is_inserted_verbatim() {
        let config = PlatformConfig::new("x", "text", 1.0).with_template("[{topic}]");
        assert_eq!(config.render_body(""), "[]");
        assert_eq!(config.render_body("<b>{topic}</b>"), "[<b>{topic}</b>]");
    }

    #[test]
    fn later_entries_replace_earlier_ones() {
        let registry = PlatformRegistry::new([
            PlatformConfig::new("a", "text", 1.0),
            PlatformConfig::new("b", "text", 2.0),
            PlatformConfig::new("a", "video", 3.0),
        ]);
        assert_eq!(registry.ids(), vec![PlatformId::new("a"), PlatformId::new("b")]);
        assert_eq!(registry.get(&"a".into()).unwrap().content_format, "video");
    }

    #[test]
    fn window_contains_start_but_not_end() {
        let w = PostWindow::hours(8, 10);
        assert!(w.contains(NaiveTime::from_hms_opt(8, 0, 0).unwrap()));
        assert!(!w.contains(NaiveTime::from_hms_opt(10, 0, 0).unwrap()));
    }
}
