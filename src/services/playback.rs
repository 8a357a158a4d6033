//! Playback source resolution
//!
//! Maps a selected title to an embeddable playback URL. Strategies are
//! consulted in registration order and the first one to produce a URL wins;
//! `PlaybackResolver` tracks the current selection and gates the resolved
//! URL behind a hidden flag so the host can blank the player without
//! forgetting the selection.

use std::sync::Arc;

use crate::models::{Category, Video};

/// Season and episode picked for a series title
///
/// Both default to the first entry, which is what a fresh selection plays.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EpisodeSlot {
    pub season: Option<u32>,
    pub episode: Option<u32>,
}

/// A single way of turning a title into a playback URL
///
/// Returning `None` means this strategy has no source for the title and the
/// chain moves on to the next one.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait SourceStrategy: Send + Sync {
    async fn resolve(&self, video: &Video, slot: &EpisodeSlot) -> Option<String>;

    /// Strategy name for log attribution
    fn name(&self) -> &'static str;
}

/// Embed URLs served by vidsrc
///
/// Movies resolve to `{base}/embed/{external_id}`, series to
/// `{base}/embed/{external_id}/{season}-{episode}`. Titles without an
/// external id have no address here and miss.
pub struct VidsrcStrategy {
    embed_base: String,
}

impl VidsrcStrategy {
    pub fn new(embed_base: impl Into<String>) -> Self {
        Self {
            embed_base: embed_base.into(),
        }
    }
}

#[async_trait::async_trait]
impl SourceStrategy for VidsrcStrategy {
    async fn resolve(&self, video: &Video, slot: &EpisodeSlot) -> Option<String> {
        if video.external_id.is_empty() {
            return None;
        }

        let url = match video.category {
            Category::Movie => format!("{}/embed/{}", self.embed_base, video.external_id),
            Category::Series => format!(
                "{}/embed/{}/{}-{}",
                self.embed_base,
                video.external_id,
                slot.season.unwrap_or(1),
                slot.episode.unwrap_or(1)
            ),
        };
        Some(url)
    }

    fn name(&self) -> &'static str {
        "vidsrc"
    }
}

/// Ordered chain of playback source strategies
pub struct SourceChain {
    strategies: Vec<Box<dyn SourceStrategy>>,
}

impl SourceChain {
    pub fn new(strategies: Vec<Box<dyn SourceStrategy>>) -> Self {
        Self { strategies }
    }

    /// Walks the chain in order and returns the first non-empty URL
    ///
    /// Strategies after the first hit are not consulted. Returns `None`
    /// when every strategy misses.
    pub async fn resolve(&self, video: &Video, slot: &EpisodeSlot) -> Option<String> {
        for strategy in &self.strategies {
            match strategy.resolve(video, slot).await {
                Some(url) if !url.is_empty() => {
                    tracing::info!(
                        strategy = strategy.name(),
                        external_id = %video.external_id,
                        category = %video.category,
                        "Resolved playback source"
                    );
                    return Some(url);
                }
                _ => {
                    tracing::debug!(
                        strategy = strategy.name(),
                        external_id = %video.external_id,
                        "Strategy has no source for title"
                    );
                }
            }
        }

        tracing::debug!(
            external_id = %video.external_id,
            title = %video.title,
            "No playback source available"
        );
        None
    }
}

/// Resolution state for the current selection
#[derive(Debug, Clone, PartialEq)]
enum ResolveState {
    /// Nothing selected yet
    NoSelection,
    /// Selection made, chain walk in flight
    Resolving(Video),
    /// Chain walk finished; `url` is `None` when every strategy missed
    Resolved { video: Video, url: Option<String> },
}

/// Tracks the selected title and its resolved playback URL
///
/// Selecting a title drops the previous URL before the chain is consulted,
/// so a stale source is never exposed while the new one resolves. The
/// hidden flag blanks `frame_src` without touching the resolved state;
/// unhiding re-exposes the same URL with no new chain walk.
pub struct PlaybackResolver {
    chain: Arc<SourceChain>,
    state: ResolveState,
    hidden: bool,
}

impl PlaybackResolver {
    pub fn new(chain: Arc<SourceChain>) -> Self {
        Self {
            chain,
            state: ResolveState::NoSelection,
            hidden: false,
        }
    }

    /// Selects a title and resolves its playback URL through the chain
    pub async fn set_selection(&mut self, video: Video, slot: EpisodeSlot) {
        self.state = ResolveState::Resolving(video.clone());
        let url = self.chain.resolve(&video, &slot).await;
        self.state = ResolveState::Resolved { video, url };
    }

    /// Drops the selection and any resolved URL
    pub fn clear_selection(&mut self) {
        self.state = ResolveState::NoSelection;
    }

    /// Hides or re-exposes the player frame
    pub fn set_hidden(&mut self, hidden: bool) {
        self.hidden = hidden;
    }

    /// The currently selected title, if any
    pub fn selection(&self) -> Option<&Video> {
        match &self.state {
            ResolveState::NoSelection => None,
            ResolveState::Resolving(video) => Some(video),
            ResolveState::Resolved { video, .. } => Some(video),
        }
    }

    /// URL the player frame should load right now
    ///
    /// `None` while hidden, while nothing is selected, while resolution is
    /// in flight, and when the chain missed entirely.
    pub fn frame_src(&self) -> Option<&str> {
        if self.hidden {
            return None;
        }
        match &self.state {
            ResolveState::Resolved { url: Some(url), .. } => Some(url.as_str()),
            _ => None,
        }
    }
}
