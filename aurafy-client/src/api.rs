use async_trait::async_trait;

use crate::{
    Result,
    models::{PlaybackState, RepeatMode, TrackSummary},
};

/// The remote calls the player needs from the streaming service.
#[async_trait]
pub trait PlaybackApi: Send + Sync {
    /// `None` when nothing is active on the account.
    async fn playback(&self) -> Result<Option<PlaybackState>>;

    async fn play(&self) -> Result<()>;

    async fn pause(&self) -> Result<()>;

    async fn next(&self) -> Result<()>;

    async fn previous(&self) -> Result<()>;

    async fn set_repeat(&self, mode: RepeatMode) -> Result<()>;

    async fn set_shuffle(&self, enabled: bool) -> Result<()>;

    async fn search_tracks(&self, query: &str, limit: u32) -> Result<Vec<TrackSummary>>;

    /// `track_id` is a bare base62 id.
    async fn add_to_queue(&self, track_id: &str) -> Result<()>;
}
