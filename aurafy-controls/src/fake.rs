use std::sync::Mutex;

use async_trait::async_trait;
use aurafy_client::{
    Error, PlaybackApi, Result,
    models::{PlaybackState, RepeatMode, TrackSnapshot, TrackSummary},
};

/// In-memory account that applies every command immediately.
#[derive(Default)]
pub(crate) struct FakeApi {
    pub(crate) state: Mutex<Option<PlaybackState>>,
    pub(crate) upcoming: Mutex<Vec<TrackSnapshot>>,
    pub(crate) catalog: Vec<TrackSummary>,
    pub(crate) queued: Mutex<Vec<String>>,
    pub(crate) calls: Mutex<Vec<&'static str>>,
    pub(crate) failing: bool,
    /// Commands are accepted but never show up in playback.
    pub(crate) ignoring: bool,
}

impl FakeApi {
    pub(crate) fn playing(track: TrackSnapshot) -> Self {
        Self {
            state: Mutex::new(Some(PlaybackState {
                track: Some(track),
                is_playing: true,
                ..Default::default()
            })),
            ..Default::default()
        }
    }

    pub(crate) fn failing() -> Self {
        Self {
            failing: true,
            ..Default::default()
        }
    }

    pub(crate) fn calls(&self, name: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|call| **call == name)
            .count()
    }

    fn record(&self, name: &'static str) -> Result<()> {
        self.calls.lock().unwrap().push(name);

        if self.failing {
            return Err(Error::Api {
                message: "503 Service Unavailable".to_string(),
            });
        }

        Ok(())
    }

    fn apply(&self, change: impl FnOnce(&mut PlaybackState)) {
        if self.ignoring {
            return;
        }

        let mut state = self.state.lock().unwrap();
        change(state.get_or_insert_with(Default::default));
    }
}

pub(crate) fn track(title: &str) -> TrackSnapshot {
    TrackSnapshot {
        title: title.to_string(),
        artist: format!("{title} artist"),
        album_art: Some(format!("https://i.scdn.co/image/{title}")),
    }
}

pub(crate) fn summary(index: usize) -> TrackSummary {
    TrackSummary {
        id: format!("{index:0>22}"),
        name: format!("Song {index}"),
        artist: format!("Artist {index}"),
    }
}

#[async_trait]
impl PlaybackApi for FakeApi {
    async fn playback(&self) -> Result<Option<PlaybackState>> {
        self.record("playback")?;
        Ok(self.state.lock().unwrap().clone())
    }

    async fn play(&self) -> Result<()> {
        self.record("play")?;
        self.apply(|state| state.is_playing = true);
        Ok(())
    }

    async fn pause(&self) -> Result<()> {
        self.record("pause")?;
        self.apply(|state| state.is_playing = false);
        Ok(())
    }

    async fn next(&self) -> Result<()> {
        self.record("next")?;
        let upcoming = self.upcoming.lock().unwrap().pop();
        self.apply(|state| state.track = upcoming);
        Ok(())
    }

    async fn previous(&self) -> Result<()> {
        self.record("previous")?;
        self.apply(|state| state.track = Some(track("previous")));
        Ok(())
    }

    async fn set_repeat(&self, mode: RepeatMode) -> Result<()> {
        self.record("set_repeat")?;
        self.apply(|state| state.repeat = mode);
        Ok(())
    }

    async fn set_shuffle(&self, enabled: bool) -> Result<()> {
        self.record("set_shuffle")?;
        self.apply(|state| state.shuffle = enabled);
        Ok(())
    }

    // Returns the whole catalog whatever the limit.
    async fn search_tracks(&self, _query: &str, _limit: u32) -> Result<Vec<TrackSummary>> {
        self.record("search_tracks")?;
        Ok(self.catalog.clone())
    }

    async fn add_to_queue(&self, track_id: &str) -> Result<()> {
        self.record("add_to_queue")?;
        self.queued.lock().unwrap().push(track_id.to_string());
        Ok(())
    }
}
