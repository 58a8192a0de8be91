use std::sync::Arc;

use aurafy_client::{
    PlaybackApi,
    models::{PlaybackState, RepeatMode, SearchHit, TrackSnapshot, parse_track_id},
};
use tracing::{debug, info, instrument};

use crate::{
    Error, Result,
    controls::{Action, Outcome},
    refresh::{Expectation, RefreshPolicy},
};

pub const SEARCH_LIMIT: usize = 10;

/// Repeat and shuffle as the player believes them to be.
///
/// Toggles flip these locally, every successful poll overwrites them with
/// what the service reports.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackModes {
    pub repeat: bool,
    pub shuffle: bool,
}

pub struct Dispatcher {
    api: Arc<dyn PlaybackApi>,
    refresh: RefreshPolicy,
    modes: PlaybackModes,
    last: Option<PlaybackState>,
}

impl Dispatcher {
    pub fn new(api: Arc<dyn PlaybackApi>, refresh: RefreshPolicy) -> Self {
        Self {
            api,
            refresh,
            modes: Default::default(),
            last: None,
        }
    }

    pub fn modes(&self) -> PlaybackModes {
        self.modes
    }

    /// State seen by the most recent successful poll.
    pub fn last_playback(&self) -> Option<&PlaybackState> {
        self.last.as_ref()
    }

    pub async fn playback(&mut self) -> Result<Option<PlaybackState>> {
        let state = self.api.playback().await?;
        self.observe(state.as_ref());
        Ok(state)
    }

    pub async fn current_track(&mut self) -> Result<Option<TrackSnapshot>> {
        Ok(self.playback().await?.and_then(|state| state.track))
    }

    pub async fn play(&self) -> Result<()> {
        Ok(self.api.play().await?)
    }

    pub async fn pause(&self) -> Result<()> {
        Ok(self.api.pause().await?)
    }

    pub async fn next(&self) -> Result<()> {
        Ok(self.api.next().await?)
    }

    pub async fn previous(&self) -> Result<()> {
        Ok(self.api.previous().await?)
    }

    /// Returns the new repeat flag. The flag is left alone when the service
    /// rejects the change.
    pub async fn toggle_repeat(&mut self) -> Result<bool> {
        let repeat = !self.modes.repeat;
        let mode = match repeat {
            true => RepeatMode::Track,
            false => RepeatMode::Off,
        };

        self.api.set_repeat(mode).await?;
        self.modes.repeat = repeat;
        info!("Repeat: {}", on_off(repeat));

        Ok(repeat)
    }

    pub async fn toggle_shuffle(&mut self) -> Result<bool> {
        let shuffle = !self.modes.shuffle;

        self.api.set_shuffle(shuffle).await?;
        self.modes.shuffle = shuffle;
        info!("Shuffle: {}", on_off(shuffle));

        Ok(shuffle)
    }

    pub async fn search(&self, query: &str) -> Result<Vec<SearchHit>> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let tracks = self
            .api
            .search_tracks(query, SEARCH_LIMIT as u32)
            .await?;

        Ok(tracks
            .into_iter()
            .take(SEARCH_LIMIT)
            .enumerate()
            .map(|(index, track)| SearchHit {
                position: index + 1,
                name: track.name,
                artist: track.artist,
                id: track.id,
            })
            .collect())
    }

    pub async fn add_to_queue(&self, track: &str) -> Result<()> {
        let Some(id) = parse_track_id(track) else {
            return Err(aurafy_client::Error::InvalidTrack {
                input: track.to_string(),
            }
            .into());
        };

        self.api.add_to_queue(id).await?;
        info!("Added spotify:track:{id} to queue");
        Ok(())
    }

    /// Runs the action, then re-queries playback until its effect shows up
    /// or the refresh policy runs out of attempts.
    #[instrument(skip_all, fields(action = action.name()))]
    pub async fn dispatch(&mut self, action: Action) -> Result<Outcome> {
        // A skip is only observable against a track seen before it.
        if matches!(action, Action::Next | Action::Previous) && self.last.is_none() {
            self.playback().await?;
        }
        let before = self.last.as_ref().and_then(|state| state.track.clone());

        let expectation = match &action {
            Action::Play => {
                self.play().await?;
                Expectation::Playing(true)
            }
            Action::Pause => {
                self.pause().await?;
                Expectation::Playing(false)
            }
            Action::Next => {
                self.next().await?;
                Expectation::TrackChange(before)
            }
            Action::Previous => {
                self.previous().await?;
                Expectation::TrackChange(before)
            }
            Action::Repeat => Expectation::Repeat(self.toggle_repeat().await?),
            Action::Shuffle => Expectation::Shuffle(self.toggle_shuffle().await?),
            Action::Queue(track) => {
                self.add_to_queue(track).await?;
                Expectation::Nothing
            }
            Action::Search(query) => return Ok(Outcome::Matches(self.search(query).await?)),
        };

        let state = self.refresh_until(&expectation).await?;
        Ok(Outcome::Playback(state))
    }

    async fn refresh_until(&mut self, expectation: &Expectation) -> Result<Option<PlaybackState>> {
        let mut state = None;

        for attempt in 0..self.refresh.attempts.max(1) {
            let delay = self.refresh.delay(attempt);
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }

            state = self.playback().await?;

            if expectation.is_met(state.as_ref()) {
                debug!("refreshed after {} poll(s)", attempt + 1);
                return Ok(state);
            }
        }

        debug!("effect not observed, keeping last poll");
        Ok(state)
    }

    fn observe(&mut self, state: Option<&PlaybackState>) {
        if let Some(state) = state {
            self.modes = PlaybackModes {
                repeat: state.repeat.is_on(),
                shuffle: state.shuffle,
            };
        }

        self.last = state.cloned();
    }
}

fn on_off(value: bool) -> &'static str {
    match value {
        true => "ON",
        false => "OFF",
    }
}
