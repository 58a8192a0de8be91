use std::path::PathBuf;

use async_trait::async_trait;
use rspotify::{
    AuthCodeSpotify, Config, OAuth,
    model::{
        AdditionalType, CurrentPlaybackContext, FullTrack, PlayableId, PlayableItem, RepeatState,
        SearchResult, SearchType, TrackId,
    },
    prelude::*,
};
use snafu::prelude::*;
use tracing::{debug, info};

use crate::{
    CacheDirectorySnafu, Error, Result,
    api::PlaybackApi,
    credentials::Credentials,
    models::{PlaybackState, RepeatMode, TrackSnapshot, TrackSummary},
};

/// Spotify Web API client backed by `rspotify`.
///
/// Token refresh and caching are left to the library. The cached token lives
/// in the user cache directory so the browser prompt only shows up once.
#[derive(Debug, Clone)]
pub struct Client {
    spotify: AuthCodeSpotify,
}

impl Client {
    pub fn new(credentials: &Credentials) -> Result<Self> {
        let cache_path = token_cache_path()?;

        let oauth = OAuth {
            redirect_uri: credentials.redirect_uri().to_string(),
            scopes: credentials.scopes().map(str::to_string).collect(),
            ..Default::default()
        };

        let config = Config {
            token_cached: true,
            token_refreshing: true,
            cache_path,
            ..Default::default()
        };

        let spotify = AuthCodeSpotify::with_config(
            rspotify::Credentials::new(credentials.client_id(), credentials.client_secret()),
            oauth,
            config,
        );

        Ok(Self { spotify })
    }

    /// Reuses the cached token when there is one, otherwise opens the
    /// authorization page and asks for the redirected url on stdin.
    pub async fn authorize(&mut self) -> Result<()> {
        let url = self.spotify.get_authorize_url(false)?;
        self.spotify.prompt_for_token(&url).await?;
        info!("Authorized with Spotify");
        Ok(())
    }
}

#[async_trait]
impl PlaybackApi for Client {
    async fn playback(&self) -> Result<Option<PlaybackState>> {
        debug!("fetching current playback");
        let context = self
            .spotify
            .current_playback(None, Some(&[AdditionalType::Episode, AdditionalType::Track]))
            .await?;

        Ok(context.map(playback_state))
    }

    async fn play(&self) -> Result<()> {
        debug!("resuming playback");
        self.spotify.resume_playback(None, None).await?;
        Ok(())
    }

    async fn pause(&self) -> Result<()> {
        debug!("pausing playback");
        self.spotify.pause_playback(None).await?;
        Ok(())
    }

    async fn next(&self) -> Result<()> {
        debug!("skipping to next track");
        self.spotify.next_track(None).await?;
        Ok(())
    }

    async fn previous(&self) -> Result<()> {
        debug!("skipping to previous track");
        self.spotify.previous_track(None).await?;
        Ok(())
    }

    async fn set_repeat(&self, mode: RepeatMode) -> Result<()> {
        debug!("setting repeat to {mode}");
        let state = match mode {
            RepeatMode::Off => RepeatState::Off,
            RepeatMode::Track => RepeatState::Track,
            RepeatMode::Context => RepeatState::Context,
        };

        self.spotify.repeat(state, None).await?;
        Ok(())
    }

    async fn set_shuffle(&self, enabled: bool) -> Result<()> {
        debug!("setting shuffle to {enabled}");
        self.spotify.shuffle(enabled, None).await?;
        Ok(())
    }

    async fn search_tracks(&self, query: &str, limit: u32) -> Result<Vec<TrackSummary>> {
        debug!("searching tracks for {query:?}, limit {limit}");
        let result = self
            .spotify
            .search(query, SearchType::Track, None, None, Some(limit), None)
            .await?;

        let tracks = match result {
            SearchResult::Tracks(page) => page.items.iter().filter_map(track_summary).collect(),
            _ => Vec::new(),
        };

        Ok(tracks)
    }

    async fn add_to_queue(&self, track_id: &str) -> Result<()> {
        let id = TrackId::from_id(track_id).map_err(|_| Error::InvalidTrack {
            input: track_id.to_string(),
        })?;

        debug!("adding {} to queue", id.uri());
        self.spotify
            .add_item_to_queue(PlayableId::Track(id), None)
            .await?;
        Ok(())
    }
}

fn playback_state(context: CurrentPlaybackContext) -> PlaybackState {
    let track = match &context.item {
        Some(PlayableItem::Track(track)) => Some(track_snapshot(track)),
        Some(PlayableItem::Episode(episode)) => Some(TrackSnapshot::from_parts(
            &episode.name,
            [episode.show.publisher.as_str()],
            episode.images.iter().map(|image| image.url.as_str()),
        )),
        _ => None,
    };

    let repeat = match context.repeat_state {
        RepeatState::Off => RepeatMode::Off,
        RepeatState::Track => RepeatMode::Track,
        RepeatState::Context => RepeatMode::Context,
    };

    PlaybackState {
        track,
        is_playing: context.is_playing,
        repeat,
        shuffle: context.shuffle_state,
    }
}

fn track_snapshot(track: &FullTrack) -> TrackSnapshot {
    TrackSnapshot::from_parts(
        &track.name,
        track.artists.iter().map(|artist| artist.name.as_str()),
        track.album.images.iter().map(|image| image.url.as_str()),
    )
}

// Local files have no id and cannot be queued.
fn track_summary(track: &FullTrack) -> Option<TrackSummary> {
    let id = track.id.as_ref()?;

    Some(TrackSummary {
        id: id.id().to_string(),
        name: track.name.clone(),
        artist: track
            .artists
            .first()
            .map(|artist| artist.name.clone())
            .unwrap_or_default(),
    })
}

fn token_cache_path() -> Result<PathBuf> {
    let Some(mut path) = dirs::cache_dir() else {
        return Err(Error::TokenCache);
    };

    path.push("aurafy");
    std::fs::create_dir_all(&path).context(CacheDirectorySnafu { path: &path })?;
    path.push("token.json");

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn full_track(id: Value, name: &str, artists: &[&str], images: &[&str]) -> Value {
        let images: Vec<Value> = images
            .iter()
            .map(|url| json!({ "height": 640, "url": url, "width": 640 }))
            .collect();
        let artists: Vec<Value> = artists
            .iter()
            .map(|name| json!({ "external_urls": {}, "href": null, "id": null, "name": name }))
            .collect();
        let is_local = id.is_null();

        json!({
            "album": {
                "album_type": "album",
                "artists": [],
                "available_markets": [],
                "external_urls": {},
                "href": null,
                "id": null,
                "images": images,
                "name": "Music Has the Right to Children",
                "release_date": "1998-04-20",
                "release_date_precision": "day",
                "restrictions": null
            },
            "artists": artists,
            "available_markets": [],
            "disc_number": 1,
            "duration_ms": 151000,
            "explicit": false,
            "external_ids": {},
            "external_urls": {},
            "href": null,
            "id": id,
            "is_local": is_local,
            "is_playable": true,
            "linked_from": null,
            "restrictions": null,
            "name": name,
            "popularity": 50,
            "preview_url": null,
            "track_number": 3
        })
    }

    fn context(item: Value) -> CurrentPlaybackContext {
        serde_json::from_value(json!({
            "device": {
                "id": "a1b2c3",
                "is_active": true,
                "is_private_session": false,
                "is_restricted": false,
                "name": "Desk",
                "type": "Computer",
                "volume_percent": 60,
                "supports_volume": true
            },
            "repeat_state": "context",
            "shuffle_state": true,
            "context": null,
            "timestamp": 1700000000000i64,
            "progress_ms": 42000,
            "is_playing": true,
            "item": item,
            "currently_playing_type": "track",
            "actions": { "disallows": { "resuming": true } }
        }))
        .unwrap()
    }

    #[test]
    fn playback_takes_first_artist_and_image() {
        let item = full_track(
            json!("6rqhFgbbKwnb9MLmUQDhG6"),
            "Roygbiv",
            &["Boards of Canada", "Someone Else"],
            &["https://i.scdn.co/image/large", "https://i.scdn.co/image/small"],
        );

        let state = playback_state(context(item));

        assert_eq!(
            state,
            PlaybackState {
                track: Some(TrackSnapshot {
                    title: "Roygbiv".to_string(),
                    artist: "Boards of Canada".to_string(),
                    album_art: Some("https://i.scdn.co/image/large".to_string()),
                }),
                is_playing: true,
                repeat: RepeatMode::Context,
                shuffle: true,
            }
        );
    }

    #[test]
    fn playback_without_item_has_no_track() {
        let state = playback_state(context(Value::Null));

        assert_eq!(state.track, None);
        assert!(state.is_playing);
    }

    #[test]
    fn episode_shows_publisher_as_artist() {
        let item = json!({
            "audio_preview_url": null,
            "description": "Weekly talk",
            "html_description": "<p>Weekly talk</p>",
            "duration_ms": 1800000,
            "explicit": false,
            "external_urls": {},
            "href": "https://api.spotify.com/v1/episodes/512ojhOuo1ktJprKbVcKyQ",
            "id": "512ojhOuo1ktJprKbVcKyQ",
            "images": [{ "height": 640, "url": "https://i.scdn.co/image/episode", "width": 640 }],
            "is_externally_hosted": false,
            "is_playable": true,
            "language": "en",
            "languages": ["en"],
            "name": "Episode 12",
            "release_date": "2024-05-01",
            "release_date_precision": "day",
            "resume_point": null,
            "show": {
                "available_markets": [],
                "copyrights": [],
                "description": "A show",
                "explicit": false,
                "external_urls": {},
                "href": "https://api.spotify.com/v1/shows/38bS44xjbVVZ3No3ByF1dJ",
                "id": "38bS44xjbVVZ3No3ByF1dJ",
                "images": [],
                "is_externally_hosted": false,
                "languages": ["en"],
                "media_type": "audio",
                "name": "The Show",
                "publisher": "Some Network"
            }
        });

        let track = playback_state(context(item)).track.unwrap();

        assert_eq!(track.title, "Episode 12");
        assert_eq!(track.artist, "Some Network");
        assert_eq!(track.album_art.as_deref(), Some("https://i.scdn.co/image/episode"));
    }

    #[test]
    fn summary_skips_local_files() {
        let local: FullTrack =
            serde_json::from_value(full_track(Value::Null, "demo.mp3", &[], &[])).unwrap();
        let remote: FullTrack = serde_json::from_value(full_track(
            json!("6rqhFgbbKwnb9MLmUQDhG6"),
            "Roygbiv",
            &["Boards of Canada"],
            &[],
        ))
        .unwrap();

        assert_eq!(track_summary(&local), None);
        assert_eq!(
            track_summary(&remote),
            Some(TrackSummary {
                id: "6rqhFgbbKwnb9MLmUQDhG6".to_string(),
                name: "Roygbiv".to_string(),
                artist: "Boards of Canada".to_string(),
            })
        );
    }
}
