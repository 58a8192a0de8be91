use crate::ui::block;
use aurafy_client::models::{PlaybackState, RepeatMode, TrackSnapshot};
use image::load_from_memory;
use ratatui::{prelude::*, widgets::*};
use ratatui_image::{StatefulImage, picker::Picker, protocol::StatefulProtocol};
use reqwest::Client;

pub(crate) const PLACEHOLDER: &str = "No track playing";

#[derive(Default)]
pub(crate) struct NowPlayingState {
    pub(crate) image: Option<(StatefulProtocol, f32)>,
    pub(crate) image_url: Option<String>,
    pub(crate) track: Option<TrackSnapshot>,
    pub(crate) is_playing: bool,
    pub(crate) repeat: RepeatMode,
    pub(crate) shuffle: bool,
}

#[derive(Debug, PartialEq)]
pub(crate) enum ArtChange {
    Keep,
    Clear,
    Fetch(String),
}

impl NowPlayingState {
    /// Applies a poll. Repeat and shuffle shown are the ones the service
    /// reported.
    pub(crate) async fn update(&mut self, playback: Option<PlaybackState>) {
        let playback = playback.unwrap_or_default();

        let change = self.art_change(
            playback
                .track
                .as_ref()
                .and_then(|track| track.album_art.as_deref()),
        );

        self.track = playback.track;
        self.is_playing = playback.is_playing;
        self.repeat = playback.repeat;
        self.shuffle = playback.shuffle;

        match change {
            ArtChange::Keep => {}
            ArtChange::Clear => {
                self.image = None;
                self.image_url = None;
            }
            ArtChange::Fetch(url) => {
                // A failed download keeps whatever art was there.
                if let Some(image) = fetch_image(&url).await {
                    self.image = Some(image);
                }
                self.image_url = Some(url);
            }
        }
    }

    pub(crate) fn art_change(&self, next: Option<&str>) -> ArtChange {
        match next {
            None => ArtChange::Clear,
            Some(url) if self.image_url.as_deref() == Some(url) => ArtChange::Keep,
            Some(url) => ArtChange::Fetch(url.to_string()),
        }
    }

    pub(crate) fn lines(&self) -> Vec<Line<'static>> {
        let Some(track) = &self.track else {
            return vec![Line::from(PLACEHOLDER).style(Style::new().italic())];
        };

        vec![
            Line::from(track.title.clone()).style(Style::new().bold()),
            Line::from(track.artist.clone()),
            Line::default(),
            Line::from(format!(
                "Repeat: {}  Shuffle: {}",
                on_off(self.repeat.is_on()),
                on_off(self.shuffle)
            ))
            .style(Style::new().dim()),
        ]
    }
}

pub(crate) fn render(frame: &mut Frame, area: Rect, state: &mut NowPlayingState) {
    let title = get_status(state);
    let block = block(title, false);

    let length = state
        .image
        .as_ref()
        .map(|image| image.1 * (area.height.saturating_mul(2).saturating_sub(1)) as f32)
        .map(|x| x as u16)
        .unwrap_or(0);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(length), Constraint::Min(1)])
        .split(block.inner(area));

    frame.render_widget(block, area);

    if let Some(image) = &mut state.image {
        let stateful_image = StatefulImage::default();
        frame.render_stateful_widget(stateful_image, chunks[0], &mut image.0);
    }

    let info = Paragraph::new(state.lines()).block(Block::new().padding(Padding::horizontal(1)));
    frame.render_widget(info, chunks[1]);
}

fn get_status(state: &NowPlayingState) -> &'static str {
    match (&state.track, state.is_playing) {
        (None, _) => "Idle",
        (Some(_), true) => "Playing ⏵",
        (Some(_), false) => "Paused ⏸ ",
    }
}

fn on_off(value: bool) -> &'static str {
    match value {
        true => "on",
        false => "off",
    }
}

async fn fetch_image(image_url: &str) -> Option<(StatefulProtocol, f32)> {
    let client = Client::new();
    let response = client.get(image_url).send().await.ok()?;
    let img_bytes = response.bytes().await.ok()?;

    let image = load_from_memory(&img_bytes).ok()?;
    let ratio = image.width() as f32 / image.height() as f32;

    let picker = Picker::from_query_stdio().ok()?;
    Some((picker.new_resize_protocol(image), ratio))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(art: Option<&str>) -> TrackSnapshot {
        TrackSnapshot {
            title: "Roygbiv".to_string(),
            artist: "Boards of Canada".to_string(),
            album_art: art.map(str::to_string),
        }
    }

    #[test]
    fn placeholder_without_track() {
        let lines = NowPlayingState::default().lines();

        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].to_string(), PLACEHOLDER);
    }

    #[test]
    fn shows_title_artist_and_modes() {
        let state = NowPlayingState {
            track: Some(track(None)),
            repeat: RepeatMode::Track,
            ..Default::default()
        };

        let lines: Vec<String> = state.lines().iter().map(Line::to_string).collect();

        assert_eq!(lines[0], "Roygbiv");
        assert_eq!(lines[1], "Boards of Canada");
        assert_eq!(lines[3], "Repeat: on  Shuffle: off");
    }

    #[test]
    fn art_is_fetched_only_when_url_changes() {
        let state = NowPlayingState {
            image_url: Some("https://i.scdn.co/image/a".to_string()),
            ..Default::default()
        };

        assert_eq!(state.art_change(Some("https://i.scdn.co/image/a")), ArtChange::Keep);
        assert_eq!(
            state.art_change(Some("https://i.scdn.co/image/b")),
            ArtChange::Fetch("https://i.scdn.co/image/b".to_string())
        );
        assert_eq!(state.art_change(None), ArtChange::Clear);
    }

    #[tokio::test]
    async fn nothing_playing_clears_everything() {
        let mut state = NowPlayingState {
            track: Some(track(Some("https://i.scdn.co/image/a"))),
            image_url: Some("https://i.scdn.co/image/a".to_string()),
            is_playing: true,
            shuffle: true,
            ..Default::default()
        };

        state.update(None).await;

        assert!(state.track.is_none());
        assert!(state.image.is_none());
        assert!(state.image_url.is_none());
        assert!(!state.is_playing);
        assert!(!state.shuffle);
        assert_eq!(get_status(&state), "Idle");
    }
}
