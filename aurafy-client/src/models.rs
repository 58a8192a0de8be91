use std::fmt;

const TRACK_URI_PREFIX: &str = "spotify:track:";
const TRACK_URL_PREFIX: &str = "https://open.spotify.com/track/";
const TRACK_ID_LENGTH: usize = 22;

/// What is playing right now, as of the last poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackSnapshot {
    pub title: String,
    pub artist: String,
    pub album_art: Option<String>,
}

impl TrackSnapshot {
    /// Takes the first artist and the first album image, the same way the
    /// service lists them.
    pub fn from_parts<'a>(
        title: &str,
        artists: impl IntoIterator<Item = &'a str>,
        images: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        Self {
            title: title.to_string(),
            artist: artists.into_iter().next().unwrap_or_default().to_string(),
            album_art: images.into_iter().next().map(str::to_string),
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum RepeatMode {
    #[default]
    Off,
    Track,
    Context,
}

impl RepeatMode {
    pub fn is_on(self) -> bool {
        self != RepeatMode::Off
    }
}

impl fmt::Display for RepeatMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepeatMode::Off => write!(f, "off"),
            RepeatMode::Track => write!(f, "track"),
            RepeatMode::Context => write!(f, "context"),
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PlaybackState {
    pub track: Option<TrackSnapshot>,
    pub is_playing: bool,
    pub repeat: RepeatMode,
    pub shuffle: bool,
}

/// A track as returned by a catalog search, before numbering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackSummary {
    pub id: String,
    pub name: String,
    pub artist: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    /// 1-based.
    pub position: usize,
    pub name: String,
    pub artist: String,
    pub id: String,
}

impl SearchHit {
    pub fn uri(&self) -> String {
        format!("{TRACK_URI_PREFIX}{}", self.id)
    }
}

impl fmt::Display for SearchHit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}. {} - {} ({})",
            self.position,
            self.name,
            self.artist,
            self.uri()
        )
    }
}

/// Extracts the base62 track id from a `spotify:track:` uri, an
/// `open.spotify.com` link or a bare id.
pub fn parse_track_id(input: &str) -> Option<&str> {
    let input = input.trim();

    let id = if let Some(id) = input.strip_prefix(TRACK_URI_PREFIX) {
        id
    } else if let Some(rest) = input.strip_prefix(TRACK_URL_PREFIX) {
        rest.split(['?', '#', '/']).next().unwrap_or_default()
    } else {
        input
    };

    let valid = id.len() == TRACK_ID_LENGTH && id.chars().all(|c| c.is_ascii_alphanumeric());
    valid.then_some(id)
}
