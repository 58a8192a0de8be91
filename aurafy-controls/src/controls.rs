use std::{fmt, sync::Arc};

use aurafy_client::models::{PlaybackState, SearchHit};
use tokio::sync::broadcast::Receiver;
use tracing::{error, warn};

use crate::{
    Error, Result,
    dispatcher::{Dispatcher, PlaybackModes},
    notification::{Notification, NotificationBroadcast},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Play,
    Pause,
    Next,
    Previous,
    Repeat,
    Shuffle,
    Search(String),
    Queue(String),
}

impl Action {
    /// Resolves an action by name. `search` and `queue` need an argument,
    /// the rest refuse one.
    pub fn named(name: &str, argument: Option<String>) -> Result<Self> {
        let action = match name.trim().to_ascii_lowercase().as_str() {
            "play" => Action::Play,
            "pause" => Action::Pause,
            "next" => Action::Next,
            "prev" | "previous" => Action::Previous,
            "repeat" => Action::Repeat,
            "shuffle" => Action::Shuffle,
            "search" => {
                return match argument {
                    Some(query) if !query.trim().is_empty() => Ok(Action::Search(query)),
                    _ => Err(Error::MissingArgument { action: "search" }),
                };
            }
            "queue" => {
                return match argument {
                    Some(track) if !track.trim().is_empty() => Ok(Action::Queue(track)),
                    _ => Err(Error::MissingArgument { action: "queue" }),
                };
            }
            _ => {
                return Err(Error::UnknownAction {
                    name: name.to_string(),
                });
            }
        };

        match argument {
            Some(_) => Err(Error::UnexpectedArgument {
                action: action.name(),
            }),
            None => Ok(action),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Action::Play => "play",
            Action::Pause => "pause",
            Action::Next => "next",
            Action::Previous => "prev",
            Action::Repeat => "repeat",
            Action::Shuffle => "shuffle",
            Action::Search(_) => "search",
            Action::Queue(_) => "queue",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Action::Search(query) => write!(f, "search {query:?}"),
            Action::Queue(track) => write!(f, "queue {track}"),
            action => f.write_str(action.name()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Playback as re-queried after the action.
    Playback(Option<PlaybackState>),
    Matches(Vec<SearchHit>),
}

/// Best-effort front for the [`Dispatcher`].
///
/// Failures are logged and published as notifications. Callers only ever
/// see `None`.
pub struct Controller {
    dispatcher: Dispatcher,
    broadcast: Arc<NotificationBroadcast>,
}

impl Controller {
    pub fn new(dispatcher: Dispatcher, broadcast: Arc<NotificationBroadcast>) -> Self {
        Self {
            dispatcher,
            broadcast,
        }
    }

    pub fn modes(&self) -> PlaybackModes {
        self.dispatcher.modes()
    }

    pub fn notifications(&self) -> Receiver<Notification> {
        self.broadcast.subscribe()
    }

    pub async fn run(&mut self, action: Action) -> Option<Outcome> {
        let name = action.name();
        let queued = matches!(action, Action::Queue(_));

        match self.dispatcher.dispatch(action).await {
            Ok(outcome) => {
                if queued {
                    self.notify(Notification::Info("Added track to queue".to_string()));
                }
                Some(outcome)
            }
            Err(err) => {
                error!("Error performing {name}: {err}");
                self.notify(Notification::Error(format!("Error performing {name}: {err}")));
                None
            }
        }
    }

    /// Pauses when the service reports playback, plays otherwise. Polls
    /// first, so a change made on another device is taken into account.
    pub async fn toggle_playback(&mut self) -> Option<Outcome> {
        let playing = self.refresh().await?.is_some_and(|state| state.is_playing);

        let action = match playing {
            true => Action::Pause,
            false => Action::Play,
        };
        self.run(action).await
    }

    /// Polls current playback. `None` when the poll failed.
    pub async fn refresh(&mut self) -> Option<Option<PlaybackState>> {
        match self.dispatcher.playback().await {
            Ok(state) => Some(state),
            Err(err) => {
                error!("Error fetching playback: {err}");
                self.notify(Notification::Error(format!("Error fetching playback: {err}")));
                None
            }
        }
    }

    fn notify(&self, notification: Notification) {
        if let Err(err) = self.broadcast.send(notification) {
            warn!("{err}");
        }
    }
}
