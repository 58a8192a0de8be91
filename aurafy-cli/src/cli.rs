use std::{
    fs::File,
    path::PathBuf,
    sync::{Arc, Mutex},
    time::Duration,
};

use aurafy_client::{Client, Credentials, models::TrackSnapshot};
use aurafy_controls::{
    Action, Controller, Dispatcher, Outcome, RefreshPolicy, notification::NotificationBroadcast,
};
use clap::{Parser, Subcommand};
use snafu::prelude::*;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    #[clap(long, env = "CLIENT_ID", hide_env_values = true)]
    /// Spotify application client id.
    client_id: Option<String>,

    #[clap(long, env = "CLIENT_SECRET", hide_env_values = true)]
    /// Spotify application client secret.
    client_secret: Option<String>,

    #[clap(long, env = "REDIRECT_URI")]
    /// Redirect uri registered for the application. [default: https://example.org]
    redirect_uri: Option<String>,

    #[clap(long, env = "SCOPE")]
    /// Space separated authorization scopes.
    scope: Option<String>,

    #[clap(short, long)]
    /// Log level. While the player is open logs go to aurafy.log in the cache directory.
    verbosity: Option<tracing::Level>,

    #[clap(long, default_value_t = 4)]
    /// Polls made after an action while waiting for it to show up.
    refresh_attempts: u32,

    #[clap(long, default_value_t = 250)]
    /// Delay before the second post-action poll, doubled after each poll.
    refresh_backoff_ms: u64,

    #[clap(long, default_value_t = 5)]
    /// Seconds between background refreshes in the player.
    poll_interval: u64,

    #[clap(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Commands {
    /// Open the player (default)
    Open,
    /// Print the track currently playing
    Status,
    /// Run a single action: play, pause, next, prev, repeat, shuffle, search <query>, queue <track>
    Control {
        action: String,
        argument: Option<String>,
    },
}

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("{error}"))]
    ClientError { error: String },
    #[snafu(display("{error}"))]
    PlayerError { error: String },
    #[snafu(display("{error}"))]
    TerminalError { error: String },
}

impl From<aurafy_client::Error> for Error {
    fn from(error: aurafy_client::Error) -> Self {
        Error::ClientError {
            error: error.to_string(),
        }
    }
}

impl From<aurafy_controls::error::Error> for Error {
    fn from(error: aurafy_controls::error::Error) -> Self {
        Error::PlayerError {
            error: error.to_string(),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Error::TerminalError {
            error: error.to_string(),
        }
    }
}

pub async fn run() -> Result<(), Error> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let command = cli.command.unwrap_or(Commands::Open);

    match log_file(&command, cli.verbosity) {
        Some(path) => {
            let file = File::create(&path)?;
            tracing_subscriber::fmt()
                .with_max_level(cli.verbosity)
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(false)
                .compact()
                .init();
        }
        None => tracing_subscriber::fmt()
            .with_max_level(cli.verbosity)
            .with_writer(std::io::stderr)
            .with_target(false)
            .compact()
            .init(),
    }

    let action = match &command {
        Commands::Control { action, argument } => Some(Action::named(action, argument.clone())?),
        _ => None,
    };

    let credentials = Credentials::new(
        cli.client_id.unwrap_or_default(),
        cli.client_secret.unwrap_or_default(),
        cli.redirect_uri,
        cli.scope,
    )?;

    let mut client = Client::new(&credentials)?;
    client.authorize().await?;

    let refresh = RefreshPolicy::new(
        cli.refresh_attempts,
        Duration::from_millis(cli.refresh_backoff_ms),
    );
    let mut dispatcher = Dispatcher::new(Arc::new(client), refresh);

    match (command, action) {
        (Commands::Control { .. }, Some(action)) => match dispatcher.dispatch(action).await? {
            Outcome::Playback(playback) => {
                print_track(playback.and_then(|playback| playback.track).as_ref());
            }
            Outcome::Matches(hits) => {
                println!("Search Results:");
                for hit in hits {
                    println!("{hit}");
                }
            }
        },
        (Commands::Status, _) => {
            let track = dispatcher.current_track().await?;
            print_track(track.as_ref());
        }
        _ => {
            let controller = Controller::new(dispatcher, Arc::new(NotificationBroadcast::new()));
            let poll_interval = Duration::from_secs(cli.poll_interval.max(1));

            aurafy_tui::init(controller, poll_interval).await?;
        }
    }

    Ok(())
}

// Log file used while the player holds the terminal.
fn log_file(command: &Commands, verbosity: Option<tracing::Level>) -> Option<PathBuf> {
    if *command != Commands::Open || verbosity.is_none() {
        return None;
    }

    let mut path = dirs::cache_dir().unwrap_or_else(std::env::temp_dir);
    path.push("aurafy");
    std::fs::create_dir_all(&path).ok()?;
    path.push("aurafy.log");
    Some(path)
}

fn print_track(track: Option<&TrackSnapshot>) {
    match track {
        Some(track) => {
            println!("{} - {}", track.title, track.artist);
            if let Some(album_art) = &track.album_art {
                println!("{album_art}");
            }
        }
        None => println!("No track playing"),
    }
}
