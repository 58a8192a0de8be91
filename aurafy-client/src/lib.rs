use std::path::PathBuf;

use snafu::prelude::*;

pub mod api;
pub mod client;
pub mod credentials;
pub mod models;

pub use api::PlaybackApi;
pub use client::Client;
pub use credentials::Credentials;

#[derive(Snafu, Debug)]
pub enum Error {
    #[snafu(display("Missing {field}. Set it in the environment or pass it as an argument"))]
    MissingCredential { field: &'static str },
    #[snafu(display("{message}"))]
    Api { message: String },
    #[snafu(display("Not a track id or uri: {input}"))]
    InvalidTrack { input: String },
    #[snafu(display("Unable to find a cache directory for the token"))]
    TokenCache,
    #[snafu(display("Unable to create {}: {source}", path.display()))]
    CacheDirectory {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl From<rspotify::ClientError> for Error {
    fn from(value: rspotify::ClientError) -> Self {
        Error::Api {
            message: value.to_string(),
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
