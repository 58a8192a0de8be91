use crate::notification::Notification;
use snafu::prelude::*;

#[derive(Snafu, Debug)]
pub enum Error {
    #[snafu(display("{message}"))]
    Client { message: String },
    #[snafu(display("Unknown action: {name}"))]
    UnknownAction { name: String },
    #[snafu(display("{action} needs an argument"))]
    MissingArgument { action: &'static str },
    #[snafu(display("{action} takes no argument"))]
    UnexpectedArgument { action: &'static str },
    #[snafu(display("Unable to broadcast notification"))]
    Notification,
}

impl From<aurafy_client::Error> for Error {
    fn from(value: aurafy_client::Error) -> Self {
        Error::Client {
            message: value.to_string(),
        }
    }
}

impl From<tokio::sync::broadcast::error::SendError<Notification>> for Error {
    fn from(_value: tokio::sync::broadcast::error::SendError<Notification>) -> Self {
        Self::Notification
    }
}
