use error::Error;

pub mod controls;
pub mod dispatcher;
pub mod error;
pub mod notification;
pub mod refresh;

#[cfg(test)]
mod fake;

pub use controls::{Action, Controller, Outcome};
pub use dispatcher::{Dispatcher, PlaybackModes, SEARCH_LIMIT};
pub use refresh::RefreshPolicy;

pub type Result<T, E = Error> = std::result::Result<T, E>;
