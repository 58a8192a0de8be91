use crate::{Error, Result};

pub const DEFAULT_REDIRECT_URI: &str = "https://example.org";
pub const DEFAULT_SCOPE: &str = "user-read-playback-state user-modify-playback-state \
playlist-modify-public playlist-modify-private user-top-read";

/// Application credentials for the Spotify Web API.
///
/// Built once at startup and handed to [`crate::Client::new`]. Nothing reads
/// them from the environment after that.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    client_id: String,
    client_secret: String,
    redirect_uri: String,
    scope: String,
}

impl Credentials {
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        redirect_uri: Option<String>,
        scope: Option<String>,
    ) -> Result<Self> {
        let client_id = client_id.into().trim().to_string();
        let client_secret = client_secret.into().trim().to_string();

        if client_id.is_empty() {
            return Err(Error::MissingCredential { field: "CLIENT_ID" });
        }

        if client_secret.is_empty() {
            return Err(Error::MissingCredential {
                field: "CLIENT_SECRET",
            });
        }

        Ok(Self {
            client_id,
            client_secret,
            redirect_uri: redirect_uri.unwrap_or_else(|| DEFAULT_REDIRECT_URI.to_string()),
            scope: scope.unwrap_or_else(|| DEFAULT_SCOPE.to_string()),
        })
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn client_secret(&self) -> &str {
        &self.client_secret
    }

    pub fn redirect_uri(&self) -> &str {
        &self.redirect_uri
    }

    pub fn scope(&self) -> &str {
        &self.scope
    }

    pub fn scopes(&self) -> impl Iterator<Item = &str> {
        self.scope.split_whitespace()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_redirect_and_scope() {
        let credentials = Credentials::new("id", "secret", None, None).unwrap();

        assert_eq!(credentials.redirect_uri(), "https://example.org");
        assert_eq!(
            credentials.scopes().collect::<Vec<_>>(),
            [
                "user-read-playback-state",
                "user-modify-playback-state",
                "playlist-modify-public",
                "playlist-modify-private",
                "user-top-read",
            ]
        );
    }

    #[test]
    fn rejects_empty_client_id() {
        let error = Credentials::new("  ", "secret", None, None).unwrap_err();
        assert!(matches!(
            error,
            Error::MissingCredential { field: "CLIENT_ID" }
        ));
    }

    #[test]
    fn rejects_empty_client_secret() {
        let error = Credentials::new("id", "", None, None).unwrap_err();
        assert!(matches!(
            error,
            Error::MissingCredential {
                field: "CLIENT_SECRET"
            }
        ));
    }

    #[test]
    fn trims_values() {
        let credentials = Credentials::new(" id\n", " secret ", None, None).unwrap();
        assert_eq!(credentials.client_id(), "id");
        assert_eq!(credentials.client_secret(), "secret");
    }
}
