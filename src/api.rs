/*
 *  SteamLadder bot - Discord bot for looking up SteamLadder profiles within Discord.
 *  Copyright (C) 2025  Manuel de Castro
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  You should have received a copy of the GNU General Public License
 *  along with this program.  If not, see <https://www.gnu.org/licenses/>.
 */
use crate::profile::ProfileResponse;
use crate::query::{Identity, UpdateRequest};
use reqwest::{Method, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

/// Failures of a SteamLadder lookup.
///
/// The messages are sent as-is to the user who ran the command.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ApiError {
    #[error("Profile not found.")]
    NotFound,
    #[error("{0}")]
    RemoteError(String),
    #[error("Steam Ladder is busy, try again later.")]
    Busy,
    #[error("I could not process this request.")]
    RequestFailed,
}

/// Error body of SteamLadder's API.
#[derive(Deserialize)]
struct ErrorBody {
    error: Option<serde_json::Value>,
    detail: Option<serde_json::Value>,
}

impl ErrorBody {
    fn message(self) -> Option<String> {
        let value = self.error.or(self.detail)?;
        match value {
            serde_json::Value::String(msg) => Some(msg),
            serde_json::Value::Null => None,
            other => Some(other.to_string()),
        }
    }
}

const UNKNOWN_ERROR: &str = "Unknown error";

/**
 * Client for the profile endpoints of SteamLadder's API (version 2).
 *
 * Holds the HTTP connection pool, so it is built once and shared by every command.
 */
#[derive(Debug, Clone)]
pub struct SteamLadderClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl SteamLadderClient {
    pub fn new(base_url: &str, token: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        })
    }

    /// Path of the profile endpoint for an identity, without the version prefix.
    pub fn profile_path(identity: &Identity) -> String {
        let method = match identity {
            Identity::DiscordMention(_) => "discord",
            Identity::SteamId64(_) => "profile",
            Identity::SteamVanity(_) => "steam",
        };

        format!("{}/{}", method, identity.lookup())
    }

    /**
     * Fetches a profile from SteamLadder.
     *
     * Updates are requested with a POST, plain lookups with a GET. There is exactly one attempt.
     */
    pub async fn fetch_profile(
        &self,
        identity: &Identity,
        update: UpdateRequest,
    ) -> Result<ProfileResponse, ApiError> {
        let method = if update.update {
            Method::POST
        } else {
            Method::GET
        };
        let path = Self::profile_path(identity);
        let url = format!("{}/v2/{}/", self.base_url, path);

        tracing::info!(%method, %path, force = update.force, "Requesting SteamLadder profile");

        let response = self
            .http
            .request(method, &url)
            .header(reqwest::header::AUTHORIZATION, format!("Token {}", self.token))
            .query(&[("force", update.force)])
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let body = response.text().await.map_err(transport_error)?;

        match status {
            StatusCode::OK => serde_json::from_str(&body).map_err(|e| {
                tracing::error!(error = %e, %path, "SteamLadder returned an unreadable profile");
                ApiError::RequestFailed
            }),
            StatusCode::NOT_FOUND => Err(ApiError::NotFound),
            _ => Err(ApiError::RemoteError(error_message(status, &body))),
        }
    }
}

/// Classifies a failure of the HTTP request itself.
fn transport_error(e: reqwest::Error) -> ApiError {
    if e.is_timeout() {
        tracing::warn!(error = %e, "SteamLadder request timed out");
        ApiError::Busy
    } else {
        tracing::error!(error = %e, "SteamLadder request failed");
        ApiError::RequestFailed
    }
}

/// Extracts the `error` (or else `detail`) message of an error response.
fn error_message(status: StatusCode, body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(err) => err.message().unwrap_or_else(|| {
            tracing::error!(%status, body, "SteamLadder error without a message");
            UNKNOWN_ERROR.to_string()
        }),
        Err(e) => {
            tracing::error!(%status, error = %e, "Could not parse SteamLadder error body");
            UNKNOWN_ERROR.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serenity::all::UserId;

    const TOKEN: &str = "secret-token";

    fn client(server: &MockServer) -> SteamLadderClient {
        SteamLadderClient::new(&server.base_url(), TOKEN, Duration::from_secs(5)).unwrap()
    }

    fn vanity(name: &str) -> Identity {
        Identity::SteamVanity(name.to_string())
    }

    #[test]
    fn test_profile_paths() {
        assert_eq!(
            SteamLadderClient::profile_path(&Identity::DiscordMention(UserId::new(99))),
            "discord/99"
        );
        assert_eq!(
            SteamLadderClient::profile_path(&Identity::SteamId64("76561198025095947".into())),
            "profile/76561198025095947"
        );
        assert_eq!(SteamLadderClient::profile_path(&vanity("bob")), "steam/bob");
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(ApiError::NotFound.to_string(), "Profile not found.");
        assert_eq!(ApiError::RemoteError("Nope".into()).to_string(), "Nope");
        assert_eq!(
            ApiError::Busy.to_string(),
            "Steam Ladder is busy, try again later."
        );
        assert_eq!(
            ApiError::RequestFailed.to_string(),
            "I could not process this request."
        );
    }

    #[tokio::test]
    async fn test_get_profile() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/v2/profile/76561198025095947/")
                    .query_param("force", "false")
                    .header("Authorization", "Token secret-token");
                then.status(200)
                    .header("content-type", "application/json")
                    .body(r#"{"steam": {"name": "Bommels"}, "steamladder": {}}"#);
            })
            .await;

        let profile = client(&server)
            .fetch_profile(
                &Identity::SteamId64("76561198025095947".to_string()),
                UpdateRequest::default(),
            )
            .await
            .unwrap();

        assert_eq!(profile.steam().name().as_deref(), Some("Bommels"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_update_is_a_post() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/v2/discord/1234/")
                    .query_param("force", "true");
                then.status(200).body("{}");
            })
            .await;

        let update = UpdateRequest {
            update: true,
            force: true,
        };
        client(&server)
            .fetch_profile(&Identity::DiscordMention(UserId::new(1234)), update)
            .await
            .unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_not_found() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.path("/v2/steam/ghost/");
                then.status(404).body(r#"{"detail": "Not found."}"#);
            })
            .await;

        let err = client(&server)
            .fetch_profile(&vanity("ghost"), UpdateRequest::default())
            .await
            .unwrap_err();
        assert_eq!(err, ApiError::NotFound);
    }

    #[tokio::test]
    async fn test_remote_error_field() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.path("/v2/steam/bob/");
                then.status(429)
                    .body(r#"{"error": "Profile was updated recently.", "detail": "ignored"}"#);
            })
            .await;

        let err = client(&server)
            .fetch_profile(&vanity("bob"), UpdateRequest::default())
            .await
            .unwrap_err();
        assert_eq!(
            err,
            ApiError::RemoteError("Profile was updated recently.".to_string())
        );
    }

    #[tokio::test]
    async fn test_remote_detail_field() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.path("/v2/steam/bob/");
                then.status(401).body(r#"{"detail": "Invalid token."}"#);
            })
            .await;

        let err = client(&server)
            .fetch_profile(&vanity("bob"), UpdateRequest::default())
            .await
            .unwrap_err();
        assert_eq!(err, ApiError::RemoteError("Invalid token.".to_string()));
    }

    #[tokio::test]
    async fn test_unreadable_error_body() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.path("/v2/steam/bob/");
                then.status(500).body("<html>Internal Server Error</html>");
            })
            .await;

        let err = client(&server)
            .fetch_profile(&vanity("bob"), UpdateRequest::default())
            .await
            .unwrap_err();
        assert_eq!(err, ApiError::RemoteError("Unknown error".to_string()));
    }

    #[tokio::test]
    async fn test_error_body_without_message() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.path("/v2/steam/bob/");
                then.status(400).body(r#"{"something": "else"}"#);
            })
            .await;

        let err = client(&server)
            .fetch_profile(&vanity("bob"), UpdateRequest::default())
            .await
            .unwrap_err();
        assert_eq!(err, ApiError::RemoteError("Unknown error".to_string()));
    }

    #[tokio::test]
    async fn test_unreadable_profile() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.path("/v2/steam/bob/");
                then.status(200).body("not json");
            })
            .await;

        let err = client(&server)
            .fetch_profile(&vanity("bob"), UpdateRequest::default())
            .await
            .unwrap_err();
        assert_eq!(err, ApiError::RequestFailed);
    }

    #[tokio::test]
    async fn test_timeout_is_busy() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.path("/v2/steam/slow/");
                then.status(200).body("{}").delay(Duration::from_secs(2));
            })
            .await;

        let client =
            SteamLadderClient::new(&server.base_url(), TOKEN, Duration::from_millis(100)).unwrap();
        let err = client
            .fetch_profile(&vanity("slow"), UpdateRequest::default())
            .await
            .unwrap_err();
        assert_eq!(err, ApiError::Busy);
    }

    #[tokio::test]
    async fn test_connection_failure() {
        // Nothing listens on port 1.
        let client =
            SteamLadderClient::new("http://127.0.0.1:1", TOKEN, Duration::from_secs(5)).unwrap();
        let err = client
            .fetch_profile(&vanity("bob"), UpdateRequest::default())
            .await
            .unwrap_err();
        assert_eq!(err, ApiError::RequestFailed);
    }
}
