//! Status (post) API operations

use super::{Account, ApiError, Client};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Who can see a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Public,
    Unlisted,
    Private,
    Direct,
}

impl Visibility {
    pub const VALUES: [&'static str; 4] = ["public", "unlisted", "private", "direct"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Unlisted => "unlisted",
            Visibility::Private => "private",
            Visibility::Direct => "direct",
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Visibility {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "public" => Ok(Visibility::Public),
            "unlisted" => Ok(Visibility::Unlisted),
            "private" => Ok(Visibility::Private),
            "direct" => Ok(Visibility::Direct),
            other => Err(format!(
                "visibility must be one of {}, got \"{}\"",
                Self::VALUES.join(", "),
                other
            )),
        }
    }
}

/// A post as returned by the server. `content` is the server-rendered HTML.
#[derive(Debug, Clone, Deserialize)]
pub struct Status {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub account: Account,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default)]
    pub sensitive: bool,
}

/// Request body for creating or replacing a post.
#[derive(Debug, Clone, Serialize)]
pub struct NewStatus {
    pub status: String,
    pub visibility: Visibility,
    pub sensitive: bool,
}

impl Client {
    /// POST /api/v1/statuses
    pub async fn post_status(&self, new_status: &NewStatus) -> Result<Status, ApiError> {
        self.post("/api/v1/statuses", new_status).await
    }

    /// GET /api/v1/statuses/{id}
    pub async fn get_status(&self, id: &str) -> Result<Status, ApiError> {
        self.get(&format!("/api/v1/statuses/{}", id)).await
    }

    /// PUT /api/v1/statuses/{id}
    pub async fn update_status(&self, id: &str, new_status: &NewStatus) -> Result<Status, ApiError> {
        self.put(&format!("/api/v1/statuses/{}", id), new_status)
            .await
    }

    /// DELETE /api/v1/statuses/{id}
    pub async fn delete_status(&self, id: &str) -> Result<(), ApiError> {
        self.delete(&format!("/api/v1/statuses/{}", id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_helpers::connect_with_token;
    use super::*;
    use mockito::{Matcher, Server};

    const STATUS_BODY: &str = r#"{
        "id": "109302",
        "created_at": "2022-11-01T12:00:00.000Z",
        "content": "<p>First Test Post</p>",
        "visibility": "public",
        "sensitive": false,
        "account": {"id": "14715", "username": "trurl", "acct": "trurl"}
    }"#;

    #[tokio::test]
    async fn post_status_sends_body_and_parses_response() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/api/v1/statuses")
            .match_body(Matcher::PartialJson(serde_json::json!({
                "status": "First Test Post",
                "visibility": "public",
                "sensitive": false
            })))
            .with_body(STATUS_BODY)
            .create_async()
            .await;

        let client = connect_with_token(&server.url()).await;
        let status = client
            .post_status(&NewStatus {
                status: "First Test Post".to_string(),
                visibility: Visibility::Public,
                sensitive: false,
            })
            .await
            .unwrap();

        assert_eq!(status.id, "109302");
        assert_eq!(status.content, "<p>First Test Post</p>");
        assert_eq!(status.visibility, Visibility::Public);
        assert_eq!(status.account.id, "14715");
        assert_eq!(status.created_at.to_rfc3339(), "2022-11-01T12:00:00+00:00");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn get_status_fetches_by_id() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/api/v1/statuses/109302")
            .with_body(STATUS_BODY)
            .create_async()
            .await;

        let client = connect_with_token(&server.url()).await;
        let status = client.get_status("109302").await.unwrap();

        assert_eq!(status.id, "109302");
        assert!(!status.sensitive);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn update_status_puts_full_replacement() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("PUT", "/api/v1/statuses/109302")
            .match_body(Matcher::PartialJson(serde_json::json!({
                "status": "Post After Update",
                "visibility": "unlisted",
                "sensitive": true
            })))
            .with_body(
                r#"{
                "id": "109302",
                "created_at": "2022-11-01T12:00:00.000Z",
                "content": "<p>Post After Update</p>",
                "visibility": "unlisted",
                "sensitive": true,
                "account": {"id": "14715", "username": "trurl", "acct": "trurl"}
            }"#,
            )
            .create_async()
            .await;

        let client = connect_with_token(&server.url()).await;
        let status = client
            .update_status(
                "109302",
                &NewStatus {
                    status: "Post After Update".to_string(),
                    visibility: Visibility::Unlisted,
                    sensitive: true,
                },
            )
            .await
            .unwrap();

        assert_eq!(status.content, "<p>Post After Update</p>");
        assert_eq!(status.visibility, Visibility::Unlisted);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn delete_status_ignores_response_body() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("DELETE", "/api/v1/statuses/109302")
            .with_body(STATUS_BODY)
            .create_async()
            .await;

        let client = connect_with_token(&server.url()).await;
        client.delete_status("109302").await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn delete_status_surfaces_errors() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("DELETE", "/api/v1/statuses/109302")
            .with_status(404)
            .with_body(r#"{"error":"Record not found"}"#)
            .create_async()
            .await;

        let client = connect_with_token(&server.url()).await;
        let result = client.delete_status("109302").await;
        assert!(matches!(result, Err(ApiError::Api { status: 404, .. })));
    }

    #[test]
    fn visibility_round_trips_through_strings() {
        for value in Visibility::VALUES {
            let parsed: Visibility = value.parse().unwrap();
            assert_eq!(parsed.as_str(), value);
        }
        assert!("everyone".parse::<Visibility>().is_err());
    }

    #[test]
    fn visibility_defaults_to_public() {
        assert_eq!(Visibility::default(), Visibility::Public);
    }
}
