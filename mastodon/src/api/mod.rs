//! Mastodon REST API client
//!
//! One client is built at provider configure time and shared by every
//! adapter. Calls are not retried: any failure is surfaced to the caller
//! immediately.

pub mod accounts;
pub mod error;
pub mod statuses;

pub use accounts::Account;
pub use error::ApiError;
pub use statuses::{NewStatus, Status, Visibility};

use reqwest::header::AUTHORIZATION;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const OAUTH_SCOPE: &str = "read write";

/// Credentials resolved by the provider before the client is built.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub server: String,
    pub client_id: String,
    pub client_secret: String,
    pub auth: AuthMethod,
}

/// The two supported authentication methods. An access token wins when
/// both are present; email/password goes through the resource-owner grant.
#[derive(Debug, Clone)]
pub enum AuthMethod {
    AccessToken(String),
    Password { email: String, password: String },
}

#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    base_url: String,
    access_token: String,
}

#[derive(Serialize)]
struct TokenRequest<'a> {
    grant_type: &'a str,
    client_id: &'a str,
    client_secret: &'a str,
    username: &'a str,
    password: &'a str,
    scope: &'a str,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

impl Client {
    /// Build a client and resolve an access token for it. With an
    /// email/password pair the token is obtained via `POST /oauth/token`.
    pub async fn connect(credentials: Credentials) -> Result<Self, ApiError> {
        let base_url = Url::parse(&credentials.server)
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", credentials.server, e)))?
            .to_string()
            .trim_end_matches('/')
            .to_string();

        let http = reqwest::ClientBuilder::new()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        let access_token = match &credentials.auth {
            AuthMethod::AccessToken(token) => token.clone(),
            AuthMethod::Password { email, password } => {
                obtain_token(&http, &base_url, &credentials, email, password).await?
            }
        };

        Ok(Self {
            http,
            base_url,
            access_token,
        })
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("GET {}", url);
        self.send(self.http.get(&url)).await
    }

    pub(crate) async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("POST {}", url);
        self.send(self.http.post(&url).json(body)).await
    }

    pub(crate) async fn put<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("PUT {}", url);
        self.send(self.http.put(&url).json(body)).await
    }

    /// DELETE, discarding the response body.
    pub(crate) async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("DELETE {}", url);

        let response = self
            .http
            .delete(&url)
            .header(AUTHORIZATION, self.bearer())
            .send()
            .await?;
        Self::check_status(response).await.map(|_| ())
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = request.header(AUTHORIZATION, self.bearer()).send().await?;
        let text = Self::check_status(response).await?;
        serde_json::from_str(&text)
            .map_err(|e| ApiError::Parse(format!("{}; body: {}", e, text)))
    }

    async fn check_status(response: reqwest::Response) -> Result<String, ApiError> {
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(ApiError::AuthenticationFailed);
        }

        let text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());

        if !status.is_success() {
            tracing::error!("API error response: {}", text);
            return Err(ApiError::Api {
                status: status.as_u16(),
                message: text,
            });
        }

        Ok(text)
    }

    fn bearer(&self) -> String {
        format!("Bearer {}", self.access_token)
    }
}

async fn obtain_token(
    http: &reqwest::Client,
    base_url: &str,
    credentials: &Credentials,
    email: &str,
    password: &str,
) -> Result<String, ApiError> {
    let url = format!("{}/oauth/token", base_url);
    tracing::debug!("POST {}", url);

    let request = TokenRequest {
        grant_type: "password",
        client_id: &credentials.client_id,
        client_secret: &credentials.client_secret,
        username: email,
        password,
        scope: OAUTH_SCOPE,
    };

    let response = http.post(&url).form(&request).send().await?;
    let status = response.status();

    if status == reqwest::StatusCode::UNAUTHORIZED {
        return Err(ApiError::AuthenticationFailed);
    }

    let text = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());

    if !status.is_success() {
        tracing::error!("Token request failed: {}", text);
        return Err(ApiError::Api {
            status: status.as_u16(),
            message: text,
        });
    }

    let token: TokenResponse = serde_json::from_str(&text)
        .map_err(|e| ApiError::Parse(format!("{}; body: {}", e, text)))?;
    Ok(token.access_token)
}

#[cfg(test)]
pub(crate) mod test_helpers {
    use super::*;

    pub async fn connect_with_token(server_url: &str) -> Client {
        Client::connect(Credentials {
            server: server_url.to_string(),
            client_id: "client-id".to_string(),
            client_secret: "client-secret".to_string(),
            auth: AuthMethod::AccessToken("test-token".to_string()),
        })
        .await
        .unwrap()
    }
}
