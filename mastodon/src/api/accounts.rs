//! Account API operations

use super::{ApiError, Client};
use serde::Deserialize;

/// An account as returned by the server. Read-only from the provider's
/// perspective.
#[derive(Debug, Clone, Deserialize)]
pub struct Account {
    pub id: String,
    pub username: String,
    /// Username including the domain qualifier for remote accounts.
    pub acct: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub locked: bool,
    #[serde(default)]
    pub bot: bool,
}

impl Client {
    /// GET /api/v1/accounts/verify_credentials
    ///
    /// Fetches the account the client is authenticated as. Used once at
    /// configure time to prove the credentials are live.
    pub async fn verify_credentials(&self) -> Result<Account, ApiError> {
        self.get("/api/v1/accounts/verify_credentials").await
    }

    /// GET /api/v1/accounts/lookup?acct={acct}
    pub async fn lookup_account(&self, acct: &str) -> Result<Account, ApiError> {
        let path = format!("/api/v1/accounts/lookup?acct={}", urlencoding::encode(acct));
        self.get(&path).await
    }
}
