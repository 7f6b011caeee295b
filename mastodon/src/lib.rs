//! Terraform provider for Mastodon
//!
//! The provider resolves one credential set from configuration and
//! environment, builds a single API client shared by every adapter, and
//! exposes the `mastodon_post` resource, the `mastodon_account` data
//! source and the `identity` function.

pub mod api;
pub mod data_sources;
pub mod functions;
pub mod provider_data;
pub mod resources;
pub mod sanitize;

pub use provider_data::MastodonProviderData;

use api::{AuthMethod, Client, Credentials};
use async_trait::async_trait;
use std::sync::Arc;
use tfplug::context::Context;
use tfplug::data_source::DataSourceWithConfigure;
use tfplug::function::Function;
use tfplug::provider::{
    ConfigureProviderRequest, ConfigureProviderResponse, Provider, ProviderMetadataRequest,
    ProviderMetadataResponse, ProviderSchemaRequest, ProviderSchemaResponse,
};
use tfplug::resource::ResourceWithConfigure;
use tfplug::schema::{AttributeBuilder, AttributeType, SchemaBuilder};
use tfplug::types::{has_errors, AttributePath, Diagnostic, Dynamic, DynamicValue};
use tfplug::{Result, TfplugError};

const ENV_HOST: &str = "MASTODON_HOST";
const ENV_CLIENT_ID: &str = "MASTODON_CLIENT_ID";
const ENV_CLIENT_SECRET: &str = "MASTODON_CLIENT_SECRET";
const ENV_USER_EMAIL: &str = "MASTODON_USER_EMAIL";
const ENV_USER_PASSWORD: &str = "MASTODON_USER_PASSWORD";
const ENV_ACCESS_TOKEN: &str = "MASTODON_ACCESS_TOKEN";

pub struct MastodonProvider {
    version: String,
    data: Option<MastodonProviderData>,
}

impl MastodonProvider {
    pub fn new(version: &str) -> Self {
        Self {
            version: version.to_string(),
            data: None,
        }
    }

    /// The shared client payload, available once configure has succeeded.
    pub fn provider_data(&self) -> Option<&MastodonProviderData> {
        self.data.as_ref()
    }
}

impl Default for MastodonProvider {
    fn default() -> Self {
        Self::new("dev")
    }
}

/// Resolve a single configuration value: the configured value wins, the
/// environment variable is the fallback, empty strings count as unset.
/// An unknown configured value is a configuration error on that field.
fn resolve_setting(
    config: &DynamicValue,
    name: &str,
    env_var: &str,
    diagnostics: &mut Vec<Diagnostic>,
) -> Option<String> {
    let path = AttributePath::new(name);

    match config.get(&path) {
        Some(Dynamic::Unknown) => {
            diagnostics.push(
                Diagnostic::error(
                    format!("Unknown value for \"{}\"", name),
                    format!(
                        "The provider cannot create the Mastodon API client with an unknown \
                         value for \"{}\". Set the value statically in the configuration, or \
                         use the {} environment variable.",
                        name, env_var
                    ),
                )
                .with_attribute(path),
            );
            None
        }
        Some(Dynamic::String(s)) if !s.is_empty() => Some(s.clone()),
        _ => std::env::var(env_var).ok().filter(|v| !v.is_empty()),
    }
}

fn missing_setting(name: &str, env_var: &str) -> Diagnostic {
    Diagnostic::error(
        "Missing Mastodon credentials",
        format!(
            "The provider cannot create the Mastodon API client because \"{}\" is not set. \
             Set it in the provider configuration or via the {} environment variable.",
            name, env_var
        ),
    )
    .with_attribute(AttributePath::new(name))
}

#[async_trait]
impl Provider for MastodonProvider {
    fn type_name(&self) -> &str {
        "mastodon"
    }

    async fn metadata(
        &self,
        _ctx: Context,
        _request: ProviderMetadataRequest,
    ) -> ProviderMetadataResponse {
        ProviderMetadataResponse {
            type_name: self.type_name().to_string(),
            version: self.version.clone(),
        }
    }

    async fn schema(
        &self,
        _ctx: Context,
        _request: ProviderSchemaRequest,
    ) -> ProviderSchemaResponse {
        let schema = SchemaBuilder::new()
            .version(0)
            .description("Interact with a Mastodon instance")
            .attribute(
                AttributeBuilder::new("host", AttributeType::String)
                    .description("Mastodon host to connect to")
                    .optional()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("client_id", AttributeType::String)
                    .description("Client ID for the Mastodon app")
                    .optional()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("client_secret", AttributeType::String)
                    .description("Client secret for the Mastodon app")
                    .optional()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("email", AttributeType::String)
                    .description("Email address to connect to the server as")
                    .optional()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("password", AttributeType::String)
                    .description("Password to use for connecting to the server")
                    .optional()
                    .sensitive()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("access_token", AttributeType::String)
                    .description("Access token to use for connecting to the server")
                    .optional()
                    .sensitive()
                    .deprecated()
                    .build(),
            )
            .build();

        ProviderSchemaResponse {
            schema,
            diagnostics: vec![],
        }
    }

    async fn configure(
        &mut self,
        ctx: Context,
        request: ConfigureProviderRequest,
    ) -> ConfigureProviderResponse {
        let mut diagnostics = vec![];

        tracing::debug!("mastodon provider configure");

        let host = resolve_setting(&request.config, "host", ENV_HOST, &mut diagnostics);
        let client_id =
            resolve_setting(&request.config, "client_id", ENV_CLIENT_ID, &mut diagnostics);
        let client_secret = resolve_setting(
            &request.config,
            "client_secret",
            ENV_CLIENT_SECRET,
            &mut diagnostics,
        );
        let email = resolve_setting(&request.config, "email", ENV_USER_EMAIL, &mut diagnostics);
        let password = resolve_setting(
            &request.config,
            "password",
            ENV_USER_PASSWORD,
            &mut diagnostics,
        );
        let access_token = resolve_setting(
            &request.config,
            "access_token",
            ENV_ACCESS_TOKEN,
            &mut diagnostics,
        );

        if host.is_none() {
            diagnostics.push(missing_setting("host", ENV_HOST));
        }
        if client_id.is_none() {
            diagnostics.push(missing_setting("client_id", ENV_CLIENT_ID));
        }
        if client_secret.is_none() {
            diagnostics.push(missing_setting("client_secret", ENV_CLIENT_SECRET));
        }

        // An access token wins; otherwise a complete email/password pair is
        // required. All missing-field errors are collected before returning.
        let auth = match (access_token, email, password) {
            (Some(token), _, _) => Some(AuthMethod::AccessToken(token)),
            (None, Some(email), Some(password)) => Some(AuthMethod::Password { email, password }),
            _ => None,
        };
        if auth.is_none() {
            diagnostics.push(
                Diagnostic::error(
                    "Missing Mastodon credentials",
                    format!(
                        "The provider cannot create the Mastodon API client because neither \
                         an access token nor a complete email and password pair is set. Set \
                         \"access_token\" ({}) or both \"email\" ({}) and \"password\" ({}).",
                        ENV_ACCESS_TOKEN, ENV_USER_EMAIL, ENV_USER_PASSWORD
                    ),
                )
                .with_attribute(AttributePath::new("access_token")),
            );
        }

        if has_errors(&diagnostics) {
            return ConfigureProviderResponse {
                diagnostics,
                provider_data: None,
            };
        }

        let (host, client_id, client_secret, auth) = match (host, client_id, client_secret, auth) {
            (Some(host), Some(client_id), Some(client_secret), Some(auth)) => {
                (host, client_id, client_secret, auth)
            }
            _ => {
                return ConfigureProviderResponse {
                    diagnostics,
                    provider_data: None,
                }
            }
        };

        // Attach secrets to the context masked, so any logging of resolved
        // credentials stays redacted.
        let ctx = match &auth {
            AuthMethod::AccessToken(token) => {
                ctx.with_masked_value("mastodon_access_token", token.clone())
                    .await
            }
            AuthMethod::Password { email, password } => {
                ctx.with_value("mastodon_user_email", email.clone())
                    .await
                    .with_masked_value("mastodon_user_password", password.clone())
                    .await
            }
        };
        let redacted = match ctx.log_value("mastodon_access_token").await {
            Some(value) => value,
            None => ctx
                .log_value("mastodon_user_password")
                .await
                .unwrap_or_default(),
        };
        tracing::debug!(host = %host, credentials = %redacted, "mastodon credentials resolved");

        let client = match Client::connect(Credentials {
            server: host,
            client_id,
            client_secret,
            auth,
        })
        .await
        {
            Ok(client) => client,
            Err(e) => {
                diagnostics.push(Diagnostic::error(
                    "Failed to create Mastodon API client",
                    e.to_string(),
                ));
                return ConfigureProviderResponse {
                    diagnostics,
                    provider_data: None,
                };
            }
        };

        // One validating call; a failure here is a hard configure error.
        match client.verify_credentials().await {
            Ok(user) => {
                tracing::debug!(account = %user.acct, "mastodon provider configured");
            }
            Err(e) => {
                tracing::error!("verify_credentials failed: {}", e);
                diagnostics.push(Diagnostic::error(
                    "Mastodon credential verification failed, API is not usable",
                    e.to_string(),
                ));
                return ConfigureProviderResponse {
                    diagnostics,
                    provider_data: None,
                };
            }
        }

        let data = MastodonProviderData::new(client);
        self.data = Some(data.clone());

        ConfigureProviderResponse {
            diagnostics,
            provider_data: Some(Arc::new(data)),
        }
    }

    fn create_resource(&self, type_name: &str) -> Result<Box<dyn ResourceWithConfigure>> {
        match type_name {
            "mastodon_post" => Ok(Box::new(resources::PostResource::new())),
            other => Err(TfplugError::ResourceNotFound(other.to_string())),
        }
    }

    fn create_data_source(&self, type_name: &str) -> Result<Box<dyn DataSourceWithConfigure>> {
        match type_name {
            "mastodon_account" => Ok(Box::new(data_sources::AccountDataSource::new())),
            other => Err(TfplugError::DataSourceNotFound(other.to_string())),
        }
    }

    fn create_function(&self, name: &str) -> Result<Box<dyn Function>> {
        match name {
            "identity" => Ok(Box::new(functions::IdentityFunction::new())),
            other => Err(TfplugError::FunctionNotFound(other.to_string())),
        }
    }
}
