//! Account data source implementation
//!
//! Read-only lookup of an account by username (including the domain
//! qualifier for remote accounts). Every read replaces all computed
//! fields; there is no merging with prior state.

use async_trait::async_trait;
use tfplug::context::Context;
use tfplug::data_source::{
    ConfigureDataSourceRequest, ConfigureDataSourceResponse, DataSource,
    DataSourceMetadataRequest, DataSourceMetadataResponse, DataSourceSchemaRequest,
    DataSourceSchemaResponse, DataSourceWithConfigure, ReadDataSourceRequest,
    ReadDataSourceResponse, ValidateDataSourceConfigRequest, ValidateDataSourceConfigResponse,
};
use tfplug::schema::{AttributeBuilder, AttributeType, Schema, SchemaBuilder};
use tfplug::types::{AttributePath, Diagnostic, DynamicValue};

#[derive(Default)]
pub struct AccountDataSource {
    provider_data: Option<crate::MastodonProviderData>,
}

impl AccountDataSource {
    pub fn new() -> Self {
        Self::default()
    }

    fn build_schema() -> Schema {
        SchemaBuilder::new()
            .version(0)
            .description("Looks up an account by username")
            .attribute(
                AttributeBuilder::new("username", AttributeType::String)
                    .description("Username of the account, including the domain for remote accounts")
                    .required()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("id", AttributeType::String)
                    .description("Account identifier")
                    .computed()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("display_name", AttributeType::String)
                    .description("Display name of the account")
                    .computed()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("note", AttributeType::String)
                    .description("Profile note of the account")
                    .computed()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("locked", AttributeType::Bool)
                    .description("Whether the account requires follow approval")
                    .computed()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("bot", AttributeType::Bool)
                    .description("Whether the account is marked as automated")
                    .computed()
                    .build(),
            )
            .build()
    }
}

#[async_trait]
impl DataSource for AccountDataSource {
    fn type_name(&self) -> &str {
        "mastodon_account"
    }

    async fn metadata(
        &self,
        _ctx: Context,
        _request: DataSourceMetadataRequest,
    ) -> DataSourceMetadataResponse {
        DataSourceMetadataResponse {
            type_name: self.type_name().to_string(),
        }
    }

    async fn schema(
        &self,
        _ctx: Context,
        _request: DataSourceSchemaRequest,
    ) -> DataSourceSchemaResponse {
        DataSourceSchemaResponse {
            schema: Self::build_schema(),
            diagnostics: vec![],
        }
    }

    async fn validate(
        &self,
        _ctx: Context,
        request: ValidateDataSourceConfigRequest,
    ) -> ValidateDataSourceConfigResponse {
        ValidateDataSourceConfigResponse {
            diagnostics: tfplug::plan::validate_config(&Self::build_schema(), &request.config),
        }
    }

    async fn read(&self, _ctx: Context, request: ReadDataSourceRequest) -> ReadDataSourceResponse {
        let mut diagnostics = vec![];

        tracing::debug!("mastodon_account data source read");

        let username = match request.config.get_string(&AttributePath::new("username")) {
            Ok(username) => username,
            Err(_) => {
                diagnostics.push(
                    Diagnostic::error(
                        "Missing username",
                        "The \"username\" attribute is required",
                    )
                    .with_attribute(AttributePath::new("username")),
                );
                return ReadDataSourceResponse {
                    state: DynamicValue::null(),
                    diagnostics,
                };
            }
        };

        let provider_data = match &self.provider_data {
            Some(data) => data,
            None => {
                diagnostics.push(Diagnostic::error(
                    "Provider not configured",
                    "Provider data was not properly configured",
                ));
                return ReadDataSourceResponse {
                    state: DynamicValue::null(),
                    diagnostics,
                };
            }
        };

        match provider_data.client.lookup_account(&username).await {
            Ok(account) => {
                let mut state = DynamicValue::empty_object();
                let _ = state.set_string(&AttributePath::new("username"), username);
                let _ = state.set_string(&AttributePath::new("id"), account.id);
                let _ = state.set_string(
                    &AttributePath::new("display_name"),
                    account.display_name,
                );
                let _ = state.set_string(&AttributePath::new("note"), account.note);
                let _ = state.set_bool(&AttributePath::new("locked"), account.locked);
                let _ = state.set_bool(&AttributePath::new("bot"), account.bot);

                ReadDataSourceResponse {
                    state,
                    diagnostics,
                }
            }
            Err(e) => {
                diagnostics.push(Diagnostic::error(
                    "Failed to lookup account",
                    format!("Failed to lookup account: {}", e),
                ));
                ReadDataSourceResponse {
                    state: DynamicValue::null(),
                    diagnostics,
                }
            }
        }
    }
}

#[async_trait]
impl DataSourceWithConfigure for AccountDataSource {
    async fn configure(
        &mut self,
        _ctx: Context,
        request: ConfigureDataSourceRequest,
    ) -> ConfigureDataSourceResponse {
        let mut diagnostics = vec![];

        if let Some(data) = request.provider_data {
            if let Some(provider_data) = data.downcast_ref::<crate::MastodonProviderData>() {
                self.provider_data = Some(provider_data.clone());
            } else {
                diagnostics.push(Diagnostic::error(
                    "Unexpected data source configure type",
                    "Expected MastodonProviderData. Please report this issue to the provider developers.",
                ));
            }
        } else {
            diagnostics.push(Diagnostic::error(
                "No provider data",
                "No provider data was provided to the data source",
            ));
        }

        ConfigureDataSourceResponse { diagnostics }
    }
}
