//! Post resource implementation
//!
//! Manages a single post on the server. The post id is assigned at create
//! and never changes; content, visibility and sensitive are the only
//! remotely mutable fields. `preserve_on_destroy` exists only in local
//! state and turns Delete into a no-op when set.

use crate::api::{NewStatus, Status, Visibility};
use crate::sanitize;
use async_trait::async_trait;
use tfplug::context::Context;
use tfplug::defaults::StaticDefault;
use tfplug::import::import_state_passthrough_id;
use tfplug::plan_modifier::UseStateForUnknown;
use tfplug::resource::{
    ConfigureResourceRequest, ConfigureResourceResponse, CreateResourceRequest,
    CreateResourceResponse, DeleteResourceRequest, DeleteResourceResponse,
    ImportResourceStateRequest, ImportResourceStateResponse, ReadResourceRequest,
    ReadResourceResponse, Resource, ResourceMetadataRequest, ResourceMetadataResponse,
    ResourceSchemaRequest, ResourceSchemaResponse, ResourceWithConfigure,
    ResourceWithImportState, UpdateResourceRequest, UpdateResourceResponse,
    ValidateResourceConfigRequest, ValidateResourceConfigResponse,
};
use tfplug::schema::{AttributeBuilder, AttributeType, Schema, SchemaBuilder};
use tfplug::types::{AttributePath, Diagnostic, DynamicValue};
use tfplug::validator::OneOf;

#[derive(Default)]
pub struct PostResource {
    provider_data: Option<crate::MastodonProviderData>,
}

impl PostResource {
    pub fn new() -> Self {
        Self::default()
    }

    fn build_schema() -> Schema {
        SchemaBuilder::new()
            .version(0)
            .description("Manages a post on a Mastodon instance")
            .attribute(
                AttributeBuilder::new("id", AttributeType::String)
                    .description("Unique identifier of the post")
                    .computed()
                    .plan_modifier(UseStateForUnknown::create())
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("created_at", AttributeType::String)
                    .description("Timestamp of when the post was created")
                    .computed()
                    .plan_modifier(UseStateForUnknown::create())
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("account", AttributeType::String)
                    .description("Identifier of the account that created the post")
                    .computed()
                    .plan_modifier(UseStateForUnknown::create())
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("content", AttributeType::String)
                    .description("The content of the post")
                    .required()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("visibility", AttributeType::String)
                    .description("The post visibility: public, unlisted, private or direct")
                    .optional()
                    .computed()
                    .default(StaticDefault::string("public"))
                    .validator(OneOf::create(&Visibility::VALUES))
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("sensitive", AttributeType::Bool)
                    .description("Whether the post contains sensitive content")
                    .optional()
                    .computed()
                    .default(StaticDefault::bool(false))
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("preserve_on_destroy", AttributeType::Bool)
                    .description("When destroyed, preserve the post on the server")
                    .optional()
                    .computed()
                    .default(StaticDefault::bool(false))
                    .build(),
            )
            .build()
    }

    /// Build the request body from a planned state or configuration value.
    fn new_status_from(&self, value: &DynamicValue) -> Result<NewStatus, Diagnostic> {
        let content = value
            .get_string(&AttributePath::new("content"))
            .map_err(|_| {
                Diagnostic::error("Missing content", "The \"content\" attribute is required")
                    .with_attribute(AttributePath::new("content"))
            })?;

        let visibility = match value.get_string(&AttributePath::new("visibility")) {
            Ok(s) => s.parse::<Visibility>().map_err(|e| {
                Diagnostic::error("Invalid visibility", e)
                    .with_attribute(AttributePath::new("visibility"))
            })?,
            Err(_) => Visibility::default(),
        };

        let sensitive = value
            .get_bool(&AttributePath::new("sensitive"))
            .unwrap_or(false);

        Ok(NewStatus {
            status: content,
            visibility,
            sensitive,
        })
    }

    /// Map a server record into state. Content is stripped of markup here,
    /// and only here, so every operation stores the same shape.
    fn state_from_status(&self, status: &Status, preserve_on_destroy: bool) -> DynamicValue {
        let mut state = DynamicValue::empty_object();
        let _ = state.set_string(&AttributePath::new("id"), status.id.clone());
        let _ = state.set_string(
            &AttributePath::new("created_at"),
            status.created_at.to_rfc3339(),
        );
        let _ = state.set_string(&AttributePath::new("account"), status.account.id.clone());
        let _ = state.set_string(
            &AttributePath::new("content"),
            sanitize::strip_html(&status.content),
        );
        let _ = state.set_string(
            &AttributePath::new("visibility"),
            status.visibility.to_string(),
        );
        let _ = state.set_bool(&AttributePath::new("sensitive"), status.sensitive);
        let _ = state.set_bool(
            &AttributePath::new("preserve_on_destroy"),
            preserve_on_destroy,
        );
        state
    }
}

#[async_trait]
impl Resource for PostResource {
    fn type_name(&self) -> &str {
        "mastodon_post"
    }

    async fn metadata(
        &self,
        _ctx: Context,
        _request: ResourceMetadataRequest,
    ) -> ResourceMetadataResponse {
        ResourceMetadataResponse {
            type_name: self.type_name().to_string(),
        }
    }

    async fn schema(
        &self,
        _ctx: Context,
        _request: ResourceSchemaRequest,
    ) -> ResourceSchemaResponse {
        ResourceSchemaResponse {
            schema: Self::build_schema(),
            diagnostics: vec![],
        }
    }

    async fn validate(
        &self,
        _ctx: Context,
        request: ValidateResourceConfigRequest,
    ) -> ValidateResourceConfigResponse {
        ValidateResourceConfigResponse {
            diagnostics: tfplug::plan::validate_config(&Self::build_schema(), &request.config),
        }
    }

    async fn create(
        &self,
        _ctx: Context,
        request: CreateResourceRequest,
    ) -> CreateResourceResponse {
        let mut diagnostics = vec![];

        let provider_data = match &self.provider_data {
            Some(data) => data,
            None => {
                diagnostics.push(Diagnostic::error(
                    "Provider not configured",
                    "Provider data was not properly configured",
                ));
                return CreateResourceResponse {
                    new_state: request.planned_state,
                    diagnostics,
                };
            }
        };

        let new_status = match self.new_status_from(&request.planned_state) {
            Ok(new_status) => new_status,
            Err(diag) => {
                diagnostics.push(diag);
                return CreateResourceResponse {
                    new_state: request.planned_state,
                    diagnostics,
                };
            }
        };

        let preserve_on_destroy = request
            .planned_state
            .get_bool(&AttributePath::new("preserve_on_destroy"))
            .unwrap_or(false);

        match provider_data.client.post_status(&new_status).await {
            Ok(status) => {
                tracing::trace!(id = %status.id, "created a post");
                CreateResourceResponse {
                    new_state: self.state_from_status(&status, preserve_on_destroy),
                    diagnostics,
                }
            }
            Err(e) => {
                diagnostics.push(Diagnostic::error(
                    "Failed to create post",
                    format!("API error: {}", e),
                ));
                CreateResourceResponse {
                    new_state: request.planned_state,
                    diagnostics,
                }
            }
        }
    }

    async fn read(&self, _ctx: Context, request: ReadResourceRequest) -> ReadResourceResponse {
        let mut diagnostics = vec![];

        let id = match request.current_state.get_string(&AttributePath::new("id")) {
            Ok(id) => id,
            Err(_) => {
                // Without an id there is nothing to refresh; signal the
                // host to recreate.
                return ReadResourceResponse {
                    new_state: None,
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
                return ReadResourceResponse {
                    new_state: Some(request.current_state),
                    diagnostics,
                };
            }
        };

        match provider_data.client.get_status(&id).await {
            Ok(status) => {
                // During imports the preserve_on_destroy attribute may not
                // be set yet.
                let preserve_on_destroy = request
                    .current_state
                    .get_bool(&AttributePath::new("preserve_on_destroy"))
                    .unwrap_or(false);

                ReadResourceResponse {
                    new_state: Some(self.state_from_status(&status, preserve_on_destroy)),
                    diagnostics,
                }
            }
            Err(e) => {
                diagnostics.push(Diagnostic::error(
                    "Failed to read post",
                    format!("API error: {}", e),
                ));
                ReadResourceResponse {
                    new_state: Some(request.current_state),
                    diagnostics,
                }
            }
        }
    }

    async fn update(
        &self,
        _ctx: Context,
        request: UpdateResourceRequest,
    ) -> UpdateResourceResponse {
        let mut diagnostics = vec![];

        let provider_data = match &self.provider_data {
            Some(data) => data,
            None => {
                diagnostics.push(Diagnostic::error(
                    "Provider not configured",
                    "Provider data was not properly configured",
                ));
                return UpdateResourceResponse {
                    new_state: request.prior_state,
                    diagnostics,
                };
            }
        };

        let id = match request.prior_state.get_string(&AttributePath::new("id")) {
            Ok(id) => id,
            Err(_) => {
                diagnostics.push(
                    Diagnostic::error(
                        "Missing post id",
                        "The prior state has no \"id\"; the post cannot be updated",
                    )
                    .with_attribute(AttributePath::new("id")),
                );
                return UpdateResourceResponse {
                    new_state: request.prior_state,
                    diagnostics,
                };
            }
        };

        let new_status = match self.new_status_from(&request.planned_state) {
            Ok(new_status) => new_status,
            Err(diag) => {
                diagnostics.push(diag);
                return UpdateResourceResponse {
                    new_state: request.prior_state,
                    diagnostics,
                };
            }
        };

        let preserve_on_destroy = request
            .planned_state
            .get_bool(&AttributePath::new("preserve_on_destroy"))
            .unwrap_or(false);

        match provider_data.client.update_status(&id, &new_status).await {
            Ok(status) => UpdateResourceResponse {
                new_state: self.state_from_status(&status, preserve_on_destroy),
                diagnostics,
            },
            Err(e) => {
                diagnostics.push(Diagnostic::error(
                    "Failed to update post",
                    format!("API error: {}", e),
                ));
                UpdateResourceResponse {
                    new_state: request.prior_state,
                    diagnostics,
                }
            }
        }
    }

    async fn delete(
        &self,
        _ctx: Context,
        request: DeleteResourceRequest,
    ) -> DeleteResourceResponse {
        let mut diagnostics = vec![];

        let preserve_on_destroy = request
            .prior_state
            .get_bool(&AttributePath::new("preserve_on_destroy"))
            .unwrap_or(false);

        if preserve_on_destroy {
            tracing::debug!("preserve_on_destroy is enabled: preserving post on server");
            return DeleteResourceResponse { diagnostics };
        }

        let provider_data = match &self.provider_data {
            Some(data) => data,
            None => {
                diagnostics.push(Diagnostic::error(
                    "Provider not configured",
                    "Provider data was not properly configured",
                ));
                return DeleteResourceResponse { diagnostics };
            }
        };

        let id = match request.prior_state.get_string(&AttributePath::new("id")) {
            Ok(id) => id,
            Err(_) => {
                // No id means nothing to delete remotely.
                return DeleteResourceResponse { diagnostics };
            }
        };

        match provider_data.client.delete_status(&id).await {
            Ok(()) => DeleteResourceResponse { diagnostics },
            Err(e) => {
                diagnostics.push(Diagnostic::error(
                    "Failed to delete post",
                    format!("API error: {}", e),
                ));
                DeleteResourceResponse { diagnostics }
            }
        }
    }
}

#[async_trait]
impl ResourceWithConfigure for PostResource {
    async fn configure(
        &mut self,
        _ctx: Context,
        request: ConfigureResourceRequest,
    ) -> ConfigureResourceResponse {
        let mut diagnostics = vec![];

        if let Some(data) = request.provider_data {
            if let Some(provider_data) = data.downcast_ref::<crate::MastodonProviderData>() {
                self.provider_data = Some(provider_data.clone());
            } else {
                diagnostics.push(Diagnostic::error(
                    "Unexpected resource configure type",
                    "Expected MastodonProviderData. Please report this issue to the provider developers.",
                ));
            }
        } else {
            diagnostics.push(Diagnostic::error(
                "No provider data",
                "No provider data was provided to the resource",
            ));
        }

        ConfigureResourceResponse { diagnostics }
    }
}

#[async_trait]
impl ResourceWithImportState for PostResource {
    async fn import_state(
        &self,
        ctx: Context,
        request: ImportResourceStateRequest,
    ) -> ImportResourceStateResponse {
        let mut response = ImportResourceStateResponse {
            imported_resources: vec![],
            diagnostics: vec![],
        };
        import_state_passthrough_id(&ctx, AttributePath::new("id"), &request, &mut response);
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_helpers::connect_with_token;
    use crate::MastodonProviderData;
    use mockito::{Matcher, Server, ServerGuard};
    use std::sync::Arc;

    const STATUS_BODY: &str = r#"{
        "id": "109302",
        "created_at": "2022-11-01T12:00:00.000Z",
        "content": "<p>First Test Post</p>",
        "visibility": "public",
        "sensitive": false,
        "account": {"id": "14715", "username": "trurl", "acct": "trurl"}
    }"#;

    async fn configured_resource(server: &ServerGuard) -> PostResource {
        let client = connect_with_token(&server.url()).await;
        let mut resource = PostResource::new();
        let data: Arc<dyn std::any::Any + Send + Sync> =
            Arc::new(MastodonProviderData::new(client));
        let response = resource
            .configure(
                Context::new(),
                ConfigureResourceRequest {
                    provider_data: Some(data),
                },
            )
            .await;
        assert!(response.diagnostics.is_empty());
        resource
    }

    fn planned_state(content: &str, visibility: &str, sensitive: bool) -> DynamicValue {
        let mut state = DynamicValue::empty_object();
        state
            .set_string(&AttributePath::new("content"), content.to_string())
            .unwrap();
        state
            .set_string(&AttributePath::new("visibility"), visibility.to_string())
            .unwrap();
        state
            .set_bool(&AttributePath::new("sensitive"), sensitive)
            .unwrap();
        state
            .set_bool(&AttributePath::new("preserve_on_destroy"), false)
            .unwrap();
        state
    }

    #[test]
    fn schema_declares_the_expected_attributes() {
        let schema = PostResource::build_schema();

        let content = schema.attribute("content").unwrap();
        assert!(content.required);

        let visibility = schema.attribute("visibility").unwrap();
        assert!(visibility.optional);
        assert!(visibility.computed);
        assert!(visibility.default.is_some());
        assert_eq!(visibility.validators.len(), 1);

        for name in ["id", "created_at", "account"] {
            let attr = schema.attribute(name).unwrap();
            assert!(attr.computed);
            assert!(!attr.required);
            assert_eq!(attr.plan_modifiers.len(), 1);
        }

        let preserve = schema.attribute("preserve_on_destroy").unwrap();
        assert!(preserve.optional);
        assert!(preserve.default.is_some());
    }

    #[tokio::test]
    async fn validate_rejects_invalid_visibility() {
        let resource = PostResource::new();
        let mut config = DynamicValue::empty_object();
        config
            .set_string(&AttributePath::new("content"), "hello".to_string())
            .unwrap();
        config
            .set_string(&AttributePath::new("visibility"), "everyone".to_string())
            .unwrap();

        let response = resource
            .validate(
                Context::new(),
                ValidateResourceConfigRequest {
                    type_name: "mastodon_post".to_string(),
                    config,
                },
            )
            .await;

        assert_eq!(response.diagnostics.len(), 1);
        assert!(response.diagnostics[0].detail.contains("everyone"));
    }

    #[tokio::test]
    async fn validate_requires_content() {
        let resource = PostResource::new();
        let response = resource
            .validate(
                Context::new(),
                ValidateResourceConfigRequest {
                    type_name: "mastodon_post".to_string(),
                    config: DynamicValue::empty_object(),
                },
            )
            .await;

        assert_eq!(response.diagnostics.len(), 1);
        assert_eq!(
            response.diagnostics[0].attribute.as_ref().unwrap().to_string(),
            "content"
        );
    }

    #[tokio::test]
    async fn create_stores_sanitized_record() {
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

        let resource = configured_resource(&server).await;
        let response = resource
            .create(
                Context::new(),
                CreateResourceRequest {
                    type_name: "mastodon_post".to_string(),
                    config: DynamicValue::empty_object(),
                    planned_state: planned_state("First Test Post", "public", false),
                },
            )
            .await;

        assert!(response.diagnostics.is_empty());
        let state = response.new_state;
        assert_eq!(
            state.get_string(&AttributePath::new("id")).unwrap(),
            "109302"
        );
        assert_eq!(
            state.get_string(&AttributePath::new("content")).unwrap(),
            "First Test Post"
        );
        assert_eq!(
            state.get_string(&AttributePath::new("visibility")).unwrap(),
            "public"
        );
        assert!(!state.get_bool(&AttributePath::new("sensitive")).unwrap());
        assert_eq!(
            state.get_string(&AttributePath::new("account")).unwrap(),
            "14715"
        );
        assert_eq!(
            state.get_string(&AttributePath::new("created_at")).unwrap(),
            "2022-11-01T12:00:00+00:00"
        );
        assert!(!state
            .get_bool(&AttributePath::new("preserve_on_destroy"))
            .unwrap());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn create_failure_reports_diagnostic() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/api/v1/statuses")
            .with_status(422)
            .with_body(r#"{"error":"Validation failed: Text can't be blank"}"#)
            .create_async()
            .await;

        let resource = configured_resource(&server).await;
        let response = resource
            .create(
                Context::new(),
                CreateResourceRequest {
                    type_name: "mastodon_post".to_string(),
                    config: DynamicValue::empty_object(),
                    planned_state: planned_state("", "public", false),
                },
            )
            .await;

        assert_eq!(response.diagnostics.len(), 1);
        assert_eq!(response.diagnostics[0].summary, "Failed to create post");
    }

    #[tokio::test]
    async fn read_refreshes_and_backfills_preserve_flag() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/api/v1/statuses/109302")
            .with_body(STATUS_BODY)
            .create_async()
            .await;

        let resource = configured_resource(&server).await;

        // Imported state carries only the id.
        let mut current_state = DynamicValue::empty_object();
        current_state
            .set_string(&AttributePath::new("id"), "109302".to_string())
            .unwrap();

        let response = resource
            .read(
                Context::new(),
                ReadResourceRequest {
                    type_name: "mastodon_post".to_string(),
                    current_state,
                },
            )
            .await;

        assert!(response.diagnostics.is_empty());
        let state = response.new_state.unwrap();
        assert_eq!(
            state.get_string(&AttributePath::new("content")).unwrap(),
            "First Test Post"
        );
        assert!(!state
            .get_bool(&AttributePath::new("preserve_on_destroy"))
            .unwrap());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn read_error_keeps_state_untouched() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/v1/statuses/109302")
            .with_status(500)
            .with_body(r#"{"error":"internal"}"#)
            .create_async()
            .await;

        let resource = configured_resource(&server).await;
        let mut current_state = DynamicValue::empty_object();
        current_state
            .set_string(&AttributePath::new("id"), "109302".to_string())
            .unwrap();
        current_state
            .set_string(&AttributePath::new("content"), "old content".to_string())
            .unwrap();

        let response = resource
            .read(
                Context::new(),
                ReadResourceRequest {
                    type_name: "mastodon_post".to_string(),
                    current_state: current_state.clone(),
                },
            )
            .await;

        assert_eq!(response.diagnostics.len(), 1);
        assert_eq!(response.diagnostics[0].summary, "Failed to read post");
        assert_eq!(response.new_state.unwrap(), current_state);
    }

    #[tokio::test]
    async fn update_replaces_content_and_keeps_id() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("PUT", "/api/v1/statuses/109302")
            .match_body(Matcher::PartialJson(serde_json::json!({
                "status": "Post After Update"
            })))
            .with_body(
                r#"{
                "id": "109302",
                "created_at": "2022-11-01T12:00:00.000Z",
                "content": "<p>Post After Update</p>",
                "visibility": "public",
                "sensitive": false,
                "account": {"id": "14715", "username": "trurl", "acct": "trurl"}
            }"#,
            )
            .create_async()
            .await;

        let resource = configured_resource(&server).await;

        let mut prior_state = planned_state("First Test Post", "public", false);
        prior_state
            .set_string(&AttributePath::new("id"), "109302".to_string())
            .unwrap();
        prior_state
            .set_string(
                &AttributePath::new("created_at"),
                "2022-11-01T12:00:00+00:00".to_string(),
            )
            .unwrap();
        prior_state
            .set_string(&AttributePath::new("account"), "14715".to_string())
            .unwrap();

        let response = resource
            .update(
                Context::new(),
                UpdateResourceRequest {
                    type_name: "mastodon_post".to_string(),
                    config: DynamicValue::empty_object(),
                    planned_state: planned_state("Post After Update", "public", false),
                    prior_state,
                },
            )
            .await;

        assert!(response.diagnostics.is_empty());
        let state = response.new_state;
        assert_eq!(
            state.get_string(&AttributePath::new("content")).unwrap(),
            "Post After Update"
        );
        assert_eq!(
            state.get_string(&AttributePath::new("id")).unwrap(),
            "109302"
        );
        assert_eq!(
            state.get_string(&AttributePath::new("created_at")).unwrap(),
            "2022-11-01T12:00:00+00:00"
        );
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn delete_with_preserve_flag_makes_no_remote_call() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("DELETE", "/api/v1/statuses/109302")
            .expect(0)
            .create_async()
            .await;

        let resource = configured_resource(&server).await;
        let mut prior_state = DynamicValue::empty_object();
        prior_state
            .set_string(&AttributePath::new("id"), "109302".to_string())
            .unwrap();
        prior_state
            .set_bool(&AttributePath::new("preserve_on_destroy"), true)
            .unwrap();

        let response = resource
            .delete(
                Context::new(),
                DeleteResourceRequest {
                    type_name: "mastodon_post".to_string(),
                    prior_state,
                },
            )
            .await;

        assert!(response.diagnostics.is_empty());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn delete_issues_exactly_one_remote_call() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("DELETE", "/api/v1/statuses/109302")
            .expect(1)
            .with_body(r#"{"id":"109302"}"#)
            .create_async()
            .await;

        let resource = configured_resource(&server).await;
        let mut prior_state = DynamicValue::empty_object();
        prior_state
            .set_string(&AttributePath::new("id"), "109302".to_string())
            .unwrap();
        prior_state
            .set_bool(&AttributePath::new("preserve_on_destroy"), false)
            .unwrap();

        let response = resource
            .delete(
                Context::new(),
                DeleteResourceRequest {
                    type_name: "mastodon_post".to_string(),
                    prior_state,
                },
            )
            .await;

        assert!(response.diagnostics.is_empty());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn delete_failure_reports_diagnostic() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("DELETE", "/api/v1/statuses/109302")
            .with_status(403)
            .with_body(r#"{"error":"This action is not allowed"}"#)
            .create_async()
            .await;

        let resource = configured_resource(&server).await;
        let mut prior_state = DynamicValue::empty_object();
        prior_state
            .set_string(&AttributePath::new("id"), "109302".to_string())
            .unwrap();

        let response = resource
            .delete(
                Context::new(),
                DeleteResourceRequest {
                    type_name: "mastodon_post".to_string(),
                    prior_state,
                },
            )
            .await;

        assert_eq!(response.diagnostics.len(), 1);
        assert_eq!(response.diagnostics[0].summary, "Failed to delete post");
    }

    #[tokio::test]
    async fn import_sets_only_the_id() {
        let resource = PostResource::new();
        let response = resource
            .import_state(
                Context::new(),
                ImportResourceStateRequest {
                    type_name: "mastodon_post".to_string(),
                    id: "109302".to_string(),
                },
            )
            .await;

        assert!(response.diagnostics.is_empty());
        assert_eq!(response.imported_resources.len(), 1);
        assert_eq!(
            response.imported_resources[0]
                .state
                .get_string(&AttributePath::new("id"))
                .unwrap(),
            "109302"
        );
    }

    #[tokio::test]
    async fn configure_rejects_unexpected_provider_data() {
        let mut resource = PostResource::new();
        let data: Arc<dyn std::any::Any + Send + Sync> = Arc::new("not provider data");

        let response = resource
            .configure(
                Context::new(),
                ConfigureResourceRequest {
                    provider_data: Some(data),
                },
            )
            .await;

        assert_eq!(response.diagnostics.len(), 1);
        assert_eq!(
            response.diagnostics[0].summary,
            "Unexpected resource configure type"
        );
    }

    #[tokio::test]
    async fn operations_without_provider_data_report_configuration_error() {
        let resource = PostResource::new();
        let response = resource
            .create(
                Context::new(),
                CreateResourceRequest {
                    type_name: "mastodon_post".to_string(),
                    config: DynamicValue::empty_object(),
                    planned_state: planned_state("hello", "public", false),
                },
            )
            .await;

        assert_eq!(response.diagnostics.len(), 1);
        assert_eq!(response.diagnostics[0].summary, "Provider not configured");
    }
}
