//! Provider trait and related types
//!
//! The provider resolves configuration once, builds whatever shared
//! collaborators its adapters need, and acts as a factory for resources,
//! data sources and functions by type name.

use crate::context::Context;
use crate::data_source::DataSourceWithConfigure;
use crate::error::Result;
use crate::function::Function;
use crate::resource::ResourceWithConfigure;
use crate::schema::Schema;
use crate::types::{Diagnostic, DynamicValue};
use async_trait::async_trait;
use std::any::Any;
use std::sync::Arc;

#[async_trait]
pub trait Provider: Send + Sync {
    /// Type name prefixes every resource and data source (e.g. "mastodon")
    fn type_name(&self) -> &str;

    /// Called to get provider metadata
    async fn metadata(
        &self,
        ctx: Context,
        request: ProviderMetadataRequest,
    ) -> ProviderMetadataResponse;

    /// Called to get the provider configuration schema
    async fn schema(&self, ctx: Context, request: ProviderSchemaRequest) -> ProviderSchemaResponse;

    /// Called once per host invocation, before any adapter runs.
    /// Resolve configuration, build shared clients, and hand them back as
    /// provider_data; every adapter's configure receives that payload.
    async fn configure(
        &mut self,
        ctx: Context,
        request: ConfigureProviderRequest,
    ) -> ConfigureProviderResponse;

    /// Create a resource instance by type name
    fn create_resource(&self, type_name: &str) -> Result<Box<dyn ResourceWithConfigure>>;

    /// Create a data source instance by type name
    fn create_data_source(&self, type_name: &str) -> Result<Box<dyn DataSourceWithConfigure>>;

    /// Create a function instance by name
    fn create_function(&self, name: &str) -> Result<Box<dyn Function>>;
}

// Request/Response Types

pub struct ProviderMetadataRequest;

pub struct ProviderMetadataResponse {
    pub type_name: String,
    pub version: String,
}

pub struct ProviderSchemaRequest;

pub struct ProviderSchemaResponse {
    pub schema: Schema,
    pub diagnostics: Vec<Diagnostic>,
}

pub struct ConfigureProviderRequest {
    pub config: DynamicValue,
}

pub struct ConfigureProviderResponse {
    pub diagnostics: Vec<Diagnostic>,
    /// Shared payload handed to every adapter's configure.
    pub provider_data: Option<Arc<dyn Any + Send + Sync>>,
}
