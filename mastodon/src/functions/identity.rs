//! Identity function implementation

use async_trait::async_trait;
use tfplug::context::Context;
use tfplug::function::{
    CallFunctionRequest, CallFunctionResponse, Function, FunctionDefinition,
    FunctionDefinitionRequest, FunctionDefinitionResponse, FunctionMetadataRequest,
    FunctionMetadataResponse, Parameter,
};
use tfplug::schema::AttributeType;
use tfplug::types::{AttributePath, Dynamic, DynamicValue, FunctionError};

/// Formats a username and server into a federated identity string.
#[derive(Default)]
pub struct IdentityFunction;

impl IdentityFunction {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Function for IdentityFunction {
    async fn metadata(
        &self,
        _ctx: Context,
        _request: FunctionMetadataRequest,
    ) -> FunctionMetadataResponse {
        FunctionMetadataResponse {
            name: "identity".to_string(),
        }
    }

    async fn definition(
        &self,
        _ctx: Context,
        _request: FunctionDefinitionRequest,
    ) -> FunctionDefinitionResponse {
        FunctionDefinitionResponse {
            definition: FunctionDefinition {
                parameters: vec![
                    Parameter {
                        name: "username".to_string(),
                        r#type: AttributeType::String,
                        allow_null_value: false,
                        description: "The username to generate the identity from".to_string(),
                    },
                    Parameter {
                        name: "server".to_string(),
                        r#type: AttributeType::String,
                        allow_null_value: false,
                        description: "The server the user is hosted on".to_string(),
                    },
                ],
                return_type: AttributeType::String,
                summary: "Identity function".to_string(),
                description: "Returns the identity string of a user from a specific server"
                    .to_string(),
                deprecation_message: None,
            },
            diagnostics: vec![],
        }
    }

    async fn call(&self, _ctx: Context, request: CallFunctionRequest) -> CallFunctionResponse {
        if request.arguments.len() != 2 {
            return CallFunctionResponse {
                result: None,
                error: Some(FunctionError::new(format!(
                    "identity expects exactly 2 arguments, got {}",
                    request.arguments.len()
                ))),
            };
        }

        let username = match request.arguments[0].get_string(&AttributePath::root()) {
            Ok(username) => username,
            Err(_) => {
                return CallFunctionResponse {
                    result: None,
                    error: Some(FunctionError::for_argument("username must be a string", 0)),
                }
            }
        };

        let server = match request.arguments[1].get_string(&AttributePath::root()) {
            Ok(server) => server,
            Err(_) => {
                return CallFunctionResponse {
                    result: None,
                    error: Some(FunctionError::for_argument("server must be a string", 1)),
                }
            }
        };

        CallFunctionResponse {
            result: Some(DynamicValue::new(Dynamic::String(format!(
                "@{}@{}",
                username, server
            )))),
            error: None,
        }
    }
}
