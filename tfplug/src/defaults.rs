//! Default value providers for attributes
//!
//! Default providers run during planning when an optional attribute is not
//! set in configuration. They differ from plan modifiers in that they only
//! run when the value is absent, not when it is explicitly null.

use crate::schema::{Default, DefaultRequest, DefaultResponse};
use crate::types::Dynamic;

/// StaticDefault provides a fixed default value.
pub struct StaticDefault {
    value: Dynamic,
}

impl StaticDefault {
    /// Create a new static default provider with the given value
    pub fn create(value: Dynamic) -> Box<dyn Default> {
        Box::new(Self { value })
    }

    /// Create a static string default
    pub fn string(value: &str) -> Box<dyn Default> {
        Self::create(Dynamic::String(value.to_string()))
    }

    /// Create a static number default
    pub fn number(value: f64) -> Box<dyn Default> {
        Self::create(Dynamic::Number(value))
    }

    /// Create a static boolean default
    pub fn bool(value: bool) -> Box<dyn Default> {
        Self::create(Dynamic::Bool(value))
    }
}

impl Default for StaticDefault {
    fn description(&self) -> String {
        format!("static default value: {:?}", self.value)
    }

    fn default_value(&self, _request: DefaultRequest) -> DefaultResponse {
        DefaultResponse {
            value: self.value.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AttributePath;

    fn request() -> DefaultRequest {
        DefaultRequest {
            path: AttributePath::new("attr"),
        }
    }

    #[test]
    fn static_string_default() {
        let default = StaticDefault::string("public");
        let response = default.default_value(request());
        assert_eq!(response.value, Dynamic::String("public".to_string()));
    }

    #[test]
    fn static_bool_default() {
        let default = StaticDefault::bool(false);
        let response = default.default_value(request());
        assert_eq!(response.value, Dynamic::Bool(false));
    }

    #[test]
    fn static_number_default() {
        let default = StaticDefault::number(30.0);
        let response = default.default_value(request());
        assert_eq!(response.value, Dynamic::Number(30.0));
    }
}
