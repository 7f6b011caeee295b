//! Built-in attribute validators

use crate::schema::{Validator, ValidatorRequest, ValidatorResponse};
use crate::types::{Diagnostic, Dynamic};

/// Validates that a string attribute is one of a fixed set of values.
pub struct OneOf {
    allowed: Vec<String>,
}

impl OneOf {
    pub fn create(allowed: &[&str]) -> Box<dyn Validator> {
        Box::new(Self {
            allowed: allowed.iter().map(|s| s.to_string()).collect(),
        })
    }
}

impl Validator for OneOf {
    fn description(&self) -> String {
        format!("value must be one of: {}", self.allowed.join(", "))
    }

    fn validate(&self, request: ValidatorRequest) -> ValidatorResponse {
        let mut diagnostics = vec![];

        if let Dynamic::String(value) = &request.value {
            if !self.allowed.iter().any(|a| a == value) {
                diagnostics.push(
                    Diagnostic::error(
                        format!("Invalid value for {}", request.path),
                        format!(
                            "Value must be one of: {}. Got: \"{}\".",
                            self.allowed.join(", "),
                            value
                        ),
                    )
                    .with_attribute(request.path.clone()),
                );
            }
        }

        ValidatorResponse { diagnostics }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AttributePath;

    fn request(value: Dynamic) -> ValidatorRequest {
        ValidatorRequest {
            value,
            path: AttributePath::new("visibility"),
        }
    }

    #[test]
    fn one_of_accepts_listed_value() {
        let validator = OneOf::create(&["public", "unlisted", "private", "direct"]);
        let response = validator.validate(request(Dynamic::String("unlisted".to_string())));
        assert!(response.diagnostics.is_empty());
    }

    #[test]
    fn one_of_rejects_unlisted_value() {
        let validator = OneOf::create(&["public", "unlisted", "private", "direct"]);
        let response = validator.validate(request(Dynamic::String("friends".to_string())));
        assert_eq!(response.diagnostics.len(), 1);
        assert!(response.diagnostics[0].detail.contains("friends"));
        assert!(response.diagnostics[0].attribute.is_some());
    }

    #[test]
    fn one_of_ignores_non_string_values() {
        let validator = OneOf::create(&["public"]);
        let response = validator.validate(request(Dynamic::Null));
        assert!(response.diagnostics.is_empty());
    }
}
