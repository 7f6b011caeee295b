//! Planning helpers run by the host before an operation is applied
//!
//! These implement the framework side of planning for a schema: checking
//! required attributes and validators, then producing a planned state by
//! applying defaults, marking computed attributes unknown, and running
//! plan modifiers. Computing the actual change set between desired and
//! prior state stays with the host.

use crate::schema::{DefaultRequest, PlanModifierRequest, Schema, ValidatorRequest};
use crate::types::{AttributePath, Diagnostic, Dynamic, DynamicValue};

/// Check a configuration value against a schema: required attributes must
/// be present and non-null, and attribute validators must pass.
pub fn validate_config(schema: &Schema, config: &DynamicValue) -> Vec<Diagnostic> {
    let mut diagnostics = vec![];

    for attr in &schema.attributes {
        let path = AttributePath::new(&attr.name);
        let value = config.get(&path).cloned().unwrap_or(Dynamic::Null);

        if attr.required && matches!(value, Dynamic::Null) {
            diagnostics.push(
                Diagnostic::error(
                    "Missing required attribute",
                    format!("The attribute \"{}\" must be set.", attr.name),
                )
                .with_attribute(path),
            );
            continue;
        }

        // Validators only see known, non-null values.
        if matches!(value, Dynamic::Null | Dynamic::Unknown) {
            continue;
        }

        for validator in &attr.validators {
            let response = validator.validate(ValidatorRequest {
                value: value.clone(),
                path: path.clone(),
            });
            diagnostics.extend(response.diagnostics);
        }
    }

    diagnostics
}

/// Produce the planned state for a configuration against prior state.
///
/// Per attribute: a configured value wins; otherwise the default provider
/// runs; otherwise computed attributes become unknown. Plan modifiers then
/// get the final word (e.g. carrying known state into unknown values).
pub fn normalize_planned_state(
    schema: &Schema,
    config: &DynamicValue,
    prior_state: &DynamicValue,
) -> DynamicValue {
    let mut planned = DynamicValue::empty_object();

    for attr in &schema.attributes {
        let path = AttributePath::new(&attr.name);
        let config_value = config.get(&path).cloned().unwrap_or(Dynamic::Null);
        let state_value = prior_state.get(&path).cloned().unwrap_or(Dynamic::Null);

        let mut plan_value = if !matches!(config_value, Dynamic::Null) {
            config_value
        } else if let Some(default) = &attr.default {
            default
                .default_value(DefaultRequest { path: path.clone() })
                .value
        } else if attr.computed {
            Dynamic::Unknown
        } else {
            Dynamic::Null
        };

        for modifier in &attr.plan_modifiers {
            let response = modifier.modify(PlanModifierRequest {
                state_value: state_value.clone(),
                plan_value,
                path: path.clone(),
            });
            plan_value = response.plan_value;
        }

        let _ = planned.set(&path, plan_value);
    }

    planned
}
