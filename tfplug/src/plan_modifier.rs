//! Built-in plan modifiers

use crate::schema::{PlanModifier, PlanModifierRequest, PlanModifierResponse};
use crate::types::Dynamic;

/// Uses the current state value when the planned value is unknown.
///
/// Computed attributes whose value only changes when the resource is
/// replaced (identifiers, creation timestamps) should carry this so the
/// plan keeps their known values instead of showing them as unknown.
pub struct UseStateForUnknown;

impl UseStateForUnknown {
    pub fn create() -> Box<dyn PlanModifier> {
        Box::new(Self)
    }
}

impl PlanModifier for UseStateForUnknown {
    fn description(&self) -> String {
        "use the prior state value when the planned value is unknown".to_string()
    }

    fn modify(&self, request: PlanModifierRequest) -> PlanModifierResponse {
        let plan_value = match &request.plan_value {
            // Unknown may arrive as Null after decoding, treat both the same.
            Dynamic::Unknown | Dynamic::Null => match &request.state_value {
                Dynamic::Null => request.plan_value,
                state => state.clone(),
            },
            _ => request.plan_value,
        };

        PlanModifierResponse {
            plan_value,
            diagnostics: vec![],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AttributePath;

    fn request(state: Dynamic, plan: Dynamic) -> PlanModifierRequest {
        PlanModifierRequest {
            state_value: state,
            plan_value: plan,
            path: AttributePath::new("id"),
        }
    }

    #[test]
    fn unknown_plan_takes_state_value() {
        let modifier = UseStateForUnknown;
        let response = modifier.modify(request(
            Dynamic::String("109302".to_string()),
            Dynamic::Unknown,
        ));
        assert_eq!(response.plan_value, Dynamic::String("109302".to_string()));
        assert!(response.diagnostics.is_empty());
    }

    #[test]
    fn known_plan_value_is_kept() {
        let modifier = UseStateForUnknown;
        let response = modifier.modify(request(
            Dynamic::String("old".to_string()),
            Dynamic::String("new".to_string()),
        ));
        assert_eq!(response.plan_value, Dynamic::String("new".to_string()));
    }

    #[test]
    fn unknown_plan_with_null_state_stays_unknown() {
        let modifier = UseStateForUnknown;
        let response = modifier.modify(request(Dynamic::Null, Dynamic::Unknown));
        assert_eq!(response.plan_value, Dynamic::Unknown);
    }
}
