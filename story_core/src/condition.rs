//! Choice availability hook

use crate::graph::StoryChoice;
use crate::variables::Variables;

/// Decides whether a choice may be offered given the current variables
pub trait ChoiceCondition {
    fn is_available(&self, choice: &StoryChoice, variables: &Variables) -> bool;
}

/// Offers every choice; conditions are ignored
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysAvailable;

impl ChoiceCondition for AlwaysAvailable {
    fn is_available(&self, _choice: &StoryChoice, _variables: &Variables) -> bool {
        true
    }
}

/// Each condition key must name a variable holding exactly the given value
#[derive(Debug, Clone, Copy, Default)]
pub struct VariableConditions;

impl ChoiceCondition for VariableConditions {
    fn is_available(&self, choice: &StoryChoice, variables: &Variables) -> bool {
        choice.conditions.as_ref().map_or(true, |conditions| {
            conditions
                .iter()
                .all(|(name, expected)| variables.get(name) == Some(expected))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variables::StoryValue;
    use std::collections::BTreeMap;

    fn gated() -> StoryChoice {
        let mut conditions = BTreeMap::new();
        conditions.insert("has_map".to_string(), StoryValue::Flag(true));
        StoryChoice {
            text: "Follow the map".to_string(),
            destination: "forest_path".to_string(),
            conditions: Some(conditions),
        }
    }

    #[test]
    fn test_always_available_ignores_conditions() {
        assert!(AlwaysAvailable.is_available(&gated(), &Variables::new()));
    }

    #[test]
    fn test_variable_conditions() {
        let mut vars = Variables::new();
        assert!(!VariableConditions.is_available(&gated(), &vars));

        vars.insert("has_map".to_string(), StoryValue::Flag(false));
        assert!(!VariableConditions.is_available(&gated(), &vars));

        vars.insert("has_map".to_string(), StoryValue::Flag(true));
        assert!(VariableConditions.is_available(&gated(), &vars));

        let open = StoryChoice {
            conditions: None,
            ..gated()
        };
        assert!(VariableConditions.is_available(&open, &Variables::new()));
    }
}
