//! Typed story variables

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A story variable value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StoryValue {
    Flag(bool),
    Number(f64),
    Text(String),
}

impl StoryValue {
    pub fn as_flag(&self) -> Option<bool> {
        match self {
            StoryValue::Flag(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            StoryValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            StoryValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            StoryValue::Flag(_) => "flag",
            StoryValue::Number(_) => "number",
            StoryValue::Text(_) => "text",
        }
    }
}

impl fmt::Display for StoryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoryValue::Flag(b) => write!(f, "{}", b),
            StoryValue::Number(n) => write!(f, "{}", n),
            StoryValue::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<bool> for StoryValue {
    fn from(value: bool) -> Self {
        StoryValue::Flag(value)
    }
}

impl From<f64> for StoryValue {
    fn from(value: f64) -> Self {
        StoryValue::Number(value)
    }
}

impl From<i32> for StoryValue {
    fn from(value: i32) -> Self {
        StoryValue::Number(f64::from(value))
    }
}

impl From<&str> for StoryValue {
    fn from(value: &str) -> Self {
        StoryValue::Text(value.to_string())
    }
}

impl From<String> for StoryValue {
    fn from(value: String) -> Self {
        StoryValue::Text(value)
    }
}

/// Named variables, ordered by name
pub type Variables = BTreeMap<String, StoryValue>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typed_accessors_do_not_coerce() {
        let flag = StoryValue::from(true);
        assert_eq!(flag.as_flag(), Some(true));
        assert_eq!(flag.as_number(), None);
        assert_eq!(flag.as_text(), None);

        let number = StoryValue::from(3);
        assert_eq!(number.as_number(), Some(3.0));
        assert_eq!(number.as_flag(), None);

        assert_eq!(StoryValue::from("map").as_text(), Some("map"));
    }

    #[test]
    fn test_parse_from_toml() {
        #[derive(Deserialize)]
        struct Doc {
            variables: Variables,
        }
        let doc: Doc = toml::from_str(
            r#"
[variables]
player_name = ""
has_map = false
gold_found = 12
"#,
        )
        .unwrap();

        assert_eq!(doc.variables["player_name"], StoryValue::Text(String::new()));
        assert_eq!(doc.variables["has_map"], StoryValue::Flag(false));
        assert_eq!(doc.variables["gold_found"], StoryValue::Number(12.0));
    }
}
