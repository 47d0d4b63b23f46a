use serde::{Deserialize, Serialize};
use std::fmt;

/// The whole rule document as stored in the cluster.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleSet {
    #[serde(default, deserialize_with = "crate::null_default::or_default")]
    pub ruleset_version: String,
    #[serde(default, deserialize_with = "crate::null_default::or_default")]
    pub description: String,
    #[serde(default, deserialize_with = "crate::null_default::or_default")]
    pub rules: Vec<Rule>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    #[serde(default, deserialize_with = "crate::null_default::or_default")]
    pub rule_id: String,
    #[serde(default, deserialize_with = "crate::null_default::or_default")]
    pub description: String,
    #[serde(default, deserialize_with = "crate::null_default::or_default")]
    pub conditions: Vec<Condition>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    #[serde(default, deserialize_with = "crate::null_default::or_default")]
    pub field: String,
    #[serde(default, deserialize_with = "crate::null_default::or_default")]
    pub operator: Operator,
    #[serde(default, deserialize_with = "crate::null_default::or_default")]
    pub value: serde_json::Value,
}

/// Comparison applied by the rule engine. Strings the engine may learn later
/// are kept verbatim in `Unknown` so a read-modify-write never loses them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Operator {
    Equals,
    ContainsAny,
    StartsWithAny,
    EndsWithAny,
    NotContainsAny,
    Unknown(String),
}

impl Operator {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Equals => "equals",
            Self::ContainsAny => "contains_any",
            Self::StartsWithAny => "starts_with_any",
            Self::EndsWithAny => "ends_with_any",
            Self::NotContainsAny => "not_contains_any",
            Self::Unknown(raw) => raw,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }
}

impl Default for Operator {
    fn default() -> Self {
        Self::Unknown(String::new())
    }
}

impl From<String> for Operator {
    fn from(s: String) -> Self {
        match s.as_str() {
            "equals" => Self::Equals,
            "contains_any" => Self::ContainsAny,
            "starts_with_any" => Self::StartsWithAny,
            "ends_with_any" => Self::EndsWithAny,
            "not_contains_any" => Self::NotContainsAny,
            _ => Self::Unknown(s),
        }
    }
}

impl From<Operator> for String {
    fn from(op: Operator) -> Self {
        match op {
            Operator::Unknown(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn operator_parses_known_names() {
        assert_eq!(Operator::from("equals".to_string()), Operator::Equals);
        assert_eq!(
            Operator::from("not_contains_any".to_string()),
            Operator::NotContainsAny
        );
        assert!(Operator::from("starts_with_any".to_string()).is_known());
    }

    #[test]
    fn unknown_operator_is_preserved() {
        let cond: Condition = serde_json::from_value(json!({
            "field": "uid",
            "operator": "greater_than",
            "value": 0
        }))
        .unwrap();
        assert_eq!(cond.operator, Operator::Unknown("greater_than".into()));

        let back = serde_json::to_value(&cond).unwrap();
        assert_eq!(back["operator"], "greater_than");
    }

    #[test]
    fn missing_fields_default() {
        let rs: RuleSet = serde_json::from_value(json!({"rules": [{}]})).unwrap();
        assert!(rs.ruleset_version.is_empty());
        assert_eq!(rs.rules.len(), 1);
        assert!(rs.rules[0].rule_id.is_empty());
        assert!(rs.rules[0].conditions.is_empty());
    }

    #[test]
    fn null_fields_read_as_empty() {
        let rs: RuleSet = serde_json::from_value(json!({
            "ruleset_version": null,
            "description": null,
            "rules": [{
                "rule_id": "R1",
                "conditions": [{"field": null, "operator": null, "value": null}]
            }]
        }))
        .unwrap();
        assert!(rs.ruleset_version.is_empty());
        let cond = &rs.rules[0].conditions[0];
        assert!(cond.field.is_empty());
        assert_eq!(cond.operator, Operator::default());
        assert!(cond.value.is_null());

        let rs: RuleSet = serde_json::from_value(json!({"rules": null})).unwrap();
        assert!(rs.rules.is_empty());
    }

    #[test]
    fn list_values_survive_json() {
        let cond = Condition {
            field: "flags".into(),
            operator: Operator::ContainsAny,
            value: json!(["O_WRONLY", "O_RDWR"]),
        };
        let text = serde_json::to_string(&cond).unwrap();
        assert!(text.contains("\"contains_any\""));
        let back: Condition = serde_json::from_str(&text).unwrap();
        assert_eq!(back, cond);
    }
}
