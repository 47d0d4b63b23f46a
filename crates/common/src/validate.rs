use crate::rule::RuleSet;

/// Structural checks on a rule document before it is written back.
///
/// Only presence is checked: rule ids are not required to be unique and
/// operator/value pairs are left to the rule engine.
pub fn validate_rules(rule_set: &RuleSet) -> Result<(), String> {
    if rule_set.ruleset_version.is_empty() {
        return Err("ruleset_version is required".into());
    }
    if rule_set.rules.is_empty() {
        return Err("at least one rule is required".into());
    }
    for rule in &rule_set.rules {
        if rule.rule_id.is_empty() {
            return Err("rule_id is required for all rules".into());
        }
        if rule.conditions.is_empty() {
            return Err(format!(
                "at least one condition is required for rule {}",
                rule.rule_id
            ));
        }
    }
    Ok(())
}

/// `(rule_id, operator)` for every condition whose operator the rule engine
/// does not know. These are stored as written.
pub fn unknown_operators(rule_set: &RuleSet) -> Vec<(&str, &str)> {
    rule_set
        .rules
        .iter()
        .flat_map(|rule| {
            rule.conditions
                .iter()
                .filter(|c| !c.operator.is_known())
                .map(move |c| (rule.rule_id.as_str(), c.operator.as_str()))
        })
        .collect()
}
