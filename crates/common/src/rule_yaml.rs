use crate::rule::RuleSet;

#[derive(Debug)]
pub enum CodecError {
    Encode(serde_yaml::Error),
    Decode(serde_yaml::Error),
}

impl std::fmt::Display for CodecError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Encode(e) => write!(f, "failed to marshal rules to YAML: {e}"),
            Self::Decode(e) => write!(f, "failed to parse rule document: {e}"),
        }
    }
}

impl std::error::Error for CodecError {}

pub fn to_yaml(rule_set: &RuleSet) -> Result<String, CodecError> {
    serde_yaml::to_string(rule_set).map_err(CodecError::Encode)
}

pub fn from_yaml(doc: &str) -> Result<RuleSet, CodecError> {
    serde_yaml::from_str(doc).map_err(CodecError::Decode)
}
