//! Report configuration.

use serde::{Deserialize, Serialize};

/// What to do with input rows that are missing fields or carry negative sales.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MalformedPolicy {
    /// Drop the offending rows and carry on
    Reject,
    /// Abort the whole batch
    #[default]
    FailBatch,
}

/// Configuration for a single report run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Handling of malformed input rows (default: fail the batch)
    #[serde(default)]
    pub malformed_policy: MalformedPolicy,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = ReportConfig::default();
        assert_eq!(config.malformed_policy, MalformedPolicy::FailBatch);
    }

    #[test]
    fn test_config_deserialization() {
        let config: ReportConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, ReportConfig::default());

        let config: ReportConfig =
            serde_json::from_str(r#"{"malformed_policy":"reject"}"#).unwrap();
        assert_eq!(config.malformed_policy, MalformedPolicy::Reject);
    }
}
