//! Configuration for the `AuthN` JWT restriction engine.

use serde::Deserialize;

/// Configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct JwtRestrictionsConfig {
    /// How the composite validator reports failing constraints.
    pub failure_mode: FailureMode,

    /// What to do when two aliases point at the same claim.
    pub alias_conflicts: AliasConflictPolicy,

    /// Policy variable listing the mandatory (enforced) claims.
    pub enforced_claims_variable: String,

    /// Policy variable listing `alias:claim` pairs.
    pub claim_aliases_variable: String,

    /// Annotation prefix under which hosts declare restrictions
    /// (`<prefix>/<service_id>/<name>`).
    pub annotation_prefix: String,
}

impl Default for JwtRestrictionsConfig {
    fn default() -> Self {
        Self {
            failure_mode: FailureMode::default(),
            alias_conflicts: AliasConflictPolicy::default(),
            enforced_claims_variable: "enforced-claims".to_owned(),
            claim_aliases_variable: "claim-aliases".to_owned(),
            annotation_prefix: "authn-jwt".to_owned(),
        }
    }
}

/// Failure reporting mode of the composite validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FailureMode {
    /// Evaluate every constraint and report each one that fails.
    #[default]
    CollectAll,
    /// Stop at the first failing constraint.
    FailFast,
}

/// Handling of non-injective claim aliases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AliasConflictPolicy {
    /// Fail the build with `ConflictingClaimAliases`.
    #[default]
    Reject,
    /// Keep the alias that sorts last.
    LastWriteWins,
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn defaults() {
        let cfg = JwtRestrictionsConfig::default();
        assert_eq!(cfg.failure_mode, FailureMode::CollectAll);
        assert_eq!(cfg.alias_conflicts, AliasConflictPolicy::Reject);
        assert_eq!(cfg.enforced_claims_variable, "enforced-claims");
        assert_eq!(cfg.claim_aliases_variable, "claim-aliases");
        assert_eq!(cfg.annotation_prefix, "authn-jwt");
    }

    #[test]
    fn partial_config_keeps_defaults() {
        let cfg: JwtRestrictionsConfig = serde_json::from_value(json!({
            "failure_mode": "fail_fast",
            "alias_conflicts": "last_write_wins"
        }))
        .unwrap();

        assert_eq!(cfg.failure_mode, FailureMode::FailFast);
        assert_eq!(cfg.alias_conflicts, AliasConflictPolicy::LastWriteWins);
        assert_eq!(cfg.enforced_claims_variable, "enforced-claims");
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let result = serde_json::from_value::<JwtRestrictionsConfig>(json!({
            "deny_list": ["sub"]
        }));
        assert!(result.is_err());
    }
}
