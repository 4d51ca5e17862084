//! Claim source backed by authenticator policy variables.
//!
//! Two variables are read from [`AuthenticationParameters::variables`]:
//!
//! - enforced claims: `sub, project_id, namespace/path`
//! - claim aliases: `alias:claim, other:nested/claim`
//!
//! A variable that is not defined yields an empty result. A variable that is
//! defined but blank, or that does not parse, is an error.

use std::collections::HashSet;
use std::sync::LazyLock;

use authn_jwt_sdk::{
    AuthenticationParameters, ClaimMapping, ClaimSource, ClaimSourceError, is_denied,
};
use regex::Regex;

use crate::config::JwtRestrictionsConfig;

const CLAIM_SEGMENT: &str = r"[a-zA-Z$_][a-zA-Z0-9$_.]*";

#[allow(clippy::expect_used)]
static CLAIM_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("^{CLAIM_SEGMENT}$")).expect("claim name pattern is valid")
});

#[allow(clippy::expect_used)]
static NESTED_CLAIM_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("^{CLAIM_SEGMENT}(/{CLAIM_SEGMENT})*$"))
        .expect("nested claim name pattern is valid")
});

/// Reads mandatory claims and claim aliases from policy variables.
#[derive(Debug, Clone)]
pub struct VariableClaimSource {
    enforced_claims_variable: String,
    claim_aliases_variable: String,
}

impl Default for VariableClaimSource {
    fn default() -> Self {
        Self::from_config(&JwtRestrictionsConfig::default())
    }
}

impl VariableClaimSource {
    #[must_use]
    pub fn from_config(cfg: &JwtRestrictionsConfig) -> Self {
        Self {
            enforced_claims_variable: cfg.enforced_claims_variable.clone(),
            claim_aliases_variable: cfg.claim_aliases_variable.clone(),
        }
    }

    fn read<'a>(
        params: &'a AuthenticationParameters,
        variable: &str,
    ) -> Result<Option<&'a str>, ClaimSourceError> {
        match params.variable(variable) {
            None => Ok(None),
            Some(value) if value.trim().is_empty() => {
                Err(ClaimSourceError::empty_variable(variable))
            }
            Some(value) => Ok(Some(value)),
        }
    }
}

impl ClaimSource for VariableClaimSource {
    #[tracing::instrument(skip_all, fields(variable = %self.enforced_claims_variable))]
    fn fetch_mandatory_claims(
        &self,
        params: &AuthenticationParameters,
    ) -> Result<Vec<String>, ClaimSourceError> {
        let Some(value) = Self::read(params, &self.enforced_claims_variable)? else {
            tracing::debug!("Enforced claims variable not defined");
            return Ok(Vec::new());
        };
        parse_enforced_claims(value).map_err(|reason| {
            ClaimSourceError::invalid_variable(&self.enforced_claims_variable, reason)
        })
    }

    #[tracing::instrument(skip_all, fields(variable = %self.claim_aliases_variable))]
    fn fetch_mapping_claims(
        &self,
        params: &AuthenticationParameters,
    ) -> Result<ClaimMapping, ClaimSourceError> {
        let Some(value) = Self::read(params, &self.claim_aliases_variable)? else {
            tracing::debug!("Claim aliases variable not defined");
            return Ok(ClaimMapping::new());
        };
        parse_claim_aliases(value).map_err(|reason| {
            ClaimSourceError::invalid_variable(&self.claim_aliases_variable, reason)
        })
    }
}

/// Parses a comma-separated list of claim names.
///
/// # Errors
///
/// A human-readable reason when an entry is empty, malformed, deny-listed
/// or repeated.
pub fn parse_enforced_claims(value: &str) -> Result<Vec<String>, String> {
    let mut seen = HashSet::new();
    let mut claims = Vec::new();

    for entry in value.split(',').map(str::trim) {
        if entry.is_empty() {
            return Err("list contains an empty element".to_owned());
        }
        if !NESTED_CLAIM_NAME.is_match(entry) {
            return Err(format!("'{entry}' is not a valid claim name"));
        }
        if is_denied(entry) {
            return Err(format!("claim '{entry}' cannot be enforced"));
        }
        if !seen.insert(entry) {
            return Err(format!("claim '{entry}' appears more than once"));
        }
        claims.push(entry.to_owned());
    }

    Ok(claims)
}

/// Parses a comma-separated list of `alias:claim` pairs into `alias -> claim`.
///
/// # Errors
///
/// A human-readable reason when an entry is empty or malformed, when an
/// alias or claim is deny-listed, or when either side is repeated.
pub fn parse_claim_aliases(value: &str) -> Result<ClaimMapping, String> {
    let mut seen_claims = HashSet::new();
    let mut mapping = ClaimMapping::new();

    for entry in value.split(',').map(str::trim) {
        if entry.is_empty() {
            return Err("list contains an empty element".to_owned());
        }
        let Some((alias, claim)) = entry.split_once(':') else {
            return Err(format!("'{entry}' is not in 'alias:claim' format"));
        };
        let (alias, claim) = (alias.trim(), claim.trim());
        if claim.contains(':') {
            return Err(format!("'{entry}' is not in 'alias:claim' format"));
        }
        if !CLAIM_NAME.is_match(alias) {
            return Err(format!("'{alias}' is not a valid alias name"));
        }
        if !NESTED_CLAIM_NAME.is_match(claim) {
            return Err(format!("'{claim}' is not a valid claim name"));
        }
        if let Some(denied) = [alias, claim].into_iter().find(|name| is_denied(name)) {
            return Err(format!("'{denied}' cannot be used in a claim alias"));
        }
        if mapping.contains_key(alias) {
            return Err(format!("alias '{alias}' appears more than once"));
        }
        if !seen_claims.insert(claim) {
            return Err(format!("claim '{claim}' appears more than once"));
        }
        mapping.insert(alias.to_owned(), claim.to_owned());
    }

    Ok(mapping)
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    fn params(variables: &[(&str, &str)]) -> AuthenticationParameters {
        variables.iter().fold(
            AuthenticationParameters::new("myapp", "cucumber"),
            |params, (name, value)| params.with_variable(*name, *value),
        )
    }

    #[test]
    fn undefined_variables_yield_empty_results() {
        let source = VariableClaimSource::default();
        let params = params(&[]);

        assert_eq!(source.fetch_mandatory_claims(&params), Ok(Vec::new()));
        assert_eq!(source.fetch_mapping_claims(&params), Ok(ClaimMapping::new()));
    }

    #[test]
    fn blank_variable_is_an_error() {
        let source = VariableClaimSource::default();
        let params = params(&[("enforced-claims", "  "), ("claim-aliases", "")]);

        assert_eq!(
            source.fetch_mandatory_claims(&params),
            Err(ClaimSourceError::empty_variable("enforced-claims"))
        );
        assert_eq!(
            source.fetch_mapping_claims(&params),
            Err(ClaimSourceError::empty_variable("claim-aliases"))
        );
    }

    #[test]
    fn enforced_claims_are_trimmed_and_ordered() {
        let source = VariableClaimSource::default();
        let params = params(&[("enforced-claims", " sub, project_id ,namespace/path")]);

        assert_eq!(
            source.fetch_mandatory_claims(&params),
            Ok(vec![
                "sub".to_owned(),
                "project_id".to_owned(),
                "namespace/path".to_owned(),
            ])
        );
    }

    #[test]
    fn enforced_claims_rejections() {
        for (value, reason) in [
            ("sub,,ref", "list contains an empty element"),
            ("sub,", "list contains an empty element"),
            ("1sub", "'1sub' is not a valid claim name"),
            ("a//b", "'a//b' is not a valid claim name"),
            ("with space", "'with space' is not a valid claim name"),
            ("sub,exp", "claim 'exp' cannot be enforced"),
            ("sub, sub", "claim 'sub' appears more than once"),
        ] {
            assert_eq!(parse_enforced_claims(value), Err(reason.to_owned()), "{value}");
        }
    }

    #[test]
    fn invalid_enforced_claims_name_the_variable() {
        let source = VariableClaimSource::default();
        let params = params(&[("enforced-claims", "iat")]);

        assert_eq!(
            source.fetch_mandatory_claims(&params),
            Err(ClaimSourceError::invalid_variable(
                "enforced-claims",
                "claim 'iat' cannot be enforced"
            ))
        );
    }

    #[test]
    fn claim_aliases_map_alias_to_claim() {
        let mapping = parse_claim_aliases("subject: sub, branch:git/ref").unwrap();

        assert_eq!(mapping.len(), 2);
        assert_eq!(mapping.get("subject").map(String::as_str), Some("sub"));
        assert_eq!(mapping.get("branch").map(String::as_str), Some("git/ref"));
    }

    #[test]
    fn claim_aliases_rejections() {
        for (value, reason) in [
            ("subject:sub,", "list contains an empty element"),
            ("subject", "'subject' is not in 'alias:claim' format"),
            ("a:b:c", "'a:b:c' is not in 'alias:claim' format"),
            (":sub", "'' is not a valid alias name"),
            ("nested/alias:sub", "'nested/alias' is not a valid alias name"),
            ("subject:", "'' is not a valid claim name"),
            ("expiry:exp", "'exp' cannot be used in a claim alias"),
            ("iss:issuer", "'iss' cannot be used in a claim alias"),
            ("a:sub,a:ref", "alias 'a' appears more than once"),
            ("a:sub,b:sub", "claim 'sub' appears more than once"),
        ] {
            assert_eq!(parse_claim_aliases(value), Err(reason.to_owned()), "{value}");
        }
    }

    #[test]
    fn custom_variable_names_come_from_config() {
        let source = VariableClaimSource::from_config(&JwtRestrictionsConfig {
            enforced_claims_variable: "mandatory".to_owned(),
            claim_aliases_variable: "aliases".to_owned(),
            ..JwtRestrictionsConfig::default()
        });
        let params = params(&[
            ("mandatory", "sub"),
            ("aliases", "subject:sub"),
            ("enforced-claims", "ignored"),
        ]);

        assert_eq!(
            source.fetch_mandatory_claims(&params),
            Ok(vec!["sub".to_owned()])
        );
        assert_eq!(source.fetch_mapping_claims(&params).unwrap().len(), 1);
    }
}
