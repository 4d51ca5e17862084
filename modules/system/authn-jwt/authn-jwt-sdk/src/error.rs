//! Error types for JWT restriction validation.

use thiserror::Error;

/// Errors reported by a [`ClaimSource`](crate::ClaimSource).
///
/// The engine never inspects these; they abort the build and reach the
/// caller unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClaimSourceError {
    /// A policy variable holds a value that cannot be parsed.
    #[error("invalid value for variable '{variable}': {reason}")]
    InvalidVariable { variable: String, reason: String },

    /// A policy variable exists but holds no value.
    #[error("variable '{variable}' is defined but empty")]
    EmptyVariable { variable: String },

    /// The backing policy store could not be reached.
    #[error("claim source unavailable: {0}")]
    Unavailable(String),

    /// An internal error occurred.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ClaimSourceError {
    #[must_use]
    pub fn invalid_variable(variable: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidVariable {
            variable: variable.into(),
            reason: reason.into(),
        }
    }

    #[must_use]
    pub fn empty_variable(variable: impl Into<String>) -> Self {
        Self::EmptyVariable {
            variable: variable.into(),
        }
    }
}

/// Errors that prevent a restriction validator from being built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    /// The claim source failed.
    #[error(transparent)]
    ClaimSource(#[from] ClaimSourceError),

    /// Two aliases map to the same claim, so the claim cannot be translated
    /// into a single restriction name.
    #[error("claim '{claim}' is aliased by both '{first}' and '{second}'")]
    ConflictingClaimAliases {
        claim: String,
        first: String,
        second: String,
    },
}

/// A single failed constraint.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConstraintViolation {
    /// The host declares no restrictions at all.
    #[error("host has no restrictions defined")]
    EmptyRestrictions,

    /// A mandatory claim is not declared as a restriction.
    #[error("required restriction '{claim}' is missing")]
    MissingRequiredClaim { claim: String },

    /// A deny-listed claim is declared as a restriction.
    #[error("restriction '{claim}' is not permitted")]
    ForbiddenClaim { claim: String },
}

impl ConstraintViolation {
    #[must_use]
    pub fn missing(claim: impl Into<String>) -> Self {
        Self::MissingRequiredClaim {
            claim: claim.into(),
        }
    }

    #[must_use]
    pub fn forbidden(claim: impl Into<String>) -> Self {
        Self::ForbiddenClaim {
            claim: claim.into(),
        }
    }
}

/// Aggregated result of a failed restriction validation.
///
/// Always holds at least one violation, in constraint order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("restriction validation failed: {}", join_violations(.violations))]
pub struct ValidationError {
    violations: Vec<ConstraintViolation>,
}

impl ValidationError {
    /// Wraps the given violations, returning `None` when there are none.
    #[must_use]
    pub fn from_violations(violations: Vec<ConstraintViolation>) -> Option<Self> {
        if violations.is_empty() {
            None
        } else {
            Some(Self { violations })
        }
    }

    #[must_use]
    pub fn violations(&self) -> &[ConstraintViolation] {
        &self.violations
    }

    /// The violation of the first failing constraint.
    #[must_use]
    pub fn first(&self) -> Option<&ConstraintViolation> {
        self.violations.first()
    }

    #[must_use]
    pub fn contains(&self, violation: &ConstraintViolation) -> bool {
        self.violations.contains(violation)
    }
}

fn join_violations(violations: &[ConstraintViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn no_violations_is_not_an_error() {
        assert!(ValidationError::from_violations(Vec::new()).is_none());
    }

    #[test]
    fn display_lists_every_violation() {
        let err = ValidationError::from_violations(vec![
            ConstraintViolation::missing("sub"),
            ConstraintViolation::forbidden("exp"),
        ])
        .unwrap();

        assert_eq!(
            err.to_string(),
            "restriction validation failed: required restriction 'sub' is missing; \
             restriction 'exp' is not permitted"
        );
        assert_eq!(err.first(), Some(&ConstraintViolation::missing("sub")));
        assert!(err.contains(&ConstraintViolation::forbidden("exp")));
    }

    #[test]
    fn claim_source_errors_pass_through_build_error() {
        let source = ClaimSourceError::invalid_variable("enforced-claims", "bad claim name");
        let err = BuildError::from(source.clone());

        assert_eq!(err.to_string(), source.to_string());
        assert_eq!(err, BuildError::ClaimSource(source));
    }
}
