//! Public API traits for JWT restriction validation.
//!
//! The engine consumes a [`ClaimSource`] and a [`RestrictionEventSink`],
//! and hands out [`RestrictionValidator`]s through [`JwtRestrictionsClient`].

use crate::error::{BuildError, ClaimSourceError, ValidationError};
use crate::models::{AuthenticationParameters, ClaimMapping, Restrictions, RestrictionEvent};

/// Source of the policy-declared claims for an authenticator service.
///
/// Implementations must be pure functions of the parameters (or internally
/// synchronized); the engine calls each method at most once per build.
pub trait ClaimSource: Send + Sync {
    /// Claims every host of this service must be restricted on, in policy order.
    ///
    /// # Errors
    ///
    /// Any failure to read or parse the policy. Propagated to the caller
    /// unchanged.
    fn fetch_mandatory_claims(
        &self,
        params: &AuthenticationParameters,
    ) -> Result<Vec<String>, ClaimSourceError>;

    /// Configured claim aliases, keyed by alias with the JWT claim as value.
    ///
    /// An empty mapping is valid.
    ///
    /// # Errors
    ///
    /// Any failure to read or parse the policy. Propagated to the caller
    /// unchanged.
    fn fetch_mapping_claims(
        &self,
        params: &AuthenticationParameters,
    ) -> Result<ClaimMapping, ClaimSourceError>;
}

/// Fire-and-forget sink for [`RestrictionEvent`]s.
pub trait RestrictionEventSink: Send + Sync {
    fn emit(&self, event: &RestrictionEvent);
}

/// Checks a host's declared restrictions.
///
/// Validators are pure: the result depends only on the restrictions passed
/// in, so one instance may be reused.
pub trait RestrictionValidator: Send + Sync {
    /// # Errors
    ///
    /// `ValidationError` listing the failed constraints. Callers must treat
    /// it as an authentication denial.
    fn validate(&self, restrictions: &Restrictions) -> Result<(), ValidationError>;
}

/// Public API for building restriction validators.
///
/// ```ignore
/// let validator = client.build_restriction_validator(&params)?;
/// let restrictions = Restrictions::from_annotations(
///     &params.host_annotations,
///     "authn-jwt",
///     &params.service_id,
/// );
/// validator.validate(&restrictions)?;
/// ```
pub trait JwtRestrictionsClient: Send + Sync {
    /// Build the composite validator for one authentication attempt.
    ///
    /// # Errors
    ///
    /// - `ClaimSource` if the mandatory claims or claim aliases cannot be read
    /// - `ConflictingClaimAliases` if the aliases cannot be inverted
    fn build_restriction_validator(
        &self,
        params: &AuthenticationParameters,
    ) -> Result<Box<dyn RestrictionValidator>, BuildError>;
}
