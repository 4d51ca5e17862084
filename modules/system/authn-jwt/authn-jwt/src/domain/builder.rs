//! Constraint builder: turns policy claims into a composite validator.

use std::sync::Arc;

use authn_jwt_sdk::{
    AuthenticationParameters, BuildError, ClaimSource, RestrictionEvent, RestrictionEventSink,
};

use super::claim_mapper::InvertedClaimMapping;
use super::constraint::{Constraint, DENY_LIST_CONSTRAINT, NotEmptyConstraint, RequiredConstraint};
use super::events::TracingEventSink;
use super::validator::CompositeValidator;
use crate::config::JwtRestrictionsConfig;

/// Builds one [`CompositeValidator`] per authentication attempt.
///
/// The validator always holds, in this order:
/// 1. [`NotEmptyConstraint`]
/// 2. [`RequiredConstraint`] over the mandatory claims, translated through
///    the configured claim aliases
/// 3. the deny-list [`NonPermittedConstraint`](super::constraint::NonPermittedConstraint)
pub struct ConstraintBuilder {
    claims: Arc<dyn ClaimSource>,
    events: Arc<dyn RestrictionEventSink>,
    config: JwtRestrictionsConfig,
}

/// Intermediate results of a single build, each computed once.
#[derive(Debug)]
struct BuildContext {
    mandatory_claims: Vec<String>,
    mapping: InvertedClaimMapping,
    mapped_mandatory_claims: Vec<String>,
}

impl ConstraintBuilder {
    /// Builder that reports events through `tracing`.
    #[must_use]
    pub fn new(claims: Arc<dyn ClaimSource>, config: JwtRestrictionsConfig) -> Self {
        Self::with_events(claims, Arc::new(TracingEventSink), config)
    }

    #[must_use]
    pub fn with_events(
        claims: Arc<dyn ClaimSource>,
        events: Arc<dyn RestrictionEventSink>,
        config: JwtRestrictionsConfig,
    ) -> Self {
        Self {
            claims,
            events,
            config,
        }
    }

    /// Build the validator for one authentication attempt.
    ///
    /// # Errors
    ///
    /// - `ClaimSource` if the claim source fails (returned unchanged)
    /// - `ConflictingClaimAliases` if the aliases cannot be inverted
    #[tracing::instrument(skip_all, fields(service_id = %params.service_id))]
    pub fn build(
        &self,
        params: &AuthenticationParameters,
    ) -> Result<CompositeValidator, BuildError> {
        self.events.emit(&RestrictionEvent::ConstraintCreationStarted {
            service_id: params.service_id.clone(),
        });

        let ctx = self.prepare(params)?;
        tracing::trace!(
            mandatory = ?ctx.mandatory_claims,
            aliased = !ctx.mapping.is_empty(),
            "Resolved policy claims"
        );

        self.events.emit(&RestrictionEvent::MandatoryClaimsToBeChecked {
            claims: ctx.mapped_mandatory_claims.clone(),
        });

        let constraints: Vec<Constraint> = vec![
            NotEmptyConstraint.into(),
            RequiredConstraint::new(ctx.mapped_mandatory_claims).into(),
            DENY_LIST_CONSTRAINT.into(),
        ];
        let validator = CompositeValidator::new(constraints, self.config.failure_mode);

        self.events.emit(&RestrictionEvent::ConstraintCreationCompleted {
            service_id: params.service_id.clone(),
            constraints: validator.constraints().len(),
        });

        Ok(validator)
    }

    fn prepare(&self, params: &AuthenticationParameters) -> Result<BuildContext, BuildError> {
        let mandatory_claims = self.claims.fetch_mandatory_claims(params)?;
        let raw_mapping = self.claims.fetch_mapping_claims(params)?;
        let mapping = InvertedClaimMapping::invert(&raw_mapping, self.config.alias_conflicts)?;

        let mapped_mandatory_claims = mandatory_claims
            .iter()
            .map(|claim| mapping.translate(claim, self.events.as_ref()))
            .collect();

        Ok(BuildContext {
            mandatory_claims,
            mapping,
            mapped_mandatory_claims,
        })
    }
}
