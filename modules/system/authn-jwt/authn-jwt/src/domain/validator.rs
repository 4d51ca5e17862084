//! Composite restriction validator.

use authn_jwt_sdk::{Restrictions, RestrictionValidator, ValidationError};

use super::constraint::{Constraint, RestrictionConstraint};
use crate::config::FailureMode;

/// Applies a fixed, ordered list of constraints. Succeeds only if all do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositeValidator {
    constraints: Vec<Constraint>,
    failure_mode: FailureMode,
}

impl CompositeValidator {
    #[must_use]
    pub fn new(constraints: Vec<Constraint>, failure_mode: FailureMode) -> Self {
        Self {
            constraints,
            failure_mode,
        }
    }

    #[must_use]
    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    #[must_use]
    pub fn failure_mode(&self) -> FailureMode {
        self.failure_mode
    }
}

impl RestrictionValidator for CompositeValidator {
    fn validate(&self, restrictions: &Restrictions) -> Result<(), ValidationError> {
        let mut violations = Vec::new();
        for constraint in &self.constraints {
            if let Err(violation) = constraint.validate(restrictions) {
                violations.push(violation);
                if self.failure_mode == FailureMode::FailFast {
                    break;
                }
            }
        }

        match ValidationError::from_violations(violations) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}
