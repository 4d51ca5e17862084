//! Restriction constraints.
//!
//! The set of constraint kinds is closed: [`Constraint`] enumerates them and
//! dispatches to the concrete types, which share the
//! [`RestrictionConstraint`] trait.

use authn_jwt_sdk::{ConstraintViolation, DENY_LIST, Restrictions};

/// A single predicate over the restriction names of a host.
pub trait RestrictionConstraint {
    /// # Errors
    ///
    /// The violation describing why the restrictions are rejected.
    fn validate(&self, restrictions: &Restrictions) -> Result<(), ConstraintViolation>;
}

/// Rejects hosts without any restriction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NotEmptyConstraint;

impl RestrictionConstraint for NotEmptyConstraint {
    fn validate(&self, restrictions: &Restrictions) -> Result<(), ConstraintViolation> {
        if restrictions.is_empty() {
            return Err(ConstraintViolation::EmptyRestrictions);
        }
        Ok(())
    }
}

/// Requires every listed name to be declared as a restriction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequiredConstraint {
    required: Vec<String>,
}

impl RequiredConstraint {
    #[must_use]
    pub fn new(required: Vec<String>) -> Self {
        Self { required }
    }

    #[must_use]
    pub fn required(&self) -> &[String] {
        &self.required
    }
}

impl RestrictionConstraint for RequiredConstraint {
    fn validate(&self, restrictions: &Restrictions) -> Result<(), ConstraintViolation> {
        match self
            .required
            .iter()
            .find(|claim| !restrictions.contains(claim))
        {
            Some(missing) => Err(ConstraintViolation::missing(missing.as_str())),
            None => Ok(()),
        }
    }
}

/// Rejects restrictions named after any of the denied claims.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NonPermittedConstraint {
    denied: &'static [&'static str],
}

impl NonPermittedConstraint {
    #[must_use]
    pub const fn new(denied: &'static [&'static str]) -> Self {
        Self { denied }
    }

    #[must_use]
    pub fn denied(&self) -> &'static [&'static str] {
        self.denied
    }
}

/// Shared deny-list constraint used by every build.
pub const DENY_LIST_CONSTRAINT: NonPermittedConstraint = NonPermittedConstraint::new(DENY_LIST);

impl RestrictionConstraint for NonPermittedConstraint {
    fn validate(&self, restrictions: &Restrictions) -> Result<(), ConstraintViolation> {
        match restrictions.names().find(|name| self.denied.contains(name)) {
            Some(forbidden) => Err(ConstraintViolation::forbidden(forbidden)),
            None => Ok(()),
        }
    }
}

/// Every constraint kind the engine knows about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Constraint {
    NotEmpty(NotEmptyConstraint),
    Required(RequiredConstraint),
    NonPermitted(NonPermittedConstraint),
}

impl RestrictionConstraint for Constraint {
    fn validate(&self, restrictions: &Restrictions) -> Result<(), ConstraintViolation> {
        match self {
            Self::NotEmpty(c) => c.validate(restrictions),
            Self::Required(c) => c.validate(restrictions),
            Self::NonPermitted(c) => c.validate(restrictions),
        }
    }
}

impl From<NotEmptyConstraint> for Constraint {
    fn from(c: NotEmptyConstraint) -> Self {
        Self::NotEmpty(c)
    }
}

impl From<RequiredConstraint> for Constraint {
    fn from(c: RequiredConstraint) -> Self {
        Self::Required(c)
    }
}

impl From<NonPermittedConstraint> for Constraint {
    fn from(c: NonPermittedConstraint) -> Self {
        Self::NonPermitted(c)
    }
}
