//! `AuthN` JWT restriction engine
//!
//! Builds, per authentication attempt, the composite validator that checks
//! the restrictions a host declares for a JWT authenticator:
//!
//! - the host declares at least one restriction
//! - every mandatory claim (after alias translation) is declared
//! - no restriction is named after `exp`, `iat`, `nbf` or `iss`
//!
//! Exposes [`JwtRestrictionsLocalClient`] implementing
//! [`authn_jwt_sdk::JwtRestrictionsClient`].
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod config;
pub mod domain;
pub mod infra;

pub use config::{AliasConflictPolicy, FailureMode, JwtRestrictionsConfig};
pub use domain::{CompositeValidator, ConstraintBuilder, JwtRestrictionsLocalClient};
pub use infra::VariableClaimSource;
