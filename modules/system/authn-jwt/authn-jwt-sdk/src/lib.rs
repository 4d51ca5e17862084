//! `AuthN` JWT restrictions SDK
//!
//! This crate provides the public API for the `authn_jwt` restriction engine:
//!
//! - [`JwtRestrictionsClient`] - Public API trait for consumers
//! - [`ClaimSource`] - Policy claims consumed by the engine
//! - [`RestrictionValidator`] - Validator returned to the caller
//! - [`RestrictionEventSink`] - Observability sink
//! - [`AuthenticationParameters`], [`Restrictions`] - Models
//! - [`BuildError`], [`ValidationError`] - Error types
//! - [`DENY_LIST`] - Claims never allowed as restrictions
//!
//! ## Usage
//!
//! ```ignore
//! use authn_jwt_sdk::{JwtRestrictionsClient, Restrictions};
//!
//! let validator = client.build_restriction_validator(&params)?;
//! let restrictions =
//!     Restrictions::from_annotations(&params.host_annotations, "authn-jwt", &params.service_id);
//!
//! // Any error here means authentication is denied
//! validator.validate(&restrictions)?;
//! ```
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod api;
pub mod claims;
pub mod error;
pub mod models;

// Re-export main types at crate root
pub use api::{ClaimSource, JwtRestrictionsClient, RestrictionEventSink, RestrictionValidator};
pub use claims::{DENY_LIST, StandardClaim, is_denied};
pub use error::{BuildError, ClaimSourceError, ConstraintViolation, ValidationError};
pub use models::{AuthenticationParameters, ClaimMapping, RestrictionEvent, Restrictions};
