//! Domain layer for the `AuthN` JWT restriction engine.

pub mod builder;
pub mod claim_mapper;
pub mod constraint;
pub mod events;
pub mod local_client;
pub mod validator;

pub use builder::ConstraintBuilder;
pub use claim_mapper::InvertedClaimMapping;
pub use constraint::{
    Constraint, DENY_LIST_CONSTRAINT, NonPermittedConstraint, NotEmptyConstraint,
    RequiredConstraint, RestrictionConstraint,
};
pub use events::{NoopEventSink, TracingEventSink};
pub use local_client::JwtRestrictionsLocalClient;
pub use validator::CompositeValidator;
