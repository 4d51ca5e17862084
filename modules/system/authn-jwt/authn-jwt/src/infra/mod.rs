//! Infrastructure adapters for the `AuthN` JWT restriction engine.

pub mod policy_variables;

pub use policy_variables::VariableClaimSource;
