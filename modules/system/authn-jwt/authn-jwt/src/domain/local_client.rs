//! Local (in-process) client for the `AuthN` JWT restriction engine.

use std::sync::Arc;

use authn_jwt_sdk::{
    AuthenticationParameters, BuildError, JwtRestrictionsClient, RestrictionValidator,
};

use super::ConstraintBuilder;

/// Local client wrapping the constraint builder.
pub struct JwtRestrictionsLocalClient {
    builder: Arc<ConstraintBuilder>,
}

impl JwtRestrictionsLocalClient {
    #[must_use]
    pub fn new(builder: Arc<ConstraintBuilder>) -> Self {
        Self { builder }
    }
}

fn log_and_convert(op: &str, e: BuildError) -> BuildError {
    tracing::error!(operation = op, error = ?e, "authn_jwt call failed");
    e
}

impl JwtRestrictionsClient for JwtRestrictionsLocalClient {
    fn build_restriction_validator(
        &self,
        params: &AuthenticationParameters,
    ) -> Result<Box<dyn RestrictionValidator>, BuildError> {
        self.builder
            .build(params)
            .map(|validator| Box::new(validator) as Box<dyn RestrictionValidator>)
            .map_err(|e| log_and_convert("build_restriction_validator", e))
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use authn_jwt_sdk::{ClaimSourceError, Restrictions};
    use tracing_test::traced_test;

    use super::*;
    use crate::config::JwtRestrictionsConfig;
    use crate::infra::VariableClaimSource;

    fn client() -> JwtRestrictionsLocalClient {
        let builder = ConstraintBuilder::new(
            Arc::new(VariableClaimSource::default()),
            JwtRestrictionsConfig::default(),
        );
        JwtRestrictionsLocalClient::new(Arc::new(builder))
    }

    #[traced_test]
    #[test]
    fn builds_boxed_validator() {
        let params = AuthenticationParameters::new("myapp", "cucumber")
            .with_variable("enforced-claims", "sub");

        let validator = client().build_restriction_validator(&params).unwrap();
        let restrictions: Restrictions = [("sub", "alice")].into_iter().collect();

        assert!(validator.validate(&restrictions).is_ok());
        assert!(logs_contain("Created restriction constraints from policy"));
    }

    #[traced_test]
    #[test]
    fn logs_and_returns_build_failures() {
        let params = AuthenticationParameters::new("myapp", "cucumber")
            .with_variable("enforced-claims", "");

        let Err(err) = client().build_restriction_validator(&params) else {
            panic!("expected build to fail");
        };

        assert_eq!(
            err,
            BuildError::ClaimSource(ClaimSourceError::empty_variable("enforced-claims"))
        );
        assert!(logs_contain("authn_jwt call failed"));
        assert!(logs_contain("build_restriction_validator"));
    }
}
