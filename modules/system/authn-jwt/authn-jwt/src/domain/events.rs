//! Event sinks for restriction building.

use authn_jwt_sdk::{RestrictionEvent, RestrictionEventSink};
use tracing::{debug, info};

/// Writes events to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEventSink;

impl RestrictionEventSink for TracingEventSink {
    fn emit(&self, event: &RestrictionEvent) {
        match event {
            RestrictionEvent::ConstraintCreationStarted { service_id } => {
                info!(service_id = %service_id, "Creating restriction constraints from policy");
            }
            RestrictionEvent::ClaimConverted { claim, mapped } => {
                debug!(claim = %claim, mapped = %mapped, "Converting claim according to mapping");
            }
            RestrictionEvent::MandatoryClaimsToBeChecked { claims } => {
                info!(claims = ?claims, "Mandatory claims to be checked");
            }
            RestrictionEvent::ConstraintCreationCompleted {
                service_id,
                constraints,
            } => {
                info!(
                    service_id = %service_id,
                    constraints,
                    "Created restriction constraints from policy"
                );
            }
        }
    }
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopEventSink;

impl RestrictionEventSink for NoopEventSink {
    fn emit(&self, _event: &RestrictionEvent) {}
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    #[traced_test]
    #[test]
    fn tracing_sink_logs_claim_conversion() {
        TracingEventSink.emit(&RestrictionEvent::ClaimConverted {
            claim: "sub".to_owned(),
            mapped: "subject".to_owned(),
        });

        assert!(logs_contain("Converting claim according to mapping"));
        assert!(logs_contain("mapped=subject"));
    }

    #[traced_test]
    #[test]
    fn tracing_sink_logs_mandatory_claims() {
        TracingEventSink.emit(&RestrictionEvent::MandatoryClaimsToBeChecked {
            claims: vec!["subject".to_owned(), "ref".to_owned()],
        });

        assert!(logs_contain("Mandatory claims to be checked"));
        assert!(logs_contain("subject"));
    }
}
