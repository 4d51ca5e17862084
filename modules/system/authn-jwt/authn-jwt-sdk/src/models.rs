//! Domain models for JWT restriction validation.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Raw claim mapping as configured by policy: restriction alias to JWT claim.
pub type ClaimMapping = BTreeMap<String, String>;

/// Everything known about a single JWT authentication attempt.
///
/// Built by the authenticator before restriction validation and treated as
/// read-only by the engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AuthenticationParameters {
    /// Authenticator service ID (e.g. `myapp` in `authn-jwt/myapp`).
    pub service_id: String,

    /// Account the authenticator belongs to.
    pub account: String,

    /// Host (or role) being authenticated, if already resolved.
    pub host_id: Option<String>,

    /// Claims of the already verified and decoded token.
    pub decoded_token: Map<String, Value>,

    /// Authenticator policy variables, keyed by variable name
    /// (e.g. `enforced-claims`, `claim-aliases`).
    pub variables: HashMap<String, String>,

    /// Annotations of the host being authenticated.
    pub host_annotations: BTreeMap<String, String>,
}

impl AuthenticationParameters {
    #[must_use]
    pub fn new(service_id: impl Into<String>, account: impl Into<String>) -> Self {
        Self {
            service_id: service_id.into(),
            account: account.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_host(mut self, host_id: impl Into<String>) -> Self {
        self.host_id = Some(host_id.into());
        self
    }

    #[must_use]
    pub fn with_variable(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_annotation(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.host_annotations.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_decoded_token(mut self, claims: Map<String, Value>) -> Self {
        self.decoded_token = claims;
        self
    }

    /// Value of a policy variable, if defined.
    #[must_use]
    pub fn variable(&self, name: &str) -> Option<&str> {
        self.variables.get(name).map(String::as_str)
    }
}

/// Restrictions declared for a host: restriction name to expected claim value.
///
/// Constraints only look at the names. Names iterate in sorted order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Restrictions(BTreeMap<String, String>);

impl Restrictions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Extracts the restrictions scoped to one authenticator service.
    ///
    /// Only annotations keyed `<prefix>/<service_id>/<name>` are kept, as
    /// `name -> value`. Annotations of other services and the bare
    /// `<prefix>/<service_id>` key are ignored.
    #[must_use]
    pub fn from_annotations(
        annotations: &BTreeMap<String, String>,
        prefix: &str,
        service_id: &str,
    ) -> Self {
        let scope = format!("{prefix}/{service_id}/");
        annotations
            .iter()
            .filter_map(|(key, value)| {
                key.strip_prefix(scope.as_str())
                    .filter(|name| !name.is_empty())
                    .map(|name| (name.to_owned(), value.clone()))
            })
            .collect()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    #[must_use]
    pub fn value(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Restriction names in sorted order.
    #[must_use]
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Restrictions {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Observability events emitted while building a restriction validator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum RestrictionEvent {
    /// Constraint creation from policy has started.
    ConstraintCreationStarted { service_id: String },

    /// A mandatory claim was replaced by its configured alias.
    ClaimConverted { claim: String, mapped: String },

    /// The final restriction names the required constraint will check.
    MandatoryClaimsToBeChecked { claims: Vec<String> },

    /// Constraint creation from policy has finished.
    ConstraintCreationCompleted {
        service_id: String,
        constraints: usize,
    },
}
