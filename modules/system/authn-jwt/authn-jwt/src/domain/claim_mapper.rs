//! Claim alias inversion and translation.

use std::collections::HashMap;

use authn_jwt_sdk::{BuildError, ClaimMapping, RestrictionEvent, RestrictionEventSink};

use crate::config::AliasConflictPolicy;

/// Claim to restriction alias lookup, the inverse of a [`ClaimMapping`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvertedClaimMapping {
    aliases: HashMap<String, String>,
}

impl InvertedClaimMapping {
    /// Inverts `alias -> claim` into `claim -> alias`.
    ///
    /// Aliases are visited in sorted order.
    ///
    /// # Errors
    ///
    /// `ConflictingClaimAliases` when two aliases name the same claim and the
    /// policy is [`AliasConflictPolicy::Reject`].
    pub fn invert(
        mapping: &ClaimMapping,
        conflicts: AliasConflictPolicy,
    ) -> Result<Self, BuildError> {
        let mut aliases: HashMap<String, String> = HashMap::with_capacity(mapping.len());
        for (alias, claim) in mapping {
            if let Some(previous) = aliases.insert(claim.clone(), alias.clone())
                && conflicts == AliasConflictPolicy::Reject
            {
                return Err(BuildError::ConflictingClaimAliases {
                    claim: claim.clone(),
                    first: previous,
                    second: alias.clone(),
                });
            }
        }

        Ok(Self { aliases })
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }

    #[must_use]
    pub fn alias_for(&self, claim: &str) -> Option<&str> {
        self.aliases.get(claim).map(String::as_str)
    }

    /// Restriction name expected for `claim`: its alias, or the claim itself.
    ///
    /// Emits [`RestrictionEvent::ClaimConverted`] when an alias is used.
    #[must_use]
    pub fn translate(&self, claim: &str, events: &dyn RestrictionEventSink) -> String {
        match self.alias_for(claim) {
            Some(alias) if alias != claim => {
                events.emit(&RestrictionEvent::ClaimConverted {
                    claim: claim.to_owned(),
                    mapped: alias.to_owned(),
                });
                alias.to_owned()
            }
            _ => claim.to_owned(),
        }
    }
}
