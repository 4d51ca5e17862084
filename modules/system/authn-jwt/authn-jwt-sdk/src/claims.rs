//! Standard JWT claim names and the restriction deny list.
//!
//! # References
//! - [RFC 7519 - JSON Web Token (JWT)](https://datatracker.ietf.org/doc/html/rfc7519)

/// Registered JWT claim names (RFC 7519, Section 4.1) that describe the
/// token itself rather than its subject.
pub struct StandardClaim;

impl StandardClaim {
    /// Issuer claim.
    ///
    /// See: <https://datatracker.ietf.org/doc/html/rfc7519#section-4.1.1>
    pub const ISS: &'static str = "iss";

    /// Expiration Time claim.
    ///
    /// See: <https://datatracker.ietf.org/doc/html/rfc7519#section-4.1.4>
    pub const EXP: &'static str = "exp";

    /// Not Before claim.
    ///
    /// See: <https://datatracker.ietf.org/doc/html/rfc7519#section-4.1.5>
    pub const NBF: &'static str = "nbf";

    /// Issued At claim.
    ///
    /// See: <https://datatracker.ietf.org/doc/html/rfc7519#section-4.1.6>
    pub const IAT: &'static str = "iat";
}

/// Claims that must never be used as restriction keys.
///
/// These describe the token itself (lifetime and issuer) rather than the
/// identity it was issued for, so binding a host to them would not scope
/// the host to anything meaningful.
pub const DENY_LIST: &[&str] = &[
    StandardClaim::EXP,
    StandardClaim::IAT,
    StandardClaim::NBF,
    StandardClaim::ISS,
];

/// Checks if the given claim name is on the [`DENY_LIST`].
#[must_use]
pub fn is_denied(name: &str) -> bool {
    DENY_LIST.contains(&name)
}
