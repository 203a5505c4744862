use std::collections::HashMap;

use time::OffsetDateTime;

use crate::json::{JsonTraits, JsonType, SerdeJsonTraits};
use crate::prelude::*;

/// Claims set of a token with convenience accessors for the registered claims
///
/// Specified in [RFC 7519 Section 4.1: Registered Claim Names][1]
///
/// [1]: https://tools.ietf.org/html/rfc7519#section-4.1
#[derive(Debug, Clone, Default)]
pub struct Payload<J: JsonTraits = SerdeJsonTraits> {
    claims: ClaimMap<J>,
}

impl<J: JsonTraits> From<ClaimMap<J>> for Payload<J> {
    fn from(claims: ClaimMap<J>) -> Self {
        Self { claims }
    }
}

impl<J: JsonTraits> Payload<J> {
    /// 'iss' claim name
    pub const ISS: &'static str = "iss";
    /// 'sub' claim name
    pub const SUB: &'static str = "sub";
    /// 'aud' claim name
    pub const AUD: &'static str = "aud";
    /// 'exp' claim name
    pub const EXP: &'static str = "exp";
    /// 'nbf' claim name
    pub const NBF: &'static str = "nbf";
    /// 'iat' claim name
    pub const IAT: &'static str = "iat";
    /// 'jti' claim name
    pub const JTI: &'static str = "jti";

    /// Whether the issuer is present ("iss")
    pub fn has_issuer(&self) -> bool {
        self.has_payload_claim(Self::ISS)
    }

    /// Whether the subject is present ("sub")
    pub fn has_subject(&self) -> bool {
        self.has_payload_claim(Self::SUB)
    }

    /// Whether the audience is present ("aud")
    pub fn has_audience(&self) -> bool {
        self.has_payload_claim(Self::AUD)
    }

    /// Whether the expiration is present ("exp")
    pub fn has_expires_at(&self) -> bool {
        self.has_payload_claim(Self::EXP)
    }

    /// Whether the not before is present ("nbf")
    pub fn has_not_before(&self) -> bool {
        self.has_payload_claim(Self::NBF)
    }

    /// Whether the issued at is present ("iat")
    pub fn has_issued_at(&self) -> bool {
        self.has_payload_claim(Self::IAT)
    }

    /// Whether the token id is present ("jti")
    pub fn has_id(&self) -> bool {
        self.has_payload_claim(Self::JTI)
    }

    /// Issuer ("iss")
    pub fn get_issuer(&self) -> RustyJwtResult<String> {
        self.get_payload_claim(Self::ISS)?.as_string()
    }

    /// Subject ("sub")
    pub fn get_subject(&self) -> RustyJwtResult<String> {
        self.get_payload_claim(Self::SUB)?.as_string()
    }

    /// Audience ("aud"). A single string is accepted as a set of one.
    pub fn get_audience(&self) -> RustyJwtResult<ClaimSet> {
        let aud = self.get_payload_claim(Self::AUD)?;
        if aud.get_type() == JsonType::String {
            return Ok(ClaimSet::from([aud.as_string()?]));
        }
        aud.as_set()
    }

    /// Expiration ("exp")
    pub fn get_expires_at(&self) -> RustyJwtResult<OffsetDateTime> {
        self.get_payload_claim(Self::EXP)?.as_date()
    }

    /// Not before ("nbf")
    pub fn get_not_before(&self) -> RustyJwtResult<OffsetDateTime> {
        self.get_payload_claim(Self::NBF)?.as_date()
    }

    /// Issued at ("iat")
    pub fn get_issued_at(&self) -> RustyJwtResult<OffsetDateTime> {
        self.get_payload_claim(Self::IAT)?.as_date()
    }

    /// Token id ("jti")
    pub fn get_id(&self) -> RustyJwtResult<String> {
        self.get_payload_claim(Self::JTI)?.as_string()
    }

    /// Whether a claim is present
    pub fn has_payload_claim(&self, name: &str) -> bool {
        self.claims.has_claim(name)
    }

    /// Claim by name
    pub fn get_payload_claim(&self, name: &str) -> RustyJwtResult<Claim<J>> {
        self.claims.get_claim(name)
    }

    /// Every claim
    pub fn get_payload_claims(&self) -> HashMap<String, Claim<J>> {
        self.claims.get_claims()
    }

    /// Underlying claims
    pub fn claims(&self) -> &ClaimMap<J> {
        &self.claims
    }
}
