use time::OffsetDateTime;

use crate::{
    json::{JsonTraits, JsonType, SerdeJsonTraits},
    prelude::*,
};

/// Everything a [super::ClaimCheck] gets to see
#[derive(Debug)]
pub struct VerifyContext<'a, J: JsonTraits = SerdeJsonTraits> {
    /// Sampled once per verification so every check agrees on it
    pub current_time: OffsetDateTime,
    /// Token under verification
    pub jwt: &'a DecodedJwt<J>,
    /// Leeway in seconds of the default "exp", "iat" and "nbf" checks
    pub default_leeway: u64,
    /// Name of the claim the running check is registered under
    pub claim_key: &'a str,
}

impl<J: JsonTraits> VerifyContext<'_, J> {
    /// The checked claim, from the payload or the header. Fails with [RustyJwtError::MissingClaim] when absent.
    pub fn get_claim(&self, in_header: bool) -> RustyJwtResult<Claim<J>> {
        let claim = if in_header {
            self.jwt.header().get_header_claim(self.claim_key)
        } else {
            self.jwt.payload().get_payload_claim(self.claim_key)
        };
        claim.map_err(|_| RustyJwtError::MissingClaim(self.claim_key.to_string()))
    }

    /// Same as [Self::get_claim] but also fails with [RustyJwtError::ClaimTypeMismatch] when not of type `ty`
    pub fn get_typed_claim(&self, in_header: bool, ty: JsonType) -> RustyJwtResult<Claim<J>> {
        let claim = self.get_claim(in_header)?;
        if claim.get_type() != ty {
            return Err(self.type_mismatch());
        }
        Ok(claim)
    }

    /// Whether the checked claim is present
    pub fn has_claim(&self, in_header: bool) -> bool {
        if in_header {
            self.jwt.header().has_header_claim(self.claim_key)
        } else {
            self.jwt.payload().has_payload_claim(self.claim_key)
        }
    }

    pub(crate) fn type_mismatch(&self) -> RustyJwtError {
        RustyJwtError::ClaimTypeMismatch(self.claim_key.to_string())
    }

    pub(crate) fn value_mismatch(&self) -> RustyJwtError {
        RustyJwtError::ClaimValueMismatch(self.claim_key.to_string())
    }

    pub(crate) fn expired(&self) -> RustyJwtError {
        RustyJwtError::TokenExpired(self.claim_key.to_string())
    }
}
