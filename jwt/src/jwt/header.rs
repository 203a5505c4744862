use std::collections::HashMap;

use crate::json::{JsonTraits, SerdeJsonTraits};
use crate::prelude::*;

/// JOSE header of a token with convenience accessors for the registered parameters
///
/// Specified in [RFC 7515 Section 4.1: Registered Header Parameter Names][1]
///
/// [1]: https://tools.ietf.org/html/rfc7515#section-4.1
#[derive(Debug, Clone, Default)]
pub struct Header<J: JsonTraits = SerdeJsonTraits> {
    claims: ClaimMap<J>,
}

impl<J: JsonTraits> From<ClaimMap<J>> for Header<J> {
    fn from(claims: ClaimMap<J>) -> Self {
        Self { claims }
    }
}

impl<J: JsonTraits> Header<J> {
    /// 'alg' parameter name
    pub const ALG: &'static str = "alg";
    /// 'typ' parameter name
    pub const TYP: &'static str = "typ";
    /// 'cty' parameter name
    pub const CTY: &'static str = "cty";
    /// 'kid' parameter name
    pub const KID: &'static str = "kid";

    /// Whether the algorithm is present ("alg")
    pub fn has_algorithm(&self) -> bool {
        self.has_header_claim(Self::ALG)
    }

    /// Whether the type is present ("typ")
    pub fn has_type(&self) -> bool {
        self.has_header_claim(Self::TYP)
    }

    /// Whether the content type is present ("cty")
    pub fn has_content_type(&self) -> bool {
        self.has_header_claim(Self::CTY)
    }

    /// Whether the key id is present ("kid")
    pub fn has_key_id(&self) -> bool {
        self.has_header_claim(Self::KID)
    }

    /// Algorithm ("alg")
    pub fn get_algorithm(&self) -> RustyJwtResult<String> {
        self.get_header_claim(Self::ALG)?.as_string()
    }

    /// Type ("typ")
    pub fn get_type(&self) -> RustyJwtResult<String> {
        self.get_header_claim(Self::TYP)?.as_string()
    }

    /// Content type ("cty")
    pub fn get_content_type(&self) -> RustyJwtResult<String> {
        self.get_header_claim(Self::CTY)?.as_string()
    }

    /// Key id ("kid")
    pub fn get_key_id(&self) -> RustyJwtResult<String> {
        self.get_header_claim(Self::KID)?.as_string()
    }

    /// Whether a header parameter is present
    pub fn has_header_claim(&self, name: &str) -> bool {
        self.claims.has_claim(name)
    }

    /// Header parameter by name
    pub fn get_header_claim(&self, name: &str) -> RustyJwtResult<Claim<J>> {
        self.claims.get_claim(name)
    }

    /// Every header parameter
    pub fn get_header_claims(&self) -> HashMap<String, Claim<J>> {
        self.claims.get_claims()
    }

    /// Underlying claims
    pub fn claims(&self) -> &ClaimMap<J> {
        &self.claims
    }
}
