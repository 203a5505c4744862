//! JSON Web Keys and key sets
//!
//! Specified in [RFC 7517: JSON Web Key (JWK)][1]
//!
//! [1]: https://tools.ietf.org/html/rfc7517

use std::collections::HashMap;

use crate::{
    json::{JsonArray, JsonTraits, SerdeJsonTraits},
    prelude::*,
};

/// A single JSON Web Key with accessors for the parameters of [RFC 7517 Section 4][1]
///
/// [1]: https://tools.ietf.org/html/rfc7517#section-4
#[derive(Debug, Clone, Default)]
pub struct Jwk<J: JsonTraits = SerdeJsonTraits> {
    claims: ClaimMap<J>,
}

impl<J: JsonTraits> From<ClaimMap<J>> for Jwk<J> {
    fn from(claims: ClaimMap<J>) -> Self {
        Self { claims }
    }
}

impl<J: JsonTraits> Jwk<J> {
    /// 'kty' parameter name
    pub const KTY: &'static str = "kty";
    /// 'use' parameter name
    pub const USE: &'static str = "use";
    /// 'key_ops' parameter name
    pub const KEY_OPS: &'static str = "key_ops";
    /// 'alg' parameter name
    pub const ALG: &'static str = "alg";
    /// 'kid' parameter name
    pub const KID: &'static str = "kid";
    /// 'crv' parameter name
    pub const CRV: &'static str = "crv";
    /// 'x5c' parameter name
    pub const X5C: &'static str = "x5c";
    /// 'x5u' parameter name
    pub const X5U: &'static str = "x5u";
    /// 'x5t' parameter name
    pub const X5T: &'static str = "x5t";
    /// 'x5t#S256' parameter name
    pub const X5T_S256: &'static str = "x5t#S256";

    /// Parses JSON text which has to be an object
    pub fn parse(text: &str) -> RustyJwtResult<Self> {
        ClaimMap::parse(text).map(Self::from)
    }

    /// Wraps an already parsed JSON value which has to be an object
    pub fn from_value(value: &J::Value) -> RustyJwtResult<Self> {
        let claims = J::as_object(value).map_err(|_| RustyJwtError::InvalidJson)?;
        Ok(ClaimMap::new(claims).into())
    }

    /// Key type ("kty")
    pub fn get_key_type(&self) -> RustyJwtResult<String> {
        self.get_jwk_claim(Self::KTY)?.as_string()
    }

    /// Public key use ("use")
    pub fn get_use(&self) -> RustyJwtResult<String> {
        self.get_jwk_claim(Self::USE)?.as_string()
    }

    /// Key operations ("key_ops")
    pub fn get_key_operations(&self) -> RustyJwtResult<ClaimSet> {
        self.get_jwk_claim(Self::KEY_OPS)?.as_set()
    }

    /// Algorithm ("alg")
    pub fn get_algorithm(&self) -> RustyJwtResult<String> {
        self.get_jwk_claim(Self::ALG)?.as_string()
    }

    /// Key id ("kid")
    pub fn get_key_id(&self) -> RustyJwtResult<String> {
        self.get_jwk_claim(Self::KID)?.as_string()
    }

    /// Curve ("crv")
    pub fn get_curve(&self) -> RustyJwtResult<String> {
        self.get_jwk_claim(Self::CRV)?.as_string()
    }

    /// Certificate chain ("x5c"), in order
    pub fn get_x5c(&self) -> RustyJwtResult<Vec<String>> {
        self.get_jwk_claim(Self::X5C)?
            .as_array()?
            .values()
            .map(J::as_string)
            .collect()
    }

    /// Certificate chain URL ("x5u")
    pub fn get_x5u(&self) -> RustyJwtResult<String> {
        self.get_jwk_claim(Self::X5U)?.as_string()
    }

    /// SHA-1 certificate thumbprint ("x5t")
    pub fn get_x5t(&self) -> RustyJwtResult<String> {
        self.get_jwk_claim(Self::X5T)?.as_string()
    }

    /// SHA-256 certificate thumbprint ("x5t#S256")
    pub fn get_x5t_sha256(&self) -> RustyJwtResult<String> {
        self.get_jwk_claim(Self::X5T_S256)?.as_string()
    }

    /// First certificate of the chain, the one holding the key
    pub fn get_x5c_key_value(&self) -> RustyJwtResult<String> {
        let x5c = self.get_jwk_claim(Self::X5C)?.as_array()?;
        let first = x5c
            .first()
            .ok_or_else(|| RustyJwtError::ClaimNotPresent(Self::X5C.to_string()))?;
        J::as_string(first)
    }

    /// Whether the key type is present ("kty")
    pub fn has_key_type(&self) -> bool {
        self.has_jwk_claim(Self::KTY)
    }

    /// Whether the public key use is present ("use")
    pub fn has_use(&self) -> bool {
        self.has_jwk_claim(Self::USE)
    }

    /// Whether the key operations are present ("key_ops")
    pub fn has_key_operations(&self) -> bool {
        self.has_jwk_claim(Self::KEY_OPS)
    }

    /// Whether the algorithm is present ("alg")
    pub fn has_algorithm(&self) -> bool {
        self.has_jwk_claim(Self::ALG)
    }

    /// Whether the key id is present ("kid")
    pub fn has_key_id(&self) -> bool {
        self.has_jwk_claim(Self::KID)
    }

    /// Whether the curve is present ("crv")
    pub fn has_curve(&self) -> bool {
        self.has_jwk_claim(Self::CRV)
    }

    /// Whether the certificate chain is present ("x5c")
    pub fn has_x5c(&self) -> bool {
        self.has_jwk_claim(Self::X5C)
    }

    /// Whether the certificate chain URL is present ("x5u")
    pub fn has_x5u(&self) -> bool {
        self.has_jwk_claim(Self::X5U)
    }

    /// Whether the SHA-1 thumbprint is present ("x5t")
    pub fn has_x5t(&self) -> bool {
        self.has_jwk_claim(Self::X5T)
    }

    /// Whether the SHA-256 thumbprint is present ("x5t#S256")
    pub fn has_x5t_sha256(&self) -> bool {
        self.has_jwk_claim(Self::X5T_S256)
    }

    /// Whether any parameter is present
    pub fn has_jwk_claim(&self, name: &str) -> bool {
        self.claims.has_claim(name)
    }

    /// Any parameter, failing with [RustyJwtError::ClaimNotPresent]
    pub fn get_jwk_claim(&self, name: &str) -> RustyJwtResult<Claim<J>> {
        self.claims.get_claim(name)
    }

    /// Every parameter
    pub fn get_claims(&self) -> HashMap<String, Claim<J>> {
        self.claims.get_claims()
    }

    /// Whether the key has no parameter at all
    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }
}

/// A JWK Set, keys being looked up by their "kid"
#[derive(Debug, Clone, Default)]
pub struct Jwks<J: JsonTraits = SerdeJsonTraits> {
    keys: Vec<Jwk<J>>,
}

impl<J: JsonTraits> Jwks<J> {
    /// 'keys' member name
    pub const KEYS: &'static str = "keys";

    /// Parses a JSON object whose "keys" member is an array of JWKs
    pub fn parse(text: &str) -> RustyJwtResult<Self> {
        let set = ClaimMap::<J>::parse(text)?;
        let keys = set
            .get_claim(Self::KEYS)
            .and_then(|keys| keys.as_array())
            .map_err(|_| RustyJwtError::InvalidJson)?;
        let keys = keys.values().map(Jwk::from_value).collect::<RustyJwtResult<Vec<_>>>()?;
        tracing::debug!(keys = keys.len(), "parsed JWKS");
        Ok(Self { keys })
    }

    /// Whether a key has this "kid"
    pub fn has_jwk(&self, kid: &str) -> bool {
        self.find(kid).is_some()
    }

    /// First key with this "kid", failing with [RustyJwtError::ClaimNotPresent]
    pub fn get_jwk(&self, kid: &str) -> RustyJwtResult<&Jwk<J>> {
        self.find(kid)
            .ok_or_else(|| RustyJwtError::ClaimNotPresent(Jwk::<J>::KID.to_string()))
    }

    /// Iterates over the keys in order
    pub fn iter(&self) -> std::slice::Iter<'_, Jwk<J>> {
        self.keys.iter()
    }

    /// Number of keys
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether the set holds no key
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    // keys without a string "kid" are unreachable
    fn find(&self, kid: &str) -> Option<&Jwk<J>> {
        self.keys
            .iter()
            .find(|jwk| jwk.get_key_id().is_ok_and(|id| id == kid))
    }
}

impl<'a, J: JsonTraits> IntoIterator for &'a Jwks<J> {
    type Item = &'a Jwk<J>;
    type IntoIter = std::slice::Iter<'a, Jwk<J>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl RustyJwt {
    /// Parses a JWK with the default JSON backend
    pub fn parse_jwk(text: &str) -> RustyJwtResult<Jwk> {
        Jwk::parse(text)
    }

    /// Parses a JWKS with the default JSON backend
    pub fn parse_jwks(text: &str) -> RustyJwtResult<Jwks> {
        Jwks::parse(text)
    }
}
