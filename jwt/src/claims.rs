use std::collections::HashMap;

use crate::json::{JsonObject, JsonTraits, SerdeJsonTraits};
use crate::prelude::*;

/// A JSON object seen as a map of claims. Substrate of the header, the payload and JWKs.
#[derive(Debug, Clone, Default)]
pub struct ClaimMap<J: JsonTraits = SerdeJsonTraits> {
    claims: J::Object,
}

impl<J: JsonTraits> ClaimMap<J> {
    /// Wraps a JSON object
    pub fn new(claims: J::Object) -> Self {
        Self { claims }
    }

    /// Parses JSON text which has to be an object
    pub fn parse(text: &str) -> RustyJwtResult<Self> {
        Self::parse_claims(text).map(Self::new)
    }

    /// Parses JSON text into an object, failing with [RustyJwtError::InvalidJson] if it is not one
    pub fn parse_claims(text: &str) -> RustyJwtResult<J::Object> {
        let value = J::parse(text)?;
        J::as_object(&value).map_err(|_| RustyJwtError::InvalidJson)
    }

    /// Whether a claim is present
    pub fn has_claim(&self, name: &str) -> bool {
        self.claims.contains_key(name)
    }

    /// Claim by name
    pub fn get_claim(&self, name: &str) -> RustyJwtResult<Claim<J>> {
        self.claims
            .get(name)
            .cloned()
            .map(Claim::new)
            .ok_or_else(|| RustyJwtError::ClaimNotPresent(name.to_string()))
    }

    /// Every claim keyed by name
    pub fn get_claims(&self) -> HashMap<String, Claim<J>> {
        self.iter().map(|(k, v)| (k.to_string(), v)).collect()
    }

    /// Iterates over every claim
    pub fn iter(&self) -> impl Iterator<Item = (&str, Claim<J>)> {
        self.claims.iter().map(|(k, v)| (k, Claim::new(v.clone())))
    }

    /// Number of claims
    pub fn len(&self) -> usize {
        self.claims.len()
    }

    /// Whether there is no claim at all
    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }

    /// Underlying JSON object
    pub fn as_object(&self) -> &J::Object {
        &self.claims
    }

    /// Compact JSON text of the object
    pub fn serialize(&self) -> String {
        J::serialize(&J::from_object(self.claims.clone()))
    }

    pub(crate) fn insert(&mut self, name: impl Into<String>, claim: Claim<J>) {
        self.claims.insert(name.into(), claim.into_json());
    }
}

impl<J: JsonTraits> From<ClaimMap<J>> for Claim<J> {
    fn from(map: ClaimMap<J>) -> Self {
        Claim::new(J::from_object(map.claims))
    }
}
