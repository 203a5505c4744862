use std::collections::HashMap;

use crate::{
    codec::{Base64Url, Codec},
    json::{JsonTraits, SerdeJsonTraits},
    prelude::*,
};

const SEPARATOR: char = '.';

/// A token in its compact serialization, split and decoded but not verified.
///
/// Specified in [RFC 7515 Section 7.1: JWS Compact Serialization][1]
///
/// [1]: https://tools.ietf.org/html/rfc7515#section-7.1
#[derive(Debug, Clone)]
pub struct DecodedJwt<J: JsonTraits = SerdeJsonTraits> {
    token: String,
    header_base64: String,
    payload_base64: String,
    signature_base64: String,
    header: String,
    payload: String,
    signature: Vec<u8>,
    header_claims: Header<J>,
    payload_claims: Payload<J>,
}

impl<J: JsonTraits> DecodedJwt<J> {
    /// Decodes a token with the base64url [Codec]
    pub fn new(token: impl Into<String>) -> RustyJwtResult<Self> {
        Self::new_with_codec(token, &Base64Url)
    }

    /// Decodes a token, segments being decoded with `codec`
    pub fn new_with_codec(token: impl Into<String>, codec: &impl Codec) -> RustyJwtResult<Self> {
        Self::new_with_decoder(token, |segment| codec.decode_segment(segment))
    }

    /// Decodes a token, `decode` turning an unpadded segment into bytes
    pub fn new_with_decoder(
        token: impl Into<String>,
        decode: impl Fn(&str) -> RustyJwtResult<Vec<u8>>,
    ) -> RustyJwtResult<Self> {
        let token = token.into();
        let (header_base64, rest) = token
            .split_once(SEPARATOR)
            .ok_or(RustyJwtError::InvalidTokenFormat)?;
        let (payload_base64, signature_base64) = rest
            .split_once(SEPARATOR)
            .ok_or(RustyJwtError::InvalidTokenFormat)?;

        let header = Self::decode_json(header_base64, &decode)?;
        let payload = Self::decode_json(payload_base64, &decode)?;
        let signature = decode(signature_base64)?;

        let header_claims = Header::from(ClaimMap::<J>::parse(&header)?);
        let payload_claims = Payload::from(ClaimMap::<J>::parse(&payload)?);
        tracing::debug!(
            alg = ?header_claims.get_algorithm().ok(),
            claims = payload_claims.claims().len(),
            "decoded token"
        );

        Ok(Self {
            header_base64: header_base64.to_string(),
            payload_base64: payload_base64.to_string(),
            signature_base64: signature_base64.to_string(),
            header,
            payload,
            signature,
            header_claims,
            payload_claims,
            token,
        })
    }

    fn decode_json(segment: &str, decode: &impl Fn(&str) -> RustyJwtResult<Vec<u8>>) -> RustyJwtResult<String> {
        String::from_utf8(decode(segment)?).map_err(|_| RustyJwtError::InvalidJson)
    }

    /// The original token
    pub fn get_token(&self) -> &str {
        &self.token
    }

    /// Decoded header, as JSON text
    pub fn get_header(&self) -> &str {
        &self.header
    }

    /// Decoded payload, as JSON text
    pub fn get_payload(&self) -> &str {
        &self.payload
    }

    /// Decoded signature
    pub fn get_signature(&self) -> &[u8] {
        &self.signature
    }

    /// Header segment as found in the token
    pub fn get_header_base64(&self) -> &str {
        &self.header_base64
    }

    /// Payload segment as found in the token
    pub fn get_payload_base64(&self) -> &str {
        &self.payload_base64
    }

    /// Signature segment as found in the token
    pub fn get_signature_base64(&self) -> &str {
        &self.signature_base64
    }

    /// What the signature is computed over: `header.payload`
    pub fn signing_input(&self) -> &str {
        let len = self.header_base64.len() + 1 + self.payload_base64.len();
        &self.token[..len]
    }

    /// Header view
    pub fn header(&self) -> &Header<J> {
        &self.header_claims
    }

    /// Payload view
    pub fn payload(&self) -> &Payload<J> {
        &self.payload_claims
    }

    /// Every header parameter
    pub fn get_header_claims(&self) -> HashMap<String, Claim<J>> {
        self.header_claims.get_header_claims()
    }

    /// Every payload claim
    pub fn get_payload_claims(&self) -> HashMap<String, Claim<J>> {
        self.payload_claims.get_payload_claims()
    }
}

impl RustyJwt {
    /// Decodes a compact token with the default JSON backend. The signature is not verified.
    pub fn decode(token: impl Into<String>) -> RustyJwtResult<DecodedJwt> {
        DecodedJwt::new(token)
    }
}
