use time::OffsetDateTime;

use crate::{
    alg::Algorithm,
    codec::{Base64Url, Codec},
    json::{JsonTraits, SerdeJsonTraits},
    prelude::*,
};

/// Accumulates header parameters and claims then signs them into a compact token.
///
/// Setters overwrite any previous value under the same name. Signing does not consume the builder so it can
/// produce several tokens.
#[derive(Debug, Clone, Default)]
pub struct JwtBuilder<J: JsonTraits = SerdeJsonTraits> {
    header: ClaimMap<J>,
    payload: ClaimMap<J>,
}

impl<J: JsonTraits> JwtBuilder<J> {
    /// Builder without any header parameter or claim
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets any header parameter
    pub fn set_header_claim(mut self, name: impl Into<String>, claim: impl Into<Claim<J>>) -> Self {
        self.header.insert(name, claim.into());
        self
    }

    /// Sets any claim
    pub fn set_payload_claim(mut self, name: impl Into<String>, claim: impl Into<Claim<J>>) -> Self {
        self.payload.insert(name, claim.into());
        self
    }

    /// Sets the algorithm ("alg"). When absent, the one signing the token is used.
    pub fn set_algorithm(self, alg: impl Into<String>) -> Self {
        let alg: String = alg.into();
        self.set_header_claim(Header::<J>::ALG, alg)
    }

    /// Sets the type ("typ")
    pub fn set_type(self, typ: impl Into<String>) -> Self {
        let typ: String = typ.into();
        self.set_header_claim(Header::<J>::TYP, typ)
    }

    /// Sets the content type ("cty")
    pub fn set_content_type(self, cty: impl Into<String>) -> Self {
        let cty: String = cty.into();
        self.set_header_claim(Header::<J>::CTY, cty)
    }

    /// Sets the key id ("kid")
    pub fn set_key_id(self, kid: impl Into<String>) -> Self {
        let kid: String = kid.into();
        self.set_header_claim(Header::<J>::KID, kid)
    }

    /// Sets the issuer ("iss")
    pub fn set_issuer(self, iss: impl Into<String>) -> Self {
        let iss: String = iss.into();
        self.set_payload_claim(Payload::<J>::ISS, iss)
    }

    /// Sets the subject ("sub")
    pub fn set_subject(self, sub: impl Into<String>) -> Self {
        let sub: String = sub.into();
        self.set_payload_claim(Payload::<J>::SUB, sub)
    }

    /// Sets a single audience ("aud") as a string
    pub fn set_audience(self, aud: impl Into<String>) -> Self {
        let aud: String = aud.into();
        self.set_payload_claim(Payload::<J>::AUD, aud)
    }

    /// Sets the audience ("aud") as an array
    pub fn set_audiences<S: Into<String>>(self, aud: impl IntoIterator<Item = S>) -> Self {
        self.set_payload_claim(Payload::<J>::AUD, aud.into_iter().collect::<Claim<J>>())
    }

    /// Sets the expiration ("exp")
    pub fn set_expires_at(self, exp: OffsetDateTime) -> Self {
        self.set_payload_claim(Payload::<J>::EXP, exp)
    }

    /// Sets the not before ("nbf")
    pub fn set_not_before(self, nbf: OffsetDateTime) -> Self {
        self.set_payload_claim(Payload::<J>::NBF, nbf)
    }

    /// Sets the issued at ("iat")
    pub fn set_issued_at(self, iat: OffsetDateTime) -> Self {
        self.set_payload_claim(Payload::<J>::IAT, iat)
    }

    /// Sets the token id ("jti")
    pub fn set_id(self, jti: impl Into<String>) -> Self {
        let jti: String = jti.into();
        self.set_payload_claim(Payload::<J>::JTI, jti)
    }

    /// Sets a random UUID v4 as token id ("jti")
    pub fn set_random_id(self) -> Self {
        self.set_id(crate::jwt::new_jti())
    }

    /// Header parameters set so far
    pub fn header(&self) -> &ClaimMap<J> {
        &self.header
    }

    /// Claims set so far
    pub fn payload(&self) -> &ClaimMap<J> {
        &self.payload
    }

    /// Signs with `algorithm` and serializes with base64url
    pub fn sign<A: Algorithm + ?Sized>(&self, algorithm: &A) -> RustyJwtResult<String> {
        self.sign_with_encoder(algorithm, |bytes| Base64Url.encode_segment(bytes))
    }

    /// Signs with `algorithm`, `encode` turning each segment into unpadded text
    pub fn sign_with_encoder<A: Algorithm + ?Sized>(
        &self,
        algorithm: &A,
        encode: impl Fn(&[u8]) -> String,
    ) -> RustyJwtResult<String> {
        let mut header = self.header.clone();
        if !header.has_claim(Header::<J>::ALG) {
            header.insert(Header::<J>::ALG, algorithm.name().into());
        }

        let header = encode(header.serialize().as_bytes());
        let payload = encode(self.payload.serialize().as_bytes());
        let signing_input = format!("{header}.{payload}");

        let signature = algorithm.sign(signing_input.as_bytes()).inspect_err(|e| {
            tracing::debug!(alg = algorithm.name(), error = %e, "failed signing token");
        })?;
        tracing::debug!(alg = algorithm.name(), "signed token");
        Ok(format!("{signing_input}.{}", encode(&signature)))
    }
}

impl RustyJwt {
    /// Starts building a token with the default JSON backend
    pub fn create() -> JwtBuilder {
        JwtBuilder::new()
    }
}
