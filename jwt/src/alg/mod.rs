//! Signature algorithms a token can be signed or verified with

use std::{fmt::Formatter, sync::Arc};

use crate::prelude::*;

pub use self::{
    ecdsa::{Es256Key, Es384Key},
    eddsa::Ed25519Key,
    hmac::HmacKey,
    none::NoneAlgorithm,
};

mod ecdsa;
mod eddsa;
mod hmac;
mod none;

/// A JWS algorithm bound to its key material.
///
/// Its [Algorithm::name] is the value of the "alg" header parameter it handles.
pub trait Algorithm: Send + Sync {
    /// Value of the "alg" header parameter
    fn name(&self) -> &str;

    /// Signs the signing input
    fn sign(&self, data: &[u8]) -> RustyJwtResult<Vec<u8>>;

    /// Verifies `signature` against the signing input
    fn verify(&self, data: &[u8], signature: &[u8]) -> RustyJwtResult<()>;
}

impl<A: Algorithm + ?Sized> Algorithm for Box<A> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn sign(&self, data: &[u8]) -> RustyJwtResult<Vec<u8>> {
        (**self).sign(data)
    }

    fn verify(&self, data: &[u8], signature: &[u8]) -> RustyJwtResult<()> {
        (**self).verify(data, signature)
    }
}

impl<A: Algorithm + ?Sized> Algorithm for Arc<A> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn sign(&self, data: &[u8]) -> RustyJwtResult<Vec<u8>> {
        (**self).sign(data)
    }

    fn verify(&self, data: &[u8], signature: &[u8]) -> RustyJwtResult<()> {
        (**self).verify(data, signature)
    }
}

/// The signature algorithms shipped with this crate
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum JwsAlgorithm {
    /// Unsecured JWS, no signature at all
    ///
    /// Specified in [RFC 7518 Section 3.6: Using the Algorithm "none"][1]
    ///
    /// [1]: https://tools.ietf.org/html/rfc7518#section-3.6
    None,
    /// HMAC using SHA-256
    ///
    /// Specified in [RFC 7518 Section 3.2: HMAC with SHA-2 Functions][1]
    ///
    /// [1]: https://tools.ietf.org/html/rfc7518#section-3.2
    HS256,
    /// HMAC using SHA-384
    HS384,
    /// HMAC using SHA-512
    HS512,
    /// ECDSA using P-256 and SHA-256
    ///
    /// Specified in [RFC 7518 Section 3.4: Digital Signature with ECDSA][1]
    ///
    /// [1]: https://tools.ietf.org/html/rfc7518#section-3.4
    ES256,
    /// ECDSA using P-384 and SHA-384
    ///
    /// Specified in [RFC 7518 Section 3.4: Digital Signature with ECDSA][1]
    ///
    /// [1]: https://tools.ietf.org/html/rfc7518#section-3.4
    ES384,
    /// EdDSA using Ed25519
    ///
    /// Specified in [RFC 8032: Edwards-Curve Digital Signature Algorithm (EdDSA)][1] and
    /// [RFC 8037: CFRG Elliptic Curve Diffie-Hellman (ECDH) and Signatures in JSON Object Signing and Encryption (JOSE)][2]
    ///
    /// [1]: https://tools.ietf.org/html/rfc8032
    /// [2]: https://tools.ietf.org/html/rfc8037
    EdDSA,
}

impl JwsAlgorithm {
    /// Value of the "alg" header parameter
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::HS256 => "HS256",
            Self::HS384 => "HS384",
            Self::HS512 => "HS512",
            Self::ES256 => "ES256",
            Self::ES384 => "ES384",
            Self::EdDSA => "EdDSA",
        }
    }
}

impl std::fmt::Display for JwsAlgorithm {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for JwsAlgorithm {
    type Error = RustyJwtError;

    fn try_from(alg: &str) -> Result<Self, Self::Error> {
        Ok(match alg {
            "none" => Self::None,
            "HS256" => Self::HS256,
            "HS384" => Self::HS384,
            "HS512" => Self::HS512,
            "ES256" => Self::ES256,
            "ES384" => Self::ES384,
            "EdDSA" => Self::EdDSA,
            _ => return Err(RustyJwtError::WrongAlgorithm(alg.to_string())),
        })
    }
}

#[cfg(test)]
impl JwsAlgorithm {
    /// Utility for listing all the JWA signature schemes not shipped by this crate
    pub const UNSUPPORTED: [&'static str; 7] = ["RS256", "RS384", "RS512", "PS256", "PS384", "PS512", "ES512"];
}
