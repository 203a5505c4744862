use hmac::{Hmac, Mac};
use sha2::{Sha256, Sha384, Sha512};
use zeroize::Zeroizing;

use super::{Algorithm, JwsAlgorithm};
use crate::prelude::*;

const NOT_HMAC: RustyJwtError = RustyJwtError::InvalidKey("not an HMAC algorithm");

/// Shared secret for the HMAC family (HS256, HS384, HS512)
#[derive(Clone)]
pub struct HmacKey {
    alg: JwsAlgorithm,
    secret: Zeroizing<Vec<u8>>,
}

impl HmacKey {
    /// HMAC using SHA-256
    pub fn hs256(secret: impl AsRef<[u8]>) -> Self {
        Self::new(JwsAlgorithm::HS256, secret)
    }

    /// HMAC using SHA-384
    pub fn hs384(secret: impl AsRef<[u8]>) -> Self {
        Self::new(JwsAlgorithm::HS384, secret)
    }

    /// HMAC using SHA-512
    pub fn hs512(secret: impl AsRef<[u8]>) -> Self {
        Self::new(JwsAlgorithm::HS512, secret)
    }

    fn new(alg: JwsAlgorithm, secret: impl AsRef<[u8]>) -> Self {
        Self {
            alg,
            secret: Zeroizing::new(secret.as_ref().to_vec()),
        }
    }

    fn mac<M: Mac + hmac::digest::KeyInit>(&self, data: &[u8]) -> RustyJwtResult<M> {
        let mut mac = <M as Mac>::new_from_slice(&self.secret).map_err(|_| RustyJwtError::InvalidKey("HMAC secret"))?;
        mac.update(data);
        Ok(mac)
    }

    fn sign_with<M: Mac + hmac::digest::KeyInit>(&self, data: &[u8]) -> RustyJwtResult<Vec<u8>> {
        Ok(self.mac::<M>(data)?.finalize().into_bytes().to_vec())
    }

    fn verify_with<M: Mac + hmac::digest::KeyInit>(&self, data: &[u8], signature: &[u8]) -> RustyJwtResult<()> {
        // constant time comparison
        self.mac::<M>(data)?
            .verify_slice(signature)
            .map_err(|_| RustyJwtError::SignatureInvalid)
    }
}

/// Never print the secret
impl std::fmt::Debug for HmacKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HmacKey").field("alg", &self.alg).finish_non_exhaustive()
    }
}

impl Algorithm for HmacKey {
    fn name(&self) -> &str {
        self.alg.as_str()
    }

    fn sign(&self, data: &[u8]) -> RustyJwtResult<Vec<u8>> {
        match self.alg {
            JwsAlgorithm::HS256 => self.sign_with::<Hmac<Sha256>>(data),
            JwsAlgorithm::HS384 => self.sign_with::<Hmac<Sha384>>(data),
            JwsAlgorithm::HS512 => self.sign_with::<Hmac<Sha512>>(data),
            JwsAlgorithm::None | JwsAlgorithm::ES256 | JwsAlgorithm::ES384 | JwsAlgorithm::EdDSA => Err(NOT_HMAC),
        }
    }

    fn verify(&self, data: &[u8], signature: &[u8]) -> RustyJwtResult<()> {
        match self.alg {
            JwsAlgorithm::HS256 => self.verify_with::<Hmac<Sha256>>(data, signature),
            JwsAlgorithm::HS384 => self.verify_with::<Hmac<Sha384>>(data, signature),
            JwsAlgorithm::HS512 => self.verify_with::<Hmac<Sha512>>(data, signature),
            JwsAlgorithm::None | JwsAlgorithm::ES256 | JwsAlgorithm::ES384 | JwsAlgorithm::EdDSA => Err(NOT_HMAC),
        }
    }
}
