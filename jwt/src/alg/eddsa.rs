use ed25519_dalek::{
    Signature, Signer as _, SigningKey, VerifyingKey,
    pkcs8::{DecodePrivateKey as _, DecodePublicKey as _},
};
use zeroize::Zeroizing;

use super::{Algorithm, JwsAlgorithm};
use crate::{model::pem::Pem, prelude::*};

/// EdDSA using Ed25519
#[derive(Clone)]
pub struct Ed25519Key {
    signing: Option<SigningKey>,
    verifying: VerifyingKey,
}

impl Ed25519Key {
    /// Key pair from the 32 bytes secret seed
    pub fn from_secret_bytes(secret: &[u8]) -> RustyJwtResult<Self> {
        let secret: Zeroizing<[u8; ed25519_dalek::SECRET_KEY_LENGTH]> = Zeroizing::new(
            secret
                .try_into()
                .map_err(|_| RustyJwtError::InvalidKey("Ed25519 secret must be 32 bytes"))?,
        );
        Ok(SigningKey::from_bytes(&secret).into())
    }

    /// Verification only key from the 32 bytes public key
    pub fn from_public_bytes(public: &[u8]) -> RustyJwtResult<Self> {
        let public: &[u8; ed25519_dalek::PUBLIC_KEY_LENGTH] = public
            .try_into()
            .map_err(|_| RustyJwtError::InvalidKey("Ed25519 public key must be 32 bytes"))?;
        let verifying =
            VerifyingKey::from_bytes(public).map_err(|_| RustyJwtError::InvalidKey("not an Ed25519 point"))?;
        Ok(verifying.into())
    }

    /// Key pair from a PKCS#8 PEM encoded private key
    pub fn from_private_pem(pem: &Pem) -> RustyJwtResult<Self> {
        let signing = SigningKey::from_pkcs8_pem(pem)
            .map_err(|_| RustyJwtError::InvalidKey("not a PKCS#8 PEM Ed25519 private key"))?;
        Ok(signing.into())
    }

    /// Verification only key from a SPKI PEM encoded public key
    pub fn from_public_pem(pem: &Pem) -> RustyJwtResult<Self> {
        let verifying = VerifyingKey::from_public_key_pem(pem)
            .map_err(|_| RustyJwtError::InvalidKey("not a SPKI PEM Ed25519 public key"))?;
        Ok(verifying.into())
    }

    /// Public half of the key
    pub fn verifying_key(&self) -> &VerifyingKey {
        &self.verifying
    }
}

impl From<SigningKey> for Ed25519Key {
    fn from(signing: SigningKey) -> Self {
        let verifying = signing.verifying_key();
        Self {
            signing: Some(signing),
            verifying,
        }
    }
}

impl From<VerifyingKey> for Ed25519Key {
    fn from(verifying: VerifyingKey) -> Self {
        Self {
            signing: None,
            verifying,
        }
    }
}

impl std::fmt::Debug for Ed25519Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ed25519Key")
            .field("can_sign", &self.signing.is_some())
            .finish_non_exhaustive()
    }
}

impl Algorithm for Ed25519Key {
    fn name(&self) -> &str {
        JwsAlgorithm::EdDSA.as_str()
    }

    fn sign(&self, data: &[u8]) -> RustyJwtResult<Vec<u8>> {
        let signing = self
            .signing
            .as_ref()
            .ok_or(RustyJwtError::InvalidKey("a private key is required to sign"))?;
        let signature = signing
            .try_sign(data)
            .map_err(|e| RustyJwtError::SignatureGenerationError(e.to_string()))?;
        Ok(signature.to_bytes().to_vec())
    }

    fn verify(&self, data: &[u8], signature: &[u8]) -> RustyJwtResult<()> {
        let signature = Signature::from_slice(signature).map_err(|_| RustyJwtError::SignatureInvalid)?;
        self.verifying
            .verify_strict(data, &signature)
            .map_err(|_| RustyJwtError::SignatureInvalid)
    }
}
