use crate::{model::pem::Pem, prelude::*};

use super::{Algorithm, JwsAlgorithm};

/// Declares an ECDSA key for one curve. RustCrypto curves only differ by their type.
macro_rules! ecdsa_key {
    ($(#[$doc:meta])* $name:ident, $curve:ident, $alg:expr) => {
        $(#[$doc])*
        #[derive(Clone)]
        pub struct $name {
            signing: Option<$curve::ecdsa::SigningKey>,
            verifying: $curve::ecdsa::VerifyingKey,
        }

        impl $name {
            /// Key pair from a PKCS#8 PEM encoded private key
            pub fn from_private_pem(pem: &Pem) -> RustyJwtResult<Self> {
                use $curve::pkcs8::DecodePrivateKey as _;
                let signing = $curve::ecdsa::SigningKey::from_pkcs8_pem(pem)
                    .map_err(|_| RustyJwtError::InvalidKey("not a PKCS#8 PEM private key for this curve"))?;
                Ok(signing.into())
            }

            /// Verification only key from a SPKI PEM encoded public key
            pub fn from_public_pem(pem: &Pem) -> RustyJwtResult<Self> {
                use $curve::pkcs8::DecodePublicKey as _;
                let verifying = $curve::ecdsa::VerifyingKey::from_public_key_pem(pem)
                    .map_err(|_| RustyJwtError::InvalidKey("not a SPKI PEM public key for this curve"))?;
                Ok(verifying.into())
            }

            /// Public half of the key
            pub fn verifying_key(&self) -> &$curve::ecdsa::VerifyingKey {
                &self.verifying
            }
        }

        impl From<$curve::ecdsa::SigningKey> for $name {
            fn from(signing: $curve::ecdsa::SigningKey) -> Self {
                let verifying = $curve::ecdsa::VerifyingKey::from(&signing);
                Self {
                    signing: Some(signing),
                    verifying,
                }
            }
        }

        impl From<$curve::ecdsa::VerifyingKey> for $name {
            fn from(verifying: $curve::ecdsa::VerifyingKey) -> Self {
                Self {
                    signing: None,
                    verifying,
                }
            }
        }

        impl std::fmt::Debug for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.debug_struct(stringify!($name))
                    .field("can_sign", &self.signing.is_some())
                    .finish_non_exhaustive()
            }
        }

        impl Algorithm for $name {
            fn name(&self) -> &str {
                $alg.as_str()
            }

            fn sign(&self, data: &[u8]) -> RustyJwtResult<Vec<u8>> {
                use $curve::ecdsa::signature::Signer as _;
                let signing = self
                    .signing
                    .as_ref()
                    .ok_or(RustyJwtError::InvalidKey("a private key is required to sign"))?;
                let signature: $curve::ecdsa::Signature = signing
                    .try_sign(data)
                    .map_err(|e| RustyJwtError::SignatureGenerationError(e.to_string()))?;
                Ok(signature.to_bytes().to_vec())
            }

            fn verify(&self, data: &[u8], signature: &[u8]) -> RustyJwtResult<()> {
                use $curve::ecdsa::signature::Verifier as _;
                let signature =
                    $curve::ecdsa::Signature::from_slice(signature).map_err(|_| RustyJwtError::SignatureInvalid)?;
                self.verifying
                    .verify(data, &signature)
                    .map_err(|_| RustyJwtError::SignatureInvalid)
            }
        }
    };
}

ecdsa_key!(
    /// ECDSA using P-256 and SHA-256 (ES256)
    Es256Key,
    p256,
    JwsAlgorithm::ES256
);

ecdsa_key!(
    /// ECDSA using P-384 and SHA-384 (ES384)
    Es384Key,
    p384,
    JwsAlgorithm::ES384
);
