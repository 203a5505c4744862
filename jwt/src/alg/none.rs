use super::{Algorithm, JwsAlgorithm};
use crate::prelude::*;

/// Unsecured JWS: the signature is empty.
///
/// Must only be allow-listed when the transport already guarantees integrity.
#[derive(Debug, Copy, Clone, Default)]
pub struct NoneAlgorithm;

impl Algorithm for NoneAlgorithm {
    fn name(&self) -> &str {
        JwsAlgorithm::None.as_str()
    }

    fn sign(&self, _data: &[u8]) -> RustyJwtResult<Vec<u8>> {
        Ok(vec![])
    }

    fn verify(&self, _data: &[u8], signature: &[u8]) -> RustyJwtResult<()> {
        if signature.is_empty() {
            Ok(())
        } else {
            Err(RustyJwtError::SignatureInvalid)
        }
    }
}
