//! PEM encoded key material

use std::fmt::{Debug, Formatter};

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::prelude::*;

/// UTF-8 String in the PEM (Privacy-Enhanced Mail) format
///
/// Specified in [RFC 7468: Textual Encodings of PKIX, PKCS, and CMS Structures][1]
///
/// [1]: https://tools.ietf.org/html/rfc7468
#[derive(Clone, Eq, PartialEq, derive_more::From, derive_more::Deref, Zeroize, ZeroizeOnDrop)]
pub struct Pem(String);

impl From<&str> for Pem {
    fn from(s: &str) -> Self {
        s.to_string().into()
    }
}

impl<'a> TryFrom<&'a [u8]> for Pem {
    type Error = RustyJwtError;

    fn try_from(value: &'a [u8]) -> RustyJwtResult<Self> {
        let pem = core::str::from_utf8(value).map_err(|_| RustyJwtError::InvalidKey("PEM is not UTF-8"))?;
        Ok(pem.into())
    }
}

/// Might hold a private key, never print it
impl Debug for Pem {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("Pem(..)")
    }
}
