//! Decode, build, sign and verify JSON Web Tokens in the compact serialization ([RFC 7519][1]).
//!
//! Every type is parametric over a JSON backend implementing [json::JsonTraits], defaulting to `serde_json`.
//! Cryptography is pluggable through [alg::Algorithm]; HMAC, ECDSA (P-256, P-384) and Ed25519 adapters are
//! provided.
//!
//! ```
//! use rusty_jwt_codec::{alg::HmacKey, prelude::*};
//!
//! let key = HmacKey::hs256(b"a-256-bit-secret-for-docs-only!!");
//! let token = RustyJwt::create().set_issuer("joe").set_type("JWT").sign(&key).unwrap();
//!
//! let jwt = RustyJwt::decode(token).unwrap();
//! RustyJwt::verify()
//!     .allow_algorithm(key)
//!     .with_issuer("joe")
//!     .verify(&jwt)
//!     .unwrap();
//! ```
//!
//! [1]: https://tools.ietf.org/html/rfc7519
#![deny(missing_docs)]
#![allow(clippy::single_component_path_imports)]

#[cfg(test)]
use rstest_reuse;

#[cfg(test)]
#[macro_use]
#[allow(missing_docs)]
pub mod test_utils;
// both imports above have to be defined at the beginning of the crate for rstest to work

pub mod alg;
mod claim;
mod claims;
pub mod clock;
pub mod codec;
mod error;
pub mod json;
pub mod jwk;
pub mod jwt;
pub mod model;
pub mod verify;

/// Prelude
pub mod prelude {
    pub use super::{
        RustyJwt,
        alg::{Algorithm, JwsAlgorithm},
        claim::{Claim, ClaimSet},
        claims::ClaimMap,
        clock::{Clock, DefaultClock, FixedClock},
        error::{RustyJwtError, RustyJwtResult},
        jwk::{Jwk, Jwks},
        jwt::{DecodedJwt, Header, JwtBuilder, Payload},
        model::pem::Pem,
        verify::{ClaimCheck, JwtVerifier, VerifierConfig, VerifyContext},
    };
}

/// Entry points with the default JSON backend
pub struct RustyJwt;
