use crate::json::JsonType;

/// Wrapper over a [Result] with a [RustyJwtError] error
pub type RustyJwtResult<T> = Result<T, RustyJwtError>;

/// All errors which [crate::RustyJwt] might throw
#[derive(Debug, thiserror::Error)]
pub enum RustyJwtError {
    /// A header, payload, JWK or JWKS segment is not a valid JSON object
    #[error("invalid json")]
    InvalidJson,
    /// Accessor requested on a key absent from a claim map
    #[error("claim '{0}' not found")]
    ClaimNotPresent(String),
    /// Accessor type does not match the stored JSON value's type
    #[error("Expected a JSON {expected} but got a JSON {actual}")]
    TypeMismatch {
        /// Type the accessor expected
        expected: JsonType,
        /// Type actually stored
        actual: JsonType,
    },
    /// Integer claim cannot be represented as a date
    #[error("Timestamp {0} is out of the representable date range")]
    DateOutOfRange(i64),
    /// A compact token needs at least two '.' separators
    #[error("invalid token supplied")]
    InvalidTokenFormat,
    /// Base64 decoding error
    #[error(transparent)]
    Base64DecodeError(#[from] base64::DecodeError),
    /// Token 'alg' header is absent from the verifier's allow-list
    #[error("JWT token algorithm '{0}' is not allowed")]
    WrongAlgorithm(String),
    /// The signature does not match the signing input
    #[error("JWT token signature is invalid")]
    SignatureInvalid,
    /// The algorithm could not produce a signature
    #[error("Failed generating signature because {0}")]
    SignatureGenerationError(String),
    /// Supplied key material cannot be used by the algorithm
    #[error("Invalid key because {0}")]
    InvalidKey(&'static str),
    /// A claim required by a check is absent
    #[error("JWT token lacks '{0}' claim")]
    MissingClaim(String),
    /// A claim is present but has the wrong JSON type for the check
    #[error("JWT token '{0}' claim has an unexpected type")]
    ClaimTypeMismatch(String),
    /// A claim is present with the right type but the wrong value
    #[error("JWT token '{0}' claim mismatches with the expected one")]
    ClaimValueMismatch(String),
    /// A time based check (exp, iat, nbf) failed
    #[error("JWT token is expired according to its '{0}' claim")]
    TokenExpired(String),
    /// The audience does not contain every expected value
    #[error("JWT token audience mismatches with the expected one")]
    AudienceMismatch,
}
