//! Compact JWT serialization: reading a token, its header and payload views, and building new tokens

pub use builder::JwtBuilder;
pub use decoded::DecodedJwt;
pub use header::Header;
pub use payload::Payload;

/// Writing tokens
pub mod builder;
/// Reading tokens
pub mod decoded;
/// JOSE header view
pub mod header;
/// Claims set view
pub mod payload;

/// Generates a new jti
pub fn new_jti() -> String {
    uuid::Uuid::new_v4().to_string()
}
