use serde::{Deserialize, Deserializer};

/// Declarative counterpart of the [super::JwtVerifier] setters, typically deserialized from the host's configuration
///
/// ```json
/// { "leeway": 30, "issuer": "https://issuer.example.com", "audience": ["api"], "typ": "at+jwt" }
/// ```
#[derive(Debug, Clone, Default, Eq, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VerifierConfig {
    /// Leeway in seconds of the optional "exp", "iat" and "nbf" checks
    pub leeway: u64,
    /// Makes "exp" required, with this leeway in seconds
    pub expires_at_leeway: Option<u64>,
    /// Makes "nbf" required, with this leeway in seconds
    pub not_before_leeway: Option<u64>,
    /// Makes "iat" required, with this leeway in seconds
    pub issued_at_leeway: Option<u64>,
    /// Expected "iss"
    pub issuer: Option<String>,
    /// Expected "sub"
    pub subject: Option<String>,
    /// Values which all have to be in "aud", either a single string or an array
    #[serde(deserialize_with = "one_or_many")]
    pub audience: Option<Vec<String>>,
    /// Expected "jti"
    pub id: Option<String>,
    /// Expected "typ" header, case insensitive
    pub typ: Option<String>,
}

fn one_or_many<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Vec<String>>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(Option::<OneOrMany>::deserialize(deserializer)?.map(|aud| match aud {
        OneOrMany::One(aud) => vec![aud],
        OneOrMany::Many(aud) => aud,
    }))
}
