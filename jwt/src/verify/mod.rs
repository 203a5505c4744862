//! Signature and claims verification of a decoded token

use std::{
    collections::{BTreeMap, HashMap},
    fmt::Formatter,
    sync::Arc,
};

pub use check::{ClaimCheck, CustomCheck};
pub use config::VerifierConfig;
pub use context::VerifyContext;

use crate::{
    alg::Algorithm,
    clock::{Clock, DefaultClock},
    json::{JsonTraits, SerdeJsonTraits},
    prelude::*,
};

mod check;
mod config;
mod context;

/// Verifies the signature then the claims of a token.
///
/// The token never gets to pick how it is verified: its "alg" header has to name an algorithm registered with
/// [Self::allow_algorithm]. Checks run in the lexicographic order of the claim they are registered under and the
/// first failure is returned. "exp", "iat" and "nbf" are checked by default when present.
pub struct JwtVerifier<C: Clock = DefaultClock, J: JsonTraits = SerdeJsonTraits> {
    checks: BTreeMap<String, ClaimCheck<J>>,
    default_leeway: u64,
    clock: C,
    algorithms: HashMap<String, Arc<dyn Algorithm>>,
}

impl<J: JsonTraits> Default for JwtVerifier<DefaultClock, J> {
    fn default() -> Self {
        Self::new(DefaultClock)
    }
}

impl<C: Clock, J: JsonTraits> JwtVerifier<C, J> {
    /// Verifier with no allowed algorithm and only the default checks
    pub fn new(clock: C) -> Self {
        let checks = BTreeMap::from([
            (Payload::<J>::EXP.to_string(), ClaimCheck::DefaultExpiry),
            (Payload::<J>::IAT.to_string(), ClaimCheck::DefaultIssuedAt),
            (Payload::<J>::NBF.to_string(), ClaimCheck::DefaultNotBefore),
        ]);
        Self {
            checks,
            default_leeway: 0,
            clock,
            algorithms: HashMap::new(),
        }
    }

    /// Applies a [VerifierConfig] to a new verifier. Algorithms still have to be allowed.
    pub fn from_config(clock: C, config: &VerifierConfig) -> Self {
        let mut verifier = Self::new(clock).leeway(config.leeway);
        if let Some(leeway) = config.expires_at_leeway {
            verifier = verifier.expires_at_leeway(leeway);
        }
        if let Some(leeway) = config.not_before_leeway {
            verifier = verifier.not_before_leeway(leeway);
        }
        if let Some(leeway) = config.issued_at_leeway {
            verifier = verifier.issued_at_leeway(leeway);
        }
        if let Some(iss) = &config.issuer {
            verifier = verifier.with_issuer(iss);
        }
        if let Some(sub) = &config.subject {
            verifier = verifier.with_subject(sub);
        }
        if let Some(aud) = &config.audience {
            verifier = verifier.with_audience(aud);
        }
        if let Some(jti) = &config.id {
            verifier = verifier.with_id(jti);
        }
        if let Some(typ) = &config.typ {
            verifier = verifier.with_type(typ);
        }
        verifier
    }

    /// Leeway in seconds of the default "exp", "iat" and "nbf" checks
    pub fn leeway(mut self, seconds: u64) -> Self {
        self.default_leeway = seconds;
        self
    }

    /// Requires "exp" and checks it with its own leeway
    pub fn expires_at_leeway(self, seconds: u64) -> Self {
        self.with_claim(Payload::<J>::EXP, ClaimCheck::date_before(seconds))
    }

    /// Requires "nbf" and checks it with its own leeway
    pub fn not_before_leeway(self, seconds: u64) -> Self {
        self.with_claim(Payload::<J>::NBF, ClaimCheck::date_after(seconds))
    }

    /// Requires "iat" and checks it with its own leeway
    pub fn issued_at_leeway(self, seconds: u64) -> Self {
        self.with_claim(Payload::<J>::IAT, ClaimCheck::date_after(seconds))
    }

    /// Expected "typ" header, compared regardless of the case
    pub fn with_type(self, typ: impl Into<String>) -> Self {
        self.with_claim(Header::<J>::TYP, ClaimCheck::insensitive_string(typ).in_header())
    }

    /// Expected issuer ("iss")
    pub fn with_issuer(self, iss: impl Into<String>) -> Self {
        let iss: String = iss.into();
        self.with_claim(Payload::<J>::ISS, ClaimCheck::equals(iss))
    }

    /// Expected subject ("sub")
    pub fn with_subject(self, sub: impl Into<String>) -> Self {
        let sub: String = sub.into();
        self.with_claim(Payload::<J>::SUB, ClaimCheck::equals(sub))
    }

    /// Values which all have to be in the audience ("aud")
    pub fn with_audience<S: Into<String>>(self, aud: impl IntoIterator<Item = S>) -> Self {
        self.with_claim(Payload::<J>::AUD, ClaimCheck::is_subset(aud))
    }

    /// Expected token id ("jti")
    pub fn with_id(self, jti: impl Into<String>) -> Self {
        let jti: String = jti.into();
        self.with_claim(Payload::<J>::JTI, ClaimCheck::equals(jti))
    }

    /// Registers a check under `name`, replacing any previous one. A [Claim] is checked for equality.
    pub fn with_claim(mut self, name: impl Into<String>, check: impl Into<ClaimCheck<J>>) -> Self {
        self.checks.insert(name.into(), check.into());
        self
    }

    /// Allows tokens signed with `algorithm`, under its [Algorithm::name]
    pub fn allow_algorithm(mut self, algorithm: impl Algorithm + 'static) -> Self {
        let algorithm: Arc<dyn Algorithm> = Arc::new(algorithm);
        self.algorithms.insert(algorithm.name().to_string(), algorithm);
        self
    }

    /// Runs the algorithm gate, the signature verification then every check, stopping at the first failure
    pub fn verify(&self, jwt: &DecodedJwt<J>) -> RustyJwtResult<()> {
        let alg = jwt.header().get_algorithm().ok();
        let Some(algorithm) = alg.as_deref().and_then(|alg| self.algorithms.get(alg)) else {
            let alg = alg.unwrap_or_default();
            tracing::warn!(alg = %alg, "token algorithm is not allowed");
            return Err(RustyJwtError::WrongAlgorithm(alg));
        };

        algorithm
            .verify(jwt.signing_input().as_bytes(), jwt.get_signature())
            .inspect_err(|e| tracing::debug!(alg = algorithm.name(), error = %e, "invalid token signature"))?;

        let current_time = self.clock.now();
        for (claim_key, check) in &self.checks {
            tracing::trace!(claim = %claim_key, ?check, "checking claim");
            let ctx = VerifyContext {
                current_time,
                jwt,
                default_leeway: self.default_leeway,
                claim_key,
            };
            check
                .check(&ctx)
                .inspect_err(|e| tracing::debug!(claim = %claim_key, error = %e, "token rejected"))?;
        }
        tracing::debug!(alg = algorithm.name(), "verified token");
        Ok(())
    }
}

impl<C: Clock + Clone, J: JsonTraits> Clone for JwtVerifier<C, J> {
    fn clone(&self) -> Self {
        Self {
            checks: self.checks.clone(),
            default_leeway: self.default_leeway,
            clock: self.clock.clone(),
            algorithms: self.algorithms.clone(),
        }
    }
}

impl<C: Clock, J: JsonTraits> std::fmt::Debug for JwtVerifier<C, J> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut algorithms = self.algorithms.keys().collect::<Vec<_>>();
        algorithms.sort();
        f.debug_struct("JwtVerifier")
            .field("checks", &self.checks)
            .field("default_leeway", &self.default_leeway)
            .field("algorithms", &algorithms)
            .finish_non_exhaustive()
    }
}

impl RustyJwt {
    /// Starts configuring a verifier running on the wall clock with the default JSON backend
    pub fn verify() -> JwtVerifier {
        JwtVerifier::default()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use time::Duration;

    use super::*;
    use crate::{
        alg::{HmacKey, JwsAlgorithm, NoneAlgorithm},
        clock::FixedClock,
        codec::{Base64Url, Codec},
        test_utils::*,
    };

    fn verifier() -> JwtVerifier<FixedClock> {
        JwtVerifier::new(now().into())
    }

    fn decode(token: &str) -> DecodedJwt {
        DecodedJwt::new(token).unwrap()
    }

    #[test]
    fn should_verify_rfc7515_example() {
        let key = HmacKey::hs256(Base64Url.decode_segment(RFC7515_KEY).unwrap());
        let jwt = decode(RFC7515_TOKEN);
        // exp is 2011-03-22
        let at_expiry = JwtVerifier::<FixedClock>::new(jwt.payload().get_expires_at().unwrap().into())
            .allow_algorithm(key.clone())
            .with_issuer("joe")
            .with_claim("http://example.com/is_root", Claim::<SerdeJsonTraits>::from(true));
        assert!(at_expiry.verify(&jwt).is_ok());

        let late = verifier().allow_algorithm(key).with_issuer("joe");
        assert!(matches!(late.verify(&jwt).unwrap_err(), RustyJwtError::TokenExpired(k) if k == "exp"));
    }

    #[apply(all_keys)]
    fn should_verify_valid_token(#[case] key: JwtKey) {
        let token = sample_builder().sign(key.signer.as_ref()).unwrap();
        let verifier = verifier()
            .allow_algorithm(key.verifier.clone())
            .with_type("jwt")
            .with_issuer("https://issuer.example.com")
            .with_subject("user-1")
            .with_audience(["https://api.example.com"])
            .with_id("token-1");
        assert!(verifier.verify(&decode(&token)).is_ok());
    }

    #[apply(signing_keys)]
    fn should_fail_when_signature_tampered(#[case] key: JwtKey) {
        let token = sample_builder().sign(key.signer.as_ref()).unwrap();
        let verifier = verifier().allow_algorithm(key.verifier.clone());
        let result = verifier.verify(&decode(&tamper_signature(&token)));
        assert!(matches!(result.unwrap_err(), RustyJwtError::SignatureInvalid));
    }

    #[apply(all_keys)]
    fn should_fail_when_algorithm_not_allowed(#[case] key: JwtKey) {
        let token = sample_builder().sign(key.signer.as_ref()).unwrap();
        let jwt = decode(&token);
        for other in key.reverse_algorithms() {
            let verifier = verifier().allow_algorithm(JwtKey::new(other).verifier);
            assert!(matches!(
                verifier.verify(&jwt).unwrap_err(),
                RustyJwtError::WrongAlgorithm(alg) if alg == key.alg.as_str()
            ));
        }
        // nothing allowed at all
        assert!(matches!(verifier().verify(&jwt).unwrap_err(), RustyJwtError::WrongAlgorithm(_)));
    }

    #[test]
    fn none_should_not_pass_for_another_algorithm() {
        // a token relabelled "none" is not verified with the HMAC key
        let token = sample_builder().set_algorithm("none").sign(&NoneAlgorithm).unwrap();
        let verifier = verifier().allow_algorithm(HmacKey::hs256(HMAC_SECRET));
        assert!(matches!(
            verifier.verify(&decode(&token)).unwrap_err(),
            RustyJwtError::WrongAlgorithm(alg) if alg == "none"
        ));

        // "alg" claiming HS256 while signed with nothing
        let token = sample_builder().set_algorithm("HS256").sign(&NoneAlgorithm).unwrap();
        assert!(matches!(
            verifier.verify(&decode(&token)).unwrap_err(),
            RustyJwtError::SignatureInvalid
        ));
    }

    #[test]
    fn should_fail_when_algorithm_absent_or_not_a_string() {
        let verifier = verifier().allow_algorithm(NoneAlgorithm);
        // {}.{}.
        assert!(matches!(
            verifier.verify(&decode("e30.e30.")).unwrap_err(),
            RustyJwtError::WrongAlgorithm(alg) if alg.is_empty()
        ));
        let token = JwtBuilder::<SerdeJsonTraits>::new()
            .set_header_claim("alg", Claim::new(json!(["none"])))
            .sign(&NoneAlgorithm)
            .unwrap();
        assert!(matches!(
            verifier.verify(&decode(&token)).unwrap_err(),
            RustyJwtError::WrongAlgorithm(_)
        ));
    }

    #[test]
    fn should_check_signature_before_claims() {
        let key = HmacKey::hs256(HMAC_SECRET);
        let token = sample_builder().sign(&key).unwrap();
        let verifier = verifier().allow_algorithm(key).with_issuer("someone else");
        assert!(matches!(
            verifier.verify(&decode(&tamper_signature(&token))).unwrap_err(),
            RustyJwtError::SignatureInvalid
        ));
        assert!(matches!(
            verifier.verify(&decode(&token)).unwrap_err(),
            RustyJwtError::ClaimValueMismatch(k) if k == "iss"
        ));
    }

    #[test]
    fn checks_should_run_in_lexicographic_order() {
        let key = HmacKey::hs256(HMAC_SECRET);
        let token = sample_builder().sign(&key).unwrap();
        // both "aud" and "sub" fail, "aud" comes first
        let verifier = verifier()
            .allow_algorithm(key)
            .with_subject("nobody")
            .with_audience(["nowhere"]);
        assert!(matches!(
            verifier.verify(&decode(&token)).unwrap_err(),
            RustyJwtError::AudienceMismatch
        ));
    }

    #[rstest]
    #[case::at_boundary(0, true)]
    #[case::past_boundary(1, false)]
    fn expiry_boundary_should_be_inclusive(#[case] past: i64, #[case] valid: bool) {
        let leeway = 30;
        let exp = now() - Duration::seconds(leeway + past);
        let key = HmacKey::hs256(HMAC_SECRET);
        let token = JwtBuilder::<SerdeJsonTraits>::new().set_expires_at(exp).sign(&key).unwrap();
        let verifier = verifier().allow_algorithm(key).leeway(leeway as u64);
        let result = verifier.verify(&decode(&token));
        if valid {
            assert!(result.is_ok());
        } else {
            assert!(matches!(result.unwrap_err(), RustyJwtError::TokenExpired(k) if k == "exp"));
        }
    }

    #[rstest]
    #[case::nbf_at_boundary("nbf", 0, true)]
    #[case::nbf_past_boundary("nbf", 1, false)]
    #[case::iat_at_boundary("iat", 0, true)]
    #[case::iat_past_boundary("iat", 1, false)]
    fn validity_boundary_should_be_inclusive(#[case] claim: &str, #[case] ahead: i64, #[case] valid: bool) {
        let leeway = 30;
        let date = now() + Duration::seconds(leeway + ahead);
        let key = HmacKey::hs256(HMAC_SECRET);
        let token = JwtBuilder::<SerdeJsonTraits>::new()
            .set_payload_claim(claim, date)
            .sign(&key)
            .unwrap();
        let verifier = verifier().allow_algorithm(key).leeway(leeway as u64);
        let result = verifier.verify(&decode(&token));
        if valid {
            assert!(result.is_ok());
        } else {
            assert!(matches!(result.unwrap_err(), RustyJwtError::TokenExpired(k) if k == claim));
        }
    }

    #[test]
    fn dates_beyond_calendar_range_should_only_compare_as_seconds() {
        let key = HmacKey::hs256(HMAC_SECRET);
        let verifier = verifier().allow_algorithm(key.clone());

        let token = JwtBuilder::<SerdeJsonTraits>::new()
            .set_payload_claim("exp", Claim::new(json!(1_000_000_000_000i64)))
            .set_payload_claim("nbf", Claim::new(json!(-1_000_000_000_000i64)))
            .set_payload_claim("iat", Claim::new(json!(i64::MIN)))
            .sign(&key)
            .unwrap();
        assert!(verifier.verify(&decode(&token)).is_ok());

        let token = JwtBuilder::<SerdeJsonTraits>::new()
            .set_payload_claim("exp", Claim::new(json!(-1_000_000_000_000i64)))
            .sign(&key)
            .unwrap();
        assert!(matches!(
            verifier.verify(&decode(&token)).unwrap_err(),
            RustyJwtError::TokenExpired(k) if k == "exp"
        ));
    }

    #[test]
    fn dedicated_leeway_should_make_claim_required() {
        let key = HmacKey::hs256(HMAC_SECRET);
        let token = JwtBuilder::<SerdeJsonTraits>::new().sign(&key).unwrap();
        let jwt = decode(&token);
        assert!(verifier().allow_algorithm(key.clone()).verify(&jwt).is_ok());
        for (verifier, claim) in [
            (verifier().expires_at_leeway(5), "exp"),
            (verifier().not_before_leeway(5), "nbf"),
            (verifier().issued_at_leeway(5), "iat"),
        ] {
            let result = verifier.allow_algorithm(key.clone()).verify(&jwt);
            assert!(matches!(result.unwrap_err(), RustyJwtError::MissingClaim(k) if k == claim));
        }
    }

    #[test]
    fn dedicated_leeway_should_override_default() {
        let key = HmacKey::hs256(HMAC_SECRET);
        let exp = now() - Duration::seconds(60);
        let token = JwtBuilder::<SerdeJsonTraits>::new().set_expires_at(exp).sign(&key).unwrap();
        let jwt = decode(&token);
        let verifier = verifier().allow_algorithm(key).leeway(0);
        assert!(verifier.verify(&jwt).is_err());
        assert!(verifier.expires_at_leeway(60).verify(&jwt).is_ok());
    }

    #[test]
    fn audience_should_follow_subset_semantics() {
        let key = HmacKey::hs256(HMAC_SECRET);
        let single = JwtBuilder::<SerdeJsonTraits>::new().set_audience("x").sign(&key).unwrap();
        let many = JwtBuilder::<SerdeJsonTraits>::new()
            .set_audiences(["x", "y"])
            .sign(&key)
            .unwrap();
        let with = |aud: &[&str]| verifier().allow_algorithm(key.clone()).with_audience(aud.iter().copied());

        assert!(with(&["x"]).verify(&decode(&single)).is_ok());
        assert!(matches!(
            with(&["x", "y"]).verify(&decode(&single)).unwrap_err(),
            RustyJwtError::AudienceMismatch
        ));
        assert!(with(&["x"]).verify(&decode(&many)).is_ok());
        assert!(with(&["x", "y"]).verify(&decode(&many)).is_ok());
        assert!(with(&["z"]).verify(&decode(&many)).is_err());
    }

    #[test]
    fn type_should_be_checked_in_header() {
        let key = HmacKey::hs256(HMAC_SECRET);
        let token = sample_builder().sign(&key).unwrap();
        let jwt = decode(&token);
        let verifier = verifier().allow_algorithm(key);
        assert!(verifier.clone().with_type("JWT").verify(&jwt).is_ok());
        assert!(matches!(
            verifier.clone().with_type("dpop+jwt").verify(&jwt).unwrap_err(),
            RustyJwtError::ClaimValueMismatch(k) if k == "typ"
        ));
    }

    #[test]
    fn custom_checks_should_extend_pipeline() {
        let key = HmacKey::hs256(HMAC_SECRET);
        let token = sample_builder().set_payload_claim("scope", "read").sign(&key).unwrap();
        let jwt = decode(&token);
        let require = |scope: &'static str| {
            ClaimCheck::custom(move |ctx: &VerifyContext<'_, SerdeJsonTraits>| {
                match ctx.get_claim(false)?.as_string()?.split(' ').any(|s| s == scope) {
                    true => Ok(()),
                    false => Err(RustyJwtError::ClaimValueMismatch(ctx.claim_key.to_string())),
                }
            })
        };
        let verifier = verifier().allow_algorithm(key);
        assert!(verifier.clone().with_claim("scope", require("read")).verify(&jwt).is_ok());
        assert!(matches!(
            verifier.clone().with_claim("scope", require("write")).verify(&jwt).unwrap_err(),
            RustyJwtError::ClaimValueMismatch(k) if k == "scope"
        ));
    }

    #[test]
    fn should_apply_config() {
        let config: VerifierConfig = serde_json::from_value(json!({
            "leeway": 5,
            "issuer": "https://issuer.example.com",
            "subject": "user-1",
            "audience": ["https://api.example.com"],
            "id": "token-1",
            "typ": "jwt",
            "expires_at_leeway": 0
        }))
        .unwrap();
        let key = HmacKey::hs256(HMAC_SECRET);
        let token = sample_builder().sign(&key).unwrap();
        let verifier = JwtVerifier::<FixedClock>::from_config(now().into(), &config).allow_algorithm(key.clone());
        assert!(verifier.verify(&decode(&token)).is_ok());

        let token = sample_builder().set_subject("user-2").sign(&key).unwrap();
        assert!(matches!(
            verifier.verify(&decode(&token)).unwrap_err(),
            RustyJwtError::ClaimValueMismatch(k) if k == "sub"
        ));

        let config: VerifierConfig = serde_json::from_value(json!({"audience": "https://api.example.com"})).unwrap();
        let verifier = JwtVerifier::<FixedClock>::from_config(now().into(), &config).allow_algorithm(key.clone());
        let token = sample_builder().sign(&key).unwrap();
        assert!(verifier.verify(&decode(&token)).is_ok());
        let config: VerifierConfig = serde_json::from_value(json!({"audience": "https://other.example.com"})).unwrap();
        let verifier = JwtVerifier::<FixedClock>::from_config(now().into(), &config).allow_algorithm(key.clone());
        assert!(verifier.verify(&decode(&token)).is_err());

        let unknown = serde_json::from_value::<VerifierConfig>(json!({"issuers": "x"}));
        assert!(unknown.is_err());
        assert_eq!(serde_json::from_value::<VerifierConfig>(json!({})).unwrap(), VerifierConfig::default());
    }

    #[test]
    fn should_be_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<JwtVerifier>();
        assert_send_sync::<DecodedJwt>();

        let key = HmacKey::hs256(HMAC_SECRET);
        let token = sample_builder().sign(&key).unwrap();
        let verifier = Arc::new(verifier().allow_algorithm(key));
        let handles = (0..4)
            .map(|_| {
                let verifier = verifier.clone();
                let token = token.clone();
                std::thread::spawn(move || verifier.verify(&decode(&token)).is_ok())
            })
            .collect::<Vec<_>>();
        assert!(handles.into_iter().all(|h| h.join().unwrap()));
    }

    #[test]
    fn debug_should_list_algorithms_and_checks() {
        let verifier = verifier()
            .allow_algorithm(HmacKey::hs256(HMAC_SECRET))
            .allow_algorithm(JwtKey::new(JwsAlgorithm::EdDSA).verifier);
        let debug = format!("{verifier:?}");
        assert!(debug.contains("\"EdDSA\", \"HS256\""));
        assert!(debug.contains("DefaultExpiry"));
    }
}
