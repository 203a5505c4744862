use std::{fmt::Formatter, sync::Arc};

use super::VerifyContext;
use crate::{
    json::{JsonTraits, JsonType, SerdeJsonTraits},
    prelude::*,
};

/// Caller supplied check
pub type CustomCheck<J> = Arc<dyn Fn(&VerifyContext<'_, J>) -> RustyJwtResult<()> + Send + Sync>;

/// A rule a claim of the token has to satisfy.
///
/// Unless stated otherwise the claim is looked up in the payload, `in_header` switches to the header. A required
/// claim which is absent fails with [RustyJwtError::MissingClaim].
#[derive(Clone)]
pub enum ClaimCheck<J: JsonTraits = SerdeJsonTraits> {
    /// Same JSON type and same value
    Equals {
        /// Expected claim
        expected: Claim<J>,
        /// Lookup in the header
        in_header: bool,
    },
    /// Every expected string is in the claim. A string claim is a set of one.
    IsSubset {
        /// Strings which all have to be present
        expected: ClaimSet,
        /// Lookup in the header
        in_header: bool,
    },
    /// String claim equal to `expected` regardless of the case
    InsensitiveString {
        /// Expected string
        expected: String,
        /// Lookup in the header
        in_header: bool,
    },
    /// The current time is before the claim date plus the leeway, like "exp"
    DateBefore {
        /// Tolerance in seconds
        leeway: u64,
        /// Lookup in the header
        in_header: bool,
    },
    /// The current time is after the claim date minus the leeway, like "nbf" or "iat"
    DateAfter {
        /// Tolerance in seconds
        leeway: u64,
        /// Lookup in the header
        in_header: bool,
    },
    /// Optional "exp" with the default leeway
    DefaultExpiry,
    /// Optional "iat" with the default leeway
    DefaultIssuedAt,
    /// Optional "nbf" with the default leeway
    DefaultNotBefore,
    /// Anything else
    Custom(CustomCheck<J>),
}

impl<J: JsonTraits> ClaimCheck<J> {
    /// See [ClaimCheck::Equals]
    pub fn equals(expected: impl Into<Claim<J>>) -> Self {
        Self::Equals {
            expected: expected.into(),
            in_header: false,
        }
    }

    /// See [ClaimCheck::IsSubset]
    pub fn is_subset<S: Into<String>>(expected: impl IntoIterator<Item = S>) -> Self {
        Self::IsSubset {
            expected: expected.into_iter().map(Into::into).collect(),
            in_header: false,
        }
    }

    /// See [ClaimCheck::InsensitiveString]
    pub fn insensitive_string(expected: impl Into<String>) -> Self {
        Self::InsensitiveString {
            expected: expected.into(),
            in_header: false,
        }
    }

    /// See [ClaimCheck::DateBefore]
    pub fn date_before(leeway: u64) -> Self {
        Self::DateBefore {
            leeway,
            in_header: false,
        }
    }

    /// See [ClaimCheck::DateAfter]
    pub fn date_after(leeway: u64) -> Self {
        Self::DateAfter {
            leeway,
            in_header: false,
        }
    }

    /// See [ClaimCheck::Custom]
    pub fn custom(check: impl Fn(&VerifyContext<'_, J>) -> RustyJwtResult<()> + Send + Sync + 'static) -> Self {
        Self::Custom(Arc::new(check))
    }

    /// Looks the claim up in the header instead of the payload. No effect on the default and custom checks.
    pub fn in_header(mut self) -> Self {
        match &mut self {
            Self::Equals { in_header, .. }
            | Self::IsSubset { in_header, .. }
            | Self::InsensitiveString { in_header, .. }
            | Self::DateBefore { in_header, .. }
            | Self::DateAfter { in_header, .. } => *in_header = true,
            Self::DefaultExpiry | Self::DefaultIssuedAt | Self::DefaultNotBefore | Self::Custom(_) => {}
        }
        self
    }

    /// Runs the check against the claim named [VerifyContext::claim_key]
    pub fn check(&self, ctx: &VerifyContext<'_, J>) -> RustyJwtResult<()> {
        match self {
            Self::Equals { expected, in_header } => {
                let claim = ctx.get_typed_claim(*in_header, expected.get_type())?;
                if &claim != expected {
                    return Err(ctx.value_mismatch());
                }
                Ok(())
            }
            Self::IsSubset { expected, in_header } => Self::is_subset_of(ctx, *in_header, expected),
            Self::InsensitiveString { expected, in_header } => {
                let claim = ctx.get_typed_claim(*in_header, JsonType::String)?.as_string()?;
                if claim.to_uppercase() != expected.to_uppercase() {
                    return Err(ctx.value_mismatch());
                }
                Ok(())
            }
            Self::DateBefore { leeway, in_header } => Self::is_before(ctx, *in_header, *leeway),
            Self::DateAfter { leeway, in_header } => Self::is_after(ctx, *in_header, *leeway),
            Self::DefaultExpiry if ctx.has_claim(false) => Self::is_before(ctx, false, ctx.default_leeway),
            Self::DefaultIssuedAt | Self::DefaultNotBefore if ctx.has_claim(false) => {
                Self::is_after(ctx, false, ctx.default_leeway)
            }
            Self::DefaultExpiry | Self::DefaultIssuedAt | Self::DefaultNotBefore => Ok(()),
            Self::Custom(check) => check(ctx),
        }
    }

    fn is_subset_of(ctx: &VerifyContext<'_, J>, in_header: bool, expected: &ClaimSet) -> RustyJwtResult<()> {
        let claim = ctx.get_claim(in_header)?;
        let matches = match claim.get_type() {
            JsonType::String => {
                let actual = claim.as_string()?;
                expected.len() == 1 && expected.contains(&actual)
            }
            JsonType::Array => {
                let actual = claim.as_set().map_err(|_| ctx.type_mismatch())?;
                expected.is_subset(&actual)
            }
            _ => return Err(ctx.type_mismatch()),
        };
        if !matches {
            return Err(RustyJwtError::AudienceMismatch);
        }
        Ok(())
    }

    // compared as epoch seconds so that any integer is a valid date
    fn is_before(ctx: &VerifyContext<'_, J>, in_header: bool, leeway: u64) -> RustyJwtResult<()> {
        let date = ctx.get_typed_claim(in_header, JsonType::Integer)?.as_int()?;
        if ctx.current_time.unix_timestamp() > date.saturating_add(seconds(leeway)) {
            return Err(ctx.expired());
        }
        Ok(())
    }

    fn is_after(ctx: &VerifyContext<'_, J>, in_header: bool, leeway: u64) -> RustyJwtResult<()> {
        let date = ctx.get_typed_claim(in_header, JsonType::Integer)?.as_int()?;
        if ctx.current_time.unix_timestamp() < date.saturating_sub(seconds(leeway)) {
            return Err(ctx.expired());
        }
        Ok(())
    }
}

fn seconds(leeway: u64) -> i64 {
    i64::try_from(leeway).unwrap_or(i64::MAX)
}

impl<J: JsonTraits> From<Claim<J>> for ClaimCheck<J> {
    fn from(expected: Claim<J>) -> Self {
        Self::Equals {
            expected,
            in_header: false,
        }
    }
}

impl<J: JsonTraits> std::fmt::Debug for ClaimCheck<J> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Equals { expected, in_header } => f
                .debug_struct("Equals")
                .field("expected", expected)
                .field("in_header", in_header)
                .finish(),
            Self::IsSubset { expected, in_header } => f
                .debug_struct("IsSubset")
                .field("expected", expected)
                .field("in_header", in_header)
                .finish(),
            Self::InsensitiveString { expected, in_header } => f
                .debug_struct("InsensitiveString")
                .field("expected", expected)
                .field("in_header", in_header)
                .finish(),
            Self::DateBefore { leeway, in_header } => f
                .debug_struct("DateBefore")
                .field("leeway", leeway)
                .field("in_header", in_header)
                .finish(),
            Self::DateAfter { leeway, in_header } => f
                .debug_struct("DateAfter")
                .field("leeway", leeway)
                .field("in_header", in_header)
                .finish(),
            Self::DefaultExpiry => f.write_str("DefaultExpiry"),
            Self::DefaultIssuedAt => f.write_str("DefaultIssuedAt"),
            Self::DefaultNotBefore => f.write_str("DefaultNotBefore"),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}
