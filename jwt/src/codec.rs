//! base64url as used by the compact serialization
//!
//! Specified in [RFC 4648 Section 5: Base 64 Encoding with URL and Filename Safe Alphabet][1]
//!
//! [1]: https://tools.ietf.org/html/rfc4648#section-5

use base64::{
    Engine as _, alphabet,
    engine::{
        DecodePaddingMode,
        general_purpose::{GeneralPurpose, GeneralPurposeConfig},
    },
};

use crate::prelude::*;

const PADDING: char = '=';

/// Encoding capability used to turn token segments to text and back
pub trait Codec {
    /// Encodes with padding
    fn encode(&self, data: &[u8]) -> String;

    /// Decodes a padded input
    fn decode(&self, data: &str) -> RustyJwtResult<Vec<u8>>;

    /// Appends the padding required for the input length
    fn pad(&self, data: &str) -> String;

    /// Strips any padding
    fn trim(&self, data: &str) -> String;

    /// Encodes a token segment, without padding
    fn encode_segment(&self, data: &[u8]) -> String {
        self.trim(&self.encode(data))
    }

    /// Decodes a token segment, padded or not
    fn decode_segment(&self, data: &str) -> RustyJwtResult<Vec<u8>> {
        self.decode(&self.pad(data))
    }
}

/// URL safe base64 [Codec]
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct Base64Url;

impl Base64Url {
    const ENGINE: GeneralPurpose = GeneralPurpose::new(
        &alphabet::URL_SAFE,
        GeneralPurposeConfig::new()
            .with_encode_padding(true)
            .with_decode_padding_mode(DecodePaddingMode::Indifferent),
    );
}

impl Codec for Base64Url {
    fn encode(&self, data: &[u8]) -> String {
        Self::ENGINE.encode(data)
    }

    fn decode(&self, data: &str) -> RustyJwtResult<Vec<u8>> {
        Ok(Self::ENGINE.decode(data)?)
    }

    fn pad(&self, data: &str) -> String {
        let missing = match data.len() % 4 {
            2 => 2,
            3 => 1,
            _ => 0,
        };
        let mut padded = String::with_capacity(data.len() + missing);
        padded.push_str(data);
        padded.extend(std::iter::repeat_n(PADDING, missing));
        padded
    }

    fn trim(&self, data: &str) -> String {
        data.trim_end_matches(PADDING).to_string()
    }
}
