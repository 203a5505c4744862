//! Key material formats

pub mod pem;
