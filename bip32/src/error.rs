//! Error type.

use thiserror::Error;

/// Errors emitted while building, deriving or (de)serializing HD nodes.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),

    #[error("unsupported curve `{0}`")]
    UnsupportedCurve(String),

    #[error("failed to derive: {0}")]
    DerivationFailure(&'static str),

    #[error("maximum derivation depth exceeded")]
    Depth,

    #[error("failed to serialize: {0}")]
    Serialization(&'static str),

    #[error("extended key checksum mismatch")]
    ChecksumMismatch,

    #[error("malformed encoding: {0}")]
    MalformedEncoding(String),

    #[error("unknown extended key version {0:#010x}")]
    UnknownVersion(u32),

    #[error("node holds no key material")]
    NoKeyMaterial,

    #[error("invalid child number")]
    ChildNumber,

    #[error("{0}")]
    String(String),

    #[error("Invalid UTF-8 sequence")]
    Utf8Error(#[from] core::str::Utf8Error),

    #[error("Decoding -> {0}")]
    Decode(#[from] core::array::TryFromSliceError),

    #[error("Secp256k1 -> {0}")]
    Secp256k1(#[from] secp256k1::Error),

    #[error("Config -> {0}")]
    Config(#[from] toml::de::Error),
}

impl Error {
    pub fn custom<T: Into<String>>(msg: T) -> Self {
        Error::String(msg.into())
    }
}

impl From<bs58::decode::Error> for Error {
    fn from(err: bs58::decode::Error) -> Error {
        match err {
            bs58::decode::Error::InvalidChecksum { .. } => Error::ChecksumMismatch,
            bs58::decode::Error::BufferTooSmall => Error::MalformedEncoding("decoded payload is too long".to_string()),
            err => Error::MalformedEncoding(err.to_string()),
        }
    }
}

impl From<bs58::encode::Error> for Error {
    fn from(_: bs58::encode::Error) -> Error {
        Error::Serialization("output buffer too small")
    }
}

impl From<hmac::digest::InvalidLength> for Error {
    fn from(_: hmac::digest::InvalidLength) -> Error {
        Error::custom("invalid HMAC key length")
    }
}

impl From<secp256k1::scalar::OutOfRangeError> for Error {
    fn from(_: secp256k1::scalar::OutOfRangeError) -> Error {
        Error::DerivationFailure("tweak is not below the curve order")
    }
}
