//! Codec for the extended key layout shared by `xprv` / `xpub` style keys.

use crate::{ChildNumber, Error, ExtendedKeyAttrs, Result, Version, PUBLIC_KEY_SIZE};
use core::{
    fmt::{self, Display},
    str::{self, FromStr},
};
use zeroize::Zeroize;

/// Serialized extended key (e.g. `xprv` and `xpub`).
#[derive(Clone)]
pub struct ExtendedKey {
    /// Version number of the key (e.g. `0x0488B21E` for `xpub`).
    pub version: Version,

    /// Extended key attributes.
    pub attrs: ExtendedKeyAttrs,

    /// Key material (may be public or private).
    ///
    /// Private keys are stored behind a leading `0x00` byte; public keys use
    /// that byte for their SEC1 tag.
    pub key_bytes: [u8; PUBLIC_KEY_SIZE],
}

impl ExtendedKey {
    /// Size of an extended key when deserialized into bytes from Base58.
    pub const BYTE_SIZE: usize = 78;

    /// Maximum size of a Base58Check-encoded extended key in bytes.
    ///
    /// Extended keys encode to 111 or 112 characters.
    pub const MAX_BASE58_SIZE: usize = 128;

    /// Is the key field laid out as a private key (`0x00` marker)?
    pub fn is_private(&self) -> bool {
        self.key_bytes[0] == 0
    }

    /// Write a Base58-encoded key to the provided buffer, returning a `&str`
    /// containing the serialized data.
    ///
    /// Note that this type also impls [`Display`] and therefore you can
    /// obtain an owned string by calling `to_string()`.
    pub fn write_base58<'a>(&self, buffer: &'a mut [u8; Self::MAX_BASE58_SIZE]) -> Result<&'a str> {
        let mut bytes = [0u8; Self::BYTE_SIZE];
        bytes[..4].copy_from_slice(&self.version.to_be_bytes());
        bytes[4] = self.attrs.depth;
        bytes[5..9].copy_from_slice(&self.attrs.parent_fingerprint);
        bytes[9..13].copy_from_slice(&self.attrs.child_number.to_bytes());
        bytes[13..45].copy_from_slice(&self.attrs.chain_code);
        bytes[45..78].copy_from_slice(&self.key_bytes);

        let base58_len = bs58::encode(&bytes).with_check().onto(buffer.as_mut_slice());
        bytes.zeroize();

        str::from_utf8(&buffer[..base58_len?]).map_err(Error::Utf8Error)
    }
}

impl Display for ExtendedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut buf = [0u8; Self::MAX_BASE58_SIZE];
        let result = self.write_base58(&mut buf).map_err(|_| fmt::Error).and_then(|base58| f.write_str(base58));
        buf.zeroize();
        result
    }
}

impl FromStr for ExtendedKey {
    type Err = Error;

    fn from_str(base58: &str) -> Result<Self> {
        if base58.is_empty() {
            return Err(Error::MalformedEncoding("empty extended key".to_string()));
        }

        let mut bytes = [0u8; Self::BYTE_SIZE + 4]; // with 4-byte checksum
        let decoded_len = bs58::decode(base58).with_check(None).onto(&mut bytes)?;

        if decoded_len != Self::BYTE_SIZE {
            bytes.zeroize();
            return Err(Error::MalformedEncoding(format!("expected {} bytes, decoded {decoded_len}", Self::BYTE_SIZE)));
        }

        let version = Version::from_be_bytes(bytes[..4].try_into()?);
        let depth = bytes[4];
        let parent_fingerprint = bytes[5..9].try_into()?;
        let child_number = ChildNumber::from_bytes(bytes[9..13].try_into()?);
        let chain_code = bytes[13..45].try_into()?;
        let key_bytes = bytes[45..78].try_into()?;
        bytes.zeroize();

        let attrs = ExtendedKeyAttrs { depth, parent_fingerprint, child_number, chain_code };

        Ok(ExtendedKey { version, attrs, key_bytes })
    }
}

impl Drop for ExtendedKey {
    fn drop(&mut self) {
        self.key_bytes.zeroize();
        self.attrs.chain_code.zeroize();
    }
}
