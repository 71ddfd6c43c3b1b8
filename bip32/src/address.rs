//! Legacy Base58Check addresses (P2PKH style) for [`HDNode`].

use crate::{Error, HDNode, KeyHash, Result};
use std::str;

/// Longest address [`HDNode::address`] will produce.
pub const ADDRESS_MAX_LEN: usize = 35;

impl HDNode {
    /// Hash of this node's public key: RIPEMD160(SHA256(public key)).
    pub fn address_raw(&self) -> Result<KeyHash> {
        Ok(self.curve.key_hash(&self.public_key()?))
    }

    /// Base58Check address of this node's public key.
    ///
    /// `version` is prepended in as few big-endian bytes as hold it, so
    /// `0x00` gives Bitcoin `1...` addresses and `0x1cb8` Zcash `t1...` ones.
    pub fn address(&self, version: u32) -> Result<String> {
        let hash = self.address_raw()?;
        let version_bytes = version.to_be_bytes();
        let prefix = &version_bytes[prefix_offset(version)..];

        let mut payload = Vec::with_capacity(prefix.len() + hash.len());
        payload.extend_from_slice(prefix);
        payload.extend_from_slice(&hash);

        let mut buffer = [0u8; ADDRESS_MAX_LEN + 8];
        let len = bs58::encode(&payload).with_check().onto(buffer.as_mut_slice())?;
        if len > ADDRESS_MAX_LEN {
            return Err(Error::Serialization("address exceeds the maximum length"));
        }

        Ok(str::from_utf8(&buffer[..len])?.to_owned())
    }
}

/// Index of the first version byte to keep.
fn prefix_offset(version: u32) -> usize {
    match version {
        0..=0xff => 3,
        0x100..=0xffff => 2,
        0x1_0000..=0xff_ffff => 1,
        _ => 0,
    }
}
