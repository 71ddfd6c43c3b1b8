//! Extended key (de)serialization for [`HDNode`].

use crate::{Curve, CurveRegistry, Error, ExtendedKey, HDNode, Result, Version, KEY_SIZE, PUBLIC_KEY_SIZE};
use std::sync::Arc;
use zeroize::{Zeroize, Zeroizing};

impl HDNode {
    /// Serialize the public half of this node as a Base58Check extended key.
    ///
    /// Computes and caches the public key when it has not been filled in.
    pub fn serialize_public(&mut self, version: Version) -> Result<String> {
        let public_key = self.fill_public_key().map_err(|_| Error::Serialization("node holds no key material"))?;
        let key = ExtendedKey { version, attrs: self.attrs.clone(), key_bytes: public_key };
        let encoded = encode(&key)?;
        Ok(encoded.as_str().to_owned())
    }

    /// Serialize this node's private key as a Base58Check extended key.
    pub fn serialize_private(&self, version: Version) -> Result<Zeroizing<String>> {
        let private_key = self.private_key.as_ref().ok_or(Error::Serialization("node holds no private key"))?;

        let mut key_bytes = [0u8; PUBLIC_KEY_SIZE];
        key_bytes[1..].copy_from_slice(private_key);
        let key = ExtendedKey { version, attrs: self.attrs.clone(), key_bytes };
        key_bytes.zeroize();

        encode(&key)
    }

    /// Parse a Base58Check extended key into a node on `curve`.
    ///
    /// The version selects the form: `version_public` yields a public-only
    /// node, `version_private` a node holding the private key. The public key
    /// is taken as-is and not checked against the curve.
    pub fn deserialize(encoded: &str, version_public: Version, version_private: Version, curve: Arc<dyn Curve>) -> Result<Self> {
        let key = encoded.parse::<ExtendedKey>().inspect_err(|err| log::debug!("rejecting extended key: {err}"))?;

        let (private_key, public_key) = if key.version == version_public {
            (None, Some(key.key_bytes))
        } else if key.version == version_private {
            if !key.is_private() {
                log::debug!("rejecting extended key: private form without a 0x00 marker");
                return Err(Error::MalformedEncoding("private key must be prefixed with 0x00".to_string()));
            }
            let mut private_key = [0u8; KEY_SIZE];
            private_key.copy_from_slice(&key.key_bytes[1..]);
            (Some(private_key), None)
        } else {
            log::debug!("rejecting extended key: unknown version {:#010x}", key.version);
            return Err(Error::UnknownVersion(key.version));
        };

        let mut node = HDNode { attrs: key.attrs.clone(), private_key, public_key, curve };

        // An all-zero key field leaves the node without a private key.
        if node.private_key.as_ref().is_some_and(|private_key| private_key.iter().all(|byte| *byte == 0)) {
            node.private_key = None;
        }

        Ok(node)
    }
}

fn encode(key: &ExtendedKey) -> Result<Zeroizing<String>> {
    let mut buffer = Zeroizing::new([0u8; ExtendedKey::MAX_BASE58_SIZE]);
    let encoded = key.write_base58(&mut buffer)?;
    Ok(Zeroizing::new(encoded.to_owned()))
}

impl CurveRegistry {
    /// [`HDNode::deserialize`] on the registry's default curve.
    pub fn deserialize(&self, encoded: &str, version_public: Version, version_private: Version) -> Result<HDNode> {
        HDNode::deserialize(encoded, version_public, version_private, self.default_curve()?)
    }
}
