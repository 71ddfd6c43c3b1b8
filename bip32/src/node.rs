//! HD node: the mutable key-derivation state.

use crate::{
    ChainCode, ChildNumber, Curve, CurveRegistry, Depth, Error, ExtendedKeyAttrs, HmacSha512, KeyFingerprint, PrivateKeyBytes,
    PublicKeyBytes, Result, KEY_SIZE, PUBLIC_KEY_SIZE,
};
use hmac::Mac;
use std::{
    fmt::{self, Debug},
    sync::Arc,
};
use subtle::{Choice, ConstantTimeEq};
use zeroize::{Zeroize, Zeroizing};

/// Field values for [`HDNode::new`].
#[derive(Clone, Default)]
pub struct NodeParams {
    pub depth: Depth,
    pub parent_fingerprint: u32,
    pub child_number: ChildNumber,
    /// Defaults to all zeros.
    pub chain_code: Option<ChainCode>,
    pub private_key: Option<PrivateKeyBytes>,
    pub public_key: Option<PublicKeyBytes>,
    /// Defaults to the registry's default curve.
    pub curve_name: Option<String>,
}

/// Slice-shaped node fields as handed over by dynamically typed callers.
///
/// An empty slice means "not supplied".
#[derive(Clone, Copy, Debug, Default)]
pub struct RawNodeParams<'a> {
    pub depth: Depth,
    pub parent_fingerprint: u32,
    pub child_number: u32,
    pub chain_code: &'a [u8],
    pub private_key: &'a [u8],
    pub public_key: &'a [u8],
    pub curve_name: &'a str,
}

impl TryFrom<RawNodeParams<'_>> for NodeParams {
    type Error = Error;

    fn try_from(raw: RawNodeParams<'_>) -> Result<Self> {
        if !raw.chain_code.is_empty() && raw.chain_code.len() != KEY_SIZE {
            return Err(Error::InvalidInput("chain_code is invalid"));
        }
        if raw.public_key.is_empty() && raw.private_key.is_empty() {
            return Err(Error::InvalidInput("either public_key or private_key is required"));
        }
        if !raw.private_key.is_empty() && raw.private_key.len() != KEY_SIZE {
            return Err(Error::InvalidInput("private_key is invalid"));
        }
        if !raw.public_key.is_empty() && raw.public_key.len() != PUBLIC_KEY_SIZE {
            return Err(Error::InvalidInput("public_key is invalid"));
        }

        Ok(NodeParams {
            depth: raw.depth,
            parent_fingerprint: raw.parent_fingerprint,
            child_number: raw.child_number.into(),
            chain_code: optional_array(raw.chain_code)?,
            private_key: optional_array(raw.private_key)?,
            public_key: optional_array(raw.public_key)?,
            curve_name: (!raw.curve_name.is_empty()).then(|| raw.curve_name.to_string()),
        })
    }
}

fn optional_array<const N: usize>(bytes: &[u8]) -> Result<Option<[u8; N]>> {
    if bytes.is_empty() { Ok(None) } else { Ok(Some(bytes.try_into()?)) }
}

/// BIP32 HD node.
///
/// Holds the attributes of an extended key, an optional private key, a
/// lazily computed public key and the curve the node was created on.
#[derive(Clone)]
pub struct HDNode {
    pub(crate) attrs: ExtendedKeyAttrs,
    pub(crate) private_key: Option<PrivateKeyBytes>,
    pub(crate) public_key: Option<PublicKeyBytes>,
    pub(crate) curve: Arc<dyn Curve>,
}

impl HDNode {
    /// Build a node from explicit field values.
    pub fn new(registry: &CurveRegistry, mut params: NodeParams) -> Result<Self> {
        let node = Self::from_params(registry, &params);
        params.chain_code.zeroize();
        params.private_key.zeroize();
        node
    }

    fn from_params(registry: &CurveRegistry, params: &NodeParams) -> Result<Self> {
        if params.private_key.is_none() && params.public_key.is_none() {
            return Err(Error::InvalidInput("either public_key or private_key is required"));
        }

        let curve = match params.curve_name.as_deref() {
            Some(name) => registry.get(name)?,
            None => registry.default_curve()?,
        };

        let attrs = ExtendedKeyAttrs {
            depth: params.depth,
            parent_fingerprint: params.parent_fingerprint.to_be_bytes(),
            child_number: params.child_number,
            chain_code: params.chain_code.unwrap_or_default(),
        };

        Ok(HDNode { attrs, private_key: params.private_key, public_key: params.public_key, curve })
    }

    /// Create the root node for `seed` on the named curve.
    ///
    /// Keeps re-hashing the HMAC output until its left half is a valid
    /// private key for the curve (SLIP-0010 master key generation).
    pub fn from_seed(registry: &CurveRegistry, seed: &[u8], curve_name: &str) -> Result<Self> {
        if seed.is_empty() {
            return Err(Error::InvalidInput("seed is empty"));
        }
        if curve_name.is_empty() {
            return Err(Error::InvalidInput("curve name is empty"));
        }

        let curve = registry.get(curve_name)?;

        let mut hmac = HmacSha512::new_from_slice(curve.seed_domain())?;
        hmac.update(seed);
        let mut output = Zeroizing::new([0u8; 2 * KEY_SIZE]);
        output.copy_from_slice(&hmac.finalize().into_bytes());

        while !curve.is_valid_private_key(output[..KEY_SIZE].try_into()?) {
            log::trace!("master key candidate rejected on {}, re-hashing", curve.name());
            let mut hmac = HmacSha512::new_from_slice(curve.seed_domain())?;
            hmac.update(output.as_slice());
            output.copy_from_slice(&hmac.finalize().into_bytes());
        }

        let (secret_key, chain_code) = output.split_at(KEY_SIZE);
        let attrs = ExtendedKeyAttrs {
            depth: 0,
            parent_fingerprint: KeyFingerprint::default(),
            child_number: ChildNumber::default(),
            chain_code: chain_code.try_into()?,
        };

        Ok(HDNode { attrs, private_key: Some(secret_key.try_into()?), public_key: None, curve })
    }

    /// Number of derivation steps from the root.
    pub fn depth(&self) -> Depth {
        self.attrs.depth
    }

    /// Child number this node was derived with.
    pub fn child_number(&self) -> ChildNumber {
        self.attrs.child_number
    }

    /// Fingerprint of the parent node, read big-endian.
    pub fn fingerprint(&self) -> u32 {
        u32::from_be_bytes(self.attrs.parent_fingerprint)
    }

    /// Fingerprint of this node (hash of its own public key).
    ///
    /// NOTE: the first four hash bytes are read little-endian, i.e. this is
    /// byte-swapped relative to [`HDNode::fingerprint`]. Existing consumers
    /// depend on that order.
    pub fn own_fingerprint(&self) -> Result<u32> {
        Ok(u32::from_le_bytes(self.key_fingerprint()?))
    }

    /// First four bytes of the hash of this node's public key, in hash order.
    pub(crate) fn key_fingerprint(&self) -> Result<KeyFingerprint> {
        let hash = self.curve.key_hash(&self.public_key()?);
        Ok(hash[..4].try_into()?)
    }

    pub fn chain_code(&self) -> &ChainCode {
        &self.attrs.chain_code
    }

    /// Borrow the private key, if this node holds one.
    pub fn private_key(&self) -> Option<&PrivateKeyBytes> {
        self.private_key.as_ref()
    }

    pub fn has_private_key(&self) -> bool {
        self.private_key.is_some()
    }

    /// Compressed public key, computed from the private key if it has not
    /// been filled in yet.
    pub fn public_key(&self) -> Result<PublicKeyBytes> {
        match (&self.public_key, &self.private_key) {
            (Some(public_key), _) => Ok(*public_key),
            (None, Some(private_key)) => self.curve.public_key(private_key),
            (None, None) => Err(Error::NoKeyMaterial),
        }
    }

    /// Compute and cache the public key.
    pub fn fill_public_key(&mut self) -> Result<PublicKeyBytes> {
        let public_key = self.public_key()?;
        self.public_key = Some(public_key);
        Ok(public_key)
    }

    pub fn curve(&self) -> &Arc<dyn Curve> {
        &self.curve
    }

    /// Get attributes for this node such as depth, parent fingerprint,
    /// child number, and chain code.
    pub fn attrs(&self) -> &ExtendedKeyAttrs {
        &self.attrs
    }

    /// Overwrite every field with zeros and drop the private key.
    ///
    /// The node is useless afterwards: derivation and serialization fail.
    pub fn blank(&mut self) {
        self.attrs.zeroize();
        self.private_key.zeroize();
        self.public_key = None;
    }

    /// Run `op`; if it fails, blank the node before returning the error.
    pub(crate) fn scrub_on_error<T>(&mut self, op: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        let result = op(self);
        if let Err(err) = &result {
            log::debug!("scrubbing {} node after failure: {err}", self.curve.name());
            self.blank();
        }
        result
    }
}

impl Drop for HDNode {
    fn drop(&mut self) {
        self.attrs.chain_code.zeroize();
        self.private_key.zeroize();
    }
}

impl ConstantTimeEq for HDNode {
    fn ct_eq(&self, other: &Self) -> Choice {
        let mut key_a = self.private_key.unwrap_or_default();
        let mut key_b = other.private_key.unwrap_or_default();
        let public_a = self.public_key().unwrap_or([0u8; PUBLIC_KEY_SIZE]);
        let public_b = other.public_key().unwrap_or([0u8; PUBLIC_KEY_SIZE]);

        let result = key_a.as_slice().ct_eq(key_b.as_slice())
            & Choice::from(u8::from(self.private_key.is_some() == other.private_key.is_some()))
            & public_a.as_slice().ct_eq(public_b.as_slice())
            & self.attrs.depth.ct_eq(&other.attrs.depth)
            & self.attrs.parent_fingerprint.as_slice().ct_eq(other.attrs.parent_fingerprint.as_slice())
            & self.attrs.child_number.0.ct_eq(&other.attrs.child_number.0)
            & self.attrs.chain_code.as_slice().ct_eq(other.attrs.chain_code.as_slice())
            & Choice::from(u8::from(self.curve.name() == other.curve.name()));

        key_a.zeroize();
        key_b.zeroize();

        result
    }
}

/// NOTE: uses [`ConstantTimeEq`] internally
impl PartialEq for HDNode {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for HDNode {}

impl Debug for HDNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HDNode")
            .field("curve", &self.curve.name())
            .field("depth", &self.attrs.depth)
            .field("parent_fingerprint", &self.attrs.parent_fingerprint)
            .field("child_number", &self.attrs.child_number)
            .field("private_key", &self.private_key.as_ref().map(|_| "..."))
            .field("public_key", &self.public_key)
            .finish()
    }
}
