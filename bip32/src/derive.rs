//! Child key derivation (CKD) over an [`HDNode`].

use crate::{
    ChainCode, ChildNumber, Error, HDNode, HmacSha512, KeyFingerprint, PrivateKeyBytes, PublicKeyBytes, Result, KEY_SIZE, MAX_PATH_LEN,
};
use hmac::Mac;
use zeroize::{Zeroize, Zeroizing};

/// Key material and chain code produced by one CKD step.
struct ChildKey {
    private_key: Option<Zeroizing<PrivateKeyBytes>>,
    public_key: Option<PublicKeyBytes>,
    chain_code: Zeroizing<ChainCode>,
}

impl HDNode {
    /// Derive a child node in place.
    ///
    /// Nodes without a private key use public derivation, which is undefined
    /// for hardened indexes. On any derivation failure the node is blanked.
    pub fn derive<C: Into<ChildNumber>>(&mut self, child_number: C) -> Result<()> {
        let child_number = child_number.into();
        self.next_depth()?;

        self.scrub_on_error(|node| {
            let parent_public_key = node.fill_public_key().map_err(|_| Error::DerivationFailure("node holds no key material"))?;
            let fingerprint = node.parent_fingerprint_of(&parent_public_key);
            let child = node.ckd(child_number, Some(&parent_public_key))?;
            node.commit(child_number, child, Some(fingerprint));
            Ok(())
        })
    }

    /// Derive along `path`, one child number after another, in place.
    ///
    /// Produces exactly the node repeated [`HDNode::derive`] calls would, but
    /// only computes a parent public key when a step needs it: for
    /// non-hardened steps and for the fingerprint of the last step.
    pub fn derive_path<P: AsRef<[ChildNumber]>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref();
        if path.len() > MAX_PATH_LEN {
            return Err(Error::InvalidInput("path cannot be longer than 32 indexes"));
        }
        if path.is_empty() {
            return Ok(());
        }
        if usize::from(self.attrs.depth) + path.len() > usize::from(u8::MAX) {
            return Err(Error::Depth);
        }

        self.scrub_on_error(|node| {
            let last = path.len() - 1;
            for (step, &child_number) in path.iter().enumerate() {
                let needs_public_key = step == last || !child_number.is_hardened() || !node.has_private_key();
                let parent_public_key = if needs_public_key {
                    Some(node.fill_public_key().map_err(|_| Error::DerivationFailure("node holds no key material"))?)
                } else {
                    None
                };

                let fingerprint = match (step == last, &parent_public_key) {
                    (true, Some(public_key)) => Some(node.parent_fingerprint_of(public_key)),
                    _ => None,
                };

                let child = node.ckd(child_number, parent_public_key.as_ref())?;
                node.commit(child_number, child, fingerprint);
            }
            Ok(())
        })
    }

    /// Depth of this node's children.
    fn next_depth(&self) -> Result<u8> {
        self.attrs.depth.checked_add(1).ok_or(Error::Depth)
    }

    fn parent_fingerprint_of(&self, public_key: &PublicKeyBytes) -> KeyFingerprint {
        let hash = self.curve.key_hash(public_key);
        [hash[0], hash[1], hash[2], hash[3]]
    }

    /// One BIP32 CKD step from this node's current state.
    ///
    /// `parent_public_key` must be provided for non-hardened steps and for
    /// nodes without a private key.
    fn ckd(&self, child_number: ChildNumber, parent_public_key: Option<&PublicKeyBytes>) -> Result<ChildKey> {
        if !child_number.is_hardened() && !self.curve.supports_normal_derivation() {
            return Err(Error::DerivationFailure("curve only supports hardened derivation"));
        }

        let mut hmac = HmacSha512::new_from_slice(&self.attrs.chain_code)?;

        match (&self.private_key, child_number.is_hardened()) {
            (Some(private_key), true) => {
                hmac.update(&[0]);
                hmac.update(private_key);
            }
            (None, true) => return Err(Error::DerivationFailure("hardened derivation requires a private key")),
            (_, false) => {
                let public_key = parent_public_key.ok_or(Error::DerivationFailure("missing parent public key"))?;
                hmac.update(public_key);
            }
        }

        hmac.update(&child_number.to_bytes());

        let mut result = Zeroizing::new([0u8; 2 * KEY_SIZE]);
        result.copy_from_slice(&hmac.finalize().into_bytes());
        let mut tweak = Zeroizing::new([0u8; KEY_SIZE]);
        tweak.copy_from_slice(&result[..KEY_SIZE]);
        let mut chain_code = Zeroizing::new([0u8; KEY_SIZE]);
        chain_code.copy_from_slice(&result[KEY_SIZE..]);

        match &self.private_key {
            Some(private_key) => {
                let private_key = self.curve.derive_private_key(private_key, &tweak)?;
                Ok(ChildKey { private_key: Some(private_key), public_key: None, chain_code })
            }
            None => {
                let public_key = parent_public_key.ok_or(Error::DerivationFailure("missing parent public key"))?;
                let public_key = self.curve.derive_public_key(public_key, &tweak)?;
                Ok(ChildKey { private_key: None, public_key: Some(public_key), chain_code })
            }
        }
    }

    /// Move a successfully derived child into this node.
    fn commit(&mut self, child_number: ChildNumber, child: ChildKey, parent_fingerprint: Option<KeyFingerprint>) {
        self.attrs.depth += 1;
        self.attrs.child_number = child_number;
        self.attrs.chain_code.copy_from_slice(child.chain_code.as_slice());
        if let Some(parent_fingerprint) = parent_fingerprint {
            self.attrs.parent_fingerprint = parent_fingerprint;
        }

        self.private_key.zeroize();
        self.private_key = child.private_key.as_deref().copied();
        self.public_key = child.public_key;
    }
}
