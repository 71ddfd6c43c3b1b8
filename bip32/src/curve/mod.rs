//! Curve registry.
//!
//! A [`Curve`] supplies the arithmetic BIP32 child key derivation needs:
//! public key computation, private and public tweaking, and the key hash
//! used for fingerprints and addresses. Nodes hold the curve they were
//! built with as an `Arc<dyn Curve>`; lookups by name go through an explicit
//! [`CurveRegistry`] value.

use crate::{Error, KeyHash, PrivateKeyBytes, PublicKeyBytes, Result, KEY_SIZE};
use ripemd::Ripemd160;
use sha2::{Digest, Sha256};
use std::{fmt, sync::Arc};
use zeroize::Zeroizing;

mod ed25519;
mod secp;

pub use self::ed25519::Ed25519;
pub use self::secp::Secp256k1;

/// Registry name of the secp256k1 curve.
pub const SECP256K1_NAME: &str = "secp256k1";

/// Registry name of the ed25519 curve (SLIP-10).
pub const ED25519_NAME: &str = "ed25519";

pub trait Curve: Send + Sync + fmt::Debug {
    /// Name the curve is registered under.
    fn name(&self) -> &'static str;

    /// HMAC key used to turn a seed into a master node.
    fn seed_domain(&self) -> &'static [u8];

    /// Is `private_key` usable as a secret scalar on this curve?
    fn is_valid_private_key(&self, private_key: &PrivateKeyBytes) -> bool;

    /// Compute the 33-byte public key for `private_key`.
    fn public_key(&self, private_key: &PrivateKeyBytes) -> Result<PublicKeyBytes>;

    /// Combine the left half of the CKD HMAC output with the parent private key.
    fn derive_private_key(&self, parent: &PrivateKeyBytes, tweak: &[u8; KEY_SIZE]) -> Result<Zeroizing<PrivateKeyBytes>>;

    /// Combine the left half of the CKD HMAC output with the parent public key.
    fn derive_public_key(&self, parent: &PublicKeyBytes, tweak: &[u8; KEY_SIZE]) -> Result<PublicKeyBytes>;

    /// Whether non-hardened (public-key based) derivation is defined.
    fn supports_normal_derivation(&self) -> bool {
        true
    }

    /// Hash identifying a public key: RIPEMD160(SHA256(key)).
    fn key_hash(&self, public_key: &PublicKeyBytes) -> KeyHash {
        let digest = Ripemd160::digest(Sha256::digest(public_key));
        let mut hash = KeyHash::default();
        hash.copy_from_slice(&digest);
        hash
    }
}

/// Named set of curves available to node constructors.
///
/// [`CurveRegistry::default`] contains secp256k1 (the default curve) and
/// ed25519.
#[derive(Clone)]
pub struct CurveRegistry {
    curves: Vec<Arc<dyn Curve>>,
    default: &'static str,
}

impl CurveRegistry {
    /// Create an empty registry whose default curve is `default`.
    pub fn empty(default: &'static str) -> Self {
        Self { curves: Vec::new(), default }
    }

    /// Register a curve, replacing any curve with the same name.
    pub fn register(&mut self, curve: Arc<dyn Curve>) {
        self.curves.retain(|existing| existing.name() != curve.name());
        self.curves.push(curve);
    }

    pub fn with_curve<C: Curve + 'static>(mut self, curve: C) -> Self {
        self.register(Arc::new(curve));
        self
    }

    /// Look up a curve by name.
    pub fn get(&self, name: &str) -> Result<Arc<dyn Curve>> {
        self.curves.iter().find(|curve| curve.name() == name).cloned().ok_or_else(|| Error::UnsupportedCurve(name.to_string()))
    }

    /// The curve used when a caller does not name one.
    pub fn default_curve(&self) -> Result<Arc<dyn Curve>> {
        self.get(self.default)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.curves.iter().map(|curve| curve.name())
    }
}

impl Default for CurveRegistry {
    fn default() -> Self {
        CurveRegistry::empty(SECP256K1_NAME).with_curve(Secp256k1).with_curve(Ed25519)
    }
}

impl fmt::Debug for CurveRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CurveRegistry").field("curves", &self.names().collect::<Vec<_>>()).field("default", &self.default).finish()
    }
}
