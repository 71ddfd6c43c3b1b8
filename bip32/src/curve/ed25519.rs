use super::{Curve, ED25519_NAME};
use crate::{Error, PrivateKeyBytes, PublicKeyBytes, Result, KEY_SIZE};
use ed25519_dalek::SigningKey;
use zeroize::Zeroizing;

/// SLIP-0010 master key seed constant.
const MASTER_SECRET: &[u8] = b"ed25519 seed";

/// ed25519 under SLIP-0010.
///
/// Every 32-byte string is a valid private key, child keys are the raw left
/// half of the HMAC output and only hardened derivation is defined. Public
/// keys are the 32-byte point prefixed with `0x00`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Ed25519;

impl Curve for Ed25519 {
    fn name(&self) -> &'static str {
        ED25519_NAME
    }

    fn seed_domain(&self) -> &'static [u8] {
        MASTER_SECRET
    }

    fn is_valid_private_key(&self, _private_key: &PrivateKeyBytes) -> bool {
        true
    }

    fn public_key(&self, private_key: &PrivateKeyBytes) -> Result<PublicKeyBytes> {
        let signing_key = SigningKey::from_bytes(private_key);
        let mut public_key = [0u8; KEY_SIZE + 1];
        public_key[1..].copy_from_slice(signing_key.verifying_key().as_bytes());
        Ok(public_key)
    }

    fn derive_private_key(&self, _parent: &PrivateKeyBytes, tweak: &[u8; KEY_SIZE]) -> Result<Zeroizing<PrivateKeyBytes>> {
        Ok(Zeroizing::new(*tweak))
    }

    fn derive_public_key(&self, _parent: &PublicKeyBytes, _tweak: &[u8; KEY_SIZE]) -> Result<PublicKeyBytes> {
        Err(Error::DerivationFailure("ed25519 does not support public derivation"))
    }

    fn supports_normal_derivation(&self) -> bool {
        false
    }
}
