use super::{Curve, SECP256K1_NAME};
use crate::{Error, PrivateKeyBytes, PublicKeyBytes, Result, KEY_SIZE};
use secp256k1::{PublicKey, Scalar, SecretKey, SECP256K1};
use zeroize::Zeroizing;

/// Derivation domain separator for BIP32 master keys ("Bitcoin seed").
const BIP32_DOMAIN_SEPARATOR: [u8; 12] = [0x42, 0x69, 0x74, 0x63, 0x6f, 0x69, 0x6e, 0x20, 0x73, 0x65, 0x65, 0x64];

/// secp256k1 backed by libsecp256k1.
#[derive(Clone, Copy, Debug, Default)]
pub struct Secp256k1;

impl Curve for Secp256k1 {
    fn name(&self) -> &'static str {
        SECP256K1_NAME
    }

    fn seed_domain(&self) -> &'static [u8] {
        &BIP32_DOMAIN_SEPARATOR
    }

    fn is_valid_private_key(&self, private_key: &PrivateKeyBytes) -> bool {
        SecretKey::from_slice(private_key).is_ok()
    }

    fn public_key(&self, private_key: &PrivateKeyBytes) -> Result<PublicKeyBytes> {
        let secret_key = SecretKey::from_slice(private_key)?;
        Ok(PublicKey::from_secret_key_global(&secret_key).serialize())
    }

    fn derive_private_key(&self, parent: &PrivateKeyBytes, tweak: &[u8; KEY_SIZE]) -> Result<Zeroizing<PrivateKeyBytes>> {
        // We should technically loop here if the child key is zero or the
        // tweak overflows the order of the underlying elliptic curve group,
        // however per "Child key derivation (CKD) functions":
        // https://github.com/bitcoin/bips/blob/master/bip-0032.mediawiki#child-key-derivation-ckd-functions
        //
        // > "Note: this has probability lower than 1 in 2^127."
        //
        // ...so instead, we simply return an error if this were ever to happen.
        let parent = SecretKey::from_slice(parent).map_err(|_| Error::DerivationFailure("invalid parent private key"))?;
        let tweak = Scalar::from_be_bytes(*tweak)?;
        let child = parent.add_tweak(&tweak).map_err(|_| Error::DerivationFailure("derived private key is invalid"))?;
        Ok(Zeroizing::new(child.secret_bytes()))
    }

    fn derive_public_key(&self, parent: &PublicKeyBytes, tweak: &[u8; KEY_SIZE]) -> Result<PublicKeyBytes> {
        let parent = PublicKey::from_slice(parent).map_err(|_| Error::DerivationFailure("invalid parent public key"))?;
        let tweak = Scalar::from_be_bytes(*tweak)?;
        let child = parent.add_exp_tweak(SECP256K1, &tweak).map_err(|_| Error::DerivationFailure("derived public key is invalid"))?;
        Ok(child.serialize())
    }
}
