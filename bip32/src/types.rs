//! Common byte-array types shared by the HD node, the curve backends and
//! the extended key codec.

/// Size of a private key, a chain code and one half of an HMAC-SHA512 output.
pub const KEY_SIZE: usize = 32;

/// Size of a compressed public key (SEC1 tag + 32 bytes).
pub const PUBLIC_KEY_SIZE: usize = KEY_SIZE + 1;

/// Maximum number of indexes accepted by a single batched path derivation.
pub const MAX_PATH_LEN: usize = 32;

/// Chain code: extension for both private and public keys which provides an
/// additional 256-bits of entropy.
pub type ChainCode = [u8; KEY_SIZE];

/// Derivation depth.
pub type Depth = u8;

/// BIP32 key fingerprints.
pub type KeyFingerprint = [u8; 4];

/// RIPEMD160(SHA256(public key)).
pub type KeyHash = [u8; 20];

/// Bytes which represent a private key.
pub type PrivateKeyBytes = [u8; KEY_SIZE];

/// Bytes which represent a compressed public key.
pub type PublicKeyBytes = [u8; PUBLIC_KEY_SIZE];

/// Extended key version number (e.g. `0x0488B21E` for `xpub`).
pub type Version = u32;

/// HMAC with SHA-512.
pub type HmacSha512 = hmac::Hmac<sha2::Sha512>;
