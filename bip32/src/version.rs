//! Well-known extended key version numbers.
//!
//! The codec never hardcodes a version: every serialize and deserialize call
//! takes the numbers it should use. These constants cover the common
//! Bitcoin-family deployments.

use crate::Version;

pub const XPUB: Version = 0x0488_B21E;
pub const XPRV: Version = 0x0488_ADE4;
pub const TPUB: Version = 0x0435_87CF;
pub const TPRV: Version = 0x0435_8394;
pub const YPUB: Version = 0x049D_7CB2;
pub const YPRV: Version = 0x049D_7878;
pub const ZPUB: Version = 0x04B2_4746;
pub const ZPRV: Version = 0x04B2_430C;

/// Public / private version pair used by one deployment.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct KeyVersions {
    pub public: Version,
    pub private: Version,
}

impl KeyVersions {
    pub const MAINNET: KeyVersions = KeyVersions { public: XPUB, private: XPRV };
    pub const TESTNET: KeyVersions = KeyVersions { public: TPUB, private: TPRV };
    pub const BIP49: KeyVersions = KeyVersions { public: YPUB, private: YPRV };
    pub const BIP84: KeyVersions = KeyVersions { public: ZPUB, private: ZPRV };

    pub const fn new(public: Version, private: Version) -> Self {
        Self { public, private }
    }
}

impl Default for KeyVersions {
    fn default() -> Self {
        KeyVersions::MAINNET
    }
}
