//! TOML-backed settings for building and exchanging HD nodes.

use crate::{version, CurveRegistry, DerivationPath, HDNode, KeyVersions, Result, Version, SECP256K1_NAME};
use serde::{Deserialize, Serialize};

/// Node settings, e.g.
///
/// ```toml
/// curve = "secp256k1"
/// version-public = 0x043587cf
/// version-private = 0x04358394
/// address-version = 0x6f
/// path = "m/44'/1'/0'"
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct HdConfig {
    pub curve: String,
    pub version_public: Version,
    pub version_private: Version,
    pub address_version: u32,
    /// Path from the master node to the node handed out by [`HdConfig::root_from_seed`].
    pub path: DerivationPath,
}

impl Default for HdConfig {
    fn default() -> Self {
        Self {
            curve: SECP256K1_NAME.to_string(),
            version_public: version::XPUB,
            version_private: version::XPRV,
            address_version: 0,
            path: DerivationPath::default(),
        }
    }
}

impl HdConfig {
    pub fn from_toml_str(toml: &str) -> Result<Self> {
        Ok(toml::from_str::<HdConfig>(toml)?)
    }

    pub fn versions(&self) -> KeyVersions {
        KeyVersions::new(self.version_public, self.version_private)
    }

    /// Master node for `seed` on the configured curve, derived along the configured path.
    pub fn root_from_seed(&self, registry: &CurveRegistry, seed: &[u8]) -> Result<HDNode> {
        let mut node = HDNode::from_seed(registry, seed, &self.curve)?;
        node.derive_path(&self.path)?;
        Ok(node)
    }

    /// Parse an extended key on the configured curve with the configured versions.
    pub fn deserialize(&self, registry: &CurveRegistry, encoded: &str) -> Result<HDNode> {
        HDNode::deserialize(encoded, self.version_public, self.version_private, registry.get(&self.curve)?)
    }

    pub fn address(&self, node: &HDNode) -> Result<String> {
        node.address(self.address_version)
    }
}
