//! BIP32 / SLIP-10 hierarchical deterministic key nodes.
//!
//! An [`HDNode`] is created from a seed or from explicit fields, derived in
//! place along child numbers or paths, and exchanged as Base58Check
//! extended keys with caller-chosen version numbers.

mod address;
mod attrs;
mod cache;
mod child_number;
mod config;
mod curve;
mod derivation_path;
mod derive;
mod error;
mod node;
mod result;
mod serialize;
mod xkey;

pub mod types;
pub mod version;

pub use address::ADDRESS_MAX_LEN;
pub use attrs::ExtendedKeyAttrs;
pub use cache::PathCache;
pub use child_number::ChildNumber;
pub use config::HdConfig;
pub use curve::{Curve, CurveRegistry, Ed25519, Secp256k1, ED25519_NAME, SECP256K1_NAME};
pub use derivation_path::DerivationPath;
pub use error::Error;
pub use node::{HDNode, NodeParams, RawNodeParams};
pub use result::Result;
pub use types::*;
pub use version::KeyVersions;
pub use xkey::ExtendedKey;
