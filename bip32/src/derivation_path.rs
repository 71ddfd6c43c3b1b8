//! `m/44'/0'/0'` style derivation paths.

use crate::{ChildNumber, Error, Result};
use serde::{Deserialize, Serialize};
use std::{
    fmt::{self, Display},
    str::FromStr,
};

/// Marker for the master node every path starts from.
const ROOT: &str = "m";

/// Sequence of child numbers leading from a master node to a descendant.
///
/// Text form is `m` followed by `/index` segments, hardened indexes carrying a
/// `'` (`h` and `H` are accepted when parsing).
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DerivationPath(Vec<ChildNumber>);

impl DerivationPath {
    pub fn iter(&self) -> impl Iterator<Item = ChildNumber> + '_ {
        self.0.iter().copied()
    }

    /// Does the path point at the master node itself?
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Path without its last index, `None` for `m`.
    pub fn parent(&self) -> Option<Self> {
        self.0.split_last().map(|(_, parent)| Self(parent.to_vec()))
    }

    /// This path extended by `child_number`.
    pub fn child(&self, child_number: ChildNumber) -> Self {
        let mut path = self.clone();
        path.push(child_number);
        path
    }

    pub fn push(&mut self, child_number: ChildNumber) {
        self.0.push(child_number)
    }

    /// Whether every index is hardened, i.e. the path is usable on curves
    /// without public derivation.
    pub fn is_hardened(&self) -> bool {
        self.0.iter().all(ChildNumber::is_hardened)
    }
}

impl AsRef<[ChildNumber]> for DerivationPath {
    fn as_ref(&self) -> &[ChildNumber] {
        &self.0
    }
}

impl Display for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(ROOT)?;
        self.0.iter().try_for_each(|child_number| write!(f, "/{child_number}"))
    }
}

impl FromStr for DerivationPath {
    type Err = Error;

    fn from_str(path: &str) -> Result<DerivationPath> {
        let mut segments = path.split('/');
        if segments.next() != Some(ROOT) {
            return Err(Error::custom(format!("derivation path `{path}` does not start with `{ROOT}`")));
        }

        let path = segments.map(ChildNumber::from_str).collect::<Result<Vec<_>>>()?;
        if path.len() > usize::from(u8::MAX) {
            return Err(Error::Depth);
        }

        Ok(DerivationPath(path))
    }
}

impl TryFrom<String> for DerivationPath {
    type Error = Error;

    fn try_from(path: String) -> Result<Self> {
        path.parse()
    }
}

impl From<DerivationPath> for String {
    fn from(path: DerivationPath) -> String {
        path.to_string()
    }
}

impl From<Vec<ChildNumber>> for DerivationPath {
    fn from(path: Vec<ChildNumber>) -> Self {
        DerivationPath(path)
    }
}

impl FromIterator<ChildNumber> for DerivationPath {
    fn from_iter<T: IntoIterator<Item = ChildNumber>>(iter: T) -> Self {
        DerivationPath(iter.into_iter().collect())
    }
}

impl Extend<ChildNumber> for DerivationPath {
    fn extend<T: IntoIterator<Item = ChildNumber>>(&mut self, iter: T) {
        self.0.extend(iter)
    }
}

impl IntoIterator for DerivationPath {
    type Item = ChildNumber;
    type IntoIter = std::vec::IntoIter<ChildNumber>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
