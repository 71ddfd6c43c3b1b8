//! Memoized path derivation.
//!
//! Wallets derive many sibling addresses (`m/44'/0'/0'/0/i` for a range of
//! `i`). [`PathCache`] remembers the node reached by every index except the
//! last one, so repeated siblings only pay for one CKD step.

use crate::{ChildNumber, Error, HDNode, MAX_PATH_LEN, Result};

/// One-entry cache for [`HDNode::derive_path_cached`].
///
/// The cached nodes are zeroized when replaced, cleared or dropped.
#[derive(Default)]
pub struct PathCache {
    root: Option<HDNode>,
    prefix: Vec<ChildNumber>,
    node: Option<HDNode>,
}

impl PathCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the cached entry.
    pub fn clear(&mut self) {
        self.root = None;
        self.prefix.clear();
        self.node = None;
    }

    pub fn is_empty(&self) -> bool {
        self.node.is_none()
    }

    fn lookup(&self, root: &HDNode, prefix: &[ChildNumber]) -> Option<&HDNode> {
        match (&self.root, &self.node) {
            (Some(cached_root), Some(node)) if self.prefix == prefix && cached_root == root => Some(node),
            _ => None,
        }
    }
}

impl HDNode {
    /// Same result as [`HDNode::derive_path`], reusing `cache` for every
    /// index but the last.
    ///
    /// Paths shorter than two indexes bypass the cache. A failed derivation
    /// blanks the node and leaves the cache untouched.
    pub fn derive_path_cached<P: AsRef<[ChildNumber]>>(&mut self, path: P, cache: &mut PathCache) -> Result<()> {
        let path = path.as_ref();
        if path.len() > MAX_PATH_LEN {
            return Err(Error::InvalidInput("path cannot be longer than 32 indexes"));
        }

        let Some((&last, prefix)) = path.split_last().filter(|_| path.len() >= 2) else {
            return self.derive_path(path);
        };

        if let Some(node) = cache.lookup(self, prefix) {
            log::trace!("path cache hit at depth {}", node.depth());
            *self = node.clone();
            return self.derive(last);
        }

        log::trace!("path cache miss, deriving {} indexes", prefix.len());
        let root = self.clone();
        self.derive_path(prefix)?;

        cache.root = Some(root);
        cache.prefix = prefix.to_vec();
        cache.node = Some(self.clone());

        self.derive(last)
    }
}
