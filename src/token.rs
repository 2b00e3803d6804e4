//! Ownership tokens authorizing mutate-on-write.

use std::fmt;
use std::sync::Arc;

/// Allocation-unique identity marking nodes owned by one mutable view.
///
/// A node created under a token may be edited in place by any holder of
/// a token with the same identity; all other holders must copy. Identity
/// is the allocation itself, never the contents — two tokens compare
/// equal only when one is a clone of the other.
#[derive(Clone)]
pub(crate) struct OwnerToken(Arc<()>);

impl OwnerToken {
    /// Creates a fresh token distinct from every existing one.
    pub(crate) fn new() -> Self {
        Self(Arc::new(()))
    }

    /// Returns `true` if both tokens share one allocation.
    pub(crate) fn same(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for OwnerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OwnerToken({:p})", Arc::as_ptr(&self.0))
    }
}
