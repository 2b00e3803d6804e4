//! Recursive trie operations and their change descriptor.
//!
//! The three operations take the probe hash pre-computed and reach back to
//! the caller through closures for equality, hashing and replacement, so
//! that one engine serves the plain and the sequenced variants alike.

use std::sync::Arc;

use crate::node::{CollisionNode, InnerNode, Node};
use crate::token::OwnerToken;

mod find;
mod remove;
mod update;

pub(crate) use find::find;
pub(crate) use remove::remove;
pub(crate) use update::update;

/// Result of a replace combinator.
///
/// `Keep` signals that the datum already present should stay untouched —
/// the rendition of a combinator handing back the old datum — and leaves
/// the trie unmodified.
pub(crate) enum Replacement<D> {
    /// Keep the existing datum; the trie does not change.
    Keep,
    /// Overwrite the existing datum with this one.
    Replace(D),
}

/// Change descriptor produced by a single update or remove call.
#[derive(Debug)]
pub(crate) struct ChangeDetails<D> {
    /// Whether the trie changed.
    pub(crate) modified: bool,
    /// Whether a matching datum was already present.
    pub(crate) updated: bool,
    /// The prior datum, for callers that need to recover the old value
    /// or the dislodged sequence number.
    pub(crate) old_data: Option<D>,
}

impl<D> ChangeDetails<D> {
    /// Creates a descriptor reporting no change.
    pub(crate) const fn new() -> Self {
        Self {
            modified: false,
            updated: false,
            old_data: None,
        }
    }
}

/// Returns `true` when `mutator` may edit the node in `slot` in place.
///
/// Requires a token identical to the one the node was created under;
/// tokens compare by allocation, never by value.
pub(crate) fn is_owned<D>(slot: &Arc<Node<D>>, mutator: Option<&OwnerToken>) -> bool {
    match (mutator, slot.owner()) {
        (Some(token), Some(owner)) => token.same(owner),
        _ => false,
    }
}

/// Applies `edit` to the inner node in `slot`: in place when `mutator`
/// owns the node exclusively, otherwise on a copy-on-write duplicate
/// stamped with the caller's token.
pub(crate) fn edit_inner<D: Clone>(
    slot: &mut Arc<Node<D>>,
    mutator: Option<&OwnerToken>,
    edit: impl FnOnce(&mut InnerNode<D>),
) {
    if is_owned(slot, mutator) {
        if let Some(Node::Inner(inner)) = Arc::get_mut(slot) {
            edit(inner);
            return;
        }
    }
    let Node::Inner(inner) = &**slot else {
        unreachable!()
    };
    let mut copy = inner.cow_copy(mutator);
    edit(&mut copy);
    *slot = Arc::new(Node::Inner(copy));
}

/// Applies `edit` to the collision node in `slot`: in place when
/// `mutator` owns the node exclusively, otherwise on a copy-on-write
/// duplicate stamped with the caller's token.
pub(crate) fn edit_collision<D: Clone>(
    slot: &mut Arc<Node<D>>,
    mutator: Option<&OwnerToken>,
    edit: impl FnOnce(&mut CollisionNode<D>),
) {
    if is_owned(slot, mutator) {
        if let Some(Node::Collision(col)) = Arc::get_mut(slot) {
            edit(col);
            return;
        }
    }
    let Node::Collision(col) = &**slot else {
        unreachable!()
    };
    let mut copy = col.cow_copy(mutator);
    edit(&mut copy);
    *slot = Arc::new(Node::Collision(copy));
}
