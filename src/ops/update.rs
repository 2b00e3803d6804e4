//! Insertion and replacement — one update path for every write.
//!
//! The replace combinator is the only thing that differs between a plain
//! insert, a map value overwrite, and the sequenced move-to-front and
//! move-to-back operations, so all of them funnel through [`update`].

use std::sync::Arc;

use crate::node::{self, CollisionNode, InnerNode, Node};
use crate::ops::{ChangeDetails, Replacement, edit_collision, edit_inner, is_owned};
use crate::token::OwnerToken;

/// Inserts `data` into the subtree in `slot`, or resolves the conflict
/// with an equal datum through `replace`.
///
/// The slot is rewritten only when the trie changes; `details` records
/// what happened. Nodes owned by `mutator` are edited in place, all
/// others are copied along the path.
#[allow(clippy::too_many_arguments)]
pub(crate) fn update<D, R, E, H>(
    mutator: Option<&OwnerToken>,
    slot: &mut Arc<Node<D>>,
    data: D,
    hash: u32,
    shift: u32,
    details: &mut ChangeDetails<D>,
    replace: &R,
    eq: &E,
    hash_fn: &H,
) where
    D: Clone,
    R: Fn(&D, D) -> Replacement<D>,
    E: Fn(&D, &D) -> bool,
    H: Fn(&D) -> u32,
{
    match &**slot {
        Node::Inner(_) => {
            update_inner(mutator, slot, data, hash, shift, details, replace, eq, hash_fn);
        }
        Node::Collision(_) => {
            update_collision(mutator, slot, data, hash, details, replace, eq);
        }
    }
}

// ---------------------------------------------------------------------------
// Inner node update
// ---------------------------------------------------------------------------

/// What the probe phase decided for an occupied data slot.
enum DataSlotOutcome<D> {
    /// The combinator kept the existing datum.
    Unchanged,
    /// Overwrite the datum in place.
    Overwrite(D),
    /// An unequal datum occupies the slot — push both one level down.
    Split {
        existing: D,
        existing_hash: u32,
        data: D,
    },
}

#[allow(clippy::too_many_arguments)]
fn update_inner<D, R, E, H>(
    mutator: Option<&OwnerToken>,
    slot: &mut Arc<Node<D>>,
    data: D,
    hash: u32,
    shift: u32,
    details: &mut ChangeDetails<D>,
    replace: &R,
    eq: &E,
    hash_fn: &H,
) where
    D: Clone,
    R: Fn(&D, D) -> Replacement<D>,
    E: Fn(&D, &D) -> bool,
    H: Fn(&D) -> u32,
{
    let (data_map, node_map) = {
        let Node::Inner(inner) = &**slot else {
            unreachable!()
        };
        (inner.data_map, inner.node_map)
    };
    let bit = node::mask(node::fragment(hash, shift));

    if data_map & bit != 0 {
        let idx = node::index(data_map, bit);

        // Probe under a shared borrow; mutation follows once it ends.
        let outcome = {
            let Node::Inner(inner) = &**slot else {
                unreachable!()
            };
            let existing = &inner.data[idx];
            if eq(existing, &data) {
                details.updated = true;
                details.old_data = Some(existing.clone());
                match replace(existing, data) {
                    Replacement::Keep => DataSlotOutcome::Unchanged,
                    Replacement::Replace(new_data) => DataSlotOutcome::Overwrite(new_data),
                }
            } else {
                DataSlotOutcome::Split {
                    existing: existing.clone(),
                    existing_hash: hash_fn(existing),
                    data,
                }
            }
        };

        match outcome {
            DataSlotOutcome::Unchanged => {}
            DataSlotOutcome::Overwrite(new_data) => {
                details.modified = true;
                edit_inner(slot, mutator, |inner| inner.data[idx] = new_data);
            }
            DataSlotOutcome::Split {
                existing,
                existing_hash,
                data,
            } => {
                details.modified = true;
                let child = merge_two(
                    mutator,
                    existing,
                    existing_hash,
                    data,
                    hash,
                    shift + node::BITS_PER_LEVEL,
                );
                let new_data_map = data_map & !bit;
                let new_node_map = node_map | bit;
                let child_idx = node::index(new_node_map, bit);
                edit_inner(slot, mutator, |inner| {
                    inner.data.remove(idx);
                    inner.children.insert(child_idx, child);
                    inner.data_map = new_data_map;
                    inner.node_map = new_node_map;
                });
            }
        }
    } else if node_map & bit != 0 {
        // Position has a child subtree — recurse. An owned parent hands
        // its child slot straight to the recursion.
        let idx = node::index(node_map, bit);
        if is_owned(slot, mutator) {
            if let Some(Node::Inner(inner)) = Arc::get_mut(slot) {
                update(
                    mutator,
                    &mut inner.children[idx],
                    data,
                    hash,
                    shift + node::BITS_PER_LEVEL,
                    details,
                    replace,
                    eq,
                    hash_fn,
                );
                return;
            }
        }
        // Shared parent: recurse on a detached handle and graft it back
        // only on change, keeping the no-op path copy-free.
        let mut child = {
            let Node::Inner(inner) = &**slot else {
                unreachable!()
            };
            Arc::clone(&inner.children[idx])
        };
        update(
            mutator,
            &mut child,
            data,
            hash,
            shift + node::BITS_PER_LEVEL,
            details,
            replace,
            eq,
            hash_fn,
        );
        if details.modified {
            edit_inner(slot, mutator, |inner| inner.children[idx] = child);
        }
    } else {
        // Position empty — inline the new datum.
        details.modified = true;
        let new_data_map = data_map | bit;
        let idx = node::index(new_data_map, bit);
        edit_inner(slot, mutator, |inner| {
            inner.data.insert(idx, data);
            inner.data_map = new_data_map;
        });
    }
}

// ---------------------------------------------------------------------------
// Collision node update
// ---------------------------------------------------------------------------

enum CollisionOutcome<D> {
    Unchanged,
    Overwrite(usize, D),
    Append(D),
}

fn update_collision<D, R, E>(
    mutator: Option<&OwnerToken>,
    slot: &mut Arc<Node<D>>,
    data: D,
    hash: u32,
    details: &mut ChangeDetails<D>,
    replace: &R,
    eq: &E,
) where
    D: Clone,
    R: Fn(&D, D) -> Replacement<D>,
    E: Fn(&D, &D) -> bool,
{
    let outcome = {
        let Node::Collision(col) = &**slot else {
            unreachable!()
        };
        // Every datum routed below the last fragment carries the full hash.
        debug_assert_eq!(col.hash, hash);
        match col.entries.iter().position(|e| eq(e, &data)) {
            Some(i) => {
                details.updated = true;
                details.old_data = Some(col.entries[i].clone());
                match replace(&col.entries[i], data) {
                    Replacement::Keep => CollisionOutcome::Unchanged,
                    Replacement::Replace(new_data) => CollisionOutcome::Overwrite(i, new_data),
                }
            }
            None => CollisionOutcome::Append(data),
        }
    };

    match outcome {
        CollisionOutcome::Unchanged => {}
        CollisionOutcome::Overwrite(i, new_data) => {
            details.modified = true;
            edit_collision(slot, mutator, |col| col.entries[i] = new_data);
        }
        CollisionOutcome::Append(new_data) => {
            details.modified = true;
            edit_collision(slot, mutator, |col| col.entries.push(new_data));
        }
    }
}

// ---------------------------------------------------------------------------
// Subtree creation
// ---------------------------------------------------------------------------

/// Builds a subtree holding two data that collide at the previous level.
///
/// Descends while the hash fragments keep matching, wrapping each level
/// under a single child, and resolves a full 32-bit collision with a
/// collision node.
fn merge_two<D>(
    mutator: Option<&OwnerToken>,
    d0: D,
    h0: u32,
    d1: D,
    h1: u32,
    shift: u32,
) -> Arc<Node<D>> {
    if shift >= node::HASH_BITS {
        debug_assert_eq!(h0, h1);
        return Arc::new(Node::Collision(CollisionNode {
            owner: mutator.cloned(),
            hash: h0,
            entries: vec![d0, d1],
        }));
    }

    let f0 = node::fragment(h0, shift);
    let f1 = node::fragment(h1, shift);

    if f0 == f1 {
        let child = merge_two(mutator, d0, h0, d1, h1, shift + node::BITS_PER_LEVEL);
        Arc::new(Node::Inner(InnerNode {
            owner: mutator.cloned(),
            data_map: 0,
            node_map: node::mask(f0),
            data: Vec::new(),
            children: vec![child],
        }))
    } else {
        let data = if f0 < f1 { vec![d0, d1] } else { vec![d1, d0] };
        Arc::new(Node::Inner(InnerNode {
            owner: mutator.cloned(),
            data_map: node::mask(f0) | node::mask(f1),
            node_map: 0,
            data,
            children: Vec::new(),
        }))
    }
}
