//! Removal — copy-path-on-write delete with canonical collapse.
//!
//! Keeping the trie canonical means a node left with a single inline
//! datum and no children must not survive below the root: the parent
//! pulls the datum back inline, cascading one level per unwind.

use std::sync::Arc;

use crate::node::{self, InnerNode, Node};
use crate::ops::{ChangeDetails, edit_collision, edit_inner, is_owned};
use crate::token::OwnerToken;

/// Removes the datum with the given hash accepted by `matches` from the
/// subtree in `slot`.
///
/// The slot is rewritten only when a datum was removed; `details.old_data`
/// then carries it.
pub(crate) fn remove<D, M>(
    mutator: Option<&OwnerToken>,
    slot: &mut Arc<Node<D>>,
    hash: u32,
    shift: u32,
    details: &mut ChangeDetails<D>,
    matches: &M,
) where
    D: Clone,
    M: Fn(&D) -> bool,
{
    match &**slot {
        Node::Inner(_) => remove_inner(mutator, slot, hash, shift, details, matches),
        Node::Collision(_) => remove_collision(mutator, slot, hash, details, matches),
    }
}

// ---------------------------------------------------------------------------
// Inner node remove
// ---------------------------------------------------------------------------

fn remove_inner<D, M>(
    mutator: Option<&OwnerToken>,
    slot: &mut Arc<Node<D>>,
    hash: u32,
    shift: u32,
    details: &mut ChangeDetails<D>,
    matches: &M,
) where
    D: Clone,
    M: Fn(&D) -> bool,
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
        {
            let Node::Inner(inner) = &**slot else {
                unreachable!()
            };
            let datum = &inner.data[idx];
            if !matches(datum) {
                return;
            }
            details.modified = true;
            details.old_data = Some(datum.clone());
        }

        let new_data_map = data_map & !bit;
        edit_inner(slot, mutator, |inner| {
            inner.data.remove(idx);
            inner.data_map = new_data_map;
        });
    } else if node_map & bit != 0 {
        // Position has a child subtree — recurse. An owned parent hands
        // its child slot straight to the recursion.
        let idx = node::index(node_map, bit);
        let mut recursed_in_place = false;
        if is_owned(slot, mutator) {
            if let Some(Node::Inner(inner)) = Arc::get_mut(slot) {
                remove(
                    mutator,
                    &mut inner.children[idx],
                    hash,
                    shift + node::BITS_PER_LEVEL,
                    details,
                    matches,
                );
                recursed_in_place = true;
            }
        }
        if !recursed_in_place {
            // Shared parent: recurse on a detached handle and graft it
            // back only on change.
            let mut child = {
                let Node::Inner(inner) = &**slot else {
                    unreachable!()
                };
                Arc::clone(&inner.children[idx])
            };
            remove(
                mutator,
                &mut child,
                hash,
                shift + node::BITS_PER_LEVEL,
                details,
                matches,
            );
            if details.modified {
                edit_inner(slot, mutator, |inner| inner.children[idx] = child);
            }
        }

        if details.modified {
            // Canonical collapse: a child down to one inline datum is
            // pulled back into this node.
            let collapse = {
                let Node::Inner(inner) = &**slot else {
                    unreachable!()
                };
                inner.children[idx].has_single_data()
            };
            if collapse {
                inline_single_child(mutator, slot, bit, idx);
            }
        }
    }
    // Position empty in both maps: nothing to remove.
}

/// Replaces the single-datum child at `child_idx` with its datum inlined
/// into the parent at `bit`.
fn inline_single_child<D: Clone>(
    mutator: Option<&OwnerToken>,
    slot: &mut Arc<Node<D>>,
    bit: u32,
    child_idx: usize,
) {
    let (datum, new_data_map, new_node_map, data_idx) = {
        let Node::Inner(inner) = &**slot else {
            unreachable!()
        };
        let datum = inner.children[child_idx].data()[0].clone();
        let new_data_map = inner.data_map | bit;
        (
            datum,
            new_data_map,
            inner.node_map & !bit,
            node::index(new_data_map, bit),
        )
    };

    edit_inner(slot, mutator, |inner| {
        inner.children.remove(child_idx);
        inner.data.insert(data_idx, datum);
        inner.data_map = new_data_map;
        inner.node_map = new_node_map;
    });
}

// ---------------------------------------------------------------------------
// Collision node remove
// ---------------------------------------------------------------------------

fn remove_collision<D, M>(
    mutator: Option<&OwnerToken>,
    slot: &mut Arc<Node<D>>,
    hash: u32,
    details: &mut ChangeDetails<D>,
    matches: &M,
) where
    D: Clone,
    M: Fn(&D) -> bool,
{
    let (found, len) = {
        let Node::Collision(col) = &**slot else {
            unreachable!()
        };
        if col.hash != hash {
            return;
        }
        (
            col.entries.iter().position(|e| matches(e)),
            col.entries.len(),
        )
    };
    let Some(i) = found else {
        return;
    };

    details.modified = true;
    {
        let Node::Collision(col) = &**slot else {
            unreachable!()
        };
        details.old_data = Some(col.entries[i].clone());
    }

    if len == 2 {
        // One entry remains — collapse to a single-datum inner node so
        // the parent inlines it. The bit position is computed at level 0,
        // which is only consulted if the node ever becomes a root.
        let remaining = {
            let Node::Collision(col) = &**slot else {
                unreachable!()
            };
            col.entries[1 - i].clone()
        };
        *slot = Arc::new(Node::Inner(InnerNode {
            owner: mutator.cloned(),
            data_map: node::mask(node::fragment(hash, 0)),
            node_map: 0,
            data: vec![remaining],
            children: Vec::new(),
        }));
    } else {
        edit_collision(slot, mutator, |col| {
            col.entries.remove(i);
        });
    }
}
