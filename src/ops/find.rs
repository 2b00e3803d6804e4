//! Lookup operation — traverses the trie to find a datum.

use crate::node::{self, Node};

/// Searches the subtree rooted at `node` for a datum with the given hash
/// accepted by `matches`.
///
/// Absence is `None`; the caller never confuses it with a stored value.
pub(crate) fn find<'a, D, M>(
    node: &'a Node<D>,
    hash: u32,
    shift: u32,
    matches: &M,
) -> Option<&'a D>
where
    M: Fn(&D) -> bool,
{
    match node {
        Node::Inner(inner) => {
            let bit = node::mask(node::fragment(hash, shift));

            if inner.data_map & bit != 0 {
                // Position has an inline datum.
                let idx = node::index(inner.data_map, bit);
                let datum = &inner.data[idx];
                matches(datum).then_some(datum)
            } else if inner.node_map & bit != 0 {
                // Position has a child subtree — recurse.
                let idx = node::index(inner.node_map, bit);
                find(
                    &inner.children[idx],
                    hash,
                    shift + node::BITS_PER_LEVEL,
                    matches,
                )
            } else {
                // Position is empty.
                None
            }
        }
        Node::Collision(col) => {
            if col.hash != hash {
                return None;
            }
            // Linear search through collision entries.
            col.entries.iter().find(|d| matches(d))
        }
    }
}
