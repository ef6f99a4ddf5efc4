//! Height-balanced search tree over an index arena.
//!
//! [`AvlTree`] stores its nodes in a `Vec` addressed by `usize`, the same
//! indices the sweep uses for its linked point nodes, so a point's list node
//! and tree node share one id. Besides the usual parent/child links every node
//! is threaded into an in-order doubly linked list (`prev`/`next`), which gives
//! O(1) neighbor access once a node has been located.
//!
//! The tree never compares keys itself: insertion happens relative to a known
//! anchor, and lookups take a comparator closure (probe vs. node), in the
//! spirit of [`slice::binary_search_by`].
//!
//! Each node also carries a dominance record (`domr`), the coordinate value of
//! the point currently known to dominate it.

use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

impl Side {
    fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

#[derive(Debug, Clone)]
struct TreeNode {
    parent: Option<usize>,
    left: Option<usize>,
    right: Option<usize>,
    prev: Option<usize>,
    next: Option<usize>,
    depth: u32,
    domr: f64,
}

impl Default for TreeNode {
    fn default() -> Self {
        Self {
            parent: None,
            left: None,
            right: None,
            prev: None,
            next: None,
            depth: 1,
            domr: f64::INFINITY,
        }
    }
}

/// An AVL tree whose nodes live in a fixed arena of `capacity` slots.
#[derive(Debug, Clone)]
pub(crate) struct AvlTree {
    nodes: Vec<TreeNode>,
    top: Option<usize>,
}

impl AvlTree {
    /// Creates an empty tree able to hold node ids `0..capacity`.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: vec![TreeNode::default(); capacity],
            top: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.top.is_none()
    }

    /// Forgets every node. Node payloads (`domr`) are kept.
    pub fn clear(&mut self) {
        self.top = None;
    }

    /// In-order predecessor of `node`.
    ///
    /// For an unlinked node this is the predecessor it had when it was removed.
    pub fn prev(&self, node: usize) -> Option<usize> {
        self.nodes[node].prev
    }

    /// In-order successor of `node`.
    pub fn next(&self, node: usize) -> Option<usize> {
        self.nodes[node].next
    }

    pub fn domr(&self, node: usize) -> f64 {
        self.nodes[node].domr
    }

    pub fn set_domr(&mut self, node: usize, value: f64) {
        self.nodes[node].domr = value;
    }

    /// Makes `node` the single element of an empty tree.
    pub fn insert_top(&mut self, node: usize) {
        assert!(self.is_empty(), "insert_top requires an empty tree");

        self.reset_node(node);
        let n = &mut self.nodes[node];
        n.prev = None;
        n.next = None;
        n.parent = None;
        self.top = Some(node);
    }

    /// Inserts `node` as the in-order predecessor of `anchor`.
    ///
    /// # Panics
    /// Panics if `anchor` already has a left child.
    pub fn insert_before(&mut self, anchor: usize, node: usize) {
        assert!(
            self.nodes[anchor].left.is_none(),
            "insert_before: anchor {anchor} already has a left child"
        );

        self.reset_node(node);
        let anchor_prev = self.nodes[anchor].prev;
        {
            let n = &mut self.nodes[node];
            n.next = Some(anchor);
            n.parent = Some(anchor);
            n.prev = anchor_prev;
        }
        if let Some(p) = anchor_prev {
            self.nodes[p].next = Some(node);
        }
        self.nodes[anchor].prev = Some(node);
        self.nodes[anchor].left = Some(node);

        self.rebalance(Some(anchor));
    }

    /// Inserts `node` as the in-order successor of `anchor`.
    ///
    /// # Panics
    /// Panics if `anchor` already has a right child.
    pub fn insert_after(&mut self, anchor: usize, node: usize) {
        assert!(
            self.nodes[anchor].right.is_none(),
            "insert_after: anchor {anchor} already has a right child"
        );

        self.reset_node(node);
        let anchor_next = self.nodes[anchor].next;
        {
            let n = &mut self.nodes[node];
            n.prev = Some(anchor);
            n.parent = Some(anchor);
            n.next = anchor_next;
        }
        if let Some(nx) = anchor_next {
            self.nodes[nx].prev = Some(node);
        }
        self.nodes[anchor].next = Some(node);
        self.nodes[anchor].right = Some(node);

        self.rebalance(Some(anchor));
    }

    /// Walks down from the root steering with `cmp(node)`, which must report
    /// how the probe compares to `node`.
    ///
    /// Returns the last visited node together with `Less` if the probe belongs
    /// before it, `Greater` if after, `Equal` on an exact match. `None` for an
    /// empty tree.
    pub fn search_closest<F>(&self, mut cmp: F) -> Option<(usize, Ordering)>
    where
        F: FnMut(usize) -> Ordering,
    {
        let mut node = self.top?;
        loop {
            match cmp(node) {
                Ordering::Less => match self.nodes[node].left {
                    Some(left) => node = left,
                    None => return Some((node, Ordering::Less)),
                },
                Ordering::Greater => match self.nodes[node].right {
                    Some(right) => node = right,
                    None => return Some((node, Ordering::Greater)),
                },
                Ordering::Equal => return Some((node, Ordering::Equal)),
            }
        }
    }

    /// Removes `node` from the tree.
    ///
    /// The node's own `prev`/`next` are left untouched so callers can keep
    /// walking from a node they just removed.
    pub fn unlink(&mut self, node: usize) {
        let TreeNode {
            parent,
            left,
            right,
            prev,
            next,
            ..
        } = self.nodes[node].clone();

        if let Some(p) = prev {
            self.nodes[p].next = next;
        }
        if let Some(nx) = next {
            self.nodes[nx].prev = prev;
        }

        let slot = self.slot_of(node);

        let balance_from = match (left, right) {
            (None, _) => {
                self.set_slot(slot, right);
                if let Some(r) = right {
                    self.nodes[r].parent = parent;
                }
                parent
            }
            (Some(l), None) => {
                self.set_slot(slot, Some(l));
                self.nodes[l].parent = parent;
                parent
            }
            (Some(l), Some(r)) => {
                // the in-order predecessor takes the node's place
                let subst = prev.expect("node with a left subtree has a predecessor");
                let balance_from = if subst == l {
                    subst
                } else {
                    let subst_parent =
                        self.nodes[subst].parent.expect("predecessor below node has a parent");
                    let subst_left = self.nodes[subst].left;
                    self.nodes[subst_parent].right = subst_left;
                    if let Some(sl) = subst_left {
                        self.nodes[sl].parent = Some(subst_parent);
                    }
                    self.nodes[subst].left = Some(l);
                    self.nodes[l].parent = Some(subst);
                    subst_parent
                };
                self.nodes[subst].right = Some(r);
                self.nodes[subst].parent = parent;
                self.nodes[r].parent = Some(subst);
                self.set_slot(slot, Some(subst));
                Some(balance_from)
            }
        };

        self.rebalance(balance_from);
    }

    /// Iterates node ids in order.
    #[cfg(test)]
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        let mut first = self.top;
        while let Some(left) = first.and_then(|n| self.nodes[n].left) {
            first = Some(left);
        }
        std::iter::successors(first, move |&node| self.nodes[node].next)
    }

    fn reset_node(&mut self, node: usize) {
        let n = &mut self.nodes[node];
        n.left = None;
        n.right = None;
        n.depth = 1;
    }

    fn child(&self, node: usize, side: Side) -> Option<usize> {
        match side {
            Side::Left => self.nodes[node].left,
            Side::Right => self.nodes[node].right,
        }
    }

    fn set_child(&mut self, node: usize, side: Side, child: Option<usize>) {
        match side {
            Side::Left => self.nodes[node].left = child,
            Side::Right => self.nodes[node].right = child,
        }
        if let Some(c) = child {
            self.nodes[c].parent = Some(node);
        }
    }

    /// Where `node` hangs: `None` for the root, else its parent and side.
    fn slot_of(&self, node: usize) -> Option<(usize, Side)> {
        self.nodes[node].parent.map(|p| {
            if self.nodes[p].left == Some(node) {
                (p, Side::Left)
            } else {
                (p, Side::Right)
            }
        })
    }

    /// Replaces whatever hangs at `slot`; does not touch `value`'s parent.
    fn set_slot(&mut self, slot: Option<(usize, Side)>, value: Option<usize>) {
        match slot {
            None => self.top = value,
            Some((p, Side::Left)) => self.nodes[p].left = value,
            Some((p, Side::Right)) => self.nodes[p].right = value,
        }
    }

    fn depth(&self, node: Option<usize>) -> u32 {
        node.map_or(0, |n| self.nodes[n].depth)
    }

    fn update_depth(&mut self, node: usize) {
        let n = &self.nodes[node];
        let depth = self.depth(n.left).max(self.depth(n.right)) + 1;
        self.nodes[node].depth = depth;
    }

    /// The side that is more than one level deeper, if any.
    fn heavy_side(&self, node: usize) -> Option<Side> {
        let n = &self.nodes[node];
        let diff = self.depth(n.right) as i64 - self.depth(n.left) as i64;
        match diff {
            d if d < -1 => Some(Side::Left),
            d if d > 1 => Some(Side::Right),
            _ => None,
        }
    }

    /// Restores the balance invariant from `node` up to the root.
    fn rebalance(&mut self, mut cursor: Option<usize>) {
        while let Some(node) = cursor {
            let parent = self.nodes[node].parent;
            let slot = self.slot_of(node);

            match self.heavy_side(node) {
                Some(heavy) => self.rotate(node, heavy, slot, parent),
                None => self.update_depth(node),
            }

            cursor = parent;
        }
    }

    /// Single or double rotation lifting the `heavy` child (or grandchild)
    /// into `node`'s slot.
    fn rotate(&mut self, node: usize, heavy: Side, slot: Option<(usize, Side)>, parent: Option<usize>) {
        let light = heavy.opposite();
        let child = self
            .child(node, heavy)
            .expect("heavy side of an unbalanced node is non-empty");

        if self.depth(self.child(child, heavy)) >= self.depth(self.child(child, light)) {
            let inner = self.child(child, light);
            self.set_child(node, heavy, inner);
            self.set_child(child, light, Some(node));
            self.set_slot(slot, Some(child));
            self.nodes[child].parent = parent;

            self.update_depth(node);
            self.update_depth(child);
        } else {
            let grandchild = self
                .child(child, light)
                .expect("inner grandchild exists when it is the deeper one");
            let g_heavy = self.child(grandchild, heavy);
            let g_light = self.child(grandchild, light);

            self.set_child(node, heavy, g_light);
            self.set_child(child, light, g_heavy);
            self.set_child(grandchild, light, Some(node));
            self.set_child(grandchild, heavy, Some(child));
            self.set_slot(slot, Some(grandchild));
            self.nodes[grandchild].parent = parent;

            self.update_depth(node);
            self.update_depth(child);
            self.update_depth(grandchild);
        }
    }

    /// Checks parent links, in-order threading and the height invariant.
    #[cfg(test)]
    fn check_invariants(&self) -> usize {
        fn walk(tree: &AvlTree, node: Option<usize>, parent: Option<usize>, out: &mut Vec<usize>) -> u32 {
            let Some(n) = node else {
                return 0;
            };
            assert_eq!(tree.nodes[n].parent, parent, "parent link of {n}");
            let l = walk(tree, tree.nodes[n].left, Some(n), out);
            out.push(n);
            let r = walk(tree, tree.nodes[n].right, Some(n), out);
            assert!(l.abs_diff(r) <= 1, "node {n} unbalanced: {l} vs {r}");
            assert_eq!(tree.nodes[n].depth, l.max(r) + 1, "depth of {n}");
            l.max(r) + 1
        }

        let mut in_order = Vec::new();
        walk(self, self.top, None, &mut in_order);
        assert_eq!(self.iter().collect::<Vec<_>>(), in_order);
        if let (Some(&first), Some(&last)) = (in_order.first(), in_order.last()) {
            assert_eq!(self.nodes[first].prev, None);
            assert_eq!(self.nodes[last].next, None);
        }
        in_order.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Inserts `id` keyed by `keys[id]` in ascending key order.
    fn insert_sorted(tree: &mut AvlTree, keys: &[f64], id: usize) {
        match tree.search_closest(|node| {
            if keys[id] < keys[node] {
                Ordering::Less
            } else {
                Ordering::Greater
            }
        }) {
            None => tree.insert_top(id),
            Some((anchor, Ordering::Greater)) => tree.insert_after(anchor, id),
            Some((anchor, _)) => tree.insert_before(anchor, id),
        }
    }

    fn keys_in_order(tree: &AvlTree, keys: &[f64]) -> Vec<f64> {
        tree.iter().map(|n| keys[n]).collect()
    }

    #[test]
    fn test_insert_ascending_stays_balanced() {
        let keys: Vec<f64> = (0..64).map(|i| i as f64).collect();
        let mut tree = AvlTree::with_capacity(keys.len());
        for id in 0..keys.len() {
            insert_sorted(&mut tree, &keys, id);
        }
        assert_eq!(tree.check_invariants(), 64);
        assert_eq!(keys_in_order(&tree, &keys), keys);
        // 64 nodes fit in an AVL tree of height at most 8
        assert!(tree.nodes[tree.top.unwrap()].depth <= 8);
    }

    #[test]
    fn test_insert_descending_stays_balanced() {
        let keys: Vec<f64> = (0..50).rev().map(|i| i as f64).collect();
        let mut tree = AvlTree::with_capacity(keys.len());
        for id in 0..keys.len() {
            insert_sorted(&mut tree, &keys, id);
        }
        tree.check_invariants();
        let mut expected = keys.clone();
        expected.sort_by(f64::total_cmp);
        assert_eq!(keys_in_order(&tree, &keys), expected);
    }

    #[test]
    fn test_search_closest_reports_side() {
        let keys = &[10.0, 20.0, 30.0];
        let mut tree = AvlTree::with_capacity(3);
        for id in 0..3 {
            insert_sorted(&mut tree, keys, id);
        }

        let probe = |value: f64| move |node: usize| value.partial_cmp(&keys[node]).unwrap();
        assert_eq!(tree.search_closest(probe(5.0)), Some((0, Ordering::Less)));
        assert_eq!(tree.search_closest(probe(35.0)), Some((2, Ordering::Greater)));
        assert_eq!(tree.search_closest(probe(20.0)), Some((1, Ordering::Equal)));
    }

    #[test]
    fn test_search_empty() {
        let tree = AvlTree::with_capacity(4);
        assert!(tree.search_closest(|_| Ordering::Less).is_none());
    }

    #[test]
    fn test_unlink_keeps_stale_neighbors() {
        let keys = vec![1.0, 2.0, 3.0];
        let mut tree = AvlTree::with_capacity(3);
        for id in 0..3 {
            insert_sorted(&mut tree, &keys, id);
        }

        tree.unlink(1);
        tree.check_invariants();
        assert_eq!(tree.iter().collect::<Vec<_>>(), vec![0, 2]);
        assert_eq!(tree.prev(1), Some(0));
        assert_eq!(tree.next(1), Some(2));
        assert_eq!(tree.next(0), Some(2));
    }

    #[test]
    fn test_unlink_all_then_reuse() {
        let keys = vec![3.0, 1.0, 2.0, 5.0, 4.0];
        let mut tree = AvlTree::with_capacity(keys.len());
        for id in 0..keys.len() {
            insert_sorted(&mut tree, &keys, id);
        }
        for id in [3, 0, 4, 1, 2] {
            tree.unlink(id);
            tree.check_invariants();
        }
        assert!(tree.is_empty());

        insert_sorted(&mut tree, &keys, 2);
        assert_eq!(tree.check_invariants(), 1);
    }

    #[test]
    fn test_clear_keeps_domr() {
        let mut tree = AvlTree::with_capacity(2);
        tree.insert_top(0);
        tree.set_domr(0, 7.5);
        tree.clear();
        assert!(tree.is_empty());
        assert_eq!(tree.domr(0), 7.5);
    }

    #[test]
    #[should_panic(expected = "already has a left child")]
    fn test_insert_before_occupied_panics() {
        let keys = vec![2.0, 1.0, 0.5];
        let mut tree = AvlTree::with_capacity(3);
        insert_sorted(&mut tree, &keys, 0);
        tree.insert_before(0, 1);
        tree.insert_before(0, 2);
    }

    proptest! {
        #[test]
        fn prop_random_insert_unlink(
            keys in prop::collection::vec(0.0f64..100.0, 1..60),
            removals in prop::collection::vec(any::<prop::sample::Index>(), 0..60),
        ) {
            let mut tree = AvlTree::with_capacity(keys.len());
            for id in 0..keys.len() {
                insert_sorted(&mut tree, &keys, id);
            }
            tree.check_invariants();

            let mut live: Vec<usize> = (0..keys.len()).collect();
            for idx in removals {
                if live.is_empty() {
                    break;
                }
                let id = live.remove(idx.index(live.len()));
                tree.unlink(id);
                let count = tree.check_invariants();
                prop_assert_eq!(count, live.len());
            }

            let in_order = keys_in_order(&tree, &keys);
            prop_assert!(in_order.windows(2).all(|w| w[0] <= w[1]));
        }
    }
}
