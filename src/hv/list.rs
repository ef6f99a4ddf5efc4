//! Per-dimension circular doubly linked point set.
//!
//! Every point belongs to `d` independent circular lists at once, one per
//! coordinate, each sorted ascending by that coordinate. All lists share a
//! sentinel node [`HEAD`] that is both their first and last element, so a walk
//! in any dimension stops when it comes back to `HEAD`.
//!
//! Nodes are arena slots: node `i >= 1` is input point `i - 1`. Links are
//! stored as one `(prev, next)` pair per node and dimension, which makes
//! removing a node from some dimensions and restoring it later O(d) with no
//! change to the other chains.

/// The sentinel node id. It carries no coordinates.
pub(crate) const HEAD: usize = 0;

/// Lowest dimension whose chain is edited while sweeping. Chains `0` and `1`
/// are only read by the two- and three-dimensional base cases.
pub(crate) const STOP_DIMENSION: usize = 2;

#[derive(Debug, Clone, Copy, Default)]
struct Link {
    prev: usize,
    next: usize,
}

/// Linked point set plus the per-node sweep accumulators.
#[derive(Debug, Clone)]
pub(crate) struct PointList {
    dim: usize,
    coords: Vec<f64>,
    links: Vec<Link>,
    ignore: Vec<usize>,
    area: Vec<f64>,
    vol: Vec<f64>,
}

impl PointList {
    /// Copies `points` into a fresh arena and links every dimension in
    /// ascending coordinate order. Ties keep input order.
    pub fn build<P: AsRef<[f64]>>(points: &[P], dim: usize) -> Self {
        let n = points.len();
        let slots = n + 1;

        let mut coords = Vec::with_capacity(n * dim);
        for p in points {
            coords.extend_from_slice(&p.as_ref()[..dim]);
        }

        let mut list = Self {
            dim,
            coords,
            links: vec![Link::default(); slots * dim],
            ignore: vec![0; slots],
            area: vec![0.0; slots * dim],
            vol: vec![0.0; slots * dim],
        };

        let mut order: Vec<usize> = (1..=n).collect();
        for k in (0..dim).rev() {
            order.sort_unstable_by(|&a, &b| {
                list.x(a, k).total_cmp(&list.x(b, k)).then(a.cmp(&b))
            });

            let mut prev = HEAD;
            for &node in &order {
                list.link_mut(prev, k).next = node;
                list.link_mut(node, k).prev = prev;
                prev = node;
            }
            list.link_mut(prev, k).next = HEAD;
            list.link_mut(HEAD, k).prev = prev;
        }

        list
    }

    /// Number of coordinates per point.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Coordinate `k` of `node`. Must not be called on [`HEAD`].
    #[inline]
    pub fn x(&self, node: usize, k: usize) -> f64 {
        debug_assert_ne!(node, HEAD, "sentinel has no coordinates");
        self.coords[(node - 1) * self.dim + k]
    }

    /// The first two coordinates, the key of the three-dimensional sweep.
    #[inline]
    pub fn xy(&self, node: usize) -> [f64; 2] {
        [self.x(node, 0), self.x(node, 1)]
    }

    #[inline]
    pub fn next(&self, node: usize, k: usize) -> usize {
        self.links[node * self.dim + k].next
    }

    #[inline]
    pub fn prev(&self, node: usize, k: usize) -> usize {
        self.links[node * self.dim + k].prev
    }

    #[inline]
    pub fn ignore(&self, node: usize) -> usize {
        self.ignore[node]
    }

    #[inline]
    pub fn set_ignore(&mut self, node: usize, level: usize) {
        self.ignore[node] = level;
    }

    #[inline]
    pub fn area(&self, node: usize, k: usize) -> f64 {
        self.area[node * self.dim + k]
    }

    #[inline]
    pub fn set_area(&mut self, node: usize, k: usize, value: f64) {
        self.area[node * self.dim + k] = value;
    }

    #[inline]
    pub fn vol(&self, node: usize, k: usize) -> f64 {
        self.vol[node * self.dim + k]
    }

    #[inline]
    pub fn set_vol(&mut self, node: usize, k: usize, value: f64) {
        self.vol[node * self.dim + k] = value;
    }

    /// Unlinks `node` from chains `STOP_DIMENSION..dim` and lowers `bound`
    /// to its coordinates there.
    pub fn delete(&mut self, node: usize, dim: usize, bound: &mut [f64]) {
        for k in STOP_DIMENSION..dim {
            self.unlink(node, k);
            bound[k] = bound[k].min(self.x(node, k));
        }
    }

    /// Unlinks a node known to add no volume in dimensions below `dim`.
    pub fn delete_dominated(&mut self, node: usize, dim: usize) {
        for k in STOP_DIMENSION..dim {
            self.unlink(node, k);
        }
    }

    /// Relinks a node removed by [`delete`](Self::delete).
    ///
    /// Its stored neighbors must still be adjacent in every chain, i.e.
    /// reinsertions happen in the reverse order of deletions.
    pub fn reinsert(&mut self, node: usize, dim: usize, bound: &mut [f64]) {
        for k in STOP_DIMENSION..dim {
            self.relink(node, k);
            bound[k] = bound[k].min(self.x(node, k));
        }
    }

    /// Relinks a node removed by [`delete_dominated`](Self::delete_dominated).
    ///
    /// A dominated node adds no area of its own, so its slab area equals its
    /// predecessor's and its volume extends the predecessor's volume.
    pub fn reinsert_dominated(&mut self, node: usize, dim: usize) {
        for k in STOP_DIMENSION..dim {
            self.relink(node, k);

            let p = self.prev(node, k);
            let (area, vol) = if p == HEAD {
                (0.0, 0.0)
            } else {
                let pa = self.area(p, k);
                (pa, self.vol(p, k) + pa * (self.x(node, k) - self.x(p, k)))
            };
            self.set_area(node, k, area);
            self.set_vol(node, k, vol);
        }
    }

    /// Drops every point that does not strictly dominate `reference` in all
    /// coordinates and returns how many points remain.
    ///
    /// Each chain is scanned from its maximum end, stopping at the first point
    /// below the reference.
    pub fn filter(&mut self, reference: &[f64], mut count: usize) -> usize {
        for k in 0..self.dim {
            let mut node = self.prev(HEAD, k);
            let scan = count;
            for _ in 0..scan {
                if self.x(node, k) < reference[k] {
                    break;
                }
                for j in 0..self.dim {
                    self.unlink(node, j);
                }
                node = self.prev(node, k);
                count -= 1;
            }
        }
        count
    }

    /// Node ids of chain `k` from lowest to highest coordinate.
    #[cfg(test)]
    pub fn chain(&self, k: usize) -> impl Iterator<Item = usize> + '_ {
        let first = self.next(HEAD, k);
        std::iter::successors(Some(first), move |&node| Some(self.next(node, k)))
            .take_while(|&node| node != HEAD)
    }

    fn link_mut(&mut self, node: usize, k: usize) -> &mut Link {
        &mut self.links[node * self.dim + k]
    }

    fn unlink(&mut self, node: usize, k: usize) {
        let Link { prev, next } = self.links[node * self.dim + k];
        self.link_mut(prev, k).next = next;
        self.link_mut(next, k).prev = prev;
    }

    fn relink(&mut self, node: usize, k: usize) {
        let Link { prev, next } = self.links[node * self.dim + k];
        self.link_mut(prev, k).next = node;
        self.link_mut(next, k).prev = node;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> PointList {
        // node ids are input index + 1
        PointList::build(
            &[
                vec![3.0, 1.0, 2.0, 5.0],
                vec![1.0, 2.0, 3.0, 4.0],
                vec![2.0, 3.0, 1.0, 6.0],
            ],
            4,
        )
    }

    #[test]
    fn test_chains_sorted_per_dimension() {
        let list = sample();
        assert_eq!(list.chain(0).collect::<Vec<_>>(), vec![2, 3, 1]);
        assert_eq!(list.chain(1).collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(list.chain(2).collect::<Vec<_>>(), vec![3, 1, 2]);
        assert_eq!(list.chain(3).collect::<Vec<_>>(), vec![2, 1, 3]);
        assert_eq!(list.prev(HEAD, 3), 3);
        assert_eq!(list.next(HEAD, 3), 2);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let list = PointList::build(&[[1.0, 0.0], [1.0, 0.0], [0.0, 0.0]], 2);
        assert_eq!(list.chain(0).collect::<Vec<_>>(), vec![3, 1, 2]);
        assert_eq!(list.chain(1).collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn test_empty_list_is_self_linked() {
        let list = PointList::build::<Vec<f64>>(&[], 3);
        for k in 0..3 {
            assert_eq!(list.next(HEAD, k), HEAD);
            assert_eq!(list.prev(HEAD, k), HEAD);
            assert_eq!(list.chain(k).count(), 0);
        }
    }

    #[test]
    fn test_delete_reinsert_restores_chains() {
        let mut list = sample();
        let mut bound = vec![f64::INFINITY; 4];

        list.delete(1, 4, &mut bound);
        // chains below STOP_DIMENSION are left alone
        assert_eq!(list.chain(0).collect::<Vec<_>>(), vec![2, 3, 1]);
        assert_eq!(list.chain(2).collect::<Vec<_>>(), vec![3, 2]);
        assert_eq!(list.chain(3).collect::<Vec<_>>(), vec![2, 3]);
        assert_eq!(bound, vec![f64::INFINITY, f64::INFINITY, 2.0, 5.0]);

        list.reinsert(1, 4, &mut bound);
        assert_eq!(list.chain(2).collect::<Vec<_>>(), vec![3, 1, 2]);
        assert_eq!(list.chain(3).collect::<Vec<_>>(), vec![2, 1, 3]);
    }

    #[test]
    fn test_nested_delete_reinsert() {
        let mut list = sample();
        let mut bound = vec![0.0; 4];
        list.delete_dominated(3, 4);
        list.delete_dominated(1, 4);
        assert_eq!(list.chain(3).collect::<Vec<_>>(), vec![2]);

        list.reinsert_dominated(1, 4);
        list.reinsert(3, 4, &mut bound);
        assert_eq!(list.chain(2).collect::<Vec<_>>(), vec![3, 1, 2]);
        assert_eq!(list.chain(3).collect::<Vec<_>>(), vec![2, 1, 3]);
    }

    #[test]
    fn test_reinsert_dominated_extends_volume() {
        let mut list = PointList::build(&[[0.0, 0.0, 1.0], [0.0, 0.0, 3.0]], 3);
        list.set_area(1, 2, 4.0);
        list.set_vol(1, 2, 10.0);

        list.delete_dominated(2, 3);
        list.reinsert_dominated(2, 3);

        assert_eq!(list.area(2, 2), 4.0);
        assert_eq!(list.vol(2, 2), 10.0 + 4.0 * 2.0);
    }

    #[test]
    fn test_filter_drops_non_dominating() {
        let mut list = PointList::build(
            &[[1.0, 1.0], [3.0, 0.0], [0.0, 2.0], [2.5, 2.5]],
            2,
        );
        let left = list.filter(&[3.0, 2.5], 4);
        assert_eq!(left, 2);
        assert_eq!(list.chain(0).collect::<Vec<_>>(), vec![3, 1]);
        assert_eq!(list.chain(1).collect::<Vec<_>>(), vec![1, 3]);
    }

    #[test]
    fn test_filter_everything() {
        let mut list = PointList::build(&[[5.0, 5.0], [6.0, 1.0]], 2);
        assert_eq!(list.filter(&[4.0, 4.0], 2), 0);
        assert_eq!(list.next(HEAD, 0), HEAD);
        assert_eq!(list.next(HEAD, 1), HEAD);
    }
}
