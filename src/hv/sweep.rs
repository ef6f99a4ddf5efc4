//! Dimension-sweep hypervolume computation.
//!
//! Implements the improved dimension-sweep algorithm of Fonseca, Paquete and
//! López-Ibáñez: the point set is swept along its last coordinate, and for
//! every slab between consecutive points the dominated volume of the lower
//! dimensions is computed recursively. The recursion bottoms out in a
//! three-dimensional sweep that maintains the two-dimensional skyline in a
//! balanced tree, giving `O(n^(d-2) log n)` worst case.
//!
//! Two caches keep the recursion from redoing work:
//!
//! - `bound[k]` is the lowest coordinate `k` of any point deleted or
//!   reinserted since chain `k` was last swept. Points below it still carry
//!   valid `area`/`vol` values from the previous sweep and are not revisited.
//! - the per-node ignore level `l` marks a point as dominated in coordinates
//!   `0..=l` by points swept before it. Such a point adds no area of its own in
//!   dimensions up to `l`, so its recursive sub-volume is copied from its
//!   predecessor instead of recomputed.
//!
//! # References
//!
//! - Fonseca, Paquete & López-Ibáñez (2006), "An improved dimension-sweep
//!   algorithm for the hypervolume indicator", IEEE CEC, 1157–1163
//! - Beume et al. (2009), "On the complexity of computing the hypervolume
//!   indicator", IEEE TEVC 13(5), 1075–1082

use super::avl::AvlTree;
use super::list::{PointList, HEAD};
use crate::error::{ParetoError, ParetoResult};
use log::{debug, trace};
use std::cmp::Ordering;

/// Computes the hypervolume dominated by `points` and bounded by `reference`.
///
/// All objectives are **minimized**: a point contributes the box between its
/// coordinates and the reference point. Points that are not strictly better
/// than the reference in every coordinate contribute nothing. Duplicate points
/// are counted once.
///
/// # Errors
///
/// - [`ParetoError::ZeroDimension`] if `reference` is empty
/// - [`ParetoError::DimensionMismatch`] if a point's length differs from the
///   reference's
/// - [`ParetoError::InvalidCoordinate`] on NaN or infinite values
///
/// # Example
///
/// ```
/// use u_pareto::hv::hypervolume;
///
/// let front = vec![vec![1.0, 1.0], vec![2.0, 2.0]];
/// let hv = hypervolume(&front, &[3.0, 3.0]).unwrap();
/// // (2, 2) lies inside the box of (1, 1)
/// assert_eq!(hv, 4.0);
/// ```
pub fn hypervolume<P: AsRef<[f64]>>(points: &[P], reference: &[f64]) -> ParetoResult<f64> {
    check_points(points, reference)?;

    if points.is_empty() {
        return Ok(0.0);
    }

    let dim = reference.len();
    let mut sweep = Sweep::new(points, reference);
    let alive = sweep.list.filter(reference, points.len());
    debug!(
        "hypervolume: {alive} of {} points dominate the reference in {dim} dimensions",
        points.len()
    );

    let volume = match alive {
        0 => 0.0,
        1 => {
            let node = sweep.list.next(HEAD, 0);
            (0..dim)
                .map(|k| reference[k] - sweep.list.x(node, k))
                .product()
        }
        _ => sweep.run(dim - 1, alive),
    };

    Ok(volume)
}

/// Validates shapes and values shared by every hypervolume entry point.
pub(crate) fn check_points<P: AsRef<[f64]>>(points: &[P], reference: &[f64]) -> ParetoResult<()> {
    if reference.is_empty() {
        return Err(ParetoError::ZeroDimension);
    }
    if let Some((coordinate, &value)) = first_non_finite(reference) {
        return Err(ParetoError::InvalidCoordinate {
            index: None,
            coordinate,
            value,
        });
    }

    for (index, point) in points.iter().enumerate() {
        let point = point.as_ref();
        if point.len() != reference.len() {
            return Err(ParetoError::DimensionMismatch {
                index,
                expected: reference.len(),
                found: point.len(),
            });
        }
        if let Some((coordinate, &value)) = first_non_finite(point) {
            return Err(ParetoError::InvalidCoordinate {
                index: Some(index),
                coordinate,
                value,
            });
        }
    }

    Ok(())
}

fn first_non_finite(values: &[f64]) -> Option<(usize, &f64)> {
    values.iter().enumerate().find(|(_, v)| !v.is_finite())
}

/// Skyline order of the three-dimensional sweep: descending on coordinate 1;
/// on ties a probe with a larger or equal coordinate 0 goes first, so that it
/// lands next to the tree point that dominates it.
fn skyline_order(probe: [f64; 2], node: [f64; 2]) -> Ordering {
    if probe[1] > node[1] {
        Ordering::Less
    } else if probe[1] < node[1] {
        Ordering::Greater
    } else if probe[0] >= node[0] {
        Ordering::Less
    } else {
        Ordering::Greater
    }
}

/// State of one hypervolume computation.
struct Sweep<'r> {
    list: PointList,
    tree: AvlTree,
    reference: &'r [f64],
    bound: Vec<f64>,
}

impl<'r> Sweep<'r> {
    fn new<P: AsRef<[f64]>>(points: &[P], reference: &'r [f64]) -> Self {
        let list = PointList::build(points, reference.len());
        Self {
            tree: AvlTree::with_capacity(points.len() + 1),
            bound: vec![f64::NEG_INFINITY; list.dim()],
            list,
            reference,
        }
    }

    /// Volume of the `count` active points in dimensions `0..=dim`.
    fn run(&mut self, dim: usize, count: usize) -> f64 {
        match dim {
            0 => self.sweep_1d(),
            1 => self.sweep_2d(),
            2 => self.sweep_3d(),
            _ => self.sweep_general(dim, count),
        }
    }

    fn sweep_1d(&self) -> f64 {
        let lowest = self.list.next(HEAD, 0);
        self.reference[0] - self.list.x(lowest, 0)
    }

    fn sweep_2d(&mut self) -> f64 {
        let r = self.reference;
        let list = &mut self.list;

        let mut p1 = list.next(HEAD, 1);
        let mut best_x0 = list.x(p1, 0);
        let mut volume = 0.0;

        loop {
            let p0 = list.next(p1, 1);
            if p0 == HEAD {
                break;
            }
            volume += (r[0] - best_x0) * (list.x(p0, 1) - list.x(p1, 1));

            let x0 = list.x(p0, 0);
            if x0 < best_x0 {
                best_x0 = x0;
            } else if list.ignore(p0) == 0 {
                list.set_ignore(p0, 1);
            }
            p1 = p0;
        }

        volume + (r[0] - best_x0) * (r[1] - list.x(p1, 1))
    }

    /// Tree node closest to `node` in skyline order.
    fn closest(&self, node: usize) -> (usize, Ordering) {
        let probe = self.list.xy(node);
        self.tree
            .search_closest(|t| skyline_order(probe, self.list.xy(t)))
            .expect("skyline is never empty during the sweep")
    }

    fn insert_closest(&mut self, node: usize) {
        match self.closest(node) {
            (anchor, Ordering::Greater) => self.tree.insert_after(anchor, node),
            (anchor, _) => self.tree.insert_before(anchor, node),
        }
    }

    /// Sweeps chain 2 bottom-up, keeping the 2-D skyline of the swept points
    /// in the tree and the area it dominates in `area`.
    fn sweep_3d(&mut self) -> f64 {
        let r = self.reference;
        let corner = [r[0], r[1]];

        // every point lies below the bound: the cached volume is complete
        let last = self.list.prev(HEAD, 2);
        if self.list.x(last, 2) < self.bound[2] {
            trace!("3d sweep fully cached");
            return self.list.vol(last, 2) + self.list.area(last, 2) * (r[2] - self.list.x(last, 2));
        }

        let mut pp = self.list.next(HEAD, 2);
        if self.list.x(pp, 2) >= self.bound[2] {
            let [x0, x1] = self.list.xy(pp);
            self.list.set_area(pp, 2, (r[0] - x0) * (r[1] - x1));
            self.list.set_vol(pp, 2, 0.0);
        } else {
            // first cached point that is still on the skyline
            while self.tree.domr(pp) < self.bound[2] {
                pp = self.list.next(pp, 2);
                debug_assert_ne!(pp, HEAD, "no skyline point below the bound");
            }
        }

        self.list.set_ignore(pp, 0);
        self.tree.insert_top(pp);
        self.tree.set_domr(pp, r[2]);

        // rebuild the skyline of the cached points: those never dominated, or
        // dominated only by a point that has been removed since
        pp = self.list.next(pp, 2);
        while self.list.x(pp, 2) < self.bound[2] {
            if self.tree.domr(pp) >= self.bound[2] {
                self.tree.set_domr(pp, r[2]);
                self.insert_closest(pp);
            }
            pp = self.list.next(pp, 2);
        }

        pp = self.list.prev(pp, 2);
        let mut volume = self.list.vol(pp, 2);
        let mut area = self.list.area(pp, 2);
        volume += area * self.slab_height(pp);
        self.bound[2] = self.list.x(last, 2);

        pp = self.list.next(pp, 2);
        while pp != HEAD {
            let next = self.list.next(pp, 2);
            let height = self.slab_height(pp);
            self.list.set_vol(pp, 2, volume);

            if self.list.ignore(pp) >= 2 {
                volume += area * height;
                self.list.set_area(pp, 2, area);
                pp = next;
                continue;
            }

            let [px, py] = self.list.xy(pp);
            let (anchor, side) = self.closest(pp);
            let right = if side == Ordering::Greater {
                self.tree.next(anchor).map_or(corner, |t| self.list.xy(t))
            } else {
                self.list.xy(anchor)
            };

            if right[0] <= px {
                // dominated in the first two coordinates
                self.list.set_ignore(pp, 2);
                self.tree.set_domr(pp, self.list.x(pp, 2));
                self.list.set_area(pp, 2, area);
                if height > 0.0 {
                    volume += area * height;
                }
                pp = next;
                continue;
            }

            if side == Ordering::Greater {
                self.tree.insert_after(anchor, pp);
            } else {
                self.tree.insert_before(anchor, pp);
            }
            self.tree.set_domr(pp, r[2]);

            let left = match self.tree.prev(pp) {
                None => corner,
                Some(mut t) => {
                    let mut left = self.list.xy(t);
                    if left[0] >= px {
                        // pp dominates t and maybe a run of its predecessors
                        let mut cur = left;
                        while let Some(tp) = self.tree.prev(t) {
                            left = self.list.xy(tp);
                            area -= (left[1] - cur[1]) * (right[0] - cur[0]);
                            if left[0] < px {
                                break;
                            }
                            cur = left;
                            self.tree.unlink(t);
                            self.tree.set_domr(t, self.list.x(pp, 2));
                            t = tp;
                        }

                        self.tree.unlink(t);
                        self.tree.set_domr(t, self.list.x(pp, 2));
                        if self.tree.prev(t).is_none() {
                            area -= (r[1] - cur[1]) * (right[0] - cur[0]);
                            left = corner;
                        }
                    }
                    left
                }
            };

            area += (left[1] - py) * (right[0] - px);
            if height > 0.0 {
                volume += area * height;
            }
            self.list.set_area(pp, 2, area);
            pp = next;
        }

        self.tree.clear();
        volume
    }

    /// Distance along coordinate 2 from `node` to the next point, or to the
    /// reference for the last one.
    fn slab_height(&self, node: usize) -> f64 {
        let next = self.list.next(node, 2);
        let top = if next == HEAD {
            self.reference[2]
        } else {
            self.list.x(next, 2)
        };
        top - self.list.x(node, 2)
    }

    /// Sweeps chain `dim > 2` top-down to the bound, then back up, summing
    /// `area × slab` with each area a recursive `dim - 1` volume.
    fn sweep_general(&mut self, dim: usize, mut count: usize) -> f64 {
        let r = self.reference;

        let mut node = self.list.prev(HEAD, dim);
        while node != HEAD {
            if self.list.ignore(node) < dim {
                self.list.set_ignore(node, 0);
            }
            node = self.list.prev(node, dim);
        }

        // Remove points above the bound. With repeated coordinates, points
        // equal to the bound go too, except one.
        let mut p0 = HEAD;
        let mut p1 = self.list.prev(HEAD, dim);
        while count > 1
            && (self.list.x(p1, dim) > self.bound[dim]
                || self.list.x(self.list.prev(p1, dim), dim) >= self.bound[dim])
        {
            p0 = p1;
            if self.list.ignore(p0) >= dim {
                self.list.delete_dominated(p0, dim);
            } else {
                self.list.delete(p0, dim, &mut self.bound);
            }
            p1 = self.list.prev(p0, dim);
            count -= 1;
        }

        let mut volume = 0.0;
        if count > 1 {
            let below = self.list.prev(p1, dim);
            volume = self.list.vol(below, dim)
                + self.list.area(below, dim) * (self.list.x(p1, dim) - self.list.x(below, dim));

            let area = if self.list.ignore(p1) >= dim {
                self.list.area(below, dim)
            } else {
                let area = self.run(dim - 1, count);
                // p1 is the highest point in `dim`, so dominance in `dim - 1`
                // carries over to `dim`
                if self.list.ignore(p1) == dim - 1 {
                    self.list.set_ignore(p1, dim);
                }
                area
            };
            self.list.set_area(p1, dim, area);
        } else {
            let mut area = 1.0;
            self.list.set_area(p1, 0, area);
            for k in 1..=dim {
                area *= r[k - 1] - self.list.x(p1, k - 1);
                self.list.set_area(p1, k, area);
            }
        }
        self.list.set_vol(p1, dim, volume);

        while p0 != HEAD {
            volume += self.list.area(p1, dim) * (self.list.x(p0, dim) - self.list.x(p1, dim));
            count += 1;

            if self.list.ignore(p0) >= dim {
                self.list.reinsert_dominated(p0, dim);
                let area = self.list.area(p1, dim);
                self.list.set_area(p0, dim, area);
            } else {
                self.list.reinsert(p0, dim, &mut self.bound);
                let area = self.run(dim - 1, count);
                self.list.set_area(p0, dim, area);
                if self.list.ignore(p0) == dim - 1 {
                    self.list.set_ignore(p0, dim);
                }
            }

            p1 = p0;
            p0 = self.list.next(p0, dim);
            self.list.set_vol(p1, dim, volume);
        }

        self.bound[dim] = self.list.x(p1, dim);
        volume + self.list.area(p1, dim) * (r[dim] - self.list.x(p1, dim))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Volume by brute force over the grid spanned by all coordinates.
    fn grid_volume(points: &[Vec<f64>], reference: &[f64]) -> f64 {
        let d = reference.len();
        let live: Vec<&Vec<f64>> = points
            .iter()
            .filter(|p| p.iter().zip(reference).all(|(x, r)| x < r))
            .collect();
        if live.is_empty() {
            return 0.0;
        }

        let grids: Vec<Vec<f64>> = (0..d)
            .map(|k| {
                let mut g: Vec<f64> = live.iter().map(|p| p[k]).collect();
                g.push(reference[k]);
                g.sort_by(f64::total_cmp);
                g.dedup();
                g
            })
            .collect();

        let mut volume = 0.0;
        let mut cell = vec![0usize; d];
        loop {
            let covered = live
                .iter()
                .any(|p| (0..d).all(|k| p[k] <= grids[k][cell[k]]));
            if covered {
                volume += (0..d)
                    .map(|k| grids[k][cell[k] + 1] - grids[k][cell[k]])
                    .product::<f64>();
            }

            let mut k = 0;
            loop {
                if k == d {
                    return volume;
                }
                cell[k] += 1;
                if cell[k] + 1 < grids[k].len() {
                    break;
                }
                cell[k] = 0;
                k += 1;
            }
        }
    }

    fn assert_close(actual: f64, expected: f64) {
        let tol = 1e-9 * expected.abs().max(1.0);
        assert!(
            (actual - expected).abs() <= tol,
            "expected {expected}, got {actual}"
        );
    }

    /// Points with small integer coordinates, so ties are frequent.
    fn integer_points(
        dims: std::ops::RangeInclusive<usize>,
        max_points: usize,
    ) -> impl Strategy<Value = (Vec<Vec<f64>>, Vec<f64>)> {
        dims.prop_flat_map(move |d| {
            (
                prop::collection::vec(prop::collection::vec(0u8..6, d), 0..=max_points),
                prop::collection::vec(3u8..=6, d),
            )
        })
        .prop_map(|(points, reference)| {
            (
                points
                    .into_iter()
                    .map(|p| p.into_iter().map(f64::from).collect())
                    .collect(),
                reference.into_iter().map(f64::from).collect(),
            )
        })
    }

    /// `integer_points` plus a random permutation of the coordinate axes.
    fn integer_points_with_axes(
        dims: std::ops::RangeInclusive<usize>,
        max_points: usize,
    ) -> impl Strategy<Value = (Vec<Vec<f64>>, Vec<f64>, Vec<usize>)> {
        integer_points(dims, max_points).prop_flat_map(|(points, reference)| {
            let axes: Vec<usize> = (0..reference.len()).collect();
            (Just(points), Just(reference), Just(axes).prop_shuffle())
        })
    }

    // ---- Defined values ----

    #[test]
    fn test_empty_set() {
        let points: Vec<Vec<f64>> = Vec::new();
        assert_eq!(hypervolume(&points, &[1.0, 2.0, 3.0]).unwrap(), 0.0);
    }

    #[test]
    fn test_single_point_is_box() {
        let points = vec![vec![1.0, 2.0, 0.5, -1.0]];
        let hv = hypervolume(&points, &[2.0, 4.0, 1.0, 1.0]).unwrap();
        assert_eq!(hv, 1.0 * 2.0 * 0.5 * 2.0);
    }

    #[test]
    fn test_nested_boxes_2d() {
        let points = vec![vec![1.0, 1.0], vec![2.0, 2.0]];
        assert_eq!(hypervolume(&points, &[3.0, 3.0]).unwrap(), 4.0);
    }

    #[test]
    fn test_staircase_2d() {
        let points = vec![vec![1.0, 3.0], vec![2.0, 2.0], vec![3.0, 1.0]];
        // 3 + 2 + 1 unit columns of widths 1
        assert_eq!(hypervolume(&points, &[4.0, 4.0]).unwrap(), 6.0);
    }

    #[test]
    fn test_one_dimension_takes_minimum() {
        let points = vec![vec![3.0], vec![1.5], vec![2.0]];
        assert_eq!(hypervolume(&points, &[4.0]).unwrap(), 2.5);
    }

    #[test]
    fn test_points_not_dominating_reference_ignored() {
        let points = vec![vec![1.0, 1.0], vec![0.0, 5.0], vec![3.0, 0.0]];
        // (0, 5) and (3, 0) each touch the reference box boundary
        assert_eq!(hypervolume(&points, &[3.0, 5.0]).unwrap(), 8.0);
        let outside = vec![vec![4.0, 4.0]];
        assert_eq!(hypervolume(&outside, &[3.0, 3.0]).unwrap(), 0.0);
    }

    #[test]
    fn test_duplicates_counted_once() {
        let points = vec![vec![1.0, 2.0, 3.0]; 5];
        assert_eq!(hypervolume(&points, &[2.0, 3.0, 4.0]).unwrap(), 1.0);

        let mut many = vec![vec![0.0, 1.0, 1.0, 1.0], vec![1.0, 0.0, 1.0, 1.0]];
        many.extend(many.clone());
        let reference = [2.0, 2.0, 2.0, 2.0];
        assert_close(
            hypervolume(&many, &reference).unwrap(),
            grid_volume(&many, &reference),
        );
    }

    #[test]
    fn test_three_dimensional_known_value() {
        let points = vec![
            vec![1.0, 0.0, 1.0],
            vec![0.0, 1.0, 0.0],
        ];
        // boxes 1x2x1 and 2x1x2 overlapping in 1x1x1
        assert_eq!(hypervolume(&points, &[2.0, 2.0, 2.0]).unwrap(), 2.0 + 4.0 - 1.0);
    }

    #[test]
    fn test_accepts_arrays_and_slices() {
        let arrays = [[1.0, 1.0], [2.0, 0.5]];
        let hv = hypervolume(&arrays, &[3.0, 3.0]).unwrap();
        assert_eq!(hv, 4.0 + 0.5);

        let slices: Vec<&[f64]> = arrays.iter().map(|p| p.as_slice()).collect();
        assert_eq!(hypervolume(&slices, &[3.0, 3.0]).unwrap(), hv);
    }

    // ---- Errors ----

    #[test]
    fn test_dimension_mismatch() {
        let points = vec![vec![1.0, 1.0], vec![1.0, 1.0, 1.0]];
        assert_eq!(
            hypervolume(&points, &[2.0, 2.0]),
            Err(ParetoError::DimensionMismatch {
                index: 1,
                expected: 2,
                found: 3
            })
        );
    }

    #[test]
    fn test_zero_dimension() {
        let points: Vec<Vec<f64>> = vec![vec![]];
        assert_eq!(hypervolume(&points, &[]), Err(ParetoError::ZeroDimension));
    }

    #[test]
    fn test_non_finite_rejected() {
        let points = vec![vec![1.0, f64::NAN]];
        assert!(matches!(
            hypervolume(&points, &[2.0, 2.0]),
            Err(ParetoError::InvalidCoordinate {
                index: Some(0),
                coordinate: 1,
                ..
            })
        ));

        let points = vec![vec![1.0, 1.0]];
        assert!(matches!(
            hypervolume(&points, &[f64::INFINITY, 2.0]),
            Err(ParetoError::InvalidCoordinate {
                index: None,
                coordinate: 0,
                ..
            })
        ));
    }

    // ---- Brute-force agreement ----

    #[test]
    fn test_four_dimensional_grid_agreement() {
        let points = vec![
            vec![0.0, 3.0, 2.0, 1.0],
            vec![3.0, 0.0, 1.0, 2.0],
            vec![1.0, 1.0, 3.0, 0.0],
            vec![2.0, 2.0, 0.0, 3.0],
            vec![1.0, 2.0, 1.0, 2.0],
            vec![2.0, 2.0, 2.0, 2.0],
        ];
        let reference = [4.0, 4.0, 4.0, 4.0];
        assert_close(
            hypervolume(&points, &reference).unwrap(),
            grid_volume(&points, &reference),
        );
    }

    #[test]
    fn test_grid_volume_sanity() {
        let points = vec![vec![1.0, 1.0], vec![2.0, 2.0]];
        assert_eq!(grid_volume(&points, &[3.0, 3.0]), 4.0);
        assert_eq!(grid_volume(&[], &[3.0, 3.0]), 0.0);
    }

    proptest! {
        #[test]
        fn prop_matches_grid_low_dims((points, reference) in integer_points(1..=4, 8)) {
            let hv = hypervolume(&points, &reference).unwrap();
            let expected = grid_volume(&points, &reference);
            prop_assert!(hv >= 0.0);
            prop_assert!((hv - expected).abs() <= 1e-9 * expected.max(1.0), "{hv} vs {expected}");
        }

        #[test]
        fn prop_invariant_under_point_order(
            (points, reference) in integer_points(2..=5, 8),
            seed in any::<u64>(),
        ) {
            let mut shuffled = points.clone();
            // deterministic Fisher-Yates driven by the seed
            let mut state = seed | 1;
            for i in (1..shuffled.len()).rev() {
                state ^= state << 13;
                state ^= state >> 7;
                state ^= state << 17;
                shuffled.swap(i, (state % (i as u64 + 1)) as usize);
            }
            let a = hypervolume(&points, &reference).unwrap();
            let b = hypervolume(&shuffled, &reference).unwrap();
            prop_assert!((a - b).abs() <= 1e-9 * a.max(1.0), "{a} vs {b}");
        }

        #[test]
        fn prop_invariant_under_dimension_order(
            (points, reference, axes) in integer_points_with_axes(2..=5, 8),
        ) {
            let permute = |v: &[f64]| -> Vec<f64> { axes.iter().map(|&k| v[k]).collect() };
            let permuted: Vec<Vec<f64>> = points.iter().map(|p| permute(p)).collect();
            let a = hypervolume(&points, &reference).unwrap();
            let b = hypervolume(&permuted, &permute(&reference)).unwrap();
            prop_assert!((a - b).abs() <= 1e-9 * a.max(1.0), "{a} vs {b}");
        }

        #[test]
        fn prop_dominated_point_changes_nothing(
            (points, reference) in integer_points(1..=5, 7),
            pick in any::<prop::sample::Index>(),
            shift in prop::collection::vec(0u8..3, 5),
        ) {
            prop_assume!(!points.is_empty());
            let base = &points[pick.index(points.len())];
            let dominated: Vec<f64> = base
                .iter()
                .zip(&shift)
                .map(|(x, s)| x + f64::from(*s))
                .collect();

            let mut extended = points.clone();
            extended.push(dominated);
            let a = hypervolume(&points, &reference).unwrap();
            let b = hypervolume(&extended, &reference).unwrap();
            prop_assert!((a - b).abs() <= 1e-9 * a.max(1.0), "{a} vs {b}");
        }

        #[test]
        fn prop_single_point_product(
            point in prop::collection::vec(-5.0f64..5.0, 1..=6),
        ) {
            let reference: Vec<f64> = point.iter().map(|x| x + 1.5).collect();
            let hv = hypervolume(&[point.clone()], &reference).unwrap();
            let expected: f64 = point.iter().zip(&reference).map(|(x, r)| r - x).product();
            prop_assert!((hv - expected).abs() <= 1e-9 * expected.max(1.0));
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(48))]

        #[test]
        fn prop_matches_grid_high_dims((points, reference) in integer_points(5..=6, 6)) {
            let hv = hypervolume(&points, &reference).unwrap();
            let expected = grid_volume(&points, &reference);
            prop_assert!((hv - expected).abs() <= 1e-9 * expected.max(1.0), "{hv} vs {expected}");
        }

        #[test]
        fn prop_matches_grid_continuous(
            points in prop::collection::vec(prop::collection::vec(0.0f64..1.0, 4), 0..=7),
        ) {
            let reference = [1.0, 1.0, 1.0, 1.0];
            let hv = hypervolume(&points, &reference).unwrap();
            let expected = grid_volume(&points, &reference);
            prop_assert!((hv - expected).abs() <= 1e-9, "{hv} vs {expected}");
        }
    }
}
