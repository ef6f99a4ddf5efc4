//! Crowding distance within a single front.

use super::config::CrowdingNormalization;
use std::cmp::Ordering;

/// Crowding distance assignment for diversity preservation.
///
/// Returns one distance per entry of `front` (same order). Higher distance
/// means the individual is more isolated.
///
/// # Algorithm (Deb et al., 2002)
///
/// For each objective:
/// 1. Stable-sort the front by objective value. The order carries over to
///    the next objective, so ties keep the previous relative order.
/// 2. Assign infinity to the two boundary individuals
/// 3. For every interior individual whose distance is still finite, add the
///    gap between its two neighbours, scaled per `normalization`. Range
///    normalization skips objectives whose range is zero or infinite.
///
/// # Complexity
///
/// O(m * n * log n) where m = number of objectives, n = front size
///
/// # Panics
///
/// Panics if an index in `front` is out of bounds for `fitness`, or if the
/// vectors are shorter than the first front member's.
///
/// # Example
///
/// ```
/// use u_pareto::nsga2::{crowding_distance, CrowdingNormalization};
///
/// let fitness = vec![
///     vec![1.0, 5.0],
///     vec![3.0, 3.0],
///     vec![5.0, 1.0],
/// ];
///
/// let distances = crowding_distance(&fitness, &[0, 1, 2], CrowdingNormalization::Raw);
///
/// // Boundary individuals get infinity
/// assert!(distances[0].is_infinite());
/// assert!(distances[2].is_infinite());
/// // (5 - 1) per objective
/// assert_eq!(distances[1], 8.0);
/// ```
pub fn crowding_distance<P: AsRef<[f64]>>(
    fitness: &[P],
    front: &[usize],
    normalization: CrowdingNormalization,
) -> Vec<f64> {
    let len = front.len();
    let mut distances = vec![0.0f64; len];
    if len == 0 {
        return distances;
    }

    let m = fitness[front[0]].as_ref().len();
    let value = |pos: usize, obj: usize| fitness[front[pos]].as_ref()[obj];

    // positions into `front`, re-sorted per objective
    let mut order: Vec<usize> = (0..len).collect();

    for obj in 0..m {
        order.sort_by(|&a, &b| {
            value(a, obj)
                .partial_cmp(&value(b, obj))
                .unwrap_or(Ordering::Equal)
        });

        let first = order[0];
        let last = order[len - 1];
        distances[first] = f64::INFINITY;
        distances[last] = f64::INFINITY;

        let scale = match normalization {
            CrowdingNormalization::Raw => 1.0,
            CrowdingNormalization::Range => {
                let range = value(last, obj) - value(first, obj);
                if !(range > 0.0 && range.is_finite()) {
                    continue;
                }
                m as f64 * range
            }
        };

        for w in 1..len.saturating_sub(1) {
            let pos = order[w];
            if distances[pos].is_finite() {
                let (below, above) = (value(order[w - 1], obj), value(order[w + 1], obj));
                // equal infinite neighbours leave no gap
                let gap = if above == below { 0.0 } else { above - below };
                distances[pos] += gap / scale;
            }
        }
    }

    distances
}

// ============================================================================
// Tests
// ============================================================================
