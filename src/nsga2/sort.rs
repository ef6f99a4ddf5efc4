//! Pareto dominance and fast non-dominated sorting.
//!
//! Fitness vectors follow the **maximization** convention: callers with
//! minimized objectives pass negated (weighted) values.

use crate::error::{ParetoError, ParetoResult};
use log::trace;

/// Returns `true` if `a` Pareto-dominates `b` under maximization: `a` is at
/// least as large in every objective and strictly larger in one.
///
/// Equal vectors do not dominate each other.
///
/// # Example
///
/// ```
/// use u_pareto::nsga2::dominates;
///
/// assert!(dominates(&[3.0, 3.0], &[2.0, 3.0]));
/// assert!(!dominates(&[3.0, 3.0], &[3.0, 3.0]));
/// assert!(!dominates(&[1.0, 5.0], &[5.0, 1.0]));
/// ```
pub fn dominates(a: &[f64], b: &[f64]) -> bool {
    dominance_cmp(a, b) == Dominance::Left
}

/// Dominance comparison result.
#[derive(Debug, PartialEq)]
enum Dominance {
    /// Left dominates right.
    Left,
    /// Right dominates left.
    Right,
    /// Neither dominates the other.
    Neither,
}

/// Compare two fitness vectors for Pareto dominance (maximization).
fn dominance_cmp(a: &[f64], b: &[f64]) -> Dominance {
    let mut a_better_in_some = false;
    let mut b_better_in_some = false;

    for (&va, &vb) in a.iter().zip(b.iter()) {
        if va > vb {
            a_better_in_some = true;
        } else if vb > va {
            b_better_in_some = true;
        }
        if a_better_in_some && b_better_in_some {
            return Dominance::Neither;
        }
    }

    match (a_better_in_some, b_better_in_some) {
        (true, false) => Dominance::Left,
        (false, true) => Dominance::Right,
        _ => Dominance::Neither,
    }
}

/// Checks that a population can be ranked for a request of `k` individuals.
pub(crate) fn check_fitness<P: AsRef<[f64]>>(fitness: &[P], k: usize) -> ParetoResult<()> {
    let Some(first) = fitness.first() else {
        return if k > 0 {
            Err(ParetoError::EmptyPopulation { requested: k })
        } else {
            Ok(())
        };
    };

    let m = first.as_ref().len();
    if m == 0 {
        return Err(ParetoError::ZeroDimension);
    }

    for (index, values) in fitness.iter().enumerate() {
        let values = values.as_ref();
        if values.len() != m {
            return Err(ParetoError::InconsistentFitness {
                index,
                expected: m,
                found: values.len(),
            });
        }
        if let Some((coordinate, &value)) =
            values.iter().enumerate().find(|(_, v)| !v.is_finite())
        {
            return Err(ParetoError::InvalidCoordinate {
                index: Some(index),
                coordinate,
                value,
            });
        }
    }

    Ok(())
}

/// Fast non-dominated sorting (Deb et al., 2002).
///
/// Partitions the population into Pareto fronts. Front 0 holds the
/// non-dominated individuals; front `r` holds those dominated only by
/// individuals of earlier fronts. Fronts are peeled only until at least
/// `min(k, n)` individuals are ranked, so trailing fronts may be missing.
/// With `first_front_only`, only front 0 is returned.
///
/// Each front lists indices in ascending input order. `k == 0` yields no
/// fronts.
///
/// # Complexity
///
/// O(m * n²) where m = number of objectives, n = number of individuals
///
/// # Errors
///
/// - [`ParetoError::EmptyPopulation`] if `fitness` is empty and `k > 0`
/// - [`ParetoError::ZeroDimension`] if fitness vectors are empty
/// - [`ParetoError::InconsistentFitness`] on differing vector lengths
/// - [`ParetoError::InvalidCoordinate`] on NaN or infinite values
///
/// # Example
///
/// ```
/// use u_pareto::nsga2::sort_nondominated;
///
/// let fitness = vec![
///     vec![1.0, 5.0],
///     vec![3.0, 3.0],
///     vec![5.0, 1.0],
///     vec![2.0, 2.0], // dominated by (3, 3)
/// ];
///
/// let fronts = sort_nondominated(&fitness, fitness.len(), false).unwrap();
/// assert_eq!(fronts, vec![vec![0, 1, 2], vec![3]]);
/// ```
pub fn sort_nondominated<P: AsRef<[f64]>>(
    fitness: &[P],
    k: usize,
    first_front_only: bool,
) -> ParetoResult<Vec<Vec<usize>>> {
    check_fitness(fitness, k)?;
    if k == 0 {
        return Ok(Vec::new());
    }

    let n = fitness.len();
    let target = k.min(n);

    let mut domination_count = vec![0usize; n];
    let mut dominated_by: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut front_0 = Vec::new();

    // Compute dominance relationships
    for i in 0..n {
        for j in (i + 1)..n {
            match dominance_cmp(fitness[i].as_ref(), fitness[j].as_ref()) {
                Dominance::Left => {
                    dominated_by[i].push(j);
                    domination_count[j] += 1;
                }
                Dominance::Right => {
                    dominated_by[j].push(i);
                    domination_count[i] += 1;
                }
                Dominance::Neither => {}
            }
        }

        if domination_count[i] == 0 {
            front_0.push(i);
        }
    }

    let mut ranked = front_0.len();
    let mut fronts = vec![front_0];

    if !first_front_only {
        while ranked < target {
            let current = fronts
                .last()
                .expect("fronts is initialized with front_0; never empty");
            let mut next_front = Vec::new();

            for &i in current {
                for &j in &dominated_by[i] {
                    domination_count[j] -= 1;
                    if domination_count[j] == 0 {
                        next_front.push(j);
                    }
                }
            }

            debug_assert!(!next_front.is_empty(), "unranked individuals form a cycle");
            next_front.sort_unstable();
            ranked += next_front.len();
            fronts.push(next_front);
        }
    }

    trace!(
        "non-dominated sort: {ranked} of {n} ranked into {} fronts",
        fronts.len()
    );

    Ok(fronts)
}

// ============================================================================
// Tests
// ============================================================================
