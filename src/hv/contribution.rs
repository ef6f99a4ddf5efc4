//! Least hypervolume contributor of a front.
//!
//! The point whose removal loses the least dominated volume is the natural
//! candidate to discard when a bounded archive overflows (SMS-EMOA style
//! environmental selection).
//!
//! # References
//!
//! - Beume, Naujoks & Emmerich (2007), "SMS-EMOA: Multiobjective selection
//!   based on dominated hypervolume", EJOR 181(3), 1653–1669

use super::config::ContributionConfig;
use super::sweep::{check_points, hypervolume};
use crate::error::{ParetoError, ParetoResult};
use log::debug;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Returns the index of the point contributing the least hypervolume.
///
/// Points are in the minimization convention of [`hypervolume`]. The point
/// holding the minimum of any objective (the first such point on ties) is an
/// extreme and is kept out of the candidates. Every other point is scored by
/// the hypervolume of the front without it; the highest score, i.e. the
/// smallest loss, wins, the first index on ties.
///
/// When no fixed reference is configured, the reference is the per-objective
/// maximum of the front plus `config.reference_offset`.
///
/// # Errors
///
/// - [`ParetoError::InvalidConfig`] if `config` fails validation
/// - [`ParetoError::EmptyPopulation`] for an empty front
/// - the shape and value errors of [`hypervolume`]
///
/// # Example
///
/// ```
/// use u_pareto::hv::{least_contributor, ContributionConfig};
///
/// let front = vec![
///     vec![1.0, 4.0],
///     vec![2.0, 2.0],
///     vec![3.0, 1.5],
///     vec![4.0, 1.0],
/// ];
/// let worst = least_contributor(&front, &ContributionConfig::default()).unwrap();
/// assert_eq!(worst, 2);
/// ```
pub fn least_contributor<P: AsRef<[f64]>>(
    points: &[P],
    config: &ContributionConfig,
) -> ParetoResult<usize> {
    config.validate().map_err(ParetoError::InvalidConfig)?;
    if points.is_empty() {
        return Err(ParetoError::EmptyPopulation { requested: 1 });
    }

    let points: Vec<&[f64]> = points.iter().map(|p| p.as_ref()).collect();
    let reference = match &config.reference {
        Some(reference) => reference.clone(),
        None => derived_reference(&points, config.reference_offset)?,
    };
    check_points(&points, &reference)?;

    let extremes = extremes(&points);
    let candidates: Vec<usize> = (0..points.len())
        .filter(|i| !extremes.contains(i))
        .collect();

    let parallel = config.parallel && cfg!(feature = "parallel");
    debug!(
        "least contributor: {} candidates, {} extremes, parallel={parallel}",
        candidates.len(),
        extremes.len()
    );

    let scores = score(&points, &reference, &candidates, parallel)?;

    let mut best = 0;
    let mut best_score = 0.0;
    for (&i, &s) in candidates.iter().zip(&scores) {
        if s > best_score {
            best = i;
            best_score = s;
        }
    }
    Ok(best)
}

/// Per-objective maximum plus `offset`.
fn derived_reference(points: &[&[f64]], offset: f64) -> ParetoResult<Vec<f64>> {
    let dim = points[0].len();
    check_points(points, &vec![0.0; dim])?;

    Ok((0..dim)
        .map(|k| {
            points
                .iter()
                .map(|p| p[k])
                .fold(f64::NEG_INFINITY, f64::max)
                + offset
        })
        .collect())
}

/// Indices attaining the minimum of some objective, first index on ties.
fn extremes(points: &[&[f64]]) -> Vec<usize> {
    let mut found: Vec<usize> = (0..points[0].len())
        .map(|k| {
            let mut best = 0;
            for (i, p) in points.iter().enumerate().skip(1) {
                if p[k] < points[best][k] {
                    best = i;
                }
            }
            best
        })
        .collect();
    found.sort_unstable();
    found.dedup();
    found
}

/// Hypervolume of the front without each candidate, in candidate order.
fn score(
    points: &[&[f64]],
    reference: &[f64],
    candidates: &[usize],
    parallel: bool,
) -> ParetoResult<Vec<f64>> {
    let without = |i: usize| -> ParetoResult<f64> {
        let rest: Vec<&[f64]> = points
            .iter()
            .enumerate()
            .filter(|&(j, _)| j != i)
            .map(|(_, p)| *p)
            .collect();
        hypervolume(&rest, reference)
    };

    #[cfg(feature = "parallel")]
    {
        if parallel {
            return candidates.par_iter().map(|&i| without(i)).collect();
        }
    }
    #[cfg(not(feature = "parallel"))]
    let _ = parallel;

    candidates.iter().map(|&i| without(i)).collect()
}
