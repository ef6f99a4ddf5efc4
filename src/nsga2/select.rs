//! NSGA-II environmental selection.

use super::config::Nsga2Config;
use super::crowding::crowding_distance;
use super::sort::sort_nondominated;
use crate::error::{ParetoError, ParetoResult};
use log::debug;

/// Selects `k` individuals with the default [`Nsga2Config`].
///
/// See [`select_nsga2_with`].
///
/// # Example
///
/// ```
/// use u_pareto::nsga2::select_nsga2;
///
/// // both objectives maximized
/// let fitness = vec![
///     vec![1.0, 5.0],
///     vec![5.0, 1.0],
///     vec![3.0, 3.0],
///     vec![2.0, 2.0],
/// ];
/// assert_eq!(select_nsga2(&fitness, 2).unwrap(), vec![0, 1]);
/// ```
pub fn select_nsga2<P: AsRef<[f64]>>(fitness: &[P], k: usize) -> ParetoResult<Vec<usize>> {
    select_nsga2_with(fitness, k, &Nsga2Config::default())
}

/// NSGA-II truncation selection (Deb et al., 2002).
///
/// Returns exactly `min(k, n)` distinct indices, front-major. Whole fronts
/// are taken while they fit; the first front that does not fit is ranked by
/// crowding distance, highest first with ties in front order, and filled up
/// to the limit. Crowding distance is computed for that front only.
///
/// Equal distances go to the earlier front position. Five identical
/// individuals with `k = 3` yield `[0, 4, 1]`: both extremes, then the first
/// interior one. Taking from the back of an ascending order would give
/// `{4, 0, 3}` instead.
///
/// Fitness vectors are maximized.
///
/// # Errors
///
/// - [`ParetoError::InvalidConfig`] if `config` fails validation
/// - the errors of [`sort_nondominated`](super::sort_nondominated)
pub fn select_nsga2_with<P: AsRef<[f64]>>(
    fitness: &[P],
    k: usize,
    config: &Nsga2Config,
) -> ParetoResult<Vec<usize>> {
    config.validate().map_err(ParetoError::InvalidConfig)?;

    let fronts = sort_nondominated(fitness, k, false)?;
    let target = k.min(fitness.len());
    let mut chosen = Vec::with_capacity(target);

    for front in &fronts {
        if chosen.len() + front.len() <= target {
            chosen.extend_from_slice(front);
            continue;
        }

        let distances = crowding_distance(fitness, front, config.normalization);
        let mut ranked: Vec<usize> = (0..front.len()).collect();
        ranked.sort_by(|&a, &b| distances[b].total_cmp(&distances[a]));

        let room = target - chosen.len();
        debug!(
            "nsga2: truncating front of {} to {room} by crowding distance",
            front.len()
        );
        chosen.extend(ranked[..room].iter().map(|&pos| front[pos]));
        break;
    }

    debug!(
        "nsga2: selected {} of {} from {} ranked fronts",
        chosen.len(),
        fitness.len(),
        fronts.len()
    );
    debug_assert_eq!(chosen.len(), target);

    Ok(chosen)
}

// ============================================================================
// Tests
// ============================================================================
