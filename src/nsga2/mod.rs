//! NSGA-II environmental selection.
//!
//! Ranks a population into Pareto fronts by mutual dominance and truncates
//! the first front that does not fit using crowding distance. Fitness vectors
//! use the **maximization** convention; negate minimized objectives.
//!
//! # Key Functions
//!
//! - [`select_nsga2`] / [`select_nsga2_with`]: pick `k` survivors
//! - [`sort_nondominated`]: fast non-dominated sorting into fronts
//! - [`crowding_distance`]: density estimate within one front
//! - [`dominates`]: Pareto dominance test
//!
//! # Key Types
//!
//! - [`Nsga2Config`]: selection parameters
//! - [`CrowdingNormalization`]: raw or range-normalized crowding gaps
//!
//! # References
//!
//! - Deb et al. (2002), "A Fast and Elitist Multiobjective Genetic Algorithm: NSGA-II"
//! - IEEE Transactions on Evolutionary Computation, 6(2), 182-197

mod config;
mod crowding;
mod select;
mod sort;

pub use config::{CrowdingNormalization, Nsga2Config};
pub use crowding::crowding_distance;
pub use select::{select_nsga2, select_nsga2_with};
pub use sort::{dominates, sort_nondominated};
