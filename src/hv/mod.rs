//! Exact hypervolume indicator.
//!
//! The hypervolume of a point set is the Lebesgue measure of the region
//! dominated by the set and bounded by a reference point, with every
//! objective **minimized**. It is the only known unary quality indicator that
//! is strictly monotonic with respect to Pareto dominance.
//!
//! # Key Functions
//!
//! - [`hypervolume`]: exact volume by dimension sweep
//! - [`least_contributor`]: index of the point whose removal loses the least
//!   volume
//!
//! # Key Types
//!
//! - [`ContributionConfig`]: reference point and parallelism for
//!   [`least_contributor`]
//!
//! # References
//!
//! - Zitzler & Thiele (1998), "Multiobjective optimization using evolutionary
//!   algorithms: a comparative case study", PPSN V
//! - Fonseca, Paquete & López-Ibáñez (2006), "An improved dimension-sweep
//!   algorithm for the hypervolume indicator", IEEE CEC

mod avl;
mod config;
mod contribution;
mod list;
mod sweep;

pub use config::ContributionConfig;
pub use contribution::least_contributor;
pub use sweep::hypervolume;
