//! Pareto quality indicators and selection for multi-objective optimization.
//!
//! Provides the two primitives that multi-objective evolutionary algorithms
//! run every generation:
//!
//! - **Hypervolume**: exact dominated volume of a point set relative to a
//!   reference point, by dimension sweep with a balanced-tree skyline, plus
//!   least-contributor selection (SMS-EMOA style).
//! - **NSGA-II selection**: fast non-dominated sorting into fronts and
//!   crowding-distance truncation of the boundary front.
//!
//! # Conventions
//!
//! [`hv`] **minimizes** every coordinate; [`nsga2`] **maximizes** every
//! fitness component. Callers holding weighted fitness values negate them for
//! the hypervolume.
//!
//! All functions are pure: internal structures are allocated per call, so
//! concurrent calls on shared input are safe.
//!
//! # Features
//!
//! - `parallel`: scores hypervolume contributions on the rayon thread pool
//! - `serde`: `Serialize`/`Deserialize` for configuration types
//!
//! # Example
//!
//! ```
//! use u_pareto::hv::hypervolume;
//! use u_pareto::nsga2::select_nsga2;
//!
//! let fitness = vec![vec![1.0, 5.0], vec![5.0, 1.0], vec![3.0, 3.0], vec![2.0, 2.0]];
//! let survivors = select_nsga2(&fitness, 3).unwrap();
//! assert_eq!(survivors, vec![0, 1, 2]);
//!
//! // maximized fitness enters the hypervolume negated
//! let front: Vec<Vec<f64>> = survivors
//!     .iter()
//!     .map(|&i| fitness[i].iter().map(|v| -v).collect())
//!     .collect();
//! let hv = hypervolume(&front, &[0.0, 0.0]).unwrap();
//! assert_eq!(hv, 5.0 + 4.0 + 4.0);
//! ```

pub mod error;
pub mod hv;
pub mod nsga2;

pub use error::{ParetoError, ParetoResult};
