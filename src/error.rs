//! Error types shared by the hypervolume and NSGA-II entry points.
//!
//! Only malformed input is reported through [`ParetoError`]. Degenerate but
//! well-formed input (an empty point set, `k == 0`) has a defined result, and
//! broken internal bookkeeping panics.

use std::fmt;

/// An input shape or value problem detected before any computation starts.
#[derive(Debug, Clone, PartialEq)]
pub enum ParetoError {
    /// The reference point (or every fitness vector) has no coordinates.
    ZeroDimension,

    /// A point's length differs from the reference point's length.
    DimensionMismatch {
        /// Index of the offending point.
        index: usize,
        /// Expected number of coordinates.
        expected: usize,
        /// Actual number of coordinates.
        found: usize,
    },

    /// A coordinate is NaN or infinite.
    ///
    /// `index` is `None` when the value belongs to the reference point.
    InvalidCoordinate {
        /// Index of the offending point, `None` for the reference point.
        index: Option<usize>,
        /// Coordinate position inside the point.
        coordinate: usize,
        /// The rejected value.
        value: f64,
    },

    /// A non-empty selection was requested from an empty population.
    EmptyPopulation {
        /// Number of individuals requested.
        requested: usize,
    },

    /// A fitness vector's length differs from the first individual's.
    InconsistentFitness {
        /// Index of the offending individual.
        index: usize,
        /// Number of objectives of individual 0.
        expected: usize,
        /// Number of objectives found.
        found: usize,
    },

    /// A configuration failed its `validate()` check.
    InvalidConfig(String),
}

/// A type alias for results carrying a [`ParetoError`].
pub type ParetoResult<T> = Result<T, ParetoError>;

impl fmt::Display for ParetoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParetoError::ZeroDimension => write!(f, "points must have at least one coordinate"),
            ParetoError::DimensionMismatch {
                index,
                expected,
                found,
            } => write!(
                f,
                "point {index} has {found} coordinates, reference point has {expected}"
            ),
            ParetoError::InvalidCoordinate {
                index: Some(index),
                coordinate,
                value,
            } => write!(f, "point {index} has non-finite coordinate {coordinate}: {value}"),
            ParetoError::InvalidCoordinate {
                index: None,
                coordinate,
                value,
            } => write!(f, "reference point has non-finite coordinate {coordinate}: {value}"),
            ParetoError::EmptyPopulation { requested } => {
                write!(f, "cannot select {requested} individuals from an empty population")
            }
            ParetoError::InconsistentFitness {
                index,
                expected,
                found,
            } => write!(
                f,
                "individual {index} has {found} objectives, individual 0 has {expected}"
            ),
            ParetoError::InvalidConfig(reason) => write!(f, "invalid configuration: {reason}"),
        }
    }
}

impl std::error::Error for ParetoError {}
