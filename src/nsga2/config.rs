//! NSGA-II selection configuration.

/// How crowding gaps are scaled before they are summed.
///
/// # References
///
/// - Raw: Deb et al. (2002) as commonly implemented in native selection code
/// - Range: Deb et al. (2002), eq. (1) with an extra `1 / m` factor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CrowdingNormalization {
    /// Gaps are added in raw objective units.
    ///
    /// Objectives with larger scales dominate the sum.
    #[default]
    Raw,

    /// Each gap is divided by `m × (max − min)` of its objective within the
    /// front. Objectives with zero range contribute nothing.
    Range,
}

/// Configuration for [`select_nsga2_with`](super::select_nsga2_with).
///
/// # Examples
///
/// ```
/// use u_pareto::nsga2::{CrowdingNormalization, Nsga2Config};
///
/// let config = Nsga2Config::default().with_normalization(CrowdingNormalization::Range);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Nsga2Config {
    /// Crowding-distance scaling for the truncated front.
    pub normalization: CrowdingNormalization,
}

impl Nsga2Config {
    pub fn with_normalization(mut self, normalization: CrowdingNormalization) -> Self {
        self.normalization = normalization;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        Ok(())
    }
}
