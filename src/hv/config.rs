//! Least-contributor configuration.

/// Configuration for [`least_contributor`](super::least_contributor).
///
/// # Examples
///
/// ```
/// use u_pareto::hv::ContributionConfig;
///
/// let config = ContributionConfig::default()
///     .with_reference(vec![10.0, 10.0])
///     .with_parallel(true);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContributionConfig {
    /// Fixed reference point. When `None`, the reference is the per-objective
    /// maximum of the front plus [`reference_offset`](Self::reference_offset).
    pub reference: Option<Vec<f64>>,

    /// Distance added to the front's maxima to derive a reference point.
    pub reference_offset: f64,

    /// Scores the candidates on the rayon thread pool.
    ///
    /// Only effective with the `parallel` feature; ignored otherwise.
    pub parallel: bool,
}

impl Default for ContributionConfig {
    fn default() -> Self {
        Self {
            reference: None,
            reference_offset: 1.0,
            parallel: false,
        }
    }
}

impl ContributionConfig {
    pub fn with_reference(mut self, reference: Vec<f64>) -> Self {
        self.reference = Some(reference);
        self
    }

    pub fn with_reference_offset(mut self, offset: f64) -> Self {
        self.reference_offset = offset;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if !self.reference_offset.is_finite() || self.reference_offset <= 0.0 {
            return Err(format!(
                "reference_offset must be positive and finite, got {}",
                self.reference_offset
            ));
        }
        if let Some(reference) = &self.reference {
            if reference.is_empty() {
                return Err("reference must have at least one coordinate".into());
            }
            if let Some(v) = reference.iter().find(|v| !v.is_finite()) {
                return Err(format!("reference coordinates must be finite, got {v}"));
            }
        }
        Ok(())
    }
}
