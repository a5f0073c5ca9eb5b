use crate::error::{InputError, Result};

/// Parameters controlling polycurve construction.
///
/// Every tolerance the segment creator uses lives here and is passed
/// explicitly; there is no process-wide settings object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolycurveConfig {
    /// Distance below which two points are treated as the same point.
    /// Radii with an absolute value below this are treated as sharp corners.
    pub tolerance: f64,
    /// Before-side reconciliation angle in degrees. When the angle between
    /// (arc midpoint - previous end) and (arc start - previous end) is below
    /// this, a connecting line is inserted.
    pub angle_threshold_merge_deg: f64,
    /// After-side reconciliation angle in degrees, measured from the next
    /// segment's start point toward the arc midpoint and arc end.
    pub angle_threshold_split_deg: f64,
    /// Whether the last vertex connects back to the first.
    pub closed: bool,
}

impl Default for PolycurveConfig {
    fn default() -> Self {
        Self {
            tolerance: 1e-3,
            angle_threshold_merge_deg: 120.0,
            angle_threshold_split_deg: 100.0,
            closed: true,
        }
    }
}

impl PolycurveConfig {
    /// Returns the default configuration for an open curve.
    #[must_use]
    pub fn open() -> Self {
        Self {
            closed: false,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    #[must_use]
    pub fn with_closed(mut self, closed: bool) -> Self {
        self.closed = closed;
        self
    }

    /// Sets both reconciliation thresholds (degrees).
    #[must_use]
    pub fn with_angle_thresholds(mut self, merge_deg: f64, split_deg: f64) -> Self {
        self.angle_threshold_merge_deg = merge_deg;
        self.angle_threshold_split_deg = split_deg;
        self
    }

    /// Checks that the tolerance is positive and both thresholds lie in `(0, 180]`.
    ///
    /// # Errors
    ///
    /// Returns `InputError::InvalidConfig` describing the first offending field.
    pub fn validate(&self) -> Result<()> {
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(InputError::InvalidConfig(format!(
                "tolerance must be positive, got {}",
                self.tolerance
            ))
            .into());
        }
        for (name, value) in [
            ("angle_threshold_merge_deg", self.angle_threshold_merge_deg),
            ("angle_threshold_split_deg", self.angle_threshold_split_deg),
        ] {
            if !(value > 0.0 && value <= 180.0) {
                return Err(InputError::InvalidConfig(format!(
                    "{name} must lie in (0, 180], got {value}"
                ))
                .into());
            }
        }
        Ok(())
    }
}
