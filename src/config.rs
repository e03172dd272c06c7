use crate::error::{ChromaError, Result};

/// Thresholds that decide which pixels count as the keyed color.
///
/// Copied once per frame at pipeline entry, so a change made while a frame
/// is in flight only shows up on the next one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToleranceConfig {
    /// Maximum hue distance from the sample, in degrees.
    pub hue_range: f64,
    /// Minimum saturation, percent.
    pub sat_min: f64,
    /// Minimum value, percent.
    pub val_min: f64,
    /// Paint matched pixels with the highlight color instead of the background.
    pub preview: bool,
}

impl Default for ToleranceConfig {
    fn default() -> Self {
        Self {
            hue_range: 20.0,
            sat_min: 30.0,
            val_min: 20.0,
            preview: false,
        }
    }
}

impl ToleranceConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.hue_range.is_finite() || self.hue_range < 0.0 {
            return Err(ChromaError::InvalidConfig(format!(
                "hue range must be a non-negative number of degrees, got {}",
                self.hue_range
            )));
        }
        for (name, value) in [("saturation", self.sat_min), ("value", self.val_min)] {
            if !value.is_finite() || !(0.0..=100.0).contains(&value) {
                return Err(ChromaError::InvalidConfig(format!(
                    "{name} minimum must be within 0-100, got {value}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert!(ToleranceConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_out_of_range_values() {
        let negative_hue = ToleranceConfig {
            hue_range: -1.0,
            ..Default::default()
        };
        assert!(matches!(
            negative_hue.validate(),
            Err(ChromaError::InvalidConfig(_))
        ));

        let big_sat = ToleranceConfig {
            sat_min: 100.5,
            ..Default::default()
        };
        assert!(big_sat.validate().is_err());

        let nan_val = ToleranceConfig {
            val_min: f64::NAN,
            ..Default::default()
        };
        assert!(nan_val.validate().is_err());
    }

    #[test]
    fn wide_hue_range_is_allowed() {
        let cfg = ToleranceConfig {
            hue_range: 360.0,
            ..Default::default()
        };
        assert!(cfg.validate().is_ok());
    }
}
