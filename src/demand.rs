//! Demand target validation.

use crate::error::OptimizeError;
use crate::model::Crop;

/// Validated per-crop demand targets, indexed like the request's crop list.
///
/// Targets stay in tons and are compared directly against summed farmer
/// capacity (also tons per season), so the demand term of the energy
/// function needs no per-unit rescaling.
#[derive(Debug, Clone, PartialEq)]
pub struct DemandTargets {
    targets: Vec<f64>,
    total: f64,
}

impl DemandTargets {
    /// Builds targets from the request's crop list.
    ///
    /// Missing (zero) or negative demand is treated as 0: assigning such
    /// a crop stays legal but is penalized by the demand term. Fails when
    /// the list is empty, a demand is not finite, or the total demand is
    /// zero: degenerate inputs with nothing to optimize toward.
    pub fn from_crops(crops: &[Crop]) -> Result<Self, OptimizeError> {
        if crops.is_empty() {
            return Err(OptimizeError::InvalidDemand("demand map is empty".into()));
        }

        let mut targets = Vec::with_capacity(crops.len());
        for crop in crops {
            if !crop.demand_tons.is_finite() {
                return Err(OptimizeError::InvalidDemand(format!(
                    "demand for '{}' is not finite",
                    crop.name
                )));
            }
            targets.push(crop.demand_tons.max(0.0));
        }

        let total: f64 = targets.iter().sum();
        if total <= 0.0 {
            return Err(OptimizeError::InvalidDemand("total demand is zero".into()));
        }

        Ok(Self { targets, total })
    }

    /// Target tonnage for one crop index.
    pub fn target(&self, crop: usize) -> f64 {
        self.targets[crop]
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.targets
    }

    /// Total demand across all crops.
    pub fn total(&self) -> f64 {
        self.total
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_targets_keep_tons() {
        let crops = vec![
            Crop::new("Tomato", 20.0),
            Crop::new("Wheat", 15.0),
            Crop::new("Olive", 15.0),
        ];
        let targets = DemandTargets::from_crops(&crops).unwrap();
        assert_eq!(targets.len(), 3);
        assert!((targets.target(0) - 20.0).abs() < 1e-10);
        assert!((targets.total() - 50.0).abs() < 1e-10);
    }

    #[test]
    fn test_empty_demand_is_invalid() {
        let err = DemandTargets::from_crops(&[]).unwrap_err();
        assert!(matches!(err, OptimizeError::InvalidDemand(_)));
    }

    #[test]
    fn test_zero_total_demand_is_invalid() {
        let crops = vec![Crop::new("Tomato", 0.0), Crop::new("Wheat", 0.0)];
        let err = DemandTargets::from_crops(&crops).unwrap_err();
        assert!(matches!(err, OptimizeError::InvalidDemand(_)));
    }

    #[test]
    fn test_negative_demand_clamps_to_zero() {
        let crops = vec![Crop::new("Tomato", -3.0), Crop::new("Wheat", 10.0)];
        let targets = DemandTargets::from_crops(&crops).unwrap();
        assert!((targets.target(0) - 0.0).abs() < 1e-10);
        assert!((targets.total() - 10.0).abs() < 1e-10);
    }

    #[test]
    fn test_non_finite_demand_is_invalid() {
        let crops = vec![Crop::new("Tomato", f64::NAN), Crop::new("Wheat", 10.0)];
        let err = DemandTargets::from_crops(&crops).unwrap_err();
        assert!(err.to_string().contains("Tomato"));
    }
}
