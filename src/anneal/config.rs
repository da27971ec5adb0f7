//! Annealing configuration.

/// Configuration for one annealing run.
///
/// Temperature is cooled geometrically (`T_next = cooling_rate * T`) after
/// **every** step; the run terminates when the iteration budget is
/// exhausted or the temperature falls below the floor, whichever comes
/// first.
///
/// # Examples
///
/// ```
/// use agri_alloc::anneal::AnnealConfig;
///
/// let config = AnnealConfig::default()
///     .with_max_iterations(20_000)
///     .with_cooling_rate(0.999)
///     .with_seed(42);
/// ```
#[derive(Debug, Clone)]
pub struct AnnealConfig {
    /// Starting temperature. The default is high enough that early
    /// acceptance probability for typical demand-term deltas exceeds
    /// ~0.8.
    pub initial_temperature: f64,

    /// Temperature below which the run stops.
    pub temperature_floor: f64,

    /// Geometric decay factor in (0, 1), applied after every step. The
    /// default reaches the floor within the default iteration budget.
    pub cooling_rate: f64,

    /// Hard step budget for the run.
    pub max_iterations: usize,

    /// Weight λ of the infeasibility term. The default scales a fully
    /// infeasible farmer (score 0) to the same order as missing one
    /// crop's target by a ton or two.
    pub infeasibility_weight: f64,

    /// Seed for the chain's random source. `None` draws a fresh seed,
    /// trading reproducibility for variety.
    pub seed: Option<u64>,
}

impl Default for AnnealConfig {
    fn default() -> Self {
        Self {
            initial_temperature: 1000.0,
            temperature_floor: 1e-3,
            cooling_rate: 0.998,
            max_iterations: 10_000,
            infeasibility_weight: 0.02,
            seed: None,
        }
    }
}

impl AnnealConfig {
    pub fn with_initial_temperature(mut self, t: f64) -> Self {
        self.initial_temperature = t;
        self
    }

    pub fn with_temperature_floor(mut self, t: f64) -> Self {
        self.temperature_floor = t;
        self
    }

    pub fn with_cooling_rate(mut self, rate: f64) -> Self {
        self.cooling_rate = rate;
        self
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_infeasibility_weight(mut self, weight: f64) -> Self {
        self.infeasibility_weight = weight;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if !self.initial_temperature.is_finite() || self.initial_temperature <= 0.0 {
            return Err("initial_temperature must be positive".into());
        }
        if !self.temperature_floor.is_finite() || self.temperature_floor <= 0.0 {
            return Err("temperature_floor must be positive".into());
        }
        if self.temperature_floor >= self.initial_temperature {
            return Err("temperature_floor must be less than initial_temperature".into());
        }
        if !(self.cooling_rate > 0.0 && self.cooling_rate < 1.0) {
            return Err(format!(
                "cooling_rate must be in (0, 1), got {}",
                self.cooling_rate
            ));
        }
        if self.max_iterations == 0 {
            return Err("max_iterations must be at least 1".into());
        }
        if !self.infeasibility_weight.is_finite() || self.infeasibility_weight < 0.0 {
            return Err("infeasibility_weight must be non-negative".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = AnnealConfig::default();
        assert!(config.validate().is_ok());
        assert!((config.initial_temperature - 1000.0).abs() < 1e-10);
        assert!((config.temperature_floor - 1e-3).abs() < 1e-12);
        assert_eq!(config.max_iterations, 10_000);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_builder_chain() {
        let config = AnnealConfig::default()
            .with_initial_temperature(50.0)
            .with_temperature_floor(1e-5)
            .with_cooling_rate(0.995)
            .with_max_iterations(500)
            .with_infeasibility_weight(0.0)
            .with_seed(7);

        assert!((config.initial_temperature - 50.0).abs() < 1e-10);
        assert!((config.cooling_rate - 0.995).abs() < 1e-10);
        assert_eq!(config.max_iterations, 500);
        assert_eq!(config.seed, Some(7));
    }

    #[test]
    fn test_validate_rejects_bad_temperatures() {
        assert!(AnnealConfig::default()
            .with_initial_temperature(-1.0)
            .validate()
            .is_err());
        assert!(AnnealConfig::default()
            .with_temperature_floor(0.0)
            .validate()
            .is_err());
        assert!(AnnealConfig::default()
            .with_initial_temperature(1e-4)
            .validate()
            .is_err(), "floor above initial temperature must fail");
    }

    #[test]
    fn test_validate_rejects_bad_cooling_rate() {
        assert!(AnnealConfig::default().with_cooling_rate(1.0).validate().is_err());
        assert!(AnnealConfig::default().with_cooling_rate(0.0).validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_iterations() {
        assert!(AnnealConfig::default().with_max_iterations(0).validate().is_err());
    }

    #[test]
    fn test_validate_rejects_negative_weight() {
        assert!(AnnealConfig::default()
            .with_infeasibility_weight(-0.5)
            .validate()
            .is_err());
    }
}
