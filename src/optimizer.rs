//! Entry point wiring the components together.

use log::debug;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::anneal::{AnnealConfig, AnnealRunner};
use crate::climate::ClimateProvider;
use crate::demand::DemandTargets;
use crate::energy::EnergyModel;
use crate::error::OptimizeError;
use crate::feasibility::{FeasibilityScorer, ScoreMatrix};
use crate::model::{Crop, Farmer};
use crate::report::{AllocationSummary, Heatmap};

/// Everything a caller needs from one optimization run.
#[derive(Debug, Clone)]
pub struct OptimizeOutcome {
    pub summary: AllocationSummary,
    pub heatmap: Heatmap,
    pub best_energy: f64,
    pub initial_energy: f64,
    pub iterations: usize,
    pub final_temperature: f64,
    pub accepted_moves: usize,
    pub improving_moves: usize,
    /// Best energy sampled over the run, for convergence inspection.
    pub energy_history: Vec<f64>,
}

impl OptimizeOutcome {
    /// Energy-derived confidence in `[0, 100]`: how much of the initial
    /// state's energy the search eliminated, relative to the theoretical
    /// minimum of zero. A zero-energy result scores 100.
    ///
    /// This is the number a presentation layer should show instead of
    /// inventing one.
    pub fn confidence(&self) -> f64 {
        if self.best_energy <= 0.0 {
            return 100.0;
        }
        (100.0 * (1.0 - self.best_energy / self.initial_energy)).clamp(0.0, 100.0)
    }
}

/// Allocation optimizer with injected collaborators.
///
/// Constructed with the external feasibility scorer and climate provider
/// rather than resolving them from process-wide state, so tests can
/// substitute deterministic stubs.
///
/// # Examples
///
/// ```no_run
/// use agri_alloc::anneal::AnnealConfig;
/// use agri_alloc::climate::DistrictClimate;
/// use agri_alloc::model::{Crop, Farmer};
/// use agri_alloc::optimizer::Optimizer;
/// # use agri_alloc::error::FeasibilityError;
/// # use agri_alloc::feasibility::{FeasibilityRequest, FeasibilityScorer};
/// # struct MyScorer;
/// # impl FeasibilityScorer for MyScorer {
/// #     fn score(&self, _r: &FeasibilityRequest<'_>) -> Result<f64, FeasibilityError> { Ok(70.0) }
/// # }
///
/// let farmers: Vec<Farmer> = (0..10).map(Farmer::new).collect();
/// let crops = vec![
///     Crop::new("Tomato", 5.0),
///     Crop::new("Wheat", 3.0),
///     Crop::new("Olive", 2.0),
/// ];
/// let optimizer = Optimizer::new(MyScorer, DistrictClimate::new());
/// let outcome = optimizer
///     .optimize(&farmers, &crops, &AnnealConfig::default().with_seed(42))
///     .unwrap();
/// println!("best energy {}", outcome.best_energy);
/// ```
pub struct Optimizer<S, C> {
    scorer: S,
    climate: C,
    month: u32,
}

impl<S: FeasibilityScorer, C: ClimateProvider> Optimizer<S, C> {
    /// Forecasts default to January; see [`with_forecast_month`].
    ///
    /// [`with_forecast_month`]: Optimizer::with_forecast_month
    pub fn new(scorer: S, climate: C) -> Self {
        Self {
            scorer,
            climate,
            month: 1,
        }
    }

    /// Calendar month (`1..=12`) the feasibility forecasts are built for.
    pub fn with_forecast_month(mut self, month: u32) -> Self {
        self.month = month;
        self
    }

    /// Recommends a crop for every farmer in the cluster.
    ///
    /// Preconditions are checked before any search work, in this order:
    /// an empty farmer set fails with [`OptimizeError::EmptyCluster`],
    /// degenerate demand with [`OptimizeError::InvalidDemand`], fewer
    /// than two crops with [`OptimizeError::InsufficientCrops`], and a
    /// bad configuration with [`OptimizeError::InvalidConfig`]. No
    /// partial result is produced on failure.
    pub fn optimize(
        &self,
        farmers: &[Farmer],
        crops: &[Crop],
        config: &AnnealConfig,
    ) -> Result<OptimizeOutcome, OptimizeError> {
        let (targets, scores) = self.prepare(farmers, crops, config)?;
        Ok(self.run_chain(farmers, crops, &targets, &scores, config))
    }

    /// Runs several independent annealing chains and keeps the lowest
    /// best-energy outcome (ties favor the earliest chain).
    ///
    /// Chains share only the read-only score matrix; each owns its state
    /// and random source, seeded `base, base+1, ...` from the configured
    /// seed so the whole fan-out stays reproducible.
    #[cfg(feature = "parallel")]
    pub fn optimize_chains(
        &self,
        farmers: &[Farmer],
        crops: &[Crop],
        config: &AnnealConfig,
        chains: usize,
    ) -> Result<OptimizeOutcome, OptimizeError>
    where
        S: Sync,
        C: Sync,
    {
        let (targets, scores) = self.prepare(farmers, crops, config)?;
        let base_seed = config.seed.unwrap_or_else(rand::random);

        let outcomes: Vec<OptimizeOutcome> = (0..chains.max(1))
            .into_par_iter()
            .map(|chain| {
                let chain_config = config
                    .clone()
                    .with_seed(base_seed.wrapping_add(chain as u64));
                self.run_chain(farmers, crops, &targets, &scores, &chain_config)
            })
            .collect();

        let best = outcomes
            .into_iter()
            .reduce(|best, candidate| {
                if candidate.best_energy < best.best_energy {
                    candidate
                } else {
                    best
                }
            })
            .expect("at least one chain runs");
        Ok(best)
    }

    /// Validates the request and resolves the score matrix.
    fn prepare(
        &self,
        farmers: &[Farmer],
        crops: &[Crop],
        config: &AnnealConfig,
    ) -> Result<(DemandTargets, ScoreMatrix), OptimizeError> {
        if farmers.is_empty() {
            return Err(OptimizeError::EmptyCluster);
        }
        let targets = DemandTargets::from_crops(crops)?;
        if crops.len() < 2 {
            return Err(OptimizeError::InsufficientCrops { found: crops.len() });
        }
        config.validate().map_err(OptimizeError::InvalidConfig)?;

        let scores = ScoreMatrix::build(farmers, crops, &self.scorer, &self.climate, self.month);
        Ok((targets, scores))
    }

    fn run_chain(
        &self,
        farmers: &[Farmer],
        crops: &[Crop],
        targets: &DemandTargets,
        scores: &ScoreMatrix,
        config: &AnnealConfig,
    ) -> OptimizeOutcome {
        let capacities: Vec<f64> = farmers.iter().map(|f| f.capacity).collect();
        let energy = EnergyModel::new(targets, scores, config.infeasibility_weight);

        let outcome = AnnealRunner::run(&capacities, crops.len(), &energy, config);
        debug!(
            "annealing finished: energy {:.3} -> {:.3} in {} steps ({} accepted)",
            outcome.initial_energy, outcome.best_energy, outcome.iterations, outcome.accepted_moves
        );

        let summary =
            AllocationSummary::from_state(&outcome.best, farmers, crops, targets, outcome.best_energy);
        let heatmap = Heatmap::from_state(&outcome.best, farmers, crops, scores);

        OptimizeOutcome {
            summary,
            heatmap,
            best_energy: outcome.best_energy,
            initial_energy: outcome.initial_energy,
            iterations: outcome.iterations,
            final_temperature: outcome.final_temperature,
            accepted_moves: outcome.accepted_moves,
            improving_moves: outcome.improving_moves,
            energy_history: outcome.energy_history,
        }
    }
}
