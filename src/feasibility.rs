//! Feasibility scorer boundary and per-run score cache.
//!
//! Suitability scores are expensive to compute and deterministic for a
//! given input set within one run, while the annealing engine asks for
//! the same (farmer, crop) pair many times. All pairs are enumerable up
//! front, so the adapter resolves the whole matrix before the search
//! loop starts: external calls are bounded by `farmers × crops`
//! regardless of iteration count, and the hot loop performs no I/O.

use std::collections::HashMap;

use log::warn;

use crate::climate::{ClimateForecast, ClimateProvider};
use crate::error::FeasibilityError;
use crate::model::{Crop, Farmer};
use crate::soil::{self, NutrientProfile};

/// Inputs handed to an external scorer for one (farmer, crop) pair.
#[derive(Debug, Clone)]
pub struct FeasibilityRequest<'a> {
    pub farmer: &'a Farmer,
    pub crop: &'a str,
    /// Soil chemistry resolved from the farmer's declared soil type.
    pub nutrients: NutrientProfile,
    pub ph: f64,
    /// Seasonal projection for the farmer's location.
    pub forecast: &'a ClimateForecast,
}

/// Externally supplied suitability model.
///
/// Returns a score in `[0, 100]`; higher means better suited. The
/// adapter clamps out-of-range values and recovers from errors, so
/// implementations never abort a run.
pub trait FeasibilityScorer {
    fn score(&self, request: &FeasibilityRequest<'_>) -> Result<f64, FeasibilityError>;
}

/// Dense `farmers × crops` score matrix, precomputed before the search.
///
/// Read-only once built, so independent annealing chains can share one
/// matrix without synchronization.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreMatrix {
    scores: Vec<f64>,
    n_crops: usize,
}

impl ScoreMatrix {
    /// Resolves every (farmer, crop) pair through the scorer.
    ///
    /// Forecasts are fetched once per distinct location and reused for
    /// every crop at that location. A score outside `[0, 100]` is clamped
    /// and logged; a scorer failure or NaN defaults the pair to 0
    /// (maximally infeasible) and is logged. Neither aborts the run.
    pub fn build(
        farmers: &[Farmer],
        crops: &[Crop],
        scorer: &dyn FeasibilityScorer,
        climate: &dyn ClimateProvider,
        month: u32,
    ) -> Self {
        let mut forecasts: HashMap<String, ClimateForecast> = HashMap::new();
        let mut scores = Vec::with_capacity(farmers.len() * crops.len());

        for farmer in farmers {
            let location = farmer.location.as_deref().unwrap_or("");
            let forecast: &ClimateForecast = forecasts
                .entry(location.to_string())
                .or_insert_with(|| climate.seasonal_forecast(location, month));

            let nutrients = soil::nutrients(farmer.soil);
            for crop in crops {
                let request = FeasibilityRequest {
                    farmer,
                    crop: &crop.name,
                    nutrients,
                    ph: farmer.ph,
                    forecast,
                };
                scores.push(resolve(scorer.score(&request), farmer, crop));
            }
        }

        Self {
            scores,
            n_crops: crops.len(),
        }
    }

    /// Builds a matrix from raw row-major scores; stub scorers in tests
    /// and benchmarks use this to skip the boundary entirely.
    pub fn from_raw(scores: Vec<f64>, n_crops: usize) -> Self {
        assert!(n_crops > 0 && scores.len() % n_crops == 0);
        Self { scores, n_crops }
    }

    /// Cached score for a (farmer index, crop index) pair.
    pub fn get(&self, farmer: usize, crop: usize) -> f64 {
        self.scores[farmer * self.n_crops + crop]
    }

    pub fn n_farmers(&self) -> usize {
        self.scores.len() / self.n_crops
    }

    pub fn n_crops(&self) -> usize {
        self.n_crops
    }
}

/// Collapses a scorer response into a usable in-range score.
fn resolve(result: Result<f64, FeasibilityError>, farmer: &Farmer, crop: &Crop) -> f64 {
    match result {
        Ok(score) if (0.0..=100.0).contains(&score) => score,
        Ok(score) if score.is_nan() => {
            warn!(
                "scorer returned NaN for farmer {} / crop {}; treating as infeasible",
                farmer.id, crop.name
            );
            0.0
        }
        Ok(score) => {
            warn!(
                "score {score} for farmer {} / crop {} out of range, clamping",
                farmer.id, crop.name
            );
            score.clamp(0.0, 100.0)
        }
        Err(err) => {
            warn!("{err}; treating pair as infeasible");
            0.0
        }
    }
}
