//! Annealing execution loop.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::config::AnnealConfig;
use crate::energy::EnergyModel;
use crate::state::AllocationState;

/// Best-energy history is sampled every this many steps.
const HISTORY_INTERVAL: usize = 100;

/// Best snapshot and telemetry from one annealing chain.
#[derive(Debug, Clone)]
pub struct AnnealOutcome {
    /// The lowest-energy state observed, not the final one: late
    /// high-temperature-relative accepts can leave the final state worse.
    pub best: AllocationState,

    /// Energy of the best state.
    pub best_energy: f64,

    /// Energy of the initial random state.
    pub initial_energy: f64,

    /// Steps executed.
    pub iterations: usize,

    /// Temperature when the run stopped.
    pub final_temperature: f64,

    /// Accepted moves (including improvements).
    pub accepted_moves: usize,

    /// Strictly improving moves.
    pub improving_moves: usize,

    /// Whether an external cancellation token stopped the run.
    pub cancelled: bool,

    /// Best energy sampled every 100 steps.
    pub energy_history: Vec<f64>,
}

/// Executes the annealing search.
///
/// Callers go through [`crate::optimizer::Optimizer`], which validates
/// the request and the configuration before any search work; the runner
/// assumes both hold.
pub struct AnnealRunner;

impl AnnealRunner {
    /// Runs one chain to termination.
    pub fn run(
        capacities: &[f64],
        n_crops: usize,
        energy: &EnergyModel<'_>,
        config: &AnnealConfig,
    ) -> AnnealOutcome {
        Self::run_with_cancel(capacities, n_crops, energy, config, None)
    }

    /// Runs one chain with an optional cancellation token, checked once
    /// per step.
    pub fn run_with_cancel(
        capacities: &[f64],
        n_crops: usize,
        energy: &EnergyModel<'_>,
        config: &AnnealConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> AnnealOutcome {
        debug_assert!(config.validate().is_ok(), "config validated upstream");
        debug_assert!(!capacities.is_empty() && n_crops >= 2);

        let seed = config.seed.unwrap_or_else(rand::random);
        let mut rng = StdRng::seed_from_u64(seed);

        let n_farmers = capacities.len();
        let mut state = AllocationState::random(n_crops, capacities, &mut rng);
        let mut current_energy = energy.energy(&state);
        let initial_energy = current_energy;

        let mut best = state.clone();
        let mut best_energy = current_energy;

        let mut temperature = config.initial_temperature;
        let mut iterations = 0usize;
        let mut accepted_moves = 0usize;
        let mut improving_moves = 0usize;
        let mut cancelled = false;
        let mut energy_history = vec![best_energy];

        while iterations < config.max_iterations && temperature > config.temperature_floor {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    cancelled = true;
                    break;
                }
            }

            // Propose: a uniformly random farmer moves to a uniformly
            // random crop other than its current one, so every proposal
            // actually changes state.
            let farmer = rng.random_range(0..n_farmers);
            let old_crop = state.crop_of(farmer);
            let mut new_crop = rng.random_range(0..n_crops - 1);
            if new_crop >= old_crop {
                new_crop += 1;
            }

            let capacity = capacities[farmer];
            let delta = energy.delta(&state, farmer, old_crop, new_crop, capacity);

            // Metropolis criterion: one uniform draw decides the
            // probabilistic branch.
            let accept = if delta <= 0.0 {
                if delta < 0.0 {
                    improving_moves += 1;
                }
                true
            } else {
                rng.random::<f64>() < (-delta / temperature).exp()
            };

            if accept {
                state.reassign(farmer, new_crop, capacity);
                current_energy += delta;
                accepted_moves += 1;

                if current_energy < best_energy {
                    best = state.clone();
                    best_energy = current_energy;
                }
            }

            iterations += 1;
            temperature *= config.cooling_rate;

            if iterations.is_multiple_of(HISTORY_INTERVAL) {
                energy_history.push(best_energy);
            }
        }

        if energy_history
            .last()
            .is_none_or(|&last| (last - best_energy).abs() > 1e-12)
        {
            energy_history.push(best_energy);
        }

        AnnealOutcome {
            best,
            best_energy,
            initial_energy,
            iterations,
            final_temperature: temperature,
            accepted_moves,
            improving_moves,
            cancelled,
            energy_history,
        }
    }
}
