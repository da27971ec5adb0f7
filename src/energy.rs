//! Energy function: squared demand deviation plus weighted infeasibility.

use crate::demand::DemandTargets;
use crate::feasibility::ScoreMatrix;
use crate::state::AllocationState;

/// Scores allocation states; lower is better, 0 is the theoretical ideal
/// (exact demand match, perfect feasibility everywhere).
///
/// ```text
/// energy = sum_crops (produced[c] - target[c])^2
///        + weight * sum_farmers (100 - score(f, crop(f)))
/// ```
///
/// The squared demand term penalizes shortfall and oversupply
/// symmetrically and makes large imbalances disproportionately costly;
/// the infeasibility term steers the search away from assignments the
/// scorer considers agronomically unsuited.
#[derive(Debug, Clone, Copy)]
pub struct EnergyModel<'a> {
    targets: &'a DemandTargets,
    scores: &'a ScoreMatrix,
    weight: f64,
}

impl<'a> EnergyModel<'a> {
    pub fn new(targets: &'a DemandTargets, scores: &'a ScoreMatrix, weight: f64) -> Self {
        Self {
            targets,
            scores,
            weight,
        }
    }

    /// Full recomputation over the whole state. Used once per run at
    /// initialization and by tests; the step loop relies on [`delta`].
    ///
    /// [`delta`]: EnergyModel::delta
    pub fn energy(&self, state: &AllocationState) -> f64 {
        let demand: f64 = state
            .produced_by_crop()
            .iter()
            .zip(self.targets.as_slice())
            .map(|(&produced, &target)| (produced - target) * (produced - target))
            .sum();

        let infeasibility: f64 = state
            .assignment()
            .iter()
            .enumerate()
            .map(|(farmer, &crop)| 100.0 - self.scores.get(farmer, crop))
            .sum();

        demand + self.weight * infeasibility
    }

    /// Energy change from moving `farmer` (with `capacity`) from
    /// `old_crop` to `new_crop`, without applying the move.
    ///
    /// O(1): a single reassignment touches two demand-term cells (the
    /// old and new crop totals) and the farmer's own infeasibility term.
    pub fn delta(
        &self,
        state: &AllocationState,
        farmer: usize,
        old_crop: usize,
        new_crop: usize,
        capacity: f64,
    ) -> f64 {
        let t_old = self.targets.target(old_crop);
        let t_new = self.targets.target(new_crop);
        let p_old = state.produced(old_crop);
        let p_new = state.produced(new_crop);

        let demand_delta = (p_old - capacity - t_old).powi(2) - (p_old - t_old).powi(2)
            + (p_new + capacity - t_new).powi(2)
            - (p_new - t_new).powi(2);

        let infeasibility_delta =
            self.scores.get(farmer, old_crop) - self.scores.get(farmer, new_crop);

        demand_delta + self.weight * infeasibility_delta
    }
}
