//! Candidate solution state.

use rand::Rng;

/// One farmer-to-crop assignment plus its derived per-crop production
/// tally.
///
/// Invariants: every farmer has exactly one assigned crop at all times,
/// and `produced[c]` equals the capacity sum of the farmers assigned to
/// crop `c`. The annealing engine mutates the state in place, one
/// reassignment per step.
#[derive(Debug, Clone, PartialEq)]
pub struct AllocationState {
    assignment: Vec<usize>,
    produced: Vec<f64>,
}

impl AllocationState {
    /// Random valid state: each farmer gets a uniformly random crop.
    pub fn random<R: Rng>(n_crops: usize, capacities: &[f64], rng: &mut R) -> Self {
        let mut produced = vec![0.0; n_crops];
        let assignment = capacities
            .iter()
            .map(|&capacity| {
                let crop = rng.random_range(0..n_crops);
                produced[crop] += capacity;
                crop
            })
            .collect();
        Self {
            assignment,
            produced,
        }
    }

    /// Crop currently assigned to a farmer index.
    pub fn crop_of(&self, farmer: usize) -> usize {
        self.assignment[farmer]
    }

    /// Capacity sum currently assigned to a crop index.
    pub fn produced(&self, crop: usize) -> f64 {
        self.produced[crop]
    }

    pub fn assignment(&self) -> &[usize] {
        &self.assignment
    }

    pub fn produced_by_crop(&self) -> &[f64] {
        &self.produced
    }

    pub fn n_farmers(&self) -> usize {
        self.assignment.len()
    }

    /// Moves one farmer to a new crop, keeping the production tally
    /// consistent. O(1): only the old and new crop totals change.
    pub fn reassign(&mut self, farmer: usize, new_crop: usize, capacity: f64) {
        let old_crop = self.assignment[farmer];
        self.produced[old_crop] -= capacity;
        self.produced[new_crop] += capacity;
        self.assignment[farmer] = new_crop;
    }
}
