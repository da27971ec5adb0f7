//! Result shaping: allocation summary and heatmap payload.
//!
//! Both views are derived from the best snapshot alone and are
//! deterministic for a given snapshot, so a caller can re-render them
//! without re-deriving any allocation logic.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::demand::DemandTargets;
use crate::feasibility::ScoreMatrix;
use crate::model::{Crop, Farmer};
use crate::state::AllocationState;

/// Farmers assigned to one crop, with produced vs. target tonnage.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CropAllocation {
    pub crop: String,
    /// Ascending farmer ids.
    pub farmer_ids: Vec<u64>,
    pub produced_tons: f64,
    pub target_tons: f64,
}

/// Per-crop breakdown of the best state.
///
/// Entries are ordered by descending produced tonnage; ties break by
/// ascending crop name.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AllocationSummary {
    pub crops: Vec<CropAllocation>,
    /// Energy of the snapshot the summary was built from.
    pub best_energy: f64,
}

impl AllocationSummary {
    pub fn from_state(
        state: &AllocationState,
        farmers: &[Farmer],
        crops: &[Crop],
        targets: &DemandTargets,
        best_energy: f64,
    ) -> Self {
        let mut entries: Vec<CropAllocation> = crops
            .iter()
            .enumerate()
            .map(|(c, crop)| {
                let mut farmer_ids: Vec<u64> = farmers
                    .iter()
                    .enumerate()
                    .filter(|&(f, _)| state.crop_of(f) == c)
                    .map(|(_, farmer)| farmer.id)
                    .collect();
                farmer_ids.sort_unstable();
                CropAllocation {
                    crop: crop.name.clone(),
                    farmer_ids,
                    produced_tons: state.produced(c),
                    target_tons: targets.target(c),
                }
            })
            .collect();

        entries.sort_by(|a, b| {
            b.produced_tons
                .partial_cmp(&a.produced_tons)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.crop.cmp(&b.crop))
        });

        Self {
            crops: entries,
            best_energy,
        }
    }

    /// Total farmers across all crops; equals the cluster size.
    pub fn assigned_farmers(&self) -> usize {
        self.crops.iter().map(|c| c.farmer_ids.len()).sum()
    }
}

/// One heatmap row per farmer, in request order.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HeatmapRow {
    /// Declared location when present, the farmer id otherwise.
    pub farmer: String,
    pub cells: Vec<f64>,
}

/// Farmer × crop grid for the visualization layer.
///
/// `rows[f].cells[c]` is the feasibility score of the pair when farmer
/// `f` is assigned to crop `c` in the best state, and 0.0 otherwise: a
/// zero cell reads "not assigned", a positive cell encodes the
/// assignment together with its agronomic intensity. Columns follow the
/// request's crop order.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Heatmap {
    pub crops: Vec<String>,
    pub rows: Vec<HeatmapRow>,
}

impl Heatmap {
    pub fn from_state(
        state: &AllocationState,
        farmers: &[Farmer],
        crops: &[Crop],
        scores: &ScoreMatrix,
    ) -> Self {
        let rows = farmers
            .iter()
            .enumerate()
            .map(|(f, farmer)| {
                let assigned = state.crop_of(f);
                let cells = (0..crops.len())
                    .map(|c| if c == assigned { scores.get(f, c) } else { 0.0 })
                    .collect();
                HeatmapRow {
                    farmer: farmer
                        .location
                        .clone()
                        .unwrap_or_else(|| farmer.id.to_string()),
                    cells,
                }
            })
            .collect();

        Self {
            crops: crops.iter().map(|c| c.name.clone()).collect(),
            rows,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn fixture() -> (AllocationState, Vec<Farmer>, Vec<Crop>, DemandTargets, ScoreMatrix) {
        let farmers = vec![
            Farmer::new(10),
            Farmer::new(11).with_location("Hebron"),
            Farmer::new(12),
            Farmer::new(13),
        ];
        let crops = vec![Crop::new("Tomato", 2.0), Crop::new("Olive", 2.0)];
        let targets = DemandTargets::from_crops(&crops).unwrap();
        let scores = ScoreMatrix::from_raw(
            vec![90.0, 10.0, 80.0, 20.0, 70.0, 30.0, 60.0, 40.0],
            2,
        );

        let mut rng = StdRng::seed_from_u64(5);
        let mut state = AllocationState::random(2, &[1.0; 4], &mut rng);
        state.reassign(0, 0, 1.0);
        state.reassign(1, 0, 1.0);
        state.reassign(2, 0, 1.0);
        state.reassign(3, 1, 1.0);

        (state, farmers, crops, targets, scores)
    }

    #[test]
    fn test_summary_orders_by_produced_then_name() {
        let (state, farmers, crops, targets, _) = fixture();
        let summary = AllocationSummary::from_state(&state, &farmers, &crops, &targets, 2.0);

        assert_eq!(summary.crops[0].crop, "Tomato");
        assert_eq!(summary.crops[0].farmer_ids, vec![10, 11, 12]);
        assert!((summary.crops[0].produced_tons - 3.0).abs() < 1e-10);
        assert_eq!(summary.crops[1].crop, "Olive");
        assert_eq!(summary.crops[1].farmer_ids, vec![13]);
    }

    #[test]
    fn test_summary_ties_break_alphabetically() {
        let farmers = vec![Farmer::new(0), Farmer::new(1)];
        let crops = vec![Crop::new("Wheat", 1.0), Crop::new("Barley", 1.0)];
        let targets = DemandTargets::from_crops(&crops).unwrap();

        let mut rng = StdRng::seed_from_u64(5);
        let mut state = AllocationState::random(2, &[1.0; 2], &mut rng);
        state.reassign(0, 0, 1.0);
        state.reassign(1, 1, 1.0);

        let summary = AllocationSummary::from_state(&state, &farmers, &crops, &targets, 0.0);
        // Both produce 1.0; Barley sorts first.
        assert_eq!(summary.crops[0].crop, "Barley");
        assert_eq!(summary.crops[1].crop, "Wheat");
    }

    #[test]
    fn test_summary_covers_every_farmer_exactly_once() {
        let (state, farmers, crops, targets, _) = fixture();
        let summary = AllocationSummary::from_state(&state, &farmers, &crops, &targets, 2.0);

        let mut seen: Vec<u64> = summary
            .crops
            .iter()
            .flat_map(|c| c.farmer_ids.iter().copied())
            .collect();
        seen.sort_unstable();
        assert_eq!(seen, vec![10, 11, 12, 13]);
        assert_eq!(summary.assigned_farmers(), 4);
    }

    #[test]
    fn test_heatmap_marks_assigned_cells_with_scores() {
        let (state, farmers, crops, _, scores) = fixture();
        let heatmap = Heatmap::from_state(&state, &farmers, &crops, &scores);

        assert_eq!(heatmap.crops, vec!["Tomato", "Olive"]);
        assert_eq!(heatmap.rows.len(), 4);
        // Farmer 0 assigned to Tomato with score 90.
        assert_eq!(heatmap.rows[0].cells, vec![90.0, 0.0]);
        // Farmer 3 assigned to Olive with score 40.
        assert_eq!(heatmap.rows[3].cells, vec![0.0, 40.0]);
    }

    #[test]
    fn test_heatmap_rows_prefer_location_labels() {
        let (state, farmers, crops, _, scores) = fixture();
        let heatmap = Heatmap::from_state(&state, &farmers, &crops, &scores);

        assert_eq!(heatmap.rows[0].farmer, "10");
        assert_eq!(heatmap.rows[1].farmer, "Hebron");
    }
}
