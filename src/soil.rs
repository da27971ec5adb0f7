//! Soil-nutrient rule table.
//!
//! Maps a declared soil class to the standard N-P-K chemistry assumed
//! for it. Farmers that declare no soil type get the dataset-wide
//! default profile.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Soil classes distinguished by the nutrient table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SoilType {
    Clay,
    Loamy,
    Sandy,
}

/// Standard nitrogen / phosphorus / potassium content of a soil class.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NutrientProfile {
    pub nitrogen: f64,
    pub phosphorus: f64,
    pub potassium: f64,
}

impl NutrientProfile {
    /// Profile assumed when a farmer declares no soil type.
    pub const DEFAULT: Self = Self {
        nitrogen: 50.0,
        phosphorus: 50.0,
        potassium: 50.0,
    };
}

/// Resolves a declared soil type to its standard chemistry.
pub fn nutrients(soil: Option<SoilType>) -> NutrientProfile {
    match soil {
        Some(SoilType::Clay) => NutrientProfile {
            nitrogen: 80.0,
            phosphorus: 60.0,
            potassium: 70.0,
        },
        Some(SoilType::Loamy) => NutrientProfile {
            nitrogen: 60.0,
            phosphorus: 50.0,
            potassium: 60.0,
        },
        Some(SoilType::Sandy) => NutrientProfile {
            nitrogen: 30.0,
            phosphorus: 20.0,
            potassium: 30.0,
        },
        None => NutrientProfile::DEFAULT,
    }
}
