//! Request-side data model: farmers and crops.
//!
//! Both are supplied wholesale per optimization request and are immutable
//! for the duration of a run; only the assignment mapping changes during
//! the search.

use crate::soil::SoilType;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A member of the farmer cluster.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Farmer {
    /// Cluster-unique identifier.
    pub id: u64,

    /// Tons producible per season. Defaults to one unit.
    pub capacity: f64,

    /// District the farm sits in. Consumed by the climate provider and
    /// the feasibility scorer; opaque to the search itself.
    pub location: Option<String>,

    /// Declared soil class, resolved to a nutrient profile via the
    /// rule table in [`crate::soil`].
    pub soil: Option<SoilType>,

    /// Soil acidity. Defaults to 6.5.
    pub ph: f64,
}

impl Farmer {
    /// A unit-capacity farmer with no declared location or soil.
    pub fn new(id: u64) -> Self {
        Self {
            id,
            capacity: 1.0,
            location: None,
            soil: None,
            ph: 6.5,
        }
    }

    pub fn with_capacity(mut self, tons: f64) -> Self {
        self.capacity = tons;
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_soil(mut self, soil: SoilType) -> Self {
        self.soil = Some(soil);
        self
    }

    pub fn with_ph(mut self, ph: f64) -> Self {
        self.ph = ph;
        self
    }
}

/// A crop with its national demand target.
///
/// The order of the crop slice handed to the optimizer defines the crop
/// indices used throughout a run, so the caller's ordering (not a hash
/// map's) decides tie behavior and keeps seeded runs reproducible.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Crop {
    pub name: String,

    /// National demand target in tons. Zero is a valid target: nobody
    /// should grow the crop, but assigning it is only penalized, not
    /// forbidden.
    pub demand_tons: f64,
}

impl Crop {
    pub fn new(name: impl Into<String>, demand_tons: f64) -> Self {
        Self {
            name: name.into(),
            demand_tons,
        }
    }
}
