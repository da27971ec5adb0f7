//! Seasonal climate provider.
//!
//! The optimizer itself never looks at weather; forecasts exist to give
//! the feasibility scorer its context. The shipped [`DistrictClimate`]
//! projects a base district profile through seasonal modifiers and flags
//! extreme-weather risk, which is as much climate modeling as this crate
//! does.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt;

/// Season of the year, derived from a calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Autumn,
}

impl Season {
    /// Season for a calendar month in `1..=12`.
    pub fn from_month(month: u32) -> Self {
        match month {
            12 | 1 | 2 => Season::Winter,
            3..=5 => Season::Spring,
            6..=8 => Season::Summer,
            _ => Season::Autumn,
        }
    }

    /// Temperature offset (°C) and rainfall multiplier for the season.
    fn modifiers(self) -> (f64, f64) {
        match self {
            Season::Winter => (-8.0, 2.0),
            Season::Spring => (0.0, 0.8),
            Season::Summer => (8.0, 0.0),
            Season::Autumn => (-2.0, 0.5),
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Season::Winter => "Winter",
            Season::Spring => "Spring",
            Season::Summer => "Summer",
            Season::Autumn => "Autumn",
        };
        f.write_str(name)
    }
}

/// Broad climate class of a district.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ClimateType {
    Mediterranean,
    Arid,
    Highland,
    CoastalPlain,
    Coastal,
}

impl fmt::Display for ClimateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ClimateType::Mediterranean => "Mediterranean",
            ClimateType::Arid => "Arid",
            ClimateType::Highland => "Highland",
            ClimateType::CoastalPlain => "Coastal Plain",
            ClimateType::Coastal => "Coastal",
        };
        f.write_str(name)
    }
}

/// Extreme-weather flag attached to a forecast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ClimateRisk {
    Stable,
    HighHeatStress,
    FrostWarning,
    FlashFloodRisk,
}

impl fmt::Display for ClimateRisk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ClimateRisk::Stable => "Stable",
            ClimateRisk::HighHeatStress => "High Heat Stress",
            ClimateRisk::FrostWarning => "Frost Warning",
            ClimateRisk::FlashFloodRisk => "Flash Flood Risk",
        };
        f.write_str(name)
    }
}

/// Seasonal projection for one location.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ClimateForecast {
    /// Resolved district name (falls back when the input is unknown).
    pub location: String,
    pub season: Season,
    pub avg_temp_c: f64,
    pub rainfall_mm: f64,
    pub climate_type: ClimateType,
    pub risk: ClimateRisk,
}

/// External climate boundary.
///
/// The forecast month is an explicit input instead of wall-clock time so
/// two runs over the same request always see the same forecast.
pub trait ClimateProvider {
    fn seasonal_forecast(&self, location: &str, month: u32) -> ClimateForecast;
}

struct DistrictProfile {
    name: &'static str,
    base_temp: f64,
    rain_factor: f64,
    climate_type: ClimateType,
}

/// Base profiles for the districts the original dataset covers. The
/// first entry doubles as the fallback for unknown locations.
const DISTRICT_PROFILES: &[DistrictProfile] = &[
    DistrictProfile {
        name: "Jenin",
        base_temp: 25.0,
        rain_factor: 1.2,
        climate_type: ClimateType::Mediterranean,
    },
    DistrictProfile {
        name: "Jericho",
        base_temp: 32.0,
        rain_factor: 0.2,
        climate_type: ClimateType::Arid,
    },
    DistrictProfile {
        name: "Hebron",
        base_temp: 18.0,
        rain_factor: 1.1,
        climate_type: ClimateType::Highland,
    },
    DistrictProfile {
        name: "Nablus",
        base_temp: 22.0,
        rain_factor: 1.3,
        climate_type: ClimateType::Mediterranean,
    },
    DistrictProfile {
        name: "Tulkarm",
        base_temp: 24.0,
        rain_factor: 1.4,
        climate_type: ClimateType::CoastalPlain,
    },
    DistrictProfile {
        name: "Gaza",
        base_temp: 26.0,
        rain_factor: 0.9,
        climate_type: ClimateType::Coastal,
    },
    DistrictProfile {
        name: "Ramallah",
        base_temp: 20.0,
        rain_factor: 1.2,
        climate_type: ClimateType::Highland,
    },
];

/// Table-driven provider over the built-in district profiles.
///
/// Rainfall is `rain_factor * season multiplier * 50 mm`; temperature is
/// the district base plus the seasonal offset. Deterministic for a given
/// (location, month) pair.
#[derive(Debug, Clone, Copy, Default)]
pub struct DistrictClimate;

impl DistrictClimate {
    pub fn new() -> Self {
        Self
    }

    fn profile(location: &str) -> &'static DistrictProfile {
        DISTRICT_PROFILES
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(location))
            .unwrap_or(&DISTRICT_PROFILES[0])
    }
}

impl ClimateProvider for DistrictClimate {
    fn seasonal_forecast(&self, location: &str, month: u32) -> ClimateForecast {
        let profile = Self::profile(location);
        let season = Season::from_month(month);
        let (temp_mod, rain_mod) = season.modifiers();

        let avg_temp_c = profile.base_temp + temp_mod;
        let rainfall_mm = profile.rain_factor * rain_mod * 50.0;

        ClimateForecast {
            location: profile.name.to_string(),
            season,
            avg_temp_c,
            rainfall_mm,
            climate_type: profile.climate_type,
            risk: classify_risk(avg_temp_c, rainfall_mm, profile.climate_type),
        }
    }
}

/// Flags heatwaves, frost, and the rare arid-district flood.
fn classify_risk(temp: f64, rain: f64, climate_type: ClimateType) -> ClimateRisk {
    if temp > 38.0 {
        ClimateRisk::HighHeatStress
    } else if temp < 5.0 {
        ClimateRisk::FrostWarning
    } else if climate_type == ClimateType::Arid && rain > 100.0 {
        ClimateRisk::FlashFloodRisk
    } else {
        ClimateRisk::Stable
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_season_from_month() {
        assert_eq!(Season::from_month(1), Season::Winter);
        assert_eq!(Season::from_month(12), Season::Winter);
        assert_eq!(Season::from_month(4), Season::Spring);
        assert_eq!(Season::from_month(7), Season::Summer);
        assert_eq!(Season::from_month(10), Season::Autumn);
    }

    #[test]
    fn test_winter_cools_and_wets_the_projection() {
        let forecast = DistrictClimate::new().seasonal_forecast("Jericho", 1);
        // 32 base - 8 winter offset
        assert!((forecast.avg_temp_c - 24.0).abs() < 1e-10);
        // 0.2 factor * 2.0 winter multiplier * 50
        assert!((forecast.rainfall_mm - 20.0).abs() < 1e-10);
        assert_eq!(forecast.season, Season::Winter);
        assert_eq!(forecast.climate_type, ClimateType::Arid);
    }

    #[test]
    fn test_summer_heat_stress_in_jericho() {
        let forecast = DistrictClimate::new().seasonal_forecast("Jericho", 7);
        assert!((forecast.avg_temp_c - 40.0).abs() < 1e-10);
        assert_eq!(forecast.risk, ClimateRisk::HighHeatStress);
    }

    #[test]
    fn test_stable_risk_for_moderate_projection() {
        let forecast = DistrictClimate::new().seasonal_forecast("Nablus", 4);
        assert_eq!(forecast.risk, ClimateRisk::Stable);
    }

    #[test]
    fn test_unknown_location_falls_back() {
        let forecast = DistrictClimate::new().seasonal_forecast("Atlantis", 4);
        assert_eq!(forecast.location, "Jenin");
    }

    #[test]
    fn test_location_match_ignores_case() {
        let forecast = DistrictClimate::new().seasonal_forecast("hebron", 4);
        assert_eq!(forecast.location, "Hebron");
        assert_eq!(forecast.climate_type, ClimateType::Highland);
    }

    #[test]
    fn test_frost_warning_below_five_degrees() {
        assert_eq!(
            classify_risk(3.0, 40.0, ClimateType::Highland),
            ClimateRisk::FrostWarning
        );
    }

    #[test]
    fn test_flash_flood_only_in_arid_districts() {
        assert_eq!(
            classify_risk(25.0, 120.0, ClimateType::Arid),
            ClimateRisk::FlashFloodRisk
        );
        assert_eq!(
            classify_risk(25.0, 120.0, ClimateType::Mediterranean),
            ClimateRisk::Stable
        );
    }

    #[test]
    fn test_forecast_is_deterministic() {
        let provider = DistrictClimate::new();
        assert_eq!(
            provider.seasonal_forecast("Gaza", 3),
            provider.seasonal_forecast("Gaza", 3)
        );
    }
}
