use crate::core::car::CarStats;
use crate::core::driver::Driver;
use crate::core::tire_compound::TireCompound;
use crate::core::track::Track;
use serde::{Deserialize, Serialize};

/// (wear/lap) Base tire wear used to estimate stint lengths when planning a strategy. The race
/// itself resolves wear with race_entry::BASE_WEAR_PER_LAP, the two values are not unified.
pub const EST_BASE_WEAR_PER_LAP: f64 = 2.0;

/// * `compound` - Compound name (Soft, Medium or Hard, unknown names fall back to Hard)
/// * `laps` - Intended length of the stint
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct StintPars {
    pub compound: String,
    pub laps: u32,
}

impl StintPars {
    pub fn new(compound: &TireCompound, laps: u32) -> StintPars {
        StintPars {
            compound: compound.name.to_owned(),
            laps,
        }
    }
}

/// StrategyPreset is a named strategy recipe that is turned into concrete stints by plan_strategy.
///
/// * `Aggressive` -> Soft and Medium alternating, boxing before the tire cliff
/// * `Balanced` -> Medium start, Hard afterwards, boxing slightly into the cliff
/// * `Conserve` -> Hard tires with at most one stop, running deep into the cliff
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
pub enum StrategyPreset {
    Aggressive,
    Balanced,
    Conserve,
}

impl Default for StrategyPreset {
    fn default() -> Self {
        StrategyPreset::Balanced
    }
}

impl StrategyPreset {
    /// from_name_or_balanced returns the preset with the given (case-insensitive) name. Unknown
    /// names fall back to the balanced preset.
    pub fn from_name_or_balanced(name: &str) -> StrategyPreset {
        match name.to_lowercase().as_str() {
            "aggressive" => StrategyPreset::Aggressive,
            "balanced" => StrategyPreset::Balanced,
            "conserve" => StrategyPreset::Conserve,
            _ => {
                log::warn!("Unknown strategy preset {:?}, using Balanced", name);
                StrategyPreset::Balanced
            }
        }
    }

    /// The method returns the compound that is fitted for the stint with the given index.
    fn get_compound(&self, stint_idx: usize) -> &'static TireCompound {
        match self {
            StrategyPreset::Aggressive if stint_idx % 2 == 0 => TireCompound::soft(),
            StrategyPreset::Aggressive => TireCompound::medium(),
            StrategyPreset::Balanced if stint_idx == 0 => TireCompound::medium(),
            StrategyPreset::Balanced => TireCompound::hard(),
            StrategyPreset::Conserve => TireCompound::hard(),
        }
    }

    /// The method returns the (estimated) tire wear at which a stint should end.
    fn get_wear_limit(&self) -> f64 {
        match self {
            StrategyPreset::Aggressive => 60.0,
            StrategyPreset::Balanced => 75.0,
            StrategyPreset::Conserve => 95.0,
        }
    }

    fn get_max_stints(&self) -> Option<usize> {
        match self {
            StrategyPreset::Conserve => Some(2),
            _ => None,
        }
    }
}

/// estimate_wear_per_lap returns the expected tire wear per lap of a car-driver combination on
/// the given compound.
pub fn estimate_wear_per_lap(
    track: &Track,
    car: &CarStats,
    driver: &Driver,
    compound: &TireCompound,
) -> f64 {
    EST_BASE_WEAR_PER_LAP
        * track.tire_wear_multiplier
        * compound.wear_rate
        * (1.0 - car.get_tire_preservation_eff() * 0.3)
        * (1.0 - driver.get_tire_management_eff() * 0.3)
}

/// estimate_stint_laps returns the number of laps until the estimated tire wear reaches the
/// inserted limit (at least one lap).
pub fn estimate_stint_laps(wear_limit: f64, wear_per_lap: f64) -> u32 {
    if wear_per_lap <= 0.0 {
        return u32::MAX;
    }

    ((wear_limit / wear_per_lap).floor() as u32).max(1)
}

/// plan_strategy creates the stints of a preset for a car-driver combination such that they cover
/// exactly the race distance.
pub fn plan_strategy(
    preset: StrategyPreset,
    track: &Track,
    car: &CarStats,
    driver: &Driver,
) -> Vec<StintPars> {
    let mut stints: Vec<StintPars> = Vec::new();
    let mut laps_left = track.laps;

    while laps_left > 0 {
        let compound = preset.get_compound(stints.len());

        // the last permitted stint must go to the flag whatever the tires say
        let last_stint = preset
            .get_max_stints()
            .map_or(false, |max_stints| stints.len() + 1 >= max_stints);

        let laps = if last_stint {
            laps_left
        } else {
            let wear_per_lap = estimate_wear_per_lap(track, car, driver, compound);
            estimate_stint_laps(preset.get_wear_limit(), wear_per_lap).min(laps_left)
        };

        stints.push(StintPars::new(compound, laps));
        laps_left -= laps;
    }

    stints
}
