use serde::{Deserialize, Serialize};

fn default_tire_wear_multiplier() -> f64 {
    1.0
}

/// * `name` - Track name
/// * `country` - Country of the event (display only)
/// * `laps` - Race distance in laps
/// * `base_lap_time` - (s) Lap time of a car and driver without any ratings on fresh hard tires
/// * `aero_weight` - Multiplier of the aero ratings for the weighted car performance
/// * `chassis_weight` - Multiplier of the chassis ratings for the weighted car performance
/// * `powertrain_weight` - Multiplier of the powertrain ratings for the weighted car performance
/// * `tire_wear_multiplier` - Multiplier on the base tire wear per lap (defaults to 1.0)
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct TrackPars {
    pub name: String,
    #[serde(default)]
    pub country: String,
    pub laps: u32,
    pub base_lap_time: f64,
    pub aero_weight: f64,
    pub chassis_weight: f64,
    pub powertrain_weight: f64,
    #[serde(default = "default_tire_wear_multiplier")]
    pub tire_wear_multiplier: f64,
}

#[derive(Debug, Clone)]
pub struct Track {
    pub name: String,
    pub laps: u32,
    pub base_lap_time: f64,
    pub aero_weight: f64,
    pub chassis_weight: f64,
    pub powertrain_weight: f64,
    pub tire_wear_multiplier: f64,
}

impl Track {
    pub fn new(track_pars: &TrackPars) -> Track {
        Track {
            name: track_pars.name.to_owned(),
            laps: track_pars.laps,
            base_lap_time: track_pars.base_lap_time,
            aero_weight: track_pars.aero_weight,
            chassis_weight: track_pars.chassis_weight,
            powertrain_weight: track_pars.powertrain_weight,
            tire_wear_multiplier: track_pars.tire_wear_multiplier,
        }
    }
}
