use crate::core::track::Track;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// * `downforce` - Cornering grip generated by the aerodynamic package
/// * `drag_efficiency` - Straight-line efficiency of the aerodynamic package
#[derive(Debug, Deserialize, Serialize, Clone, Copy, Default, PartialEq, Eq)]
pub struct AeroStats {
    pub downforce: i32,
    pub drag_efficiency: i32,
}

/// * `weight_reduction` - How close the chassis is to the weight limit
/// * `tire_preservation` - Reduces the tire wear per lap by up to 30%
#[derive(Debug, Deserialize, Serialize, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChassisStats {
    pub weight_reduction: i32,
    pub tire_preservation: i32,
}

/// * `power_output` - Power unit performance
/// * `reliability` - Power unit reliability
#[derive(Debug, Deserialize, Serialize, Clone, Copy, Default, PartialEq, Eq)]
pub struct PowertrainStats {
    pub power_output: i32,
    pub reliability: i32,
}

/// CarStats is the stat bundle of a car. All ratings are nominally within [0, 100] but can exceed
/// 100 as a result of research upgrades.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, Default, PartialEq, Eq)]
pub struct CarStats {
    pub aero: AeroStats,
    pub chassis: ChassisStats,
    pub powertrain: PowertrainStats,
}

/// StatKey addresses a single rating of the stat bundle. Its textual form is
/// `<stat-group>.<stat-name>`, e.g. `aero.downforce`.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub enum StatKey {
    AeroDownforce,
    AeroDragEfficiency,
    ChassisWeightReduction,
    ChassisTirePreservation,
    PowertrainPowerOutput,
    PowertrainReliability,
}

pub const ALL_STAT_KEYS: [StatKey; 6] = [
    StatKey::AeroDownforce,
    StatKey::AeroDragEfficiency,
    StatKey::ChassisWeightReduction,
    StatKey::ChassisTirePreservation,
    StatKey::PowertrainPowerOutput,
    StatKey::PowertrainReliability,
];

impl StatKey {
    /// as_path returns the textual `<stat-group>.<stat-name>` form of the key.
    pub fn as_path(&self) -> &'static str {
        match self {
            StatKey::AeroDownforce => "aero.downforce",
            StatKey::AeroDragEfficiency => "aero.drag_efficiency",
            StatKey::ChassisWeightReduction => "chassis.weight_reduction",
            StatKey::ChassisTirePreservation => "chassis.tire_preservation",
            StatKey::PowertrainPowerOutput => "powertrain.power_output",
            StatKey::PowertrainReliability => "powertrain.reliability",
        }
    }
}

/// UnknownStatKey is returned if a stat path does not address one of the six car ratings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStatKey(pub String);

impl fmt::Display for UnknownStatKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "unknown car stat {:?}", self.0)
    }
}

impl std::error::Error for UnknownStatKey {}

impl FromStr for StatKey {
    type Err = UnknownStatKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL_STAT_KEYS
            .iter()
            .find(|key| key.as_path() == s)
            .copied()
            .ok_or_else(|| UnknownStatKey(s.to_owned()))
    }
}

impl std::convert::TryFrom<String> for StatKey {
    type Error = UnknownStatKey;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<StatKey> for String {
    fn from(key: StatKey) -> Self {
        key.as_path().to_owned()
    }
}

impl fmt::Display for StatKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_path())
    }
}

/// CarRating contains the group averages of a stat bundle, used to rank the cars of the grid.
#[derive(Debug, Serialize, Clone, Copy, PartialEq)]
pub struct CarRating {
    pub aero: f64,
    pub chassis: f64,
    pub power: f64,
    pub overall: f64,
}

impl CarStats {
    pub fn get(&self, key: StatKey) -> i32 {
        match key {
            StatKey::AeroDownforce => self.aero.downforce,
            StatKey::AeroDragEfficiency => self.aero.drag_efficiency,
            StatKey::ChassisWeightReduction => self.chassis.weight_reduction,
            StatKey::ChassisTirePreservation => self.chassis.tire_preservation,
            StatKey::PowertrainPowerOutput => self.powertrain.power_output,
            StatKey::PowertrainReliability => self.powertrain.reliability,
        }
    }

    fn get_mut(&mut self, key: StatKey) -> &mut i32 {
        match key {
            StatKey::AeroDownforce => &mut self.aero.downforce,
            StatKey::AeroDragEfficiency => &mut self.aero.drag_efficiency,
            StatKey::ChassisWeightReduction => &mut self.chassis.weight_reduction,
            StatKey::ChassisTirePreservation => &mut self.chassis.tire_preservation,
            StatKey::PowertrainPowerOutput => &mut self.powertrain.power_output,
            StatKey::PowertrainReliability => &mut self.powertrain.reliability,
        }
    }

    /// apply_delta adds the delta to the addressed rating.
    pub fn apply_delta(&mut self, key: StatKey, delta: i32) {
        let stat = self.get_mut(key);
        *stat = stat.saturating_add(delta);
    }

    /// The method returns the car performance weighted by the demands of the track, normalized back
    /// to a (roughly) 100-scale. Strong cars can exceed 100.
    pub fn calc_weighted_perf(&self, track: &Track) -> f64 {
        let aero_perf = (self.aero.downforce + self.aero.drag_efficiency) as f64 * track.aero_weight;
        let chassis_perf = (self.chassis.weight_reduction + self.chassis.tire_preservation) as f64
            * track.chassis_weight;
        let powertrain_perf = (self.powertrain.power_output + self.powertrain.reliability) as f64
            * track.powertrain_weight;

        (aero_perf + chassis_perf + powertrain_perf) / 6.0
    }

    /// The method returns the tire preservation ability of the chassis scaled to [0, 1] (upgraded
    /// chassis can exceed 1).
    pub fn get_tire_preservation_eff(&self) -> f64 {
        self.chassis.tire_preservation as f64 / 100.0
    }

    /// The method returns the group averages and the overall rating of the car.
    pub fn get_rating(&self) -> CarRating {
        let aero = (self.aero.downforce + self.aero.drag_efficiency) as f64 / 2.0;
        let chassis = (self.chassis.weight_reduction + self.chassis.tire_preservation) as f64 / 2.0;
        let power = (self.powertrain.power_output + self.powertrain.reliability) as f64 / 2.0;

        CarRating {
            aero,
            chassis,
            power,
            overall: (aero + chassis + power) / 3.0,
        }
    }
}
