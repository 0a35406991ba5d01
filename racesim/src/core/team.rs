use crate::core::car::CarStats;
use crate::core::driver::DriverPars;
use serde::{Deserialize, Serialize};

/// * `name` - Team name, e.g. McLaren
/// * `car` - Stat bundle of the team's car (shared by all drivers of the team)
/// * `drivers` - Race drivers of the team
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct TeamPars {
    pub name: String,
    pub car: CarStats,
    pub drivers: Vec<DriverPars>,
}
