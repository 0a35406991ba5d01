use serde::{Deserialize, Serialize};

/// * `name` - Driver name, e.g. Lando Norris
/// * `speed` - Raw pace rating [0, 100]
/// * `consistency` - Ability to string together laps without mistakes [0, 100]
/// * `tire_management` - Reduces the tire wear per lap by up to 30% [0, 100]
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct DriverPars {
    pub name: String,
    pub speed: u32,
    pub consistency: u32,
    pub tire_management: u32,
}

#[derive(Debug, Clone)]
pub struct Driver {
    pub name: String,
    speed: u32,
    consistency: u32,
    tire_management: u32,
}

impl Driver {
    pub fn new(driver_pars: &DriverPars) -> Driver {
        Driver {
            name: driver_pars.name.to_owned(),
            speed: driver_pars.speed,
            consistency: driver_pars.consistency,
            tire_management: driver_pars.tire_management,
        }
    }

    /// The method returns the lap time gain due to the raw pace of the driver (up to 2.0s).
    pub fn calc_speed_advantage(&self) -> f64 {
        self.speed as f64 / 100.0 * 2.0
    }

    /// The method returns the probability that the driver makes a mistake in a lap.
    pub fn calc_mistake_chance(&self) -> f64 {
        (100.0 - self.consistency as f64) / 100.0
    }

    /// The method returns the tire management ability scaled to [0, 1].
    pub fn get_tire_management_eff(&self) -> f64 {
        self.tire_management as f64 / 100.0
    }
}
