use crate::core::car::CarStats;
use crate::core::driver::{Driver, DriverPars};
use crate::core::strategy::StintPars;
use crate::core::tire_compound::TireCompound;
use crate::core::track::Track;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// (wear/lap) Base tire wear per lap at a track wear multiplier of 1.0
pub const BASE_WEAR_PER_LAP: f64 = 2.1;
/// (s) Lap time gain of a car with a weighted performance of 100
pub const T_CAR_ADVANTAGE_MAX: f64 = 4.75;
/// (s) Upper limit of the time loss caused by a driver mistake
pub const T_MISTAKE_MAX: f64 = 1.5;
/// (s) Time loss of a scheduled pit stop
pub const T_PIT_SCHEDULED: f64 = 22.0;
/// (s) Time loss of an unplanned (emergency) pit stop
pub const T_PIT_EMERGENCY: f64 = 25.0;
/// (s) Race time added per lap after a car dropped out of the race
pub const T_DNF_PENALTY: f64 = 180.0;
/// Target laps of the fallback stint used for an empty strategy
pub const DEFAULT_TARGET_LAPS: u32 = 100;

const WEAR_CLIFF: f64 = 60.0;
const WEAR_CLIFF_SATURATION: f64 = 40.0;
const WEAR_EMERGENCY_PIT: f64 = 100.0;
const WEAR_IMMINENT_FAILURE: f64 = 105.0;
const WEAR_FAILURE_RISK: f64 = 110.0;
const P_FAILURE: f64 = 0.3;

/// * `driver` - Driver ratings snapshot
/// * `team` - Team that operates the car
/// * `car` - Stat bundle snapshot of the car
/// * `strategy` - Stints of the race, the first stint determines the start compound
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct EntryPars {
    pub driver: DriverPars,
    pub team: String,
    pub car: CarStats,
    pub strategy: Vec<StintPars>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PitStop {
    Scheduled,
    Emergency,
}

impl PitStop {
    pub fn get_timeloss(&self) -> f64 {
        match self {
            PitStop::Scheduled => T_PIT_SCHEDULED,
            PitStop::Emergency => T_PIT_EMERGENCY,
        }
    }
}

/// calc_tire_penalty returns the lap time loss caused by tire wear. Up to 60% wear the loss grows
/// linearly up to 1.0s, beyond that the tires fall off a cliff (approaching ~4.0s at 100% wear). A
/// worn-out carcass beyond 105% costs another 5.0s.
pub fn calc_tire_penalty(tire_wear: f64) -> f64 {
    let mut tire_penalty = if tire_wear <= WEAR_CLIFF {
        tire_wear / WEAR_CLIFF
    } else {
        let overage = (tire_wear - WEAR_CLIFF).min(WEAR_CLIFF_SATURATION);
        1.0 + overage.powf(1.35) / 15.0
    };

    if tire_wear > WEAR_IMMINENT_FAILURE {
        tire_penalty += 5.0
    }

    tire_penalty
}

/// RaceEntry contains the runtime state of a car-driver combination during a single race.
#[derive(Debug, Clone)]
pub struct RaceEntry {
    pub driver: Driver,
    pub team: String,
    car: CarStats,
    stints_remaining: VecDeque<StintPars>,
    pub compound: &'static TireCompound,
    pub target_laps: u32,
    pub stint_laps: u32,
    pub tire_wear: f64,
    pub cur_laptime: f64,
    pub racetime: f64,
    pub pit_stops: u32,
    pub dnf: bool,
}

impl RaceEntry {
    pub fn new(entry_pars: &EntryPars) -> RaceEntry {
        let mut stints_remaining: VecDeque<StintPars> =
            entry_pars.strategy.iter().cloned().collect();

        // the first stint determines the start configuration
        let (compound, target_laps) = match stints_remaining.pop_front() {
            Some(stint) => (TireCompound::from_name_or_hard(&stint.compound), stint.laps),
            None => {
                log::warn!(
                    "Empty strategy for {} ({}), starting on {} with a target of {} laps",
                    entry_pars.driver.name,
                    entry_pars.team,
                    TireCompound::hard().name,
                    DEFAULT_TARGET_LAPS
                );
                (TireCompound::hard(), DEFAULT_TARGET_LAPS)
            }
        };

        RaceEntry {
            driver: Driver::new(&entry_pars.driver),
            team: entry_pars.team.to_owned(),
            car: entry_pars.car,
            stints_remaining,
            compound,
            target_laps,
            stint_laps: 0,
            tire_wear: 0.0,
            cur_laptime: 0.0,
            racetime: 0.0,
            pit_stops: 0,
            dnf: false,
        }
    }

    pub fn get_stints_remaining(&self) -> usize {
        self.stints_remaining.len()
    }

    /// The method returns the lap time the car-driver combination drives with its current tires,
    /// not considering pit stops.
    pub fn calc_laptime<R: Rng>(&self, track: &Track, rng: &mut R) -> f64 {
        self.calc_laptime_with_wear(track, self.tire_wear, rng)
    }

    /// The method returns a qualifying lap time, i.e. a lap on fresh tires of the start compound.
    pub fn calc_quali_laptime<R: Rng>(&self, track: &Track, rng: &mut R) -> f64 {
        self.calc_laptime_with_wear(track, 0.0, rng)
    }

    fn calc_laptime_with_wear<R: Rng>(&self, track: &Track, tire_wear: f64, rng: &mut R) -> f64 {
        let t_car_advantage = self.car.calc_weighted_perf(track) / 100.0 * T_CAR_ADVANTAGE_MAX;
        let t_driver_advantage = self.driver.calc_speed_advantage();

        // consistency determines the probability of a mistake
        let t_mistake = if rng.gen::<f64>() < self.driver.calc_mistake_chance() {
            rng.gen_range(0.0..=T_MISTAKE_MAX)
        } else {
            0.0
        };

        track.base_lap_time - t_car_advantage - t_driver_advantage
            + t_mistake
            + calc_tire_penalty(tire_wear)
            - self.compound.pace_advantage
    }

    /// The method returns the tire wear of the current lap. Chassis tire preservation and driver
    /// tire management reduce the wear by up to 30% each.
    pub fn calc_tire_wear_increment(&self, track: &Track) -> f64 {
        BASE_WEAR_PER_LAP
            * track.tire_wear_multiplier
            * self.compound.wear_rate
            * (1.0 - self.car.get_tire_preservation_eff() * 0.3)
            * (1.0 - self.driver.get_tire_management_eff() * 0.3)
    }

    /// The method resolves a single lap of the race. Execution order:
    /// 1. If the car is out of the race, only the DNF time penalty is added.
    /// 2. Calculate the lap time based on the state at the beginning of the lap.
    /// 3. Increase the tire wear.
    /// 4. Roll for a tire failure if the tires are worn beyond 110%. A failure ends the race of
    /// the car and the current lap does not count.
    /// 5. Perform a pit stop if the strategy demands one (or the tires are dead) and add the pit
    /// time loss to the lap time.
    pub fn drive_lap<R: Rng>(&mut self, track: &Track, rng: &mut R) {
        if self.dnf {
            self.racetime += T_DNF_PENALTY;
            return;
        }

        self.stint_laps += 1;
        let mut laptime = self.calc_laptime(track, rng);
        self.tire_wear += self.calc_tire_wear_increment(track);

        if self.tire_wear > WEAR_FAILURE_RISK && rng.gen::<f64>() < P_FAILURE {
            log::debug!(
                "DNF: {} ({}) suffered a tire failure at {:.1}% wear",
                self.driver.name,
                self.team,
                self.tire_wear
            );
            self.dnf = true;
            self.cur_laptime = 0.0;
            return;
        }

        if let Some(pit_stop) = self.check_pitstop() {
            laptime += self.perform_pitstop(pit_stop);
        }

        self.cur_laptime = laptime;
        self.racetime += laptime;
    }

    /// The method determines whether the car enters the pits at the end of the current lap. A
    /// scheduled stop has priority over an emergency stop, and both require a remaining stint.
    pub fn check_pitstop(&self) -> Option<PitStop> {
        if self.stints_remaining.is_empty() {
            None
        } else if self.stint_laps >= self.target_laps {
            Some(PitStop::Scheduled)
        } else if self.tire_wear > WEAR_EMERGENCY_PIT {
            Some(PitStop::Emergency)
        } else {
            None
        }
    }

    /// The method fits the tires of the next stint and returns the time loss of the pit stop.
    fn perform_pitstop(&mut self, pit_stop: PitStop) -> f64 {
        if let Some(stint) = self.stints_remaining.pop_front() {
            self.compound = TireCompound::from_name_or_hard(&stint.compound);
            self.target_laps = stint.laps;
        }

        self.tire_wear = 0.0;
        self.stint_laps = 0;
        self.pit_stops += 1;

        pit_stop.get_timeloss()
    }
}
