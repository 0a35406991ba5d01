use serde::{Serialize, Serializer};
use std::collections::HashMap;

/// GridSlot contains the qualifying lap of a driver, the grid is ordered by lap time.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct GridSlot {
    pub driver: String,
    pub team: String,
    pub time: f64,
}

/// Interval is the gap of a car to the race leader. Cars that dropped out of the race are marked
/// with the literal "DNF" when serialized.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Interval {
    Gap(f64),
    Dnf,
}

impl Serialize for Interval {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Interval::Gap(gap) => serializer.serialize_f64(*gap),
            Interval::Dnf => serializer.serialize_str("DNF"),
        }
    }
}

/// LapStanding contains the state of a single car at the end of a lap.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LapStanding {
    pub driver: String,
    pub team: String,
    pub lap_time: f64,
    pub total_time: f64,
    pub interval: Interval,
    pub stops: u32,
    pub wear: f64,
    pub compound: String,
}

/// LapStandings contains the standings of all cars at the end of a lap.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LapStandings {
    pub lap: u32,
    pub standings: Vec<LapStanding>,
}

/// FinalStanding contains the result of a single car at the end of the race.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FinalStanding {
    pub driver: String,
    pub team: String,
    pub total_time: f64,
    pub stops: u32,
    pub dnf: bool,
}

/// RaceResult contains all race information that is required for post-processing the results.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RaceResult {
    pub track_name: String,
    pub tot_no_laps: u32,
    pub grid: Vec<GridSlot>,
    pub standings: Vec<FinalStanding>,
    pub log: Vec<LapStandings>,
}

impl RaceResult {
    /// get_position returns the finishing position (1-based) of the driver, if the driver took
    /// part in the race.
    pub fn get_position(&self, driver: &str) -> Option<usize> {
        self.standings
            .iter()
            .position(|standing| standing.driver == driver)
            .map(|idx| idx + 1)
    }

    /// print_grid prints the qualifying result to the console output.
    pub fn print_grid(&self) {
        println!("RESULT: Starting grid {}", self.track_name);

        for (i, slot) in self.grid.iter().enumerate() {
            println!(
                "{:3}, {:24} {:18} {:8.3}s",
                i + 1,
                slot.driver,
                slot.team,
                slot.time
            );
        }
    }

    /// print_final_standings prints the race classification to the console output.
    pub fn print_final_standings(&self) {
        println!("RESULT: Classification {}", self.track_name);

        let leader_time = self.standings.first().map_or(0.0, |x| x.total_time);

        for (i, standing) in self.standings.iter().enumerate() {
            let gap = if standing.dnf {
                String::from("DNF")
            } else if i == 0 {
                format!("{:.3}s", standing.total_time)
            } else {
                format!("+{:.3}s", standing.total_time - leader_time)
            };

            println!(
                "{:3}, {:24} {:18} {:>12}, {} stop(s)",
                i + 1,
                standing.driver,
                standing.team,
                gap,
                standing.stops
            );
        }
    }

    /// get_lap_and_race_times returns the lap time table and the race time table, one row per lap
    /// below a driver header. The columns are ordered by the final classification.
    pub fn get_lap_and_race_times(&self) -> (String, String) {
        // create string with driver info
        let tmp_string_driver_info = format!(
            "lap, {}\n",
            self.standings
                .iter()
                .map(|x| x.driver.to_owned())
                .collect::<Vec<String>>()
                .join(", ")
        );

        // create string for lap times and race times
        let mut tmp_string_laptime = tmp_string_driver_info.to_owned();
        let mut tmp_string_racetime = tmp_string_driver_info;

        for lap_standings in self.log.iter() {
            let times: HashMap<&str, (f64, f64)> = lap_standings
                .standings
                .iter()
                .map(|x| (x.driver.as_str(), (x.lap_time, x.total_time)))
                .collect();

            let mut laptimes: Vec<String> = Vec::with_capacity(self.standings.len());
            let mut racetimes: Vec<String> = Vec::with_capacity(self.standings.len());

            for standing in self.standings.iter() {
                let (laptime, racetime) = times
                    .get(standing.driver.as_str())
                    .copied()
                    .unwrap_or((0.0, 0.0));
                laptimes.push(format!("{:8.3}s", laptime));
                racetimes.push(format!("{:9.3}s", racetime));
            }

            tmp_string_laptime.push_str(&format!(
                "{:3}, {}\n",
                lap_standings.lap,
                laptimes.join(", ")
            ));
            tmp_string_racetime.push_str(&format!(
                "{:3}, {}\n",
                lap_standings.lap,
                racetimes.join(", ")
            ));
        }

        (tmp_string_laptime, tmp_string_racetime)
    }

    /// print_lap_and_race_times prints the resulting lap and race times to the console output.
    pub fn print_lap_and_race_times(&self) {
        let (tmp_string_laptime, tmp_string_racetime) = self.get_lap_and_race_times();

        println!("RESULT: Lap times");
        println!("{}", tmp_string_laptime);

        println!("RESULT: Race times");
        println!("{}", tmp_string_racetime);
    }
}
