use crate::post::race_result::RaceResult;
use helpers::general::{argsort, mean, SortOrder};
use serde::Serialize;

/// DriverSummary contains the aggregated results of a driver over several simulation runs.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DriverSummary {
    pub driver: String,
    pub team: String,
    pub wins: u32,
    pub podiums: u32,
    pub dnfs: u32,
    pub avg_position: f64,
}

/// RaceSummary aggregates several independent simulation runs of the same race. The drivers are
/// sorted by their average finishing position.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RaceSummary {
    pub track_name: String,
    pub no_sim_runs: usize,
    pub drivers: Vec<DriverSummary>,
}

impl RaceSummary {
    pub fn new(race_results: &[RaceResult]) -> RaceSummary {
        // collect drivers in the order of the first result
        let mut drivers: Vec<(String, String)> = Vec::new();

        if let Some(first_result) = race_results.first() {
            drivers = first_result
                .standings
                .iter()
                .map(|x| (x.driver.to_owned(), x.team.to_owned()))
                .collect();
        }

        let mut summaries: Vec<DriverSummary> = Vec::with_capacity(drivers.len());

        for (driver, team) in drivers.into_iter() {
            let mut positions: Vec<u32> = Vec::with_capacity(race_results.len());
            let mut dnfs = 0;

            for race_result in race_results.iter() {
                if let Some(position) = race_result.get_position(&driver) {
                    positions.push(position as u32);

                    if race_result.standings[position - 1].dnf {
                        dnfs += 1;
                    }
                }
            }

            summaries.push(DriverSummary {
                wins: positions.iter().filter(|&&x| x == 1).count() as u32,
                podiums: positions.iter().filter(|&&x| x <= 3).count() as u32,
                dnfs,
                avg_position: mean(&positions).unwrap_or(0.0),
                driver,
                team,
            });
        }

        // sort drivers by their average finishing position
        let avg_positions: Vec<f64> = summaries.iter().map(|x| x.avg_position).collect();
        let idxs_sorted = argsort(&avg_positions, SortOrder::Ascending);
        let drivers_sorted = idxs_sorted
            .iter()
            .map(|&idx| summaries[idx].to_owned())
            .collect();

        RaceSummary {
            track_name: race_results
                .first()
                .map_or_else(String::new, |x| x.track_name.to_owned()),
            no_sim_runs: race_results.len(),
            drivers: drivers_sorted,
        }
    }

    /// print_summary prints the aggregated results to the console output.
    pub fn print_summary(&self) {
        println!(
            "RESULT: Summary of {} simulation runs at {}",
            self.no_sim_runs, self.track_name
        );
        println!(
            "{:24} {:18} {:>8} {:>5} {:>8} {:>5}",
            "driver", "team", "avg pos", "wins", "podiums", "dnfs"
        );

        for summary in self.drivers.iter() {
            println!(
                "{:24} {:18} {:8.2} {:5} {:8} {:5}",
                summary.driver,
                summary.team,
                summary.avg_position,
                summary.wins,
                summary.podiums,
                summary.dnfs
            );
        }
    }
}
