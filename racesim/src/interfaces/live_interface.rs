use crate::post::race_result::{Interval, LapStandings};

/// LapState is sent to a live consumer (e.g. the console ticker of the CLI) after every simulated
/// lap.
#[derive(Debug, Clone)]
pub struct LapState {
    pub track_name: String,
    pub tot_no_laps: u32,
    pub lap_standings: LapStandings,
}

impl LapState {
    /// print_lap_state prints the standings of the lap as a live ticker to the console output.
    pub fn print_lap_state(&self) {
        println!(
            "LIVE: {} lap {}/{}",
            self.track_name, self.lap_standings.lap, self.tot_no_laps
        );

        for (i, standing) in self.lap_standings.standings.iter().enumerate() {
            let interval = match standing.interval {
                Interval::Gap(gap) if i == 0 => format!("{:.3}s", gap),
                Interval::Gap(gap) => format!("+{:.3}s", gap),
                Interval::Dnf => String::from("DNF"),
            };

            println!(
                "{:3}, {:24} {:>10} {:6} {:5.1}%, {} stop(s)",
                i + 1,
                standing.driver,
                interval,
                standing.compound,
                standing.wear,
                standing.stops
            );
        }
    }
}
