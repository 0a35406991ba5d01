use crate::core::race_entry::{EntryPars, RaceEntry};
use crate::core::track::{Track, TrackPars};
use crate::post::race_result::{
    FinalStanding, GridSlot, Interval, LapStanding, LapStandings, RaceResult,
};
use helpers::general::{argsort, SortOrder};
use rand::Rng;

#[derive(Debug)]
pub struct Race {
    pub track: Track,
    pub cur_lap: u32,
    pub entries: Vec<RaceEntry>,
    grid: Vec<GridSlot>,
    lap_log: Vec<LapStandings>,
}

impl Race {
    pub fn new(track_pars: &TrackPars, entry_pars_all: &[EntryPars]) -> Race {
        Race {
            track: Track::new(track_pars),
            cur_lap: 0,
            entries: entry_pars_all.iter().map(RaceEntry::new).collect(),
            grid: Vec::new(),
            lap_log: Vec::with_capacity(track_pars.laps as usize),
        }
    }

    // ---------------------------------------------------------------------------------------------
    // MAIN METHODS --------------------------------------------------------------------------------
    // ---------------------------------------------------------------------------------------------

    /// The method determines the starting grid. Every car drives a single lap on fresh tires of
    /// its start compound, afterwards the entries are reordered by lap time. Only the order of the
    /// entries changes, their race state is not touched.
    pub fn qualifying<R: Rng>(&mut self, rng: &mut R) -> Vec<GridSlot> {
        let quali_laptimes: Vec<f64> = self
            .entries
            .iter()
            .map(|entry| entry.calc_quali_laptime(&self.track, rng))
            .collect();

        let idxs_sorted = argsort(&quali_laptimes, SortOrder::Ascending);

        self.grid = idxs_sorted
            .iter()
            .map(|&idx| GridSlot {
                driver: self.entries[idx].driver.name.to_owned(),
                team: self.entries[idx].team.to_owned(),
                time: quali_laptimes[idx],
            })
            .collect();

        // reorder entries according to the grid
        let mut entries_tmp: Vec<Option<RaceEntry>> = self.entries.drain(..).map(Some).collect();
        self.entries = idxs_sorted
            .iter()
            .filter_map(|&idx| entries_tmp[idx].take())
            .collect();

        self.grid.to_owned()
    }

    /// The method simulates one lap for all cars and logs the resulting standings. Execution
    /// order:
    /// 1. Increment the current lap.
    /// 2. Resolve the lap for each car (lap time, tire wear, tire failure, pit stop).
    /// 3. Sort the cars by race time and log the standings of the lap.
    pub fn simulate_lap<R: Rng>(&mut self, rng: &mut R) {
        self.cur_lap += 1;

        for entry in self.entries.iter_mut() {
            entry.drive_lap(&self.track, rng)
        }

        let lap_standings = self.get_lap_standings();
        self.lap_log.push(lap_standings);
    }

    // ---------------------------------------------------------------------------------------------
    // METHODS (HELPERS) ---------------------------------------------------------------------------
    // ---------------------------------------------------------------------------------------------

    /// get_race_finished checks if the full race distance was simulated.
    pub fn get_race_finished(&self) -> bool {
        self.cur_lap >= self.track.laps
    }

    /// get_standings_order returns the indices of the entries sorted by race time. Cars that
    /// dropped out of the race are always placed behind all running cars.
    fn get_standings_order(&self) -> Vec<usize> {
        let mut idxs: Vec<usize> = (0..self.entries.len()).collect();

        idxs.sort_by(|&a, &b| {
            let entry_a = &self.entries[a];
            let entry_b = &self.entries[b];

            entry_a
                .dnf
                .cmp(&entry_b.dnf)
                .then(entry_a.racetime.total_cmp(&entry_b.racetime))
        });

        idxs
    }

    /// get_lap_standings returns the standings at the end of the current lap.
    pub fn get_lap_standings(&self) -> LapStandings {
        let idxs_sorted = self.get_standings_order();

        let leader_time = idxs_sorted
            .first()
            .map_or(0.0, |&idx| self.entries[idx].racetime);

        LapStandings {
            lap: self.cur_lap,
            standings: idxs_sorted
                .iter()
                .map(|&idx| {
                    let entry = &self.entries[idx];

                    LapStanding {
                        driver: entry.driver.name.to_owned(),
                        team: entry.team.to_owned(),
                        lap_time: entry.cur_laptime,
                        total_time: entry.racetime,
                        interval: if entry.dnf {
                            Interval::Dnf
                        } else {
                            Interval::Gap(entry.racetime - leader_time)
                        },
                        stops: entry.pit_stops,
                        wear: entry.tire_wear,
                        compound: entry.compound.name.to_owned(),
                    }
                })
                .collect(),
        }
    }

    /// get_race_result returns a race result struct of the race.
    pub fn get_race_result(&self) -> RaceResult {
        RaceResult {
            track_name: self.track.name.to_owned(),
            tot_no_laps: self.track.laps,
            grid: self.grid.to_owned(),
            standings: self
                .get_standings_order()
                .iter()
                .map(|&idx| {
                    let entry = &self.entries[idx];

                    FinalStanding {
                        driver: entry.driver.name.to_owned(),
                        team: entry.team.to_owned(),
                        total_time: entry.racetime,
                        stops: entry.pit_stops,
                        dnf: entry.dnf,
                    }
                })
                .collect(),
            log: self.lap_log.to_owned(),
        }
    }
}
