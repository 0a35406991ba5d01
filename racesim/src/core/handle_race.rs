use crate::core::race::Race;
use crate::core::race_entry::EntryPars;
use crate::core::track::TrackPars;
use crate::interfaces::live_interface::LapState;
use crate::post::race_result::RaceResult;
use anyhow::Context;
use flume::Sender;
use rand::Rng;
use std::thread::sleep;
use std::time::{Duration, Instant};

/// handle_race creates a race on the basis of the inserted parameters, determines the starting grid
/// in qualifying, simulates the race, and returns the results for post-processing. If a sender is
/// inserted, the state after every lap is sent through it and the race is slowed down such that
/// a lap of the leader takes lap time / realtime_factor seconds.
pub fn handle_race<R: Rng>(
    track_pars: &TrackPars,
    entry_pars_all: &[EntryPars],
    rng: &mut R,
    tx: Option<&Sender<LapState>>,
    realtime_factor: f64,
) -> anyhow::Result<RaceResult> {
    // create the race and determine the starting grid
    let mut race = Race::new(track_pars, entry_pars_all);
    let grid = race.qualifying(rng);

    if let Some(pole) = grid.first() {
        log::debug!(
            "Pole position at {}: {} ({}) with {:.3}s",
            race.track.name,
            pole.driver,
            pole.team,
            pole.time
        );
    }

    match tx {
        None => {
            // NORMAL SIMULATION -------------------------------------------------------------------
            while !race.get_race_finished() {
                race.simulate_lap(rng);
            }
        }
        Some(tx) => {
            // REAL-TIME SIMULATION ----------------------------------------------------------------
            while !race.get_race_finished() {
                let t_start = Instant::now();

                // simulate lap
                race.simulate_lap(rng);

                // send current lap state
                let lap_standings = race.get_lap_standings();
                let t_lap_leader = lap_standings
                    .standings
                    .first()
                    .map_or(0.0, |x| x.lap_time);

                tx.send(LapState {
                    track_name: race.track.name.to_owned(),
                    tot_no_laps: race.track.laps,
                    lap_standings,
                })
                .context("Failed to send lap state to the live consumer!")?;

                // sleep until the lap is finished in real-time as well
                let t_target = Duration::from_secs_f64(t_lap_leader.max(0.0) / realtime_factor);
                let t_elapsed = t_start.elapsed();

                if t_elapsed < t_target {
                    sleep(t_target - t_elapsed);
                } else {
                    log::warn!("Could not keep up with real-time!")
                }
            }
        }
    }

    let race_result = race.get_race_result();

    if let Some(winner) = race_result.standings.first() {
        log::debug!(
            "Race at {} finished after {} laps, winner {} ({})",
            race_result.track_name,
            race_result.tot_no_laps,
            winner.driver,
            winner.team
        );
    }

    Ok(race_result)
}
