mod session;

use anyhow::Context;
use clap::Parser;
use racesim::core::handle_race::handle_race;
use racesim::core::strategy::StrategyPreset;
use racesim::post::race_result::RaceResult;
use racesim::post::race_summary::RaceSummary;
use racesim::pre::check_sim_opts_pars::check_sim_opts_pars;
use racesim::pre::read_sim_pars::read_sim_pars;
use racesim::pre::sim_opts::SimOpts;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use serde::Serialize;
use session::{read_tree_defs, Session};
use std::cmp::min;
use std::fs::OpenOptions;
use std::path::Path;
use std::thread;
use std::time::Instant;

// set maximum number of concurrently running jobs in case of running more than a single simulation
const MAX_NO_CONCURRENT_JOBS: u32 = 200;

fn main() -> anyhow::Result<()> {
    // PRE-PROCESSING ------------------------------------------------------------------------------
    // get simulation options from the command line arguments and read simulation parameters
    let sim_opts: SimOpts = SimOpts::parse();

    env_logger::Builder::new()
        .filter_level(if sim_opts.debug {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .parse_default_env()
        .init();

    let sim_pars = read_sim_pars(sim_opts.parfile_path.as_path())?;

    // check simulation options and parameters
    check_sim_opts_pars(&sim_opts, &sim_pars)?;

    // create the session, continue a saved season if there is one
    let node_defs = read_tree_defs(sim_opts.treefile_path.as_path())?;
    let mut session = Session::new(sim_pars, &node_defs, sim_opts.team.as_deref())?;

    if let Some(save_path) = &sim_opts.save_path {
        if save_path.exists() {
            session.load(save_path)?;
        }
    }

    if let Some(node_id) = &sim_opts.start_project {
        if session.start_project(node_id).is_ok() {
            println!("INFO: Started research project {}", node_id);
        }
    }

    // determine the race
    if sim_opts.race_idx.is_none() && session.get_season_finished() {
        println!("INFO: The season is complete, there are no races left");
        return Ok(());
    }

    let race_idx = sim_opts.race_idx.unwrap_or_else(|| session.get_race_idx());
    let is_next_race = session.get_is_next_race(race_idx);
    let track_pars = session
        .get_track_pars(race_idx)
        .context(format!("There is no race with index {}!", race_idx))?
        .to_owned();
    let preset = StrategyPreset::from_name_or_balanced(&sim_opts.strategy);
    let entry_pars_all = session.race_entries(race_idx, preset);
    let seed = sim_opts.seed.unwrap_or_else(rand::random);

    // print race details
    println!(
        "INFO: Simulating {} ({} laps) with {} cars, {} is racing the {:?} strategy (seed {})",
        track_pars.name,
        track_pars.laps,
        entry_pars_all.len(),
        session.get_player_team(),
        preset,
        seed
    );

    // create vector for the race result and simulate race(s)
    let mut race_results: Vec<RaceResult> = Vec::with_capacity(sim_opts.no_sim_runs as usize);

    // EXECUTION -----------------------------------------------------------------------------------
    if !sim_opts.live {
        // NORMAL CASE -----------------------------------------------------------------------------
        let t_start = Instant::now();

        if sim_opts.no_sim_runs == 1 {
            // SINGLE THREAD -----------------------------------------------------------------------
            let mut rng = StdRng::seed_from_u64(seed);
            race_results.push(handle_race(
                &track_pars,
                &entry_pars_all,
                &mut rng,
                None,
                1.0,
            )?);
        } else {
            // MULTIPLE THREADS --------------------------------------------------------------------
            let mut no_races_left = sim_opts.no_sim_runs;

            while no_races_left > 0 {
                // calculate number of simulation runs to execute in current loop
                let tmp_no_sim_runs = min(no_races_left, MAX_NO_CONCURRENT_JOBS);
                let run_idx_offset = sim_opts.no_sim_runs - no_races_left;

                // simulate the races (every run with its own seed) and save the results
                let tmp_race_results: anyhow::Result<Vec<RaceResult>> = (0..tmp_no_sim_runs)
                    .into_par_iter()
                    .map(|i| {
                        let mut rng =
                            StdRng::seed_from_u64(seed.wrapping_add((run_idx_offset + i) as u64));
                        handle_race(&track_pars, &entry_pars_all, &mut rng, None, 1.0)
                    })
                    .collect();
                race_results.extend(tmp_race_results?);

                // reduce remaining simulation runs
                no_races_left -= tmp_no_sim_runs;
            }
        }

        println!(
            "INFO: Execution time (total): {}ms",
            t_start.elapsed().as_millis()
        );
    } else {
        // LIVE CASE -------------------------------------------------------------------------------
        // create channel for communication between the race thread and the console ticker
        let (tx, rx) = flume::unbounded();

        // create a separate thread for the race (executed in real-time) -> the parameters get
        // moved and must therefore be copied to be still available afterwards
        let track_pars_thread = track_pars.to_owned();
        let entry_pars_thread = entry_pars_all.to_owned();
        let realtime_factor = sim_opts.realtime_factor;

        let race_thread = thread::spawn(move || {
            let mut rng = StdRng::seed_from_u64(seed);
            handle_race(
                &track_pars_thread,
                &entry_pars_thread,
                &mut rng,
                Some(&tx),
                realtime_factor,
            )
        });

        // print every lap as soon as it arrives, the loop ends when the race thread drops tx
        for lap_state in rx.iter() {
            lap_state.print_lap_state();
        }

        let race_result = race_thread
            .join()
            .map_err(|_| anyhow::anyhow!("The race thread panicked!"))??;
        race_results.push(race_result);
    }

    // POST-PROCESSING -----------------------------------------------------------------------------
    if race_results.len() == 1 {
        let race_result = &race_results[0];
        race_result.print_grid();
        race_result.print_final_standings();

        if sim_opts.debug {
            race_result.print_lap_and_race_times();
        }

        if let Some(result_path) = &sim_opts.result_path {
            write_json(result_path, race_result)?;
        }

        // only the next race of the season counts as race weekend, others are practice runs
        if is_next_race {
            if let Some(completion) = session.complete_race_weekend() {
                println!("RESULT: Research completed: {}", completion.node_id);

                for (key, delta) in completion.applied.iter() {
                    println!("  {} {:+}", key, delta);
                }
            }
        } else {
            println!(
                "INFO: {} was a practice run, the season continues with race {}",
                track_pars.name,
                session.get_race_idx()
            );
        }

        if let Some(node) = session.get_tree().active_project() {
            println!(
                "INFO: Research project {} finishes in {} weekend(s)",
                node.name,
                node.get_remaining_time()
            );
        }

        println!("RESULT: Car rankings");
        for (i, (team, rating)) in session.car_rankings().iter().enumerate() {
            println!(
                "{:3}, {:18} overall {:6.2} (aero {:6.2}, chassis {:6.2}, power {:6.2})",
                i + 1,
                team,
                rating.overall,
                rating.aero,
                rating.chassis,
                rating.power
            );
        }

        if let Some(save_path) = &sim_opts.save_path {
            session.save(save_path)?;
        }
    } else {
        let race_summary = RaceSummary::new(&race_results);
        race_summary.print_summary();

        if let Some(result_path) = &sim_opts.result_path {
            write_json(result_path, &race_summary)?;
        }
    }

    Ok(())
}

/// write_json writes the inserted value as pretty JSON into the file.
fn write_json<T: Serialize>(filepath: &Path, value: &T) -> anyhow::Result<()> {
    let fh = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(filepath)
        .context(format!("Failed to open result file {}!", filepath.display()))?;

    serde_json::to_writer_pretty(&fh, value)
        .context(format!("Failed to write result file {}!", filepath.display()))?;
    Ok(())
}
