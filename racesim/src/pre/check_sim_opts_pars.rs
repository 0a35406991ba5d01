use crate::pre::read_sim_pars::SimPars;
use crate::pre::sim_opts::SimOpts;
use anyhow::Context;
use helpers::general::InputValueError;

/// check_sim_opts_pars assures that the inserted options and parameters are within reasonable
/// limits and raises an error if not.
pub fn check_sim_opts_pars(sim_opts: &SimOpts, sim_pars: &SimPars) -> anyhow::Result<()> {
    // PART 1: SIMULATION OPTIONS
    if sim_opts.no_sim_runs < 1 {
        return Err(InputValueError).context(format!(
            "no_sim_runs must be at least equal to one, but is {}!",
            sim_opts.no_sim_runs
        ));
    }

    if sim_opts.live && sim_opts.no_sim_runs != 1 {
        return Err(InputValueError)
            .context("If live mode is activated, no_sim_runs must be equal to one!");
    }

    if sim_opts.start_project.is_some() && sim_opts.no_sim_runs != 1 {
        return Err(InputValueError).context(
            "start_project requires no_sim_runs to be equal to one, the session is only saved after a single race!",
        );
    }

    if !(1.0..=1000.0).contains(&sim_opts.realtime_factor) {
        return Err(InputValueError).context(format!(
            "realtime_factor is {:.3}, which is not within the reasonable range of [1.0, 1000.0]!",
            sim_opts.realtime_factor
        ));
    }

    if let Some(race_idx) = sim_opts.race_idx {
        if race_idx >= sim_pars.calendar.len() {
            return Err(InputValueError).context(format!(
                "race_idx is {}, but the calendar only contains {} races!",
                race_idx,
                sim_pars.calendar.len()
            ));
        }
    }

    if let Some(team) = &sim_opts.team {
        if sim_pars.get_team(team).is_none() {
            return Err(InputValueError)
                .context(format!("Team {} is not part of the parameter file!", team));
        }
    }

    // PART 2: SIMULATION PARAMETERS
    check_sim_pars(sim_pars)
}

/// check_sim_pars assures that the season parameters are within reasonable limits.
pub fn check_sim_pars(sim_pars: &SimPars) -> anyhow::Result<()> {
    // CALENDAR ------------------------------------------------------------------------------------
    if sim_pars.calendar.is_empty() {
        return Err(InputValueError).context("The calendar must contain at least one race!");
    }

    for track_pars in sim_pars.calendar.iter() {
        if track_pars.laps < 1 {
            return Err(InputValueError).context(format!(
                "The race distance of {} must be at least one lap!",
                track_pars.name
            ));
        }

        if track_pars.base_lap_time <= 0.0 {
            return Err(InputValueError).context(format!(
                "base_lap_time of {} is {:.3}s, but must be positive!",
                track_pars.name, track_pars.base_lap_time
            ));
        }

        if [
            track_pars.aero_weight,
            track_pars.chassis_weight,
            track_pars.powertrain_weight,
            track_pars.tire_wear_multiplier,
        ]
        .iter()
        .any(|&x| x < 0.0)
        {
            return Err(InputValueError).context(format!(
                "The performance weights and the tire wear multiplier of {} must not be negative!",
                track_pars.name
            ));
        }
    }

    // TEAMS ---------------------------------------------------------------------------------------
    if sim_pars.teams.is_empty() {
        return Err(InputValueError).context("There must be at least one team!");
    }

    for team_pars in sim_pars.teams.iter() {
        for driver_pars in team_pars.drivers.iter() {
            if [
                driver_pars.speed,
                driver_pars.consistency,
                driver_pars.tire_management,
            ]
            .iter()
            .any(|&x| x > 100)
            {
                return Err(InputValueError).context(format!(
                    "The ratings of driver {} ({}) must be within the range [0, 100]!",
                    driver_pars.name, team_pars.name
                ));
            }
        }
    }

    Ok(())
}
