use anyhow::Context;
use helpers::general::{argsort, SortOrder};
use racesim::core::car::{CarRating, CarStats};
use racesim::core::driver::Driver;
use racesim::core::race_entry::EntryPars;
use racesim::core::strategy::{plan_strategy, StrategyPreset};
use racesim::core::track::{Track, TrackPars};
use racesim::pre::read_sim_pars::SimPars;
use rdtree::error::StartDeclined;
use rdtree::node::NodeDef;
use rdtree::state::TreeState;
use rdtree::tree::{Completion, ResearchTree};
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::path::Path;

/// * `team` - Team name
/// * `car` - Current stat bundle of the team's car
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct TeamCar {
    pub team: String,
    pub car: CarStats,
}

/// SaveState is the content of a save file.
///
/// * `player_team` - Team of the player
/// * `race_idx` - Calendar index of the next race
/// * `cars` - Stat bundles of all cars
/// * `rd_tree` - Research tree state of the player's car
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct SaveState {
    pub player_team: String,
    pub race_idx: usize,
    pub cars: Vec<TeamCar>,
    pub rd_tree: TreeState,
}

/// Session is the game context of a single save. It owns the teams, the calendar cursor and the
/// research tree of the player's car.
#[derive(Debug)]
pub struct Session {
    sim_pars: SimPars,
    player_team_idx: usize,
    race_idx: usize,
    tree: ResearchTree,
}

/// read_tree_defs reads the JSON file and decodes it into the research node definitions.
pub fn read_tree_defs(filepath: &Path) -> anyhow::Result<Vec<NodeDef>> {
    let fh = OpenOptions::new()
        .read(true)
        .open(filepath)
        .context(format!(
            "Failed to open research tree file {}!",
            filepath.display()
        ))?;

    let node_defs = serde_json::from_reader(&fh).context(format!(
        "Failed to parse research tree file {}!",
        filepath.display()
    ))?;
    Ok(node_defs)
}

impl Session {
    /// The method creates a new session at the beginning of the season. If no player team is
    /// inserted, the player takes over the first team of the parameter file.
    pub fn new(
        sim_pars: SimPars,
        node_defs: &[NodeDef],
        player_team: Option<&str>,
    ) -> anyhow::Result<Session> {
        let player_team_idx = match player_team {
            Some(name) => sim_pars
                .teams
                .iter()
                .position(|team| team.name == name)
                .context(format!("Team {} is not part of the parameter file!", name))?,
            None => 0,
        };

        if player_team_idx >= sim_pars.teams.len() {
            anyhow::bail!("There must be at least one team to create a session!");
        }

        let tree = ResearchTree::new(node_defs).context("Failed to build the research tree!")?;

        Ok(Session {
            sim_pars,
            player_team_idx,
            race_idx: 0,
            tree,
        })
    }

    // ---------------------------------------------------------------------------------------------
    // GETTERS -------------------------------------------------------------------------------------
    // ---------------------------------------------------------------------------------------------

    pub fn get_player_team(&self) -> &str {
        &self.sim_pars.teams[self.player_team_idx].name
    }

    pub fn get_player_car(&self) -> &CarStats {
        &self.sim_pars.teams[self.player_team_idx].car
    }

    pub fn get_race_idx(&self) -> usize {
        self.race_idx
    }

    pub fn get_track_pars(&self, race_idx: usize) -> Option<&TrackPars> {
        self.sim_pars.calendar.get(race_idx)
    }

    pub fn get_season_finished(&self) -> bool {
        self.race_idx >= self.sim_pars.calendar.len()
    }

    /// get_is_next_race checks if the race is the next one of the season. Any other race is a
    /// practice run that does not count for the season.
    pub fn get_is_next_race(&self, race_idx: usize) -> bool {
        race_idx == self.race_idx
    }

    pub fn get_tree(&self) -> &ResearchTree {
        &self.tree
    }

    // ---------------------------------------------------------------------------------------------
    // MAIN METHODS --------------------------------------------------------------------------------
    // ---------------------------------------------------------------------------------------------

    /// The method creates the race entries of all drivers for the race with the given calendar
    /// index. The player's team races the inserted preset, all other teams race Balanced.
    pub fn race_entries(&self, race_idx: usize, preset: StrategyPreset) -> Vec<EntryPars> {
        let track_pars = match self.get_track_pars(race_idx) {
            Some(track_pars) => track_pars,
            None => return Vec::new(),
        };
        let track = Track::new(track_pars);

        let mut entries: Vec<EntryPars> = Vec::new();

        for (team_idx, team) in self.sim_pars.teams.iter().enumerate() {
            let team_preset = if team_idx == self.player_team_idx {
                preset
            } else {
                StrategyPreset::Balanced
            };

            for driver_pars in team.drivers.iter() {
                entries.push(EntryPars {
                    driver: driver_pars.to_owned(),
                    team: team.name.to_owned(),
                    car: team.car,
                    strategy: plan_strategy(
                        team_preset,
                        &track,
                        &team.car,
                        &Driver::new(driver_pars),
                    ),
                });
            }
        }

        entries
    }

    /// start_project starts a research project on the player's car.
    pub fn start_project(&mut self, node_id: &str) -> Result<(), StartDeclined> {
        let result = self.tree.start_project(node_id);

        if let Err(declined) = &result {
            log::warn!("Research project declined: {}", declined);
        }

        result
    }

    /// complete_race_weekend moves the calendar cursor to the next race and advances the research
    /// of the player's car by one weekend.
    pub fn complete_race_weekend(&mut self) -> Option<Completion> {
        self.race_idx += 1;

        let car = &mut self.sim_pars.teams[self.player_team_idx].car;
        self.tree.advance_time(1, car)
    }

    /// car_rankings returns the car ratings of all teams, best car first.
    pub fn car_rankings(&self) -> Vec<(String, CarRating)> {
        let ratings: Vec<CarRating> = self
            .sim_pars
            .teams
            .iter()
            .map(|team| team.car.get_rating())
            .collect();
        let overall: Vec<f64> = ratings.iter().map(|rating| rating.overall).collect();

        argsort(&overall, SortOrder::Descending)
            .into_iter()
            .map(|idx| (self.sim_pars.teams[idx].name.to_owned(), ratings[idx]))
            .collect()
    }

    // ---------------------------------------------------------------------------------------------
    // PERSISTENCE ---------------------------------------------------------------------------------
    // ---------------------------------------------------------------------------------------------

    pub fn to_save_state(&self) -> SaveState {
        SaveState {
            player_team: self.get_player_team().to_owned(),
            race_idx: self.race_idx,
            cars: self
                .sim_pars
                .teams
                .iter()
                .map(|team| TeamCar {
                    team: team.name.to_owned(),
                    car: team.car,
                })
                .collect(),
            rd_tree: self.tree.snapshot(),
        }
    }

    /// apply_save_state restores the session from a save state. Cars of teams that are not part of
    /// the parameter file are ignored.
    pub fn apply_save_state(&mut self, save_state: &SaveState) -> anyhow::Result<()> {
        let player_team_idx = self
            .sim_pars
            .teams
            .iter()
            .position(|team| team.name == save_state.player_team)
            .context(format!(
                "Team {} of the save file is not part of the parameter file!",
                save_state.player_team
            ))?;

        self.tree
            .restore(&save_state.rd_tree)
            .context("Failed to restore the research tree from the save file!")?;

        for team_car in save_state.cars.iter() {
            match self
                .sim_pars
                .teams
                .iter_mut()
                .find(|team| team.name == team_car.team)
            {
                Some(team) => team.car = team_car.car,
                None => log::warn!("Ignoring unknown team {} in save file", team_car.team),
            }
        }

        self.player_team_idx = player_team_idx;
        self.race_idx = save_state.race_idx;
        Ok(())
    }

    pub fn save(&self, filepath: &Path) -> anyhow::Result<()> {
        let fh = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(filepath)
            .context(format!("Failed to open save file {}!", filepath.display()))?;

        serde_json::to_writer_pretty(&fh, &self.to_save_state())
            .context(format!("Failed to write save file {}!", filepath.display()))?;
        log::info!("Saved session to {}", filepath.display());
        Ok(())
    }

    pub fn load(&mut self, filepath: &Path) -> anyhow::Result<()> {
        let fh = OpenOptions::new()
            .read(true)
            .open(filepath)
            .context(format!("Failed to open save file {}!", filepath.display()))?;

        let save_state: SaveState = serde_json::from_reader(&fh)
            .context(format!("Failed to parse save file {}!", filepath.display()))?;
        self.apply_save_state(&save_state)?;
        log::info!("Loaded session from {}", filepath.display());
        Ok(())
    }
}
