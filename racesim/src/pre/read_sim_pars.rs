use crate::core::team::TeamPars;
use crate::core::track::TrackPars;
use anyhow::Context;
use serde::Deserialize;
use std::fs::OpenOptions;
use std::path::Path;

/// SimPars is used to store all other parameter structs of a season.
#[derive(Debug, Deserialize, Clone)]
pub struct SimPars {
    pub calendar: Vec<TrackPars>,
    pub teams: Vec<TeamPars>,
}

impl SimPars {
    pub fn get_team(&self, name: &str) -> Option<&TeamPars> {
        self.teams.iter().find(|team| team.name == name)
    }
}

/// read_sim_pars reads the JSON file and decodes the JSON string into the simulation parameters
/// struct.
pub fn read_sim_pars(filepath: &Path) -> anyhow::Result<SimPars> {
    // open file
    let fh = OpenOptions::new()
        .read(true)
        .open(filepath)
        .context(format!(
            "Failed to open parameter file {}!",
            filepath.display()
        ))?;

    // read and parse parameter file content
    let pars = serde_json::from_reader(&fh).context(format!(
        "Failed to parse parameter file {}!",
        filepath.display()
    ))?;
    Ok(pars)
}
