use racesim::core::car::StatKey;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// NodeDef is the definition of a research node as read from the tree definition file.
///
/// * `id` - Unique node id, e.g. aero_b1
/// * `name` - Display name
/// * `description` - Display text
/// * `cost` - Price of the project, paid by the caller
/// * `time_to_complete` - (weekends) Duration of the project
/// * `effects` - Stat deltas applied on completion, keyed by `<stat-group>.<stat-name>`
/// * `requires` - Nodes that must be completed before this node becomes available
/// * `locks_out` - Nodes that are locked permanently once this node is started (and vice versa)
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct NodeDef {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub cost: u64,
    pub time_to_complete: u32,
    #[serde(default)]
    pub effects: BTreeMap<String, i32>,
    #[serde(default)]
    pub requires: Vec<String>,
    #[serde(default)]
    pub locks_out: Vec<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeState {
    Locked,
    Available,
    InProgress,
    Completed,
    MutuallyLocked,
}

/// ResearchNode is the runtime form of a node definition. Cross references to other nodes are
/// resolved to indices into the node arena of the owning tree.
#[derive(Debug, Clone, PartialEq)]
pub struct ResearchNode {
    pub id: String,
    pub name: String,
    pub description: String,
    pub cost: u64,
    pub time_to_complete: u32,
    pub effects: Vec<(StatKey, i32)>,
    pub state: NodeState,
    pub progress_time: u32,
    pub(crate) requires: Vec<usize>,
    pub(crate) exclusive: Vec<usize>,
}

impl ResearchNode {
    /// get_remaining_time returns the time units until the node is completed.
    pub fn get_remaining_time(&self) -> u32 {
        self.time_to_complete.saturating_sub(self.progress_time)
    }
}
