use crate::node::NodeState;
use serde::{Deserialize, Serialize};

/// NodeSnapshot contains the persistent part of a research node.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct NodeSnapshot {
    pub node_id: String,
    pub state: NodeState,
    pub progress_time: u32,
}

/// TreeState is the serializable state of a research tree as stored in a save file. The node
/// definitions themselves are not part of it.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct TreeState {
    pub active_project: Option<String>,
    pub nodes: Vec<NodeSnapshot>,
}
