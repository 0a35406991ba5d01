use crate::error::{StartDeclined, TreeError};
use crate::node::{NodeDef, NodeState, ResearchNode};
use crate::state::{NodeSnapshot, TreeState};
use racesim::core::car::{CarStats, StatKey};
use serde::Serialize;
use std::collections::HashMap;

/// Completion contains the node that was completed by a call of advance_time and the stat deltas
/// that were applied to the car.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Completion {
    pub node_id: String,
    pub applied: Vec<(StatKey, i32)>,
}

/// ResearchTree manages the research nodes of a single car. Nodes are kept in an arena in
/// definition order, dependencies and exclusions are stored as index lists.
///
/// Invariant: `active_project` is `Some(idx)` iff node `idx` is the only node IN_PROGRESS.
#[derive(Debug, Clone)]
pub struct ResearchTree {
    nodes: Vec<ResearchNode>,
    index: HashMap<String, usize>,
    active_project: Option<usize>,
}

impl ResearchTree {
    /// The method builds a tree from the node definitions. Nodes without dependencies start
    /// AVAILABLE, all others LOCKED. Exclusions are symmetric.
    pub fn new(node_defs: &[NodeDef]) -> Result<ResearchTree, TreeError> {
        // index node ids
        let mut index: HashMap<String, usize> = HashMap::with_capacity(node_defs.len());

        for (idx, node_def) in node_defs.iter().enumerate() {
            if index.insert(node_def.id.to_owned(), idx).is_some() {
                return Err(TreeError::DuplicateId(node_def.id.to_owned()));
            }
        }

        // resolve cross references and effect paths
        let mut nodes: Vec<ResearchNode> = Vec::with_capacity(node_defs.len());
        let mut exclusive: Vec<Vec<usize>> = vec![Vec::new(); node_defs.len()];

        for (idx, node_def) in node_defs.iter().enumerate() {
            let mut requires: Vec<usize> = Vec::with_capacity(node_def.requires.len());

            for dep_id in node_def.requires.iter() {
                let dep_idx = *index.get(dep_id).ok_or_else(|| TreeError::UnknownDependency {
                    node: node_def.id.to_owned(),
                    requires: dep_id.to_owned(),
                })?;
                requires.push(dep_idx);
            }

            for ex_id in node_def.locks_out.iter() {
                let ex_idx = *index.get(ex_id).ok_or_else(|| TreeError::UnknownLockout {
                    node: node_def.id.to_owned(),
                    locks_out: ex_id.to_owned(),
                })?;

                if ex_idx != idx {
                    exclusive[idx].push(ex_idx);
                    exclusive[ex_idx].push(idx);
                }
            }

            let mut effects: Vec<(StatKey, i32)> = Vec::with_capacity(node_def.effects.len());

            for (path, &delta) in node_def.effects.iter() {
                let key: StatKey = path.parse().map_err(|_| TreeError::UnknownEffect {
                    node: node_def.id.to_owned(),
                    path: path.to_owned(),
                })?;
                effects.push((key, delta));
            }

            nodes.push(ResearchNode {
                id: node_def.id.to_owned(),
                name: node_def.name.to_owned(),
                description: node_def.description.to_owned(),
                cost: node_def.cost,
                time_to_complete: node_def.time_to_complete,
                effects,
                state: if requires.is_empty() {
                    NodeState::Available
                } else {
                    NodeState::Locked
                },
                progress_time: 0,
                requires,
                exclusive: Vec::new(),
            });
        }

        for (node, mut ex_idxs) in nodes.iter_mut().zip(exclusive.into_iter()) {
            ex_idxs.sort_unstable();
            ex_idxs.dedup();
            node.exclusive = ex_idxs;
        }

        Ok(ResearchTree {
            nodes,
            index,
            active_project: None,
        })
    }

    // ---------------------------------------------------------------------------------------------
    // MAIN METHODS --------------------------------------------------------------------------------
    // ---------------------------------------------------------------------------------------------

    /// The method starts the research project of the node. The start is declined without any
    /// state change if another project is active, the node is unknown, or it is not AVAILABLE.
    /// Starting a node locks all of its mutually exclusive siblings permanently.
    pub fn start_project(&mut self, node_id: &str) -> Result<(), StartDeclined> {
        if let Some(active_idx) = self.active_project {
            return Err(StartDeclined::ProjectActive {
                active: self.nodes[active_idx].id.to_owned(),
            });
        }

        let idx = *self
            .index
            .get(node_id)
            .ok_or_else(|| StartDeclined::UnknownNode(node_id.to_owned()))?;

        if self.nodes[idx].state != NodeState::Available {
            return Err(StartDeclined::NotAvailable {
                node: node_id.to_owned(),
                state: self.nodes[idx].state,
            });
        }

        self.nodes[idx].state = NodeState::InProgress;
        self.active_project = Some(idx);
        log::info!(
            "Research started: {} ({} weekends)",
            self.nodes[idx].name,
            self.nodes[idx].get_remaining_time()
        );

        // lock out mutually exclusive siblings that were not researched yet
        for ex_idx in self.nodes[idx].exclusive.to_owned() {
            let ex_node = &mut self.nodes[ex_idx];

            if matches!(ex_node.state, NodeState::Locked | NodeState::Available) {
                ex_node.state = NodeState::MutuallyLocked;
                log::info!("Research locked out: {}", ex_node.name);
            }
        }

        Ok(())
    }

    /// The method advances the active project by the given time units and applies its effects to
    /// the car once the project is completed. Progress beyond the completion of a project is
    /// discarded. Returns the completion, if any.
    pub fn advance_time(&mut self, time_units: u32, car: &mut CarStats) -> Option<Completion> {
        let idx = self.active_project?;

        if time_units == 0 {
            return None;
        }

        let node = &mut self.nodes[idx];
        node.progress_time = node.progress_time.saturating_add(time_units);

        if node.progress_time < node.time_to_complete {
            return None;
        }

        Some(self.complete_project(idx, car))
    }

    // ---------------------------------------------------------------------------------------------
    // METHODS (HELPERS) ---------------------------------------------------------------------------
    // ---------------------------------------------------------------------------------------------

    fn complete_project(&mut self, idx: usize, car: &mut CarStats) -> Completion {
        let node = &mut self.nodes[idx];
        node.state = NodeState::Completed;
        node.progress_time = node.time_to_complete;
        log::info!("Research completed: {}", node.name);

        for &(key, delta) in node.effects.iter() {
            car.apply_delta(key, delta);
            log::info!("  Applied [{}]: {:+}", key, delta);
        }

        let completion = Completion {
            node_id: node.id.to_owned(),
            applied: node.effects.to_owned(),
        };

        self.active_project = None;
        self.update_availability();

        completion
    }

    /// update_availability unlocks every LOCKED node whose dependencies are all completed.
    fn update_availability(&mut self) {
        for idx in 0..self.nodes.len() {
            if self.nodes[idx].state != NodeState::Locked {
                continue;
            }

            let deps_met = self.nodes[idx]
                .requires
                .iter()
                .all(|&req_idx| self.nodes[req_idx].state == NodeState::Completed);

            if deps_met {
                self.nodes[idx].state = NodeState::Available;
                log::debug!("Research available: {}", self.nodes[idx].name);
            }
        }
    }

    pub fn node(&self, node_id: &str) -> Option<&ResearchNode> {
        self.index.get(node_id).map(|&idx| &self.nodes[idx])
    }

    pub fn state(&self, node_id: &str) -> Option<NodeState> {
        self.node(node_id).map(|node| node.state)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &ResearchNode> {
        self.nodes.iter()
    }

    pub fn active_project(&self) -> Option<&ResearchNode> {
        self.active_project.map(|idx| &self.nodes[idx])
    }

    /// remaining_time returns the time units until the active project is completed.
    pub fn remaining_time(&self) -> Option<u32> {
        self.active_project().map(|node| node.get_remaining_time())
    }

    /// is_fundable checks if a project could be started on the node right now. Paying for the
    /// project is up to the caller.
    pub fn is_fundable(&self, node_id: &str) -> bool {
        self.active_project.is_none() && self.state(node_id) == Some(NodeState::Available)
    }

    // ---------------------------------------------------------------------------------------------
    // PERSISTENCE ---------------------------------------------------------------------------------
    // ---------------------------------------------------------------------------------------------

    pub fn snapshot(&self) -> TreeState {
        TreeState {
            active_project: self.active_project().map(|node| node.id.to_owned()),
            nodes: self
                .nodes
                .iter()
                .map(|node| NodeSnapshot {
                    node_id: node.id.to_owned(),
                    state: node.state,
                    progress_time: node.progress_time,
                })
                .collect(),
        }
    }

    /// The method applies a saved tree state. Nodes that are not part of the tree are ignored. A
    /// state that would break the single active project invariant is rejected and the tree is
    /// left unchanged.
    pub fn restore(&mut self, tree_state: &TreeState) -> Result<(), TreeError> {
        let mut states: Vec<(NodeState, u32)> = self
            .nodes
            .iter()
            .map(|node| (node.state, node.progress_time))
            .collect();

        for node_snapshot in tree_state.nodes.iter() {
            match self.index.get(&node_snapshot.node_id) {
                Some(&idx) => states[idx] = (node_snapshot.state, node_snapshot.progress_time),
                None => log::warn!(
                    "Ignoring unknown research node {:?} in tree state",
                    node_snapshot.node_id
                ),
            }
        }

        let in_progress: Vec<usize> = states
            .iter()
            .enumerate()
            .filter(|(_, (state, _))| *state == NodeState::InProgress)
            .map(|(idx, _)| idx)
            .collect();

        if in_progress.len() > 1 {
            return Err(TreeError::MultipleActiveProjects(in_progress.len()));
        }

        let active_project = tree_state
            .active_project
            .as_ref()
            .and_then(|node_id| self.index.get(node_id).copied());

        if active_project != in_progress.first().copied() {
            return Err(TreeError::ActiveProjectMismatch {
                active: tree_state.active_project.to_owned(),
            });
        }

        for (node, (state, progress_time)) in self.nodes.iter_mut().zip(states.into_iter()) {
            node.state = state;
            node.progress_time = progress_time;
        }
        self.active_project = active_project;

        // nodes added to the tree after the state was saved
        self.update_availability();

        Ok(())
    }
}
