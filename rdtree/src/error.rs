use crate::node::NodeState;

/// Errors that can occur while building a research tree from its node definitions or while
/// restoring a saved tree state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    #[error("duplicate research node id: {0:?}")]
    DuplicateId(String),

    #[error("research node {node:?} requires unknown node {requires:?}")]
    UnknownDependency { node: String, requires: String },

    #[error("research node {node:?} locks out unknown node {locks_out:?}")]
    UnknownLockout { node: String, locks_out: String },

    #[error("research node {node:?} has an effect on unknown car stat {path:?}")]
    UnknownEffect { node: String, path: String },

    #[error("tree state contains {0} projects in progress, at most one is allowed")]
    MultipleActiveProjects(usize),

    #[error("active project {active:?} of the tree state does not match the node in progress")]
    ActiveProjectMismatch { active: Option<String> },
}

/// Reasons for declining the start of a research project. A declined start never changes the
/// tree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StartDeclined {
    #[error("project {active:?} is already in progress")]
    ProjectActive { active: String },

    #[error("unknown research node {0:?}")]
    UnknownNode(String),

    #[error("research node {node:?} is {state:?} and cannot be started")]
    NotAvailable { node: String, state: NodeState },
}
