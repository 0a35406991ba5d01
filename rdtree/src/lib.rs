pub mod error;
pub mod node;
pub mod state;
pub mod tree;


#[cfg(test)]
mod tree_tests {
    use crate::error::{StartDeclined, TreeError};
    use crate::node::NodeState;
    use crate::state::{NodeSnapshot, TreeState};
    use crate::test_defs::{abc_defs, node_def};
    use crate::tree::ResearchTree;
    use racesim::core::car::{CarStats, StatKey};

    #[test]
    fn test_initial_states() {
        let tree = ResearchTree::new(&abc_defs()).unwrap();
        assert_eq!(tree.state("a"), Some(NodeState::Available));
        assert_eq!(tree.state("b"), Some(NodeState::Locked));
        assert_eq!(tree.state("c"), Some(NodeState::Available));
        assert_eq!(tree.state("d"), None);
        assert!(tree.active_project().is_none());
        assert_eq!(
            tree.nodes().map(|x| x.id.as_str()).collect::<Vec<&str>>(),
            vec!["a", "b", "c"]
        );
    }

    #[test]
    fn test_dependency_and_lockout() {
        let mut tree = ResearchTree::new(&abc_defs()).unwrap();
        let mut car = CarStats::default();

        tree.start_project("a").unwrap();
        assert_eq!(tree.remaining_time(), Some(2));
        assert!(tree.advance_time(1, &mut car).is_none());
        assert_eq!(tree.remaining_time(), Some(1));

        let completion = tree.advance_time(1, &mut car).unwrap();
        assert_eq!(completion.node_id, "a");
        assert_eq!(completion.applied, vec![(StatKey::AeroDownforce, 5)]);
        assert_eq!(car.aero.downforce, 5);
        assert_eq!(tree.state("a"), Some(NodeState::Completed));
        assert_eq!(tree.state("b"), Some(NodeState::Available));
        assert!(tree.active_project().is_none());

        tree.start_project("b").unwrap();
        assert_eq!(tree.state("c"), Some(NodeState::MutuallyLocked));

        tree.advance_time(1, &mut car).unwrap();
        assert_eq!(tree.state("b"), Some(NodeState::Completed));
        assert_eq!(tree.state("c"), Some(NodeState::MutuallyLocked));
        assert_eq!(car.powertrain.power_output, 3);
        assert_eq!(car.chassis.weight_reduction, 0);
    }

    #[test]
    fn test_lockout_both_ways() {
        let mut tree = ResearchTree::new(&abc_defs()).unwrap();
        tree.start_project("c").unwrap();

        // b is still locked by its dependency but can never be researched anymore
        assert_eq!(tree.state("b"), Some(NodeState::MutuallyLocked));

        let mut car = CarStats::default();
        tree.advance_time(1, &mut car).unwrap();
        tree.start_project("a").unwrap();
        tree.advance_time(5, &mut car).unwrap();
        assert_eq!(tree.state("b"), Some(NodeState::MutuallyLocked));
    }

    #[test]
    fn test_declined_starts() {
        let mut tree = ResearchTree::new(&abc_defs()).unwrap();

        assert_eq!(
            tree.start_project("x"),
            Err(StartDeclined::UnknownNode(String::from("x")))
        );
        assert_eq!(
            tree.start_project("b"),
            Err(StartDeclined::NotAvailable {
                node: String::from("b"),
                state: NodeState::Locked
            })
        );

        tree.start_project("a").unwrap();
        let snapshot = tree.snapshot();
        assert_eq!(
            tree.start_project("c"),
            Err(StartDeclined::ProjectActive {
                active: String::from("a")
            })
        );
        assert_eq!(tree.snapshot(), snapshot);
        assert!(!tree.is_fundable("c"));
    }

    #[test]
    fn test_is_fundable() {
        let mut tree = ResearchTree::new(&abc_defs()).unwrap();
        assert!(tree.is_fundable("a"));
        assert!(!tree.is_fundable("b"));
        assert!(!tree.is_fundable("x"));

        tree.start_project("a").unwrap();
        assert!(!tree.is_fundable("a"));
    }

    #[test]
    fn test_advance_zero() {
        let mut tree = ResearchTree::new(&abc_defs()).unwrap();
        let mut car = CarStats::default();

        assert!(tree.advance_time(0, &mut car).is_none());
        tree.start_project("a").unwrap();
        let snapshot = tree.snapshot();
        assert!(tree.advance_time(0, &mut car).is_none());
        assert_eq!(tree.snapshot(), snapshot);
        assert_eq!(car, CarStats::default());
    }

    #[test]
    fn test_advance_without_project() {
        let mut tree = ResearchTree::new(&abc_defs()).unwrap();
        let mut car = CarStats::default();
        assert!(tree.advance_time(10, &mut car).is_none());
        assert_eq!(tree.state("a"), Some(NodeState::Available));
    }

    #[test]
    fn test_overflow_discarded() {
        let mut tree = ResearchTree::new(&abc_defs()).unwrap();
        let mut car = CarStats::default();

        tree.start_project("a").unwrap();
        tree.advance_time(7, &mut car).unwrap();
        assert_eq!(tree.node("a").unwrap().progress_time, 2);

        tree.start_project("b").unwrap();
        assert_eq!(tree.node("b").unwrap().progress_time, 0);
    }

    #[test]
    fn test_multiple_dependencies() {
        let defs = vec![
            node_def("a", 1, &[], &[], &[]),
            node_def("b", 1, &[], &[], &[]),
            node_def("c", 1, &[("aero.drag_efficiency", 2)], &["a", "b"], &[]),
        ];
        let mut tree = ResearchTree::new(&defs).unwrap();
        let mut car = CarStats::default();

        tree.start_project("a").unwrap();
        tree.advance_time(1, &mut car);
        assert_eq!(tree.state("c"), Some(NodeState::Locked));

        tree.start_project("b").unwrap();
        tree.advance_time(1, &mut car);
        assert_eq!(tree.state("c"), Some(NodeState::Available));
    }

    #[test]
    fn test_restore_unlocks_new_node() {
        // b is missing from the saved state, e.g. added to the tree definition later on
        let mut tree = ResearchTree::new(&abc_defs()).unwrap();
        let tree_state = TreeState {
            active_project: None,
            nodes: vec![
                NodeSnapshot {
                    node_id: String::from("a"),
                    state: NodeState::Completed,
                    progress_time: 2,
                },
                NodeSnapshot {
                    node_id: String::from("c"),
                    state: NodeState::Available,
                    progress_time: 0,
                },
            ],
        };

        tree.restore(&tree_state).unwrap();
        assert_eq!(tree.state("b"), Some(NodeState::Available));
        assert!(tree.is_fundable("b"));

        let mut car = CarStats::default();
        tree.start_project("b").unwrap();
        tree.advance_time(1, &mut car).unwrap();
        assert_eq!(tree.state("b"), Some(NodeState::Completed));
        assert_eq!(tree.state("c"), Some(NodeState::MutuallyLocked));
    }

    #[test]
    fn test_load_errors() {
        let defs = vec![node_def("a", 1, &[], &[], &[]), node_def("a", 2, &[], &[], &[])];
        assert_eq!(
            ResearchTree::new(&defs).unwrap_err(),
            TreeError::DuplicateId(String::from("a"))
        );

        let defs = vec![node_def("a", 1, &[], &["z"], &[])];
        assert_eq!(
            ResearchTree::new(&defs).unwrap_err(),
            TreeError::UnknownDependency {
                node: String::from("a"),
                requires: String::from("z")
            }
        );

        let defs = vec![node_def("a", 1, &[], &[], &["z"])];
        assert!(matches!(
            ResearchTree::new(&defs),
            Err(TreeError::UnknownLockout { .. })
        ));

        let defs = vec![node_def("a", 1, &[("aero.wings", 1)], &[], &[])];
        assert_eq!(
            ResearchTree::new(&defs).unwrap_err(),
            TreeError::UnknownEffect {
                node: String::from("a"),
                path: String::from("aero.wings")
            }
        );
    }
}
