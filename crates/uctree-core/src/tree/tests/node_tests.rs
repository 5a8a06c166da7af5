use crate::{CloneContext, NodeId, Tree, TreeError};

use super::StaticState;

fn two_action_tree() -> Tree<StaticState> {
    Tree::new(&StaticState::new(&["0", "1"]), CloneContext::new())
}

#[test]
fn root_has_no_parent_and_no_incoming_action() {
    let tree = two_action_tree();
    let root = tree.root_id();

    assert_eq!(tree.parent(root).expect("root exists"), None);
    assert_eq!(tree.incoming_action(root).expect("root exists"), None);
    assert_eq!(tree.depth(root).expect("root exists"), 0);
    assert_eq!(tree.node_count(), 1);
}

#[test]
fn expansion_sequence_tracks_untried_actions() {
    let mut tree = two_action_tree();
    let root = tree.root_id();

    assert!(!tree.is_fully_expanded(root).unwrap());
    assert_eq!(tree.untried_actions(root).unwrap(), vec!["0", "1"]);

    let first = tree.add_child(root, "0".to_string()).expect("0 is untried");
    assert_eq!(tree.untried_actions(root).unwrap(), vec!["1"]);
    assert!(!tree.is_fully_expanded(root).unwrap());

    tree.add_child(root, "1".to_string()).expect("1 is untried");
    assert!(tree.untried_actions(root).unwrap().is_empty());
    assert!(tree.is_fully_expanded(root).unwrap());

    assert_eq!(tree.parent(first).unwrap(), Some(root));
    assert_eq!(tree.incoming_action(first).unwrap(), Some(&"0".to_string()));
    assert_eq!(tree.depth(first).unwrap(), 1);
    assert_eq!(tree.state(first).unwrap().applied, vec!["0"]);
}

#[test]
fn adding_a_tried_action_again_fails() {
    let mut tree = two_action_tree();
    let root = tree.root_id();
    tree.add_child(root, "0".to_string()).expect("0 is untried");

    let err = tree
        .add_child(root, "0".to_string())
        .expect_err("0 was already expanded");
    assert!(matches!(err, TreeError::InvalidAction { node_id, .. } if node_id == root));
    assert_eq!(tree.children(root).unwrap().len(), 1);
}

#[test]
fn adding_an_unavailable_action_fails() {
    let mut tree = two_action_tree();
    let root = tree.root_id();

    let err = tree
        .add_child(root, "2".to_string())
        .expect_err("2 is not available");
    assert_eq!(
        err,
        TreeError::InvalidAction {
            node_id: root,
            action: "\"2\"".to_string()
        }
    );
    assert_eq!(tree.node_count(), 1);
}

#[test]
fn best_child_requires_full_expansion() {
    let mut tree = two_action_tree();
    let root = tree.root_id();
    let child = tree.add_child(root, "0".to_string()).unwrap();
    tree.record_outcome(child, 1.0).unwrap();
    tree.record_outcome(root, 1.0).unwrap();

    for c in [0.0, 0.4, 10.0] {
        let err = tree.best_child(root, c).expect_err("root is partially expanded");
        assert_eq!(
            err,
            TreeError::NotFullyExpanded {
                node_id: root,
                children: 1,
                available: 2
            }
        );
    }
}

#[test]
fn best_child_requires_every_child_visited() {
    let mut tree = two_action_tree();
    let root = tree.root_id();
    let visited = tree.add_child(root, "0".to_string()).unwrap();
    let unvisited = tree.add_child(root, "1".to_string()).unwrap();
    tree.record_outcome(visited, 1.0).unwrap();
    tree.record_outcome(root, 1.0).unwrap();

    let err = tree.best_child(root, 0.0).expect_err("child 1 has no visits");
    assert_eq!(
        err,
        TreeError::UnvisitedChild {
            node_id: root,
            child_id: unvisited
        }
    );
}

#[test]
fn best_child_on_childless_fully_expanded_node_fails() {
    let tree = Tree::new(&StaticState::new(&[]), CloneContext::new());
    let root = tree.root_id();

    assert!(tree.is_fully_expanded(root).unwrap());
    assert_eq!(
        tree.best_child(root, 0.0),
        Err(TreeError::NoChildren { node_id: root })
    );
}

#[test]
fn best_child_without_exploration_prefers_higher_mean() {
    let mut tree = two_action_tree();
    let root = tree.root_id();
    let a = tree.add_child(root, "0".to_string()).unwrap();
    let b = tree.add_child(root, "1".to_string()).unwrap();

    for _ in 0..20 {
        tree.record_outcome(a, 0.01).unwrap();
        tree.record_outcome(b, 0.02).unwrap();
    }

    assert!((tree.total_reward(a).unwrap() - 0.2).abs() < 1e-9);
    assert!((tree.total_reward(b).unwrap() - 0.4).abs() < 1e-9);
    assert_eq!(tree.best_child(root, 0.0).unwrap(), b);
}

#[test]
fn exploration_prefers_less_visited_child_on_equal_means() {
    let mut tree = two_action_tree();
    let root = tree.root_id();
    let often = tree.add_child(root, "0".to_string()).unwrap();
    let rarely = tree.add_child(root, "1".to_string()).unwrap();

    for _ in 0..10 {
        tree.record_outcome(often, 0.5).unwrap();
        tree.record_outcome(root, 0.5).unwrap();
    }
    for _ in 0..2 {
        tree.record_outcome(rarely, 0.5).unwrap();
        tree.record_outcome(root, 0.5).unwrap();
    }

    assert_eq!(tree.best_child(root, 0.7).unwrap(), rarely);
    // Equal means without exploration: the first child wins the tie.
    assert_eq!(tree.best_child(root, 0.0).unwrap(), often);
}

#[test]
fn uct_score_matches_formula() {
    let mut tree = two_action_tree();
    let root = tree.root_id();
    let a = tree.add_child(root, "0".to_string()).unwrap();
    let b = tree.add_child(root, "1".to_string()).unwrap();

    // a: mean 0.6 over 5 visits, b: mean 0.5 over 3 visits, parent visited 8 times.
    for _ in 0..5 {
        tree.record_outcome(a, 0.6).unwrap();
        tree.record_outcome(root, 0.0).unwrap();
    }
    for _ in 0..3 {
        tree.record_outcome(b, 0.5).unwrap();
        tree.record_outcome(root, 0.0).unwrap();
    }

    let c = 0.5;
    let score = |mean: f64, visits: f64| mean + c * (2.0 * 8f64.ln() / visits).sqrt();
    assert!(score(0.5, 3.0) > score(0.6, 5.0));
    assert_eq!(tree.best_child(root, c).unwrap(), b);
    assert_eq!(tree.best_child(root, 0.0).unwrap(), a);
}

#[test]
fn record_outcome_accumulates_without_bounds() {
    let mut tree = two_action_tree();
    let root = tree.root_id();

    assert_eq!(
        tree.mean_value(root),
        Err(TreeError::UnvisitedNode { node_id: root })
    );

    tree.record_outcome(root, -3.0).unwrap();
    tree.record_outcome(root, 10.0).unwrap();

    assert_eq!(tree.visit_count(root).unwrap(), 2);
    assert_eq!(tree.total_reward(root).unwrap(), 7.0);
    assert_eq!(tree.mean_value(root).unwrap(), 3.5);
}

#[test]
fn deep_clone_is_isolated_from_node_state() {
    let tree = two_action_tree();
    let root = tree.root_id();

    let mut clone = tree.deep_clone_state(root).unwrap();
    clone.actions.clear();
    clone.terminal = true;

    assert!(!tree.is_terminal(root).unwrap());
    assert_eq!(tree.untried_actions(root).unwrap(), vec!["0", "1"]);
}

#[test]
fn tree_does_not_alias_the_callers_state() {
    let mut original = StaticState::new(&["0", "1"]);
    let mut tree = Tree::new(&original, CloneContext::new());
    let root = tree.root_id();
    tree.add_child(root, "0".to_string()).unwrap();

    original.actions.push("2".to_string());
    assert_eq!(tree.state(root).unwrap().actions, vec!["0", "1"]);
    assert!(original.applied.is_empty());
}

#[test]
fn missing_node_is_reported() {
    let tree = two_action_tree();
    let ghost = NodeId::from(42);

    assert_eq!(
        tree.visit_count(ghost),
        Err(TreeError::MissingNode { node_id: ghost })
    );
}

#[test]
fn most_promising_action_returns_the_best_childs_action() {
    let mut tree = two_action_tree();
    let root = tree.root_id();
    let a = tree.add_child(root, "0".to_string()).unwrap();
    let b = tree.add_child(root, "1".to_string()).unwrap();

    tree.record_outcome(a, 0.2).unwrap();
    tree.record_outcome(b, 0.7).unwrap();
    tree.record_outcome(root, 0.9).unwrap();

    assert_eq!(tree.most_promising_action().unwrap(), "1");
}

#[test]
fn missing_incoming_action_has_a_readable_message() {
    let err = TreeError::MissingIncomingAction {
        node_id: NodeId::from(3),
    };
    assert_eq!(err.to_string(), "node 3 has no incoming action");
}
