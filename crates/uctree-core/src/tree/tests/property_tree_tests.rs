use proptest::prelude::*;

use crate::{CloneContext, Tree, TreeError};

use super::StaticState;

const ALL_ACTIONS: [&str; 6] = ["a", "b", "c", "d", "e", "f"];

proptest! {
    #[test]
    fn untried_and_tried_actions_partition_available_actions(
        available in 1usize..=ALL_ACTIONS.len(),
        attempts in proptest::collection::vec(0usize..ALL_ACTIONS.len(), 0..24),
    ) {
        let state = StaticState::new(&ALL_ACTIONS[..available]);
        let mut tree = Tree::new(&state, CloneContext::new());
        let root = tree.root_id();

        for idx in attempts {
            let action = ALL_ACTIONS[idx].to_string();
            let was_untried = tree.untried_actions(root).unwrap().contains(&action);
            let result = tree.add_child(root, action);

            if was_untried {
                prop_assert!(result.is_ok());
            } else {
                let is_invalid_action = matches!(result, Err(TreeError::InvalidAction { .. }));
                prop_assert!(is_invalid_action);
            }

            let untried = tree.untried_actions(root).unwrap();
            let tried: Vec<String> = tree
                .children(root)
                .unwrap()
                .iter()
                .map(|child| tree.incoming_action(*child).unwrap().cloned().unwrap())
                .collect();

            prop_assert!(untried.iter().all(|action| !tried.contains(action)));
            prop_assert_eq!(untried.len() + tried.len(), available);
            prop_assert_eq!(
                tree.is_fully_expanded(root).unwrap(),
                tried.len() == state.actions.len()
            );

            // Untried actions keep the state's enumeration order.
            let in_order: Vec<String> = state
                .actions
                .iter()
                .filter(|action| !tried.contains(action))
                .cloned()
                .collect();
            prop_assert_eq!(untried, in_order);
        }
    }
}
