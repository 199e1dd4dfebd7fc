use std::cell::RefCell;

use super::*;

/// Protagonist picks among three actions, the adversary answers each with three more.
fn three_by_three() -> TreeGame {
    let tree = node([leaves([3, 12, 8]), leaves([2, 4, 6]), leaves([14, 5, 2])]);
    TreeGame::new(&tree, 2)
}

#[test]
fn test_minimax_picks_best_guaranteed_value() {
    let mut minimax = AgentSearch::new(SearchAlgorithm::Minimax, SearchConfig::new(1), tree_eval);
    let result = search(&mut minimax, &three_by_three());
    assert_eq!(0, result.action);
    assert_eq!(Value::from(3), result.value);
    assert_eq!(3 + 9, result.counter.states_visited);
    assert_eq!(9, result.counter.evals);
    assert_eq!(0, result.counter.prunes);
}

#[test]
fn test_alpha_beta_prunes_refuted_actions() {
    let mut alpha_beta = AgentSearch::new(SearchAlgorithm::AlphaBeta, SearchConfig::new(1), tree_eval);
    let result = search(&mut alpha_beta, &three_by_three());
    assert_eq!(0, result.action);
    assert_eq!(Value::from(3), result.value);
    // Action 1 is refuted by its first reply, action 2 only by its last
    assert_eq!(2, result.counter.prunes);
    assert_eq!(3 + 3 + 1 + 3, result.counter.states_visited);
}

#[test]
fn test_cutoffs_fire_on_equality() {
    // Action 1's first reply ties the 3 already guaranteed by action 0
    let tree = node([leaves([3, 5]), leaves([3, 9])]);
    let mut alpha_beta = AgentSearch::new(SearchAlgorithm::AlphaBeta, SearchConfig::new(1), tree_eval);
    let result = search(&mut alpha_beta, &TreeGame::new(&tree, 2));
    assert_eq!(0, result.action);
    assert_eq!(Value::from(3), result.value);
    assert_eq!(1, result.counter.prunes);
    assert_eq!(2 + 2 + 1, result.counter.states_visited);

    // The second protagonist reply below the adversary's second move ties the 4 it can already force
    let tree = node([node([
        node([leaves([4])]),
        node([leaves([4]), leaves([10])]),
    ])]);
    let position = TreeGame::new(&tree, 2);
    let mut alpha_beta = AgentSearch::new(SearchAlgorithm::AlphaBeta, SearchConfig::new(2), tree_eval);
    let result = search(&mut alpha_beta, &position);
    assert_eq!(Value::from(4), result.value);
    assert_eq!(1, result.counter.prunes);
    assert_eq!(1 + 2 + 2 + 2, result.counter.states_visited);

    let mut minimax = AgentSearch::new(SearchAlgorithm::Minimax, SearchConfig::new(2), tree_eval);
    let expected = search(&mut minimax, &position);
    assert_eq!(expected.value, result.value);
    assert_eq!(1 + 2 + 2 + 4, expected.counter.states_visited);
}

#[test]
fn test_depth_zero_scores_children_without_expanding() {
    let tree = node([
        Tree::Node(-1, vec![Tree::Leaf(100)]),
        Tree::Leaf(2),
        Tree::Node(1, vec![Tree::Leaf(-100)]),
    ]);
    for mut agent in all_searches(0, tree_eval) {
        let result = search(&mut agent, &TreeGame::new(&tree, 2));
        assert_eq!(1, result.action, "{:?}", agent.algorithm());
        assert_eq!(Value::from(2), result.value);
        assert_eq!(3, result.counter.states_visited);
        assert_eq!(3, result.counter.evals);
    }
}

#[test]
fn test_single_action_is_always_returned() {
    for tree in [node([leaves([-7, 3])]), node([leaves([-1000])])] {
        for depth in 0..=1 {
            for mut agent in all_searches(depth, tree_eval) {
                let result = search(&mut agent, &TreeGame::new(&tree, 2));
                assert_eq!(0, result.action, "{:?} at depth {depth}", agent.algorithm());
            }
        }
    }
}

#[test]
fn test_terminal_root_plays_no_op() {
    for (tree, value) in [(Tree::Win, Value::MAX), (Tree::Lose, Value::MIN)] {
        for mut agent in all_searches(2, tree_eval) {
            let result = search(&mut agent, &TreeGame::new(&tree, 2));
            assert_eq!(TreeGame::no_op(), result.action);
            assert_eq!(value, result.value);
            assert_eq!(0, result.counter.states_visited);
        }
    }
}

#[test]
fn test_terminal_states_are_not_expanded() {
    // Expanding the win would fail with `NoLegalActions`
    let tree = node([leaves([1, 2]), Tree::Win, leaves([50])]);
    for mut agent in all_searches(1, tree_eval) {
        let result = search(&mut agent, &TreeGame::new(&tree, 2));
        assert_eq!(1, result.action, "{:?}", agent.algorithm());
        assert_eq!(Value::MAX, result.value);
    }
}

#[test]
fn test_first_maximal_action_wins_ties() {
    let tree = node([leaves([1, 5]), leaves([4, 4]), leaves([6, 4]), leaves([4])]);
    for mut agent in all_searches(1, tree_eval) {
        let result = search(&mut agent, &TreeGame::new(&tree, 2));
        let expected = match agent.algorithm() {
            SearchAlgorithm::Expectimax => 2,
            _ => 1,
        };
        assert_eq!(expected, result.action, "{:?}", agent.algorithm());
    }

    let flat = node([Tree::Leaf(2), Tree::Leaf(2), Tree::Leaf(2)]);
    for mut agent in all_searches(0, tree_eval) {
        assert_eq!(0, agent.decide(&TreeGame::new(&flat, 2)).unwrap());
    }
}

#[test]
fn test_all_losing_root_plays_no_op() {
    for tree in [node([Tree::Lose]), node([Tree::Lose, Tree::Lose, Tree::Lose])] {
        for depth in 0..=1 {
            for mut agent in all_searches(depth, tree_eval) {
                let result = search(&mut agent, &TreeGame::new(&tree, 3));
                assert_eq!(TreeGame::no_op(), result.action, "{:?}", agent.algorithm());
                assert_eq!(Value::MIN, result.value);
            }
        }
    }

    // Any action above -inf displaces the no-op
    let tree = node([Tree::Lose, Tree::Node(-1000, vec![Tree::Lose]), Tree::Lose]);
    for mut agent in all_searches(0, tree_eval) {
        let result = search(&mut agent, &TreeGame::new(&tree, 2));
        assert_eq!(1, result.action, "{:?}", agent.algorithm());
        assert_eq!(Value::from(-1000), result.value);
    }
}

#[test]
fn test_every_leaf_is_depth_times_agents_moves_deep() {
    for num_agents in 1..=3 {
        for depth in 1..=3u8 {
            let leaf_moves = RefCell::new(vec![]);
            let evaluator = |state: &CountingGame| {
                leaf_moves.borrow_mut().push(state.moves);
                Value::ZERO
            };
            let position = CountingGame {
                num_agents,
                branching: 2,
                moves: 0,
            };
            for mut agent in all_searches(depth, evaluator) {
                leaf_moves.borrow_mut().clear();
                let result = search(&mut agent, &position);
                let expected = u32::from(depth) * num_agents as u32;
                let leaf_moves = leaf_moves.borrow();
                assert!(!leaf_moves.is_empty());
                assert!(
                    leaf_moves.iter().all(|&moves| moves == expected),
                    "{:?} N={num_agents} D={depth}: {leaf_moves:?}",
                    agent.algorithm()
                );
                if agent.algorithm() != SearchAlgorithm::AlphaBeta {
                    assert_eq!(1 << expected, result.counter.evals);
                }
            }
        }
    }
}

#[test]
fn test_no_legal_actions_in_non_terminal_state() {
    let tree = node([leaves([1]), Tree::Node(0, vec![])]);
    for mut agent in all_searches(1, tree_eval) {
        let err = agent.search(&TreeGame::new(&tree, 2)).unwrap_err();
        assert_eq!(SearchError::NoLegalActions { agent: 1 }, err, "{:?}", agent.algorithm());
    }

    for mut agent in all_searches(1, tree_eval) {
        let err = agent.search(&TreeGame::new(&Tree::Node(0, vec![]), 2)).unwrap_err();
        assert_eq!(SearchError::NoLegalActions { agent: 0 }, err);
    }
}

#[test]
fn test_successor_errors_are_propagated() {
    let position = CountingGame {
        num_agents: 2,
        branching: 1,
        moves: 1,
    };
    let expected = SearchError::Successor {
        agent: 0,
        error: TreeError::WrongAgent { expected: 1, found: 0 },
    };
    for mut agent in all_searches(1, |_: &CountingGame| Value::ZERO) {
        assert_eq!(expected, agent.search(&position).unwrap_err());
    }
}
