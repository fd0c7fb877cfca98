//! Acceptance tests for the skip-capable engine: trivial budgets,
//! immediate finishes, the step-2 relay pipeline, frontier exhaustion, and
//! path replay.

use coppice_harness::contract::AuditStateV1;
use coppice_harness::runner::replay_fingerprint;
use coppice_harness::worlds::ladder::{LadderConfig, LadderState, FINISH_ACTION_BASE};
use coppice_harness::worlds::relay::{RelayConfig, RelayState};
use coppice_search::contract::{RootNodeV1, SearchStateV1};
use coppice_search::policy::SkipPolicyV1;
use coppice_search::report::TerminationV1;
use coppice_search::skip::skip_search;

fn policy(max_turns: usize, beam_width: usize) -> SkipPolicyV1 {
    SkipPolicyV1 {
        max_turns,
        beam_width,
        nodes_capacity: 1_024,
        dedup_capacity: 64 * beam_width,
    }
}

fn ladder_root() -> RootNodeV1<i64, u64> {
    RootNodeV1 {
        cost: 0,
        fingerprint: LadderState::fingerprint_of_depth(0),
    }
}

fn relay_root() -> RootNodeV1<i64, u64> {
    RootNodeV1 {
        cost: 0,
        fingerprint: 0,
    }
}

// ---------------------------------------------------------------------------
// ACCEPTANCE: SKIP-ZERO-TURN-EMPTY
// ---------------------------------------------------------------------------

#[test]
fn zero_turn_budget_returns_an_empty_path() {
    let state = LadderState::new(LadderConfig {
        start_cost: 10,
        finishes: vec![],
        horizon: None,
    });
    let result = skip_search(&policy(0, 2), state, ladder_root()).unwrap();
    assert!(result.actions.is_empty());
    assert_eq!(result.report.termination, TerminationV1::TurnLimit);
}

// ---------------------------------------------------------------------------
// ACCEPTANCE: SKIP-IMMEDIATE-FINISH-TURN3
// ---------------------------------------------------------------------------

#[test]
fn finish_at_depth_three_returns_a_three_action_path() {
    let state = LadderState::new(LadderConfig {
        start_cost: 100,
        finishes: vec![(3, 7)],
        horizon: None,
    });
    let result = skip_search(&policy(10, 2), state, ladder_root()).unwrap();
    assert!(result.is_goal_reached());
    assert_eq!(result.report.turns_executed, 3);
    assert_eq!(result.actions.len(), 3);
    assert_eq!(*result.actions.last().unwrap(), FINISH_ACTION_BASE + 3);
}

// ---------------------------------------------------------------------------
// ACCEPTANCE: SKIP-STEP2-RELAY
// ---------------------------------------------------------------------------

#[test]
fn step_two_relay_reaches_its_target_with_alternating_rounds() {
    let config = RelayConfig {
        stride: 2,
        step: 2,
        target: 8,
    };
    let result = skip_search(&policy(20, 4), RelayState::new(config.clone()), relay_root())
        .unwrap();
    assert!(result.is_goal_reached());
    // Four strides of 2 reach the target: the path has one action per
    // non-empty round.
    assert_eq!(result.actions, vec![2, 2, 2, 2]);

    let mut fresh = RelayState::new(config.clone());
    let replayed = replay_fingerprint(&mut fresh, &result.actions);
    let mut expected = RelayState::new(config);
    for _ in 0..4 {
        expected.apply(2);
    }
    assert_eq!(replayed, expected.state_fingerprint());
}

// ---------------------------------------------------------------------------
// ACCEPTANCE: SKIP-EXHAUSTION-STOPS-EARLY
// ---------------------------------------------------------------------------

#[test]
fn dead_frontier_terminates_before_the_turn_limit() {
    // The ladder stops proposing past depth 2; the skip engine must notice
    // the drained pipeline instead of idling to the 50-turn budget.
    let state = LadderState::new(LadderConfig {
        start_cost: 10,
        finishes: vec![],
        horizon: Some(2),
    });
    let result = skip_search(&policy(50, 2), state, ladder_root()).unwrap();
    assert!(result.actions.is_empty());
    assert_eq!(result.report.termination, TerminationV1::FrontierExhausted);
    assert!(
        result.report.turns_executed < 10,
        "terminated after {} turns",
        result.report.turns_executed
    );
}

// ---------------------------------------------------------------------------
// ACCEPTANCE: SKIP-TURN-LIMIT-BEST-FRONTIER
// ---------------------------------------------------------------------------

#[test]
fn turn_limit_returns_the_best_frontier_candidate() {
    let state = LadderState::new(LadderConfig {
        start_cost: 100,
        finishes: vec![],
        horizon: None,
    });
    let result = skip_search(&policy(4, 2), state, ladder_root()).unwrap();
    assert_eq!(result.report.termination, TerminationV1::TurnLimit);
    assert_eq!(result.actions, vec![1, 2, 3, 4]);
}
