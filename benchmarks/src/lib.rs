//! Shared helpers for coppice benchmark suites.

use coppice_harness::worlds::ladder::{LadderConfig, LadderState};
use coppice_harness::worlds::lattice::{LatticeConfig, LatticeState};
use coppice_search::policy::{EdgePolicyV1, FinishRuleV1};

/// A ladder world with no finishes and an open horizon: the search always
/// runs to its turn limit, so timings measure steady-state rounds.
#[must_use]
pub fn open_ladder() -> LadderState {
    LadderState::new(LadderConfig {
        start_cost: 1_000_000,
        finishes: vec![],
        horizon: None,
    })
}

/// A lattice world sized so the beam saturates and dedup stays hot.
#[must_use]
pub fn dense_lattice() -> LatticeState {
    LatticeState::new(LatticeConfig { slots: 8, values: 4 })
}

/// Edge policy tuned for benchmark runs: no finish short-circuit, fixed
/// turn budget.
#[must_use]
pub fn edge_bench_policy(max_turns: usize, beam_width: usize) -> EdgePolicyV1 {
    EdgePolicyV1 {
        max_turns,
        beam_width,
        tour_capacity: 1 << 14,
        dedup_capacity: 64 * beam_width,
        finish_rule: FinishRuleV1::Immediate,
    }
}
