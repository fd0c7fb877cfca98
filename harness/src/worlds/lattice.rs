//! `Lattice`: slot assignment with an order-insensitive fingerprint.
//!
//! A state is `slots` cells, each unset or holding a value in
//! `1..=values`. A candidate sets one unset cell. The same final assignment
//! is reachable via every ordering of its cells, and the fingerprint hashes
//! the assignment vector itself, so sibling subtrees keep proposing
//! fingerprint-equal children — the deterministic way to exercise the
//! dedup path under a real search. A full assignment is a finished
//! candidate.

use crate::contract::AuditStateV1;
use crate::digest::{domain_fingerprint, DOMAIN_LATTICE};
use coppice_search::contract::{EdgeSearchStateV1, RootNodeV1, SearchStateV1};
use coppice_search::selector::SelectorV1;

/// One assignment move: set `slot` (currently unset) to `value`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotActionV1 {
    pub slot: u8,
    pub value: u8,
}

/// Lattice dimensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LatticeConfig {
    /// Number of cells.
    pub slots: u8,
    /// Values per cell, `1..=values`.
    pub values: u8,
}

/// Current assignment; `0` marks an unset cell.
#[derive(Debug, Clone)]
pub struct LatticeState {
    config: LatticeConfig,
    assigned: Vec<u8>,
}

impl LatticeState {
    #[must_use]
    pub fn new(config: LatticeConfig) -> Self {
        let assigned = vec![0; config.slots as usize];
        Self { config, assigned }
    }

    fn set_count(&self) -> usize {
        self.assigned.iter().filter(|&&v| v != 0).count()
    }

    /// Deterministic score: strongly prefer progress, mildly prefer small
    /// values in early slots.
    fn score(&self) -> i64 {
        let progress = self.set_count() as i64;
        let weight: i64 = self
            .assigned
            .iter()
            .enumerate()
            .map(|(slot, &value)| i64::from(value) * (slot as i64 + 1))
            .sum();
        weight - progress * 1_000
    }

    fn fingerprint(&self) -> u64 {
        domain_fingerprint(DOMAIN_LATTICE, &self.assigned)
    }
}

impl SearchStateV1 for LatticeState {
    type Action = SlotActionV1;
    type Cost = i64;
    type Fingerprint = u64;

    fn apply(&mut self, action: SlotActionV1) {
        debug_assert_eq!(self.assigned[action.slot as usize], 0, "cell already set");
        self.assigned[action.slot as usize] = action.value;
    }

    fn revert(&mut self, action: SlotActionV1) {
        debug_assert_eq!(
            self.assigned[action.slot as usize],
            action.value,
            "revert does not match the applied action"
        );
        self.assigned[action.slot as usize] = 0;
    }
}

impl EdgeSearchStateV1 for LatticeState {
    fn root_node(&mut self) -> RootNodeV1<i64, u64> {
        RootNodeV1 {
            cost: self.score(),
            fingerprint: self.fingerprint(),
        }
    }

    fn expand(&mut self, parent: usize, selector: &mut SelectorV1<SlotActionV1, i64, u64>) {
        let slots = self.config.slots;
        let values = self.config.values;
        for slot in 0..slots {
            if self.assigned[slot as usize] != 0 {
                continue;
            }
            for value in 1..=values {
                let action = SlotActionV1 { slot, value };
                self.apply(action);
                let finished = self.set_count() == slots as usize;
                selector.push(action, self.score(), self.fingerprint(), parent, finished);
                self.revert(action);
            }
        }
    }
}

impl AuditStateV1 for LatticeState {
    fn world_id(&self) -> String {
        format!("lattice:v1:n{}:v{}", self.config.slots, self.config.values)
    }

    fn state_fingerprint(&self) -> u64 {
        self.fingerprint()
    }
}
