//! `Ladder`: a single unbranched stem with scripted costs and finishes.
//!
//! Every depth proposes exactly one ordinary candidate whose cost is
//! `start_cost - depth`, so the cost sequence down the stem is known in
//! advance. Depths listed in `finishes` additionally propose a finished
//! candidate with a scripted cost. An optional `horizon` stops ordinary
//! proposals past a depth, which empties the frontier on the following
//! round — the deterministic way to drive a search into exhaustion.

use crate::contract::AuditStateV1;
use crate::digest::{domain_fingerprint, DOMAIN_LADDER};
use coppice_search::contract::{
    EdgeSearchStateV1, RootNodeV1, SearchStateV1, SkipSearchStateV1,
};
use coppice_search::multi::MultiSelectorsV1;
use coppice_search::selector::SelectorV1;

/// Action offset distinguishing finish moves from ordinary rung moves.
pub const FINISH_ACTION_BASE: u32 = 1_000_000;

/// Scripted behavior of a ladder world.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LadderConfig {
    /// The ordinary candidate at depth `d` costs `start_cost - d`.
    pub start_cost: i64,
    /// `(depth, cost)` pairs at which a finished candidate is proposed.
    pub finishes: Vec<(usize, i64)>,
    /// Depth past which no ordinary candidate is proposed.
    pub horizon: Option<usize>,
}

/// A position on the ladder. The fingerprint depends only on the depth.
#[derive(Debug, Clone)]
pub struct LadderState {
    config: LadderConfig,
    depth: usize,
}

impl LadderState {
    #[must_use]
    pub fn new(config: LadderConfig) -> Self {
        Self { config, depth: 0 }
    }

    /// The fingerprint a ladder state reports at `depth`.
    #[must_use]
    pub fn fingerprint_of_depth(depth: usize) -> u64 {
        domain_fingerprint(DOMAIN_LADDER, &(depth as u64).to_le_bytes())
    }

    fn propose(&self, parent: usize, mut push: impl FnMut(u32, i64, u64, usize, bool)) {
        let next = self.depth + 1;
        let within = self.config.horizon.map_or(true, |h| next <= h);
        if within {
            #[allow(clippy::cast_possible_truncation)]
            push(
                next as u32,
                self.config.start_cost - next as i64,
                Self::fingerprint_of_depth(next),
                parent,
                false,
            );
        }
        for &(depth, cost) in &self.config.finishes {
            if depth == next {
                #[allow(clippy::cast_possible_truncation)]
                push(
                    FINISH_ACTION_BASE + depth as u32,
                    cost,
                    Self::fingerprint_of_depth(next),
                    parent,
                    true,
                );
            }
        }
    }
}

impl SearchStateV1 for LadderState {
    type Action = u32;
    type Cost = i64;
    type Fingerprint = u64;

    fn apply(&mut self, _action: u32) {
        self.depth += 1;
    }

    fn revert(&mut self, _action: u32) {
        self.depth -= 1;
    }
}

impl EdgeSearchStateV1 for LadderState {
    fn root_node(&mut self) -> RootNodeV1<i64, u64> {
        RootNodeV1 {
            cost: 0,
            fingerprint: Self::fingerprint_of_depth(0),
        }
    }

    fn expand(&mut self, parent: usize, selector: &mut SelectorV1<u32, i64, u64>) {
        self.propose(parent, |action, cost, fingerprint, parent, finished| {
            selector.push(action, cost, fingerprint, parent, finished);
        });
    }
}

impl SkipSearchStateV1 for LadderState {
    fn expand(&mut self, parent: usize, selectors: &mut MultiSelectorsV1<u32, i64, u64>) {
        self.propose(parent, |action, cost, fingerprint, parent, finished| {
            selectors.push(action, cost, fingerprint, parent, finished, 1);
        });
    }
}

impl AuditStateV1 for LadderState {
    fn world_id(&self) -> String {
        let horizon = match self.config.horizon {
            Some(h) => h.to_string(),
            None => "open".to_string(),
        };
        format!(
            "ladder:v1:c{}:h{}:f{}",
            self.config.start_cost,
            horizon,
            self.config.finishes.len(),
        )
    }

    fn state_fingerprint(&self) -> u64 {
        Self::fingerprint_of_depth(self.depth)
    }
}
