//! `Relay`: a world that proposes only multi-step candidates.
//!
//! Every expansion pushes a single candidate that covers `step` user-turns
//! at once. With `step = 2` the skip engine's front selector drains empty
//! every other round — the canonical exercise for the per-step pipeline
//! and expiry buckets. The sum finishing exactly on `target` is the goal.

use crate::contract::AuditStateV1;
use crate::digest::{domain_fingerprint, DOMAIN_RELAY};
use coppice_search::contract::{SearchStateV1, SkipSearchStateV1};
use coppice_search::multi::MultiSelectorsV1;

/// Relay stride and goal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayConfig {
    /// Amount each candidate adds to the sum.
    pub stride: i64,
    /// How many user-turns one candidate covers.
    pub step: usize,
    /// Goal sum.
    pub target: i64,
}

/// Accumulated sum along the current branch.
#[derive(Debug, Clone)]
pub struct RelayState {
    config: RelayConfig,
    sum: i64,
}

impl RelayState {
    #[must_use]
    pub fn new(config: RelayConfig) -> Self {
        Self { config, sum: 0 }
    }

    fn fingerprint_of(sum: i64) -> u64 {
        domain_fingerprint(DOMAIN_RELAY, &sum.to_le_bytes())
    }
}

impl SearchStateV1 for RelayState {
    type Action = i64;
    type Cost = i64;
    type Fingerprint = u64;

    fn apply(&mut self, action: i64) {
        self.sum += action;
    }

    fn revert(&mut self, action: i64) {
        self.sum -= action;
    }
}

impl SkipSearchStateV1 for RelayState {
    fn expand(&mut self, parent: usize, selectors: &mut MultiSelectorsV1<i64, i64, u64>) {
        let next = self.sum + self.config.stride;
        selectors.push(
            self.config.stride,
            -next,
            Self::fingerprint_of(next),
            parent,
            next == self.config.target,
            self.config.step,
        );
    }
}

impl AuditStateV1 for RelayState {
    fn world_id(&self) -> String {
        format!(
            "relay:v1:s{}:k{}:t{}",
            self.config.stride, self.config.step, self.config.target,
        )
    }

    fn state_fingerprint(&self) -> u64 {
        Self::fingerprint_of(self.sum)
    }
}
