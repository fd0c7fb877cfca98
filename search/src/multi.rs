//! Per-step selector pipeline for the skip-capable engine.
//!
//! A candidate pushed with `step = k` does not compete for the next round's
//! frontier; it competes for the round `k - 1` further out. The pipeline is
//! a deque of selectors, one per step offset: `expand` pushes into
//! `selectors[step - 1]`, the engine consumes the front selector each round
//! and returns it, cleared, to the back. A step-2 candidate therefore sits
//! in the second selector for one round before it is realized.

use crate::contract::{CostV1, FingerprintV1};
use crate::selector::{SelectorCountersV1, SelectorV1};
use std::collections::VecDeque;

/// Deque of [`SelectorV1`], one per step offset, grown on demand.
#[derive(Debug, Clone)]
pub struct MultiSelectorsV1<A, C, F> {
    beam_width: usize,
    dedup_capacity: usize,
    selectors: VecDeque<SelectorV1<A, C, F>>,
    step_max: usize,
    /// Counters inherited from selectors consumed and not returned.
    retired_counters: SelectorCountersV1,
}

impl<A, C, F> MultiSelectorsV1<A, C, F>
where
    A: Copy + PartialEq,
    C: CostV1,
    F: FingerprintV1,
{
    /// Create an empty pipeline. Selectors are constructed lazily, sized by
    /// `beam_width` and `dedup_capacity`.
    #[must_use]
    pub fn new(beam_width: usize, dedup_capacity: usize) -> Self {
        Self {
            beam_width,
            dedup_capacity,
            selectors: VecDeque::new(),
            step_max: 1,
            retired_counters: SelectorCountersV1::default(),
        }
    }

    /// Offer a candidate that advances the search by `step` user-turns.
    ///
    /// Returns whether the candidate was admitted by its selector. Admission
    /// raises the running step maximum, which the engine reads after each
    /// `expand` to schedule the parent leaf's expiry.
    ///
    /// # Panics
    ///
    /// Panics if `step` is zero.
    pub fn push(
        &mut self,
        action: A,
        cost: C,
        fingerprint: F,
        parent: usize,
        finished: bool,
        step: usize,
    ) -> bool {
        assert!(step >= 1, "candidate step must be at least 1");
        while self.selectors.len() < step {
            self.selectors
                .push_back(SelectorV1::new(self.beam_width, self.dedup_capacity));
        }
        if self.selectors[step - 1].push(action, cost, fingerprint, parent, finished) {
            if step > self.step_max {
                self.step_max = step;
            }
            return true;
        }
        false
    }

    /// Reset the running step maximum. Called by the engine immediately
    /// before each `expand`.
    pub fn reset_step_max(&mut self) {
        self.step_max = 1;
    }

    /// Largest step admitted since the last [`Self::reset_step_max`].
    #[must_use]
    pub fn step_max(&self) -> usize {
        self.step_max
    }

    /// Detach the selector holding this round's candidates. An untouched
    /// pipeline yields a fresh, empty selector.
    #[must_use]
    pub fn pop_selector(&mut self) -> SelectorV1<A, C, F> {
        self.selectors
            .pop_front()
            .unwrap_or_else(|| SelectorV1::new(self.beam_width, self.dedup_capacity))
    }

    /// Return a consumed selector to the back of the pipeline, cleared for
    /// reuse.
    pub fn push_selector(&mut self, mut selector: SelectorV1<A, C, F>) {
        selector.clear();
        selector.clear_finished();
        self.selectors.push_back(selector);
    }

    /// Whether any queued selector still holds candidates (finished or not).
    #[must_use]
    pub fn have_pending(&self) -> bool {
        self.selectors
            .iter()
            .any(|s| !s.select().is_empty() || s.have_finished())
    }

    /// Fold a consumed selector's counters into the pipeline total without
    /// returning the selector.
    pub fn retire_counters(&mut self, selector: &SelectorV1<A, C, F>) {
        self.retired_counters.absorb(selector.counters());
    }

    /// Total push accounting across every selector this pipeline has owned.
    #[must_use]
    pub fn counters(&self) -> SelectorCountersV1 {
        let mut total = self.retired_counters;
        for selector in &self.selectors {
            total.absorb(selector.counters());
        }
        total
    }
}
