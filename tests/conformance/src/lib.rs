//! Shared fixtures for the conformance suite.
//!
//! `BinaryTraceState` is a branching world instrumented with a shared undo
//! trail: every `apply` records its action, every `revert` pops and checks
//! it. Any violation of stack discipline inside an engine panics the test,
//! and after a search the trail left on the state is exactly the prefix of
//! edges the engine committed permanently.

use coppice_harness::digest::domain_fingerprint;
use coppice_search::contract::{EdgeSearchStateV1, RootNodeV1, SearchStateV1};
use coppice_search::selector::SelectorV1;
use std::cell::RefCell;
use std::rc::Rc;

const DOMAIN_TRACE: &[u8] = b"COPPICE::CONFORMANCE_TRACE::V1\0";

/// Shared undo trail; survives the state being moved into an engine.
pub type Trail = Rc<RefCell<Vec<u64>>>;

/// Binary-branching world: action `0` or `1` appends a bit to the value.
/// Cost is the value itself, so the all-zero stem is always cheapest.
pub struct BinaryTraceState {
    value: u64,
    depth: u32,
    trail: Trail,
}

impl BinaryTraceState {
    #[must_use]
    pub fn new() -> (Self, Trail) {
        let trail: Trail = Rc::new(RefCell::new(Vec::new()));
        (
            Self {
                value: 0,
                depth: 0,
                trail: Rc::clone(&trail),
            },
            trail,
        )
    }

    fn fingerprint(&self) -> u64 {
        let mut payload = [0u8; 12];
        payload[..8].copy_from_slice(&self.value.to_le_bytes());
        payload[8..].copy_from_slice(&self.depth.to_le_bytes());
        domain_fingerprint(DOMAIN_TRACE, &payload)
    }
}

impl SearchStateV1 for BinaryTraceState {
    type Action = u64;
    type Cost = i64;
    type Fingerprint = u64;

    fn apply(&mut self, action: u64) {
        self.trail.borrow_mut().push(action);
        self.value = (self.value << 1) | action;
        self.depth += 1;
    }

    fn revert(&mut self, action: u64) {
        let popped = self.trail.borrow_mut().pop();
        assert_eq!(popped, Some(action), "revert out of apply order");
        self.value >>= 1;
        self.depth -= 1;
    }
}

impl EdgeSearchStateV1 for BinaryTraceState {
    fn root_node(&mut self) -> RootNodeV1<i64, u64> {
        RootNodeV1 {
            cost: 0,
            fingerprint: self.fingerprint(),
        }
    }

    fn expand(&mut self, parent: usize, selector: &mut SelectorV1<u64, i64, u64>) {
        for bit in 0..2u64 {
            self.apply(bit);
            #[allow(clippy::cast_possible_wrap)]
            selector.push(bit, self.value as i64, self.fingerprint(), parent, false);
            self.revert(bit);
        }
    }
}
