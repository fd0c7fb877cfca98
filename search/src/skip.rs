//! Skip-capable beam search engine.
//!
//! Unlike the tour engine, candidates here may advance the search by more
//! than one user-turn (`step > 1`). A deferred candidate has to survive
//! rounds in which it is not yet realized, so the frontier tree is held as
//! explicit nodes in an object pool, linked parent/child/sibling, rather
//! than as a flat tour. Two per-step pipelines make the deferral work:
//! [`MultiSelectorsV1`] holds each round's candidates by step offset, and a
//! deque of expiry buckets keeps an expanded leaf alive until its longest
//! pending candidate has been realized.
//!
//! The DFS clears a node's `active` bit on the way down; grafting a new
//! child re-activates the ancestor chain. A subtree that admits no children
//! therefore goes dark and is skipped by every later walk until its expiry
//! bucket culls it — no eager teardown.

use crate::contract::{FingerprintV1, RootNodeV1, SearchStateV1, SkipSearchStateV1};
use crate::error::SearchError;
use crate::multi::MultiSelectorsV1;
use crate::policy::SkipPolicyV1;
use crate::pool::ObjectPoolV1;
use crate::report::{SearchReportV1, SearchResultV1, TerminationV1};
use crate::selector::{CandidateV1, SelectorCountersV1};
use std::collections::VecDeque;

/// A frontier tree node. Links are pool slots; the root carries no action.
#[derive(Debug, Clone)]
struct PoolNodeV1<A, C, F> {
    action: Option<A>,
    /// Candidate payload at admission time. The walk reads only links and
    /// the active bit; these travel with the node for inspection.
    #[allow(dead_code)]
    cost: C,
    #[allow(dead_code)]
    fingerprint: F,
    parent: Option<usize>,
    child: Option<usize>,
    left: Option<usize>,
    right: Option<usize>,
    active: bool,
}

/// The frontier tree: a doubly-linked child/sibling structure in a pool.
struct SkipTreeV1<S: SkipSearchStateV1> {
    state: S,
    nodes: ObjectPoolV1<PoolNodeV1<S::Action, S::Cost, S::Fingerprint>>,
    root: usize,
    /// Expiry buckets by remaining lookahead offset. The front bucket's
    /// leaves have outlived every candidate they proposed and may be culled.
    expired: VecDeque<Vec<usize>>,
}

impl<S: SkipSearchStateV1> SkipTreeV1<S> {
    fn new(state: S, nodes_capacity: usize, root: RootNodeV1<S::Cost, S::Fingerprint>) -> Self {
        let mut nodes = ObjectPoolV1::with_capacity(nodes_capacity);
        let root = nodes.push(PoolNodeV1 {
            action: None,
            cost: root.cost,
            fingerprint: root.fingerprint,
            parent: None,
            child: None,
            left: None,
            right: None,
            active: true,
        });
        Self {
            state,
            nodes,
            root,
            expired: VecDeque::new(),
        }
    }

    fn root_active(&self) -> bool {
        self.nodes[self.root].active
    }

    /// One round of frontier traversal: cull expired leaves, advance the
    /// root past single-child stems, then visit every active leaf in DFS
    /// order, letting each expand. Returns the number of leaves expanded.
    fn dfs(&mut self, selectors: &mut MultiSelectorsV1<S::Action, S::Cost, S::Fingerprint>) -> u64 {
        self.cull_expired();
        self.advance_root();

        let mut v = self.root;
        if !self.nodes[v].active {
            return 0;
        }

        let mut expanded = 0;
        loop {
            v = self.descend_to_leaf(v);

            selectors.reset_step_max();
            self.state.expand(v, selectors);
            expanded += 1;

            // Keep this leaf alive until its longest-step candidate has
            // been realized.
            let horizon = selectors.step_max();
            while self.expired.len() < horizon {
                self.expired.push_back(Vec::new());
            }
            self.expired[horizon - 1].push(v);

            v = self.ascend(v);
            if v == self.root {
                break;
            }
        }
        expanded
    }

    /// Root-to-node action path, including edges the root has permanently
    /// advanced over.
    ///
    /// # Panics
    ///
    /// Panics if a node's action/parent linkage is inconsistent.
    fn path_from_root(&self, mut v: usize) -> Vec<S::Action> {
        let mut path = Vec::new();
        loop {
            let node = &self.nodes[v];
            match (node.action, node.parent) {
                (Some(action), Some(parent)) => {
                    path.push(action);
                    v = parent;
                }
                (None, None) => break,
                _ => panic!("node {v} has inconsistent action/parent linkage"),
            }
        }
        path.reverse();
        path
    }

    /// Graft a candidate as the leftmost child of its parent and
    /// re-activate the ancestor chain.
    fn add_leaf(&mut self, candidate: CandidateV1<S::Action, S::Cost, S::Fingerprint>) -> usize {
        let parent = candidate.parent;
        let sibling = self.nodes[parent].child;
        let v = self.nodes.push(PoolNodeV1 {
            action: Some(candidate.action),
            cost: candidate.cost,
            fingerprint: candidate.fingerprint,
            parent: Some(parent),
            child: None,
            left: None,
            right: sibling,
            active: true,
        });

        self.nodes[parent].child = Some(v);
        if let Some(sibling) = sibling {
            self.nodes[sibling].left = Some(v);
        }

        let mut u = parent;
        while !self.nodes[u].active {
            self.nodes[u].active = true;
            if u == self.root {
                break;
            }
            match self.nodes[u].parent {
                Some(p) => u = p,
                None => panic!("activation chain of node {v} escaped the search root"),
            }
        }

        v
    }

    /// While the root has exactly one child, walk into it permanently. The
    /// stem edge is applied to the state once and never re-walked.
    fn advance_root(&mut self) {
        let mut child = self.nodes[self.root].child;
        while let Some(c) = child {
            if self.nodes[c].right.is_some() {
                break;
            }
            self.root = c;
            let action = self.edge_action(c);
            self.state.apply(action);
            child = self.nodes[c].child;
        }
    }

    /// Descend to the leftmost active leaf under `v`, applying edges and
    /// clearing active bits on the way down.
    fn descend_to_leaf(&mut self, mut v: usize) -> usize {
        let mut child = self.nodes[v].child;
        while let Some(first) = child {
            let mut c = first;
            while !self.nodes[c].active {
                match self.nodes[c].right {
                    Some(right) => c = right,
                    None => panic!("active node {v} has no active child"),
                }
            }
            self.nodes[v].active = false;
            v = c;
            let action = self.edge_action(c);
            self.state.apply(action);
            child = self.nodes[c].child;
        }
        self.nodes[v].active = false;
        v
    }

    /// Ascend from `v`, reverting edges, until an active right sibling is
    /// found (enter it and return) or the root is reached.
    fn ascend(&mut self, mut v: usize) -> usize {
        while v != self.root {
            let action = self.edge_action(v);
            self.state.revert(action);

            let mut u = self.nodes[v].right;
            while let Some(r) = u {
                if self.nodes[r].active {
                    let action = self.edge_action(r);
                    self.state.apply(action);
                    return r;
                }
                u = self.nodes[r].right;
            }

            match self.nodes[v].parent {
                Some(p) => v = p,
                None => panic!("ascent from node {v} escaped the search root"),
            }
        }
        self.root
    }

    /// Cull every leaf in the front expiry bucket whose subtree produced no
    /// surviving children, then rotate the bucket queue.
    fn cull_expired(&mut self) {
        let Some(mut bucket) = self.expired.pop_front() else {
            return;
        };
        for v in bucket.drain(..) {
            if self.nodes[v].child.is_none() {
                self.remove_leaf(v);
            }
        }
        // The emptied bucket becomes the farthest-out offset.
        self.expired.push_back(bucket);
    }

    /// Free a childless leaf, relink its siblings, and cascade to ancestors
    /// left childless by the removal.
    ///
    /// # Panics
    ///
    /// Panics if the cascade reaches the search root — the frontier emptied
    /// out from under a search that was still running.
    fn remove_leaf(&mut self, mut v: usize) {
        loop {
            let left = self.nodes[v].left;
            let right = self.nodes[v].right;
            match left {
                None => {
                    let Some(parent) = self.nodes[v].parent else {
                        panic!("attempted to cull the search root");
                    };
                    self.nodes.pop(v);
                    self.nodes[parent].child = right;
                    if let Some(right) = right {
                        self.nodes[right].left = None;
                        return;
                    }
                    // Only child removed: the parent is childless now.
                    v = parent;
                }
                Some(left) => {
                    self.nodes.pop(v);
                    self.nodes[left].right = right;
                    if let Some(right) = right {
                        self.nodes[right].left = Some(left);
                    }
                    return;
                }
            }
        }
    }

    /// The action on the edge into a non-root node.
    fn edge_action(&self, v: usize) -> S::Action {
        match self.nodes[v].action {
            Some(action) => action,
            None => panic!("node {v} has no incoming edge action"),
        }
    }
}

/// Run a beam search with the skip-capable engine.
///
/// `root` seeds the tree; the root has no incoming action, so paths start
/// at its first grafted child. The engine always returns on the first
/// finished candidate. An empty path with
/// [`TerminationV1::FrontierExhausted`] means every branch died (or every
/// pending selector drained empty) before a result existed.
///
/// # Errors
///
/// Returns a [`SearchError`] only for pre-flight policy validation
/// failures; no search step is taken in that case.
pub fn skip_search<S: SkipSearchStateV1>(
    policy: &SkipPolicyV1,
    state: S,
    root: RootNodeV1<S::Cost, S::Fingerprint>,
) -> Result<SearchResultV1<S::Action>, SearchError> {
    policy.validate(S::Fingerprint::DEDUP)?;

    let mut tree = SkipTreeV1::new(state, policy.nodes_capacity, root);
    let mut selectors: MultiSelectorsV1<S::Action, S::Cost, S::Fingerprint> =
        MultiSelectorsV1::new(policy.beam_width, policy.dedup_capacity);
    let mut expansions = 0u64;

    for turn in 0..policy.max_turns {
        expansions += tree.dfs(&mut selectors);

        let selector = selectors.pop_selector();

        if selector.have_finished() {
            let candidate = selector.finished_candidates()[0];
            let mut actions = tree.path_from_root(candidate.parent);
            actions.push(candidate.action);
            selectors.retire_counters(&selector);
            return Ok(finish(
                actions,
                turn + 1,
                expansions,
                selectors.counters(),
                TerminationV1::GoalReached,
            ));
        }

        if turn + 1 == policy.max_turns {
            selectors.retire_counters(&selector);
            return Ok(match selector.best_candidate() {
                Some(&best) => {
                    let mut actions = tree.path_from_root(best.parent);
                    actions.push(best.action);
                    finish(
                        actions,
                        turn + 1,
                        expansions,
                        selectors.counters(),
                        TerminationV1::TurnLimit,
                    )
                }
                None => finish(
                    Vec::new(),
                    turn + 1,
                    expansions,
                    selectors.counters(),
                    TerminationV1::FrontierExhausted,
                ),
            });
        }

        // Every pipeline stage drained and no branch can wake up again:
        // the search is dead, stop before idling to the turn limit.
        if selector.select().is_empty() && !selectors.have_pending() && !tree.root_active() {
            selectors.retire_counters(&selector);
            return Ok(finish(
                Vec::new(),
                turn + 1,
                expansions,
                selectors.counters(),
                TerminationV1::FrontierExhausted,
            ));
        }

        for &candidate in selector.select() {
            tree.add_leaf(candidate);
        }

        selectors.push_selector(selector);
    }

    // Zero-turn budget: no rounds ran, nothing to return.
    Ok(finish(
        Vec::new(),
        0,
        expansions,
        selectors.counters(),
        TerminationV1::TurnLimit,
    ))
}

fn finish<A>(
    actions: Vec<A>,
    turns_executed: usize,
    expansions: u64,
    counters: SelectorCountersV1,
    termination: TerminationV1,
) -> SearchResultV1<A> {
    SearchResultV1 {
        actions,
        report: SearchReportV1 {
            engine: "skip",
            turns_executed: turns_executed as u64,
            expansions,
            counters,
            termination,
        },
    }
}
