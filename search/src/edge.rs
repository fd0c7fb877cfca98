//! Tour-of-edges beam search engine.
//!
//! The frontier tree is never materialized as nodes. It is stored as the
//! linear sequence of its Euler tour: a leaf record per frontier node and an
//! enter/leave record pair around every interior subtree. Walking the
//! sequence in order is exactly a depth-first traversal, so one pass drives
//! the user state across the whole frontier with one `apply`/`revert` pair
//! per edge — no state is ever cloned.
//!
//! Each round the tour is rewritten in place: surviving leaves have their
//! children spliced in beneath them, dead leaves are omitted, and interior
//! records that would enclose an empty subtree are elided as they are
//! emitted. Prefixes shared by every live leaf are peeled off the front of
//! the tour once per round and committed permanently, so long common stems
//! are not re-walked.
//!
//! This engine assumes every candidate advances exactly one depth. For
//! multi-step candidates use [`crate::skip::skip_search`].

use crate::contract::{CostV1, EdgeSearchStateV1, FingerprintV1, SearchStateV1};
use crate::error::SearchError;
use crate::policy::{EdgePolicyV1, FinishRuleV1};
use crate::report::{SearchReportV1, SearchResultV1, TerminationV1};
use crate::selector::{CandidateV1, SelectorCountersV1, SelectorV1};

/// One record of the Euler tour.
#[derive(Debug, Clone, Copy, PartialEq)]
enum TourStepV1<A> {
    /// A frontier leaf and the edge leading to it.
    Leaf { leaf: usize, action: A },
    /// Enter a subtree along this edge.
    Forward { action: A },
    /// Leave a subtree along this edge.
    Backward { action: A },
}

/// The frontier tree, stored as its Euler tour.
struct TourTreeV1<S: EdgeSearchStateV1> {
    state: S,
    curr: Vec<TourStepV1<S::Action>>,
    next: Vec<TourStepV1<S::Action>>,
    /// Per-leaf `(cost, fingerprint)`, indexed by leaf slot.
    leaves: Vec<(S::Cost, S::Fingerprint)>,
    /// Children staged for grafting, indexed by parent leaf slot.
    buckets: Vec<Vec<(S::Action, S::Cost, S::Fingerprint)>>,
    /// Prefix of actions shared by every live leaf, applied permanently to
    /// the state and prepended to every returned path. Only grows.
    committed: Vec<S::Action>,
}

impl<S: EdgeSearchStateV1> TourTreeV1<S> {
    fn new(state: S, policy: &EdgePolicyV1) -> Self {
        Self {
            state,
            curr: Vec::with_capacity(policy.tour_capacity),
            next: Vec::with_capacity(policy.tour_capacity),
            leaves: Vec::with_capacity(policy.beam_width),
            buckets: (0..policy.beam_width).map(|_| Vec::new()).collect(),
            committed: Vec::new(),
        }
    }

    /// Walk the tour, driving the state differentially, and let every leaf
    /// expand into the selector. Returns the number of leaves expanded.
    fn dfs(
        &mut self,
        selector: &mut SelectorV1<S::Action, S::Cost, S::Fingerprint>,
    ) -> u64 {
        let Self { state, curr, .. } = self;

        if curr.is_empty() {
            // First round: the frontier is the root alone.
            let _ = state.root_node();
            state.expand(0, selector);
            return 1;
        }

        let mut expanded = 0;
        for &step in curr.iter() {
            match step {
                TourStepV1::Leaf { leaf, action } => {
                    state.apply(action);
                    state.expand(leaf, selector);
                    state.revert(action);
                    expanded += 1;
                }
                TourStepV1::Forward { action } => state.apply(action),
                TourStepV1::Backward { action } => state.revert(action),
            }
        }
        expanded
    }

    /// Rewrite the tour so it is the Euler tour of the frontier one depth
    /// deeper: graft the survivors beneath their parents, omit dead leaves,
    /// elide emptied subtrees.
    fn update(&mut self, candidates: &[CandidateV1<S::Action, S::Cost, S::Fingerprint>]) {
        let Self {
            state,
            curr,
            next,
            leaves,
            buckets,
            committed,
        } = self;

        leaves.clear();

        if curr.is_empty() {
            // First round: every candidate is a child of the implicit root.
            for candidate in candidates {
                curr.push(TourStepV1::Leaf {
                    leaf: leaves.len(),
                    action: candidate.action,
                });
                leaves.push((candidate.cost, candidate.fingerprint));
            }
            return;
        }

        for candidate in candidates {
            buckets[candidate.parent].push((
                candidate.action,
                candidate.cost,
                candidate.fingerprint,
            ));
        }

        // Peel unanimous front edges: while the tour is a single stem (its
        // first record enters the subtree its last record leaves), commit
        // the stem edge permanently so no future round re-walks it.
        let mut start = 0;
        while let TourStepV1::Forward { action } = curr[start] {
            let matches_back = match curr.last() {
                Some(step) => step_action(*step) == action,
                None => false,
            };
            if !matches_back {
                break;
            }
            state.apply(action);
            committed.push(action);
            start += 1;
            curr.pop();
        }

        for i in start..curr.len() {
            match curr[i] {
                TourStepV1::Leaf { leaf, action } => {
                    if buckets[leaf].is_empty() {
                        // No surviving child: this leaf dies with its edge.
                        continue;
                    }
                    next.push(TourStepV1::Forward { action });
                    for &(child_action, cost, fingerprint) in &buckets[leaf] {
                        next.push(TourStepV1::Leaf {
                            leaf: leaves.len(),
                            action: child_action,
                        });
                        leaves.push((cost, fingerprint));
                    }
                    buckets[leaf].clear();
                    next.push(TourStepV1::Backward { action });
                }
                TourStepV1::Forward { action } => {
                    next.push(TourStepV1::Forward { action });
                }
                TourStepV1::Backward { action } => {
                    // An enter immediately followed by a leave encloses an
                    // empty subtree; cancel the pair.
                    if matches!(next.last(), Some(TourStepV1::Forward { .. })) {
                        next.pop();
                    } else {
                        next.push(TourStepV1::Backward { action });
                    }
                }
            }
        }

        std::mem::swap(curr, next);
        next.clear();
    }

    /// Reconstruct the root-to-leaf action path for a leaf slot by replaying
    /// the tour.
    ///
    /// # Panics
    ///
    /// Panics if the walk consumes the whole tour without reaching `parent`
    /// — the slot does not belong to the current frontier.
    fn path(&self, parent: usize, turn: usize) -> Vec<S::Action> {
        let mut actions = self.committed.clone();
        actions.reserve(turn);
        if self.curr.is_empty() {
            // First round: every candidate hangs off the implicit root.
            return actions;
        }
        for &step in &self.curr {
            match step {
                TourStepV1::Leaf { leaf, action } => {
                    if leaf == parent {
                        actions.push(action);
                        return actions;
                    }
                }
                TourStepV1::Forward { action } => actions.push(action),
                TourStepV1::Backward { .. } => {
                    actions.pop();
                }
            }
        }
        panic!("tour walk ended without reaching leaf slot {parent}");
    }
}

fn step_action<A: Copy>(step: TourStepV1<A>) -> A {
    match step {
        TourStepV1::Leaf { action, .. }
        | TourStepV1::Forward { action }
        | TourStepV1::Backward { action } => action,
    }
}

/// Run a beam search with the tour-of-edges engine.
///
/// Returns the action path from the implicit root to the chosen leaf,
/// paired with the execution report. An empty path with
/// [`TerminationV1::FrontierExhausted`] means the frontier died before any
/// finished candidate was recorded — callers that can observe it should
/// treat it as "no solution found".
///
/// # Errors
///
/// Returns a [`SearchError`] only for pre-flight policy validation
/// failures; no search step is taken in that case.
pub fn edge_search<S: EdgeSearchStateV1>(
    policy: &EdgePolicyV1,
    state: S,
) -> Result<SearchResultV1<S::Action>, SearchError> {
    policy.validate(S::Fingerprint::DEDUP)?;

    let mut tree = TourTreeV1::new(state, policy);
    let mut selector: SelectorV1<S::Action, S::Cost, S::Fingerprint> =
        SelectorV1::new(policy.beam_width, policy.dedup_capacity);

    // Deferred-mode record of the cheapest finished candidate seen so far.
    let mut best_cost = S::Cost::CEILING;
    let mut best_actions: Vec<S::Action> = Vec::new();
    let mut best_recorded = false;
    let mut expansions = 0u64;

    for turn in 0..policy.max_turns {
        expansions += tree.dfs(&mut selector);

        if selector.have_finished() {
            match policy.finish_rule {
                FinishRuleV1::Immediate => {
                    let candidate = selector.finished_candidates()[0];
                    let mut actions = tree.path(candidate.parent, turn + 1);
                    actions.push(candidate.action);
                    return Ok(finish(
                        actions,
                        turn + 1,
                        expansions,
                        *selector.counters(),
                        TerminationV1::GoalReached,
                    ));
                }
                FinishRuleV1::Deferred => {
                    for &candidate in selector.finished_candidates() {
                        if candidate.cost < best_cost {
                            let mut actions = tree.path(candidate.parent, turn + 1);
                            actions.push(candidate.action);
                            best_cost = candidate.cost;
                            best_actions = actions;
                            best_recorded = true;
                        }
                    }
                    selector.clear_finished();
                }
            }
        }

        // Frontier empty after finished filtering: return the recorded best
        // (deferred mode) or nothing.
        let Some(&best) = selector.best_candidate() else {
            let termination = if best_recorded {
                TerminationV1::GoalReached
            } else {
                TerminationV1::FrontierExhausted
            };
            return Ok(finish(
                best_actions,
                turn + 1,
                expansions,
                *selector.counters(),
                termination,
            ));
        };

        if turn + 1 == policy.max_turns {
            let mut actions = tree.path(best.parent, turn + 1);
            actions.push(best.action);
            return Ok(finish(
                actions,
                turn + 1,
                expansions,
                *selector.counters(),
                TerminationV1::TurnLimit,
            ));
        }

        tree.update(selector.select());
        selector.clear();
    }

    // Zero-turn budget: no rounds ran, nothing to return.
    Ok(finish(
        Vec::new(),
        0,
        expansions,
        *selector.counters(),
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
            engine: "edge",
            turns_executed: turns_executed as u64,
            expansions,
            counters,
            termination,
        },
    }
}
