//! `SearchReportV1`: aggregate accounting for one search execution.
//!
//! Every search returns a report alongside its action path, whatever the
//! termination. The canonical JSON form (sorted keys, compact, integers
//! only) is byte-comparable, so determinism tests can assert equality of
//! serialized reports across runs.

use crate::selector::SelectorCountersV1;

/// Why a search stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationV1 {
    /// A finished candidate was selected as the result.
    GoalReached,
    /// The turn budget elapsed; the result is the best frontier candidate
    /// (or the best deferred finish).
    TurnLimit,
    /// The frontier emptied before any usable result existed. The action
    /// path is empty in this case unless a deferred finish was recorded.
    FrontierExhausted,
}

impl TerminationV1 {
    fn as_str(self) -> &'static str {
        match self {
            Self::GoalReached => "goal_reached",
            Self::TurnLimit => "turn_limit",
            Self::FrontierExhausted => "frontier_exhausted",
        }
    }
}

/// Aggregate metadata for one search execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchReportV1 {
    /// Engine identifier (`"edge"` or `"skip"`).
    pub engine: &'static str,
    /// Rounds actually executed.
    pub turns_executed: u64,
    /// Leaf expansions performed.
    pub expansions: u64,
    /// Selector push accounting, totalled across the search.
    pub counters: SelectorCountersV1,
    /// Why the search stopped.
    pub termination: TerminationV1,
}

impl SearchReportV1 {
    /// Serialize to canonical JSON bytes: object keys in lexicographic
    /// order, compact separators, integer numbers only.
    #[must_use]
    pub fn to_canonical_json_bytes(&self) -> Vec<u8> {
        let value = serde_json::json!({
            "candidates_pushed": self.counters.pushed,
            "cost_rejections": self.counters.cost_rejected,
            "duplicates_dropped": self.counters.dedup_dropped,
            "duplicates_replaced": self.counters.dedup_replaced,
            "engine": self.engine,
            "expansions": self.expansions,
            "finished_seen": self.counters.finished,
            "schema_version": "search_report.v1",
            "termination": self.termination.as_str(),
            "turns_executed": self.turns_executed,
        });
        // serde_json's default Map is ordered by key, so the emitted bytes
        // have sorted keys whatever the insertion order above.
        serde_json::to_vec(&value).unwrap_or_default()
    }
}

/// The outcome of a search: the action path from the implicit root to the
/// chosen leaf, plus the report.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResultV1<A> {
    /// Root-to-leaf actions. Empty on frontier exhaustion without a result
    /// and when `max_turns` is zero.
    pub actions: Vec<A>,
    /// Aggregate accounting.
    pub report: SearchReportV1,
}

impl<A> SearchResultV1<A> {
    /// Returns `true` if the search terminated on a finished candidate.
    #[must_use]
    pub fn is_goal_reached(&self) -> bool {
        matches!(self.report.termination, TerminationV1::GoalReached)
    }
}
