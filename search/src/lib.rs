//! Coppice Search: differential-update beam search for combinatorial
//! optimization.
//!
//! A beam search over states too large to copy. The engines materialize
//! only a tree of edges and walk it with an Euler tour, so moving between
//! sibling frontier nodes costs one incremental `apply`/`revert` pair on
//! the user's state instead of a clone — exactly one state instance exists
//! for the whole search.
//!
//! # Crate dependency graph
//!
//! ```text
//! coppice_search  ←  coppice_harness  ←  conformance_tests / benchmarks
//! (engines, selectors)  (worlds, replay runner)
//! ```
//!
//! # Engines
//!
//! - [`edge::edge_search`] — every candidate advances exactly one depth;
//!   the frontier tree is a flat Euler-tour sequence rewritten in place
//!   each round.
//! - [`skip::skip_search`] — candidates may cover several user-turns
//!   (`step > 1`); the frontier tree is an explicit node pool and a per-step
//!   selector pipeline defers candidates until their turn.
//!
//! # Key types
//!
//! - [`contract::SearchStateV1`] — the user state driven along tree edges
//! - [`selector::SelectorV1`] — top-K retention with fingerprint dedup
//! - [`policy::EdgePolicyV1`] / [`policy::SkipPolicyV1`] — budgets and
//!   capacities, validated pre-flight
//! - [`report::SearchResultV1`] — action path plus execution report
//!
//! Duplicate elimination is selected by the state's fingerprint *type*:
//! an unsigned fingerprint enables it, [`contract::NoFingerprint`] compiles
//! it out.

#![forbid(unsafe_code)]

pub mod contract;
pub mod edge;
pub mod error;
pub mod multi;
pub mod policy;
pub mod pool;
pub mod probe;
pub mod report;
pub mod selector;
pub mod skip;
