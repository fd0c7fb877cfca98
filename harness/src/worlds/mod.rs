//! Deterministic worlds for exercising the search engines.
//!
//! Each world pins one stress axis:
//!
//! - [`ladder`] — a single unbranched stem with a scripted cost sequence
//!   and scripted finish depths; exercises direct-road commitment, finish
//!   rules, and frontier exhaustion.
//! - [`lattice`] — slot assignment reachable via many orderings; its
//!   order-insensitive fingerprint manufactures duplicates for the dedup
//!   path and its branching pressures the beam cap.
//! - [`relay`] — pushes only multi-step candidates; exercises the skip
//!   engine's selector pipeline and expiry buckets.

pub mod ladder;
pub mod lattice;
pub mod relay;
