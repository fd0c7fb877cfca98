//! Coppice Harness: deterministic worlds and replay checking for the
//! search engines.
//!
//! The harness does NOT implement search logic — it provides state
//! implementations ("worlds") that exercise specific stress axes of the
//! engines (single stems, duplicate fingerprints, dead branches, multi-step
//! candidates), plus a runner that replays a returned action path on a
//! fresh state and checks the resulting fingerprint. Worlds provide domain
//! data only; the engines own the search.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod canon;
pub mod contract;
pub mod digest;
pub mod runner;
pub mod worlds;
