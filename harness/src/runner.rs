//! Replay runner: drive a returned action path on a fresh world state and
//! summarize the run as a canonical artifact.
//!
//! The runner uses ONLY the public engine surface and the world contract.
//! It implements no search logic: a summary is evidence about a finished
//! search, produced the same way every time so byte equality means
//! behavioral equality.

use crate::canon::{canonical_json_bytes, CanonError};
use crate::contract::AuditStateV1;
use coppice_search::report::SearchResultV1;

/// Replay `actions` from the state's current position, returning the final
/// fingerprint.
pub fn replay_fingerprint<S: AuditStateV1>(state: &mut S, actions: &[S::Action]) -> u64 {
    for &action in actions {
        state.apply(action);
    }
    state.state_fingerprint()
}

/// Canonical JSON summary of one search run against one world.
///
/// Contains the world id, the path length, the replayed fingerprint, and
/// the engine report. Byte-stable across identical runs.
///
/// # Errors
///
/// Returns a [`CanonError`] if the report bytes are not valid JSON for the
/// canonicalizer (cannot happen for reports produced by the engines).
pub fn run_summary_bytes<A>(
    world_id: &str,
    result: &SearchResultV1<A>,
    replayed_fingerprint: u64,
) -> Result<Vec<u8>, CanonError> {
    let report: serde_json::Value =
        serde_json::from_slice(&result.report.to_canonical_json_bytes())
            .unwrap_or(serde_json::Value::Null);
    let value = serde_json::json!({
        "path_len": result.actions.len() as u64,
        "replayed_fingerprint": replayed_fingerprint,
        "report": report,
        "schema_version": "run_summary.v1",
        "world_id": world_id,
    });
    canonical_json_bytes(&value)
}
