//! Snapshot save/load
//!
//! Wheel states are persisted inside a versioned JSON envelope so snapshots
//! from an incompatible build are rejected instead of silently misread.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::sim::WheelState;

/// Current snapshot format version
pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SnapshotEnvelope {
    version: u32,
    state: WheelState,
}

/// Serialize a state into its envelope JSON
pub fn encode_snapshot(state: &WheelState) -> Result<String> {
    let envelope = SnapshotEnvelope {
        version: SNAPSHOT_VERSION,
        state: state.clone(),
    };
    Ok(serde_json::to_string_pretty(&envelope)?)
}

/// Parse envelope JSON back into a state, rejecting unknown versions
pub fn decode_snapshot(json: &str) -> Result<WheelState> {
    let envelope: SnapshotEnvelope = serde_json::from_str(json)?;
    if envelope.version != SNAPSHOT_VERSION {
        return Err(Error::UnsupportedSnapshotVersion(envelope.version));
    }
    Ok(envelope.state)
}

/// Write a snapshot of the state to `path`
pub fn save_snapshot(state: &WheelState, path: &Path) -> Result<()> {
    fs::write(path, encode_snapshot(state)?)?;
    log::info!("Snapshot saved to {}", path.display());
    Ok(())
}

/// Load a snapshot previously written with [`save_snapshot`]
pub fn load_snapshot(path: &Path) -> Result<WheelState> {
    let json = fs::read_to_string(path)?;
    let state = decode_snapshot(&json)?;
    log::info!("Snapshot loaded from {}", path.display());
    Ok(state)
}
