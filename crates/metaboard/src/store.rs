//! Session files on disk.

use crate::session::{SessionSnapshot, TurnCoordinator};
use anyhow::{Context, Result};
use std::path::Path;
use tracing::{info, instrument};

/// Writes the session as pretty-printed JSON.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn save(session: &TurnCoordinator, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(&session.snapshot()).context("Failed to serialize session")?;
    std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    info!(moves = session.history().len(), "Session saved");
    Ok(())
}

/// Reads a session written by [`save`], validating the board.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn load(path: &Path) -> Result<TurnCoordinator> {
    let json = std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let snapshot: SessionSnapshot =
        serde_json::from_str(&json).with_context(|| format!("Failed to parse {}", path.display()))?;
    let session = TurnCoordinator::try_from(snapshot).context("Saved session is not a valid game")?;
    info!(moves = session.history().len(), "Session loaded");
    Ok(session)
}
