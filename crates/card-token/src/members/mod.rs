//! Member lookup for the validation page.
//!
//! The validation handler only needs "identifier in, display fields or
//! not-found out", expressed by [`MemberDirectory`]. The bundled adapter,
//! [`FileDirectory`], serves members from a JSON file that is reloaded on an
//! interval.
//!
//! # Module invariants
//!
//! - **No crypto dependencies.** This module never sees tokens or keys; it
//!   receives identifiers already recovered by `crate::token`.
//! - Fields are returned exactly as stored. Redaction for display belongs to
//!   whatever produces the members file.

pub mod directory;

pub use directory::FileDirectory;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use common::protocol::MemberView;
use serde::Deserialize;
use tokio::time;
use tracing::{info, warn};

/// One member as held by the directory.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MemberRecord {
    /// Internal identifier sealed into card tokens.
    pub id: String,
    pub name: String,
    pub member_number: String,
    pub status: String,
    #[serde(default)]
    pub valid_until: Option<String>,
}

impl MemberRecord {
    /// Fields shown on the validation page.
    pub fn view(&self) -> MemberView {
        MemberView {
            name: self.name.clone(),
            member_number: self.member_number.clone(),
            status: self.status.clone(),
            valid_until: self.valid_until.clone(),
        }
    }
}

/// Resolves member identifiers to display records.
#[cfg_attr(test, mockall::automock)]
pub trait MemberDirectory: Send + Sync {
    /// Look up a member by internal identifier.
    fn find(&self, id: &str) -> Option<MemberRecord>;

    /// Number of members currently known.
    fn len(&self) -> usize;

    /// Returns `true` if no members are known.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Read and parse a members file (a JSON array of [`MemberRecord`]).
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid JSON.
pub async fn load_file(path: &Path) -> Result<Vec<MemberRecord>> {
    let text = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read members file {}", path.display()))?;
    let members: Vec<MemberRecord> = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse members file {}", path.display()))?;
    Ok(members)
}

/// Load `path` and atomically replace the directory contents.
///
/// # Errors
///
/// Returns an error if the file cannot be loaded; the directory is untouched.
pub async fn reload(path: &Path, directory: &FileDirectory) -> Result<()> {
    let members = load_file(path).await?;
    directory.replace_all(members);
    info!(count = directory.len(), "member directory loaded");
    Ok(())
}

/// Spawn a background task that periodically reloads the members file.
///
/// On failure the previous contents are retained and a warning is emitted.
pub fn refresh_task(
    path: PathBuf,
    interval_secs: u64,
    directory: FileDirectory,
) -> tokio::task::JoinHandle<()> {
    let interval = std::time::Duration::from_secs(interval_secs);
    tokio::spawn(async move {
        let mut ticker = time::interval(interval);
        // First tick fires immediately; startup already loaded the file.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            if let Err(e) = reload(&path, &directory).await {
                warn!(error = %e, "member reload failed; retaining previous directory");
            }
        }
    })
}
