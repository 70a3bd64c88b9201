use std::path::Path;

use fjall::{Config, Keyspace, PartitionCreateOptions, PartitionHandle};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::api::models::HistoryEntry;

use super::error::Result;
use super::partitions::{decode_entry_key, encode_entry_key};

/// Fjall-backed record of accepted submissions
#[derive(Clone)]
pub struct HistoryStore {
    keyspace: Keyspace,
    submissions: PartitionHandle,
}

impl HistoryStore {
    /// Open or create a history store at the given path
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let keyspace = Config::new(path).open()?;
        let submissions =
            keyspace.open_partition("submissions", PartitionCreateOptions::default())?;

        info!("History store opened at: {}", path.display());
        Ok(Self {
            keyspace,
            submissions,
        })
    }

    /// Record one accepted submission
    pub fn record(&self, entry: &HistoryEntry) -> Result<()> {
        let key = encode_entry_key(&Uuid::now_v7());
        let value = serde_json::to_vec(entry)?;
        self.submissions.insert(key, value)?;
        debug!(job_id = %entry.job_id, "Recorded submission");
        Ok(())
    }

    /// Most recent submissions, newest first, at most `limit` entries.
    ///
    /// An undecodable entry is skipped rather than failing the whole
    /// listing.
    pub fn recent(&self, limit: usize) -> Result<Vec<HistoryEntry>> {
        let mut entries = Vec::with_capacity(limit.min(64));

        for pair in self.submissions.iter().rev() {
            if entries.len() == limit {
                break;
            }
            let (key, value) = pair?;
            if decode_entry_key(&key).is_none() {
                continue;
            }
            match serde_json::from_slice(&value) {
                Ok(entry) => entries.push(entry),
                Err(error) => warn!(%error, "Skipping undecodable history entry"),
            }
        }

        Ok(entries)
    }

    /// Persist all pending writes to disk
    pub fn persist(&self) -> Result<()> {
        self.keyspace.persist(fjall::PersistMode::SyncAll)?;
        Ok(())
    }
}
