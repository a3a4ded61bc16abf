//! Per-session achievement cache
//!
//! Keyed by (account id, appid). An entry is written at most twice: to
//! `Pending` when a fetch is issued, then to `Resolved` or `Failed` when it
//! settles. Settled entries never change for the rest of the session, which
//! is what guarantees at most one fetch per key no matter how often a game
//! row is expanded and collapsed.

use std::collections::HashMap;

use steamtrack_core::GameAchievementSummary;

/// State of one (account, game) key; a missing key is the empty state
#[derive(Debug, Clone, PartialEq)]
pub enum CacheEntry {
    /// A fetch for this key is outstanding
    Pending,
    Resolved(GameAchievementSummary),
    /// The fetch settled without usable data; views render this as the
    /// explicit no-data summary
    Failed,
}

#[derive(Debug, Default)]
pub struct AchievementCache {
    entries: HashMap<(String, u64), CacheEntry>,
}

impl AchievementCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, account_id: &str, appid: u64) -> Option<&CacheEntry> {
        self.entries.get(&(account_id.to_string(), appid))
    }

    /// Gate for issuing a fetch: marks the key pending and returns true only
    /// when no entry existed. Pending and settled keys return false, so a
    /// second caller attaches to the outstanding fetch instead of starting
    /// another one.
    pub fn begin(&mut self, account_id: &str, appid: u64) -> bool {
        let key = (account_id.to_string(), appid);
        if self.entries.contains_key(&key) {
            return false;
        }
        self.entries.insert(key, CacheEntry::Pending);
        true
    }

    /// Settle a key with fetched data. Settled entries are write-once.
    pub fn resolve(&mut self, account_id: &str, appid: u64, summary: GameAchievementSummary) {
        let key = (account_id.to_string(), appid);
        match self.entries.get(&key) {
            Some(CacheEntry::Resolved(_)) | Some(CacheEntry::Failed) => {}
            _ => {
                self.entries.insert(key, CacheEntry::Resolved(summary));
            }
        }
    }

    /// Settle a key as failed. Settled entries are write-once.
    pub fn fail(&mut self, account_id: &str, appid: u64) {
        let key = (account_id.to_string(), appid);
        match self.entries.get(&key) {
            Some(CacheEntry::Resolved(_)) | Some(CacheEntry::Failed) => {}
            _ => {
                self.entries.insert(key, CacheEntry::Failed);
            }
        }
    }

    /// Resolved summary for a key; None for pending, failed, or absent keys
    pub fn summary(&self, account_id: &str, appid: u64) -> Option<&GameAchievementSummary> {
        match self.get(account_id, appid) {
            Some(CacheEntry::Resolved(summary)) => Some(summary),
            _ => None,
        }
    }

    /// True once the key has left the pending state
    pub fn is_settled(&self, account_id: &str, appid: u64) -> bool {
        matches!(
            self.get(account_id, appid),
            Some(CacheEntry::Resolved(_)) | Some(CacheEntry::Failed)
        )
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
