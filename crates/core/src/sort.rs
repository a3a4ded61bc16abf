//! Achievement ordering strategies
//!
//! Sorting never mutates its input: views re-derive from the full cached
//! record set, so each call returns a fresh, stably ordered Vec.

use std::cmp::Ordering;

use crate::models::AchievementRecord;

/// Comparison strategy for the achievement list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortMode {
    /// Most recently unlocked first; records without a meaningful unlock
    /// time sort after all achieved records
    Recent,
    /// Rarest first (lowest rarity percentage); unknown rarity last
    Rare,
    /// Most common first (highest rarity percentage); unknown rarity last
    Common,
}

/// New ordered sequence; ties keep their input order
pub fn sort_achievements(records: &[AchievementRecord], mode: SortMode) -> Vec<AchievementRecord> {
    let mut out = records.to_vec();
    match mode {
        SortMode::Recent => out.sort_by(cmp_recent),
        SortMode::Rare => out.sort_by(|a, b| cmp_rarity(a, b, false)),
        SortMode::Common => out.sort_by(|a, b| cmp_rarity(a, b, true)),
    }
    out
}

fn cmp_recent(a: &AchievementRecord, b: &AchievementRecord) -> Ordering {
    match (a.recency_key(), b.recency_key()) {
        (Some(ta), Some(tb)) => tb.cmp(&ta),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn cmp_rarity(a: &AchievementRecord, b: &AchievementRecord, descending: bool) -> Ordering {
    match (a.rarity, b.rarity) {
        (Some(ra), Some(rb)) => {
            let cmp = ra.partial_cmp(&rb).unwrap_or(Ordering::Equal);
            if descending {
                cmp.reverse()
            } else {
                cmp
            }
        }
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
