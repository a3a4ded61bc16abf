//! Pure partitioning of achievement records

use crate::models::AchievementRecord;

/// Records matching the completed/incomplete toggle, in input order
pub fn filter_by_completion(
    records: &[AchievementRecord],
    want_completed: bool,
) -> Vec<AchievementRecord> {
    records
        .iter()
        .filter(|r| r.achieved == want_completed)
        .cloned()
        .collect()
}

/// (completed, total) over the full record set, independent of any toggle
pub fn completion_counts(records: &[AchievementRecord]) -> (usize, usize) {
    let completed = records.iter().filter(|r| r.achieved).count();
    (completed, records.len())
}
