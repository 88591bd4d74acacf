//! Transient view over the external ranking table.
//!
//! A snapshot is replaced wholesale on every refresh and never persisted;
//! only the last announced position of each player survives in the
//! repository.

/// One row of the external ranking table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankingEntry {
    /// 1-based position, lower is better.
    pub position: u32,
    pub display_name: String,
}

/// A full ranking table, ordered by ascending position.
#[derive(Debug, Clone, Default)]
pub struct RankingSnapshot {
    entries: Vec<RankingEntry>,
}

impl RankingSnapshot {
    /// Build a snapshot from unordered rows.
    pub fn from_entries(mut entries: Vec<RankingEntry>) -> Self {
        entries.sort_by_key(|e| e.position);
        Self { entries }
    }

    pub fn entries(&self) -> &[RankingEntry] {
        &self.entries
    }

    pub fn entry_for(&self, display_name: &str) -> Option<&RankingEntry> {
        self.entries.iter().find(|e| e.display_name == display_name)
    }

    /// Entry sitting at the given position, if the table reaches that far.
    pub fn entry_at(&self, position: u32) -> Option<&RankingEntry> {
        if position == 0 {
            return None;
        }
        self.entries.iter().find(|e| e.position == position)
    }
}
