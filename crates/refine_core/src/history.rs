use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One version of a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefinementEntry {
    pub content: String,
    /// Instruction that produced this version; empty for the initial entry.
    pub prompt: String,
    pub created_at: DateTime<Utc>,
}

impl RefinementEntry {
    pub fn is_initial(&self) -> bool {
        self.prompt.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HistoryError {
    #[error("history has no entry {index} (length {len})")]
    OutOfRange { index: usize, len: usize },
}

/// Linear, navigable log of versions for one piece of content.
///
/// Reverting only moves the cursor, so later versions stay reachable through
/// [`RefinementHistory::advance_to_next`]. The next [`RefinementHistory::add`]
/// after a revert drops those later versions before appending.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RefinementHistory {
    entries: Vec<RefinementEntry>,
    cursor: Option<usize>,
}

impl RefinementHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// History seeded with the original content as entry 0.
    pub fn with_original(content: impl Into<String>) -> Self {
        let mut history = Self::new();
        history.add(content, "");
        history
    }

    pub fn add(
        &mut self,
        content: impl Into<String>,
        prompt: impl Into<String>,
    ) -> &RefinementEntry {
        self.push_at(content.into(), prompt.into(), Utc::now())
    }

    pub(crate) fn push_at(
        &mut self,
        content: String,
        prompt: String,
        now: DateTime<Utc>,
    ) -> &RefinementEntry {
        if let Some(cursor) = self.cursor {
            self.entries.truncate(cursor + 1);
        }

        let created_at = match self.entries.last() {
            Some(previous) if previous.created_at > now => previous.created_at,
            _ => now,
        };

        self.entries.push(RefinementEntry {
            content,
            prompt,
            created_at,
        });
        let tail = self.entries.len() - 1;
        self.cursor = Some(tail);
        &self.entries[tail]
    }

    pub fn current(&self) -> Option<&RefinementEntry> {
        self.cursor.and_then(|cursor| self.entries.get(cursor))
    }

    /// Steps back one version. At the first version (or when empty) this is a
    /// no-op that returns the unchanged current entry.
    pub fn revert_to_previous(&mut self) -> Option<&RefinementEntry> {
        if let Some(cursor) = self.cursor {
            if cursor > 0 {
                self.cursor = Some(cursor - 1);
            }
        }
        self.current()
    }

    /// Steps forward to a version left behind by a revert. No-op at the tail.
    pub fn advance_to_next(&mut self) -> Option<&RefinementEntry> {
        if let Some(cursor) = self.cursor {
            if cursor + 1 < self.entries.len() {
                self.cursor = Some(cursor + 1);
            }
        }
        self.current()
    }

    pub fn revert_to(&mut self, index: usize) -> Result<&RefinementEntry, HistoryError> {
        if index >= self.entries.len() {
            return Err(HistoryError::OutOfRange {
                index,
                len: self.entries.len(),
            });
        }
        self.cursor = Some(index);
        Ok(&self.entries[index])
    }

    pub fn entries(&self) -> &[RefinementEntry] {
        &self.entries
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn can_revert(&self) -> bool {
        matches!(self.cursor, Some(cursor) if cursor > 0)
    }

    pub fn can_advance(&self) -> bool {
        matches!(self.cursor, Some(cursor) if cursor + 1 < self.entries.len())
    }
}

#[cfg(test)]
#[path = "tests/history_tests.rs"]
mod tests;
