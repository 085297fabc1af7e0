use std::collections::BTreeMap;

use serde::Serialize;
use shared::domain::{Platform, SessionId};

use crate::{Generator, RefineError, RefinementController, RefinementEntry, RefinementHistory};

/// Per-user editing state: one history per target platform.
///
/// Owned by whoever drives the UI and dropped when the session ends.
#[derive(Debug, Clone, Default, Serialize)]
pub struct EditingSession {
    id: SessionId,
    drafts: BTreeMap<Platform, RefinementHistory>,
}

impl EditingSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Starts a fresh history for `platform` from `content`, replacing any
    /// previous one.
    pub fn start(&mut self, platform: Platform, content: impl Into<String>) -> &RefinementHistory {
        self.insert(platform, RefinementHistory::with_original(content))
    }

    pub fn insert(&mut self, platform: Platform, history: RefinementHistory) -> &RefinementHistory {
        self.drafts.insert(platform, history);
        &self.drafts[&platform]
    }

    pub fn history(&self, platform: Platform) -> Option<&RefinementHistory> {
        self.drafts.get(&platform)
    }

    pub fn history_mut(&mut self, platform: Platform) -> Option<&mut RefinementHistory> {
        self.drafts.get_mut(&platform)
    }

    pub fn platforms(&self) -> impl Iterator<Item = Platform> + '_ {
        self.drafts.keys().copied()
    }

    pub fn discard(&mut self, platform: Platform) -> Option<RefinementHistory> {
        self.drafts.remove(&platform)
    }

    pub async fn refine<G: Generator>(
        &mut self,
        controller: &RefinementController<G>,
        platform: Platform,
        instruction: &str,
    ) -> Result<RefinementEntry, RefineError> {
        let history = self
            .drafts
            .get_mut(&platform)
            .ok_or(RefineError::EmptyHistory)?;
        controller.refine(history, instruction, platform).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_replaces_existing_history() {
        let mut session = EditingSession::new();
        session.start(Platform::Twitter, "first");
        session
            .history_mut(Platform::Twitter)
            .expect("history")
            .add("second", "edit");

        let history = session.start(Platform::Twitter, "fresh");

        assert_eq!(history.len(), 1);
        assert_eq!(history.current().expect("current").content, "fresh");
    }

    #[test]
    fn platforms_are_independent() {
        let mut session = EditingSession::new();
        session.start(Platform::Linkedin, "long form");
        session.start(Platform::Bluesky, "short");

        assert_eq!(
            session.platforms().collect::<Vec<_>>(),
            vec![Platform::Linkedin, Platform::Bluesky]
        );
        assert!(session.history(Platform::Threads).is_none());

        let removed = session.discard(Platform::Linkedin).expect("removed");
        assert_eq!(removed.entries()[0].content, "long form");
        assert!(session.history(Platform::Linkedin).is_none());
    }

    #[test]
    fn sessions_get_distinct_ids() {
        assert_ne!(EditingSession::new().id(), EditingSession::new().id());
    }
}
