use async_trait::async_trait;
use shared::{
    domain::{ContentType, Platform},
    error::GenerationError,
};
use tracing::{debug, info, warn};

pub mod error;
pub mod history;
pub mod prompt;
pub mod session;

pub use error::RefineError;
pub use history::{HistoryError, RefinementEntry, RefinementHistory};
pub use prompt::PromptPair;
pub use session::EditingSession;

/// External text generation. Implementations make one attempt per call.
#[async_trait]
pub trait Generator: Send + Sync {
    async fn generate(
        &self,
        system_instruction: &str,
        user_instruction: &str,
    ) -> Result<String, GenerationError>;
}

#[async_trait]
impl<G> Generator for std::sync::Arc<G>
where
    G: Generator + ?Sized,
{
    async fn generate(
        &self,
        system_instruction: &str,
        user_instruction: &str,
    ) -> Result<String, GenerationError> {
        (**self).generate(system_instruction, user_instruction).await
    }
}

/// Drives refinement round-trips against a [`Generator`].
///
/// Holds no session state; every call works on the history handed in by the
/// caller. A failed generation leaves that history untouched and is never
/// retried here.
pub struct RefinementController<G> {
    generator: G,
}

impl<G: Generator> RefinementController<G> {
    pub fn new(generator: G) -> Self {
        Self { generator }
    }

    pub async fn refine(
        &self,
        history: &mut RefinementHistory,
        instruction: &str,
        platform: Platform,
    ) -> Result<RefinementEntry, RefineError> {
        if instruction.trim().is_empty() {
            return Err(RefineError::EmptyInstruction);
        }
        let current = history.current().ok_or(RefineError::EmptyHistory)?;

        let prompt = prompt::refinement_prompt(&current.content, instruction, platform);
        debug!(
            %platform,
            cursor = ?history.cursor(),
            instruction_len = instruction.len(),
            "requesting refinement"
        );

        let refined = self
            .generator
            .generate(&prompt.system, &prompt.user)
            .await
            .map_err(|err| {
                warn!(%platform, error = %err, "refinement failed; history unchanged");
                RefineError::from(err)
            })?;

        let entry = history.add(refined, instruction).clone();
        info!(
            %platform,
            version = history.len(),
            chars = entry.content.chars().count(),
            "refinement recorded"
        );
        Ok(entry)
    }

    /// Generates a first version and returns a history seeded with it.
    pub async fn draft(
        &self,
        topic: &str,
        content_type: &ContentType,
        platform: Platform,
    ) -> Result<RefinementHistory, RefineError> {
        if topic.trim().is_empty() {
            return Err(RefineError::EmptyTopic);
        }

        let prompt = prompt::draft_prompt(topic, content_type, platform);
        debug!(%platform, %content_type, "requesting draft");

        let content = self
            .generator
            .generate(&prompt.system, &prompt.user)
            .await
            .map_err(|err| {
                warn!(%platform, error = %err, "draft generation failed");
                RefineError::from(err)
            })?;

        info!(%platform, chars = content.chars().count(), "draft generated");
        Ok(RefinementHistory::with_original(content))
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
