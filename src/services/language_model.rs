use async_trait::async_trait;

use crate::domain::commit::CommitMessage;
use crate::error::AppResult;

#[async_trait]
pub trait LanguageModelService: Send + Sync {
    async fn complete_commit_message(&self, prompt: &str) -> AppResult<CommitMessage>;
}
