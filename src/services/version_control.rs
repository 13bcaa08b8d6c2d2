use async_trait::async_trait;

use crate::error::AppResult;

/// Raw git queries. Each method maps to one git invocation and returns its
/// standard output untouched.
#[async_trait]
pub trait VersionControlService: Send + Sync {
    async fn is_repository(&self) -> AppResult<bool>;
    async fn staged_diff(&self) -> AppResult<String>;
    async fn unstaged_diff(&self) -> AppResult<String>;
    async fn untracked_files(&self) -> AppResult<Vec<String>>;
    async fn status(&self) -> AppResult<String>;
}
