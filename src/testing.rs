//! In-memory service fakes shared by workflow and command tests.

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::config::{API_KEY_VARIABLE, AppConfig};
use crate::context::AppContext;
use crate::domain::commit::CommitMessage;
use crate::error::{AppError, AppResult};
use crate::services::{ClipboardService, LanguageModelService, VersionControlService};

#[derive(Default)]
pub struct FakeGit {
    pub not_a_repository: bool,
    pub git_missing: bool,
    pub staged: String,
    pub unstaged: String,
    pub untracked: Vec<String>,
    pub status: String,
    pub fail_diffs: bool,
    pub calls: Mutex<Vec<&'static str>>,
}

impl FakeGit {
    fn record(&self, call: &'static str) {
        self.calls.lock().unwrap().push(call);
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    fn diff(&self, call: &'static str, text: &str) -> AppResult<String> {
        self.record(call);
        if self.fail_diffs {
            return Err(AppError::VersionControl(format!("{call} failed")));
        }
        Ok(text.to_string())
    }
}

#[async_trait]
impl VersionControlService for FakeGit {
    async fn is_repository(&self) -> AppResult<bool> {
        self.record("rev-parse");
        if self.git_missing {
            return Err(AppError::VersionControl(
                "failed to run git rev-parse --git-dir: No such file or directory".to_string(),
            ));
        }
        Ok(!self.not_a_repository)
    }

    async fn staged_diff(&self) -> AppResult<String> {
        self.diff("diff --cached", &self.staged)
    }

    async fn unstaged_diff(&self) -> AppResult<String> {
        self.diff("diff", &self.unstaged)
    }

    async fn untracked_files(&self) -> AppResult<Vec<String>> {
        self.record("ls-files");
        Ok(self.untracked.clone())
    }

    async fn status(&self) -> AppResult<String> {
        self.record("status");
        Ok(self.status.clone())
    }
}

pub struct FakeModel {
    pub reply: String,
    pub calls: AtomicUsize,
    pub prompts: Mutex<Vec<String>>,
}

impl FakeModel {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.prompts.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl LanguageModelService for FakeModel {
    async fn complete_commit_message(&self, prompt: &str) -> AppResult<CommitMessage> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok(CommitMessage::from_completion(&self.reply))
    }
}

#[derive(Default)]
pub struct FakeClipboard {
    pub fail: bool,
    pub copied: Mutex<Vec<String>>,
}

#[async_trait]
impl ClipboardService for FakeClipboard {
    async fn copy(&self, text: &str) -> AppResult<()> {
        if self.fail {
            return Err(AppError::Clipboard(
                "no clipboard utility found (install xclip, xsel, or wl-copy)".to_string(),
            ));
        }
        self.copied.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

pub fn config(api_key: Option<&str>) -> AppConfig {
    AppConfig::from_lookup(Path::new("/repo"), |name| {
        (name == API_KEY_VARIABLE)
            .then(|| api_key.map(str::to_string))
            .flatten()
    })
}

pub fn context(
    api_key: Option<&str>,
    git: Arc<FakeGit>,
    model: Arc<FakeModel>,
    clipboard: Arc<FakeClipboard>,
) -> AppContext {
    AppContext::new(config(api_key), git, model, clipboard)
}
