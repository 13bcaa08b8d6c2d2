use std::env;
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};

pub const API_KEY_VARIABLE: &str = "GOOGLE_AI_TOKEN";
pub const MODEL_VARIABLE: &str = "GENIE_MODEL";
pub const API_URL_VARIABLE: &str = "GENIE_API_URL";
pub const LOG_VARIABLE: &str = "GENIE_LOG";

pub const DEFAULT_MODEL: &str = "gemini-1.5-flash-latest";
pub const DEFAULT_API_URL: &str = "https://generativelanguage.googleapis.com";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_api_url: String,
    pub workspace_root: PathBuf,
}

impl AppConfig {
    pub fn load(workspace_hint: &Path) -> Self {
        Self::from_lookup(workspace_hint, |name| env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable source. Blank
    /// values count as unset.
    pub fn from_lookup<F>(workspace_hint: &Path, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        Self {
            gemini_api_key: read(API_KEY_VARIABLE),
            gemini_model: read(MODEL_VARIABLE).unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            gemini_api_url: read(API_URL_VARIABLE)
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            workspace_root: workspace_hint.to_path_buf(),
        }
    }

    pub fn require_api_key(&self) -> AppResult<&str> {
        self.gemini_api_key
            .as_deref()
            .ok_or(AppError::MissingApiKey {
                variable: API_KEY_VARIABLE,
            })
    }
}
