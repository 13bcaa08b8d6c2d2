use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::API_KEY_VARIABLE;
use crate::domain::commit::CommitMessage;
use crate::error::{AppError, AppResult};
use crate::services::LanguageModelService;

pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct GeminiClient {
    http: Client,
    api_key: Option<String>,
    model: String,
    base_url: String,
    timeout: Duration,
}

impl GeminiClient {
    pub fn new(api_key: Option<String>, model: String, base_url: String) -> AppResult<Self> {
        Self::with_timeout(api_key, model, base_url, REQUEST_TIMEOUT)
    }

    pub fn with_timeout(
        api_key: Option<String>,
        model: String,
        base_url: String,
        timeout: Duration,
    ) -> AppResult<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| AppError::Configuration(format!("failed to build HTTP client: {err}")))?;
        Ok(Self {
            http,
            api_key,
            model,
            base_url,
            timeout,
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

#[async_trait]
impl LanguageModelService for GeminiClient {
    async fn complete_commit_message(&self, prompt: &str) -> AppResult<CommitMessage> {
        let api_key = self.api_key.as_deref().ok_or(AppError::MissingApiKey {
            variable: API_KEY_VARIABLE,
        })?;

        debug!(model = %self.model, prompt_len = prompt.len(), "requesting completion");
        let response = self
            .http
            .post(self.endpoint())
            .query(&[("key", api_key)])
            .header(CONTENT_TYPE, "application/json")
            .json(&GenerateContentRequest::new(prompt))
            .send()
            .await
            .map_err(|err| {
                if err.is_timeout() {
                    AppError::Network(format!("request timed out after {:?}", self.timeout))
                } else {
                    AppError::Network(format!("failed to call Gemini: {err}"))
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| AppError::Network(format!("failed to read Gemini response: {err}")))?;
        debug!(%status, body_len = body.len(), "received completion response");

        let payload = match serde_json::from_str::<GenerateContentResponse>(&body) {
            Ok(payload) => payload,
            Err(_) if !status.is_success() => {
                return Err(AppError::Network(format!(
                    "Gemini responded with {status}: {body}"
                )));
            }
            Err(err) => {
                return Err(AppError::InvalidResponse(format!(
                    "failed to parse Gemini response: {err}"
                )));
            }
        };

        if payload.error.is_none() && !status.is_success() {
            return Err(AppError::Network(format!(
                "Gemini responded with {status}: {body}"
            )));
        }

        payload.into_commit_message()
    }
}

#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

impl<'a> GenerateContentRequest<'a> {
    fn new(prompt: &'a str) -> Self {
        Self {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
        }
    }
}

#[derive(Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    error: Option<ErrorInfo>,
}

impl GenerateContentResponse {
    /// An error object wins over any candidates that came with it.
    fn into_commit_message(self) -> AppResult<CommitMessage> {
        if let Some(error) = self.error {
            return Err(AppError::Api {
                code: error.code,
                message: error.message,
            });
        }

        let candidate = self
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| AppError::EmptyResponse("no response from Gemini API".to_string()))?;
        let part = candidate
            .content
            .parts
            .into_iter()
            .next()
            .ok_or_else(|| AppError::EmptyResponse("empty response from Gemini API".to_string()))?;

        let message = CommitMessage::from_completion(&part.text);
        if message.is_empty() {
            return Err(AppError::EmptyResponse(
                "Gemini returned a blank commit message".to_string(),
            ));
        }
        Ok(message)
    }
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: CandidateContent,
}

#[derive(Debug, Default, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct ErrorInfo {
    #[serde(default)]
    code: i64,
    #[serde(default)]
    message: String,
}

#[cfg(test)]
mod tests {
    use std::net::TcpListener;

    use serde_json::json;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    const ENDPOINT_PATH: &str = "/v1beta/models/test-model:generateContent";

    fn parse(value: serde_json::Value) -> AppResult<CommitMessage> {
        serde_json::from_value::<GenerateContentResponse>(value)
            .unwrap()
            .into_commit_message()
    }

    fn client_for(server: &MockServer) -> GeminiClient {
        GeminiClient::new(
            Some("test-key".to_string()),
            "test-model".to_string(),
            server.uri(),
        )
        .unwrap()
    }

    #[test]
    fn extracts_first_candidate_text() {
        let message = parse(json!({
            "candidates": [
                {"content": {"parts": [{"text": "  \"✨ feat(cli): add context flag\"\n"}, {"text": "ignored"}]}},
                {"content": {"parts": [{"text": "second candidate"}]}}
            ]
        }))
        .unwrap();
        assert_eq!(message.as_str(), "✨ feat(cli): add context flag");
    }

    #[test]
    fn error_object_takes_precedence() {
        let err = parse(json!({
            "candidates": [{"content": {"parts": [{"text": "fix: something"}]}}],
            "error": {"code": 400, "message": "API key not valid"}
        }))
        .unwrap_err();
        match err {
            AppError::Api { code, message } => {
                assert_eq!(code, 400);
                assert_eq!(message, "API key not valid");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn empty_candidates_is_empty_response() {
        let err = parse(json!({"candidates": []})).unwrap_err();
        assert!(matches!(err, AppError::EmptyResponse(_)));

        let err = parse(json!({})).unwrap_err();
        assert!(matches!(err, AppError::EmptyResponse(_)));
    }

    #[test]
    fn empty_parts_is_empty_response() {
        let err = parse(json!({"candidates": [{"content": {"parts": []}}]})).unwrap_err();
        assert!(matches!(err, AppError::EmptyResponse(_)));
    }

    #[tokio::test]
    async fn posts_prompt_with_key_in_query() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(ENDPOINT_PATH))
            .and(query_param("key", "test-key"))
            .and(body_json(json!({
                "contents": [{"parts": [{"text": "describe these changes"}]}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{"content": {"parts": [{"text": "'🐛 fix(api): handle null ids'"}]}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let message = client_for(&server)
            .complete_commit_message("describe these changes")
            .await
            .unwrap();
        assert_eq!(message.as_str(), "🐛 fix(api): handle null ids");
    }

    #[tokio::test]
    async fn surfaces_provider_error_on_failure_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(ENDPOINT_PATH))
            .respond_with(ResponseTemplate::new(403).set_body_json(json!({
                "error": {"code": 403, "message": "Permission denied"}
            })))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .complete_commit_message("prompt")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "API error: Permission denied");
    }

    #[tokio::test]
    async fn reports_status_for_non_json_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(ENDPOINT_PATH))
            .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .complete_commit_message("prompt")
            .await
            .unwrap_err();
        match err {
            AppError::Network(message) => assert!(message.contains("502")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn connection_failure_is_network_error() {
        let port = {
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let client = GeminiClient::new(
            Some("test-key".to_string()),
            "test-model".to_string(),
            format!("http://127.0.0.1:{port}"),
        )
        .unwrap();

        let err = client.complete_commit_message("prompt").await.unwrap_err();
        assert!(matches!(err, AppError::Network(_)), "unexpected error: {err:?}");
    }

    #[tokio::test]
    async fn slow_response_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(ENDPOINT_PATH))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_delay(Duration::from_secs(2))
                    .set_body_json(json!({
                        "candidates": [{"content": {"parts": [{"text": "feat: late"}]}}]
                    })),
            )
            .mount(&server)
            .await;

        let client = GeminiClient::with_timeout(
            Some("test-key".to_string()),
            "test-model".to_string(),
            server.uri(),
            Duration::from_millis(100),
        )
        .unwrap();

        let err = client.complete_commit_message("prompt").await.unwrap_err();
        match err {
            AppError::Network(message) => assert!(message.contains("request timed out")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_key_sends_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let client = GeminiClient::new(None, "test-model".to_string(), server.uri()).unwrap();
        let err = client.complete_commit_message("prompt").await.unwrap_err();
        assert!(matches!(err, AppError::MissingApiKey { .. }));
    }
}
