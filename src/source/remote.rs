//! Chat-completions client for the remote metric source.

use super::{parse_analysis_content, MetricSource, SourceOutput, SourceRequest};
use crate::config::RemoteConfig;
use crate::error::{ArchScaleError, Result, SourceErrorKind};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Helper to convert reqwest errors to source errors
fn network_error(msg: &str, err: reqwest::Error) -> ArchScaleError {
    ArchScaleError::source(msg, SourceErrorKind::NetworkError(err.to_string()))
}

/// Helper to create API errors
fn api_error(msg: impl Into<String>) -> ArchScaleError {
    ArchScaleError::source("API request", SourceErrorKind::ApiError(msg.into()))
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f32,
    response_format: ResponseFormat,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    content: Option<String>,
}

const SYSTEM_PROMPT: &str = "You are a software architecture performance analyst. \
Reply with a single JSON object and nothing else.";

/// Metric source backed by an OpenAI-compatible chat-completions API.
///
/// Makes exactly one request per fetch. Wrap it in a
/// [`FallbackSource`](super::FallbackSource) to survive failures.
pub struct RemoteSource {
    client: Client,
    endpoint: String,
    model: String,
    api_key_env: String,
    api_key: Option<String>,
}

impl RemoteSource {
    /// Create a client from configuration.
    ///
    /// The API key is looked up once, from the environment variable named
    /// in `config`. A missing key is not an error until the first fetch.
    pub fn new(config: &RemoteConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .map_err(|e| network_error("Failed to create HTTP client", e))?;

        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty());

        Ok(Self {
            client,
            endpoint: format!(
                "{}/chat/completions",
                config.api_base.trim_end_matches('/')
            ),
            model: config.model.clone(),
            api_key_env: config.api_key_env.clone(),
            api_key,
        })
    }

    fn prompt(request: &SourceRequest<'_>) -> String {
        let patterns = request
            .patterns
            .iter()
            .map(|p| format!("- {} ({})", p.id, p.name))
            .collect::<Vec<_>>()
            .join("\n");
        format!(
            "Estimate how the application at {url} would perform under a {context} \
             workload with each of these architecture patterns:\n{patterns}\n\n\
             Respond with an object of the form \
             {{\"bestPatternId\": string, \"reasoning\": string, \
             \"patterns\": {{<pattern id>: {{\"throughput\": number, \"latency\": number, \
             \"availability\": number, \"resourceUtilization\": number, \
             \"faultTolerance\": number, \"elasticity\": number, \
             \"costEfficiency\": number, \"dataConsistency\": number}}}}}}. \
             Throughput is requests per second, latency milliseconds, availability and \
             resourceUtilization percentages, the remaining four are scores from 1 to 10. \
             bestPatternId must be one of the ids listed above.",
            url = request.url,
            context = request.context,
        )
    }

    fn send(&self, api_key: &str, body: &ChatRequest<'_>) -> Result<String> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(body)
            .send()
            .map_err(|e| network_error("Failed to send analysis request", e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(api_error(format!(
                "API returned error status {}: {}",
                status.as_u16(),
                body
            )));
        }

        let chat: ChatResponse = response.json().map_err(|e| {
            ArchScaleError::source(
                "parsing response",
                SourceErrorKind::InvalidResponse(e.to_string()),
            )
        })?;

        chat.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                ArchScaleError::source(
                    "parsing response",
                    SourceErrorKind::InvalidResponse("reply has no content".to_string()),
                )
            })
    }
}

impl MetricSource for RemoteSource {
    fn name(&self) -> &'static str {
        "remote"
    }

    fn fetch(&self, request: &SourceRequest<'_>) -> Result<SourceOutput> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            ArchScaleError::source(
                "remote analysis",
                SourceErrorKind::MissingCredential(self.api_key_env.clone()),
            )
        })?;

        let body = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: Self::prompt(request),
                },
            ],
            temperature: 0.2,
            response_format: ResponseFormat {
                kind: "json_object",
            },
        };

        tracing::info!(endpoint = %self.endpoint, model = %self.model, "Requesting remote analysis");
        let content = self.send(api_key, &body)?;
        parse_analysis_content(&content)?.into_output(request.patterns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PatternCatalog;
    use crate::scoring::TestContext;

    #[test]
    fn test_missing_key_fails_on_fetch() {
        let config = RemoteConfig {
            api_key_env: "ARCHSCALE_TEST_KEY_THAT_IS_NEVER_SET".to_string(),
            ..RemoteConfig::default()
        };
        let source = RemoteSource::new(&config).unwrap();
        let patterns: Vec<_> = PatternCatalog::builtin().iter().cloned().collect();
        let request = SourceRequest {
            url: "https://example.com",
            context: &TestContext::Api,
            patterns: &patterns,
        };
        match source.fetch(&request) {
            Err(ArchScaleError::Source {
                source: SourceErrorKind::MissingCredential(var),
                ..
            }) => assert_eq!(var, "ARCHSCALE_TEST_KEY_THAT_IS_NEVER_SET"),
            other => panic!("Expected MissingCredential, got {other:?}"),
        }
    }

    #[test]
    fn test_endpoint_joins_base() {
        let config = RemoteConfig {
            api_base: "http://localhost:8080/v1/".to_string(),
            ..RemoteConfig::default()
        };
        let source = RemoteSource::new(&config).unwrap();
        assert_eq!(source.endpoint, "http://localhost:8080/v1/chat/completions");
    }

    #[test]
    fn test_prompt_lists_patterns() {
        let patterns = vec![PatternCatalog::builtin().get("p2p").unwrap().clone()];
        let request = SourceRequest {
            url: "https://shop.example",
            context: &TestContext::Database,
            patterns: &patterns,
        };
        let prompt = RemoteSource::prompt(&request);
        assert!(prompt.contains("p2p (Peer-to-Peer Architecture)"));
        assert!(prompt.contains("database workload"));
    }
}
