//! Anthropic Messages API client
//!
//! A blocking client: each command makes at most one call, so there is no
//! runtime to share and nothing to stream.

use std::time::Duration;

use reqwest::blocking::{Client, Response};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::config::AiSettings;

use super::error::{AiError, ApiErrorResponse};
use super::prompts::{category_prompt, parse_category_list, summary_prompt};
use super::Assistant;

const ANTHROPIC_VERSION: &str = "2023-06-01";

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<RequestMessage>,
}

#[derive(Debug, Serialize)]
struct RequestMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

pub struct AnthropicAssistant {
    client: Client,
    api_url: String,
    model: String,
    max_tokens: u32,
}

impl AnthropicAssistant {
    pub fn new(settings: &AiSettings, api_key: &str) -> Result<Self, AiError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            "x-api-key",
            HeaderValue::from_str(api_key)
                .map_err(|_| AiError::Config("API key contains invalid characters".into()))?,
        );
        headers.insert("anthropic-version", HeaderValue::from_static(ANTHROPIC_VERSION));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            api_url: settings.api_url.clone(),
            model: settings.model.clone(),
            max_tokens: settings.max_tokens,
        })
    }

    /// Send one user message and return the concatenated text of the reply
    #[instrument(skip(self, prompt), fields(model = %self.model))]
    fn complete(&self, prompt: String) -> Result<String, AiError> {
        let request = MessagesRequest {
            model: &self.model,
            max_tokens: self.max_tokens,
            messages: vec![RequestMessage {
                role: "user",
                content: prompt,
            }],
        };

        let response = self.client.post(&self.api_url).json(&request).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(error_from_status(status, response));
        }

        let body: MessagesResponse = response
            .json()
            .map_err(|e| AiError::Parse(format!("Failed to parse response: {}", e)))?;
        let text: String = body
            .content
            .into_iter()
            .filter(|block| block.kind == "text")
            .filter_map(|block| block.text)
            .collect();

        debug!(chars = text.len(), "assistant replied");
        Ok(text)
    }
}

fn error_from_status(status: StatusCode, response: Response) -> AiError {
    if status == StatusCode::UNAUTHORIZED {
        return AiError::Unauthorized("Invalid API key".into());
    }
    match response.text() {
        Ok(body) => match serde_json::from_str::<ApiErrorResponse>(&body) {
            Ok(api_error) => AiError::Api {
                error_type: api_error.error.error_type,
                message: api_error.error.message,
            },
            Err(_) => AiError::Api {
                error_type: status.to_string(),
                message: body,
            },
        },
        Err(e) => AiError::Http(e),
    }
}

impl Assistant for AnthropicAssistant {
    fn summarize(&self, report_data: &str) -> Result<String, AiError> {
        let summary = self.complete(summary_prompt(report_data))?;
        if summary.trim().is_empty() {
            return Err(AiError::Parse("empty summary".into()));
        }
        Ok(summary.trim().to_string())
    }

    fn suggest_categories(&self, description: &str, vendor: &str) -> Result<Vec<String>, AiError> {
        let reply = self.complete(category_prompt(description, vendor))?;
        Ok(parse_category_list(&reply))
    }
}
