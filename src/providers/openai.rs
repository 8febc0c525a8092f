use anyhow::{Context, Result, anyhow};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::Config;
use crate::model::{ChatCompletion, Message, TokenUsage};
use crate::providers::http_errors::{model_api_request_error, model_api_status_error};

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<TokenUsage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

fn chat_url(base_url: &str) -> String {
    format!("{}/chat/completions", base_url.trim_end_matches('/'))
}

fn to_openai_messages(messages: &[Message]) -> Vec<ChatMessage<'_>> {
    messages
        .iter()
        .map(|msg| ChatMessage {
            role: msg.role.as_str(),
            content: &msg.content,
        })
        .collect()
}

fn into_completion(parsed: ChatCompletionResponse) -> Result<ChatCompletion> {
    let choice = parsed
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| anyhow!("Model response contained no choices"))?;

    Ok(ChatCompletion {
        content: choice.message.content.unwrap_or_default(),
        usage: parsed.usage.unwrap_or_default(),
    })
}

pub async fn chat(client: &Client, cfg: &Config, messages: &[Message]) -> Result<ChatCompletion> {
    let api_url = chat_url(&cfg.model_base_url);
    let body = ChatCompletionRequest {
        model: &cfg.model,
        messages: to_openai_messages(messages),
    };
    debug!(
        api_url = %api_url,
        model = %cfg.model,
        message_count = messages.len(),
        "sending chat completion request"
    );

    let response = client
        .post(&api_url)
        .bearer_auth(cfg.api_key.expose())
        .json(&body)
        .send()
        .await
        .map_err(|err| {
            warn!(
                api_url = %api_url,
                model = %cfg.model,
                error = %err,
                "chat completion request failed"
            );
            model_api_request_error(err, &api_url, cfg.model_timeout_secs)
        })?;

    if !response.status().is_success() {
        let status = response.status();
        let response_body = response
            .text()
            .await
            .unwrap_or_else(|_| "<failed to read response body>".to_string());
        warn!(
            api_url = %api_url,
            model = %cfg.model,
            status = %status,
            response_body_len = response_body.len(),
            "completion service returned non-success status"
        );
        return Err(model_api_status_error(status, &response_body));
    }

    let parsed: ChatCompletionResponse = response
        .json()
        .await
        .context("Failed to parse chat completion response")?;
    let completion = into_completion(parsed)?;
    debug!(
        model = %cfg.model,
        response_len = completion.content.len(),
        total_tokens = completion.usage.total_tokens,
        "received chat completion response"
    );
    Ok(completion)
}
