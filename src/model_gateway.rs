use anyhow::Result;
use reqwest::Client;
use std::future::Future;
use std::pin::Pin;
use tracing::debug;

use crate::config::Config;
use crate::model::{Message, TokenUsage};
use crate::providers::openai;

pub struct ModelGatewayRequest {
    pub messages: Vec<Message>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelGatewayResponse {
    pub content: String,
    pub usage: TokenUsage,
}

pub type ModelGatewayFuture<'a> = Pin<Box<dyn Future<Output = Result<ModelGatewayResponse>> + 'a>>;

/// The seam `Tutor` talks through, so turns can run without a network.
pub trait ModelGateway {
    fn chat<'a>(&'a self, request: ModelGatewayRequest) -> ModelGatewayFuture<'a>;
}

/// Sends requests to the configured completion service over a shared client.
pub struct HostModelGateway<'a> {
    client: &'a Client,
    cfg: &'a Config,
}

impl<'a> HostModelGateway<'a> {
    pub fn new(client: &'a Client, cfg: &'a Config) -> Self {
        Self { client, cfg }
    }
}

impl ModelGateway for HostModelGateway<'_> {
    fn chat<'b>(&'b self, request: ModelGatewayRequest) -> ModelGatewayFuture<'b> {
        Box::pin(async move {
            debug!(
                model = %self.cfg.model,
                message_count = request.messages.len(),
                "dispatching model chat request"
            );
            let completion = openai::chat(self.client, self.cfg, &request.messages).await?;
            Ok(ModelGatewayResponse {
                content: completion.content,
                usage: completion.usage,
            })
        })
    }
}
