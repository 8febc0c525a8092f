use anyhow::Result;
use tracing::{debug, info};

use crate::mode::Mode;
use crate::model::TokenUsage;
use crate::model_gateway::{ModelGateway, ModelGatewayRequest};
use crate::prompt::build_turn_messages;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TutorReply {
    pub mode: Mode,
    pub answer: String,
    pub usage: TokenUsage,
}

/// Each `ask` is an independent round-trip; nothing is remembered between turns.
pub struct Tutor<G> {
    gateway: G,
}

impl<G> Tutor<G>
where
    G: ModelGateway,
{
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    pub async fn ask(&self, user_input: &str) -> Result<TutorReply> {
        let (mode, messages) = build_turn_messages(user_input);
        debug!(
            mode = %mode,
            input_len = user_input.len(),
            "selected tutoring mode"
        );

        let response = self
            .gateway
            .chat(ModelGatewayRequest {
                messages: messages.into(),
            })
            .await?;
        info!(
            mode = %mode,
            prompt_tokens = response.usage.prompt_tokens,
            completion_tokens = response.usage.completion_tokens,
            total_tokens = response.usage.total_tokens,
            "tutor turn completed"
        );

        Ok(TutorReply {
            mode,
            answer: response.content,
            usage: response.usage,
        })
    }
}
