use anyhow::Result as AnyResult;
use async_trait::async_trait;
use crates::llm::gemini_client::GeminiClient;

/// The single outbound model call used by the generation pipelines.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LlmGateway: Send + Sync {
    async fn generate(
        &self,
        system_instruction: String,
        user_message: String,
        max_output_tokens: u32,
    ) -> AnyResult<String>;
}

#[async_trait]
impl LlmGateway for GeminiClient {
    async fn generate(
        &self,
        system_instruction: String,
        user_message: String,
        max_output_tokens: u32,
    ) -> AnyResult<String> {
        self.generate_text(&system_instruction, &user_message, max_output_tokens)
            .await
    }
}
