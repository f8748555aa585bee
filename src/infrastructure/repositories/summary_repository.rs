use async_openai::{
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestMessage, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use std::sync::Arc;

/// Text-generation provider used for article summaries
#[async_trait]
pub trait SummaryRepository: Send + Sync {
    /// Run a single-turn completion for `prompt` and return the generated text
    async fn summarize(&self, prompt: &str) -> Result<String, String>;
}

/// Chat-completions implementation for OpenAI-compatible APIs
pub struct OpenAiSummaryRepository {
    client: Arc<Client<OpenAIConfig>>,
    model: String,
    max_tokens: u32,
}

impl OpenAiSummaryRepository {
    pub fn new(client: Arc<Client<OpenAIConfig>>, model: String, max_tokens: u32) -> Self {
        Self {
            client,
            model,
            max_tokens,
        }
    }
}

#[async_trait]
impl SummaryRepository for OpenAiSummaryRepository {
    async fn summarize(&self, prompt: &str) -> Result<String, String> {
        let message = ChatCompletionRequestUserMessageArgs::default()
            .content(prompt.to_string())
            .build()
            .map_err(|e| format!("Failed to build chat message: {}", e))?;
        let messages: Vec<ChatCompletionRequestMessage> = vec![message.into()];

        let request = CreateChatCompletionRequestArgs::default()
            .model(self.model.as_str())
            .max_tokens(self.max_tokens)
            .messages(messages)
            .build()
            .map_err(|e| format!("Failed to build chat request: {}", e))?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| format!("OpenAI chat completion failed: {}", e))?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|text| !text.trim().is_empty())
            .ok_or_else(|| "OpenAI returned an empty completion".to_string())
    }
}
