#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use anyhow::{Context, Result};
use async_openai::{
    Client as OpenAIClient,
    config::OpenAIConfig,
    types::{CreateChatCompletionRequestArgs, ResponseFormat},
};

use super::{ClassificationResponse, prompt::ClassificationPrompt, validate::parse_response};
use crate::config::ModelEnv;

/// The async seam to the external classification model.
///
/// One call per problem; calls are independent and order-insensitive across
/// problems, so no batching or pooling happens here. The client does no
/// validation of its own; it hands the parsed response to
/// [`super::validate::validate_response`] untouched.
pub struct ClassifierClient {
    /// Configured OpenAI-compatible client.
    client:      OpenAIClient<OpenAIConfig>,
    /// Model identifier for classification calls.
    model:       String,
    /// Optional temperature override.
    temperature: Option<f32>,
}

impl ClassifierClient {
    /// Builds a client from an environment-sourced configuration.
    pub fn new(env: &ModelEnv) -> Self {
        let config = OpenAIConfig::new()
            .with_api_base(env.api_base())
            .with_api_key(env.api_key());

        Self {
            client:      OpenAIClient::with_config(config),
            model:       env.model().to_string(),
            temperature: env.temperature(),
        }
    }

    /// Builds a client directly from the environment; `None` when the
    /// required variables are unset.
    pub fn from_env() -> Option<Self> {
        ModelEnv::from_env().as_ref().map(Self::new)
    }

    /// Sends one problem with the assembled instruction payload and returns
    /// the parsed structured response.
    pub async fn classify(
        &self,
        prompt: &ClassificationPrompt,
        problem_text: &str,
    ) -> Result<ClassificationResponse> {
        let mut args = CreateChatCompletionRequestArgs::default();
        args.model(self.model.clone())
            .messages(prompt.messages(problem_text)?)
            .response_format(ResponseFormat::JsonObject);
        if let Some(temperature) = self.temperature {
            args.temperature(temperature);
        }
        let request = args.build()?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .context("Classification request to the model endpoint failed")?;

        if let Some(usage) = &response.usage {
            tracing::info!(
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                total_tokens = usage.total_tokens,
                "Classification model usage"
            );
        }

        let content = response
            .choices
            .first()
            .and_then(|c| c.message.content.clone())
            .context("Model returned no choices for classification request")?;

        Ok(parse_response(&content)?)
    }
}
