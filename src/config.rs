#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

/// Credentials and tuning for the OpenAI-compatible classification endpoint,
/// sourced from the environment.
#[derive(Debug, Clone)]
pub struct ModelEnv {
    /// Base URL for the OpenAI-compatible API endpoint.
    api_base:    String,
    /// API key used to authenticate requests.
    api_key:     String,
    /// Model identifier for classification calls.
    model:       String,
    /// Optional temperature override, if provided.
    temperature: Option<f32>,
}

impl ModelEnv {
    /// Construct a `ModelEnv` from environment variables; returns `None` if
    /// any required field is missing.
    pub fn from_env() -> Option<Self> {
        let api_base = std::env::var("OPENAI_ENDPOINT").ok()?.trim().to_owned();
        let api_key = std::env::var("OPENAI_API_KEY").ok()?.trim().to_owned();
        let model = std::env::var("OPENAI_MODEL").ok()?.trim().to_owned();

        if api_base.is_empty() || api_key.is_empty() || model.is_empty() {
            return None;
        }

        let temperature = std::env::var("OPENAI_TEMPERATURE")
            .ok()
            .and_then(|s| s.parse::<f32>().ok());

        Some(Self {
            api_base,
            api_key,
            model,
            temperature,
        })
    }

    /// Returns the API base URL.
    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// Returns the API key.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Returns the classification model identifier.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Returns the optional temperature override.
    pub fn temperature(&self) -> Option<f32> {
        self.temperature
    }
}
