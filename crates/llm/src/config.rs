/// Provider account configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Bearer credential. `None` puts the gateway in mock mode.
    pub api_key: Option<String>,
    /// Base URL of the OpenAI-compatible API, without a trailing slash.
    pub base_url: String,
    /// Model used when a request does not name one.
    pub model: String,
    /// Token limit used when a request does not set one.
    pub max_tokens: u32,
    pub temperature: f32,
}

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4";
pub const DEFAULT_MAX_TOKENS: u32 = 512;
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

impl LlmConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var              | Default                      |
    /// |----------------------|------------------------------|
    /// | `OPENAI_API_KEY`     | unset (mock mode)            |
    /// | `OPENAI_BASE_URL`    | `https://api.openai.com/v1`  |
    /// | `OPENAI_MODEL`       | `gpt-4`                      |
    /// | `OPENAI_MAX_TOKENS`  | `512`                        |
    /// | `OPENAI_TEMPERATURE` | `0.7`                        |
    ///
    /// A blank `OPENAI_API_KEY` counts as unset.
    pub fn from_env() -> Self {
        let api_key = std::env::var("OPENAI_API_KEY")
            .ok()
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty());

        let base_url = std::env::var("OPENAI_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.into())
            .trim_end_matches('/')
            .to_string();

        let model = std::env::var("OPENAI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.into());

        let max_tokens: u32 = std::env::var("OPENAI_MAX_TOKENS")
            .unwrap_or_else(|_| DEFAULT_MAX_TOKENS.to_string())
            .parse()
            .expect("OPENAI_MAX_TOKENS must be a valid u32");

        let temperature: f32 = std::env::var("OPENAI_TEMPERATURE")
            .unwrap_or_else(|_| DEFAULT_TEMPERATURE.to_string())
            .parse()
            .expect("OPENAI_TEMPERATURE must be a valid number");

        Self {
            api_key,
            base_url,
            model,
            max_tokens,
            temperature,
        }
    }

    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }
}
