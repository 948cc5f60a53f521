//! Configuration for OpenAI-compatible providers.

/// Settings for one OpenAI-compatible endpoint.
///
/// Does NOT derive Debug so the API key is never printed.
pub struct OpenAiCompatConfig {
    pub provider_name: String,
    pub base_url: String,
    pub api_key: String,
    pub model: String,
}

pub const GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

pub fn groq_defaults(api_key: &str, model: &str) -> OpenAiCompatConfig {
    OpenAiCompatConfig {
        provider_name: "groq".to_string(),
        base_url: GROQ_BASE_URL.to_string(),
        api_key: api_key.to_string(),
        model: model.to_string(),
    }
}

pub fn openai_defaults(api_key: &str, model: &str) -> OpenAiCompatConfig {
    OpenAiCompatConfig {
        provider_name: "openai".to_string(),
        base_url: OPENAI_BASE_URL.to_string(),
        api_key: api_key.to_string(),
        model: model.to_string(),
    }
}

/// Base URL for a well-known provider name; unknown names fall back to Groq.
pub fn base_url_for(provider_name: &str) -> &'static str {
    match provider_name {
        "openai" => OPENAI_BASE_URL,
        _ => GROQ_BASE_URL,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_groq_defaults() {
        let config = groq_defaults("gsk-test", "llama");
        assert_eq!(config.provider_name, "groq");
        assert_eq!(config.base_url, GROQ_BASE_URL);
        assert_eq!(config.model, "llama");
    }

    #[test]
    fn test_base_url_for_unknown_falls_back_to_groq() {
        assert_eq!(base_url_for("openai"), OPENAI_BASE_URL);
        assert_eq!(base_url_for("something-else"), GROQ_BASE_URL);
    }
}
