use chrono::{DateTime, Utc};
use uuid::{NoContext, Timestamp, Uuid};

pub mod entities;
pub mod services;

#[derive(Clone, Debug)]
pub struct IntellifoodConfig {
    pub llm: LLMConfig,
}

#[derive(Clone, Debug)]
pub struct LLMConfig {
    pub groq_api_key: String,
    pub groq_model: String,
    pub groq_base_url: String,
    pub temperature: f32,
}

#[derive(Clone, Debug)]
pub struct OcrConfig {
    pub language: String,
    pub tesseract_bin: String,
}

pub const DEFAULT_GROQ_MODEL: &str = "llama-3.3-70b-versatile";
pub const DEFAULT_GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_TEMPERATURE: f32 = 0.3;
pub const DEFAULT_OCR_LANGUAGE: &str = "eng";

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            language: DEFAULT_OCR_LANGUAGE.to_string(),
            tesseract_bin: "tesseract".to_string(),
        }
    }
}

pub fn generate_timestamp() -> (DateTime<Utc>, Timestamp) {
    let now = Utc::now();
    let seconds = now.timestamp().try_into().unwrap_or(0);
    let timestamp = Timestamp::from_unix(NoContext, seconds, 0);

    (now, timestamp)
}

pub fn generate_uuid_v7() -> Uuid {
    let (_, timestamp) = generate_timestamp();
    Uuid::new_v7(timestamp)
}
