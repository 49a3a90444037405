use std::path::PathBuf;

use clap::{ArgAction, Args as ClapArgs, Parser, Subcommand};
use intellifood_core::{
    domain::common::{
        DEFAULT_GROQ_BASE_URL, DEFAULT_GROQ_MODEL, DEFAULT_OCR_LANGUAGE, DEFAULT_TEMPERATURE,
        IntellifoodConfig, LLMConfig, OcrConfig,
    },
    infrastructure::relay::http_gateway::DEFAULT_BACKEND_URL,
};
use url::Url;

#[derive(Debug, Clone, Parser)]
#[command(name = "intellifood", version, about = "Ingredient analysis relay and client")]
pub struct Args {
    #[command(flatten)]
    pub log: LogArgs,

    #[command(flatten)]
    pub server: ServerArgs,

    #[command(flatten)]
    pub llm: LlmArgs,

    #[command(flatten)]
    pub ocr: OcrArgs,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Run the relay endpoint and serve the front end (default)
    Serve,
    /// Analyze an ingredient list through a running relay
    Analyze(AnalyzeArgs),
}

#[derive(Debug, Clone, ClapArgs)]
pub struct LogArgs {
    #[arg(long = "log-filter", env = "LOG_FILTER", default_value = "info")]
    pub filter: String,

    #[arg(long = "log-json", env = "LOG_JSON", default_value_t = false)]
    pub json: bool,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct ServerArgs {
    #[arg(long = "host", env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long = "port", env = "PORT", default_value_t = 3000)]
    pub port: u16,

    #[arg(long = "root-path", env = "SERVER_ROOT_PATH", default_value = "")]
    pub root_path: String,

    #[arg(
        long = "allowed-origins",
        env = "ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_value = "*"
    )]
    pub allowed_origins: Vec<String>,

    #[arg(long = "static-dir", env = "STATIC_DIR", default_value = "docs")]
    pub static_dir: PathBuf,

    #[arg(
        long = "metrics-enabled",
        env = "METRICS_ENABLED",
        default_value_t = true,
        action = ArgAction::Set
    )]
    pub metrics_enabled: bool,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct LlmArgs {
    #[arg(long = "groq-api-key", env = "GROQ_API_KEY", hide_env_values = true)]
    pub groq_api_key: Option<String>,

    #[arg(long = "groq-model", env = "GROQ_MODEL", default_value = DEFAULT_GROQ_MODEL)]
    pub groq_model: String,

    #[arg(long = "groq-base-url", env = "GROQ_BASE_URL", default_value = DEFAULT_GROQ_BASE_URL)]
    pub groq_base_url: Url,

    #[arg(long = "groq-temperature", env = "GROQ_TEMPERATURE", default_value_t = DEFAULT_TEMPERATURE)]
    pub temperature: f32,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct OcrArgs {
    #[arg(long = "ocr-language", env = "OCR_LANGUAGE", default_value = DEFAULT_OCR_LANGUAGE)]
    pub language: String,

    #[arg(long = "tesseract-bin", env = "TESSERACT_BIN", default_value = "tesseract")]
    pub tesseract_bin: String,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct AnalyzeArgs {
    /// Ingredient text; switches the client to text mode
    #[arg(long, conflicts_with_all = ["image", "camera"])]
    pub text: Option<String>,

    /// Label picture to upload
    #[arg(long)]
    pub image: Option<PathBuf>,

    /// Label picture taken with a camera
    #[arg(long)]
    pub camera: Option<PathBuf>,

    /// Keep the result in local storage
    #[arg(long, default_value_t = false)]
    pub save: bool,

    /// Print the saved result and exit
    #[arg(long, default_value_t = false)]
    pub show_saved: bool,

    #[arg(long = "backend-url", env = "BACKEND_URL", default_value = DEFAULT_BACKEND_URL)]
    pub backend_url: Url,

    #[arg(long = "storage-dir", env = "STORAGE_DIR", default_value = ".intellifood")]
    pub storage_dir: PathBuf,
}

impl From<OcrArgs> for OcrConfig {
    fn from(args: OcrArgs) -> Self {
        OcrConfig {
            language: args.language,
            tesseract_bin: args.tesseract_bin,
        }
    }
}

impl Args {
    /// Builds the core configuration; the relay cannot run without an API key.
    pub fn intellifood_config(&self) -> Result<IntellifoodConfig, anyhow::Error> {
        let groq_api_key = self
            .llm
            .groq_api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| anyhow::anyhow!("GROQ_API_KEY is required to run the relay"))?;

        Ok(IntellifoodConfig {
            llm: LLMConfig {
                groq_api_key,
                groq_model: self.llm.groq_model.clone(),
                groq_base_url: self.llm.groq_base_url.to_string(),
                temperature: self.llm.temperature,
            },
        })
    }
}
