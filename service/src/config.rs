use clap::builder::TypedValueParser as _;
use clap::Parser;
use dotenvy::dotenv;
use log::LevelFilter;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Default Groq OpenAI-compatible API base URL used when `GROQ_BASE_URL` is not set.
pub const DEFAULT_GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Default MailerSend API base URL, selected when `EMAIL_HOST_SERVICE=mailersend`.
pub const DEFAULT_MAILERSEND_BASE_URL: &str = "https://api.mailersend.com/v1";

/// Model identifier sent with every completion request unless overridden.
pub const DEFAULT_COMPLETION_MODEL: &str = "llama-3.1-8b-instant";

#[derive(Clone, Debug, PartialEq)]
pub enum RustEnv {
    Development,
    Production,
    Staging,
}

#[derive(Debug, PartialEq, Eq)]
pub struct RustEnvParseError;

impl FromStr for RustEnv {
    type Err = RustEnvParseError;
    fn from_str(level: &str) -> Result<RustEnv, Self::Err> {
        match level.to_lowercase().as_str() {
            "development" => Ok(RustEnv::Development),
            "production" => Ok(RustEnv::Production),
            "staging" => Ok(RustEnv::Staging),
            _ => Err(RustEnvParseError),
        }
    }
}

impl fmt::Display for RustEnv {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RustEnv::Development => write!(f, "development"),
            RustEnv::Production => write!(f, "production"),
            RustEnv::Staging => write!(f, "staging"),
        }
    }
}

/// Startup configuration problems. Any of these stops the process before the
/// listener is bound.
#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// One or more required settings were not provided. Holds the env var names.
    Missing(Vec<&'static str>),
    /// `EMAIL_HOST_SERVICE` named a service we don't know how to reach.
    UnknownMailService(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConfigError::Missing(keys) => {
                write!(f, "missing required configuration: {}", keys.join(", "))
            }
            ConfigError::UnknownMailService(service) => write!(
                f,
                "unknown EMAIL_HOST_SERVICE '{service}', expected 'mailersend' or an http(s) URL"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Clone, Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// A list of full CORS origin URLs that allowed to receive server responses.
    #[arg(
        long,
        env,
        value_delimiter = ',',
        use_value_delimiter = true,
        default_value = "http://localhost:5173,https://notegenie-2.onrender.com"
    )]
    pub allowed_origins: Vec<String>,

    /// The API key to use when calling the Groq completion API.
    #[arg(long, env)]
    groq_api_key: Option<String>,

    /// The base URL of the Groq OpenAI-compatible API.
    /// Override in tests to point at a mock server.
    #[arg(long, env, default_value = DEFAULT_GROQ_BASE_URL)]
    groq_base_url: String,

    /// The model identifier sent with each completion request.
    #[arg(long, env, default_value = DEFAULT_COMPLETION_MODEL)]
    completion_model: String,

    /// Timeout in seconds for a single completion request
    #[arg(long, env, default_value_t = 60)]
    pub completion_timeout_secs: u64,

    /// The transactional mail service: `mailersend`, or the full base URL of a
    /// MailerSend-compatible API. Nodemailer-style service names such as `gmail`
    /// are not supported and fail startup with `UnknownMailService`.
    #[arg(long, env)]
    email_host_service: Option<String>,

    /// The mail account user. Also used as the sender address.
    #[arg(long, env)]
    email_host_user: Option<String>,

    /// The mail account secret (API token) used to authenticate with the mail service.
    #[arg(long, env)]
    email_host_pass: Option<String>,

    /// Timeout in seconds for a single mail delivery request
    #[arg(long, env, default_value_t = 30)]
    pub mail_timeout_secs: u64,

    /// Directory for transient transcript uploads. Defaults to the system temp directory.
    #[arg(long, env)]
    upload_dir: Option<PathBuf>,

    /// Maximum accepted request body size in bytes for transcript uploads
    #[arg(long, env, default_value_t = 5 * 1024 * 1024)]
    pub max_upload_bytes: usize,

    /// The host interface to listen for incoming connections
    #[arg(short, long, env, default_value = "127.0.0.1")]
    pub interface: Option<String>,

    /// The host TCP port to listen for incoming connections
    #[arg(short, long, env, default_value_t = 5000)]
    pub port: u16,

    /// Set the log level verbosity threshold (level) to control what gets displayed on console output
    #[arg(
        short,
        long,
        env,
        default_value_t = LevelFilter::Info,
        value_parser = clap::builder::PossibleValuesParser::new(["OFF", "ERROR", "WARN", "INFO", "DEBUG", "TRACE"])
            .map(|s| s.parse::<LevelFilter>().unwrap()),
        )]
    pub log_level_filter: LevelFilter,

    /// Set the Rust runtime environment to use.
    #[arg(
    short,
    long,
    env,
    default_value_t = RustEnv::Development,
    value_parser = clap::builder::PossibleValuesParser::new([
        "DEVELOPMENT", "PRODUCTION", "STAGING",
        "development", "production", "staging"
    ])
        .map(|s| s.parse::<RustEnv>().unwrap()),
    )]
    pub runtime_env: RustEnv,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub fn new() -> Self {
        // Load .env file first
        dotenv().ok();
        // Then parse the command line parameters and flags
        Config::parse()
    }

    /// Checks that every credential the providers need is present. Called once at
    /// startup; the process must not start serving when this fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("GROQ_API_KEY", &self.groq_api_key),
            ("EMAIL_HOST_SERVICE", &self.email_host_service),
            ("EMAIL_HOST_USER", &self.email_host_user),
            ("EMAIL_HOST_PASS", &self.email_host_pass),
        ];
        let missing: Vec<&'static str> = required
            .iter()
            .filter(|(_, value)| value.as_deref().map_or(true, |v| v.trim().is_empty()))
            .map(|(key, _)| *key)
            .collect();

        if !missing.is_empty() {
            return Err(ConfigError::Missing(missing));
        }

        self.mail_base_url().map(|_| ())
    }

    pub fn groq_api_key(&self) -> Option<String> {
        self.groq_api_key.clone()
    }

    pub fn groq_base_url(&self) -> &str {
        &self.groq_base_url
    }

    pub fn completion_model(&self) -> &str {
        &self.completion_model
    }

    pub fn email_host_user(&self) -> Option<String> {
        self.email_host_user.clone()
    }

    pub fn email_host_pass(&self) -> Option<String> {
        self.email_host_pass.clone()
    }

    /// Resolves `EMAIL_HOST_SERVICE` to the base URL of the mail API.
    pub fn mail_base_url(&self) -> Result<String, ConfigError> {
        let service = self
            .email_host_service
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ConfigError::Missing(vec!["EMAIL_HOST_SERVICE"]))?;

        if service.eq_ignore_ascii_case("mailersend") {
            Ok(DEFAULT_MAILERSEND_BASE_URL.to_string())
        } else if service.starts_with("http://") || service.starts_with("https://") {
            Ok(service.trim_end_matches('/').to_string())
        } else {
            Err(ConfigError::UnknownMailService(service.to_string()))
        }
    }

    pub fn upload_dir(&self) -> Option<&Path> {
        self.upload_dir.as_deref()
    }

    pub fn runtime_env(&self) -> RustEnv {
        self.runtime_env.clone()
    }
}
