//! Environment-backed configuration.
//!
//! Most settings have defaults. Override with `ASSAY_*` environment variables.

pub mod error;


pub use error::ConfigError;

use std::env;
use std::net::IpAddr;

/// Server configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `ASSAY_*` overrides on top of defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port. Default: `8080`.
    pub port: u16,

    /// IP address to bind to. Default: `127.0.0.1`.
    pub bind_addr: IpAddr,

    /// Number of passages requested per retrieval call. Default: `3`.
    pub top_k: usize,

    /// Distance threshold above which evidence is too weak to answer.
    /// Lower retrieval scores mean stronger evidence. Default: `1.6`.
    pub confidence_threshold: f64,

    /// Minimum character length of an answer eligible for High confidence
    /// and cache admission. Default: `20`.
    pub min_answer_chars: usize,

    /// Minimum word count below which a generated answer is treated as a
    /// generator self-refusal. Default: `8`.
    pub min_generation_words: usize,

    /// Maximum accepted question length after sanitization. Default: `500`.
    pub max_question_len: usize,

    /// Maximum accepted chat title length after sanitization. Default: `100`.
    pub max_title_len: usize,

    /// Base URL of the retrieval sidecar (e.g. `http://localhost:9100`).
    pub retriever_url: Option<String>,

    /// Base URL of the generation sidecar (e.g. `http://localhost:9200`).
    pub generator_url: Option<String>,

    /// When set, canned in-process collaborators replace the HTTP sidecars.
    /// Requires the `mock` feature.
    pub mock_rag: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            bind_addr: IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)),
            top_k: 3,
            confidence_threshold: 1.6,
            min_answer_chars: 20,
            min_generation_words: 8,
            max_question_len: 500,
            max_title_len: 100,
            retriever_url: None,
            generator_url: None,
            mock_rag: false,
        }
    }
}

impl Config {
    const ENV_PORT: &'static str = "ASSAY_PORT";
    const ENV_BIND_ADDR: &'static str = "ASSAY_BIND_ADDR";
    const ENV_TOP_K: &'static str = "ASSAY_TOP_K";
    const ENV_CONFIDENCE_THRESHOLD: &'static str = "ASSAY_CONFIDENCE_THRESHOLD";
    const ENV_MIN_ANSWER_CHARS: &'static str = "ASSAY_MIN_ANSWER_CHARS";
    const ENV_MIN_GENERATION_WORDS: &'static str = "ASSAY_MIN_GENERATION_WORDS";
    const ENV_MAX_QUESTION_LEN: &'static str = "ASSAY_MAX_QUESTION_LEN";
    const ENV_MAX_TITLE_LEN: &'static str = "ASSAY_MAX_TITLE_LEN";
    const ENV_RETRIEVER_URL: &'static str = "ASSAY_RETRIEVER_URL";
    const ENV_GENERATOR_URL: &'static str = "ASSAY_GENERATOR_URL";
    const ENV_MOCK_RAG: &'static str = "ASSAY_MOCK_RAG";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = Self::parse_port_from_env(defaults.port)?;
        let bind_addr = Self::parse_bind_addr_from_env(defaults.bind_addr)?;
        let top_k = Self::parse_usize_from_env(Self::ENV_TOP_K, defaults.top_k)?;
        let confidence_threshold = Self::parse_f64_from_env(
            Self::ENV_CONFIDENCE_THRESHOLD,
            defaults.confidence_threshold,
        )?;
        let min_answer_chars =
            Self::parse_usize_from_env(Self::ENV_MIN_ANSWER_CHARS, defaults.min_answer_chars)?;
        let min_generation_words = Self::parse_usize_from_env(
            Self::ENV_MIN_GENERATION_WORDS,
            defaults.min_generation_words,
        )?;
        let max_question_len =
            Self::parse_usize_from_env(Self::ENV_MAX_QUESTION_LEN, defaults.max_question_len)?;
        let max_title_len =
            Self::parse_usize_from_env(Self::ENV_MAX_TITLE_LEN, defaults.max_title_len)?;
        let retriever_url = Self::parse_optional_string_from_env(Self::ENV_RETRIEVER_URL);
        let generator_url = Self::parse_optional_string_from_env(Self::ENV_GENERATOR_URL);
        let mock_rag = env::var_os(Self::ENV_MOCK_RAG).is_some_and(|v| !v.is_empty());

        Ok(Self {
            port,
            bind_addr,
            top_k,
            confidence_threshold,
            min_answer_chars,
            min_generation_words,
            max_question_len,
            max_title_len,
            retriever_url,
            generator_url,
            mock_rag,
        })
    }

    /// Validates thresholds and collaborator wiring (does not open connections).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.confidence_threshold.is_finite() || self.confidence_threshold <= 0.0 {
            return Err(ConfigError::InvalidThreshold {
                value: self.confidence_threshold,
            });
        }

        if self.top_k == 0 {
            return Err(ConfigError::InvalidNumber {
                var: Self::ENV_TOP_K,
                value: "0".to_string(),
            });
        }

        if !self.mock_rag {
            if self.retriever_url.is_none() {
                return Err(ConfigError::MissingCollaboratorUrl {
                    name: Self::ENV_RETRIEVER_URL,
                });
            }
            if self.generator_url.is_none() {
                return Err(ConfigError::MissingCollaboratorUrl {
                    name: Self::ENV_GENERATOR_URL,
                });
            }
        }

        Ok(())
    }

    /// Returns `"{bind_addr}:{port}"` (useful for logging/binding).
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    fn parse_port_from_env(default: u16) -> Result<u16, ConfigError> {
        match env::var(Self::ENV_PORT) {
            Ok(value) => {
                let port: u16 = value.parse().map_err(|e| ConfigError::PortParseError {
                    value: value.clone(),
                    source: e,
                })?;

                if port == 0 {
                    return Err(ConfigError::InvalidPort { value });
                }

                Ok(port)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_bind_addr_from_env(default: IpAddr) -> Result<IpAddr, ConfigError> {
        match env::var(Self::ENV_BIND_ADDR) {
            Ok(value) => value
                .parse()
                .map_err(|e| ConfigError::InvalidBindAddr { value, source: e }),
            Err(_) => Ok(default),
        }
    }

    fn parse_usize_from_env(var_name: &'static str, default: usize) -> Result<usize, ConfigError> {
        match env::var(var_name) {
            Ok(value) => value.parse().map_err(|_| ConfigError::InvalidNumber {
                var: var_name,
                value,
            }),
            Err(_) => Ok(default),
        }
    }

    fn parse_f64_from_env(var_name: &'static str, default: f64) -> Result<f64, ConfigError> {
        match env::var(var_name) {
            Ok(value) => value.parse().map_err(|_| ConfigError::InvalidNumber {
                var: var_name,
                value,
            }),
            Err(_) => Ok(default),
        }
    }

    fn parse_optional_string_from_env(var_name: &str) -> Option<String> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }
}
