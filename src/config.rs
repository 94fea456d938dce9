//! Environment-driven configuration.
//!
//! All settings are read from the process environment once at startup and
//! collected into an explicit [`Config`] struct that is passed by reference
//! into the pipeline and server — there is no ambient global state. A
//! missing required key fails the whole process with
//! [`Error::Configuration`](crate::error::Error::Configuration), not per
//! request.

use std::env;

use crate::error::{Error, Result};

/// Top-level application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub provider: ProviderConfig,
    pub chunking: ChunkingConfig,
    pub retrieval: RetrievalConfig,
    pub tracing: TracingConfig,
    pub server: ServerConfig,
}

/// External model provider settings (one OpenAI-compatible endpoint is
/// used for both chat completions and embeddings).
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Bearer token for the provider API. Required.
    pub api_key: String,
    /// Base URL of the OpenAI-compatible API.
    pub api_base: String,
    /// Generation model name (e.g. `gemma2-9b-it`).
    pub chat_model: String,
    /// Embedding model name.
    pub embedding_model: String,
    /// Embedding vector dimensionality for the configured model.
    pub embedding_dims: usize,
    /// Timeout applied to every external model call, in seconds.
    pub timeout_secs: u64,
}

/// Text chunking parameters.
#[derive(Debug, Clone)]
pub struct ChunkingConfig {
    /// Atomic-unit separator the text is split on before packing.
    pub separator: String,
    /// Target chunk size in characters.
    pub chunk_size: usize,
    /// Characters of the previous chunk re-included at the start of the next.
    pub chunk_overlap: usize,
}

/// Retrieval parameters.
#[derive(Debug, Clone)]
pub struct RetrievalConfig {
    /// Number of chunks returned by nearest-neighbor retrieval.
    pub top_k: usize,
}

/// Observability settings.
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// Turns on call tracing for pipeline requests.
    pub enabled: bool,
    /// Label attached to traces when tracing is enabled.
    pub project: String,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind: String,
}

const DEFAULT_API_BASE: &str = "https://api.groq.com/openai/v1";
const DEFAULT_CHAT_MODEL: &str = "gemma2-9b-it";
const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-small";
const DEFAULT_EMBEDDING_DIMS: usize = 1536;
const DEFAULT_CHUNK_SIZE: usize = 800;
const DEFAULT_CHUNK_OVERLAP: usize = 200;
const DEFAULT_TOP_K: usize = 4;
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_BIND: &str = "127.0.0.1:7410";

impl Config {
    /// Build a configuration from the process environment.
    ///
    /// `ASKDOC_API_KEY` (or the legacy `GROQ_API_KEY`) is required; every
    /// other key has a default. Numeric values that fail to parse and
    /// parameter combinations that cannot work (overlap ≥ chunk size,
    /// `top_k` of zero) are configuration errors.
    pub fn from_env() -> Result<Self> {
        let api_key = env::var("ASKDOC_API_KEY")
            .or_else(|_| env::var("GROQ_API_KEY"))
            .map_err(|_| {
                Error::Configuration(
                    "ASKDOC_API_KEY (or GROQ_API_KEY) environment variable not set".to_string(),
                )
            })?;

        let config = Config {
            provider: ProviderConfig {
                api_key,
                api_base: var_or("ASKDOC_API_BASE", DEFAULT_API_BASE),
                chat_model: var_or("ASKDOC_CHAT_MODEL", DEFAULT_CHAT_MODEL),
                embedding_model: var_or("ASKDOC_EMBEDDING_MODEL", DEFAULT_EMBEDDING_MODEL),
                embedding_dims: parse_var("ASKDOC_EMBEDDING_DIMS", DEFAULT_EMBEDDING_DIMS)?,
                timeout_secs: parse_var("ASKDOC_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?,
            },
            chunking: ChunkingConfig {
                separator: var_or("ASKDOC_CHUNK_SEPARATOR", "\n"),
                chunk_size: parse_var("ASKDOC_CHUNK_SIZE", DEFAULT_CHUNK_SIZE)?,
                chunk_overlap: parse_var("ASKDOC_CHUNK_OVERLAP", DEFAULT_CHUNK_OVERLAP)?,
            },
            retrieval: RetrievalConfig {
                top_k: parse_var("ASKDOC_TOP_K", DEFAULT_TOP_K)?,
            },
            tracing: TracingConfig {
                enabled: flag_var("ASKDOC_TRACING"),
                project: var_or("ASKDOC_TRACING_PROJECT", "askdoc"),
            },
            server: ServerConfig {
                bind: var_or("ASKDOC_BIND", DEFAULT_BIND),
            },
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.chunking.chunk_size == 0 {
            return Err(Error::Configuration(
                "ASKDOC_CHUNK_SIZE must be > 0".to_string(),
            ));
        }
        if self.chunking.chunk_overlap >= self.chunking.chunk_size {
            return Err(Error::Configuration(
                "ASKDOC_CHUNK_OVERLAP must be smaller than ASKDOC_CHUNK_SIZE".to_string(),
            ));
        }
        if self.retrieval.top_k < 1 {
            return Err(Error::Configuration(
                "ASKDOC_TOP_K must be >= 1".to_string(),
            ));
        }
        if self.provider.embedding_dims == 0 {
            return Err(Error::Configuration(
                "ASKDOC_EMBEDDING_DIMS must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn flag_var(key: &str) -> bool {
    matches!(
        env::var(key).unwrap_or_default().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

fn parse_var<T: std::str::FromStr>(key: &str, default: T) -> Result<T> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| Error::Configuration(format!("{} has an invalid value: {}", key, raw))),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Environment mutation is process-global, so everything lives in one
    // test to avoid interference between parallel test threads.
    #[test]
    fn from_env_requires_key_and_applies_defaults() {
        env::remove_var("ASKDOC_API_KEY");
        env::remove_var("GROQ_API_KEY");
        let err = Config::from_env().unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));

        env::set_var("ASKDOC_API_KEY", "test-key");
        let config = Config::from_env().unwrap();
        assert_eq!(config.chunking.chunk_size, 800);
        assert_eq!(config.chunking.chunk_overlap, 200);
        assert_eq!(config.chunking.separator, "\n");
        assert_eq!(config.retrieval.top_k, 4);
        assert!(!config.tracing.enabled);

        env::set_var("ASKDOC_CHUNK_OVERLAP", "800");
        assert!(matches!(
            Config::from_env().unwrap_err(),
            Error::Configuration(_)
        ));
        env::set_var("ASKDOC_CHUNK_OVERLAP", "not-a-number");
        assert!(matches!(
            Config::from_env().unwrap_err(),
            Error::Configuration(_)
        ));
        env::remove_var("ASKDOC_CHUNK_OVERLAP");

        env::set_var("ASKDOC_TRACING", "true");
        env::set_var("ASKDOC_TRACING_PROJECT", "pdf-qa");
        let config = Config::from_env().unwrap();
        assert!(config.tracing.enabled);
        assert_eq!(config.tracing.project, "pdf-qa");

        env::remove_var("ASKDOC_TRACING");
        env::remove_var("ASKDOC_TRACING_PROJECT");
        env::remove_var("ASKDOC_API_KEY");
    }
}
