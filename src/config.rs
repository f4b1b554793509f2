use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

use crate::http::parser::ParserConfig;

/// Environment variable naming a YAML config file.
pub const CONFIG_ENV: &str = "H1FRAME_CONFIG";
/// Environment variable overriding `server.listen_addr`.
pub const LISTEN_ENV: &str = "LISTEN";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub listen_addr: String,
    /// Bytes requested from the socket per read.
    pub read_chunk_size: usize,
    /// Limit on request line plus headers.
    pub max_head_size: usize,
    /// Limit on a declared request body.
    pub max_body_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        let parser = ParserConfig::default();
        Self {
            listen_addr: "127.0.0.1:42069".to_string(),
            read_chunk_size: parser.read_chunk_size,
            max_head_size: parser.max_head_size,
            max_body_size: parser.max_body_size,
        }
    }
}

impl ServerConfig {
    pub fn parser_config(&self) -> ParserConfig {
        ParserConfig {
            read_chunk_size: self.read_chunk_size,
            max_head_size: self.max_head_size,
            max_body_size: self.max_body_size,
        }
    }
}

impl Config {
    /// Loads the file named by `H1FRAME_CONFIG`, or defaults when unset,
    /// then applies the `LISTEN` override.
    pub fn load() -> anyhow::Result<Self> {
        let mut cfg = match std::env::var(CONFIG_ENV) {
            Ok(path) => Self::from_file(path)?,
            Err(_) => Self::default(),
        };

        if let Ok(addr) = std::env::var(LISTEN_ENV) {
            cfg.server.listen_addr = addr;
        }

        Ok(cfg)
    }

    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_yaml_str(&raw).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn from_yaml_str(raw: &str) -> anyhow::Result<Self> {
        let cfg: Config = serde_yaml::from_str(raw)?;
        if cfg.server.read_chunk_size == 0 {
            anyhow::bail!("server.read_chunk_size must be greater than zero");
        }
        Ok(cfg)
    }
}
