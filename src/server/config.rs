//! Server configuration.

use std::net::SocketAddr;

use crate::config::{ApiKeyEntry, ServerSection};

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address
    pub addr: SocketAddr,
    /// Default sensitivity when a request omits `strict_mode`
    pub strict_default: bool,
    /// Maximum accepted text length (characters)
    pub max_text_len: usize,
    /// Maximum batch size
    pub max_batch: usize,
    /// Require an API key on scan endpoints
    pub require_key: bool,
    /// Provisioned API keys
    pub api_keys: Vec<ApiKeyEntry>,
    /// Enable request logging
    pub logging: bool,
    /// CORS enabled
    pub cors_enabled: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: "127.0.0.1:8300".parse().unwrap(),
            strict_default: false,
            max_text_len: 50_000,
            max_batch: 20,
            require_key: false,
            api_keys: Vec::new(),
            logging: true,
            cors_enabled: true,
        }
    }
}

impl ServerConfig {
    /// Build from a parsed config-file section
    pub fn from_section(section: &ServerSection) -> Self {
        let addr = format!("{}:{}", section.host, section.port)
            .parse()
            .unwrap_or_else(|_| ServerConfig::default().addr);

        Self {
            addr,
            strict_default: section.strict_default,
            max_text_len: section.max_text_len,
            max_batch: section.max_batch,
            require_key: !section.api_keys.is_empty(),
            api_keys: section.api_keys.clone(),
            ..Self::default()
        }
    }

    /// Create with custom port
    pub fn with_port(mut self, port: u16) -> Self {
        self.addr = format!("127.0.0.1:{port}").parse().unwrap();
        self
    }

    /// Bind to all interfaces
    pub fn bind_all(mut self) -> Self {
        let port = self.addr.port();
        self.addr = format!("0.0.0.0:{port}").parse().unwrap();
        self
    }

    /// Set address directly
    pub fn with_addr(mut self, addr: SocketAddr) -> Self {
        self.addr = addr;
        self
    }

    /// Set the default sensitivity
    pub fn with_strict_default(mut self, strict: bool) -> Self {
        self.strict_default = strict;
        self
    }

    /// Provision API keys and require them on scan endpoints
    pub fn with_api_keys(mut self, keys: Vec<ApiKeyEntry>) -> Self {
        self.require_key = !keys.is_empty();
        self.api_keys = keys;
        self
    }

    /// Accept unauthenticated requests
    pub fn without_keys(mut self) -> Self {
        self.require_key = false;
        self
    }

    /// Set max accepted text length
    pub fn with_max_text_len(mut self, len: usize) -> Self {
        self.max_text_len = len;
        self
    }

    /// Disable logging
    pub fn without_logging(mut self) -> Self {
        self.logging = false;
        self
    }

    /// Disable CORS
    pub fn without_cors(mut self) -> Self {
        self.cors_enabled = false;
        self
    }
}
