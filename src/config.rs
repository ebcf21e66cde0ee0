//! Server configuration
//!
//! Values come from CLI flags, falling back to environment variables:
//! - `TODO_MCP_HOST` (default `127.0.0.1`)
//! - `TODO_MCP_PORT` (default `3456`)
//! - `MCP_AUTH_TOKEN` (unset or blank disables authentication)

use crate::Result;
use anyhow::Context;
use clap::Args;
use std::net::{IpAddr, SocketAddr};

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3456;

/// HTTP server configuration
#[derive(Debug, Clone, PartialEq, Eq, Args)]
pub struct ServerConfig {
    /// Address to bind
    #[arg(long, env = "TODO_MCP_HOST", default_value = DEFAULT_HOST)]
    pub host: String,

    /// HTTP server port
    #[arg(long, env = "TODO_MCP_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Require `Authorization: Bearer <token>` on the MCP endpoint
    #[arg(long, env = "MCP_AUTH_TOKEN", hide_env_values = true)]
    pub auth_token: Option<String>,
}

impl ServerConfig {
    /// Drop a blank auth token so it does not enable authentication
    pub fn normalized(mut self) -> Self {
        self.auth_token = self
            .auth_token
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());
        self
    }

    /// Socket address to bind
    pub fn addr(&self) -> Result<SocketAddr> {
        let ip: IpAddr = self
            .host
            .parse()
            .with_context(|| format!("Invalid host address: {}", self.host))?;
        Ok(SocketAddr::new(ip, self.port))
    }

    /// URL of the MCP endpoint
    pub fn mcp_url(&self) -> String {
        format!("http://{}:{}/mcp", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            auth_token: None,
        }
    }
}
