//! MCP client configuration
//!
//! Registers the todo server with MCP clients:
//! - Claude: `.mcp.json` (project-level)
//! - Gemini: `.gemini/settings.json` (project-level)
//! - Codex: `~/.codex/config.toml` (user-level)
//!
//! Existing entries for other servers are preserved; the `todo` entry is always overwritten.

use crate::Result;
use serde_json::{json, Value};
use std::path::{Path, PathBuf};

/// Key the server is registered under in client configs
pub const SERVER_KEY: &str = "todo";

/// How a client reaches the server
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientTransport {
    /// Client spawns `command stdio`
    Stdio { command: String },
    /// Client posts to a running `serve` instance
    Http { url: String },
}

impl ClientTransport {
    /// Stdio transport launching the currently running executable
    pub fn current_exe() -> Result<Self> {
        let exe = std::env::current_exe()?;
        Ok(ClientTransport::Stdio {
            command: exe.display().to_string(),
        })
    }

    /// HTTP transport for a server on localhost
    pub fn localhost(port: u16) -> Self {
        ClientTransport::Http {
            url: format!("http://localhost:{}/mcp", port),
        }
    }

    fn to_json(&self) -> Value {
        match self {
            ClientTransport::Stdio { command } => json!({
                "command": command,
                "args": ["stdio"]
            }),
            ClientTransport::Http { url } => json!({
                "type": "http",
                "url": url
            }),
        }
    }

    fn to_toml(&self) -> toml::Value {
        let mut table = toml::map::Map::new();
        match self {
            ClientTransport::Stdio { command } => {
                table.insert("command".to_string(), toml::Value::String(command.clone()));
                table.insert(
                    "args".to_string(),
                    toml::Value::Array(vec![toml::Value::String("stdio".to_string())]),
                );
            }
            ClientTransport::Http { url } => {
                table.insert("type".to_string(), toml::Value::String("http".to_string()));
                table.insert("url".to_string(), toml::Value::String(url.clone()));
            }
        }
        toml::Value::Table(table)
    }
}

/// Register the server in Claude's project `.mcp.json`
pub fn ensure_claude_mcp_json(project_root: &Path, transport: &ClientTransport) -> Result<PathBuf> {
    let path = project_root.join(".mcp.json");
    upsert_json_server(&path, transport)?;
    Ok(path)
}

/// Register the server in Gemini's project `.gemini/settings.json`
pub fn ensure_gemini_mcp_config(project_root: &Path, transport: &ClientTransport) -> Result<PathBuf> {
    let path = project_root.join(".gemini/settings.json");
    upsert_json_server(&path, transport)?;
    Ok(path)
}

/// Register the server in Codex's `<home>/.codex/config.toml`
pub fn ensure_codex_mcp_config(home_dir: &Path, transport: &ClientTransport) -> Result<PathBuf> {
    let config_path = home_dir.join(".codex/config.toml");

    let mut config: toml::Value = if config_path.exists() {
        let content = std::fs::read_to_string(&config_path)?;
        content.parse()?
    } else {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        toml::Value::Table(toml::map::Map::new())
    };

    let root_table = config
        .as_table_mut()
        .ok_or_else(|| anyhow::anyhow!("{} is not a TOML table", config_path.display()))?;

    let mcp_servers = root_table
        .entry("mcp_servers".to_string())
        .or_insert_with(|| toml::Value::Table(toml::map::Map::new()));

    let mcp_table = mcp_servers
        .as_table_mut()
        .ok_or_else(|| anyhow::anyhow!("mcp_servers in {} is not a table", config_path.display()))?;
    mcp_table.insert(SERVER_KEY.to_string(), transport.to_toml());

    let content = toml::to_string_pretty(&config)?;
    std::fs::write(&config_path, content)?;

    Ok(config_path)
}

/// User home directory used for user-level client configs
pub fn home_dir() -> Result<PathBuf> {
    dirs::home_dir().ok_or_else(|| anyhow::anyhow!("Could not find home directory"))
}

/// Write `mcpServers.todo` into a JSON settings file, keeping everything else
fn upsert_json_server(path: &Path, transport: &ClientTransport) -> Result<()> {
    let mut settings = if path.exists() {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)?
    } else {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        json!({})
    };

    if !settings.is_object() {
        anyhow::bail!("{} does not contain a JSON object", path.display());
    }

    // Ensure mcpServers object exists
    if !settings.get("mcpServers").map(Value::is_object).unwrap_or(false) {
        settings["mcpServers"] = json!({});
    }

    settings["mcpServers"][SERVER_KEY] = transport.to_json();

    let content = serde_json::to_string_pretty(&settings)?;
    std::fs::write(path, content)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn stdio() -> ClientTransport {
        ClientTransport::Stdio {
            command: "/usr/local/bin/todo-mcp".to_string(),
        }
    }

    #[test]
    fn test_localhost_transport() {
        assert_eq!(
            ClientTransport::localhost(4000),
            ClientTransport::Http {
                url: "http://localhost:4000/mcp".to_string()
            }
        );
    }

    #[test]
    fn test_ensure_claude_mcp_json_creates_new_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = ensure_claude_mcp_json(temp_dir.path(), &stdio()).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let config: Value = serde_json::from_str(&content).unwrap();
        assert_eq!(config["mcpServers"]["todo"]["command"], "/usr/local/bin/todo-mcp");
        assert_eq!(config["mcpServers"]["todo"]["args"], json!(["stdio"]));
    }

    #[test]
    fn test_ensure_claude_mcp_json_adds_to_existing() {
        let temp_dir = TempDir::new().unwrap();
        let mcp_json_path = temp_dir.path().join(".mcp.json");
        std::fs::write(&mcp_json_path, r#"{"mcpServers": {"other": {"command": "other-cmd"}}}"#).unwrap();

        ensure_claude_mcp_json(temp_dir.path(), &ClientTransport::localhost(3456)).unwrap();

        let content = std::fs::read_to_string(&mcp_json_path).unwrap();
        let config: Value = serde_json::from_str(&content).unwrap();
        assert_eq!(config["mcpServers"]["other"]["command"], "other-cmd");
        assert_eq!(config["mcpServers"]["todo"]["type"], "http");
        assert_eq!(config["mcpServers"]["todo"]["url"], "http://localhost:3456/mcp");
    }

    #[test]
    fn test_ensure_gemini_mcp_config_preserves_settings() {
        let temp_dir = TempDir::new().unwrap();
        let gemini_dir = temp_dir.path().join(".gemini");
        std::fs::create_dir_all(&gemini_dir).unwrap();
        let settings_path = gemini_dir.join("settings.json");
        std::fs::write(&settings_path, r#"{"tools": {"allowed": ["read_file"]}}"#).unwrap();

        ensure_gemini_mcp_config(temp_dir.path(), &stdio()).unwrap();

        let content = std::fs::read_to_string(&settings_path).unwrap();
        let settings: Value = serde_json::from_str(&content).unwrap();
        assert_eq!(settings["tools"]["allowed"][0], "read_file");
        assert_eq!(settings["mcpServers"]["todo"]["args"], json!(["stdio"]));
    }

    #[test]
    fn test_upsert_rejects_non_object_file() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join(".mcp.json"), "[1, 2]").unwrap();
        assert!(ensure_claude_mcp_json(temp_dir.path(), &stdio()).is_err());
    }

    #[test]
    fn test_ensure_codex_mcp_config_creates_new_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = ensure_codex_mcp_config(temp_dir.path(), &ClientTransport::localhost(3456)).unwrap();

        let content = std::fs::read_to_string(path).unwrap();
        assert!(content.contains("[mcp_servers.todo]"));
        assert!(content.contains("type = \"http\""));
        assert!(content.contains("url = \"http://localhost:3456/mcp\""));
    }

    #[test]
    fn test_ensure_codex_mcp_config_adds_to_existing() {
        let temp_dir = TempDir::new().unwrap();
        let codex_dir = temp_dir.path().join(".codex");
        std::fs::create_dir_all(&codex_dir).unwrap();
        let config_path = codex_dir.join("config.toml");
        std::fs::write(
            &config_path,
            "[model]\ndefault = \"gpt-4\"\n\n[mcp_servers.todo]\ncommand = \"old-todo\"\n",
        )
        .unwrap();

        ensure_codex_mcp_config(temp_dir.path(), &stdio()).unwrap();

        let content = std::fs::read_to_string(&config_path).unwrap();
        assert!(content.contains("[model]"));
        assert!(content.contains("default = \"gpt-4\""));
        assert!(content.contains("/usr/local/bin/todo-mcp"));
        assert!(!content.contains("old-todo"));
    }
}
