//! install CLI subcommand
//!
//! Registers the todo server in MCP client configuration files.

use crate::config::DEFAULT_PORT;
use crate::mcp::config::{
    ensure_claude_mcp_json, ensure_codex_mcp_config, ensure_gemini_mcp_config, home_dir,
    ClientTransport,
};
use crate::Result;
use clap::Args;
use colored::Colorize;
use std::path::Path;

#[derive(Debug, Args)]
pub struct InstallArgs {
    /// Register the HTTP endpoint instead of spawning over stdio
    #[arg(long)]
    pub http: bool,

    /// Port of the HTTP server (with --http)
    #[arg(long, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Update Claude's .mcp.json
    #[arg(long)]
    pub claude: bool,

    /// Update .gemini/settings.json
    #[arg(long)]
    pub gemini: bool,

    /// Update ~/.codex/config.toml
    #[arg(long)]
    pub codex: bool,
}

impl InstallArgs {
    /// Selected clients; all of them when none is named
    fn targets(&self) -> (bool, bool, bool) {
        if !self.claude && !self.gemini && !self.codex {
            (true, true, true)
        } else {
            (self.claude, self.gemini, self.codex)
        }
    }

    fn transport(&self) -> Result<ClientTransport> {
        if self.http {
            Ok(ClientTransport::localhost(self.port))
        } else {
            ClientTransport::current_exe()
        }
    }
}

/// Register the server for the selected clients
pub fn run(args: InstallArgs) -> Result<()> {
    let project_root = std::env::current_dir()?;
    let transport = args.transport()?;
    let home = if args.targets().2 { Some(home_dir()?) } else { None };

    install(&args, &transport, &project_root, home.as_deref())
}

/// Write client configs under `project_root` and `home`
pub fn install(
    args: &InstallArgs,
    transport: &ClientTransport,
    project_root: &Path,
    home: Option<&Path>,
) -> Result<()> {
    let (claude, gemini, codex) = args.targets();

    println!("{}", "Updating client configurations...".cyan());

    if claude {
        let path = ensure_claude_mcp_json(project_root, transport)?;
        println!("{}", format!("✓ Claude: {}", path.display()).green());
    }

    if gemini {
        let path = ensure_gemini_mcp_config(project_root, transport)?;
        println!("{}", format!("✓ Gemini: {}", path.display()).green());
    }

    if codex {
        let home = home.ok_or_else(|| anyhow::anyhow!("Could not find home directory"))?;
        let path = ensure_codex_mcp_config(home, transport)?;
        println!("{}", format!("✓ Codex: {}", path.display()).green());
    }

    if let ClientTransport::Http { url } = transport {
        println!(
            "{}",
            format!("  Start the server with 'todo-mcp serve' ({})", url).yellow()
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn args() -> InstallArgs {
        InstallArgs {
            http: true,
            port: 4000,
            claude: false,
            gemini: false,
            codex: false,
        }
    }

    #[test]
    fn test_no_flags_selects_all_clients() {
        assert_eq!(args().targets(), (true, true, true));
    }

    #[test]
    fn test_install_selected_client_only() {
        let project = TempDir::new().unwrap();
        let args = InstallArgs {
            gemini: true,
            ..args()
        };
        let transport = args.transport().unwrap();

        install(&args, &transport, project.path(), None).unwrap();

        assert!(project.path().join(".gemini/settings.json").exists());
        assert!(!project.path().join(".mcp.json").exists());
    }

    #[test]
    fn test_install_all_clients() {
        let project = TempDir::new().unwrap();
        let home = TempDir::new().unwrap();
        let args = args();
        let transport = args.transport().unwrap();

        install(&args, &transport, project.path(), Some(home.path())).unwrap();

        let content = std::fs::read_to_string(project.path().join(".mcp.json")).unwrap();
        assert!(content.contains("http://localhost:4000/mcp"));
        assert!(home.path().join(".codex/config.toml").exists());
    }
}
