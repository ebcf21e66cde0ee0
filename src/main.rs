use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use colored::Colorize;
use std::io;
use todo_mcp::config::ServerConfig;
use todo_mcp::Result;

#[derive(Parser)]
#[command(name = "todo-mcp")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Stateful todo list MCP server", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable debug logging (overridden by TODO_MCP_LOG / RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve MCP over stdin/stdout
    Stdio,

    /// Serve MCP over HTTP at /mcp
    Serve(ServerConfig),

    /// Register the server in MCP client configurations
    Install(todo_mcp::cli::install::InstallArgs),

    /// Generate shell completions
    Completions {
        /// Shell type (bash, zsh, fish, powershell)
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() {
    let cli = Cli::parse();

    if matches!(cli.command, Commands::Stdio | Commands::Serve(_)) {
        todo_mcp::logging::init(cli.verbose);
    }

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("{}", format!("Error: failed to create tokio runtime: {}", e).red());
            std::process::exit(1);
        }
    };

    if let Err(e) = runtime.block_on(run_async(cli)) {
        eprintln!("{}", format!("Error: {:#}", e).red());
        std::process::exit(1);
    }
}

async fn run_async(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Stdio => {
            todo_mcp::cli::stdio::run().await?;
        }

        Commands::Serve(config) => {
            todo_mcp::cli::serve::run(config).await?;
        }

        Commands::Install(args) => {
            todo_mcp::cli::install::run(args)?;
        }

        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "todo-mcp", &mut io::stdout());
        }
    }

    Ok(())
}
