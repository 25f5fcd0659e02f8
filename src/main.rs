use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use research_scout::chat::{Agent, ChatSession, McpToolbox};
use research_scout::config::{find_config_file, get_config, load_config};
use research_scout::index::ArxivIndex;
use research_scout::llm::GenAIClient;
use research_scout::mcp::server::McpServer;
use research_scout::service::{ResearchService, DEFAULT_MAX_RESULTS};
use research_scout::store::{topic_slug, FsStore};
use research_scout::utils::display;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Research Scout - search arXiv, keep a local paper store, and chat about it
#[derive(Parser, Debug)]
#[command(name = "research-scout")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "MCP tool server and chat client for arXiv paper research", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose logging (can be used multiple times: -v, -vv)
    #[arg(long, short, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(long, short)]
    quiet: bool,

    /// Output format
    #[arg(long, short, value_enum, global = true, default_value_t = OutputFormat::Auto)]
    output: OutputFormat,

    /// Configuration file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Root directory of the paper store (overrides config)
    #[arg(long, global = true)]
    store_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Output format for results
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// Automatic based on terminal (table if TTY, JSON otherwise)
    Auto,
    /// Table format (human-readable)
    Table,
    /// JSON format (machine-readable)
    Json,
}

impl OutputFormat {
    fn use_table(self) -> bool {
        match self {
            OutputFormat::Table => true,
            OutputFormat::Json => false,
            OutputFormat::Auto => display::stdout_is_terminal(),
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the MCP tool server (for the chat client and other MCP clients)
    Serve {
        /// Run in HTTP/SSE mode instead of stdio
        #[arg(long)]
        http: bool,

        /// Port for HTTP mode
        #[arg(long, short, default_value_t = 3000)]
        port: u16,

        /// Host to bind to for HTTP mode
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
    },

    /// Start an interactive chat session backed by the research tools
    Chat {
        /// LLM provider (overrides config)
        #[arg(long)]
        provider: Option<String>,

        /// Model name (overrides config)
        #[arg(long, short)]
        model: Option<String>,
    },

    /// Search arXiv for a topic and store the results
    #[command(alias = "s")]
    Search {
        /// Topic to search for
        topic: String,

        /// Maximum number of results
        #[arg(long, short, default_value_t = DEFAULT_MAX_RESULTS)]
        max_results: usize,
    },

    /// Look up a stored paper by its ID
    #[command(alias = "l")]
    Lookup {
        /// Paper ID (e.g., "2301.12345")
        paper_id: String,
    },

    /// List stored topic partitions
    #[command(alias = "ls")]
    Topics,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity. Logs go to stderr: in serve
    // mode stdout carries the MCP framing.
    let log_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let env_filter = if cli.quiet { "error" } else { log_level };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| format!("research_scout={env_filter}")),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load configuration from file if specified or found in default locations
    let config = if let Some(config_path) = &cli.config {
        load_config(config_path)?
    } else if let Some(config_path) = find_config_file() {
        tracing::info!("Using config file: {}", config_path.display());
        load_config(&config_path)?
    } else {
        get_config()
    };

    let store_dir = cli
        .store_dir
        .clone()
        .unwrap_or_else(|| config.store.directory.clone());
    let service = Arc::new(ResearchService::new(
        Arc::new(FsStore::new(&store_dir)),
        Arc::new(ArxivIndex::new()),
    ));

    match cli.command {
        Commands::Serve { http, port, host } => {
            let server = McpServer::new(service)?;

            if http {
                let addr = format!("{host}:{port}");
                let (bound_addr, handle) = server.run_http(&addr).await?;
                tracing::info!("MCP server listening on {}", bound_addr);
                handle
                    .await
                    .map_err(|e| anyhow::anyhow!("Server task failed: {e}"))?;
            } else {
                server.run().await?;
            }
        }

        Commands::Chat { provider, model } => {
            let mut llm_config = config.llm.clone();
            if let Some(provider) = provider {
                llm_config.provider = provider;
            }
            if let Some(model) = model {
                llm_config.model = model;
            }

            let llm = GenAIClient::new(
                &llm_config.provider,
                llm_config.model.clone(),
                Duration::from_secs(llm_config.timeout_seconds),
            )?;
            let agent = Agent::new(Arc::new(llm), &llm_config, config.chat.max_tool_turns);

            // The tool server is this same binary running `serve`, with the
            // store location forwarded so both processes agree on it.
            let exe =
                std::env::current_exe().context("cannot locate the research-scout binary")?;
            let mut serve_args = vec!["serve".to_string()];
            if let Some(path) = &cli.config {
                serve_args.push("--config".to_string());
                serve_args.push(path.display().to_string());
            }
            serve_args.push("--store-dir".to_string());
            serve_args.push(store_dir.display().to_string());

            let toolbox = McpToolbox::connect(&exe, &serve_args).await?;
            ChatSession::new(agent, toolbox).run().await?;
        }

        Commands::Search { topic, max_results } => {
            let ids = service.search(&topic, max_results).await?;

            let partition = service.store().load(&topic);
            let fetched: research_scout::TopicPartition = partition
                .into_iter()
                .filter(|(id, _)| ids.contains(id))
                .collect();

            if cli.output.use_table() {
                println!("{}", display::partition_table(&topic_slug(&topic), &fetched));
            } else {
                let summary = serde_json::json!({
                    "topic": topic_slug(&topic),
                    "paper_ids": ids,
                });
                println!("{}", serde_json::to_string_pretty(&summary)?);
            }
        }

        Commands::Lookup { paper_id } => {
            let lookup = service.lookup(&paper_id);
            println!("{}", lookup.render(&paper_id));
        }

        Commands::Topics => {
            let partitions = service.topics();
            if cli.output.use_table() {
                println!("{}", display::topics_table(&partitions));
            } else {
                let summary: serde_json::Map<String, serde_json::Value> = partitions
                    .iter()
                    .map(|(topic, partition)| {
                        (topic.clone(), serde_json::json!(partition.len()))
                    })
                    .collect();
                println!(
                    "{}",
                    serde_json::to_string_pretty(&serde_json::Value::Object(summary))?
                );
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_serve_command() {
        let cli = Cli::parse_from(["research-scout", "serve"]);
        match cli.command {
            Commands::Serve { http, port, host } => {
                assert!(!http);
                assert_eq!(port, 3000);
                assert_eq!(host, "127.0.0.1");
            }
            _ => panic!("Expected Serve command"),
        }
    }

    #[test]
    fn test_cli_chat_with_model_override() {
        let cli = Cli::parse_from(["research-scout", "chat", "--model", "llama3.2"]);
        match cli.command {
            Commands::Chat { model, provider } => {
                assert_eq!(model.as_deref(), Some("llama3.2"));
                assert!(provider.is_none());
            }
            _ => panic!("Expected Chat command"),
        }
    }

    #[test]
    fn test_cli_search_defaults() {
        let cli = Cli::parse_from(["research-scout", "search", "machine learning"]);
        match cli.command {
            Commands::Search { topic, max_results } => {
                assert_eq!(topic, "machine learning");
                assert_eq!(max_results, DEFAULT_MAX_RESULTS);
            }
            _ => panic!("Expected Search command"),
        }
    }

    #[test]
    fn test_cli_store_dir_is_global() {
        let cli = Cli::parse_from(["research-scout", "topics", "--store-dir", "/tmp/papers"]);
        assert_eq!(cli.store_dir, Some(PathBuf::from("/tmp/papers")));
    }
}
