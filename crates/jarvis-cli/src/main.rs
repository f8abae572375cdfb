//! jarvis CLI: Terminal chat client for the JarvisAI agent backend

use clap::{Parser, Subcommand};
use jarvis_client::{
    format::{format_millis, format_uptime},
    ApiClient, ClientConfig, EMPTY_RESPONSE_FALLBACK,
};
use tracing_subscriber::EnvFilter;

/// Terminal chat client for the JarvisAI agent backend
#[derive(Parser)]
#[command(name = "jarvis")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the chat TUI (default when no command specified)
    Tui,

    /// Send a single prompt and print the reply
    Ask {
        /// The prompt to send
        prompt: String,

        /// Output the raw response as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print backend health and agent availability
    Status {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    let config = ClientConfig::from_env();

    match cli.command {
        None | Some(Commands::Tui) => {
            // Log to a file so the alternate screen stays clean
            init_tracing(true);
            let rt = tokio::runtime::Runtime::new().expect("Failed to create tokio runtime");
            if let Err(e) = rt.block_on(jarvis_tui::run_tui(config)) {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
        Some(Commands::Ask { prompt, json }) => {
            init_tracing(false);
            let rt = tokio::runtime::Runtime::new().expect("Failed to create tokio runtime");
            rt.block_on(cmd_ask(&config, &prompt, json));
        }
        Some(Commands::Status { json }) => {
            init_tracing(false);
            let rt = tokio::runtime::Runtime::new().expect("Failed to create tokio runtime");
            rt.block_on(cmd_status(&config, json));
        }
    }
}

/// Install the tracing subscriber.
///
/// The TUI writes to `jarvis.log` in the current directory so log lines do
/// not corrupt the alternate screen; one-shot commands log to stderr.
fn init_tracing(to_file: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    if to_file {
        // Only open the log file when logging was asked for
        if std::env::var_os("RUST_LOG").is_none() {
            return;
        }
        match std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open("jarvis.log")
        {
            Ok(file) => {
                tracing_subscriber::fmt()
                    .with_env_filter(filter)
                    .with_writer(file)
                    .with_ansi(false)
                    .init();
            }
            Err(e) => {
                eprintln!("Warning: could not open jarvis.log: {e}");
            }
        }
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}

async fn cmd_ask(config: &ClientConfig, prompt: &str, json: bool) {
    let client = match ApiClient::new(config.clone()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    let response = match client.submit_job(prompt).await {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&response).expect("failed to serialize")
        );
        return;
    }

    let result = response.result.as_ref();
    let reply = result
        .and_then(|r| r.response.as_deref())
        .or(response.message.as_deref())
        .unwrap_or(EMPTY_RESPONSE_FALLBACK);
    println!("{reply}");

    if let Some(result) = result {
        if let Some(agent) = &result.agent {
            eprintln!();
            eprintln!("Agent: {agent}");
        }
    }
    if let Some(ms) = response.processing_time {
        eprintln!("Processing time: {}", format_millis(ms));
    }
}

async fn cmd_status(config: &ClientConfig, json: bool) {
    let client = match ApiClient::new(config.clone()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    let (health, agents) = match client.fetch_system_info().await {
        Ok(info) => info,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    if json {
        let output = serde_json::json!({
            "health": health,
            "agents": agents,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&output).expect("failed to serialize")
        );
        return;
    }

    println!("JarvisAI Status\n");
    println!("Server: {}", health.status);
    println!("Uptime: {}", format_uptime(health.uptime));
    println!("MongoDB: {}", health.mongodb);
    println!("Agents: {}", health.agents);

    println!();

    if let Some(stats) = &agents.stats {
        println!("Total tasks: {}", stats.total_tasks);
        println!("Active agents: {}", stats.active_agents.len());
        println!();
    }

    if agents.available_agents.is_empty() {
        println!("No agents available");
    } else {
        println!("Available agents:");
        for agent in &agents.available_agents {
            let status = agent.status.as_deref().unwrap_or("implemented");
            println!("  {} ({status})", agent.name);
            println!("    {}", agent.description);
        }
    }
}
