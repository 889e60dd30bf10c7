//! qubi CLI: Command-line interface for the qubi mock conversation demo

use clap::{Parser, Subcommand};
use qubi_engine::{ChatSession, Config, ConversationId, SendOutcome, QUBI_DIR, SHOWCASE};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

/// Mock conversation demo with TUI
#[derive(Parser)]
#[command(name = "qubi")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Config file (default: .qubi/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the TUI (default when no command specified)
    Tui,

    /// Print conversation summaries
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Send a message, wait for the reply and print the conversation
    Send {
        /// Conversation id
        conversation: String,

        /// Message text
        text: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the project showcase
    Showcase,

    /// Initialize .qubi/ directory and config
    Init,
}

const LOG_FILE: &str = "qubi.log";

fn main() {
    let cli = Cli::parse();
    let tui = matches!(cli.command, None | Some(Commands::Tui));
    init_logging(tui);

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| Config::default_path(Path::new(".")));

    let result = match cli.command {
        None | Some(Commands::Tui) => cmd_tui(&config_path),
        Some(Commands::List { json }) => cmd_list(&config_path, json),
        Some(Commands::Send {
            conversation,
            text,
            json,
        }) => cmd_send(&config_path, &conversation, &text, json),
        Some(Commands::Showcase) => {
            print!("{}", SHOWCASE.to_plain_text());
            Ok(())
        }
        Some(Commands::Init) => cmd_init(&config_path),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

/// Install the tracing subscriber.
///
/// The TUI owns the terminal, so its logs go to `.qubi/qubi.log`.
fn init_logging(tui: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if tui {
        let dir = Path::new(QUBI_DIR);
        let file = std::fs::create_dir_all(dir).and_then(|()| {
            std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(dir.join(LOG_FILE))
        });
        if let Ok(file) = file {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(std::sync::Mutex::new(file))
                .init();
        }
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}

fn load_config(path: &Path) -> Result<Config, Box<dyn std::error::Error>> {
    let config = Config::load_or_default(path)?;
    debug!(path = %path.display(), ?config, "config loaded");
    Ok(config)
}

fn runtime() -> Result<tokio::runtime::Runtime, Box<dyn std::error::Error>> {
    Ok(tokio::runtime::Runtime::new()?)
}

fn cmd_tui(config_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(config_path)?;
    runtime()?.block_on(qubi_tui::run_tui(&config))
}

fn cmd_list(config_path: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(config_path)?;
    let session = ChatSession::from_config(&config);
    let summaries = session.controller().summaries();

    if json {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
        return Ok(());
    }

    println!("Conversations\n");
    for summary in &summaries {
        println!("  [{}] {}", summary.id, summary.name);
        if !summary.preview.is_empty() {
            println!("      {}", summary.preview);
        }
    }
    Ok(())
}

fn cmd_send(
    config_path: &Path,
    conversation: &str,
    text: &str,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(config_path)?;
    let id = ConversationId::new(conversation);

    runtime()?.block_on(async {
        let mut session = ChatSession::from_config(&config);
        if !session.open_conversation(&id) {
            return Err(format!("unknown conversation '{id}'").into());
        }

        match session.send_message(text) {
            SendOutcome::Sent { .. } => {
                if session.next_reply().await.is_none() {
                    warn!(conversation = %id, "reply was not delivered");
                }
            }
            SendOutcome::Ignored(reason) => {
                return Err(format!("message not sent: {reason:?}").into());
            }
        }

        let Some(conv) = session.controller().conversation(&id) else {
            return Err(format!("unknown conversation '{id}'").into());
        };

        if json {
            println!("{}", serde_json::to_string_pretty(conv)?);
        } else {
            println!("{} ({})\n", conv.name, conv.id);
            for message in conv.messages() {
                println!(
                    "  [{}] {}: {}",
                    message.timestamp,
                    message.sender.label(),
                    message.text
                );
            }
        }
        Ok::<(), Box<dyn std::error::Error>>(())
    })
}

fn cmd_init(config_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    if config_path.exists() {
        println!("Config already exists at {}", config_path.display());
        return Ok(());
    }

    Config::default().save(config_path)?;
    println!("Created {}", config_path.display());
    Ok(())
}
