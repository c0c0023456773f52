//! Strategy coach: streaming chat assistant for competitive gamers
//!
//! `coach serve` starts the web UI; `coach ask` runs one turn in the terminal.

use std::io::Write;

use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand};
use futures::StreamExt;
use tracing_subscriber::{fmt, EnvFilter};

use coach::coach::{Coach, QuickAction, TurnPhase};
use coach::config::{self, CoachConfig};
use coach::conversation::display::{format_line, render_transcript, ASSISTANT_AVATAR};
use coach::conversation::Conversation;
use coach::llm::CompletionClient;

#[derive(Parser)]
#[command(name = "coach")]
#[command(about = "AI gaming strategy coach with streaming replies")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    selection: SelectionArgs,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the chat UI over HTTP (default)
    Serve {
        /// Bind host
        #[arg(long)]
        host: Option<String>,

        /// Bind port
        #[arg(long, short = 'p')]
        port: Option<u16>,
    },

    /// Ask one question and print the streamed reply
    Ask {
        /// Question text
        #[arg(required_unless_present = "action")]
        question: Option<String>,

        /// Run a quick action instead (e.g. "Build Guide")
        #[arg(long, short = 'a', conflicts_with = "question")]
        action: Option<String>,
    },
}

/// Selector defaults, shared by both subcommands
#[derive(Args)]
struct SelectionArgs {
    /// Coaching persona
    #[arg(long, global = true)]
    persona: Option<String>,

    /// Game
    #[arg(long, global = true)]
    domain: Option<String>,

    /// Response detail, 1-10
    #[arg(long, global = true)]
    verbosity: Option<i64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (from ~/.coach/.env or current dir)
    let env_path = Some(config::dotenv_path()).filter(|p| p.exists());
    if let Some(path) = env_path {
        let _ = dotenvy::from_path(&path);
    } else {
        let _ = dotenvy::dotenv();
    }

    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // CLI args > env vars > config file > defaults
    let mut config = CoachConfig::from_env();
    if let Some(persona) = cli.selection.persona {
        config.default_persona = persona;
    }
    if let Some(domain) = cli.selection.domain {
        config.default_domain = domain;
    }
    if let Some(verbosity) = cli.selection.verbosity {
        config.default_verbosity = verbosity;
    }

    tracing::info!(
        model = %config.model,
        credential = config.api_key.is_some(),
        "Configuration loaded"
    );

    match cli.command.unwrap_or(Command::Serve {
        host: None,
        port: None,
    }) {
        Command::Serve { host, port } => {
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }
            coach::server::run(&config).await
        }
        Command::Ask { question, action } => ask(&config, question, action).await,
    }
}

async fn ask(
    config: &CoachConfig,
    question: Option<String>,
    action: Option<String>,
) -> Result<()> {
    let settings = config.default_turn_settings()?;
    let coach = Coach::new(CompletionClient::from_config(config)?);

    let mut turn = match (action, question) {
        (Some(action), _) => {
            let action = QuickAction::from_name(&action)?;
            coach.start_quick_action(action, Conversation::new(), settings)
        }
        (None, Some(question)) => coach.start_turn(Conversation::new(), &question, settings),
        (None, None) => bail!("nothing to ask"),
    };

    let mut stdout = std::io::stdout();
    let mut printed = String::new();

    while let Some(snapshot) = turn.next().await {
        match snapshot.phase {
            TurnPhase::UserAppended => {
                for line in render_transcript(&snapshot.conversation)
                    .iter()
                    .filter(|m| !m.pending)
                {
                    println!("{}", format_line(line));
                }
                print!("{} ", ASSISTANT_AVATAR);
            }
            TurnPhase::Streaming(_) => {
                let Some(reply) = snapshot.conversation.last() else {
                    continue;
                };
                // Replies are cumulative; print only what is new
                match reply.content.strip_prefix(printed.as_str()) {
                    Some(fresh) => print!("{}", fresh),
                    None => print!("\n{}", reply.content),
                }
                printed.clone_from(&reply.content);
            }
            TurnPhase::Idle | TurnPhase::Settled => {}
        }
        stdout.flush()?;
    }

    println!();
    Ok(())
}
