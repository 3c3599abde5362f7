//! Command-line interface parsing and handling
//!
//! This module handles parsing command-line arguments and executing the
//! appropriate commands.

use std::env;
use std::error::Error;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::core::config::Config;
use crate::core::constants::DEFAULT_BASE_URL;
use crate::ui::chat_loop::run_chat;

#[derive(Parser)]
#[command(name = "relaychat")]
#[command(about = "A terminal chat interface for selector-routed prompt gateways")]
#[command(
    long_about = "Relaychat is a full-screen terminal chat interface for gateways that route \
user input through a selector endpoint and execute the resulting prompt \
against a target endpoint.\n\n\
Environment Variables:\n\
  RELAYCHAT_BASE_URL   Gateway base URL (optional, defaults to http://localhost:8000)\n\n\
Controls:\n\
  Type              Enter your message in the input field\n\
  Enter             Send the message through the selector/target chain\n\
  Esc               Send the stop command to the target endpoint\n\
  Up/Down/Mouse     Scroll through the transcript\n\
  Ctrl+C            Quit the application\n\
  Backspace         Delete characters in the input field"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Gateway base URL
    #[arg(short = 'b', long, global = true, value_name = "URL")]
    pub base_url: Option<String>,

    /// Enable session logging to the specified file
    #[arg(short = 'l', long, global = true, value_name = "FILE")]
    pub log: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the chat interface (default)
    Chat,
    /// Set configuration values
    Set {
        /// Configuration key to set (base-url, log-file)
        key: String,
        /// Value to set for the key
        value: Option<String>,
    },
    /// Unset configuration values
    Unset {
        /// Configuration key to unset (base-url, log-file)
        key: String,
    },
}

pub fn main() -> Result<(), Box<dyn Error>> {
    tokio::runtime::Runtime::new()
        .unwrap()
        .block_on(async_main())
}

async fn async_main() -> Result<(), Box<dyn Error>> {
    init_tracing();
    let args = Args::parse();

    match args.command.unwrap_or(Commands::Chat) {
        Commands::Set { key, value } => {
            let mut config = Config::load()?;
            match key.as_str() {
                "base-url" => match value {
                    Some(val) => {
                        config.base_url = Some(val.clone());
                        config.save()?;
                        println!("✅ Set base-url to: {val}");
                    }
                    None => config.print_all(),
                },
                "log-file" => match value {
                    Some(val) => {
                        config.log_file = Some(val.clone());
                        config.save()?;
                        println!("✅ Set log-file to: {val}");
                    }
                    None => config.print_all(),
                },
                _ => {
                    eprintln!("❌ Unknown config key: {key}");
                    std::process::exit(1);
                }
            }
            Ok(())
        }
        Commands::Unset { key } => {
            let mut config = Config::load()?;
            match key.as_str() {
                "base-url" => {
                    config.base_url = None;
                    config.save()?;
                    println!("✅ Unset base-url");
                }
                "log-file" => {
                    config.log_file = None;
                    config.save()?;
                    println!("✅ Unset log-file");
                }
                _ => {
                    eprintln!("❌ Unknown config key: {key}");
                    std::process::exit(1);
                }
            }
            Ok(())
        }
        Commands::Chat => {
            let config = Config::load()?;
            let base_url = resolve_base_url(args.base_url, &config);
            let log_file = args.log.or(config.log_file);
            run_chat(base_url, log_file).await
        }
    }
}

/// Quiet unless `RUST_LOG` asks for output.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("off")))
        .with_target(true)
        .try_init();
}

/// Flag > environment > config file > built-in default.
fn resolve_base_url(flag: Option<String>, config: &Config) -> String {
    flag.or_else(|| env::var("RELAYCHAT_BASE_URL").ok())
        .or_else(|| config.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
}
