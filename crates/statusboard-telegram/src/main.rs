//! Status board Telegram bot binary.
//!
//! Start the bot with:
//! ```bash
//! TOKEN=xxx cargo run -p statusboard-telegram
//! ```

use std::path::PathBuf;

use clap::Parser;
use statusboard_telegram::{BotConfig, StatusBoardBot, DEFAULT_OPTIONS_FILE, TOKEN_ENV};
use tracing_subscriber::EnvFilter;

/// Status board bot - shared free/busy buttons in a Telegram chat
#[derive(Parser, Debug)]
#[command(name = "statusboard-telegram")]
#[command(about = "Telegram bot keeping a shared free/busy status board")]
struct Args {
    /// Telegram bot token (ignored when the options file provides one)
    #[arg(long = "token", env = TOKEN_ENV, hide_env_values = true)]
    token: Option<String>,

    /// Options file with a {"TOKEN": "..."} entry
    #[arg(long, default_value = DEFAULT_OPTIONS_FILE)]
    options_file: PathBuf,

    /// Verbose logging (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env before clap reads TOKEN from the environment
    let _ = dotenvy::dotenv();

    let args = Args::parse();

    let default_filter = match args.verbose {
        0 => "statusboard_telegram=info,statusboard_core=info,teloxide=warn",
        1 => "statusboard_telegram=debug,statusboard_core=debug,teloxide=info",
        2 => "statusboard_telegram=trace,statusboard_core=trace,teloxide=debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = BotConfig::resolve(&args.options_file, args.token.as_deref())?;
    let bot = StatusBoardBot::new(&config);

    match bot.get_me().await {
        Ok(username) => {
            tracing::info!(username = %username, "Bot initialized successfully");
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to get bot info");
            return Err(e.into());
        }
    }

    bot.start_polling().await?;

    tracing::info!("Bot stopped");
    Ok(())
}
