//! Guggy CLI
//!
//! Runs a single text-to-GIF lookup from the command line.

use anyhow::Context;
use clap::Parser;
use elizaos_plugin_guggy::logging::init_logging;
use elizaos_plugin_guggy::{
    GuggyConfig, GuggyService, MatrixConfig, MatrixMediaClient, PLUGIN_VERSION,
};

#[derive(Parser)]
#[command(name = "guggy")]
#[command(author = "elizaOS")]
#[command(version = PLUGIN_VERSION)]
#[command(about = "Turn a sentence into a GIF with the Guggy API", long_about = None)]
struct Cli {
    /// Words of the sentence to search for
    #[arg(required = true)]
    words: Vec<String>,

    /// Upload the GIF to the Matrix homeserver and print the chat message
    #[arg(long)]
    upload: bool,

    /// Room ID recorded in logs when uploading
    #[arg(long, default_value = "!cli:localhost")]
    room_id: String,

    /// Enable debug logging
    #[arg(long, short)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_logging(if cli.verbose { "debug" } else { "info" });

    let config = GuggyConfig::from_env().context("loading Guggy configuration")?;
    let service = GuggyService::new("guggy-cli", "@guggy:localhost", config)?;

    if cli.upload {
        let matrix = MatrixConfig::from_env().context("loading Matrix configuration")?;
        let uploader = MatrixMediaClient::new(matrix)?;
        let message = service
            .cmd_guggy(&uploader, &cli.room_id, service.service_user_id(), &cli.words)
            .await?;
        println!("{}", serde_json::to_string_pretty(&message)?);
    } else {
        let result = service.client().text_to_gif(&cli.words.join(" ")).await?;
        println!("{}", serde_json::to_string_pretty(&result)?);
    }

    Ok(())
}
