use crate::constants::GATEWAY_CHAT_COMPLETIONS;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the relay server
    Serve {
        #[arg(long, default_value_t = 8080)]
        port: u16,
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
        #[arg(long, default_value_t = 300)]
        request_timeout_secs: u64,
        #[arg(long, default_value_t = 10)]
        connect_timeout_secs: u64,
        #[arg(long, default_value = GATEWAY_CHAT_COMPLETIONS)]
        gateway_url: String,
    },
    /// Stream a design analysis from a running relay and print it
    Analyze {
        /// Design reference (Figma/Adobe XD link) to analyze
        #[arg(long)]
        design_url: Option<String>,
        #[arg(long, default_value = "nextjs")]
        platform: String,
        /// Custom instructions sent verbatim instead of the template
        #[arg(long)]
        custom_prompt: Option<String>,
        #[arg(long, default_value = "http://127.0.0.1:8080/analyze-design")]
        endpoint: String,
    },
}

#[derive(Clone)]
pub struct AppState {
    pub client: reqwest::Client,
    /// Server-held gateway credential. Absent at startup is tolerated; the
    /// relay rejects requests with a configuration error until it is set.
    pub api_key: Option<String>,
    pub gateway_url: String,
}
