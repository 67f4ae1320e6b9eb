use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use humanizer::{
    AppState, ChatClient, ChatConfig, Humanizer, HumanizerConfig, OutputMode, Outcome,
    PhraseTable, ServerConfig, read_document, rewrite_with_llm, serve, write_output,
};

#[derive(Parser)]
#[command(name = "humanizer")]
#[command(author, version, about = "Rewrite machine-generated prose to read more naturally", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the local stochastic transform over a document
    Humanize {
        /// Input text file (stdin when omitted or `-`)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Wrap each paragraph in <p> markup
        #[arg(long)]
        markup: bool,

        /// Seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,

        #[command(flatten)]
        transform: TransformArgs,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Rewrite a document through a chat model (needs OPENAI_API_KEY)
    Rewrite {
        /// Input text file (stdin when omitted or `-`)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Wrap each paragraph in <p> markup
        #[arg(long)]
        markup: bool,

        /// Minimum words left after cleanup
        #[arg(long, default_value = "10")]
        min_words: usize,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Serve the web form
    Serve {
        /// Address to listen on (defaults to 0.0.0.0:$PORT)
        #[arg(long, env = "HUMANIZER_LISTEN_ADDR")]
        listen_addr: Option<String>,

        /// Port used when no listen address is given
        #[arg(long, env = "PORT", default_value = "5000")]
        port: u16,

        /// Offer the chat-model engine on the form (needs OPENAI_API_KEY)
        #[arg(long)]
        enable_llm: bool,

        /// URL to ping periodically so the host does not idle out
        #[arg(long, env = "HUMANIZER_KEEP_ALIVE_URL")]
        keep_alive_url: Option<String>,

        /// Minutes between keep-alive pings
        #[arg(long, default_value = "10")]
        keep_alive_minutes: u64,

        /// Seed every request identically (for demos and testing)
        #[arg(long)]
        seed: Option<u64>,

        #[command(flatten)]
        transform: TransformArgs,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

/// Settings shared by every command that runs the local transform
#[derive(Args, Debug)]
struct TransformArgs {
    /// JSON file with humanizer settings (replaces the preset)
    #[arg(long)]
    config: Option<PathBuf>,

    /// JSON file with alternative phrase tables
    #[arg(long)]
    phrases: Option<PathBuf>,

    /// Probability preset
    #[arg(long, value_enum, default_value_t = Preset::Default)]
    preset: Preset,

    /// Chance of an opener on a paragraph's first sentence
    #[arg(long)]
    opener_probability: Option<f64>,

    /// Chance of a transition on each later sentence
    #[arg(long)]
    transition_probability: Option<f64>,

    /// Chance of fusing a sentence with the next one
    #[arg(long)]
    merge_probability: Option<f64>,

    /// Chance of a quirk before each terminal punctuation
    #[arg(long)]
    quirk_probability: Option<f64>,

    /// Documents with fewer words are rejected
    #[arg(long)]
    min_words: Option<usize>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Preset {
    /// Tuned defaults
    Default,
    /// Every probability at 0.9, as the reference behaved
    Historical,
    /// Nothing injected; whitespace normalization only
    Off,
}

impl Preset {
    fn config(self) -> HumanizerConfig {
        match self {
            Preset::Default => HumanizerConfig::default(),
            Preset::Historical => HumanizerConfig::historical(),
            Preset::Off => HumanizerConfig::disabled(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Humanize {
            input,
            output,
            markup,
            seed,
            transform,
            verbose,
        } => {
            setup_logging(verbose);
            humanize_document(input, output, markup, seed, &transform)
        }
        Commands::Rewrite {
            input,
            output,
            markup,
            min_words,
            verbose,
        } => {
            setup_logging(verbose);
            rewrite_document(input, output, markup, min_words).await
        }
        Commands::Serve {
            listen_addr,
            port,
            enable_llm,
            keep_alive_url,
            keep_alive_minutes,
            seed,
            transform,
            verbose,
        } => {
            setup_logging(verbose);
            let server_config = ServerConfig {
                listen_addr: listen_addr.unwrap_or_else(|| format!("0.0.0.0:{port}")),
                keep_alive_url,
                keep_alive_interval: keep_alive_interval(keep_alive_minutes),
            };
            serve_form(server_config, enable_llm, seed, &transform).await
        }
    }
}

/// Whole minutes, at least one, saturating instead of overflowing
fn keep_alive_interval(minutes: u64) -> Duration {
    Duration::from_secs(60).saturating_mul(u32::try_from(minutes.max(1)).unwrap_or(u32::MAX))
}

fn setup_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}

fn build_humanizer(args: &TransformArgs) -> Result<Humanizer> {
    let mut config = match &args.config {
        Some(path) => HumanizerConfig::from_json_file(path)?,
        None => args.preset.config(),
    };

    if let Some(p) = args.opener_probability {
        config.tone.opener_probability = p;
    }
    if let Some(p) = args.transition_probability {
        config.tone.transition_probability = p;
    }
    if let Some(p) = args.merge_probability {
        config.merge.merge_probability = p;
    }
    if let Some(p) = args.quirk_probability {
        config.quirks.quirk_probability = p;
    }
    if let Some(min_words) = args.min_words {
        config.min_words = min_words;
    }

    let phrases = match &args.phrases {
        Some(path) => PhraseTable::from_json_file(path)?,
        None => PhraseTable::default(),
    };

    info!(?config, "Humanizer configured");
    Humanizer::new(config, Arc::new(phrases)).context("Invalid humanizer configuration")
}

fn output_mode(markup: bool) -> OutputMode {
    if markup {
        OutputMode::Markup
    } else {
        OutputMode::Plain
    }
}

fn humanize_document(
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    markup: bool,
    seed: Option<u64>,
    transform: &TransformArgs,
) -> Result<()> {
    let humanizer = build_humanizer(transform)?;

    info!("Reading document from {:?}", input.as_deref().unwrap_or(Path::new("-")));
    let document = read_document(input.as_deref()).context("Failed to read input document")?;

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let outcome = humanizer.process(&document, output_mode(markup), &mut rng);
    if let Outcome::Rejected(rejection) = &outcome {
        warn!(?rejection, "Document not transformed");
    }

    write_output(output.as_deref(), &outcome.into_display())
}

async fn rewrite_document(
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    markup: bool,
    min_words: usize,
) -> Result<()> {
    let client = ChatClient::new(ChatConfig::from_env()?);
    info!(model = %client.config().model, "Rewriting with chat model");

    let document = read_document(input.as_deref()).context("Failed to read input document")?;
    let rewritten = rewrite_with_llm(&client, &document, output_mode(markup), min_words).await;

    write_output(output.as_deref(), &rewritten)
}

async fn serve_form(
    config: ServerConfig,
    enable_llm: bool,
    seed: Option<u64>,
    transform: &TransformArgs,
) -> Result<()> {
    let humanizer = build_humanizer(transform)?;
    let mut state = AppState::new(humanizer).with_seed(seed);

    if enable_llm {
        let chat_config = ChatConfig::from_env()?;
        info!(model = %chat_config.model, "Chat-model engine enabled");
        state = state.with_llm(ChatClient::new(chat_config));
    }

    serve(config, state).await.context("Server failed")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keep_alive_interval() {
        assert_eq!(keep_alive_interval(0), Duration::from_secs(60));
        assert_eq!(keep_alive_interval(14), Duration::from_secs(14 * 60));
        assert_eq!(
            keep_alive_interval(u64::MAX),
            Duration::from_secs(60).saturating_mul(u32::MAX)
        );
    }
}
