use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use postcraft::config::Config;
use postcraft::extract::{extract_post, ExtractedPost};
use postcraft::generate::client::ChatCompletionsClient;
use postcraft::generate::{generate_raw_output, GenerationJob, Mode};
use postcraft::platform::Platform;

const DEFAULT_INSTRUCTIONS: &str = "Create short, engaging posts written from the perspective of \
someone who just watched this video, not the creator.";

/// Postcraft: platform-specific social posts from source material.
///
/// Generates LinkedIn, Instagram, and Twitter posts with an LLM, then
/// recovers each platform's post from whatever the model returned.
#[derive(Parser)]
#[command(name = "postcraft", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract per-platform posts from existing model output
    Extract {
        /// Comma-separated platforms (e.g. LinkedIn,Instagram,Twitter)
        #[arg(long, default_value = "LinkedIn,Instagram")]
        platforms: String,

        /// File holding the model output (reads stdin when omitted)
        #[arg(long)]
        input: Option<PathBuf>,

        /// Also print the raw output
        #[arg(long)]
        raw: bool,

        /// Print posts as JSON instead of cards
        #[arg(long)]
        json: bool,
    },

    /// Generate posts from a transcript or other source text
    Generate {
        /// Comma-separated platforms (e.g. LinkedIn,Instagram,Twitter)
        #[arg(long, default_value = "LinkedIn,Instagram")]
        platforms: String,

        /// File holding the source text (reads stdin when omitted)
        #[arg(long)]
        source: Option<PathBuf>,

        /// Guidance placed at the top of every prompt
        #[arg(long, default_value = DEFAULT_INSTRUCTIONS)]
        instructions: String,

        /// Ask for every platform in a single request
        #[arg(long)]
        combined: bool,

        /// Number of platform requests in flight (default: 3)
        #[arg(long, default_value = "3")]
        concurrency: u32,

        /// Also print the raw model output
        #[arg(long)]
        raw: bool,

        /// Print posts as JSON instead of cards
        #[arg(long)]
        json: bool,
    },

    /// Show which provider and model generation will use
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("postcraft=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Extract {
            platforms,
            input,
            raw,
            json,
        } => {
            let platforms = Platform::parse_list(&platforms)?;
            let output = read_input(input.as_deref())?;

            info!(
                platforms = platforms.len(),
                output_chars = output.chars().count(),
                "Extracting posts"
            );

            let posts = extract_all(&output, &platforms);
            render(&posts, &output, raw, json)?;
        }

        Commands::Generate {
            platforms,
            source,
            instructions,
            combined,
            concurrency,
            raw,
            json,
        } => {
            let config = Config::load()?;
            let platforms = Platform::parse_list(&platforms)?;
            let source_text = read_input(source.as_deref())?;

            let client = ChatCompletionsClient::from_config(&config)?;
            info!(
                provider = config.provider.label(),
                model = client.model(),
                "Using model provider"
            );

            let job = GenerationJob {
                source_text: &source_text,
                instructions: &instructions,
                platforms: &platforms,
                mode: if combined { Mode::Combined } else { Mode::PerPlatform },
                concurrency: concurrency as usize,
            };

            let spinner = ProgressBar::new_spinner();
            spinner.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner} {msg}")
                    .expect("valid template"),
            );
            spinner.set_message(format!(
                "Generating content using {}...",
                config.provider.label().to_uppercase()
            ));
            spinner.enable_steady_tick(Duration::from_millis(100));

            let result = generate_raw_output(&client, &job).await;
            spinner.finish_and_clear();
            let output = result?;

            let posts = extract_all(&output, &platforms);
            render(&posts, &output, raw, json)?;
        }

        Commands::Status => {
            let config = Config::load()?;
            postcraft::status::show(&config);
        }
    }

    Ok(())
}

/// Extract every requested platform from the same output.
fn extract_all(output: &str, platforms: &[Platform]) -> Vec<ExtractedPost> {
    platforms
        .iter()
        .map(|platform| extract_post(output, platform, platforms))
        .collect()
}

fn render(posts: &[ExtractedPost], output: &str, raw: bool, json: bool) -> Result<()> {
    if json {
        println!("{}", postcraft::output::posts_to_json(posts)?);
        return Ok(());
    }

    postcraft::output::terminal::display_posts(posts);
    if raw {
        postcraft::output::terminal::display_raw_output(output);
    } else {
        println!("{}", "To see the raw model output, pass --raw.".dimmed());
    }
    Ok(())
}

/// Read text from a file, or from stdin when no path is given.
fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read stdin")?;
            Ok(text)
        }
    }
}
