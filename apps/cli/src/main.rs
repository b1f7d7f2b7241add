use std::io::{self, BufRead, Write};
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use konspekt_core::{Assistant, Provider, SharedStore, format_store_readable};

/// CLI wrapper for Provider enum (needed for clap ValueEnum)
#[derive(Clone, Default, ValueEnum)]
enum CliProvider {
    #[default]
    Grok,
    Openai,
    Gemini,
}

impl From<CliProvider> for Provider {
    fn from(cli: CliProvider) -> Self {
        match cli {
            CliProvider::Grok => Provider::Grok,
            CliProvider::Openai => Provider::Openai,
            CliProvider::Gemini => Provider::Gemini,
        }
    }
}

#[derive(Parser)]
#[command(name = "konspekt")]
#[command(
    about = "Ask a question, paste a YouTube link, request code, or pose a math query - one prompt, one answer"
)]
struct Cli {
    /// Prompt or video URL. Without it, an interactive chat session starts.
    input: Option<String>,

    /// AI provider for text generation
    #[arg(short, long, default_value = "grok")]
    provider: CliProvider,

    /// Print the raw shared store as JSON instead of formatted output
    #[arg(long)]
    json: bool,
}

fn create_spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

fn render(store: &SharedStore, json: bool) -> Result<String> {
    if json {
        Ok(serde_json::to_string_pretty(store)?)
    } else {
        Ok(format_store_readable(store))
    }
}

async fn run_once(assistant: &Assistant, input: &str, json: bool) -> Result<()> {
    let spinner = create_spinner("Thinking...");
    let store = assistant.run(input).await;
    spinner.finish_and_clear();

    println!("{}", render(&store, json)?);
    Ok(())
}

async fn chat_loop(assistant: &Assistant, json: bool) -> Result<()> {
    println!(
        "\n{}  {}\n",
        style("konspekt").cyan().bold(),
        style("Research Assistant").dim()
    );
    println!(
        "{}",
        style("Ask a question, paste a YouTube link, or type 'exit' to leave.").dim()
    );
    println!("{}", style("─".repeat(60)).dim());

    let stdin = io::stdin();
    let mut turn = 0usize;
    loop {
        print!("{} ", style("you ›").green().bold());
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if matches!(input, "exit" | "quit") {
            break;
        }

        turn += 1;
        let spinner = create_spinner("Thinking...");
        let store = assistant.run(input).await;
        spinner.finish_and_clear();

        println!(
            "\n{} {}",
            style(format!("konspekt · turn {}", turn)).cyan().bold(),
            style("─".repeat(40)).dim()
        );
        println!("{}", render(&store, json)?);
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let provider: Provider = cli.provider.into();

    // Validate API key early
    if let Err(e) = provider.validate_api_key() {
        eprintln!("{} {}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    let assistant = Assistant::new(provider);

    match cli.input {
        Some(input) => run_once(&assistant, &input, cli.json).await,
        None => chat_loop(&assistant, cli.json).await,
    }
}
